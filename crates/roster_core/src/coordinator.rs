use std::sync::Arc;

use shared::{error::ErrorReply, protocol::MutationReply};
use tracing::{debug, error, info, warn};

use crate::{
    api::RosterApi,
    error::RemoteError,
    fetcher::RemoteRosterFetcher,
    notification::{NotificationChannel, Severity, StatusMessage},
    view::{SignupForm, SubmitTrigger},
};

pub const SELECT_ACTIVITY_TEXT: &str = "Please select an activity";
pub const SIGNUP_TRANSPORT_FAILURE_TEXT: &str = "Failed to sign up. Please try again.";
pub const UNREGISTERED_TEXT: &str = "Successfully unregistered from the activity";
pub const UNREGISTER_TRANSPORT_FAILURE_TEXT: &str = "Failed to unregister. Please try again.";

/// Lifecycle of one signup or unregister invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationEvent {
    /// Local precondition failed; the request is never sent.
    Invalid,
    Submit,
    Accepted,
    Rejected,
}

impl MutationPhase {
    /// Transition table. `None` marks a transition that must not happen.
    pub fn advance(self, event: MutationEvent) -> Option<Self> {
        match (self, event) {
            (Self::Idle, MutationEvent::Invalid) => Some(Self::Failed),
            (Self::Idle, MutationEvent::Submit) => Some(Self::Submitting),
            (Self::Submitting, MutationEvent::Accepted) => Some(Self::Succeeded),
            (Self::Submitting, MutationEvent::Rejected) => Some(Self::Failed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    pub phase: MutationPhase,
    pub status: StatusMessage,
}

fn transition(operation: &str, phase: MutationPhase, event: MutationEvent) -> MutationPhase {
    match phase.advance(event) {
        Some(next) => {
            debug!(operation, from = ?phase, to = ?next, "mutation: phase changed");
            next
        }
        None => {
            warn!(operation, ?phase, ?event, "mutation: ignored invalid transition");
            phase
        }
    }
}

/// What the remote call amounted to, reduced to what the banner needs.
enum Resolution {
    Accepted(MutationReply),
    Refused(String),
}

fn resolve(
    operation: &str,
    result: Result<MutationReply, RemoteError>,
    transport_failure_text: &str,
) -> Resolution {
    match result {
        Ok(reply) => Resolution::Accepted(reply),
        Err(RemoteError::Rejected { status, detail }) => {
            let reply = ErrorReply { detail };
            warn!(
                operation,
                status,
                detail = reply.detail_or_generic(),
                "mutation: rejected by server"
            );
            Resolution::Refused(reply.detail_or_generic().to_string())
        }
        Err(err) => {
            error!(operation, error = %err, "mutation: request failed");
            Resolution::Refused(transport_failure_text.to_string())
        }
    }
}

/// Signs a participant up remotely, then refreshes the authoritative roster.
pub struct SignupCoordinator {
    api: Arc<dyn RosterApi>,
    fetcher: Arc<RemoteRosterFetcher>,
    notifications: Arc<NotificationChannel>,
}

impl SignupCoordinator {
    pub fn new(
        api: Arc<dyn RosterApi>,
        fetcher: Arc<RemoteRosterFetcher>,
        notifications: Arc<NotificationChannel>,
    ) -> Self {
        Self {
            api,
            fetcher,
            notifications,
        }
    }

    pub async fn submit(&self, form: &dyn SignupForm) -> MutationOutcome {
        let Some(activity) = form.selected_activity().filter(|name| !name.is_empty()) else {
            let phase = transition("signup", MutationPhase::Idle, MutationEvent::Invalid);
            let status = self
                .notifications
                .show(SELECT_ACTIVITY_TEXT, Severity::Error)
                .await;
            return MutationOutcome { phase, status };
        };
        let email = form.email();

        let mut phase = transition("signup", MutationPhase::Idle, MutationEvent::Submit);
        form.set_submit_trigger(SubmitTrigger::Busy);

        let result = self.api.signup(&activity, &email).await;
        let (text, severity) = match resolve("signup", result, SIGNUP_TRANSPORT_FAILURE_TEXT) {
            Resolution::Accepted(reply) => {
                info!(activity = %activity, "signup: accepted");
                phase = transition("signup", phase, MutationEvent::Accepted);
                form.reset();
                self.fetcher.refresh().await;
                (reply.message, Severity::Success)
            }
            Resolution::Refused(text) => {
                phase = transition("signup", phase, MutationEvent::Rejected);
                (text, Severity::Error)
            }
        };

        let status = self.notifications.show(text, severity).await;
        form.set_submit_trigger(SubmitTrigger::Ready);
        MutationOutcome { phase, status }
    }
}

/// Removes a participant remotely. Callers collect confirmation first; a
/// declined removal never reaches this type.
pub struct UnregisterCoordinator {
    api: Arc<dyn RosterApi>,
    fetcher: Arc<RemoteRosterFetcher>,
    notifications: Arc<NotificationChannel>,
}

impl UnregisterCoordinator {
    pub fn new(
        api: Arc<dyn RosterApi>,
        fetcher: Arc<RemoteRosterFetcher>,
        notifications: Arc<NotificationChannel>,
    ) -> Self {
        Self {
            api,
            fetcher,
            notifications,
        }
    }

    pub async fn unregister(&self, activity: &str, email: &str) -> MutationOutcome {
        let mut phase = transition("unregister", MutationPhase::Idle, MutationEvent::Submit);

        let result = self.api.unregister(activity, email).await;
        let (text, severity) =
            match resolve("unregister", result, UNREGISTER_TRANSPORT_FAILURE_TEXT) {
                Resolution::Accepted(_) => {
                    info!(activity, "unregister: accepted");
                    phase = transition("unregister", phase, MutationEvent::Accepted);
                    self.fetcher.refresh().await;
                    (UNREGISTERED_TEXT.to_string(), Severity::Success)
                }
                Resolution::Refused(text) => {
                    phase = transition("unregister", phase, MutationEvent::Rejected);
                    (text, Severity::Error)
                }
            };

        let status = self.notifications.show(text, severity).await;
        MutationOutcome { phase, status }
    }
}
