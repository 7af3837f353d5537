use std::sync::Arc;

use shared::{domain::DemoActivityId, protocol::RosterSnapshot};
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    api::RosterApi,
    coordinator::{MutationOutcome, SignupCoordinator, UnregisterCoordinator},
    demo::{DemoRoster, MembershipChange, OptimisticJoinLeaveController},
    fetcher::{RefreshOutcome, RemoteRosterFetcher},
    notification::{NotificationChannel, StatusMessage},
    view::{BoardView, RemovalConfirmation, SignupForm},
};

/// One signup board: a single instance of every component, wired together.
///
/// The demo roster and the fetched snapshot are reachable only through their
/// own components, so the optimistic path cannot leak into the remote one.
pub struct RosterBoard {
    fetcher: Arc<RemoteRosterFetcher>,
    notifications: Arc<NotificationChannel>,
    signup: SignupCoordinator,
    unregister: UnregisterCoordinator,
    demo: Mutex<OptimisticJoinLeaveController>,
    confirmation: Arc<dyn RemovalConfirmation>,
}

impl RosterBoard {
    pub fn new(
        api: Arc<dyn RosterApi>,
        view: Arc<dyn BoardView>,
        confirmation: Arc<dyn RemovalConfirmation>,
        demo_roster: DemoRoster,
    ) -> Self {
        let notifications = Arc::new(NotificationChannel::new(Arc::clone(&view)));
        Self::with_notifications(api, view, confirmation, demo_roster, notifications)
    }

    pub fn with_notifications(
        api: Arc<dyn RosterApi>,
        view: Arc<dyn BoardView>,
        confirmation: Arc<dyn RemovalConfirmation>,
        demo_roster: DemoRoster,
        notifications: Arc<NotificationChannel>,
    ) -> Self {
        let fetcher = Arc::new(RemoteRosterFetcher::new(
            Arc::clone(&api),
            Arc::clone(&view),
        ));
        Self {
            signup: SignupCoordinator::new(
                Arc::clone(&api),
                Arc::clone(&fetcher),
                Arc::clone(&notifications),
            ),
            unregister: UnregisterCoordinator::new(
                api,
                Arc::clone(&fetcher),
                Arc::clone(&notifications),
            ),
            demo: Mutex::new(OptimisticJoinLeaveController::new(demo_roster, view)),
            fetcher,
            notifications,
            confirmation,
        }
    }

    /// Initial load of the authoritative roster.
    pub async fn load(&self) -> RefreshOutcome {
        self.fetcher.refresh().await
    }

    pub async fn submit_signup(&self, form: &dyn SignupForm) -> MutationOutcome {
        self.signup.submit(form).await
    }

    /// A participant's remove affordance. Returns `None` when the user
    /// declines, in which case nothing is sent and nothing changes.
    pub async fn remove_participant(&self, activity: &str, email: &str) -> Option<MutationOutcome> {
        if !self.confirmation.confirm_removal(activity, email).await {
            info!(activity, "unregister: removal declined");
            return None;
        }
        Some(self.unregister.unregister(activity, email).await)
    }

    /// The demo join/leave button for the simulated current user.
    pub async fn toggle_demo_membership(&self, activity_id: DemoActivityId) -> MembershipChange {
        self.demo.lock().await.toggle_current_user(activity_id)
    }

    pub async fn demo_roster(&self) -> DemoRoster {
        self.demo.lock().await.roster().clone()
    }

    pub async fn snapshot(&self) -> Option<Arc<RosterSnapshot>> {
        self.fetcher.snapshot().await
    }

    pub async fn status(&self) -> Option<StatusMessage> {
        self.notifications.visible().await
    }
}
