//! Recording collaborators and a scripted endpoint shared by the unit tests.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use shared::{
    domain::{DemoActivity, DemoActivityId},
    protocol::{ActivityRecord, MutationReply, RosterSnapshot},
};
use tokio::sync::oneshot;

use crate::{
    api::RosterApi,
    error::RemoteError,
    notification::StatusMessage,
    view::{BoardView, RemovalConfirmation, SignupForm, SubmitTrigger},
};

pub(crate) fn snapshot(entries: &[(&str, u32, &[&str])]) -> RosterSnapshot {
    entries
        .iter()
        .map(|(name, capacity, participants)| {
            (
                name.to_string(),
                ActivityRecord {
                    description: format!("{name} description"),
                    schedule: "Fridays, 3:30 PM - 5:00 PM".to_string(),
                    max_participants: *capacity,
                    participants: participants.iter().map(|p| p.to_string()).collect(),
                },
            )
        })
        .collect()
}

/// A failure that never got a usable answer from the server.
pub(crate) fn transport_failure() -> RemoteError {
    RemoteError::Decode(serde_json::from_str::<MutationReply>("<html>").unwrap_err())
}

pub(crate) fn rejected(status: u16, detail: Option<&str>) -> RemoteError {
    RemoteError::Rejected {
        status,
        detail: detail.map(str::to_string),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Rendered {
    Roster {
        activities: Vec<String>,
        selector: Vec<String>,
    },
    RosterFailure(String),
    DemoParticipants {
        activity_id: DemoActivityId,
        count: usize,
    },
    Status(StatusMessage),
}

#[derive(Default)]
pub(crate) struct RecordingView {
    log: Mutex<Vec<Rendered>>,
}

impl RecordingView {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn log(&self) -> Vec<Rendered> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn last_roster(&self) -> Option<(Vec<String>, Vec<String>)> {
        self.log().into_iter().rev().find_map(|entry| match entry {
            Rendered::Roster {
                activities,
                selector,
            } => Some((activities, selector)),
            _ => None,
        })
    }

    pub(crate) fn statuses(&self) -> Vec<StatusMessage> {
        self.log()
            .into_iter()
            .filter_map(|entry| match entry {
                Rendered::Status(status) => Some(status),
                _ => None,
            })
            .collect()
    }
}

impl BoardView for RecordingView {
    fn render_roster(&self, snapshot: &RosterSnapshot) {
        // The list and the selector are rebuilt in the same pass.
        let activities = snapshot
            .iter()
            .map(|(name, record)| format!("{name} ({} spots left)", record.spots_left()))
            .collect();
        let selector = snapshot.names().map(str::to_string).collect();
        self.log.lock().unwrap().push(Rendered::Roster {
            activities,
            selector,
        });
    }

    fn render_roster_failure(&self, text: &str) {
        self.log
            .lock()
            .unwrap()
            .push(Rendered::RosterFailure(text.to_string()));
    }

    fn render_demo_participants(&self, activity: &DemoActivity) {
        self.log.lock().unwrap().push(Rendered::DemoParticipants {
            activity_id: activity.id,
            count: activity.participant_count(),
        });
    }

    fn render_status(&self, status: &StatusMessage) {
        self.log
            .lock()
            .unwrap()
            .push(Rendered::Status(status.clone()));
    }
}

#[derive(Debug, Clone)]
pub(crate) struct FormState {
    pub(crate) email: String,
    pub(crate) activity: Option<String>,
    pub(crate) triggers: Vec<SubmitTrigger>,
    pub(crate) resets: usize,
}

pub(crate) struct RecordingForm {
    state: Mutex<FormState>,
}

impl RecordingForm {
    pub(crate) fn filled(email: &str, activity: Option<&str>) -> Self {
        Self {
            state: Mutex::new(FormState {
                email: email.to_string(),
                activity: activity.map(str::to_string),
                triggers: Vec::new(),
                resets: 0,
            }),
        }
    }

    pub(crate) fn state(&self) -> FormState {
        self.state.lock().unwrap().clone()
    }
}

impl SignupForm for RecordingForm {
    fn email(&self) -> String {
        self.state.lock().unwrap().email.clone()
    }

    fn selected_activity(&self) -> Option<String> {
        self.state.lock().unwrap().activity.clone()
    }

    fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        state.email.clear();
        state.activity = None;
        state.resets += 1;
    }

    fn set_submit_trigger(&self, trigger: SubmitTrigger) {
        self.state.lock().unwrap().triggers.push(trigger);
    }
}

pub(crate) enum Scripted<T> {
    Ready(Result<T, RemoteError>),
    Gated(oneshot::Receiver<Result<T, RemoteError>>),
}

impl<T> Scripted<T> {
    async fn resolve(self) -> Result<T, RemoteError> {
        match self {
            Self::Ready(result) => result,
            Self::Gated(rx) => rx
                .await
                .unwrap_or_else(|_| Err(rejected(599, Some("gate dropped")))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ApiCall {
    Fetch,
    Signup { activity: String, email: String },
    Unregister { activity: String, email: String },
}

/// Endpoint double that answers from per-operation queues in call order.
#[derive(Default)]
pub(crate) struct ScriptedApi {
    fetches: Mutex<VecDeque<Scripted<RosterSnapshot>>>,
    signups: Mutex<VecDeque<Scripted<MutationReply>>>,
    unregisters: Mutex<VecDeque<Scripted<MutationReply>>>,
    calls: Mutex<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub(crate) fn push_fetch(&self, result: Result<RosterSnapshot, RemoteError>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn gate_fetch(&self) -> oneshot::Sender<Result<RosterSnapshot, RemoteError>> {
        let (tx, rx) = oneshot::channel();
        self.fetches.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn push_signup(&self, result: Result<MutationReply, RemoteError>) {
        self.signups
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn gate_signup(&self) -> oneshot::Sender<Result<MutationReply, RemoteError>> {
        let (tx, rx) = oneshot::channel();
        self.signups.lock().unwrap().push_back(Scripted::Gated(rx));
        tx
    }

    pub(crate) fn push_unregister(&self, result: Result<MutationReply, RemoteError>) {
        self.unregisters
            .lock()
            .unwrap()
            .push_back(Scripted::Ready(result));
    }

    pub(crate) fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn next<T>(queue: &Mutex<VecDeque<Scripted<T>>>) -> Scripted<T> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Scripted::Ready(Err(rejected(599, Some("unscripted call")))))
    }
}

#[async_trait]
impl RosterApi for ScriptedApi {
    async fn fetch_activities(&self) -> Result<RosterSnapshot, RemoteError> {
        self.calls.lock().unwrap().push(ApiCall::Fetch);
        let scripted = Self::next(&self.fetches);
        scripted.resolve().await
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError> {
        self.calls.lock().unwrap().push(ApiCall::Signup {
            activity: activity.to_string(),
            email: email.to_string(),
        });
        let scripted = Self::next(&self.signups);
        scripted.resolve().await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError> {
        self.calls.lock().unwrap().push(ApiCall::Unregister {
            activity: activity.to_string(),
            email: email.to_string(),
        });
        let scripted = Self::next(&self.unregisters);
        scripted.resolve().await
    }
}

pub(crate) struct ScriptedConfirmation {
    answer: bool,
    asked: Mutex<Vec<(String, String)>>,
}

impl ScriptedConfirmation {
    pub(crate) fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn asked(&self) -> Vec<(String, String)> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemovalConfirmation for ScriptedConfirmation {
    async fn confirm_removal(&self, activity: &str, email: &str) -> bool {
        self.asked
            .lock()
            .unwrap()
            .push((activity.to_string(), email.to_string()));
        self.answer
    }
}
