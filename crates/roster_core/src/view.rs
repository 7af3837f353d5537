//! Collaborators the core renders into and reads from. Markup, styling and
//! dialog presentation live behind these traits.

use async_trait::async_trait;
use shared::{domain::DemoActivity, protocol::RosterSnapshot};

use crate::notification::StatusMessage;

pub trait BoardView: Send + Sync {
    /// Clear the activity list and the activity selector, then rebuild both
    /// from `snapshot` in its iteration order.
    fn render_roster(&self, snapshot: &RosterSnapshot);

    /// Replace the visible activity list with a fixed failure text.
    fn render_roster_failure(&self, text: &str);

    /// Re-render one demo activity's participant list and count.
    fn render_demo_participants(&self, activity: &DemoActivity);

    /// Draw the status banner; `status.visible == false` hides it.
    fn render_status(&self, status: &StatusMessage);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    Ready,
    Busy,
}

impl SubmitTrigger {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ready => "Sign Up",
            Self::Busy => "Signing up...",
        }
    }

    pub fn is_enabled(self) -> bool {
        self == Self::Ready
    }
}

pub trait SignupForm: Send + Sync {
    fn email(&self) -> String;
    /// `None` or an empty string means nothing is selected.
    fn selected_activity(&self) -> Option<String>;
    fn reset(&self);
    fn set_submit_trigger(&self, trigger: SubmitTrigger);
}

/// Asks whether `email` should really be removed from `activity`.
#[async_trait]
pub trait RemovalConfirmation: Send + Sync {
    async fn confirm_removal(&self, activity: &str, email: &str) -> bool;
}

/// Confirms every removal; for non-interactive front ends.
pub struct AlwaysConfirm;

#[async_trait]
impl RemovalConfirmation for AlwaysConfirm {
    async fn confirm_removal(&self, _activity: &str, _email: &str) -> bool {
        true
    }
}
