//! Client-side roster synchronizer for the activity signup board.
//!
//! Two stores are kept apart on purpose: [`DemoRoster`], mutated
//! optimistically by [`OptimisticJoinLeaveController`], and the authoritative
//! [`RosterSnapshot`](shared::protocol::RosterSnapshot) owned by
//! [`RemoteRosterFetcher`], which is only ever replaced wholesale after a
//! fetch. [`SignupCoordinator`] and [`UnregisterCoordinator`] sequence a
//! remote mutation, a refresh and a status message.

pub mod api;
pub mod board;
pub mod coordinator;
pub mod demo;
pub mod error;
pub mod fetcher;
pub mod notification;
pub mod view;

pub use api::{HttpRosterApi, RosterApi};
pub use board::RosterBoard;
pub use coordinator::{
    MutationEvent, MutationOutcome, MutationPhase, SignupCoordinator, UnregisterCoordinator,
};
pub use demo::{DemoRoster, MembershipChange, OptimisticJoinLeaveController};
pub use error::RemoteError;
pub use fetcher::{RefreshOutcome, RemoteRosterFetcher};
pub use notification::{NotificationChannel, Severity, StatusMessage, STATUS_DISMISS_AFTER};
pub use view::{AlwaysConfirm, BoardView, RemovalConfirmation, SignupForm, SubmitTrigger};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
