//! Local, optimistic-only roster used for instant join/leave feedback.
//!
//! Nothing here talks to the server, and nothing here ever touches the
//! fetched [`RosterSnapshot`](shared::protocol::RosterSnapshot).

use std::{collections::BTreeMap, sync::Arc};

use shared::domain::{DemoActivity, DemoActivityId, LocalParticipant, ParticipantId};
use tracing::debug;

use crate::view::BoardView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipChange {
    Joined,
    Left,
    Unchanged,
    UnknownActivity,
}

impl MembershipChange {
    pub fn changed(self) -> bool {
        matches!(self, Self::Joined | Self::Left)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DemoRoster {
    activities: BTreeMap<DemoActivityId, DemoActivity>,
}

impl DemoRoster {
    pub fn new(activities: impl IntoIterator<Item = DemoActivity>) -> Self {
        Self {
            activities: activities
                .into_iter()
                .map(|activity| (activity.id, activity))
                .collect(),
        }
    }

    /// The fixed set the board starts with.
    pub fn seeded() -> Self {
        let mut yoga = DemoActivity::new(1, "Outdoor Yoga Class");
        yoga.participants = vec![
            LocalParticipant::with_avatar(1, "Ana", "https://i.pravatar.cc/40?img=3"),
            LocalParticipant::with_avatar(2, "Luis", "https://i.pravatar.cc/40?img=12"),
            LocalParticipant::with_initials(3, "María J.", "MJ"),
            LocalParticipant::with_avatar(4, "Omar", "https://i.pravatar.cc/40?img=5"),
            LocalParticipant::with_initials(5, "Carlos R.", "CR"),
        ];
        Self::new([yoga])
    }

    pub fn activity(&self, id: DemoActivityId) -> Option<&DemoActivity> {
        self.activities.get(&id)
    }

    pub fn activities(&self) -> impl Iterator<Item = &DemoActivity> {
        self.activities.values()
    }

    /// Appends `participant` unless an entry with the same id is present.
    pub fn join(&mut self, id: DemoActivityId, participant: LocalParticipant) -> MembershipChange {
        let Some(activity) = self.activities.get_mut(&id) else {
            return MembershipChange::UnknownActivity;
        };
        if activity.contains(participant.id) {
            return MembershipChange::Unchanged;
        }
        activity.participants.push(participant);
        MembershipChange::Joined
    }

    pub fn leave(&mut self, id: DemoActivityId, participant_id: ParticipantId) -> MembershipChange {
        let Some(activity) = self.activities.get_mut(&id) else {
            return MembershipChange::UnknownActivity;
        };
        let before = activity.participants.len();
        activity.participants.retain(|p| p.id != participant_id);
        if activity.participants.len() == before {
            MembershipChange::Unchanged
        } else {
            MembershipChange::Left
        }
    }

    pub fn toggle(
        &mut self,
        id: DemoActivityId,
        participant: LocalParticipant,
    ) -> MembershipChange {
        let Some(is_member) = self
            .activities
            .get(&id)
            .map(|activity| activity.contains(participant.id))
        else {
            return MembershipChange::UnknownActivity;
        };
        if is_member {
            self.leave(id, participant.id)
        } else {
            self.join(id, participant)
        }
    }
}

/// Sole writer of the [`DemoRoster`]. Every effective change re-renders only
/// the touched activity.
pub struct OptimisticJoinLeaveController {
    roster: DemoRoster,
    current_user: LocalParticipant,
    view: Arc<dyn BoardView>,
}

impl OptimisticJoinLeaveController {
    pub fn new(roster: DemoRoster, view: Arc<dyn BoardView>) -> Self {
        Self::with_current_user(roster, LocalParticipant::current_user(), view)
    }

    pub fn with_current_user(
        roster: DemoRoster,
        current_user: LocalParticipant,
        view: Arc<dyn BoardView>,
    ) -> Self {
        Self {
            roster,
            current_user,
            view,
        }
    }

    pub fn roster(&self) -> &DemoRoster {
        &self.roster
    }

    pub fn current_user(&self) -> &LocalParticipant {
        &self.current_user
    }

    pub fn join(&mut self, id: DemoActivityId, participant: LocalParticipant) -> MembershipChange {
        let change = self.roster.join(id, participant);
        self.rerender(id, change)
    }

    pub fn leave(&mut self, id: DemoActivityId, participant_id: ParticipantId) -> MembershipChange {
        let change = self.roster.leave(id, participant_id);
        self.rerender(id, change)
    }

    pub fn toggle(
        &mut self,
        id: DemoActivityId,
        participant: LocalParticipant,
    ) -> MembershipChange {
        let change = self.roster.toggle(id, participant);
        self.rerender(id, change)
    }

    /// The join/leave button: flips the simulated current user's membership.
    pub fn toggle_current_user(&mut self, id: DemoActivityId) -> MembershipChange {
        let participant = self.current_user.clone();
        self.toggle(id, participant)
    }

    fn rerender(&self, id: DemoActivityId, change: MembershipChange) -> MembershipChange {
        debug!(activity_id = id.0, ?change, "demo: membership toggled");
        if change.changed() {
            if let Some(activity) = self.roster.activity(id) {
                self.view.render_demo_participants(activity);
            }
        }
        change
    }
}

#[cfg(test)]
#[path = "tests/demo_tests.rs"]
mod tests;
