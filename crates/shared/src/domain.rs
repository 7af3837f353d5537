use chrono::Utc;
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(DemoActivityId);
id_newtype!(ParticipantId);

/// How a local participant is pictured: an avatar image or an initials chip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantBadge {
    Avatar(String),
    #[serde(rename = "initial")]
    Initials(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalParticipant {
    pub id: ParticipantId,
    pub name: String,
    #[serde(flatten)]
    pub badge: ParticipantBadge,
}

impl LocalParticipant {
    pub fn with_avatar(id: i64, name: impl Into<String>, avatar_url: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
            badge: ParticipantBadge::Avatar(avatar_url.into()),
        }
    }

    pub fn with_initials(id: i64, name: impl Into<String>, initials: impl Into<String>) -> Self {
        Self {
            id: ParticipantId(id),
            name: name.into(),
            badge: ParticipantBadge::Initials(initials.into()),
        }
    }

    /// Simulated signed-in user for the local demo board. The id is the
    /// creation time in milliseconds.
    pub fn current_user() -> Self {
        Self::with_initials(Utc::now().timestamp_millis(), "New User", "NU")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoActivity {
    pub id: DemoActivityId,
    pub title: String,
    pub participants: Vec<LocalParticipant>,
}

impl DemoActivity {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: DemoActivityId(id),
            title: title.into(),
            participants: Vec::new(),
        }
    }

    pub fn contains(&self, participant_id: ParticipantId) -> bool {
        self.participants.iter().any(|p| p.id == participant_id)
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }
}
