use std::fmt;

use serde::{
    de::{MapAccess, Visitor},
    ser::SerializeMap,
    Deserialize, Deserializer, Serialize, Serializer,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    #[serde(default)]
    pub participants: Vec<String>,
}

impl ActivityRecord {
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Remaining capacity as displayed. Overbooking is the server's concern,
    /// so this can go negative.
    pub fn spots_left(&self) -> i64 {
        i64::from(self.max_participants) - self.participants.len() as i64
    }
}

/// Full `GET /activities` payload, kept in the order the server sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterSnapshot {
    activities: Vec<(String, ActivityRecord)>,
}

impl RosterSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&ActivityRecord> {
        self.activities
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, record)| record)
    }

    /// Activity names in server order; these are the selector options.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.activities.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActivityRecord)> {
        self.activities
            .iter()
            .map(|(name, record)| (name.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

impl FromIterator<(String, ActivityRecord)> for RosterSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, ActivityRecord)>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for (name, record) in iter {
            // A repeated key replaces the earlier record in place.
            match snapshot.activities.iter_mut().find(|(key, _)| *key == name) {
                Some((_, slot)) => *slot = record,
                None => snapshot.activities.push((name, record)),
            }
        }
        snapshot
    }
}

impl Serialize for RosterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.activities.len()))?;
        for (name, record) in &self.activities {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = RosterSnapshot;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of activity name to activity record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((name, record)) = access.next_entry::<String, ActivityRecord>()? {
            entries.push((name, record));
        }
        Ok(entries.into_iter().collect())
    }
}

impl<'de> Deserialize<'de> for RosterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// Body returned by a successful signup or unregister.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationReply {
    pub message: String,
}
