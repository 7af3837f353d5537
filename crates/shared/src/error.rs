use serde::{Deserialize, Serialize};

pub const GENERIC_FAILURE_TEXT: &str = "An error occurred";

/// Body returned by the activities endpoint when a mutation is refused.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorReply {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
        }
    }

    /// The server's detail text, or the generic fallback when it sent none.
    pub fn detail_or_generic(&self) -> &str {
        match self.detail.as_deref() {
            Some(detail) if !detail.is_empty() => detail,
            _ => GENERIC_FAILURE_TEXT,
        }
    }
}
