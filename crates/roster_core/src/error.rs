use thiserror::Error;

/// Failure of a call against the activities endpoint.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The server answered, but with a non-success status.
    #[error(
        "server rejected request with status {status}: {}",
        .detail.as_deref().unwrap_or("no detail")
    )]
    Rejected { status: u16, detail: Option<String> },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("undecodable response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid server url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("server url cannot carry path segments: {0}")]
    CannotBeABase(String),
}

impl RemoteError {
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}
