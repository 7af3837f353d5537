use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    error::ErrorReply,
    protocol::{MutationReply, RosterSnapshot},
};
use tracing::debug;
use url::Url;

use crate::error::RemoteError;

/// The remote activities endpoint.
#[async_trait]
pub trait RosterApi: Send + Sync {
    async fn fetch_activities(&self) -> Result<RosterSnapshot, RemoteError>;
    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError>;
    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Signup,
    Unregister,
}

impl Mutation {
    fn path_segment(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Unregister => "unregister",
        }
    }
}

pub struct HttpRosterApi {
    http: Client,
    base_url: Url,
}

impl HttpRosterApi {
    pub fn new(server_url: &str) -> Result<Self, RemoteError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, RemoteError> {
        let base_url = Url::parse(server_url)?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::CannotBeABase(server_url.to_string()));
        }
        Ok(Self { http, base_url })
    }

    /// Appends `segments` to the base path. Each segment is percent-encoded,
    /// so activity names containing `/`, `?` or spaces stay a single segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::CannotBeABase(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn mutate(
        &self,
        mutation: Mutation,
        activity: &str,
        email: &str,
    ) -> Result<MutationReply, RemoteError> {
        let mut url = self.endpoint(&["activities", activity, mutation.path_segment()])?;
        url.query_pairs_mut().append_pair("email", email);
        debug!(%url, "roster: posting {}", mutation.path_segment());

        let response = self.http.post(url).send().await?;
        decode_reply(response).await
    }
}

async fn decode_reply<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let status = response.status();
    let body = response.bytes().await?;
    if !status.is_success() {
        // A refusal must still be a readable `{detail}` body; anything else
        // is treated like a broken transport.
        let reply = serde_json::from_slice::<ErrorReply>(&body)?;
        return Err(RemoteError::Rejected {
            status: status.as_u16(),
            detail: reply.detail,
        });
    }
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl RosterApi for HttpRosterApi {
    async fn fetch_activities(&self) -> Result<RosterSnapshot, RemoteError> {
        let url = self.endpoint(&["activities"])?;
        let response = self.http.get(url).send().await?;
        decode_reply(response).await
    }

    async fn signup(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError> {
        self.mutate(Mutation::Signup, activity, email).await
    }

    async fn unregister(&self, activity: &str, email: &str) -> Result<MutationReply, RemoteError> {
        self.mutate(Mutation::Unregister, activity, email).await
    }
}
