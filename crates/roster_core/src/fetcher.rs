use std::sync::Arc;

use shared::protocol::RosterSnapshot;
use tokio::sync::RwLock;
use tracing::{error, info};

use crate::{api::RosterApi, view::BoardView};

pub const ROSTER_LOAD_FAILURE_TEXT: &str = "Failed to load activities. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Rendered { activities: usize },
    Failed,
}

/// Owns the authoritative [`RosterSnapshot`] and is its only writer.
///
/// Overlapping refreshes are not sequenced: whichever response resolves last
/// decides both the stored snapshot and what is on screen.
pub struct RemoteRosterFetcher {
    api: Arc<dyn RosterApi>,
    view: Arc<dyn BoardView>,
    snapshot: RwLock<Option<Arc<RosterSnapshot>>>,
}

impl RemoteRosterFetcher {
    pub fn new(api: Arc<dyn RosterApi>, view: Arc<dyn BoardView>) -> Self {
        Self {
            api,
            view,
            snapshot: RwLock::new(None),
        }
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        let fetched = self.api.fetch_activities().await;

        // Store and render under one guard so the screen always matches the
        // snapshot of the last response to resolve.
        let mut current = self.snapshot.write().await;
        match fetched {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                *current = Some(Arc::clone(&snapshot));
                self.view.render_roster(&snapshot);
                info!(activities = snapshot.len(), "roster: snapshot replaced");
                RefreshOutcome::Rendered {
                    activities: snapshot.len(),
                }
            }
            Err(err) => {
                error!(error = %err, "roster: failed to fetch activities");
                self.view.render_roster_failure(ROSTER_LOAD_FAILURE_TEXT);
                RefreshOutcome::Failed
            }
        }
    }

    /// Read-only copy of the last successfully fetched snapshot.
    pub async fn snapshot(&self) -> Option<Arc<RosterSnapshot>> {
        self.snapshot.read().await.clone()
    }
}
