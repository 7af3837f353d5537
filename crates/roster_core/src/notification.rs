use std::{sync::Arc, time::Duration};

use tokio::{
    sync::Mutex,
    task::JoinHandle,
    time::{sleep_until, Instant},
};
use tracing::debug;

use crate::view::BoardView;

pub const STATUS_DISMISS_AFTER: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub severity: Severity,
    pub visible: bool,
    pub dismiss_at: Instant,
}

#[derive(Default)]
struct Banner {
    message: Option<StatusMessage>,
    generation: u64,
    dismiss_task: Option<JoinHandle<()>>,
}

/// The single transient status banner.
///
/// `show` replaces whatever is on screen and restarts the dismiss timer; the
/// previous timer task is aborted, and a timer that already woke up only
/// hides the banner if no newer message was shown in the meantime.
pub struct NotificationChannel {
    view: Arc<dyn BoardView>,
    dismiss_after: Duration,
    banner: Arc<Mutex<Banner>>,
}

impl NotificationChannel {
    pub fn new(view: Arc<dyn BoardView>) -> Self {
        Self::with_dismiss_after(view, STATUS_DISMISS_AFTER)
    }

    pub fn with_dismiss_after(view: Arc<dyn BoardView>, dismiss_after: Duration) -> Self {
        Self {
            view,
            dismiss_after,
            banner: Arc::new(Mutex::new(Banner::default())),
        }
    }

    pub async fn show(&self, text: impl Into<String>, severity: Severity) -> StatusMessage {
        let message = StatusMessage {
            text: text.into(),
            severity,
            visible: true,
            dismiss_at: Instant::now() + self.dismiss_after,
        };

        let mut banner = self.banner.lock().await;
        if let Some(previous) = banner.dismiss_task.take() {
            previous.abort();
        }
        banner.generation += 1;
        banner.message = Some(message.clone());
        self.view.render_status(&message);

        banner.dismiss_task = Some(tokio::spawn(dismiss_later(
            Arc::clone(&self.banner),
            Arc::clone(&self.view),
            banner.generation,
            message.dismiss_at,
        )));
        debug!(
            severity = ?message.severity,
            generation = banner.generation,
            "status: banner shown"
        );

        message
    }

    /// Last message shown, including one that has already been dismissed.
    pub async fn current(&self) -> Option<StatusMessage> {
        self.banner.lock().await.message.clone()
    }

    /// The message on screen right now, if any.
    pub async fn visible(&self) -> Option<StatusMessage> {
        self.current().await.filter(|message| message.visible)
    }
}

impl Drop for NotificationChannel {
    fn drop(&mut self) {
        if let Ok(mut banner) = self.banner.try_lock() {
            if let Some(task) = banner.dismiss_task.take() {
                task.abort();
            }
        }
    }
}

async fn dismiss_later(
    banner: Arc<Mutex<Banner>>,
    view: Arc<dyn BoardView>,
    generation: u64,
    deadline: Instant,
) {
    sleep_until(deadline).await;

    let mut banner = banner.lock().await;
    if banner.generation != generation {
        return;
    }
    banner.dismiss_task = None;
    if let Some(message) = banner.message.as_mut() {
        message.visible = false;
        view.render_status(message);
        debug!(generation, "status: banner dismissed");
    }
}

#[cfg(test)]
#[path = "tests/notification_tests.rs"]
mod tests;
