//! Terminal renditions of the board's view, form and confirmation dialog.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use roster_core::{
    BoardView, RemovalConfirmation, Severity, SignupForm, StatusMessage, SubmitTrigger,
};
use shared::{
    domain::{DemoActivity, ParticipantBadge},
    protocol::RosterSnapshot,
};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Default)]
pub struct TerminalView;

impl BoardView for TerminalView {
    fn render_roster(&self, snapshot: &RosterSnapshot) {
        if snapshot.is_empty() {
            println!("(no activities)");
        }
        for (name, record) in snapshot.iter() {
            println!("== {name}");
            println!("   {}", record.description);
            println!("   Schedule: {}", record.schedule);
            println!("   Availability: {} spots left", record.spots_left());
            println!("   Participants ({}):", record.participant_count());
            for email in &record.participants {
                println!("     - {email}");
            }
        }
        let options: Vec<_> = snapshot.names().collect();
        println!("Activities: -- Select an activity --, {}", options.join(", "));
    }

    fn render_roster_failure(&self, text: &str) {
        println!("{text}");
    }

    fn render_demo_participants(&self, activity: &DemoActivity) {
        println!(
            "== {} [demo #{}] ({} participants)",
            activity.title,
            activity.id.0,
            activity.participant_count()
        );
        for participant in &activity.participants {
            let badge = match &participant.badge {
                ParticipantBadge::Avatar(url) => format!("<{url}>"),
                ParticipantBadge::Initials(initials) => format!("[{initials}]"),
            };
            println!("     {badge} {}", participant.name);
        }
    }

    fn render_status(&self, status: &StatusMessage) {
        if !status.visible {
            return;
        }
        let tag = match status.severity {
            Severity::Success => "ok",
            Severity::Error => "error",
        };
        println!("[{tag}] {}", status.text);
    }
}

/// The signup form, filled from command-line arguments.
pub struct TerminalForm {
    email: Mutex<String>,
    activity: Mutex<Option<String>>,
}

impl TerminalForm {
    pub fn new(email: String, activity: Option<String>) -> Self {
        Self {
            email: Mutex::new(email),
            activity: Mutex::new(activity),
        }
    }
}

impl SignupForm for TerminalForm {
    fn email(&self) -> String {
        lock(&self.email).clone()
    }

    fn selected_activity(&self) -> Option<String> {
        lock(&self.activity).clone()
    }

    fn reset(&self) {
        lock(&self.email).clear();
        *lock(&self.activity) = None;
    }

    fn set_submit_trigger(&self, trigger: SubmitTrigger) {
        if !trigger.is_enabled() {
            println!("{}", trigger.label());
        }
    }
}

/// Asks on stdin; anything but `y`/`yes` declines.
pub struct StdinConfirmation;

#[async_trait]
impl RemovalConfirmation for StdinConfirmation {
    async fn confirm_removal(&self, activity: &str, email: &str) -> bool {
        let mut stdout = io::stdout();
        let prompt = format!("Are you sure you want to remove {email} from {activity}? [y/N] ");
        if stdout.write_all(prompt.as_bytes()).await.is_err() || stdout.flush().await.is_err() {
            return false;
        }

        let mut answer = String::new();
        if BufReader::new(io::stdin()).read_line(&mut answer).await.is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}
