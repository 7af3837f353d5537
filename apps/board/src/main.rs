use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use roster_core::{
    AlwaysConfirm, BoardView, DemoRoster, HttpRosterApi, RemovalConfirmation, RosterBoard,
};
use shared::domain::DemoActivityId;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use terminal::{StdinConfirmation, TerminalForm, TerminalView};

#[derive(Parser, Debug)]
#[command(about = "Activity signup board in the terminal")]
struct Cli {
    /// Overrides the server url from board.toml and the environment.
    #[arg(long)]
    server_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch and print every activity.
    List,
    Signup {
        #[arg(long)]
        activity: Option<String>,
        #[arg(long)]
        email: String,
    },
    Unregister {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    /// Join or leave a local demo activity as the simulated current user.
    Demo {
        #[arg(long, default_value_t = 1)]
        activity_id: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut settings, file_error) = config::load_settings();
    if let Some(server_url) = &cli.server_url {
        settings.override_server_url(server_url);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();
    if let Some(err) = file_error {
        warn!(path = config::SETTINGS_FILE, error = %err, "ignoring unreadable settings file");
    }

    let api = HttpRosterApi::new(&settings.server_url)
        .with_context(|| format!("invalid server url: {}", settings.server_url))?;
    let terminal = Arc::new(TerminalView);
    let view: Arc<dyn BoardView> = terminal.clone();
    let confirmation: Arc<dyn RemovalConfirmation> = match &cli.command {
        Command::Unregister { yes: true, .. } => Arc::new(AlwaysConfirm),
        _ => Arc::new(StdinConfirmation),
    };
    let board = RosterBoard::new(Arc::new(api), view, confirmation, DemoRoster::seeded());

    match cli.command {
        Command::List => {
            board.load().await;
        }
        Command::Signup { activity, email } => {
            board.load().await;
            let form = TerminalForm::new(email, activity);
            board.submit_signup(&form).await;
        }
        Command::Unregister {
            activity, email, ..
        } => {
            board.load().await;
            if board.remove_participant(&activity, &email).await.is_none() {
                println!("Nothing changed.");
            }
        }
        Command::Demo { activity_id } => {
            let seeded = board.demo_roster().await;
            for activity in seeded.activities() {
                terminal.render_demo_participants(activity);
            }
            let change = board
                .toggle_demo_membership(DemoActivityId(activity_id))
                .await;
            if !change.changed() {
                println!("No demo activity #{activity_id}; nothing changed.");
            }
        }
    }

    Ok(())
}
