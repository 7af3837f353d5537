use std::{fs, path::Path};

use serde::Deserialize;

pub const SETTINGS_FILE: &str = "board.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSettings {
    pub server_url: String,
    pub log_filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    server_url: Option<String>,
    log_filter: Option<String>,
}

impl BoardSettings {
    /// Applies a command-line server url, normalized like every other source.
    pub fn override_server_url(&mut self, raw: &str) {
        self.server_url = normalize_server_url(raw);
    }
}

pub fn load_settings() -> (BoardSettings, Option<toml::de::Error>) {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then the environment.
///
/// Settings load before logging is installed, so a settings file that fails
/// to parse is skipped and its error handed back for the caller to report.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> (BoardSettings, Option<toml::de::Error>) {
    let mut settings = BoardSettings::default();
    let mut file_error = None;

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.server_url {
                    settings.server_url = v;
                }
                if let Some(v) = file_cfg.log_filter {
                    settings.log_filter = v;
                }
            }
            Err(err) => file_error = Some(err),
        }
    }

    if let Some(v) = env("ROSTER_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("APP__SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = env("RUST_LOG") {
        settings.log_filter = v;
    }

    settings.server_url = normalize_server_url(&settings.server_url);
    (settings, file_error)
}

fn normalize_server_url(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return BoardSettings::default().server_url;
    }
    if raw.contains("://") {
        return raw.to_string();
    }
    format!("http://{raw}")
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
