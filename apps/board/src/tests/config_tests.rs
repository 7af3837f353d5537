use super::{load_settings_from, normalize_server_url, BoardSettings};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_apply_without_file_or_env() {
    let (settings, file_error) = load_settings_from(Path::new("/nonexistent/board.toml"), no_env);
    assert_eq!(settings, BoardSettings::default());
    assert!(file_error.is_none());
}

#[test]
fn adds_scheme_to_bare_host() {
    assert_eq!(normalize_server_url("localhost:8000"), "http://localhost:8000");
    assert_eq!(normalize_server_url("  "), "http://127.0.0.1:8000");
    assert_eq!(
        normalize_server_url("https://school.example/api"),
        "https://school.example/api"
    );
}

#[test]
fn command_line_url_is_normalized() {
    let mut settings = BoardSettings::default();
    settings.override_server_url(" localhost:9000 ");
    assert_eq!(settings.server_url, "http://localhost:9000");

    settings.override_server_url("");
    assert_eq!(settings.server_url, BoardSettings::default().server_url);
}

#[test]
fn env_overrides_file() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("roster_board_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("board.toml");
    fs::write(
        &path,
        "server_url = \"http://file.example:9000\"\nlog_filter = \"debug\"\n",
    )
    .expect("write settings");

    let (from_file, file_error) = load_settings_from(&path, no_env);
    assert!(file_error.is_none());
    assert_eq!(from_file.server_url, "http://file.example:9000");
    assert_eq!(from_file.log_filter, "debug");

    let vars = HashMap::from([
        ("ROSTER_SERVER_URL", "http://roster.example"),
        ("APP__SERVER_URL", "http://app.example"),
        ("RUST_LOG", "roster_core=trace"),
    ]);
    let (from_env, _) = load_settings_from(&path, |key| vars.get(key).map(|v| v.to_string()));
    assert_eq!(from_env.server_url, "http://app.example");
    assert_eq!(from_env.log_filter, "roster_core=trace");

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_file_is_skipped_and_reported() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("roster_board_bad_config_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("board.toml");
    fs::write(&path, "server_url = [").expect("write settings");

    let (settings, file_error) = load_settings_from(&path, no_env);
    assert_eq!(settings, BoardSettings::default());
    let err = file_error.expect("parse error is handed back");
    assert!(!err.to_string().is_empty());

    fs::remove_dir_all(temp_root).expect("cleanup");
}
