use crate::shared::config::{Settings, load_settings_from};
use std::io::Write;

#[test]
fn missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent");
    let settings = load_settings_from(path.to_str().expect("utf8 path")).expect("settings load");

    let defaults = Settings::default();
    assert_eq!(settings.overpass.endpoint, defaults.overpass.endpoint);
    assert_eq!(settings.overpass.connect_timeout_ms, 5_000);
    assert_eq!(settings.overpass.request_timeout_ms, 180_000);
    assert_eq!(settings.logging.stdout_level, "info");
}

#[test]
fn file_values_override_defaults_per_field() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("worker.toml");
    let mut file = std::fs::File::create(&path).expect("create config");
    writeln!(
        file,
        "[overpass]\nendpoint = \"http://127.0.0.1:9999/api/interpreter\"\nrequest_timeout_ms = 2500\n\n[logging]\nfile_level = \"trace\""
    )
    .expect("write config");

    let settings = load_settings_from(path.to_str().expect("utf8 path")).expect("settings load");

    assert_eq!(
        settings.overpass.endpoint,
        "http://127.0.0.1:9999/api/interpreter"
    );
    assert_eq!(settings.overpass.request_timeout_ms, 2500);
    assert_eq!(settings.overpass.connect_timeout_ms, 5_000);
    assert!(settings.overpass.user_agent.starts_with("overpass-worker/"));
    assert_eq!(settings.logging.file_level, "trace");
    assert_eq!(settings.logging.stdout_level, "info");
}
