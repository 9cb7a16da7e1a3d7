use kanjigraph_core::{ConfigManager, Direction, Settings};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::from_dir(dir.path().to_path_buf(), Some("test".into())).unwrap();
    let settings = manager.settings();
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.subgraph.min_depth, 2);
    assert_eq!(settings.subgraph.max_depth, 4);
    assert_eq!(manager.env(), "test");
}

#[test]
fn test_environment_file_overrides_default_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
default_kanji = "木"

[server]
host = "127.0.0.1"
port = 9000

[subgraph]
threshold = 30
direction = "both"
"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("staging.toml"),
        r#"
[server]
host = "127.0.0.1"
port = 9100
"#,
    )
    .unwrap();

    let settings = ConfigManager::load_from_sources(dir.path(), "staging").unwrap();
    assert_eq!(settings.server.port, 9100);
    assert_eq!(settings.subgraph.threshold, 30);
    assert_eq!(settings.subgraph.direction, Direction::Both);
    assert_eq!(settings.default_kanji, "木");
}

#[test]
fn test_local_file_overrides_environment_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
    fs::write(dir.path().join("test.toml"), "[server]\nport = 9100\n").unwrap();
    fs::write(
        dir.path().join("local.toml"),
        "default_kanji = \"語\"\n\n[server]\nport = 9200\n",
    )
    .unwrap();

    let manager = ConfigManager::from_dir(dir.path().to_path_buf(), Some("test".into())).unwrap();
    assert_eq!(manager.config_dir(), dir.path());
    assert_eq!(manager.settings().server.port, 9200);
    assert_eq!(manager.settings().default_kanji, "語");
}

#[test]
fn test_invalid_file_is_rejected_on_validate() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("default.toml"),
        r#"
[subgraph]
threshold = 0
"#,
    )
    .unwrap();

    let result = ConfigManager::from_dir(dir.path().to_path_buf(), Some("test".into()));
    assert!(result.is_err());
}

#[test]
fn test_settings_round_trip_through_toml() {
    let settings = Settings::default();
    let text = toml::to_string(&settings).unwrap();
    let back: Settings = toml::from_str(&text).unwrap();
    assert_eq!(back.data.graph, settings.data.graph);
    assert_eq!(back.search.max_combinations, 4096);
}
