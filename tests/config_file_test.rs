//! Tests for loading the game config from disk.

use console_tictactoe::GameConfig;
use std::io::Write;
use tictactoe_core::Player;

#[test]
fn test_load_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "first_player = \"O\"").unwrap();
    writeln!(file, "show_hints = true").unwrap();

    let config = GameConfig::from_file(file.path()).expect("config loads");
    assert_eq!(*config.first_player(), Player::O);
    assert!(*config.show_hints());
    assert_eq!(config.log_filter(), "warn");
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = GameConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
    assert!(err.message.starts_with("Failed to read config file"));
    assert!(err.to_string().starts_with("Config error:"));
}
