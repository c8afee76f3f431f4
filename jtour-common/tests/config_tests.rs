//! Unit tests for configuration and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate JTOUR_ROOT_FOLDER are marked with #[serial].

use jtour_common::config::{
    default_root_folder, ensure_root_folder, resolve_maps_api_key, resolve_root_folder,
    ConfigSource, TomlConfig, ROOT_FOLDER_ENV,
};
use jtour_common::store::StoreBackend;
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[test]
fn test_defaults() {
    let config = TomlConfig::default();
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 5730);
    assert_eq!(config.store, StoreBackend::Sqlite);
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.file.is_none());
    assert_eq!(config.viewer.load_timeout(), Duration::from_secs(8));
    assert_eq!(config.viewer.idle_timeout(), Duration::from_secs(1800));
    assert_eq!(config.viewer.approaches.len(), 4);
}

#[test]
fn test_parse_partial_toml_keeps_defaults() {
    let config = TomlConfig::parse(
        r#"
        port = 8080
        store = "file"

        [logging]
        level = "debug"
        "#,
    )
    .unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.store, StoreBackend::File);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.viewer.load_timeout_secs, 8);
}

#[test]
fn test_parse_custom_approaches() {
    let config = TomlConfig::parse(
        r#"
        [viewer]
        load_timeout_secs = 3

        [[viewer.approaches]]
        name = "osm"
        template = "https://www.openstreetmap.org/export/embed.html?marker={lat},{lng}"
        "#,
    )
    .unwrap();

    assert_eq!(config.viewer.load_timeout(), Duration::from_secs(3));
    assert_eq!(config.viewer.approaches.len(), 1);
    assert_eq!(config.viewer.approaches[0].name, "osm");
    assert!(!config.viewer.approaches[0].requires_key);
}

#[test]
fn test_parse_rejects_zero_timeout_and_bad_toml() {
    assert!(TomlConfig::parse("[viewer]\nload_timeout_secs = 0\n").is_err());
    assert!(TomlConfig::parse("[viewer]\nidle_timeout_secs = 0\n").is_err());
    assert!(TomlConfig::parse("port = \"not a number\"").is_err());
}

#[test]
fn test_load_missing_file_reports_unreadable() {
    let path = Path::new("/nonexistent/jtour/config.toml");
    let (config, source) = TomlConfig::load(Some(path));
    assert_eq!(config.port, 5730);
    match source {
        ConfigSource::Unreadable { path: reported, error } => {
            assert_eq!(reported, path);
            assert!(!error.is_empty());
        }
        other => panic!("expected Unreadable, got {:?}", other),
    }
}

#[test]
fn test_load_invalid_file_reports_why() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();

    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.port, 5730);
    match source {
        ConfigSource::Invalid { path: reported, error } => {
            assert_eq!(reported, path);
            assert!(error.contains("Invalid TOML"));
        }
        other => panic!("expected Invalid, got {:?}", other),
    }

    // Validation failures fall back the same way
    std::fs::write(&path, "[viewer]\nidle_timeout_secs = 0\n").unwrap();
    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.viewer.idle_timeout_secs, 1800);
    assert!(matches!(source, ConfigSource::Invalid { .. }));
}

#[test]
fn test_load_valid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 6001\nroot_folder = \"/srv/jtour\"\n").unwrap();

    let (config, source) = TomlConfig::load(Some(&path));
    assert_eq!(config.port, 6001);
    assert_eq!(config.root_folder, Some(PathBuf::from("/srv/jtour")));
    assert_eq!(source, ConfigSource::File(path));
}

#[test]
#[serial]
fn test_cli_arg_has_highest_priority() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/jtour-env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/jtour-toml")),
        ..TomlConfig::default()
    };

    let resolved = resolve_root_folder(Some(Path::new("/tmp/jtour-cli")), &config);
    assert_eq!(resolved, PathBuf::from("/tmp/jtour-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_env_var_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/jtour-env");
    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/jtour-toml")),
        ..TomlConfig::default()
    };

    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/tmp/jtour-env"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_toml_then_compiled_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let config = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/jtour-toml")),
        ..TomlConfig::default()
    };
    assert_eq!(resolve_root_folder(None, &config), PathBuf::from("/tmp/jtour-toml"));

    let resolved = resolve_root_folder(None, &TomlConfig::default());
    assert_eq!(resolved, default_root_folder());
    assert!(!resolved.as_os_str().is_empty());
}

#[test]
fn test_ensure_root_folder_creates_directory() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("a").join("b");
    ensure_root_folder(&root).unwrap();
    assert!(root.is_dir());
    // Idempotent
    ensure_root_folder(&root).unwrap();
}

#[test]
fn test_maps_key_resolution() {
    let config = TomlConfig {
        maps_api_key: Some("from-toml".to_string()),
        ..TomlConfig::default()
    };
    assert_eq!(resolve_maps_api_key(Some("cli"), &config).as_deref(), Some("cli"));
    assert_eq!(resolve_maps_api_key(None, &config).as_deref(), Some("from-toml"));
    assert_eq!(resolve_maps_api_key(Some("  "), &TomlConfig::default()), None);
}
