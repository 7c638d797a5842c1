//! Configuration layering: file sources and environment overrides.

use cirrus::config::BrokerConfig;
use std::fs;
use tempfile::TempDir;

use crate::integration::env_lock;

#[test]
fn config_file_values_are_loaded() {
    let _guard = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = BrokerConfig::default();
    config.logging.level = "warn".to_string();
    config.logging.format = "json".to_string();
    config.alarms.relog_repeats = true;
    fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

    let loaded = BrokerConfig::load(Some(&path)).unwrap();
    assert_eq!(loaded.logging.level, "warn");
    assert_eq!(loaded.logging.format, "json");
    assert!(loaded.alarms.relog_repeats);
}

#[test]
fn partial_config_file_keeps_defaults_for_the_rest() {
    let _guard = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[alarms]\nrelog_repeats = true\n").unwrap();

    let loaded = BrokerConfig::load(Some(&path)).unwrap();
    assert!(loaded.alarms.relog_repeats);
    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.logging.format, "text");
    assert_eq!(loaded.logging.output, "stdout");
}

#[test]
fn environment_overrides_the_config_file() {
    let _guard = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[logging]\nlevel = \"warn\"\n").unwrap();

    std::env::set_var("CIRRUS_LOGGING__LEVEL", "trace");
    let loaded = BrokerConfig::load(Some(&path));
    std::env::remove_var("CIRRUS_LOGGING__LEVEL");

    assert_eq!(loaded.unwrap().logging.level, "trace");
}

#[test]
fn malformed_config_file_is_reported() {
    let _guard = env_lock().lock().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "logging = \"not a table\"\n").unwrap();

    let err = BrokerConfig::load(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("Configuration error"));
}
