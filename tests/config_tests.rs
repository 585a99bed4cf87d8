// Integration tests for configuration loading and validation

mod common;

use common::create_test_config;
use std::fs;
use tempfile::TempDir;
use trade_reflex::{Config, ConfigError, ReflexError, TrainingMode};

#[test]
fn test_default_config_values() {
    let config = Config::default();

    assert_eq!(config.modes.settings(TrainingMode::Speed).time_limit_secs, 5);
    assert_eq!(config.modes.settings(TrainingMode::Risk).time_limit_secs, 10);
    assert_eq!(config.modes.settings(TrainingMode::Pattern).scenarios, 15);
    assert_eq!(config.session.feedback_delay_ms, 1500);
    assert_eq!(config.scoring.xp_correct, 10);
    assert_eq!(config.scoring.xp_penalty, 5);
    assert_eq!(config.feed.base_url, "http://localhost:5000");
    assert_eq!(config.feed.cache_ttl_secs, 300);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization_deserialization() {
    let config = create_test_config();

    let toml_string = toml::to_string(&config).expect("Failed to serialize config");
    assert!(toml_string.contains("time_limit_secs"));
    assert!(toml_string.contains("min_reward_risk"));
    assert!(!toml_string.contains("seed"));

    let deserialized: Config = toml::from_str(&toml_string).expect("Failed to deserialize config");
    assert_eq!(deserialized, config);
}

#[test]
fn test_config_file_loading() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("reflex.toml");

    let mut config = create_test_config();
    config.session.seed = Some(42);
    config.to_file(&config_path).expect("Failed to write config file");

    let loaded = Config::from_file(&config_path).expect("Failed to load config");
    assert_eq!(loaded.session.seed, Some(42));
    assert_eq!(loaded.modes.speed.scenarios, 3);
}

#[test]
fn test_partial_config_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("reflex.toml");
    fs::write(&config_path, "[scoring]\nmin_reward_risk = 2.0\n").expect("Failed to write config file");

    let loaded = Config::from_file(&config_path).expect("Failed to load config");
    assert_eq!(loaded.scoring.min_reward_risk, 2.0);
    assert_eq!(loaded.scoring.xp_correct, 10);
    assert_eq!(loaded.modes.risk.time_limit_secs, 10);
}

#[test]
fn test_partial_mode_table_keeps_mode_defaults() {
    let config: Config = toml::from_str("[modes.speed]\ntime_limit_secs = 3\n\n[modes.pattern]\nscenarios = 4\n")
        .expect("Failed to parse partial modes");

    assert_eq!(config.modes.speed.time_limit_secs, 3);
    assert_eq!(config.modes.speed.scenarios, 10);
    assert_eq!(config.modes.pattern.time_limit_secs, 7);
    assert_eq!(config.modes.pattern.scenarios, 4);
    assert_eq!(config.modes.risk, TrainingMode::Risk.default_settings());
}

#[test]
fn test_load_or_create_writes_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("new.toml");
    assert!(!config_path.exists());

    let created = Config::load_or_create(&config_path).expect("Failed to create config");
    assert!(config_path.exists());
    assert_eq!(created, Config::default());

    let reloaded = Config::load_or_create(&config_path).expect("Failed to reload config");
    assert_eq!(reloaded, created);
}

#[test]
fn test_invalid_config_is_rejected() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[modes.speed]\ntime_limit_secs = 0\nscenarios = 10\n")
        .expect("Failed to write config file");

    let err = Config::from_file(&config_path).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(_)));

    let reflex_err: ReflexError = err.into();
    assert_eq!(reflex_err.category(), "config");
}

#[test]
fn test_validation_rules() {
    let mut config = create_test_config();
    config.scoring.min_reward_risk = 0.0;
    assert!(config.validate().is_err());

    let mut config = create_test_config();
    config.feed.base_url = "  ".to_string();
    assert!(config.validate().is_err());

    let mut config = create_test_config();
    config.modes.pattern.scenarios = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_malformed_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("broken.toml");
    fs::write(&config_path, "[modes\nspeed = ").expect("Failed to write config file");

    assert!(matches!(Config::from_file(&config_path), Err(ConfigError::Parse(_))));
}
