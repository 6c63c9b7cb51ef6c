use std::fs;

use log::LevelFilter;
use tempfile::tempdir;

use crate::config::error::ConfigError;
use crate::config::{ConfigFormat, CoreConfig, EventsConfig, LoggingConfig};

fn sample_config() -> CoreConfig {
    CoreConfig {
        events: EventsConfig { enabled: false, log_listener_failures: false },
        logging: LoggingConfig { level: "debug".to_string() },
    }
}

#[test]
fn test_defaults() {
    let config = CoreConfig::default();
    assert!(config.events.enabled);
    assert!(config.events.log_listener_failures);
    assert_eq!(config.logging.level_filter(), LevelFilter::Info);
}

#[test]
fn test_format_from_path() {
    assert_eq!(ConfigFormat::from_path("core.json".as_ref()), Some(ConfigFormat::Json));
    assert_eq!(ConfigFormat::from_path("core.YML".as_ref()), Some(ConfigFormat::Yaml));
    assert_eq!(ConfigFormat::from_path("core.toml".as_ref()), Some(ConfigFormat::Toml));
    assert_eq!(ConfigFormat::from_path("core.ini".as_ref()), None);
    assert_eq!(ConfigFormat::from_path("core".as_ref()), None);
}

#[test]
fn test_round_trip_each_format() {
    let config = sample_config();
    for format in [ConfigFormat::Json, ConfigFormat::Yaml, ConfigFormat::Toml] {
        let text = config.serialize(format).unwrap();
        let back = CoreConfig::deserialize(&text, format).unwrap();
        assert_eq!(back, config, "round trip through {}", format.extension());
    }
}

#[test]
fn test_partial_file_uses_defaults() {
    let config = CoreConfig::deserialize("[events]\nenabled = false\n", ConfigFormat::Toml).unwrap();
    assert!(!config.events.enabled);
    assert!(config.events.log_listener_failures);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_unknown_level_falls_back_to_info() {
    let logging = LoggingConfig { level: "chatty".to_string() };
    assert_eq!(logging.level_filter(), LevelFilter::Info);
    let logging = LoggingConfig { level: "trace".to_string() };
    assert_eq!(logging.level_filter(), LevelFilter::Trace);
}

#[test]
fn test_save_and_load_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("innochannel.yaml");

    sample_config().save(&path).unwrap();
    let loaded = CoreConfig::load(&path).unwrap();
    assert_eq!(loaded, sample_config());
}

#[test]
fn test_load_errors() {
    let dir = tempdir().expect("Failed to create temp directory");

    let missing = dir.path().join("missing.json");
    assert!(matches!(CoreConfig::load(&missing), Err(ConfigError::Io { .. })));

    let unsupported = dir.path().join("core.ini");
    fs::write(&unsupported, "enabled=true").unwrap();
    assert!(matches!(CoreConfig::load(&unsupported), Err(ConfigError::UnsupportedFormat(_))));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    let err = CoreConfig::load(&broken).unwrap_err();
    assert!(matches!(err, ConfigError::Deserialization { ref format, .. } if format == "json"));
}
