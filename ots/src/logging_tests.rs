use assert_matches::assert_matches;
use serial_test::serial;

use super::*;
use crate::error::ConfigError;

#[test]
fn test_default_config() {
    let config = LoggingConfig::default();
    assert_eq!(config.level, None);
    assert!(config.console);
}

#[test]
fn test_from_config() {
    let config = OtsConfig {
        log_level: Some("warn".to_string()),
        ..OtsConfig::default()
    };
    let logging = LoggingConfig::from_config(&config).unwrap();
    assert_eq!(logging.level, Some(LevelFilter::WARN));
    assert!(logging.console);

    let unset = LoggingConfig::from_config(&OtsConfig::default()).unwrap();
    assert_eq!(unset, LoggingConfig::default());
}

#[test]
fn test_from_config_rejects_unknown_level() {
    let config = OtsConfig {
        log_level: Some("loud".to_string()),
        ..OtsConfig::default()
    };
    assert_matches!(
        LoggingConfig::from_config(&config),
        Err(OtsError::Config(ConfigError::Invalid(_)))
    );
}

#[test]
fn test_explicit_level_wins() {
    let config = LoggingConfig {
        level: Some(LevelFilter::ERROR),
        console: true,
    };
    assert_eq!(config.env_filter().to_string(), "error");
}

#[test]
#[serial]
fn test_disabled_console_installs_nothing() {
    let config = LoggingConfig {
        level: Some(LevelFilter::TRACE),
        console: false,
    };
    assert!(init_logging(config.clone()).is_ok());
    assert!(init_logging(config).is_ok());
}

#[test]
#[serial]
fn test_second_global_subscriber_fails() {
    // Whichever test installs first wins; the second attempt always fails.
    let _ = init_console_logging(LevelFilter::DEBUG);
    assert_matches!(init_console_logging(LevelFilter::DEBUG), Err(OtsError::Logging(_)));
    tracing::debug!("logging installed");
}
