use std::io::Write;

use assert_matches::assert_matches;
use ots_test_utils::fake::{
    DEFAULT_ENTROPY_LEVEL, DEFAULT_MAX_ACCOUNT_DEPTH, DEFAULT_MAX_INDEX_DEPTH,
};
use ots_test_utils::fake_abi;
use tempfile::NamedTempFile;

use super::*;
use crate::error::OtsError;

const FULL: &str = r#"
enforce_entropy = false
min_entropy_level = 2.5
max_account_depth = 20
max_index_depth = 200
log_level = "debug"
"#;

#[test]
fn test_defaults() {
    let config = OtsConfig::from_toml_str("").unwrap();
    assert_eq!(config, OtsConfig::default());
    assert!(config.enforce_entropy);
    assert_eq!(config.level_filter().unwrap(), None);
}

#[test]
fn test_parse_full_config() {
    let config = OtsConfig::from_toml_str(FULL).unwrap();
    assert!(!config.enforce_entropy);
    assert_eq!(config.min_entropy_level, Some(2.5));
    assert_eq!(config.max_account_depth, Some(20));
    assert_eq!(config.max_index_depth, Some(200));
    assert_eq!(config.level_filter().unwrap(), Some(LevelFilter::DEBUG));
}

#[test]
fn test_unknown_fields_are_rejected() {
    assert_matches!(OtsConfig::from_toml_str("max_depth = 3"), Err(ConfigError::Parse(_)));
    assert_matches!(OtsConfig::from_toml_str("max_index_depth = -1"), Err(ConfigError::Parse(_)));
}

#[test]
fn test_validation() {
    assert_matches!(
        OtsConfig::from_toml_str("min_entropy_level = -1.0"),
        Err(ConfigError::Invalid(_))
    );
    assert_matches!(
        OtsConfig::from_toml_str("min_entropy_level = nan"),
        Err(ConfigError::Invalid(_))
    );

    let error = OtsConfig::from_toml_str(r#"log_level = "chatty""#).unwrap_err();
    assert_matches!(&error, ConfigError::Invalid(message) if message.contains("unknown log level"));
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(FULL.as_bytes()).unwrap();

    let config = OtsConfig::load(file.path()).unwrap();
    assert_eq!(config.max_index_depth, Some(200));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_matches!(OtsConfig::load(dir.path().join("ots.toml")), Err(ConfigError::Io(_)));
}

#[test]
fn test_apply_config() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());

    ots.apply_config(&OtsConfig::from_toml_str(FULL).unwrap()).unwrap();
    assert!(!fake.enforce_entropy());
    assert_eq!(fake.entropy_level(), 2.5);
    assert_eq!(fake.max_depths(), (20, 200));
    fake.assert_no_leaks();
}

#[test]
fn test_apply_config_resets_unset_depths() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    ots.set_max_depth(1, 2);

    let config = OtsConfig {
        max_index_depth: Some(50),
        ..OtsConfig::default()
    };
    ots.apply_config(&config).unwrap();
    assert!(fake.enforce_entropy());
    assert_eq!(fake.entropy_level(), DEFAULT_ENTROPY_LEVEL);
    assert_eq!(fake.max_depths(), (DEFAULT_MAX_ACCOUNT_DEPTH, 50));

    ots.apply_config(&OtsConfig::default()).unwrap();
    assert_eq!(fake.max_depths(), (DEFAULT_MAX_ACCOUNT_DEPTH, DEFAULT_MAX_INDEX_DEPTH));
}

#[test]
fn test_apply_invalid_config() {
    let fake = fake_abi();
    let ots = Ots::with_abi(fake.clone());
    let config = OtsConfig {
        enforce_entropy: false,
        min_entropy_level: Some(f64::INFINITY),
        ..OtsConfig::default()
    };

    assert_matches!(ots.apply_config(&config), Err(OtsError::Config(ConfigError::Invalid(_))));
    assert!(fake.enforce_entropy());
}

