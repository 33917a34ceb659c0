/*!
 * Tests for application configuration
 */

use anyhow::Result;
use kazkar::app_config::Config;
use std::path::PathBuf;

use crate::common;

/// Test that the default configuration passes validation
#[test]
fn test_config_withDefaults_shouldValidate() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.generation.max_chars, 220);
    assert!(!config.generation.enforce_known);
    assert_eq!(config.assets_dir, PathBuf::from("assets"));
}

/// Test that a zero character budget is rejected
#[test]
fn test_config_withZeroMaxChars_shouldFailValidation() {
    let mut config = Config::default();
    config.generation.max_chars = 0;
    assert!(config.validate().is_err());
}

/// Test that an empty assets directory is rejected
#[test]
fn test_config_withEmptyAssetsDir_shouldFailValidation() {
    let mut config = Config::default();
    config.assets_dir = PathBuf::new();
    assert!(config.validate().is_err());
}

/// Test that a partial config file picks up defaults for missing fields
#[test]
fn test_config_withPartialJson_shouldUseDefaults() -> Result<()> {
    let json = r#"{ "generation": { "max_chars": 100 } }"#;
    let config: Config = serde_json::from_str(json)?;

    assert_eq!(config.generation.max_chars, 100);
    assert!(!config.generation.enforce_known);
    assert_eq!(config.assets_dir, PathBuf::from("assets"));
    Ok(())
}

/// Test that extra verbs extend the reporting vocabulary
#[test]
fn test_config_withExtraVerbs_shouldExtendVocabulary() {
    let mut config = Config::default();
    config.generation.extra_verbs = vec!["shouted".to_string()];

    let cues = config.reporting_verbs();
    assert!(cues.verbs().iter().any(|v| v == "shouted"));
    assert!(cues.verbs().iter().any(|v| v == "сказала"));
}

/// Test that a config round-trips through a file on disk
#[test]
fn test_config_withFileRoundTrip_shouldPreserveValues() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let mut config = Config::default();
    config.generation.max_chars = 140;
    config.generation.enforce_known = true;

    let path = common::create_test_file(
        temp_dir.path(),
        "kazkar.json",
        &serde_json::to_string_pretty(&config)?,
    )?;

    let loaded: Config = serde_json::from_str(&std::fs::read_to_string(path)?)?;
    assert_eq!(loaded.generation.max_chars, 140);
    assert!(loaded.generation.enforce_known);
    Ok(())
}
