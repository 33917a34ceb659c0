use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::PathBuf;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Assets directory holding the registries subdirectory
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Script generation settings
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Script generation settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GenerationConfig {
    /// Maximum characters per unattributed narration chunk
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Fail the run when any speaker resolves only via fallback
    #[serde(default)]
    pub enforce_known: bool,

    /// Extra reporting-verb forms merged into the built-in vocabulary
    #[serde(default)]
    pub extra_verbs: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            enforce_known: false,
            extra_verbs: Vec::new(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_max_chars() -> usize {
    220
}

impl Default for Config {
    fn default() -> Self {
        Self {
            assets_dir: default_assets_dir(),
            generation: GenerationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Validate the configuration after loading and CLI overrides.
    pub fn validate(&self) -> Result<()> {
        if self.generation.max_chars == 0 {
            return Err(anyhow!("max_chars must be greater than zero"));
        }
        if self.assets_dir.as_os_str().is_empty() {
            return Err(anyhow!("assets_dir must not be empty"));
        }
        Ok(())
    }

    /// Effective verb vocabulary: the built-in Ukrainian set plus any
    /// configured extras.
    pub fn reporting_verbs(&self) -> crate::script::ReportingVerbs {
        let base = crate::script::ReportingVerbs::ukrainian();
        if self.generation.extra_verbs.is_empty() {
            return base;
        }
        let mut verbs: Vec<String> = base.verbs().to_vec();
        verbs.extend(self.generation.extra_verbs.iter().cloned());
        crate::script::ReportingVerbs::new(verbs, vec!["і".to_string()])
    }
}
