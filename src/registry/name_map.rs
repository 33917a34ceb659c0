/*!
 * Speaker name map: ordered regex rules plus a fallback.
 *
 * Rules are applied in list order during canonicalization; the first pattern
 * that matches a raw mention wins. A mention matching no rule resolves to
 * the fallback speaker and is reported as unresolved.
 */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::registry::{current_timestamp, registries_dir};

/// File name of the name map under `<assets>/registries/`.
pub const NAME_MAP_FILE: &str = "speaker_name_map.json";

/// One mapping rule: a regex pattern and the canonical speaker it maps to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NameMapEntry {
    /// Regular-expression pattern, searched case-insensitively.
    /// An invalid pattern is treated as "never matches".
    pub pattern: String,

    /// Target canonical speaker ID
    pub speaker: String,
}

/// Ordered name-mapping rules plus a single fallback speaker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameMap {
    /// Registry format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Last save timestamp, ISO-8601 with Z suffix
    #[serde(default)]
    pub updated_at: String,

    /// Rules in precedence order
    #[serde(default)]
    pub patterns: Vec<NameMapEntry>,

    /// Canonical speaker used when no rule matches
    #[serde(default = "default_fallback")]
    pub fallback: String,
}

fn default_version() -> u32 {
    1
}

fn default_fallback() -> String {
    "narrator".to_string()
}

impl Default for NameMap {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: String::new(),
            patterns: Vec::new(),
            fallback: default_fallback(),
        }
    }
}

impl NameMap {
    /// Path of the name map file under an assets directory.
    pub fn path(assets_dir: &Path) -> PathBuf {
        registries_dir(assets_dir).join(NAME_MAP_FILE)
    }

    /// Load the name map from an assets directory.
    ///
    /// A missing or malformed file degrades to an empty map with the default
    /// fallback, with a warning.
    pub fn load_or_default(assets_dir: &Path) -> Self {
        let path = Self::path(assets_dir);
        if !path.exists() {
            warn!("Speaker name map not found at {path:?}, using default fallback");
            return Self::default();
        }

        match FileManager::read_json::<Self>(&path) {
            Ok(map) => map,
            Err(e) => {
                warn!("Could not load speaker name map from {path:?}: {e}");
                Self::default()
            }
        }
    }

    /// Load the name map, failing when the file is missing or malformed.
    pub fn load(assets_dir: &Path) -> Result<Self> {
        let path = Self::path(assets_dir);
        if !path.exists() {
            return Err(anyhow!(
                "Speaker name map not found at {path:?}. Run 'speakers init' first."
            ));
        }
        FileManager::read_json(&path)
            .with_context(|| format!("Failed to load speaker name map: {path:?}"))
    }

    /// Save the name map, refreshing `updated_at`.
    pub fn save(&mut self, assets_dir: &Path) -> Result<()> {
        self.updated_at = current_timestamp();
        FileManager::write_json_pretty(Self::path(assets_dir), self)
    }

    /// Initialize the name map file if absent. Returns true when written.
    pub fn init(assets_dir: &Path) -> Result<bool> {
        let path = Self::path(assets_dir);
        if path.exists() {
            return Ok(false);
        }
        Self::default().save(assets_dir)?;
        Ok(true)
    }

    /// Append a mapping rule at the end of the precedence order.
    pub fn add_pattern(&mut self, pattern: &str, speaker: &str) {
        self.patterns.push(NameMapEntry {
            pattern: pattern.to_string(),
            speaker: speaker.to_string(),
        });
    }
}
