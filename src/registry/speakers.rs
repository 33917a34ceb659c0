/*!
 * Speaker registry: canonical speaker IDs mapped to voice profiles.
 *
 * Only ID membership is consumed by the canonicalization core; the profile
 * fields travel with the registry for the downstream synthesis stage.
 */

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::file_utils::FileManager;
use crate::registry::{current_timestamp, registries_dir};

/// File name of the speakers registry under `<assets>/registries/`.
pub const SPEAKERS_FILE: &str = "speakers.json";

/// Voice profile for one canonical speaker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpeakerProfile {
    /// Human-readable display name
    pub display_name: String,

    /// Default synthesis voice identifier
    pub default_voice: String,

    /// Language code of the speaker's lines
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Pitch adjustment
    #[serde(default)]
    pub pitch: i32,

    /// Speaking rate multiplier
    #[serde(default = "default_rate")]
    pub rate: f64,

    /// Delivery style tag
    #[serde(default = "default_style")]
    pub style: String,
}

fn default_lang() -> String {
    "uk".to_string()
}

fn default_rate() -> f64 {
    1.0
}

fn default_style() -> String {
    "calm".to_string()
}

/// Registry of canonical speakers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerRegistry {
    /// Registry format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Last save timestamp, ISO-8601 with Z suffix
    #[serde(default)]
    pub updated_at: String,

    /// Canonical ID → profile
    #[serde(default)]
    pub items: BTreeMap<String, SpeakerProfile>,
}

fn default_version() -> u32 {
    1
}

impl Default for SpeakerRegistry {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: String::new(),
            items: BTreeMap::new(),
        }
    }
}

impl SpeakerRegistry {
    /// Path of the registry file under an assets directory.
    pub fn path(assets_dir: &Path) -> PathBuf {
        registries_dir(assets_dir).join(SPEAKERS_FILE)
    }

    /// Exact, case-sensitive membership test for a canonical ID.
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Load the registry from an assets directory.
    ///
    /// A missing or malformed file degrades to an empty registry with a
    /// warning; speaker resolution then relies entirely on the name map.
    pub fn load_or_default(assets_dir: &Path) -> Self {
        let path = Self::path(assets_dir);
        if !path.exists() {
            warn!("Speakers registry not found at {path:?}, using empty registry");
            return Self::default();
        }

        match FileManager::read_json::<Self>(&path) {
            Ok(registry) => registry,
            Err(e) => {
                warn!("Could not load speakers registry from {path:?}: {e}");
                Self::default()
            }
        }
    }

    /// Load the registry, failing when the file is missing or malformed.
    /// Used by the registry-management commands that refuse to guess.
    pub fn load(assets_dir: &Path) -> Result<Self> {
        let path = Self::path(assets_dir);
        if !path.exists() {
            return Err(anyhow!(
                "Speakers registry not found at {path:?}. Run 'speakers init' first."
            ));
        }
        FileManager::read_json(&path)
            .with_context(|| format!("Failed to load speakers registry: {path:?}"))
    }

    /// Save the registry, refreshing `updated_at`.
    pub fn save(&mut self, assets_dir: &Path) -> Result<()> {
        self.updated_at = current_timestamp();
        FileManager::write_json_pretty(Self::path(assets_dir), self)
    }

    /// Initialize the registry file if absent, seeding the narrator profile.
    ///
    /// Returns true when a new file was written.
    pub fn init(assets_dir: &Path) -> Result<bool> {
        let path = Self::path(assets_dir);
        if path.exists() {
            return Ok(false);
        }

        let mut registry = Self::default();
        registry.items.insert(
            "narrator".to_string(),
            SpeakerProfile {
                display_name: "Оповідач".to_string(),
                default_voice: "voice_narrator".to_string(),
                lang: default_lang(),
                pitch: 0,
                rate: default_rate(),
                style: default_style(),
            },
        );
        registry.save(assets_dir)?;
        Ok(true)
    }

    /// Add or replace a speaker profile.
    pub fn upsert(&mut self, id: &str, profile: SpeakerProfile) {
        self.items.insert(id.to_string(), profile);
    }

    /// Update the default voice of an existing speaker.
    pub fn link_voice(&mut self, id: &str, voice: &str) -> Result<()> {
        let profile = self
            .items
            .get_mut(id)
            .ok_or_else(|| anyhow!("Speaker '{id}' not found in registry"))?;
        profile.default_voice = voice.to_string();
        Ok(())
    }
}
