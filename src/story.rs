/*!
 * Document model for normalized stories and generated TTS scripts.
 *
 * A story is an ordered list of scenes, each carrying an ordered list of
 * dialogue items. The engine consumes stories read-only and emits a flat,
 * ordered list of `TtsLine` values.
 */

use serde::{Deserialize, Serialize};

/// A normalized story document.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Story {
    /// Scenes in document order
    #[serde(default)]
    pub scenes: Vec<Scene>,
}

/// A single scene within a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Scene identifier, used as the prefix of generated line IDs
    #[serde(default = "default_scene_id")]
    pub id: String,

    /// Dialogue entries in document order (may be absent)
    #[serde(default)]
    pub dialogue: Vec<DialogueItem>,

    /// Optional scene summary (scanned by speaker suggestions, not by generation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Optional visual notes (scanned by speaker suggestions, not by generation)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual_notes: Option<String>,
}

fn default_scene_id() -> String {
    "unknown".to_string()
}

/// One dialogue entry: a raw speaker mention plus a text body.
///
/// The speaker may be a canonical registry ID or a free-text name; text may
/// be empty, in which case the entry is skipped during generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DialogueItem {
    /// Raw speaker mention, canonicalized during generation
    #[serde(default = "default_speaker")]
    pub speaker: String,

    /// Text body, possibly mixing narration and quoted speech
    #[serde(default)]
    pub text: String,
}

fn default_speaker() -> String {
    "narrator".to_string()
}

/// A single speech-synthesis line in the generated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtsLine {
    /// Line identifier, `<scene-id>_<counter>` with a zero-padded global counter
    pub id: String,

    /// Text content, never empty after trimming
    pub text: String,

    /// Canonical speaker ID
    pub speaker: String,
}

impl Story {
    /// Parse a story from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Total number of dialogue items across all scenes.
    pub fn dialogue_count(&self) -> usize {
        self.scenes.iter().map(|s| s.dialogue.len()).sum()
    }
}
