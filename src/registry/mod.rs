/*!
 * On-disk registries consumed and managed by the engine.
 *
 * Registries live under `<assets>/registries/` as JSON documents carrying a
 * `version` and an `updated_at` timestamp refreshed on every save:
 *
 * - `speakers`: canonical speaker IDs and their voice profiles
 * - `name_map`: ordered regex rules mapping free-text names to canonical IDs
 * - `assets`: content-addressed cache registries (images, audio, constants, …)
 *
 * Load failures on registries are recoverable: a missing or malformed file
 * degrades to an empty/default registry with a warning, never an abort.
 */

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

pub mod assets;
pub mod name_map;
pub mod speakers;

pub use assets::AssetsCache;
pub use name_map::{NameMap, NameMapEntry};
pub use speakers::{SpeakerProfile, SpeakerRegistry};

/// Subdirectory of the assets directory holding registry files.
pub const REGISTRIES_DIR: &str = "registries";

/// Resolve the registries directory under an assets directory.
pub fn registries_dir(assets_dir: &Path) -> PathBuf {
    assets_dir.join(REGISTRIES_DIR)
}

/// Current UTC timestamp in ISO-8601 with a `Z` suffix, as written into
/// registry `updated_at` fields and run reports.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}
