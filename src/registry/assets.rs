/*!
 * Content-addressed assets cache.
 *
 * Files are stored under a SHA-256 derived name and tracked in per-kind
 * registries so the same content is never stored twice.
 */

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use log::info;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::file_utils::FileManager;
use crate::registry::{current_timestamp, registries_dir};

/// Cache subdirectories created by `init`.
const CACHE_DIRS: [&str; 4] = ["images", "animations", "audio", "constants"];

/// Per-kind registries created by `init`.
const CACHE_REGISTRIES: [&str; 4] = [
    "images.json",
    "animations.json",
    "audio.json",
    "constants.json",
];

/// One cached asset entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetItem {
    /// Path relative to the assets directory
    pub path: String,

    /// Full SHA-256 digest of the content, hex-encoded
    pub sha256: String,

    /// Free-form metadata
    #[serde(default)]
    pub meta: AssetMeta,
}

/// Asset metadata.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssetMeta {
    /// Original file name
    #[serde(default)]
    pub name: String,
}

/// A per-kind asset registry keyed by full content digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRegistry {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub updated_at: String,

    #[serde(default)]
    pub items: BTreeMap<String, AssetItem>,
}

fn default_version() -> u32 {
    1
}

impl Default for AssetRegistry {
    fn default() -> Self {
        Self {
            version: 1,
            updated_at: String::new(),
            items: BTreeMap::new(),
        }
    }
}

/// Assets cache rooted at an assets directory.
#[derive(Debug)]
pub struct AssetsCache {
    assets_dir: PathBuf,
}

impl AssetsCache {
    /// Open a cache over the given assets directory.
    pub fn new(assets_dir: &Path) -> Self {
        Self {
            assets_dir: assets_dir.to_path_buf(),
        }
    }

    /// Create the cache directory layout and empty per-kind registries.
    /// Existing registries are left untouched.
    pub fn init(&self) -> Result<()> {
        for dir in CACHE_DIRS {
            FileManager::ensure_dir(self.assets_dir.join(dir))?;
        }
        FileManager::ensure_dir(registries_dir(&self.assets_dir))?;

        for registry_name in CACHE_REGISTRIES {
            let path = registries_dir(&self.assets_dir).join(registry_name);
            if !path.exists() {
                let mut registry = AssetRegistry::default();
                registry.updated_at = current_timestamp();
                FileManager::write_json_pretty(&path, &registry)?;
                info!("Initialized registry: {path:?}");
            }
        }
        Ok(())
    }

    /// Add a constant JSON file to the cache, content-addressed by SHA-256.
    ///
    /// Returns the full digest. Re-adding identical content is a no-op.
    pub fn add_constant(&self, file: &Path) -> Result<String> {
        if !file.is_file() {
            return Err(anyhow!("Not a file: {file:?}"));
        }

        let constants_dir = self.assets_dir.join("constants");
        let registry_path = registries_dir(&self.assets_dir).join("constants.json");
        if !constants_dir.exists() || !registries_dir(&self.assets_dir).exists() {
            return Err(anyhow!(
                "Assets cache not initialized at {:?}. Run 'assets init' first.",
                self.assets_dir
            ));
        }

        let digest = sha256_of_file(file)?;
        let short = &digest[..12];

        let mut registry: AssetRegistry = if registry_path.exists() {
            FileManager::read_json(&registry_path).unwrap_or_default()
        } else {
            AssetRegistry::default()
        };

        if registry.items.contains_key(&digest) {
            info!("Constant already cached: {digest}");
            return Ok(digest);
        }

        let target_name = format!("sha256_{short}.json");
        fs::copy(file, constants_dir.join(&target_name))
            .with_context(|| format!("Failed to copy {file:?} into constants cache"))?;

        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        registry.items.insert(
            digest.clone(),
            AssetItem {
                path: format!("constants/{target_name}"),
                sha256: digest.clone(),
                meta: AssetMeta { name },
            },
        );
        registry.updated_at = current_timestamp();
        FileManager::write_json_pretty(&registry_path, &registry)?;

        Ok(digest)
    }
}

/// SHA-256 digest of a file's content, streamed in 4 KiB blocks.
fn sha256_of_file(path: &Path) -> Result<String> {
    let mut file =
        fs::File::open(path).with_context(|| format!("Failed to open file: {path:?}"))?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 4096];
    loop {
        let read = file.read(&mut buf)?;
        if read == 0 {
            break;
        }
        hasher.update(&buf[..read]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}
