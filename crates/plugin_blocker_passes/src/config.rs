//! Configuration management for the Blocker Passes plugin.
//!
//! The configuration lives in `blocker_passes.json` inside the plugin's module
//! directory. When the file is missing, a default configuration for
//! `de_mirage` is written there and used as is.

use crate::error::{BlockerError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the configuration inside the module directory.
pub const CONFIG_FILE_NAME: &str = "blocker_passes.json";

const DEFAULT_MIN_PLAYERS: u32 = 6;

const DEFAULT_MESSAGE: &str = "[{BLUE} BlockerPasses {DEFAULT}] Some passageways are blocked. Unblocking requires {RED}{MINPLAYERS}{DEFAULT} players";

const DEFAULT_MAP: &str = "de_mirage";

/// Plugin configuration as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlockerConfig {
    /// Blockers are placed while the playing head count is at most this value
    pub players: u32,
    /// Chat announcement template, may contain `{MINPLAYERS}` and color tags
    pub message: String,
    /// Props to place, keyed by exact map name
    pub maps: BTreeMap<String, Vec<PropSpec>>,
}

/// A single prop placed when blockers are active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropSpec {
    /// Engine asset path of the model, e.g. `models/props/de_mirage/small_door_b.vmdl`
    pub model_path: String,
    /// Render color as RGB
    pub color: [u8; 3],
    /// World position as `"x y z"`; missing means the world origin
    #[serde(default)]
    pub origin: String,
    /// Orientation as `"pitch yaw roll"`; missing means no rotation
    #[serde(default)]
    pub angles: String,
}

impl PropSpec {
    pub fn new(model_path: &str, color: [u8; 3], origin: &str, angles: &str) -> Self {
        Self {
            model_path: model_path.to_string(),
            color,
            origin: origin.to_string(),
            angles: angles.to_string(),
        }
    }
}

impl BlockerConfig {
    /// Props configured for `map`, if any.
    pub fn props_for(&self, map: &str) -> Option<&[PropSpec]> {
        self.maps.get(map).map(Vec::as_slice)
    }

    /// Serializes the configuration the way it is written to disk.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(BlockerError::ConfigSerialize)
    }
}

impl Default for BlockerConfig {
    fn default() -> Self {
        let fence = "models/props/de_nuke/hr_nuke/chainlink_fence_001/chainlink_fence_001_256_capped.vmdl";

        let mirage = vec![
            PropSpec::new(
                "models/props/de_dust/hr_dust/dust_windows/dust_rollupdoor_96x128_surface_lod.vmdl",
                [30, 144, 255],
                "-1600.46 -741.124 -172.965",
                "0 180 0",
            ),
            PropSpec::new(
                "models/props/de_mirage/small_door_b.vmdl",
                [255, 255, 255],
                "588.428 704.941 -136.517",
                "0 270.256 0",
            ),
            PropSpec::new(
                "models/props/de_mirage/large_door_c.vmdl",
                [255, 255, 255],
                "-1007.87 -359.812 -323.64",
                "0 270.106 0",
            ),
            PropSpec::new(fence, [255, 255, 255], "-961.146 -14.2419 -169.489", "0 269.966 0"),
            PropSpec::new(fence, [255, 255, 255], "-961.146 -14.2419 -43.0083", "0 269.966 0"),
        ];

        Self {
            players: DEFAULT_MIN_PLAYERS,
            message: DEFAULT_MESSAGE.to_string(),
            maps: BTreeMap::from([(DEFAULT_MAP.to_string(), mirage)]),
        }
    }
}

/// Loads, creates and reloads the configuration file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Creates a store for the configuration inside `module_directory`.
    pub fn new(module_directory: impl AsRef<Path>) -> Self {
        Self {
            path: module_directory.as_ref().join(CONFIG_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the configuration, writing the defaults first if no file exists.
    ///
    /// # Errors
    ///
    /// [`BlockerError::ConfigParse`] when the file exists but is malformed,
    /// [`BlockerError::Io`] when it cannot be read or the defaults cannot be written.
    pub fn load(&self) -> Result<BlockerConfig> {
        if !self.path.exists() {
            return self.create_default();
        }

        let content =
            std::fs::read_to_string(&self.path).map_err(|e| BlockerError::io(&self.path, e))?;
        let config = serde_json::from_str(&content).map_err(|source| BlockerError::ConfigParse {
            path: self.path.clone(),
            source,
        })?;

        info!("🚧 BlockerPasses: Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Writes the default configuration as indented JSON and returns it.
    ///
    /// Never overwrites: fails with [`BlockerError::ConfigExists`] if the file is present.
    pub fn create_default(&self) -> Result<BlockerConfig> {
        let config = BlockerConfig::default();
        let json = config.to_json_pretty()?;

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => BlockerError::ConfigExists(self.path.clone()),
                _ => BlockerError::io(&self.path, e),
            })?;
        std::io::Write::write_all(&mut file, json.as_bytes())
            .map_err(|e| BlockerError::io(&self.path, e))?;

        info!("🚧 BlockerPasses: Created default configuration file: {}", self.path.display());
        Ok(config)
    }

    /// Re-reads the configuration from disk. Same semantics as [`ConfigStore::load`].
    pub fn reload(&self) -> Result<BlockerConfig> {
        self.load()
    }
}
