//! # Blocker Passes Plugin
//!
//! Narrows a map down for small games. At every round start the plugin counts
//! the players on a playing team; while that count is at most the configured
//! threshold it places doors, fences and similar props across configured
//! passages and announces it in chat.
//!
//! ## Configuration
//!
//! `blocker_passes.json` in the plugin's module directory:
//!
//! ```json
//! {
//!   "Players": 6,
//!   "Message": "[{BLUE} BlockerPasses {DEFAULT}] Unblocking requires {RED}{MINPLAYERS}{DEFAULT} players",
//!   "Maps": {
//!     "de_mirage": [
//!       {
//!         "ModelPath": "models/props/de_mirage/small_door_b.vmdl",
//!         "Color": [255, 255, 255],
//!         "Origin": "588.428 704.941 -136.517",
//!         "Angles": "0 270.256 0"
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! A default file is written on first load. `css_bp_reload` (root admins
//! only) re-reads it without restarting the server.
//!
//! ## Module Organization
//!
//! - [`config`] - configuration schema and the on-disk store
//! - [`blocker`] - round start decision and prop spawning
//! - [`commands`] - console command callers and replies
//! - [`colors`] - chat color tags
//! - [`host`] - the game server interface the plugin runs against
//! - [`math`] - engine vectors and their string form
//!
//! The crate is a plain Rust library. Binding it to a real game server is the
//! job of a host adapter implementing [`HostEngine`]; `blocker_sim::SimHost`
//! is the adapter shipped in this workspace.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

pub mod blocker;
pub mod colors;
pub mod commands;
pub mod config;
pub mod error;
pub mod host;
pub mod math;

pub use blocker::{RoundReport, RoundStartBlocker, SkipReason};
pub use commands::{CommandCaller, CommandOutcome, COMMAND_RELOAD, RELOAD_PERMISSION};
pub use config::{BlockerConfig, ConfigStore, PropSpec};
pub use error::{BlockerError, Result};
pub use host::{HostEngine, PlayerInfo, PlayerSlot, Team};

/// Game event the plugin subscribes to.
pub const EVENT_ROUND_START: &str = "round_start";

/// Tells the host whether other listeners should still see an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookResult {
    Continue,
}

/// The plugin instance registered with the host.
pub struct BlockerPassesPlugin {
    store: ConfigStore,
    config: Arc<BlockerConfig>,
    blocker: RoundStartBlocker,
}

impl BlockerPassesPlugin {
    pub const NAME: &'static str = "Blocker Passes";
    pub const AUTHOR: &'static str = "thesamefabius";
    pub const VERSION: &'static str = "v1.0.0";
    /// Oldest host API the plugin runs against.
    pub const MIN_API_VERSION: u32 = 90;

    /// Loads the plugin from its module directory.
    ///
    /// # Errors
    ///
    /// Fails when the configuration file exists but cannot be parsed, or when
    /// the default configuration cannot be written. The host must not
    /// activate the plugin in that case.
    pub fn load(module_directory: impl AsRef<Path>, hot_reload: bool) -> Result<Self> {
        let store = ConfigStore::new(module_directory);
        let config = store.load().inspect_err(|e| {
            error!("🚧 BlockerPasses: ❌ Failed to load configuration: {}", e);
        })?;

        info!(
            "🚧 BlockerPasses: {} {} loaded (hot reload: {}), {} map(s) configured",
            Self::NAME,
            Self::VERSION,
            hot_reload,
            config.maps.len()
        );

        Ok(Self {
            store,
            config: Arc::new(config),
            blocker: RoundStartBlocker::new(),
        })
    }

    pub fn name(&self) -> &str {
        Self::NAME
    }

    pub fn author(&self) -> &str {
        Self::AUTHOR
    }

    pub fn version(&self) -> &str {
        Self::VERSION
    }

    pub fn min_api_version(&self) -> u32 {
        Self::MIN_API_VERSION
    }

    /// The configuration currently in effect.
    ///
    /// The returned handle stays valid and unchanged across reloads.
    pub fn config(&self) -> Arc<BlockerConfig> {
        Arc::clone(&self.config)
    }

    pub fn config_path(&self) -> PathBuf {
        self.store.path().to_path_buf()
    }

    /// Handler for [`EVENT_ROUND_START`].
    pub fn on_round_start(&self, host: &mut dyn HostEngine) -> HookResult {
        self.handle_round_start(host);
        HookResult::Continue
    }

    /// Same as [`Self::on_round_start`], returning what was done.
    pub fn handle_round_start(&self, host: &mut dyn HostEngine) -> RoundReport {
        let config = self.config();
        self.blocker.on_round_start(&config, host)
    }

    /// Handler for [`COMMAND_RELOAD`].
    ///
    /// On a parse failure the previous configuration stays active and the
    /// caller is told why.
    pub fn on_reload_command(
        &mut self,
        caller: CommandCaller,
        host: &mut dyn HostEngine,
    ) -> CommandOutcome {
        if !caller.is_authorized(host, RELOAD_PERMISSION) {
            caller.reply(host, commands::PERMISSION_DENIED_MESSAGE);
            return CommandOutcome::PermissionDenied;
        }

        match self.store.reload() {
            Ok(config) => {
                self.config = Arc::new(config);
                info!("🚧 BlockerPasses: Configuration reloaded by {:?}", caller);
                caller.reply(host, commands::RELOAD_SUCCESS_MESSAGE);
                CommandOutcome::Completed
            }
            Err(e) => {
                error!("🚧 BlockerPasses: ❌ Reload failed, keeping previous configuration: {}", e);
                let message = format!("Configuration reload failed: {e}");
                caller.reply(host, &message);
                CommandOutcome::Failed(message)
            }
        }
    }
}
