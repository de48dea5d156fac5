//! # Round Start Blocker
//!
//! Decides at every round start whether the map should be narrowed down, and
//! if so places the configured props and tells players why.
//!
//! ## Flow
//!
//! 1. Count players on a playing team (spectators and unassigned excluded)
//! 2. More players than the threshold: nothing to do
//! 3. No props configured for the current map: nothing to do
//! 4. Spawn every prop in configuration order
//! 5. Broadcast the announcement with `{MINPLAYERS}` and color tags substituted
//!
//! A prop the engine refuses to create is skipped; the remaining props are
//! still placed and the announcement is still sent.

use crate::colors::format_announcement;
use crate::config::{BlockerConfig, PropSpec};
use crate::host::{EntityHandle, HostEngine, Rgba, SolidType};
use crate::math::{QAngle, Vector};
use tracing::{debug, info, warn};

/// Entity class used for every blocking prop.
pub const PROP_CLASS_NAME: &str = "prop_dynamic_override";

/// Why a round start left the map untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Enough players are on a playing team.
    EnoughPlayers { playing: usize, threshold: u32 },
    /// The current map has no configured props.
    NoPropsForMap { map: String },
}

/// What a single round start did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundReport {
    Skipped(SkipReason),
    Activated {
        map: String,
        /// Props created, in configuration order
        spawned: Vec<EntityHandle>,
        /// Props the engine refused to create
        failed: usize,
    },
}

impl RoundReport {
    pub fn is_activated(&self) -> bool {
        matches!(self, RoundReport::Activated { .. })
    }
}

/// Stateless round-start handler; the configuration is passed per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RoundStartBlocker;

impl RoundStartBlocker {
    pub fn new() -> Self {
        Self
    }

    /// Handles one round start against the given configuration.
    pub fn on_round_start(&self, config: &BlockerConfig, host: &mut dyn HostEngine) -> RoundReport {
        let playing = host
            .players()
            .iter()
            .filter(|player| player.team.is_playing())
            .count();

        if playing > config.players as usize {
            debug!(
                "🚧 BlockerPasses: {} playing players above threshold {}, passages stay open",
                playing, config.players
            );
            return RoundReport::Skipped(SkipReason::EnoughPlayers {
                playing,
                threshold: config.players,
            });
        }

        let map = host.map_name();
        let Some(props) = config.props_for(&map) else {
            debug!("🚧 BlockerPasses: No blockers configured for map '{}'", map);
            return RoundReport::Skipped(SkipReason::NoPropsForMap { map });
        };

        let mut spawned = Vec::with_capacity(props.len());
        let mut failed = 0;
        for prop in props {
            match spawn_prop(host, prop) {
                Some(entity) => spawned.push(entity),
                None => failed += 1,
            }
        }

        host.print_to_chat_all(&format_announcement(&config.message, config.players));

        info!(
            "🚧 BlockerPasses: Blocked {} passages on '{}' ({} playing, threshold {})",
            spawned.len(),
            map,
            playing,
            config.players
        );

        RoundReport::Activated {
            map,
            spawned,
            failed,
        }
    }
}

/// Creates and places one prop. The model is attached on the next tick.
fn spawn_prop(host: &mut dyn HostEngine, prop: &PropSpec) -> Option<EntityHandle> {
    let Some(entity) = host.create_entity(PROP_CLASS_NAME) else {
        warn!("🚧 BlockerPasses: Engine refused to create prop '{}'", prop.model_path);
        return None;
    };

    let origin = Vector::parse_or_zero(&prop.origin);
    let angles = QAngle::parse_or_zero(&prop.angles);

    host.set_solid_type(entity, SolidType::VPhysics);
    host.set_render_color(entity, Rgba::opaque(prop.color));
    host.teleport(entity, origin, angles, Vector::zero());
    host.dispatch_spawn(entity);

    let model_path = prop.model_path.clone();
    host.schedule_next_tick(
        entity,
        Box::new(move |host: &mut dyn HostEngine, entity: EntityHandle| {
            host.set_model(entity, &model_path)
        }),
    );

    debug!("🚧 BlockerPasses: Spawned {} at {} ({})", entity, origin, angles);
    Some(entity)
}
