//! # Host Engine Interface
//!
//! Everything the plugin needs from the game server runtime, expressed as one
//! trait. The runtime owns entities, players, chat and the tick loop; the
//! plugin only ever reaches them through [`HostEngine`].
//!
//! ## Spawn contract
//!
//! A prop is built in a fixed order:
//!
//! ```text
//! create_entity("prop_dynamic_override") → EntityHandle
//!     ↓
//! set_solid_type / set_render_color / teleport
//!     ↓
//! dispatch_spawn
//!     ↓
//! schedule_next_tick(handle, |host, handle| host.set_model(handle, path))
//! ```
//!
//! The model must only be assigned once the entity has finished spawning,
//! which the engine guarantees by the following tick.
//!
//! ## Adapters
//!
//! - [`recording::RecordingHost`] - in-memory host that records every call

use crate::math::{QAngle, Vector};
use std::fmt;

pub mod recording;

/// Callback run once on the tick after it was scheduled.
pub type TickCallback = Box<dyn FnOnce(&mut dyn HostEngine, EntityHandle)>;

/// Index of a connected player, as assigned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerSlot(pub u32);

impl fmt::Display for PlayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Opaque reference to an entity living inside the host engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityHandle(pub u32);

impl fmt::Display for EntityHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Team assignment reported for a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    None,
    Spectator,
    Terrorist,
    CounterTerrorist,
}

impl Team {
    /// Maps the engine's raw team number; unknown values count as no team.
    pub fn from_raw(value: u8) -> Self {
        match value {
            1 => Team::Spectator,
            2 => Team::Terrorist,
            3 => Team::CounterTerrorist,
            _ => Team::None,
        }
    }

    /// Whether the player takes part in the round.
    pub fn is_playing(self) -> bool {
        !matches!(self, Team::None | Team::Spectator)
    }
}

/// Snapshot of a connected player.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerInfo {
    pub slot: PlayerSlot,
    pub name: String,
    pub team: Team,
}

impl PlayerInfo {
    pub fn new(slot: u32, name: impl Into<String>, team: Team) -> Self {
        Self {
            slot: PlayerSlot(slot),
            name: name.into(),
            team,
        }
    }
}

/// Collision model applied to a spawned entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidType {
    /// Collides through the model's physics mesh.
    VPhysics,
}

/// Render color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Fully opaque color from an RGB triple.
    pub fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Operations the plugin consumes from the game server.
///
/// All calls happen on the host's game loop thread, one event at a time.
pub trait HostEngine {
    /// Every connected player, including spectators and unassigned players.
    fn players(&self) -> Vec<PlayerInfo>;

    /// Identifier of the loaded map, e.g. `de_mirage`.
    fn map_name(&self) -> String;

    /// Creates an entity of the given class; `None` if the engine refuses.
    fn create_entity(&mut self, class_name: &str) -> Option<EntityHandle>;

    fn set_solid_type(&mut self, entity: EntityHandle, solid: SolidType);

    fn set_render_color(&mut self, entity: EntityHandle, color: Rgba);

    fn teleport(&mut self, entity: EntityHandle, origin: Vector, angles: QAngle, velocity: Vector);

    /// Finalizes spawning of a configured entity.
    fn dispatch_spawn(&mut self, entity: EntityHandle);

    /// Runs `callback` once, after the current tick completes.
    fn schedule_next_tick(&mut self, entity: EntityHandle, callback: TickCallback);

    fn set_model(&mut self, entity: EntityHandle, model_path: &str);

    fn print_to_chat_all(&mut self, message: &str);

    fn print_to_chat(&mut self, player: PlayerSlot, message: &str);

    /// Whether the player holds the given admin flag, e.g. `@css/root`.
    fn player_has_permission(&self, player: PlayerSlot, permission: &str) -> bool;
}
