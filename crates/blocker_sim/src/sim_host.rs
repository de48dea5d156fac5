//! A [`HostEngine`] that logs every call instead of touching a real server.
//!
//! State is kept in a [`RecordingHost`]; this wrapper adds logging and owns
//! the next-tick queue so deferred model assignments are logged as well.

use plugin_blocker_passes::colors::strip_color_codes;
use plugin_blocker_passes::host::recording::RecordingHost;
use plugin_blocker_passes::host::{EntityHandle, Rgba, SolidType, TickCallback};
use plugin_blocker_passes::math::{QAngle, Vector};
use plugin_blocker_passes::{HostEngine, PlayerInfo, PlayerSlot, Team};
use tracing::{debug, info, warn};

pub struct SimHost {
    inner: RecordingHost,
    pending: Vec<(EntityHandle, TickCallback)>,
    tick: u64,
}

impl SimHost {
    /// A server on `map` with the given numbers of playing and spectating players.
    pub fn new(map: &str, players: u32, spectators: u32) -> Self {
        let playing = (0..players).map(|i| {
            let team = if i % 2 == 0 { Team::Terrorist } else { Team::CounterTerrorist };
            PlayerInfo::new(i, format!("player_{i}"), team)
        });
        let watching = (players..players.saturating_add(spectators))
            .map(|i| PlayerInfo::new(i, format!("spectator_{i}"), Team::Spectator));

        Self {
            inner: RecordingHost::new(map).with_players(playing.chain(watching)),
            pending: Vec::new(),
            tick: 0,
        }
    }

    /// Runs every callback scheduled during the current tick.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
        let pending = std::mem::take(&mut self.pending);
        debug!("⏱️ SimHost: Tick {} running {} deferred callback(s)", self.tick, pending.len());
        for (entity, callback) in pending {
            callback(&mut *self, entity);
        }
    }

    pub fn recorded(&self) -> &RecordingHost {
        &self.inner
    }
}

impl HostEngine for SimHost {
    fn players(&self) -> Vec<PlayerInfo> {
        self.inner.players()
    }

    fn map_name(&self) -> String {
        self.inner.map_name()
    }

    fn create_entity(&mut self, class_name: &str) -> Option<EntityHandle> {
        let entity = self.inner.create_entity(class_name);
        match entity {
            Some(handle) => info!("🧱 SimHost: Created {} ({})", handle, class_name),
            None => warn!("🧱 SimHost: Could not create {}", class_name),
        }
        entity
    }

    fn set_solid_type(&mut self, entity: EntityHandle, solid: SolidType) {
        debug!("🧱 SimHost: {} solid type {:?}", entity, solid);
        self.inner.set_solid_type(entity, solid);
    }

    fn set_render_color(&mut self, entity: EntityHandle, color: Rgba) {
        debug!("🧱 SimHost: {} color rgb({}, {}, {})", entity, color.r, color.g, color.b);
        self.inner.set_render_color(entity, color);
    }

    fn teleport(&mut self, entity: EntityHandle, origin: Vector, angles: QAngle, velocity: Vector) {
        info!("🧱 SimHost: {} placed at [{}] facing [{}]", entity, origin, angles);
        self.inner.teleport(entity, origin, angles, velocity);
    }

    fn dispatch_spawn(&mut self, entity: EntityHandle) {
        debug!("🧱 SimHost: {} spawned", entity);
        self.inner.dispatch_spawn(entity);
    }

    fn schedule_next_tick(&mut self, entity: EntityHandle, callback: TickCallback) {
        debug!("⏱️ SimHost: {} callback queued for tick {}", entity, self.tick + 1);
        self.pending.push((entity, callback));
    }

    fn set_model(&mut self, entity: EntityHandle, model_path: &str) {
        info!("🧱 SimHost: {} model {}", entity, model_path);
        self.inner.set_model(entity, model_path);
    }

    fn print_to_chat_all(&mut self, message: &str) {
        info!("💬 SimHost: [all] {}", strip_color_codes(message));
        self.inner.print_to_chat_all(message);
    }

    fn print_to_chat(&mut self, player: PlayerSlot, message: &str) {
        info!("💬 SimHost: [{}] {}", player, strip_color_codes(message));
        self.inner.print_to_chat(player, message);
    }

    fn player_has_permission(&self, player: PlayerSlot, permission: &str) -> bool {
        self.inner.player_has_permission(player, permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population() {
        let host = SimHost::new("de_nuke", 3, 2);
        let players = host.players();

        assert_eq!(players.len(), 5);
        assert_eq!(players.iter().filter(|p| p.team.is_playing()).count(), 3);
        assert_eq!(players.iter().filter(|p| p.team == Team::Spectator).count(), 2);
        assert_eq!(host.map_name(), "de_nuke");
    }

    #[test]
    fn test_deferred_model_goes_through_wrapper() {
        let mut host = SimHost::new("de_nuke", 0, 0);
        let entity = host.create_entity("prop_dynamic_override").unwrap();
        host.schedule_next_tick(
            entity,
            Box::new(|host: &mut dyn HostEngine, entity: EntityHandle| host.set_model(entity, "models/x.vmdl")),
        );

        assert!(host.recorded().entity(entity).unwrap().model.is_none());
        host.advance_tick();
        assert_eq!(host.recorded().entity(entity).unwrap().model.as_deref(), Some("models/x.vmdl"));
    }
}
