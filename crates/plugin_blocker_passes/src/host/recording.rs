//! In-memory [`HostEngine`] that records every call.
//!
//! Used by the test suites and by the dry-run simulator. Deferred callbacks
//! are queued until [`RecordingHost::advance_tick`] is called, which makes the
//! spawn-then-model ordering observable.

use super::{EntityHandle, HostEngine, PlayerInfo, PlayerSlot, Rgba, SolidType, TickCallback};
use crate::math::{QAngle, Vector};
use std::collections::{HashMap, HashSet};

/// One observed host call.
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    CreateEntity { class_name: String, entity: Option<EntityHandle> },
    SetSolidType { entity: EntityHandle, solid: SolidType },
    SetRenderColor { entity: EntityHandle, color: Rgba },
    Teleport { entity: EntityHandle, origin: Vector, angles: QAngle, velocity: Vector },
    DispatchSpawn { entity: EntityHandle },
    ScheduleNextTick { entity: EntityHandle },
    SetModel { entity: EntityHandle, model_path: String },
    ChatAll { message: String },
    Chat { player: PlayerSlot, message: String },
}

/// State of a prop as the host sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEntity {
    pub class_name: String,
    pub solid: Option<SolidType>,
    pub color: Option<Rgba>,
    pub origin: Option<Vector>,
    pub angles: Option<QAngle>,
    pub spawned: bool,
    pub model: Option<String>,
}

pub struct RecordingHost {
    map: String,
    players: Vec<PlayerInfo>,
    permissions: HashMap<PlayerSlot, HashSet<String>>,
    /// Creation attempts (0-based) for which the host returns no entity.
    refuse_creations: HashSet<usize>,
    creation_attempts: usize,
    next_entity: u32,
    entities: HashMap<EntityHandle, RecordedEntity>,
    pending: Vec<(EntityHandle, TickCallback)>,
    calls: Vec<HostCall>,
    tick: u64,
}

impl RecordingHost {
    pub fn new(map: impl Into<String>) -> Self {
        Self {
            map: map.into(),
            players: Vec::new(),
            permissions: HashMap::new(),
            refuse_creations: HashSet::new(),
            creation_attempts: 0,
            next_entity: 1,
            entities: HashMap::new(),
            pending: Vec::new(),
            calls: Vec::new(),
            tick: 0,
        }
    }

    pub fn with_player(mut self, player: PlayerInfo) -> Self {
        self.players.push(player);
        self
    }

    pub fn with_players(mut self, players: impl IntoIterator<Item = PlayerInfo>) -> Self {
        self.players.extend(players);
        self
    }

    pub fn grant_permission(&mut self, player: PlayerSlot, permission: &str) {
        self.permissions
            .entry(player)
            .or_default()
            .insert(permission.to_string());
    }

    /// Makes the `attempt`-th `create_entity` call (0-based) return `None`.
    pub fn refuse_creation(&mut self, attempt: usize) {
        self.refuse_creations.insert(attempt);
    }

    pub fn set_map(&mut self, map: impl Into<String>) {
        self.map = map.into();
    }

    /// Completes the current tick, running every callback scheduled during it.
    ///
    /// Callbacks scheduled while draining run on the following tick.
    pub fn advance_tick(&mut self) {
        self.tick += 1;
        let pending = std::mem::take(&mut self.pending);
        for (entity, callback) in pending {
            callback(&mut *self, entity);
        }
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    pub fn pending_callbacks(&self) -> usize {
        self.pending.len()
    }

    pub fn entity(&self, handle: EntityHandle) -> Option<&RecordedEntity> {
        self.entities.get(&handle)
    }

    /// Handles of created entities, in creation order.
    pub fn spawned_entities(&self) -> Vec<EntityHandle> {
        let mut handles: Vec<_> = self.entities.keys().copied().collect();
        handles.sort();
        handles
    }

    /// Messages broadcast to every client.
    pub fn broadcasts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::ChatAll { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Messages sent privately to `player`.
    pub fn chat_for(&self, player: PlayerSlot) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                HostCall::Chat { player: p, message } if *p == player => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn entity_mut(&mut self, handle: EntityHandle) -> Option<&mut RecordedEntity> {
        self.entities.get_mut(&handle)
    }
}

impl HostEngine for RecordingHost {
    fn players(&self) -> Vec<PlayerInfo> {
        self.players.clone()
    }

    fn map_name(&self) -> String {
        self.map.clone()
    }

    fn create_entity(&mut self, class_name: &str) -> Option<EntityHandle> {
        let attempt = self.creation_attempts;
        self.creation_attempts += 1;

        let entity = if self.refuse_creations.contains(&attempt) {
            None
        } else {
            let handle = EntityHandle(self.next_entity);
            self.next_entity += 1;
            self.entities.insert(
                handle,
                RecordedEntity {
                    class_name: class_name.to_string(),
                    solid: None,
                    color: None,
                    origin: None,
                    angles: None,
                    spawned: false,
                    model: None,
                },
            );
            Some(handle)
        };

        self.calls.push(HostCall::CreateEntity {
            class_name: class_name.to_string(),
            entity,
        });
        entity
    }

    fn set_solid_type(&mut self, entity: EntityHandle, solid: SolidType) {
        if let Some(recorded) = self.entity_mut(entity) {
            recorded.solid = Some(solid);
        }
        self.calls.push(HostCall::SetSolidType { entity, solid });
    }

    fn set_render_color(&mut self, entity: EntityHandle, color: Rgba) {
        if let Some(recorded) = self.entity_mut(entity) {
            recorded.color = Some(color);
        }
        self.calls.push(HostCall::SetRenderColor { entity, color });
    }

    fn teleport(&mut self, entity: EntityHandle, origin: Vector, angles: QAngle, velocity: Vector) {
        if let Some(recorded) = self.entity_mut(entity) {
            recorded.origin = Some(origin);
            recorded.angles = Some(angles);
        }
        self.calls.push(HostCall::Teleport {
            entity,
            origin,
            angles,
            velocity,
        });
    }

    fn dispatch_spawn(&mut self, entity: EntityHandle) {
        if let Some(recorded) = self.entity_mut(entity) {
            recorded.spawned = true;
        }
        self.calls.push(HostCall::DispatchSpawn { entity });
    }

    fn schedule_next_tick(&mut self, entity: EntityHandle, callback: TickCallback) {
        self.pending.push((entity, callback));
        self.calls.push(HostCall::ScheduleNextTick { entity });
    }

    fn set_model(&mut self, entity: EntityHandle, model_path: &str) {
        if let Some(recorded) = self.entity_mut(entity) {
            recorded.model = Some(model_path.to_string());
        }
        self.calls.push(HostCall::SetModel {
            entity,
            model_path: model_path.to_string(),
        });
    }

    fn print_to_chat_all(&mut self, message: &str) {
        self.calls.push(HostCall::ChatAll {
            message: message.to_string(),
        });
    }

    fn print_to_chat(&mut self, player: PlayerSlot, message: &str) {
        self.calls.push(HostCall::Chat {
            player,
            message: message.to_string(),
        });
    }

    fn player_has_permission(&self, player: PlayerSlot, permission: &str) -> bool {
        self.permissions
            .get(&player)
            .is_some_and(|granted| granted.contains(permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Team;

    #[test]
    fn test_refused_creation_returns_none() {
        let mut host = RecordingHost::new("de_dust2");
        host.refuse_creation(1);

        assert_eq!(host.create_entity("prop"), Some(EntityHandle(1)));
        assert_eq!(host.create_entity("prop"), None);
        assert_eq!(host.create_entity("prop"), Some(EntityHandle(2)));
        assert_eq!(host.spawned_entities(), vec![EntityHandle(1), EntityHandle(2)]);
    }

    #[test]
    fn test_callbacks_wait_for_tick() {
        let mut host = RecordingHost::new("de_dust2");
        let entity = host.create_entity("prop").unwrap();
        host.schedule_next_tick(
            entity,
            Box::new(|host: &mut dyn HostEngine, entity: EntityHandle| {
                host.set_model(entity, "models/a.vmdl")
            }),
        );

        assert_eq!(host.pending_callbacks(), 1);
        assert!(host.entity(entity).unwrap().model.is_none());

        host.advance_tick();
        assert_eq!(host.pending_callbacks(), 0);
        assert_eq!(host.tick(), 1);
        assert_eq!(host.entity(entity).unwrap().model.as_deref(), Some("models/a.vmdl"));
    }

    #[test]
    fn test_permissions_and_private_chat() {
        let mut host = RecordingHost::new("de_dust2")
            .with_player(PlayerInfo::new(0, "admin", Team::Terrorist));
        host.grant_permission(PlayerSlot(0), "@css/root");

        assert!(host.player_has_permission(PlayerSlot(0), "@css/root"));
        assert!(!host.player_has_permission(PlayerSlot(0), "@css/ban"));
        assert!(!host.player_has_permission(PlayerSlot(1), "@css/root"));

        host.print_to_chat(PlayerSlot(0), "hello");
        assert_eq!(host.chat_for(PlayerSlot(0)), vec!["hello"]);
        assert!(host.broadcasts().is_empty());
    }
}
