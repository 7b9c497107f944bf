use std::time::Duration;

use tracing::{debug, info};

use crate::app::{Camera2D, DrawSurface, InputSnapshot};

use super::collision::{contact_ended, resolve_contact, ContactOutcome, ContactTarget};
use super::draw::draw_entity;
use super::entity::{Entity, EntityId, EntityIdAllocator, EntityKind, SpawnRequest};
use super::geometry::{overlaps, Vec2};
use super::monster::update_monster;
use super::player::{apply_deferred, update_player};
use super::projectile::update_projectile;
use super::room::{RoomAtlas, RoomDescriptor};
use super::schedule::{DeferredAction, EventQueue};

pub const DEFAULT_TICK_RATE_HZ: u32 = 120;

/// Side effect requested by an entity during its own update. Applied by the
/// world right after that entity's update returns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Effect {
    Spawn(SpawnRequest),
    DestroySelf,
    Schedule {
        delay: Duration,
        action: DeferredAction,
    },
}

/// The player as every entity sees it during one update phase. Taken before
/// any entity moves, so nothing observes another entity's same-tick update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerView {
    pub center: Vec2,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub updated: usize,
    pub contacts: usize,
    pub separations: usize,
    pub rendered: usize,
    pub events_fired: usize,
    pub events_dropped: usize,
    pub room_loaded: bool,
}

/// Registry of live entities plus the clock and timers that drive them.
/// Entities are addressed by [`EntityId`]; ids are never reused, so a stale
/// id simply resolves to nothing.
#[derive(Debug)]
pub struct World {
    allocator: EntityIdAllocator,
    entities: Vec<Entity>,
    pending_spawns: Vec<Entity>,
    pending_despawns: Vec<EntityId>,
    events: EventQueue,
    clock: Duration,
    tick_period: Duration,
    tick_count: u64,
    player_id: Option<EntityId>,
    atlas: RoomAtlas,
    current_room: usize,
    room_generation: u64,
    last_tick: TickStats,
}

impl World {
    /// Builds the world and loads the first room of `atlas`.
    pub fn new(atlas: RoomAtlas, tick_rate_hz: u32) -> Self {
        let mut world = Self {
            allocator: EntityIdAllocator::default(),
            entities: Vec::new(),
            pending_spawns: Vec::new(),
            pending_despawns: Vec::new(),
            events: EventQueue::default(),
            clock: Duration::ZERO,
            tick_period: tick_period(tick_rate_hz),
            tick_count: 0,
            player_id: None,
            atlas,
            current_room: 0,
            room_generation: 0,
            last_tick: TickStats::default(),
        };
        world.enter_room(0);
        world
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_tick_stats(&self) -> TickStats {
        self.last_tick
    }

    pub fn atlas(&self) -> &RoomAtlas {
        &self.atlas
    }

    pub fn current_room_index(&self) -> usize {
        self.current_room
    }

    pub fn current_room_name(&self) -> &str {
        self.atlas
            .get(self.current_room)
            .map_or("", |room| room.name.as_str())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn find_entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == id)
    }

    pub fn find_entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id == id)
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.player_id
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player_id.and_then(|id| self.find_entity(id))
    }

    pub fn pending_event_count(&self) -> usize {
        self.events.len()
    }

    /// Keeps the player's center on the viewport center.
    pub fn camera(&self) -> Camera2D {
        Camera2D {
            position: self.player().map_or(Vec2::ZERO, Entity::center),
        }
    }

    /// Queues an entity; it joins the registry on the next
    /// [`apply_pending`](Self::apply_pending).
    pub fn spawn(&mut self, request: SpawnRequest) -> EntityId {
        let id = self.allocator.allocate();
        self.pending_spawns.push(Entity::from_request(id, request));
        id
    }

    pub fn despawn(&mut self, id: EntityId) -> bool {
        if Some(id) == self.player_id {
            return false;
        }
        let exists_now = self.entities.iter().any(|entity| entity.id == id);
        let pending_spawn = self.pending_spawns.iter().any(|entity| entity.id == id);
        if !exists_now && !pending_spawn {
            return false;
        }
        self.pending_despawns.push(id);
        true
    }

    pub fn apply_pending(&mut self) {
        if !self.pending_despawns.is_empty() {
            self.pending_despawns.sort_by_key(|id| id.0);
            self.pending_despawns.dedup();
            let pending = &self.pending_despawns;
            self.entities
                .retain(|entity| pending.binary_search(&entity.id).is_err());
            self.pending_spawns
                .retain(|entity| pending.binary_search(&entity.id).is_err());
            self.pending_despawns.clear();
        }

        if !self.pending_spawns.is_empty() {
            self.entities.append(&mut self.pending_spawns);
        }
    }

    /// Replaces every entity with the contents of `room`. The player keeps
    /// its id, health and cooldowns and moves to the room's start point.
    pub fn load_room(&mut self, room: &RoomDescriptor) {
        let start = room.start_position();
        let existing = match self.player_id {
            Some(id) => self.take_entity(id),
            None => None,
        };
        let player = match existing {
            Some(mut player) => {
                player.position = start;
                player.remember_position();
                player
            }
            None => {
                let id = self.allocator.allocate();
                Entity::from_request(id, SpawnRequest::player(start))
            }
        };
        self.player_id = Some(player.id);

        self.entities.clear();
        self.pending_spawns.clear();
        self.pending_despawns.clear();
        self.entities.push(player);

        for rect in room.wall_rects() {
            self.spawn(SpawnRequest::wall(rect));
        }
        self.spawn(SpawnRequest::door(room.door_rect()));
        for node in &room.nodes {
            self.spawn(node.instantiate());
        }
        self.apply_pending();
        self.room_generation = self.room_generation.saturating_add(1);

        info!(
            room = %room.name,
            entity_count = self.entities.len(),
            start_x = start.x,
            start_y = start.y,
            "room_loaded"
        );
    }

    /// Loads room `index` of the atlas. Out-of-range indices are ignored.
    pub fn enter_room(&mut self, index: usize) -> bool {
        let Some(room) = self.atlas.get(index).cloned() else {
            return false;
        };
        self.current_room = index;
        self.load_room(&room);
        true
    }

    /// Loads the room behind the current room's door.
    pub fn enter_next_room(&mut self) {
        let next = self.atlas.next_index(self.current_room);
        self.enter_room(next);
    }

    /// One full step: clear the surface, fire due timers, update every
    /// entity, resolve contacts, then draw.
    pub fn tick(&mut self, input: &InputSnapshot, surface: &mut dyn DrawSurface) {
        self.tick_count = self.tick_count.saturating_add(1);
        self.clock = self.clock.saturating_add(self.tick_period);
        self.last_tick = TickStats::default();

        surface.clear();
        self.run_due_events();
        self.update_phase(input);
        self.collision_phase();
        self.render_phase(surface);
    }

    fn run_due_events(&mut self) {
        for event in self.events.drain_due(self.clock) {
            let applied = self
                .find_entity_mut(event.target)
                .is_some_and(|entity| apply_deferred(entity, event.action));
            if applied {
                self.last_tick.events_fired += 1;
            } else {
                self.last_tick.events_dropped += 1;
                debug!(
                    target_entity = event.target.0,
                    action = ?event.action,
                    "scheduled_event_dropped"
                );
            }
        }
    }

    fn update_phase(&mut self, input: &InputSnapshot) {
        let player = self.player_view();
        let snapshot = self.live_ids();
        let mut effects = Vec::new();

        for id in snapshot {
            let Some(entity) = self.find_entity_mut(id) else {
                continue;
            };
            entity.remember_position();
            update_entity(entity, input, player, &mut effects);
            self.last_tick.updated += 1;
            self.apply_effects(id, &mut effects);
            self.apply_pending();
        }
    }

    fn apply_effects(&mut self, source: EntityId, effects: &mut Vec<Effect>) {
        for effect in effects.drain(..) {
            match effect {
                Effect::Spawn(request) => {
                    let kind = request.kind.name();
                    let spawned = self.spawn(request);
                    debug!(source = source.0, spawned = spawned.0, kind, "entity_spawned");
                }
                Effect::DestroySelf => {
                    if self.despawn(source) {
                        debug!(entity = source.0, "entity_destroyed");
                    }
                }
                Effect::Schedule { delay, action } => {
                    let due = self.clock.saturating_add(delay);
                    self.events.schedule(due, source, action);
                }
            }
        }
    }

    fn collision_phase(&mut self) {
        let generation = self.room_generation;
        let snapshot = self.live_ids();

        for &a in &snapshot {
            for &b in &snapshot {
                if a == b {
                    continue;
                }
                if self.room_generation != generation {
                    return;
                }
                let Some(other) = self.find_entity(b).and_then(ContactTarget::of) else {
                    continue;
                };
                let Some(entity) = self.find_entity_mut(a) else {
                    break;
                };
                if !entity.collidable() {
                    break;
                }
                if overlaps(&entity.rect(), &other.rect) {
                    let outcome = resolve_contact(entity, &other);
                    self.last_tick.contacts += 1;
                    self.apply_contact(a, outcome);
                } else {
                    contact_ended(entity, &other);
                    self.last_tick.separations += 1;
                }
            }
        }
    }

    fn apply_contact(&mut self, source: EntityId, outcome: ContactOutcome) {
        match outcome {
            ContactOutcome::Ignored | ContactOutcome::Blocked => {}
            ContactOutcome::EnteredDoor => {
                info!(from_room = self.current_room_name(), "door_entered");
                self.enter_next_room();
                self.last_tick.room_loaded = true;
            }
            ContactOutcome::Hit { target, damage } => {
                if let Some(body) = self
                    .find_entity_mut(target)
                    .and_then(|entity| entity.body_mut())
                {
                    body.apply_damage(damage);
                    debug!(
                        target_entity = target.0,
                        damage,
                        health = body.health,
                        "entity_damaged"
                    );
                }
                self.despawn(source);
                self.apply_pending();
            }
        }
    }

    fn render_phase(&mut self, surface: &mut dyn DrawSurface) {
        let camera = self.camera();
        for entity in &self.entities {
            draw_entity(entity, &camera, surface);
        }
        self.last_tick.rendered = self.entities.len();
    }

    fn player_view(&self) -> Option<PlayerView> {
        self.player().map(|player| PlayerView {
            center: player.center(),
            speed: player.speed,
        })
    }

    fn live_ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|entity| entity.id).collect()
    }

    fn take_entity(&mut self, id: EntityId) -> Option<Entity> {
        let index = self.entities.iter().position(|entity| entity.id == id)?;
        Some(self.entities.remove(index))
    }

    #[cfg(test)]
    pub(crate) fn schedule_event(
        &mut self,
        delay: Duration,
        target: EntityId,
        action: DeferredAction,
    ) {
        let due = self.clock.saturating_add(delay);
        self.events.schedule(due, target, action);
    }
}

fn tick_period(tick_rate_hz: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate_hz.max(1)))
}

/// Bodies other than the player die at zero health and leave a fresh
/// monster at the world origin.
fn update_entity(
    entity: &mut Entity,
    input: &InputSnapshot,
    player: Option<PlayerView>,
    effects: &mut Vec<Effect>,
) {
    let expired = !entity.is_player() && entity.body().is_some_and(|body| body.is_depleted());
    if expired {
        effects.push(Effect::DestroySelf);
        effects.push(Effect::Spawn(SpawnRequest::monster(Vec2::ZERO)));
        return;
    }
    match entity.kind {
        EntityKind::Player(_) => update_player(entity, input, effects),
        EntityKind::Monster(_) => update_monster(entity, player),
        EntityKind::Projectile(_) => update_projectile(entity, input, player),
        EntityKind::Wall | EntityKind::Door | EntityKind::Label { .. } => {}
    }
}
