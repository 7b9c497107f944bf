mod collision;
mod draw;
mod entity;
mod geometry;
mod monster;
mod player;
mod projectile;
mod room;
mod schedule;
mod world;


pub use collision::{
    contact_ended, resolve_contact, revert_out_of, ContactOutcome, ContactRole, ContactTarget,
};
pub use draw::{draw_entity, health_bar_rects};
pub use entity::{
    Body, Entity, EntityId, EntityIdAllocator, EntityKind, MonsterState, PlayerState,
    ProjectilePhase, ProjectileState, SpawnRequest, BODY_STARTING_HEALTH,
};
pub use geometry::{angle_degrees, distance, heading_vector, overlaps, Rect, Vec2};
pub use monster::{
    monster_intent, MonsterIntent, MONSTER_HOLD_INNER, MONSTER_HOLD_OUTER, MONSTER_SIGHT_RANGE,
    MONSTER_SIZE, MONSTER_SPEED,
};
pub use player::{
    DASH_COOLDOWN, DASH_DURATION, DASH_SPEED, PLAYER_SIZE, PLAYER_SPEED, SKILL_COOLDOWN,
};
pub use projectile::{
    AIM_LINE_LENGTH, PROJECTILE_DAMAGE, PROJECTILE_SIZE, PROJECTILE_SPEED, TRAIL_LENGTH,
};
pub use room::{derive_walls, EntityBlueprint, RoomAtlas, RoomDescriptor, RoomError, WALL_THICKNESS};
pub use schedule::{DeferredAction, EventQueue, ScheduledEvent};
pub use world::{PlayerView, TickStats, World, DEFAULT_TICK_RATE_HZ};
