use super::geometry::{Rect, Vec2};
use super::monster::{MONSTER_SIZE, MONSTER_SPEED};
use super::player::{PLAYER_SIZE, PLAYER_SPEED};
use super::projectile::{PROJECTILE_SIZE, PROJECTILE_SPEED};

pub const BODY_STARTING_HEALTH: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

#[derive(Debug, Default)]
pub struct EntityIdAllocator {
    next: u64,
}

impl EntityIdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Health carried by damageable entities. There is no upper clamp: anything
/// that raises `health` past [`BODY_STARTING_HEALTH`] keeps the excess.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub health: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            health: BODY_STARTING_HEALTH,
        }
    }
}

impl Body {
    pub fn apply_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub fn is_depleted(&self) -> bool {
        self.health <= 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerState {
    pub body: Body,
    pub dashing: bool,
    pub skill_on_cooldown: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonsterState {
    pub body: Body,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectilePhase {
    Guided,
    Fired,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileState {
    pub phase: ProjectilePhase,
    pub angle_degrees: f32,
}

impl Default for ProjectileState {
    fn default() -> Self {
        Self {
            phase: ProjectilePhase::Guided,
            angle_degrees: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    Wall,
    Door,
    Player(PlayerState),
    Monster(MonsterState),
    Projectile(ProjectileState),
    Label { text: String },
}

impl EntityKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Player(_) => "player",
            Self::Monster(_) => "monster",
            Self::Projectile(_) => "projectile",
            Self::Label { .. } => "label",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub previous_position: Vec2,
    pub kind: EntityKind,
}

impl Entity {
    pub(crate) fn from_request(id: EntityId, request: SpawnRequest) -> Self {
        Self {
            id,
            position: request.position,
            size: request.size,
            speed: request.speed,
            previous_position: request.position,
            kind: request.kind,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn collidable(&self) -> bool {
        match &self.kind {
            EntityKind::Label { .. } => false,
            EntityKind::Projectile(state) => state.phase == ProjectilePhase::Fired,
            EntityKind::Wall
            | EntityKind::Door
            | EntityKind::Player(_)
            | EntityKind::Monster(_) => true,
        }
    }

    /// Walls and doors stop movement.
    pub fn is_blocker(&self) -> bool {
        matches!(self.kind, EntityKind::Wall | EntityKind::Door)
    }

    pub fn is_door(&self) -> bool {
        matches!(self.kind, EntityKind::Door)
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, EntityKind::Player(_))
    }

    pub fn body(&self) -> Option<&Body> {
        match &self.kind {
            EntityKind::Player(state) => Some(&state.body),
            EntityKind::Monster(state) => Some(&state.body),
            _ => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut Body> {
        match &mut self.kind {
            EntityKind::Player(state) => Some(&mut state.body),
            EntityKind::Monster(state) => Some(&mut state.body),
            _ => None,
        }
    }

    pub(crate) fn remember_position(&mut self) {
        self.previous_position = self.position;
    }
}

/// An entity that has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnRequest {
    pub kind: EntityKind,
    pub position: Vec2,
    pub size: Vec2,
    pub speed: f32,
}

impl SpawnRequest {
    pub fn wall(rect: Rect) -> Self {
        Self::fixed(EntityKind::Wall, rect)
    }

    pub fn door(rect: Rect) -> Self {
        Self::fixed(EntityKind::Door, rect)
    }

    pub fn player(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Player(PlayerState::default()),
            position,
            size: PLAYER_SIZE,
            speed: PLAYER_SPEED,
        }
    }

    pub fn monster(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Monster(MonsterState::default()),
            position,
            size: MONSTER_SIZE,
            speed: MONSTER_SPEED,
        }
    }

    pub fn projectile(position: Vec2) -> Self {
        Self {
            kind: EntityKind::Projectile(ProjectileState::default()),
            position,
            size: PROJECTILE_SIZE,
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn label(position: Vec2, text: impl Into<String>) -> Self {
        Self {
            kind: EntityKind::Label { text: text.into() },
            position,
            size: Vec2::ZERO,
            speed: 0.0,
        }
    }

    fn fixed(kind: EntityKind, rect: Rect) -> Self {
        Self {
            kind,
            position: Vec2::new(rect.x, rect.y),
            size: Vec2::new(rect.w, rect.h),
            speed: 0.0,
        }
    }
}
