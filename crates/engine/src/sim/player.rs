use std::f32::consts::FRAC_1_SQRT_2;
use std::time::Duration;

use tracing::debug;

use super::entity::{Entity, EntityKind, SpawnRequest};
use super::geometry::Vec2;
use super::schedule::DeferredAction;
use super::world::Effect;
use crate::app::{InputAction, InputSnapshot};

pub const PLAYER_SIZE: Vec2 = Vec2::new(10.0, 20.0);
pub const PLAYER_SPEED: f32 = 3.0;
pub const DASH_SPEED: f32 = 10.0;
pub const DASH_DURATION: Duration = Duration::from_millis(200);
pub const DASH_COOLDOWN: Duration = Duration::from_millis(2000);
pub const SKILL_COOLDOWN: Duration = Duration::from_millis(1000);

// cos 45°. Diagonal speed lands near, not exactly on, axial speed.
const DIAGONAL_SCALE: f32 = FRAC_1_SQRT_2;

pub(crate) fn update_player(entity: &mut Entity, input: &InputSnapshot, effects: &mut Vec<Effect>) {
    apply_movement(entity, input);

    let EntityKind::Player(state) = &mut entity.kind else {
        return;
    };

    if input.is_down(InputAction::Dash) && !state.dashing {
        state.dashing = true;
        effects.push(Effect::Schedule {
            delay: DASH_DURATION,
            action: DeferredAction::EndDash {
                restore_speed: entity.speed,
            },
        });
        effects.push(Effect::Schedule {
            delay: DASH_COOLDOWN,
            action: DeferredAction::DashReady,
        });
        entity.speed = DASH_SPEED;
        debug!(entity = entity.id.0, "dash_started");
    }

    if input.is_down(InputAction::Skill) && !state.skill_on_cooldown {
        state.skill_on_cooldown = true;
        effects.push(Effect::Schedule {
            delay: SKILL_COOLDOWN,
            action: DeferredAction::SkillReady,
        });
        let origin = entity.position.offset(entity.size.x * 0.5, entity.size.y * 0.5);
        effects.push(Effect::Spawn(SpawnRequest::projectile(origin)));
        debug!(entity = entity.id.0, "skill_cast");
    }
}

fn apply_movement(entity: &mut Entity, input: &InputSnapshot) {
    let up = input.is_down(InputAction::MoveUp);
    let down = input.is_down(InputAction::MoveDown);
    let left = input.is_down(InputAction::MoveLeft);
    let right = input.is_down(InputAction::MoveRight);

    let scale = if (up || down) && (left || right) {
        DIAGONAL_SCALE
    } else {
        1.0
    };
    let step = entity.speed * scale;

    if up {
        entity.position.y -= step;
    }
    if down {
        entity.position.y += step;
    }
    if left {
        entity.position.x -= step;
    }
    if right {
        entity.position.x += step;
    }
}

/// Applies a drained timer to the player. Returns false when the action has
/// nothing to act on.
pub(crate) fn apply_deferred(entity: &mut Entity, action: DeferredAction) -> bool {
    let EntityKind::Player(state) = &mut entity.kind else {
        return false;
    };
    match action {
        DeferredAction::EndDash { restore_speed } => entity.speed = restore_speed,
        DeferredAction::DashReady => state.dashing = false,
        DeferredAction::SkillReady => state.skill_on_cooldown = false,
    }
    true
}
