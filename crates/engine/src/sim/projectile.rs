use tracing::debug;

use super::entity::{Entity, EntityKind, ProjectilePhase};
use super::geometry::{angle_degrees, heading_vector, Vec2};
use super::world::PlayerView;
use crate::app::InputSnapshot;

pub const PROJECTILE_SIZE: Vec2 = Vec2::new(1.0, 1.0);
pub const PROJECTILE_SPEED: f32 = 6.0;
pub const PROJECTILE_DAMAGE: f32 = 50.0;
pub const AIM_LINE_LENGTH: f32 = 100.0;
pub const TRAIL_LENGTH: f32 = 20.0;

/// Guided projectiles ride on the player's center and track the cursor until
/// the mouse is held, then fly straight along the last aimed heading.
pub(crate) fn update_projectile(
    entity: &mut Entity,
    input: &InputSnapshot,
    player: Option<PlayerView>,
) {
    let EntityKind::Projectile(state) = &mut entity.kind else {
        return;
    };
    match state.phase {
        ProjectilePhase::Guided => {
            if let Some(player) = player {
                let offset = input.mouse_camera_relative();
                let target = player.center.offset(offset.x, offset.y);
                state.angle_degrees = angle_degrees(player.center, target);
                entity.position = player.center;
            }
            if input.mouse_held() {
                state.phase = ProjectilePhase::Fired;
                debug!(
                    entity = entity.id.0,
                    angle = state.angle_degrees,
                    "projectile_fired"
                );
            }
        }
        ProjectilePhase::Fired => {
            let heading = heading_vector(state.angle_degrees);
            entity.position.x += heading.x * entity.speed;
            entity.position.y += heading.y * entity.speed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, SpawnRequest};

    fn projectile() -> Entity {
        Entity::from_request(EntityId(5), SpawnRequest::projectile(Vec2::ZERO))
    }

    fn phase(entity: &Entity) -> ProjectilePhase {
        match &entity.kind {
            EntityKind::Projectile(state) => state.phase,
            other => panic!("expected projectile, got {}", other.name()),
        }
    }

    fn player_view() -> Option<PlayerView> {
        Some(PlayerView {
            center: Vec2::new(50.0, 50.0),
            speed: 3.0,
        })
    }

    #[test]
    fn guided_projectile_follows_player_and_cursor() {
        let mut entity = projectile();
        let input = InputSnapshot::empty()
            .with_window_size((800, 600))
            .with_cursor_position_px(Some(Vec2::new(400.0, 400.0)));

        update_projectile(&mut entity, &input, player_view());

        assert_eq!(entity.position, Vec2::new(50.0, 50.0));
        assert_eq!(phase(&entity), ProjectilePhase::Guided);
        match &entity.kind {
            EntityKind::Projectile(state) => assert!((state.angle_degrees - 90.0).abs() < 1e-4),
            _ => unreachable!(),
        }
    }

    #[test]
    fn mouse_hold_fires_then_flies_straight() {
        let mut entity = projectile();
        let input = InputSnapshot::empty()
            .with_window_size((800, 600))
            .with_cursor_position_px(Some(Vec2::new(500.0, 300.0)))
            .with_mouse_held(true);

        update_projectile(&mut entity, &input, player_view());
        assert_eq!(phase(&entity), ProjectilePhase::Fired);
        assert_eq!(entity.position, Vec2::new(50.0, 50.0));

        // Once fired the cursor no longer steers it.
        let steer = InputSnapshot::empty()
            .with_window_size((800, 600))
            .with_cursor_position_px(Some(Vec2::new(400.0, 0.0)));
        update_projectile(&mut entity, &steer, player_view());
        update_projectile(&mut entity, &steer, player_view());

        assert!((entity.position.x - (50.0 + 2.0 * PROJECTILE_SPEED)).abs() < 1e-4);
        assert!((entity.position.y - 50.0).abs() < 1e-4);
    }
}
