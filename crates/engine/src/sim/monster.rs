use super::entity::Entity;
use super::geometry::{angle_degrees, distance, heading_vector, Vec2};
use super::world::PlayerView;

pub const MONSTER_SIZE: Vec2 = Vec2::new(20.0, 20.0);
pub const MONSTER_SPEED: f32 = 1.0;
pub const MONSTER_SIGHT_RANGE: f32 = 200.0;
pub const MONSTER_HOLD_OUTER: f32 = 40.0;
pub const MONSTER_HOLD_INNER: f32 = 35.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonsterIntent {
    Idle,
    Approach,
    Hold,
    Retreat,
}

/// Picks the monster's move from the center-to-center distance to the
/// player. The hold band `[35, 40]` keeps the monster from oscillating
/// around a single threshold.
pub fn monster_intent(distance_to_player: f32) -> MonsterIntent {
    if distance_to_player > MONSTER_SIGHT_RANGE {
        MonsterIntent::Idle
    } else if distance_to_player > MONSTER_HOLD_OUTER {
        MonsterIntent::Approach
    } else if distance_to_player >= MONSTER_HOLD_INNER {
        MonsterIntent::Hold
    } else {
        MonsterIntent::Retreat
    }
}

pub(crate) fn update_monster(entity: &mut Entity, player: Option<PlayerView>) {
    let Some(player) = player else {
        return;
    };
    let center = entity.center();
    let scale = match monster_intent(distance(center, player.center)) {
        MonsterIntent::Idle | MonsterIntent::Hold => return,
        MonsterIntent::Approach => entity.speed,
        // Backs off faster the faster the player is moving.
        MonsterIntent::Retreat => -entity.speed * player.speed,
    };
    let heading = heading_vector(angle_degrees(center, player.center));
    entity.position.x += heading.x * scale;
    entity.position.y += heading.y * scale;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityId, SpawnRequest};
    use crate::sim::player::PLAYER_SPEED;

    fn monster_centered_at(center: Vec2) -> Entity {
        Entity::from_request(
            EntityId(3),
            SpawnRequest::monster(center.offset(-MONSTER_SIZE.x * 0.5, -MONSTER_SIZE.y * 0.5)),
        )
    }

    fn view(center: Vec2) -> Option<PlayerView> {
        Some(PlayerView {
            center,
            speed: PLAYER_SPEED,
        })
    }

    #[test]
    fn intent_bands() {
        assert_eq!(monster_intent(250.0), MonsterIntent::Idle);
        assert_eq!(monster_intent(200.0), MonsterIntent::Approach);
        assert_eq!(monster_intent(40.5), MonsterIntent::Approach);
        assert_eq!(monster_intent(40.0), MonsterIntent::Hold);
        assert_eq!(monster_intent(37.0), MonsterIntent::Hold);
        assert_eq!(monster_intent(35.0), MonsterIntent::Hold);
        assert_eq!(monster_intent(34.9), MonsterIntent::Retreat);
        assert_eq!(monster_intent(0.0), MonsterIntent::Retreat);
    }

    #[test]
    fn approaches_at_own_speed() {
        let mut monster = monster_centered_at(Vec2::new(100.0, 0.0));
        update_monster(&mut monster, view(Vec2::ZERO));

        let center = monster.center();
        assert!((center.x - 99.0).abs() < 1e-4);
        assert!(center.y.abs() < 1e-4);
    }

    #[test]
    fn retreat_scales_with_player_speed() {
        let mut monster = monster_centered_at(Vec2::new(0.0, 25.0));
        update_monster(&mut monster, view(Vec2::ZERO));

        let center = monster.center();
        assert!(center.x.abs() < 1e-4);
        assert!((center.y - (25.0 + PLAYER_SPEED)).abs() < 1e-4);
    }

    #[test]
    fn dead_zone_and_idle_do_not_move() {
        for offset in [37.0, 250.0] {
            let mut monster = monster_centered_at(Vec2::new(offset, 0.0));
            let before = monster.position;
            update_monster(&mut monster, view(Vec2::ZERO));
            assert_eq!(monster.position, before);
        }
    }

    #[test]
    fn no_player_means_no_movement() {
        let mut monster = monster_centered_at(Vec2::new(10.0, 0.0));
        let before = monster.position;
        update_monster(&mut monster, None);
        assert_eq!(monster.position, before);
    }
}
