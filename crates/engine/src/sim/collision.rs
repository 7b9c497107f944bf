use super::entity::{Entity, EntityId, EntityKind, ProjectilePhase};
use super::geometry::{overlaps, Rect};
use super::projectile::PROJECTILE_DAMAGE;

/// What the other side of a contact looks like to the entity reacting to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRole {
    Blocker { door: bool },
    Player,
    Monster,
    Projectile,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactTarget {
    pub id: EntityId,
    pub rect: Rect,
    pub role: ContactRole,
}

impl ContactTarget {
    /// None for entities that never take part in collision checks.
    pub fn of(entity: &Entity) -> Option<Self> {
        if !entity.collidable() {
            return None;
        }
        let role = match &entity.kind {
            EntityKind::Wall => ContactRole::Blocker { door: false },
            EntityKind::Door => ContactRole::Blocker { door: true },
            EntityKind::Player(_) => ContactRole::Player,
            EntityKind::Monster(_) => ContactRole::Monster,
            EntityKind::Projectile(_) => ContactRole::Projectile,
            EntityKind::Label { .. } => return None,
        };
        Some(Self {
            id: entity.id,
            rect: entity.rect(),
            role,
        })
    }

    fn stops_movement(&self) -> bool {
        matches!(
            self.role,
            ContactRole::Blocker { .. } | ContactRole::Player | ContactRole::Monster
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    Ignored,
    Blocked,
    EnteredDoor,
    Hit { target: EntityId, damage: f32 },
}

/// Reaction of `entity` to overlapping `other` this tick.
pub fn resolve_contact(entity: &mut Entity, other: &ContactTarget) -> ContactOutcome {
    let fired_projectile = matches!(
        &entity.kind,
        EntityKind::Projectile(state) if state.phase == ProjectilePhase::Fired
    );
    if fired_projectile {
        return match other.role {
            ContactRole::Monster | ContactRole::Blocker { .. } => ContactOutcome::Hit {
                target: other.id,
                damage: PROJECTILE_DAMAGE,
            },
            ContactRole::Player | ContactRole::Projectile => ContactOutcome::Ignored,
        };
    }

    let is_body = matches!(entity.kind, EntityKind::Player(_) | EntityKind::Monster(_));
    if !is_body || !other.stops_movement() {
        return ContactOutcome::Ignored;
    }
    revert_out_of(entity, &other.rect);
    if entity.is_player() && other.role == (ContactRole::Blocker { door: true }) {
        ContactOutcome::EnteredDoor
    } else {
        ContactOutcome::Blocked
    }
}

/// Hook for a pair that is not overlapping this tick. Fires every tick the
/// pair is apart, not only on separation.
pub fn contact_ended(_entity: &mut Entity, _other: &ContactTarget) {}

/// Undoes this tick's movement until `entity` no longer overlaps `obstacle`.
/// Reverting x alone is tried first, then y alone so the entity can slide
/// along a wall. If neither clears it the entity goes back to where it
/// started the tick.
pub fn revert_out_of(entity: &mut Entity, obstacle: &Rect) {
    let moved = entity.position;
    let previous = entity.previous_position;

    entity.position.x = previous.x;
    if !overlaps(&entity.rect(), obstacle) {
        return;
    }

    entity.position.x = moved.x;
    entity.position.y = previous.y;
    if !overlaps(&entity.rect(), obstacle) {
        return;
    }

    entity.position = previous;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::SpawnRequest;
    use crate::sim::geometry::Vec2;

    fn wall(rect: Rect) -> ContactTarget {
        ContactTarget {
            id: EntityId(100),
            rect,
            role: ContactRole::Blocker { door: false },
        }
    }

    fn moved_player(from: Vec2, to: Vec2) -> Entity {
        let mut player = Entity::from_request(EntityId(1), SpawnRequest::player(from));
        player.position = to;
        player
    }

    #[test]
    fn reverting_x_clears_side_wall() {
        let obstacle = Rect::new(-200.0, 50.0, 5.0, 100.0);
        let mut player = moved_player(Vec2::new(-192.0, 95.0), Vec2::new(-195.0, 95.0));

        assert_eq!(resolve_contact(&mut player, &wall(obstacle)), ContactOutcome::Blocked);
        assert_eq!(player.position, Vec2::new(-192.0, 95.0));
        assert!(!overlaps(&player.rect(), &obstacle));
    }

    #[test]
    fn diagonal_into_floor_slides_along_x() {
        let obstacle = Rect::new(-100.0, 30.0, 200.0, 5.0);
        let mut player = moved_player(Vec2::new(0.0, 8.0), Vec2::new(2.0, 11.0));

        revert_out_of(&mut player, &obstacle);

        assert_eq!(player.position, Vec2::new(2.0, 8.0));
        assert!(!overlaps(&player.rect(), &obstacle));
    }

    #[test]
    fn overlap_that_predates_the_move_falls_back_to_previous_position() {
        let obstacle = Rect::new(0.0, 0.0, 30.0, 30.0);
        let mut player = moved_player(Vec2::new(5.0, 5.0), Vec2::new(8.0, 9.0));

        revert_out_of(&mut player, &obstacle);

        assert_eq!(player.position, Vec2::new(5.0, 5.0));
    }

    #[test]
    fn player_entering_door_reports_it() {
        let mut player = moved_player(Vec2::new(0.0, 0.0), Vec2::new(0.0, -3.0));
        let door = ContactTarget {
            id: EntityId(7),
            rect: Rect::new(-5.0, -10.0, 20.0, 8.0),
            role: ContactRole::Blocker { door: true },
        };

        assert_eq!(resolve_contact(&mut player, &door), ContactOutcome::EnteredDoor);
        assert_eq!(player.position, Vec2::new(0.0, 0.0));
    }

    #[test]
    fn fired_projectile_hits_monsters_and_walls_only() {
        let mut projectile =
            Entity::from_request(EntityId(2), SpawnRequest::projectile(Vec2::ZERO));
        if let EntityKind::Projectile(state) = &mut projectile.kind {
            state.phase = ProjectilePhase::Fired;
        }
        let monster = ContactTarget {
            id: EntityId(9),
            rect: Rect::new(0.0, 0.0, 20.0, 20.0),
            role: ContactRole::Monster,
        };
        let player = ContactTarget {
            role: ContactRole::Player,
            ..monster
        };

        assert_eq!(
            resolve_contact(&mut projectile, &monster),
            ContactOutcome::Hit {
                target: EntityId(9),
                damage: PROJECTILE_DAMAGE
            }
        );
        assert_eq!(
            resolve_contact(&mut projectile, &wall(monster.rect)),
            ContactOutcome::Hit {
                target: EntityId(100),
                damage: PROJECTILE_DAMAGE
            }
        );
        assert_eq!(resolve_contact(&mut projectile, &player), ContactOutcome::Ignored);
    }

    #[test]
    fn monster_reverts_out_of_other_bodies() {
        for role in [ContactRole::Player, ContactRole::Monster] {
            let mut monster =
                Entity::from_request(EntityId(3), SpawnRequest::monster(Vec2::ZERO));
            monster.position = Vec2::new(3.0, 0.0);
            let body = ContactTarget {
                id: EntityId(5),
                rect: Rect::new(22.0, 0.0, 20.0, 20.0),
                role,
            };

            assert_eq!(resolve_contact(&mut monster, &body), ContactOutcome::Blocked);
            assert_eq!(monster.position, Vec2::ZERO);
            assert!(!overlaps(&monster.rect(), &body.rect));
        }
    }

    #[test]
    fn bodies_ignore_projectiles() {
        let mut monster = Entity::from_request(EntityId(3), SpawnRequest::monster(Vec2::ZERO));
        monster.position = Vec2::new(1.0, 1.0);
        let projectile = ContactTarget {
            id: EntityId(4),
            rect: Rect::new(5.0, 5.0, 1.0, 1.0),
            role: ContactRole::Projectile,
        };

        assert_eq!(resolve_contact(&mut monster, &projectile), ContactOutcome::Ignored);
        assert_eq!(monster.position, Vec2::new(1.0, 1.0));
    }
}
