use crate::app::{world_rect_to_screen, world_to_screen, Camera2D, DrawSurface, BLACK, GREEN, RED};

use super::entity::{Body, Entity, EntityKind, ProjectilePhase, BODY_STARTING_HEALTH};
use super::geometry::{heading_vector, Rect, Vec2};
use super::projectile::{AIM_LINE_LENGTH, TRAIL_LENGTH};

pub const HEALTH_BAR_WIDTH: f32 = 32.0;
pub const HEALTH_BAR_HEIGHT: f32 = 4.0;
pub const HEALTH_BAR_GAP: f32 = 8.0;
pub const PROJECTILE_LINE_WIDTH: f32 = 3.0;

pub fn draw_entity(entity: &Entity, camera: &Camera2D, surface: &mut dyn DrawSurface) {
    let viewport = surface.viewport();
    let screen = world_rect_to_screen(entity.rect(), camera, viewport);
    match &entity.kind {
        EntityKind::Wall => surface.fill_rect(screen, BLACK),
        EntityKind::Door => {
            surface.fill_rect(screen, GREEN);
            surface.stroke_rect(screen, BLACK);
        }
        EntityKind::Player(state) => {
            draw_health_bar(&state.body, screen, surface);
            surface.stroke_rect(screen, BLACK);
        }
        EntityKind::Monster(state) => {
            draw_health_bar(&state.body, screen, surface);
            surface.fill_rect(screen, RED);
        }
        EntityKind::Projectile(state) => {
            let origin = world_to_screen(entity.position, camera, viewport);
            let heading = heading_vector(state.angle_degrees);
            match state.phase {
                ProjectilePhase::Guided => {
                    let tip = Vec2::new(
                        origin.x + heading.x * AIM_LINE_LENGTH,
                        origin.y + heading.y * AIM_LINE_LENGTH,
                    );
                    surface.line(origin, tip, PROJECTILE_LINE_WIDTH, BLACK);
                }
                ProjectilePhase::Fired => {
                    let tail = Vec2::new(
                        origin.x - heading.x * TRAIL_LENGTH,
                        origin.y - heading.y * TRAIL_LENGTH,
                    );
                    surface.line(tail, origin, PROJECTILE_LINE_WIDTH, RED);
                }
            }
        }
        EntityKind::Label { text } => {
            surface.text(world_to_screen(entity.position, camera, viewport), text, BLACK);
        }
    }
}

/// Bar frame sits centered above the body; the fill shrinks with health.
pub fn health_bar_rects(body: &Body, screen: Rect) -> (Rect, Rect) {
    let frame = Rect::new(
        screen.x + (screen.w - HEALTH_BAR_WIDTH) * 0.5,
        screen.y - HEALTH_BAR_GAP,
        HEALTH_BAR_WIDTH,
        HEALTH_BAR_HEIGHT,
    );
    let ratio = (body.health / BODY_STARTING_HEALTH).max(0.0);
    let fill = Rect::new(
        frame.x,
        frame.y,
        HEALTH_BAR_WIDTH * ratio,
        HEALTH_BAR_HEIGHT,
    );
    (frame, fill)
}

fn draw_health_bar(body: &Body, screen: Rect, surface: &mut dyn DrawSurface) {
    let (frame, fill) = health_bar_rects(body, screen);
    surface.fill_rect(fill, RED);
    surface.stroke_rect(frame, BLACK);
}
