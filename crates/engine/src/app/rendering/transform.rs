use crate::sim::{Rect, Vec2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

/// World point shown at the center of the viewport.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Camera2D {
    pub position: Vec2,
}

pub fn world_to_screen(world: Vec2, camera: &Camera2D, viewport: Viewport) -> Vec2 {
    let half = viewport.half_extent();
    Vec2::new(
        world.x - camera.position.x + half.x,
        world.y - camera.position.y + half.y,
    )
}

pub fn world_rect_to_screen(rect: Rect, camera: &Camera2D, viewport: Viewport) -> Rect {
    let origin = world_to_screen(Vec2::new(rect.x, rect.y), camera, viewport);
    Rect::new(origin.x, origin.y, rect.w, rect.h)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 800,
        height: 600,
    };

    #[test]
    fn camera_position_maps_to_viewport_center() {
        let camera = Camera2D {
            position: Vec2::new(-145.0, 105.0),
        };
        assert_eq!(
            world_to_screen(camera.position, &camera, VIEWPORT),
            Vec2::new(400.0, 300.0)
        );
    }

    #[test]
    fn camera_offset_shifts_screen_position() {
        let camera = Camera2D {
            position: Vec2::new(10.0, -5.0),
        };
        let screen = world_to_screen(Vec2::new(12.0, -4.0), &camera, VIEWPORT);
        assert_eq!(screen, Vec2::new(402.0, 301.0));
    }

    #[test]
    fn rect_keeps_its_size() {
        let rect = world_rect_to_screen(
            Rect::new(0.0, 0.0, 20.0, 5.0),
            &Camera2D::default(),
            VIEWPORT,
        );
        assert_eq!(rect, Rect::new(400.0, 300.0, 20.0, 5.0));
    }
}
