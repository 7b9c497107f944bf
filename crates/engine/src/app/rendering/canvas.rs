use crate::sim::{Rect, Vec2};

use super::font::{glyph_for, Glyph, GLYPH_HEIGHT, GLYPH_WIDTH, SPACE_GLYPH};
use super::surface::{DrawSurface, Rgba, CLEAR_COLOR};
use super::Viewport;

pub(crate) const TEXT_SCALE: i32 = 2;
pub(crate) const GLYPH_ADVANCE: i32 = (GLYPH_WIDTH + 1) * TEXT_SCALE;
pub(crate) const LINE_ADVANCE: i32 = (GLYPH_HEIGHT + 2) * TEXT_SCALE;
const MAX_LINE_WIDTH: f32 = 64.0;
const MAX_LINE_STEPS: f32 = 16_384.0;

/// Rasterizes draw calls into an RGBA8 frame buffer of `width * height`
/// pixels. Everything is clipped to the frame.
pub struct FrameCanvas<'a> {
    frame: &'a mut [u8],
    width: u32,
    height: u32,
}

impl<'a> FrameCanvas<'a> {
    pub fn new(frame: &'a mut [u8], width: u32, height: u32) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn fill_px(&mut self, x: i32, y: i32, w: i32, h: i32, color: Rgba) {
        let start_x = x.max(0);
        let start_y = y.max(0);
        let end_x = x.saturating_add(w).min(self.width as i32);
        let end_y = y.saturating_add(h).min(self.height as i32);
        if end_x <= start_x || end_y <= start_y {
            return;
        }
        for py in start_y..end_y {
            for px in start_x..end_x {
                write_pixel_rgba_clipped(self.frame, self.width as usize, px, py, color);
            }
        }
    }

    fn draw_glyph(&mut self, x: i32, y: i32, glyph: Glyph, color: Rgba) {
        for (row_index, row_bits) in glyph.rows.iter().enumerate() {
            let glyph_y = y.saturating_add(row_index as i32 * TEXT_SCALE);
            for col in 0..GLYPH_WIDTH {
                if (row_bits & (1 << (GLYPH_WIDTH - 1 - col))) == 0 {
                    continue;
                }
                let glyph_x = x.saturating_add(col * TEXT_SCALE);
                self.fill_px(glyph_x, glyph_y, TEXT_SCALE, TEXT_SCALE, color);
            }
        }
    }
}

impl DrawSurface for FrameCanvas<'_> {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    fn clear(&mut self) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&CLEAR_COLOR);
        }
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x, y, w, h)) = rect_to_px(rect) else {
            return;
        };
        self.fill_px(x, y, w, h, color);
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        let Some((x, y, w, h)) = rect_to_px(rect) else {
            return;
        };
        if w <= 1 || h <= 1 {
            self.fill_px(x, y, w.max(1), h.max(1), color);
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);
        self.fill_px(x, y, w, 1, color);
        self.fill_px(x, bottom, w, 1, color);
        self.fill_px(x, y, 1, h, color);
        self.fill_px(right, y, 1, h, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if !(from.x.is_finite() && from.y.is_finite() && to.x.is_finite() && to.y.is_finite()) {
            return;
        }
        let brush = width.round().clamp(1.0, MAX_LINE_WIDTH) as i32;
        let half = brush / 2;
        let reach = brush as f32;
        let off_screen = from.x.max(to.x) < -reach
            || from.y.max(to.y) < -reach
            || from.x.min(to.x) > self.width as f32 + reach
            || from.y.min(to.y) > self.height as f32 + reach;
        if off_screen {
            return;
        }
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, MAX_LINE_STEPS) as i32;
        for step in 0..=steps {
            let t = step as f32 / steps as f32;
            let x = (from.x + dx * t).round() as i32;
            let y = (from.y + dy * t).round() as i32;
            self.fill_px(
                x.saturating_sub(half),
                y.saturating_sub(half),
                brush,
                brush,
                color,
            );
        }
    }

    fn text(&mut self, at: Vec2, text: &str, color: Rgba) {
        if !(at.x.is_finite() && at.y.is_finite()) {
            return;
        }
        let mut x = at.x.round() as i32;
        let y = at.y.round() as i32;
        for ch in text.chars() {
            let glyph = glyph_for(ch).unwrap_or(SPACE_GLYPH);
            self.draw_glyph(x, y, glyph, color);
            x = x.saturating_add(GLYPH_ADVANCE);
        }
    }
}

// `as` saturates, so far off-screen values clip instead of wrapping.
fn rect_to_px(rect: Rect) -> Option<(i32, i32, i32, i32)> {
    let finite =
        rect.x.is_finite() && rect.y.is_finite() && rect.w.is_finite() && rect.h.is_finite();
    if !finite {
        return None;
    }
    Some((
        rect.x.round() as i32,
        rect.y.round() as i32,
        rect.w.round() as i32,
        rect.h.round() as i32,
    ))
}

fn write_pixel_rgba_clipped(frame: &mut [u8], width: usize, x: i32, y: i32, color: Rgba) {
    if x < 0 || y < 0 {
        return;
    }
    let x = x as usize;
    let y = y as usize;
    let Some(pixel_offset) = y.checked_mul(width).and_then(|row| row.checked_add(x)) else {
        return;
    };
    let Some(byte_offset) = pixel_offset.checked_mul(4) else {
        return;
    };
    let Some(end) = byte_offset.checked_add(4) else {
        return;
    };
    if end > frame.len() {
        return;
    }
    frame[byte_offset..end].copy_from_slice(&color);
}
