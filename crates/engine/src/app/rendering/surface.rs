use crate::sim::{Rect, Vec2};

use super::Viewport;

pub type Rgba = [u8; 4];

pub const BLACK: Rgba = [0, 0, 0, 255];
pub const RED: Rgba = [220, 32, 32, 255];
pub const GREEN: Rgba = [40, 170, 70, 255];
pub const CLEAR_COLOR: Rgba = [236, 236, 232, 255];

/// Screen-space drawing operations. Coordinates are already camera
/// translated when they get here.
pub trait DrawSurface {
    fn viewport(&self) -> Viewport;
    fn clear(&mut self);
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    fn stroke_rect(&mut self, rect: Rect, color: Rgba);
    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
    fn text(&mut self, at: Vec2, text: &str, color: Rgba);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    StrokeRect {
        rect: Rect,
        color: Rgba,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Rgba,
    },
    Text {
        at: Vec2,
        text: String,
        color: Rgba,
    },
}

/// Keeps the draw calls of the current frame. `clear` starts a new frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    viewport: Viewport,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn filled_rects(&self, color: Rgba) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawSurface for RecordingSurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::StrokeRect { rect, color });
    }

    fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn text(&mut self, at: Vec2, text: &str, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
            color,
        });
    }
}
