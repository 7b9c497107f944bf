mod canvas;
mod font;
mod renderer;
mod surface;
mod transform;

pub use canvas::FrameCanvas;
pub(crate) use canvas::{GLYPH_ADVANCE, LINE_ADVANCE};
pub use renderer::Renderer;
pub use surface::{
    DrawCommand, DrawSurface, RecordingSurface, Rgba, BLACK, CLEAR_COLOR, GREEN, RED,
};
pub use transform::{world_rect_to_screen, world_to_screen, Camera2D, Viewport};
