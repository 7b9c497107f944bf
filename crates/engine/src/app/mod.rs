mod hud;
mod input;
mod loop_runner;
mod metrics;
mod rendering;

pub use hud::{draw_hud, hud_lines, HudData};
pub use input::{InputAction, InputSnapshot};
pub use loop_runner::{run_app, run_app_with_metrics, AppError, LoopConfig, SLOW_FRAME_ENV_VAR};
pub use metrics::{LoopMetricsSnapshot, MetricsHandle};
pub use rendering::{
    world_rect_to_screen, world_to_screen, Camera2D, DrawCommand, DrawSurface, FrameCanvas,
    RecordingSurface, Renderer, Rgba, Viewport, BLACK, CLEAR_COLOR, GREEN, RED,
};
