use std::env;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use pixels::Error as PixelsError;
use thiserror::Error;
use tracing::{info, warn};
use winit::dpi::LogicalSize;
use winit::error::{EventLoopError, OsError};
use winit::event::{ElementState, Event, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowBuilder;

use crate::sim::{RoomAtlas, Vec2, World, DEFAULT_TICK_RATE_HZ};

use super::hud::{draw_hud, HudData};
use super::input::ActionStates;
use super::metrics::MetricsAccumulator;
use super::{InputAction, InputSnapshot, MetricsHandle, Renderer};

pub const SLOW_FRAME_ENV_VAR: &str = "ROOMRUN_SLOW_FRAME_MS";

#[derive(Debug, Clone)]
pub struct LoopConfig {
    pub window_title: String,
    pub window_width: u32,
    pub window_height: u32,
    pub target_tps: u32,
    pub max_frame_delta: Duration,
    pub max_ticks_per_frame: u32,
    pub metrics_log_interval: Duration,
    pub simulated_slow_frame_ms: u64,
    pub max_render_fps: Option<u32>,
    pub hud_visible: bool,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            window_title: "Room Run".to_string(),
            window_width: 800,
            window_height: 600,
            target_tps: DEFAULT_TICK_RATE_HZ,
            max_frame_delta: Duration::from_millis(250),
            max_ticks_per_frame: 8,
            metrics_log_interval: Duration::from_secs(1),
            simulated_slow_frame_ms: 0,
            max_render_fps: None,
            hud_visible: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("failed to create application window: {0}")]
    CreateWindow(#[source] OsError),
    #[error("failed to initialize renderer: {0}")]
    CreateRenderer(#[source] PixelsError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
}

/// Opens the window and runs the world at `config.target_tps` until the
/// window closes or Escape is pressed.
pub fn run_app(config: LoopConfig, atlas: RoomAtlas) -> Result<(), AppError> {
    run_app_with_metrics(config, atlas, MetricsHandle::default())
}

pub fn run_app_with_metrics(
    config: LoopConfig,
    atlas: RoomAtlas,
    metrics_handle: MetricsHandle,
) -> Result<(), AppError> {
    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title(config.window_title.clone())
            .with_inner_size(LogicalSize::new(
                config.window_width as f64,
                config.window_height as f64,
            ))
            .build(&event_loop)
            .map_err(AppError::CreateWindow)?,
    );
    let mut renderer = Renderer::new(Arc::clone(&window)).map_err(AppError::CreateRenderer)?;

    event_loop.set_control_flow(ControlFlow::Poll);

    let target_tps = config.target_tps.max(1);
    let max_frame_delta =
        normalize_non_zero_duration(config.max_frame_delta, Duration::from_millis(250));
    let max_ticks_per_frame = config.max_ticks_per_frame.max(1);
    let metrics_log_interval =
        normalize_non_zero_duration(config.metrics_log_interval, Duration::from_secs(1));
    let slow_frame_delay = resolve_slow_frame_delay(config.simulated_slow_frame_ms);
    let effective_render_cap = normalize_render_fps_cap(config.max_render_fps);
    let render_frame_target = target_frame_duration(effective_render_cap);
    let initial_size = window.inner_size();
    let mut input_collector = InputCollector::new(initial_size.width, initial_size.height);

    let mut world = World::new(atlas, target_tps);
    let fixed_dt = world.tick_period();

    info!(
        target_tps,
        tick_period_ns = fixed_dt.as_nanos() as u64,
        max_frame_delta_ms = max_frame_delta.as_millis() as u64,
        max_ticks_per_frame,
        metrics_log_interval_ms = metrics_log_interval.as_millis() as u64,
        slow_frame_delay_ms = slow_frame_delay.as_millis() as u64,
        render_fps_cap = %format_render_cap(effective_render_cap),
        room_count = world.atlas().len(),
        "loop_config"
    );

    let mut accumulator = Duration::ZERO;
    let mut last_frame_instant = Instant::now();
    let mut last_present_instant = Instant::now();
    let mut metrics_accumulator = MetricsAccumulator::new(metrics_log_interval);
    let mut last_titled_room: Option<String> = None;
    let mut hud_visible = config.hud_visible;

    event_loop
        .run(move |event, window_target| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested => {
                    info!(reason = "window_close", "shutdown_requested");
                    window_target.exit();
                }
                WindowEvent::Resized(new_size) => {
                    input_collector.set_window_size(new_size.width, new_size.height);
                    if let Err(error) = renderer.resize(new_size.width, new_size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::ScaleFactorChanged { .. } => {
                    let size = window.inner_size();
                    input_collector.set_window_size(size.width, size.height);
                    if let Err(error) = renderer.resize(size.width, size.height) {
                        warn!(error = %error, "renderer_resize_failed");
                        window_target.exit();
                    }
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input_collector.set_cursor_position_px(position.x as f32, position.y as f32);
                }
                WindowEvent::CursorLeft { .. } => {
                    input_collector.clear_cursor_position();
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    input_collector.handle_mouse_input(button, state);
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    input_collector.handle_keyboard_input(&event);
                    if input_collector.quit_requested() {
                        info!(reason = "escape_key", "shutdown_requested");
                        window_target.exit();
                    }
                }
                WindowEvent::RedrawRequested => {
                    if input_collector.take_hud_toggle_pressed() {
                        hud_visible = !hud_visible;
                        info!(hud_visible, "hud_toggled");
                    }

                    if slow_frame_delay > Duration::ZERO {
                        // Debug perturbation only; not the FPS cap.
                        thread::sleep(slow_frame_delay);
                    }

                    let now = Instant::now();
                    let raw_frame_dt = now.saturating_duration_since(last_frame_instant);
                    last_frame_instant = now;
                    accumulator =
                        accumulator.saturating_add(clamp_frame_delta(raw_frame_dt, max_frame_delta));

                    let step_plan = plan_sim_steps(accumulator, fixed_dt, max_ticks_per_frame);
                    for _ in 0..step_plan.ticks_to_run {
                        let input = input_collector.snapshot_for_tick();
                        world.tick(&input, &mut renderer.canvas());
                        metrics_accumulator.record_tick();
                    }
                    accumulator = step_plan.remaining_accumulator;

                    if step_plan.dropped_backlog > Duration::ZERO {
                        let dropped_ticks = ticks_in(step_plan.dropped_backlog, fixed_dt);
                        metrics_accumulator.record_dropped_ticks(dropped_ticks);
                        warn!(
                            dropped_backlog_ms = step_plan.dropped_backlog.as_millis() as u64,
                            dropped_ticks,
                            max_ticks_per_frame,
                            "sim_clamp_triggered"
                        );
                    }

                    if step_plan.ticks_to_run > 0 {
                        if hud_visible {
                            let hud =
                                HudData::collect(&world, metrics_handle.snapshot(), target_tps);
                            draw_hud(&mut renderer.canvas(), &hud);
                        }

                        let elapsed_since_last_present =
                            Instant::now().saturating_duration_since(last_present_instant);
                        let cap_sleep =
                            compute_cap_sleep(elapsed_since_last_present, render_frame_target);
                        if cap_sleep > Duration::ZERO {
                            thread::sleep(cap_sleep);
                        }

                        if let Err(error) = renderer.present() {
                            warn!(error = %error, "renderer_present_failed");
                            window_target.exit();
                        }
                        last_present_instant = Instant::now();
                        metrics_accumulator.record_frame(raw_frame_dt);
                    }

                    let room = world.current_room_name();
                    if last_titled_room.as_deref() != Some(room) {
                        window.set_title(&format!("{} - {}", config.window_title, room));
                        last_titled_room = Some(room.to_string());
                    }

                    if let Some(snapshot) = metrics_accumulator.maybe_snapshot(now) {
                        metrics_handle.publish(snapshot);
                        info!(
                            fps = snapshot.fps,
                            tps = snapshot.tps,
                            frame_time_ms = snapshot.frame_time_ms,
                            worst_frame_ms = snapshot.worst_frame_ms,
                            dropped_ticks = snapshot.dropped_ticks,
                            entity_count = world.entity_count(),
                            room = world.current_room_name(),
                            "loop_metrics"
                        );
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                window.request_redraw();
            }
            Event::LoopExiting => {
                info!(
                    ticks = world.tick_count(),
                    room = world.current_room_name(),
                    "shutdown"
                );
            }
            _ => {}
        })
        .map_err(AppError::EventLoopRun)
}

/// Folds window events into the held state each tick reads.
#[derive(Debug, Default)]
struct InputCollector {
    quit_requested: bool,
    hud_toggle_is_down: bool,
    hud_toggle_pressed_edge: bool,
    action_states: ActionStates,
    cursor_position_px: Option<Vec2>,
    left_mouse_is_down: bool,
    window_width: u32,
    window_height: u32,
}

impl InputCollector {
    fn new(window_width: u32, window_height: u32) -> Self {
        Self {
            window_width,
            window_height,
            ..Self::default()
        }
    }

    fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    fn handle_keyboard_input(&mut self, key_event: &KeyEvent) {
        let is_pressed = key_event.state == ElementState::Pressed;
        self.update_action_state_from_physical_key(key_event.physical_key, is_pressed);
        self.handle_hud_toggle_key_state(is_hud_toggle_key(key_event), key_event.state);
    }

    fn update_action_state_from_physical_key(&mut self, key: PhysicalKey, is_pressed: bool) {
        let PhysicalKey::Code(code) = key else {
            return;
        };
        let Some(action) = action_for_key(code) else {
            return;
        };
        self.action_states.set(action, is_pressed);
        if action == InputAction::Quit && is_pressed {
            self.quit_requested = true;
        }
    }

    fn handle_hud_toggle_key_state(&mut self, is_toggle_key: bool, state: ElementState) {
        if !is_toggle_key {
            return;
        }

        match state {
            ElementState::Pressed => {
                if !self.hud_toggle_is_down {
                    self.hud_toggle_pressed_edge = true;
                }
                self.hud_toggle_is_down = true;
            }
            ElementState::Released => self.hud_toggle_is_down = false,
        }
    }

    fn take_hud_toggle_pressed(&mut self) -> bool {
        std::mem::take(&mut self.hud_toggle_pressed_edge)
    }

    fn handle_mouse_input(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_mouse_is_down = state == ElementState::Pressed;
        }
    }

    fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_width = width;
        self.window_height = height;
    }

    fn set_cursor_position_px(&mut self, x: f32, y: f32) {
        self.cursor_position_px = Some(Vec2::new(x, y));
    }

    fn clear_cursor_position(&mut self) {
        self.cursor_position_px = None;
    }

    fn snapshot_for_tick(&self) -> InputSnapshot {
        InputSnapshot::new(
            self.action_states,
            self.left_mouse_is_down,
            self.cursor_position_px,
            self.window_width,
            self.window_height,
        )
    }
}

fn action_for_key(code: KeyCode) -> Option<InputAction> {
    match code {
        KeyCode::KeyW | KeyCode::ArrowUp => Some(InputAction::MoveUp),
        KeyCode::KeyS | KeyCode::ArrowDown => Some(InputAction::MoveDown),
        KeyCode::KeyA | KeyCode::ArrowLeft => Some(InputAction::MoveLeft),
        KeyCode::KeyD | KeyCode::ArrowRight => Some(InputAction::MoveRight),
        KeyCode::Space => Some(InputAction::Dash),
        KeyCode::KeyQ => Some(InputAction::Skill),
        KeyCode::Escape => Some(InputAction::Quit),
        _ => None,
    }
}

fn is_hud_toggle_key(key_event: &KeyEvent) -> bool {
    matches!(key_event.physical_key, PhysicalKey::Code(KeyCode::F3))
}

#[derive(Debug, Clone, Copy)]
struct StepPlan {
    ticks_to_run: u32,
    remaining_accumulator: Duration,
    dropped_backlog: Duration,
}

fn plan_sim_steps(
    mut accumulator: Duration,
    fixed_dt: Duration,
    max_ticks_per_frame: u32,
) -> StepPlan {
    let mut ticks_to_run = 0u32;

    while accumulator >= fixed_dt && ticks_to_run < max_ticks_per_frame {
        accumulator = accumulator.saturating_sub(fixed_dt);
        ticks_to_run = ticks_to_run.saturating_add(1);
    }

    let dropped_backlog = if accumulator >= fixed_dt {
        std::mem::take(&mut accumulator)
    } else {
        Duration::ZERO
    };
    StepPlan {
        ticks_to_run,
        remaining_accumulator: accumulator,
        dropped_backlog,
    }
}

fn ticks_in(backlog: Duration, fixed_dt: Duration) -> u32 {
    if fixed_dt.is_zero() {
        return 0;
    }
    u32::try_from(backlog.as_nanos() / fixed_dt.as_nanos()).unwrap_or(u32::MAX)
}

fn clamp_frame_delta(frame_dt: Duration, max_frame_delta: Duration) -> Duration {
    frame_dt.min(max_frame_delta)
}

fn normalize_non_zero_duration(value: Duration, fallback: Duration) -> Duration {
    if value.is_zero() {
        fallback
    } else {
        value
    }
}

fn normalize_render_fps_cap(cap: Option<u32>) -> Option<u32> {
    cap.filter(|value| *value > 0)
}

fn target_frame_duration(max_render_fps: Option<u32>) -> Option<Duration> {
    max_render_fps.map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
}

fn compute_cap_sleep(elapsed: Duration, target: Option<Duration>) -> Duration {
    match target {
        Some(frame_target) if elapsed < frame_target => frame_target - elapsed,
        _ => Duration::ZERO,
    }
}

fn format_render_cap(cap: Option<u32>) -> String {
    match cap {
        Some(value) => value.to_string(),
        None => "off".to_string(),
    }
}

fn resolve_slow_frame_delay(config_slow_frame_ms: u64) -> Duration {
    match env::var(SLOW_FRAME_ENV_VAR) {
        Ok(value) => parse_slow_frame_ms(&value).unwrap_or_else(|| {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                value = value.as_str(),
                "invalid slow-frame env var value; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }),
        Err(env::VarError::NotPresent) => Duration::from_millis(config_slow_frame_ms),
        Err(err) => {
            warn!(
                env_var = SLOW_FRAME_ENV_VAR,
                error = %err,
                "unable to read slow-frame env var; falling back to config"
            );
            Duration::from_millis(config_slow_frame_ms)
        }
    }
}

fn parse_slow_frame_ms(value: &str) -> Option<Duration> {
    value.trim().parse::<u64>().ok().map(Duration::from_millis)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_frame_delta_caps_large_frame() {
        let max_frame_delta = Duration::from_millis(250);
        assert_eq!(
            clamp_frame_delta(Duration::from_millis(600), max_frame_delta),
            max_frame_delta
        );
    }

    #[test]
    fn plan_sim_steps_runs_whole_ticks_and_keeps_remainder() {
        let fixed_dt = Duration::from_millis(10);
        let result = plan_sim_steps(Duration::from_millis(35), fixed_dt, 8);

        assert_eq!(result.ticks_to_run, 3);
        assert_eq!(result.remaining_accumulator, Duration::from_millis(5));
        assert_eq!(result.dropped_backlog, Duration::ZERO);
    }

    #[test]
    fn plan_sim_steps_drops_backlog_when_tick_cap_hit() {
        let fixed_dt = Duration::from_millis(10);
        let result = plan_sim_steps(Duration::from_millis(125), fixed_dt, 8);

        assert_eq!(result.ticks_to_run, 8);
        assert_eq!(result.remaining_accumulator, Duration::ZERO);
        assert_eq!(result.dropped_backlog, Duration::from_millis(45));
        assert_eq!(ticks_in(result.dropped_backlog, fixed_dt), 4);
    }

    #[test]
    fn movement_dash_and_skill_keys_map_to_actions() {
        let mut input = InputCollector::new(800, 600);
        for key in [KeyCode::KeyW, KeyCode::ArrowLeft, KeyCode::Space, KeyCode::KeyQ] {
            input.update_action_state_from_physical_key(PhysicalKey::Code(key), true);
        }

        let snapshot = input.snapshot_for_tick();
        assert!(snapshot.is_down(InputAction::MoveUp));
        assert!(snapshot.is_down(InputAction::MoveLeft));
        assert!(snapshot.is_down(InputAction::Dash));
        assert!(snapshot.is_down(InputAction::Skill));
        assert!(!snapshot.is_down(InputAction::MoveDown));
    }

    #[test]
    fn key_release_clears_action_state() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), true);
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::KeyD), false);

        assert!(!input.snapshot_for_tick().is_down(InputAction::MoveRight));
    }

    #[test]
    fn held_keys_stay_down_across_ticks() {
        let mut input = InputCollector::default();
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::ArrowDown), true);

        assert!(input.snapshot_for_tick().is_down(InputAction::MoveDown));
        assert!(input.snapshot_for_tick().is_down(InputAction::MoveDown));
    }

    #[test]
    fn escape_requests_quit() {
        let mut input = InputCollector::default();
        assert!(!input.quit_requested());
        input.update_action_state_from_physical_key(PhysicalKey::Code(KeyCode::Escape), true);
        assert!(input.quit_requested());
    }

    #[test]
    fn f3_toggle_is_edge_triggered() {
        let mut input = InputCollector::default();

        input.handle_hud_toggle_key_state(true, ElementState::Pressed);
        assert!(input.take_hud_toggle_pressed());

        input.handle_hud_toggle_key_state(true, ElementState::Pressed);
        assert!(!input.take_hud_toggle_pressed());

        input.handle_hud_toggle_key_state(true, ElementState::Released);
        input.handle_hud_toggle_key_state(true, ElementState::Pressed);
        assert!(input.take_hud_toggle_pressed());
    }

    #[test]
    fn left_mouse_is_reported_while_held() {
        let mut input = InputCollector::new(800, 600);
        input.handle_mouse_input(MouseButton::Left, ElementState::Pressed);
        assert!(input.snapshot_for_tick().mouse_held());
        assert!(input.snapshot_for_tick().mouse_held());

        input.handle_mouse_input(MouseButton::Right, ElementState::Released);
        assert!(input.snapshot_for_tick().mouse_held());

        input.handle_mouse_input(MouseButton::Left, ElementState::Released);
        assert!(!input.snapshot_for_tick().mouse_held());
    }

    #[test]
    fn snapshot_carries_cursor_and_window_size() {
        let mut input = InputCollector::new(800, 600);
        input.set_cursor_position_px(500.0, 250.0);
        let snapshot = input.snapshot_for_tick();

        assert_eq!(snapshot.window_size(), (800, 600));
        assert_eq!(snapshot.mouse_camera_relative(), Vec2::new(100.0, -50.0));

        input.clear_cursor_position();
        input.set_window_size(1024, 768);
        let snapshot = input.snapshot_for_tick();
        assert_eq!(snapshot.cursor_position_px(), None);
        assert_eq!(snapshot.window_size(), (1024, 768));
    }

    #[test]
    fn target_frame_duration_none_when_cap_off() {
        assert_eq!(target_frame_duration(None), None);
        assert_eq!(normalize_render_fps_cap(Some(0)), None);
        assert_eq!(normalize_render_fps_cap(Some(60)), Some(60));
    }

    #[test]
    fn compute_cap_sleep_only_when_under_budget() {
        let target = target_frame_duration(Some(60));
        assert_eq!(compute_cap_sleep(Duration::from_millis(20), target), Duration::ZERO);
        assert!(compute_cap_sleep(Duration::from_millis(5), target) > Duration::ZERO);
    }

    #[test]
    fn slow_frame_value_must_be_whole_milliseconds() {
        assert_eq!(parse_slow_frame_ms(" 15 "), Some(Duration::from_millis(15)));
        assert_eq!(parse_slow_frame_ms("fast"), None);
        assert_eq!(parse_slow_frame_ms("-3"), None);
    }

    #[test]
    fn default_config_runs_at_default_tick_rate() {
        let config = LoopConfig::default();
        assert_eq!(config.target_tps, DEFAULT_TICK_RATE_HZ);
        assert!(!config.hud_visible);
    }
}
