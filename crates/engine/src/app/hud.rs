use crate::sim::{EntityKind, Rect, Vec2, World};

use super::rendering::{DrawSurface, Rgba, GLYPH_ADVANCE, LINE_ADVANCE};
use super::LoopMetricsSnapshot;

const HUD_PADDING: f32 = 12.0;
const HUD_PANEL_INSET_X: f32 = 8.0;
const HUD_PANEL_INSET_Y: f32 = 6.0;
const HUD_TEXT_COLOR: Rgba = [244, 248, 252, 255];
const HUD_PANEL_BG_COLOR: Rgba = [10, 12, 16, 255];
const HUD_PANEL_BORDER_COLOR: Rgba = [92, 106, 126, 255];

/// Debug readout toggled with F3.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HudData {
    pub metrics: LoopMetricsSnapshot,
    pub tick_rate_hz: u32,
    pub tick_count: u64,
    pub room_name: String,
    pub entity_count: usize,
    pub pending_events: usize,
    pub player_health: Option<f32>,
    pub dash_ready: bool,
    pub skill_ready: bool,
}

impl HudData {
    pub fn collect(world: &World, metrics: LoopMetricsSnapshot, tick_rate_hz: u32) -> Self {
        let player_state = world.player().and_then(|player| match &player.kind {
            EntityKind::Player(state) => Some(*state),
            _ => None,
        });
        Self {
            metrics,
            tick_rate_hz,
            tick_count: world.tick_count(),
            room_name: world.current_room_name().to_string(),
            entity_count: world.entity_count(),
            pending_events: world.pending_event_count(),
            player_health: player_state.map(|state| state.body.health),
            dash_ready: player_state.is_some_and(|state| !state.dashing),
            skill_ready: player_state.is_some_and(|state| !state.skill_on_cooldown),
        }
    }
}

pub fn hud_lines(data: &HudData) -> Vec<String> {
    vec![
        format!(
            "FPS {:.0} TPS {:.0}/{}",
            data.metrics.fps, data.metrics.tps, data.tick_rate_hz
        ),
        format!(
            "FRAME {:.1} MS MAX {:.1}",
            data.metrics.frame_time_ms, data.metrics.worst_frame_ms
        ),
        format!("TICK {}", data.tick_count),
        format!("ROOM {}", data.room_name),
        format!("ENTITIES {} TIMERS {}", data.entity_count, data.pending_events),
        match data.player_health {
            Some(health) => format!("HP {health:.0}"),
            None => "HP -".to_string(),
        },
        format!(
            "DASH {} SKILL {}",
            ready_text(data.dash_ready),
            ready_text(data.skill_ready)
        ),
    ]
}

/// Draws the panel in the top-left corner, on top of whatever the tick drew.
pub fn draw_hud(surface: &mut dyn DrawSurface, data: &HudData) {
    let viewport = surface.viewport();
    if viewport.width == 0 || viewport.height == 0 {
        return;
    }

    let lines = hud_lines(data);
    let longest_line_chars = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let panel = Rect::new(
        HUD_PADDING - HUD_PANEL_INSET_X,
        HUD_PADDING - HUD_PANEL_INSET_Y,
        (longest_line_chars as i32 * GLYPH_ADVANCE) as f32 + HUD_PANEL_INSET_X * 2.0,
        (lines.len() as i32 * LINE_ADVANCE) as f32 + HUD_PANEL_INSET_Y * 2.0,
    );
    surface.fill_rect(panel, HUD_PANEL_BG_COLOR);
    surface.stroke_rect(panel, HUD_PANEL_BORDER_COLOR);

    let mut y = HUD_PADDING;
    for line in &lines {
        surface.text(Vec2::new(HUD_PADDING, y), line, HUD_TEXT_COLOR);
        y += LINE_ADVANCE as f32;
    }
}

fn ready_text(ready: bool) -> &'static str {
    if ready {
        "READY"
    } else {
        "WAIT"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{DrawCommand, RecordingSurface, Viewport};
    use crate::sim::{RoomAtlas, RoomDescriptor};

    fn data() -> HudData {
        HudData {
            metrics: LoopMetricsSnapshot {
                fps: 59.6,
                tps: 120.0,
                frame_time_ms: 16.8,
                worst_frame_ms: 21.0,
                dropped_ticks: 0,
            },
            tick_rate_hz: 120,
            tick_count: 42,
            room_name: "entry".to_string(),
            entity_count: 9,
            pending_events: 1,
            player_health: Some(100.0),
            dash_ready: false,
            skill_ready: true,
        }
    }

    #[test]
    fn lines_report_rates_room_and_cooldowns() {
        let lines = hud_lines(&data());

        assert_eq!(lines[0], "FPS 60 TPS 120/120");
        assert!(lines.contains(&"ROOM entry".to_string()));
        assert!(lines.contains(&"ENTITIES 9 TIMERS 1".to_string()));
        assert!(lines.contains(&"DASH WAIT SKILL READY".to_string()));
    }

    #[test]
    fn panel_is_drawn_before_text() {
        let mut surface = RecordingSurface::new(Viewport {
            width: 640,
            height: 480,
        });
        draw_hud(&mut surface, &data());

        let commands = surface.commands();
        assert!(matches!(commands[0], DrawCommand::FillRect { .. }));
        assert!(matches!(commands[1], DrawCommand::StrokeRect { .. }));
        assert_eq!(surface.texts().len(), hud_lines(&data()).len());
    }

    #[test]
    fn zero_sized_viewport_draws_nothing() {
        let mut surface = RecordingSurface::new(Viewport::default());
        draw_hud(&mut surface, &data());
        assert!(surface.commands().is_empty());
    }

    #[test]
    fn collect_reads_player_state_from_world() {
        let room = RoomDescriptor::from_json_str(
            r#"{
                "walls": [[-50, -50], [50, -50], [50, 50]],
                "door": [30, 30, 5, 5],
                "startPoint": [0, 0]
            }"#,
        )
        .expect("room");
        let world = World::new(RoomAtlas::new(vec![room]).expect("atlas"), 60);

        let data = HudData::collect(&world, LoopMetricsSnapshot::default(), 60);

        assert_eq!(data.player_health, Some(100.0));
        assert!(data.dash_ready && data.skill_ready);
        assert_eq!(data.entity_count, world.entity_count());
        assert_eq!(data.room_name, "room-1");
    }
}
