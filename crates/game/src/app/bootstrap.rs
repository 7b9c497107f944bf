use room_engine::{LoopConfig, RoomAtlas, RoomError, DEFAULT_TICK_RATE_HZ};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use super::rooms::{load_atlas, resolve_room_source};

const TICK_RATE_ENV_VAR: &str = "ROOMRUN_TICK_RATE";
const HUD_ENV_VAR: &str = "ROOMRUN_HUD";
const MAX_FPS_ENV_VAR: &str = "ROOMRUN_MAX_FPS";
const MAX_TICK_RATE_HZ: u32 = 1000;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) atlas: RoomAtlas,
}

pub(crate) fn build_app() -> Result<AppWiring, RoomError> {
    init_tracing();
    info!("=== Room Run Startup ===");

    let source = resolve_room_source();
    let atlas = load_atlas(&source)?;
    info!(
        source = %source,
        room_count = atlas.len(),
        first_room = atlas.get(0).map_or("", |room| room.name.as_str()),
        "rooms_resolved"
    );

    let config = LoopConfig {
        target_tps: parse_tick_rate(std::env::var(TICK_RATE_ENV_VAR).ok().as_deref()),
        hud_visible: parse_flag(std::env::var(HUD_ENV_VAR).ok().as_deref()),
        max_render_fps: parse_render_cap(std::env::var(MAX_FPS_ENV_VAR).ok().as_deref()),
        ..LoopConfig::default()
    };

    Ok(AppWiring { config, atlas })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}

fn parse_tick_rate(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return DEFAULT_TICK_RATE_HZ;
    };
    match raw.trim().parse::<u32>() {
        Ok(value) if (1..=MAX_TICK_RATE_HZ).contains(&value) => value,
        _ => {
            warn!(
                env_var = TICK_RATE_ENV_VAR,
                value = raw,
                fallback = DEFAULT_TICK_RATE_HZ,
                "invalid tick rate; using default"
            );
            DEFAULT_TICK_RATE_HZ
        }
    }
}

/// Unset, `0` or `off` render uncapped.
fn parse_render_cap(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == "off" {
        return None;
    }
    match raw.parse::<u32>() {
        Ok(0) => None,
        Ok(value) => Some(value),
        Err(_) => {
            warn!(
                env_var = MAX_FPS_ENV_VAR,
                value = raw,
                "invalid render cap; rendering uncapped"
            );
            None
        }
    }
}

fn parse_flag(raw: Option<&str>) -> bool {
    raw.map(str::trim)
        .is_some_and(|value| matches!(value, "1" | "true" | "on" | "yes"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_rate_defaults_when_unset_or_invalid() {
        assert_eq!(parse_tick_rate(None), DEFAULT_TICK_RATE_HZ);
        assert_eq!(parse_tick_rate(Some("fast")), DEFAULT_TICK_RATE_HZ);
        assert_eq!(parse_tick_rate(Some("0")), DEFAULT_TICK_RATE_HZ);
        assert_eq!(parse_tick_rate(Some("5000")), DEFAULT_TICK_RATE_HZ);
    }

    #[test]
    fn tick_rate_accepts_trimmed_value_in_range() {
        assert_eq!(parse_tick_rate(Some(" 60 ")), 60);
        assert_eq!(parse_tick_rate(Some("1000")), 1000);
    }

    #[test]
    fn render_cap_is_optional() {
        assert_eq!(parse_render_cap(None), None);
        assert_eq!(parse_render_cap(Some("off")), None);
        assert_eq!(parse_render_cap(Some("0")), None);
        assert_eq!(parse_render_cap(Some("sixty")), None);
        assert_eq!(parse_render_cap(Some(" 144 ")), Some(144));
    }

    #[test]
    fn hud_flag_accepts_common_truthy_values() {
        assert!(parse_flag(Some("1")));
        assert!(parse_flag(Some(" on")));
        assert!(!parse_flag(Some("0")));
        assert!(!parse_flag(None));
    }
}
