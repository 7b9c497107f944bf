use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod app;
pub mod sim;

pub use app::{
    draw_hud, run_app, run_app_with_metrics, world_to_screen, AppError, Camera2D, DrawSurface,
    HudData, InputAction, InputSnapshot, LoopConfig, LoopMetricsSnapshot, MetricsHandle,
    RecordingSurface, Renderer, Viewport, SLOW_FRAME_ENV_VAR,
};
pub use sim::{
    Entity, EntityBlueprint, EntityId, EntityKind, Rect, RoomAtlas, RoomDescriptor, RoomError,
    Vec2, World, DEFAULT_TICK_RATE_HZ,
};

pub const ROOT_ENV_VAR: &str = "ROOMRUN_ROOT";

/// Rooms compiled into the binary, used when no rooms directory is found.
const BUILTIN_ROOMS: &[(&str, &str)] = &[
    (
        "01_entry",
        include_str!("../../../assets/rooms/01_entry.json"),
    ),
    (
        "02_gallery",
        include_str!("../../../assets/rooms/02_gallery.json"),
    ),
];

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub root: PathBuf,
    pub rooms_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to read environment variable {var}: {source}")]
    EnvVar {
        var: &'static str,
        #[source]
        source: env::VarError,
    },
    #[error("failed to resolve current executable path: {0}")]
    CurrentExe(#[source] std::io::Error),
    #[error("current executable path has no parent directory: {0}")]
    ExeHasNoParent(PathBuf),
    #[error(
        "{env_var} is set but does not point to a valid project root: {path}\n\
A valid root must contain Cargo.toml and either crates/ or assets/."
    )]
    InvalidEnvRoot { path: PathBuf, env_var: &'static str },
    #[error(
        "Could not detect project root by walking upward from executable directory: {start_dir}\n\
Expected a directory containing Cargo.toml and either crates/ or assets/.\n\
Set {env_var} explicitly, for example:\n\
Bash/zsh: export {env_var}=\"/path/to/room-run\""
    )]
    RootNotFound {
        start_dir: PathBuf,
        env_var: &'static str,
    },
}

pub fn resolve_app_paths() -> Result<AppPaths, StartupError> {
    let root = resolve_root()?;
    let rooms_dir = root.join("assets").join("rooms");
    Ok(AppPaths { root, rooms_dir })
}

/// Parses the rooms shipped inside the binary.
pub fn builtin_atlas() -> Result<RoomAtlas, RoomError> {
    let mut rooms = Vec::with_capacity(BUILTIN_ROOMS.len());
    for (stem, raw) in BUILTIN_ROOMS {
        let mut room = RoomDescriptor::from_json_str(raw).map_err(|source| RoomError::InFile {
            path: PathBuf::from(format!("<builtin>/{stem}.json")),
            source: Box::new(source),
        })?;
        if room.name.trim().is_empty() {
            room.name = (*stem).to_string();
        }
        rooms.push(room);
    }
    RoomAtlas::new(rooms)
}

fn resolve_root() -> Result<PathBuf, StartupError> {
    match env::var(ROOT_ENV_VAR) {
        Ok(value) => {
            let normalized = normalize_path(&PathBuf::from(value));
            if is_repo_marker(&normalized) {
                Ok(normalized)
            } else {
                Err(StartupError::InvalidEnvRoot {
                    path: normalized,
                    env_var: ROOT_ENV_VAR,
                })
            }
        }
        Err(env::VarError::NotPresent) => {
            let exe = env::current_exe().map_err(StartupError::CurrentExe)?;
            let exe_dir = exe
                .parent()
                .map(Path::to_path_buf)
                .ok_or_else(|| StartupError::ExeHasNoParent(exe.clone()))?;

            exe_dir
                .ancestors()
                .find(|candidate| is_repo_marker(candidate))
                .map(normalize_path)
                .ok_or_else(|| StartupError::RootNotFound {
                    start_dir: normalize_path(&exe_dir),
                    env_var: ROOT_ENV_VAR,
                })
        }
        Err(source) => Err(StartupError::EnvVar {
            var: ROOT_ENV_VAR,
            source,
        }),
    }
}

fn is_repo_marker(path: &Path) -> bool {
    let cargo_toml = path.join("Cargo.toml").is_file();
    let has_crates = path.join("crates").is_dir();
    let has_assets = path.join("assets").is_dir();

    cargo_toml && (has_crates || has_assets)
}

fn normalize_path(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
