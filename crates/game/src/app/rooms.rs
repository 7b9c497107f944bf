use std::fmt;
use std::path::PathBuf;

use room_engine::{builtin_atlas, resolve_app_paths, RoomAtlas, RoomError};
use tracing::{debug, warn};

const ROOMS_DIR_ENV_VAR: &str = "ROOMRUN_ROOMS_DIR";

/// Where the room atlas comes from, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RoomSource {
    /// Directory named by `ROOMRUN_ROOMS_DIR`. Load failures are fatal.
    EnvDir(PathBuf),
    /// `assets/rooms` under the detected project root.
    ProjectDir(PathBuf),
    Builtin,
}

impl fmt::Display for RoomSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EnvDir(path) => write!(f, "env:{}", path.display()),
            Self::ProjectDir(path) => write!(f, "project:{}", path.display()),
            Self::Builtin => f.write_str("builtin"),
        }
    }
}

pub(crate) fn resolve_room_source() -> RoomSource {
    let env_dir = std::env::var_os(ROOMS_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from);
    let project_dir = match resolve_app_paths() {
        Ok(paths) => Some(paths.rooms_dir),
        Err(err) => {
            debug!(error = %err, "project_root_not_found");
            None
        }
    };
    choose_room_source(env_dir, project_dir)
}

fn choose_room_source(env_dir: Option<PathBuf>, project_dir: Option<PathBuf>) -> RoomSource {
    if let Some(dir) = env_dir {
        return RoomSource::EnvDir(dir);
    }
    match project_dir {
        Some(dir) if dir.is_dir() => RoomSource::ProjectDir(dir),
        _ => RoomSource::Builtin,
    }
}

/// A broken project rooms directory falls back to the builtin rooms; an
/// explicitly configured one does not.
pub(crate) fn load_atlas(source: &RoomSource) -> Result<RoomAtlas, RoomError> {
    match source {
        RoomSource::EnvDir(dir) => RoomAtlas::from_dir(dir),
        RoomSource::ProjectDir(dir) => RoomAtlas::from_dir(dir).or_else(|err| {
            warn!(
                rooms_dir = %dir.display(),
                error = %err,
                "project_rooms_invalid; using builtin rooms"
            );
            builtin_atlas()
        }),
        RoomSource::Builtin => builtin_atlas(),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use serde_json::json;

    use super::*;

    fn write_room(dir: &Path, file: &str, room: serde_json::Value) {
        fs::write(dir.join(file), room.to_string()).expect("write room");
    }

    fn square_room(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "walls": [[-50, -50], [50, -50], [50, 50], [-50, 50]],
            "door": [20, -40, 10, 10],
            "startPoint": [0, 0],
            "nodes": [{ "kind": "monster", "x": -30, "y": 20 }]
        })
    }

    #[test]
    fn env_dir_wins_over_project_dir() {
        let env = PathBuf::from("/tmp/custom-rooms");
        let source = choose_room_source(Some(env.clone()), Some(PathBuf::from(".")));
        assert_eq!(source, RoomSource::EnvDir(env));
    }

    #[test]
    fn missing_project_dir_falls_back_to_builtin() {
        let temp = tempfile::tempdir().expect("tempdir");
        let source = choose_room_source(None, Some(temp.path().join("absent")));
        assert_eq!(source, RoomSource::Builtin);
        assert_eq!(choose_room_source(None, None), RoomSource::Builtin);
    }

    #[test]
    fn project_dir_rooms_load_in_file_order() {
        let temp = tempfile::tempdir().expect("tempdir");
        write_room(temp.path(), "02_second.json", square_room("second"));
        write_room(temp.path(), "01_first.json", square_room("first"));

        let source = choose_room_source(None, Some(temp.path().to_path_buf()));
        let atlas = load_atlas(&source).expect("atlas");

        let names: Vec<&str> = atlas.rooms().iter().map(|room| room.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn broken_project_dir_uses_builtin_rooms() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("bad.json"), "{ \"walls\": 3 }").expect("write");

        let atlas = load_atlas(&RoomSource::ProjectDir(temp.path().to_path_buf()))
            .expect("builtin fallback");
        let builtin = builtin_atlas().expect("builtin");
        assert_eq!(atlas.rooms(), builtin.rooms());
    }

    #[test]
    fn broken_env_dir_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let mut room = square_room("typo");
        room["doors"] = json!([0, 0, 1, 1]);
        write_room(temp.path(), "room.json", room);

        let err = load_atlas(&RoomSource::EnvDir(temp.path().to_path_buf()))
            .expect_err("unknown field must fail");
        assert!(matches!(err, RoomError::InFile { .. }));
    }

    #[test]
    fn source_display_names_origin() {
        assert_eq!(RoomSource::Builtin.to_string(), "builtin");
        assert!(RoomSource::EnvDir(PathBuf::from("rooms"))
            .to_string()
            .starts_with("env:"));
    }
}
