use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::entity::SpawnRequest;
use super::geometry::{Rect, Vec2};

pub const WALL_THICKNESS: f32 = 5.0;
pub const ROOM_FILE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum RoomError {
    #[error("parse room json: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
    #[error("parse room json at {path}: {source}")]
    ParseAt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("room '{room}' is invalid at {field}: {message}")]
    Invalid {
        room: String,
        field: String,
        message: String,
    },
    #[error("room atlas is empty")]
    EmptyAtlas,
    #[error("no room files (*.json) found in {path}")]
    NoRoomFiles { path: PathBuf },
    #[error("duplicate room name '{name}'")]
    DuplicateName { name: String },
    #[error("room '{room}' leads to unknown room '{next}'")]
    UnknownNext { room: String, next: String },
    #[error("failed to read rooms directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read room file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("room file {path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<RoomError>,
    },
}

/// Data-only recipe for an entity a room places after its walls and door.
/// Every load builds fresh entities from these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityBlueprint {
    Monster { x: f32, y: f32 },
    Label { x: f32, y: f32, text: String },
    Wall { x: f32, y: f32, w: f32, h: f32 },
}

impl EntityBlueprint {
    pub fn instantiate(&self) -> SpawnRequest {
        match self {
            Self::Monster { x, y } => SpawnRequest::monster(Vec2::new(*x, *y)),
            Self::Label { x, y, text } => SpawnRequest::label(Vec2::new(*x, *y), text.clone()),
            Self::Wall { x, y, w, h } => SpawnRequest::wall(Rect::new(*x, *y, *w, *h)),
        }
    }

    fn numbers(&self) -> Vec<(&'static str, f32)> {
        match self {
            Self::Monster { x, y } | Self::Label { x, y, .. } => vec![("x", *x), ("y", *y)],
            Self::Wall { x, y, w, h } => vec![("x", *x), ("y", *y), ("w", *w), ("h", *h)],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RoomDescriptor {
    #[serde(default)]
    pub name: String,
    pub walls: Vec<[f32; 2]>,
    pub door: [f32; 4],
    pub start_point: [f32; 2],
    #[serde(default)]
    pub nodes: Vec<EntityBlueprint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl RoomDescriptor {
    pub fn from_json_str(raw: &str) -> Result<Self, RoomError> {
        let mut deserializer = serde_json::Deserializer::from_str(raw);
        let room = match serde_path_to_error::deserialize::<_, RoomDescriptor>(&mut deserializer)
        {
            Ok(room) => room,
            Err(error) => {
                let path = error.path().to_string();
                let source = error.into_inner();
                return if path.is_empty() || path == "." {
                    Err(RoomError::Parse { source })
                } else {
                    Err(RoomError::ParseAt { path, source })
                };
            }
        };
        room.validate()?;
        Ok(room)
    }

    pub fn start_position(&self) -> Vec2 {
        Vec2::new(self.start_point[0], self.start_point[1])
    }

    pub fn door_rect(&self) -> Rect {
        let [x, y, w, h] = self.door;
        Rect::new(x, y, w, h)
    }

    pub fn wall_rects(&self) -> Vec<Rect> {
        derive_walls(&self.walls)
    }

    pub fn validate(&self) -> Result<(), RoomError> {
        if self.walls.len() < 2 {
            return Err(self.invalid(
                "walls",
                format!("expected at least 2 points, got {}", self.walls.len()),
            ));
        }
        for (index, [x, y]) in self.walls.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(self.invalid(format!("walls[{index}]"), "expected finite numbers"));
            }
        }
        if self.door.iter().any(|value| !value.is_finite()) {
            return Err(self.invalid("door", "expected finite numbers"));
        }
        if self.door[2] <= 0.0 || self.door[3] <= 0.0 {
            return Err(self.invalid(
                "door",
                format!(
                    "expected positive width and height, got {}x{}",
                    self.door[2], self.door[3]
                ),
            ));
        }
        if self.start_point.iter().any(|value| !value.is_finite()) {
            return Err(self.invalid("startPoint", "expected finite numbers"));
        }
        for (index, node) in self.nodes.iter().enumerate() {
            for (field, value) in node.numbers() {
                if !value.is_finite() {
                    return Err(self.invalid(
                        format!("nodes[{index}].{field}"),
                        format!("expected finite number, got {value}"),
                    ));
                }
            }
        }
        Ok(())
    }

    fn invalid(&self, field: impl Into<String>, message: impl Into<String>) -> RoomError {
        RoomError::Invalid {
            room: self.name.clone(),
            field: field.into(),
            message: message.into(),
        }
    }
}

/// One wall per polyline edge, closing the loop from the last point back to
/// the first. A zero extent on either axis becomes `WALL_THICKNESS`; a
/// non-zero width is also extended by `WALL_THICKNESS` so horizontal runs
/// overlap the corners. Non-zero heights are kept as-is.
pub fn derive_walls(points: &[[f32; 2]]) -> Vec<Rect> {
    let count = points.len();
    (0..count)
        .map(|index| {
            let [ax, ay] = points[index];
            let [bx, by] = points[(index + 1) % count];
            Rect::new(
                ax.min(bx),
                ay.min(by),
                pad_width((bx - ax).abs()),
                pad_height((by - ay).abs()),
            )
        })
        .collect()
}

fn pad_width(width: f32) -> f32 {
    if width == 0.0 {
        WALL_THICKNESS
    } else {
        width + WALL_THICKNESS
    }
}

fn pad_height(height: f32) -> f32 {
    if height == 0.0 {
        WALL_THICKNESS
    } else {
        height
    }
}

/// Ordered, validated set of rooms plus the door links between them.
#[derive(Debug, Clone)]
pub struct RoomAtlas {
    rooms: Vec<RoomDescriptor>,
}

impl RoomAtlas {
    /// Unnamed rooms are named `room-<n>` by position, starting at 1.
    pub fn new(mut rooms: Vec<RoomDescriptor>) -> Result<Self, RoomError> {
        if rooms.is_empty() {
            return Err(RoomError::EmptyAtlas);
        }
        for (index, room) in rooms.iter_mut().enumerate() {
            if room.name.trim().is_empty() {
                room.name = format!("room-{}", index + 1);
            }
            room.validate()?;
        }

        let mut seen = HashSet::<&str>::new();
        for room in &rooms {
            if !seen.insert(room.name.as_str()) {
                return Err(RoomError::DuplicateName {
                    name: room.name.clone(),
                });
            }
        }
        for room in &rooms {
            if let Some(next) = &room.next {
                if !seen.contains(next.as_str()) {
                    return Err(RoomError::UnknownNext {
                        room: room.name.clone(),
                        next: next.clone(),
                    });
                }
            }
        }

        Ok(Self { rooms })
    }

    /// Loads every `*.json` file in `dir`, ordered by file name. A room with
    /// no `name` takes its file stem.
    pub fn from_dir(dir: &Path) -> Result<Self, RoomError> {
        let entries = fs::read_dir(dir).map_err(|source| RoomError::ReadDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| RoomError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
            let path = entry.path();
            let is_room_file = path.is_file()
                && path
                    .extension()
                    .is_some_and(|extension| extension == ROOM_FILE_EXTENSION);
            if is_room_file {
                files.push(path);
            }
        }
        if files.is_empty() {
            return Err(RoomError::NoRoomFiles {
                path: dir.to_path_buf(),
            });
        }
        files.sort();

        let mut rooms = Vec::with_capacity(files.len());
        for path in files {
            rooms.push(read_room_file(&path)?);
        }
        Self::new(rooms)
    }

    pub fn rooms(&self) -> &[RoomDescriptor] {
        &self.rooms
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RoomDescriptor> {
        self.rooms.get(index)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.rooms.iter().position(|room| room.name == name)
    }

    /// The room reached through the door of room `current`.
    pub fn next_index(&self, current: usize) -> usize {
        let linked = self
            .rooms
            .get(current)
            .and_then(|room| room.next.as_deref())
            .and_then(|name| self.index_of(name));
        linked.unwrap_or_else(|| (current + 1) % self.rooms.len().max(1))
    }
}

fn read_room_file(path: &Path) -> Result<RoomDescriptor, RoomError> {
    let raw = fs::read_to_string(path).map_err(|source| RoomError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    let mut room = RoomDescriptor::from_json_str(&raw).map_err(|source| RoomError::InFile {
        path: path.to_path_buf(),
        source: Box::new(source),
    })?;
    if room.name.trim().is_empty() {
        if let Some(stem) = path.file_stem() {
            room.name = stem.to_string_lossy().into_owned();
        }
    }
    Ok(room)
}
