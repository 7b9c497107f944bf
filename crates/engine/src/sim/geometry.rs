#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Axis-aligned box anchored at its top-left corner; `y` grows downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2 {
            x: self.x + self.w * 0.5,
            y: self.y + self.h * 0.5,
        }
    }
}

/// Boxes overlap unless one lies strictly beyond an edge of the other.
/// Touching edges count as overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.bottom() < b.top() || a.top() > b.bottom() || a.right() < b.left() || a.left() > b.right())
}

pub fn distance(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    (dx * dx + dy * dy).sqrt()
}

/// Heading in degrees of the vector pointing from `from` to `to`.
/// Coincident points yield 0.
pub fn angle_degrees(from: Vec2, to: Vec2) -> f32 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let degrees = dy.atan2(dx).to_degrees();
    if degrees.is_finite() {
        degrees
    } else {
        0.0
    }
}

pub fn heading_vector(angle_degrees: f32) -> Vec2 {
    let radians = angle_degrees.to_radians();
    Vec2 {
        x: radians.cos(),
        y: radians.sin(),
    }
}
