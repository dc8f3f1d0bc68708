use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

/// A 2D point in plane coordinates (editor units, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A 3D vector, used for surface normals in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A quarter-turn orientation. Serialized as its index 0-3, where index `k`
/// stands for `k * 90` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    pub fn index(self) -> u8 {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Wraps any integer into one of the four orientations.
    pub fn from_index(index: i64) -> Self {
        Self::ALL[index.rem_euclid(4) as usize]
    }

    pub fn radians(self) -> f64 {
        f64::from(self.index()) * FRAC_PI_2
    }

    pub fn degrees(self) -> u16 {
        u16::from(self.index()) * 90
    }

    pub fn clockwise(self) -> Self {
        Self::from_index(i64::from(self.index()) + 1)
    }

    pub fn counter_clockwise(self) -> Self {
        Self::from_index(i64::from(self.index()) + 3)
    }

    /// Outward normal of a tread facing this way, in world space.
    pub fn normal(self) -> Vec3 {
        match self {
            Rotation::North => Vec3::new(0.0, 0.0, -1.0),
            Rotation::East => Vec3::new(1.0, 0.0, 0.0),
            Rotation::South => Vec3::new(0.0, 0.0, 1.0),
            Rotation::West => Vec3::new(-1.0, 0.0, 0.0),
        }
    }

    /// Rotate an offset by the negative of this orientation, taking a world
    /// offset into the entity's local frame. Exact for quarter turns.
    pub fn to_local(self, dx: f64, dy: f64) -> (f64, f64) {
        match self {
            Rotation::North => (dx, dy),
            Rotation::East => (dy, -dx),
            Rotation::South => (-dx, -dy),
            Rotation::West => (-dy, dx),
        }
    }

    /// Inverse of [`Rotation::to_local`].
    pub fn to_world(self, lx: f64, ly: f64) -> (f64, f64) {
        match self {
            Rotation::North => (lx, ly),
            Rotation::East => (-ly, lx),
            Rotation::South => (-lx, -ly),
            Rotation::West => (ly, -lx),
        }
    }

    /// True when local x runs along world y.
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::East | Rotation::West)
    }
}

impl From<Rotation> for u8 {
    fn from(rotation: Rotation) -> Self {
        rotation.index()
    }
}

impl TryFrom<u8> for Rotation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=3 => Ok(Self::ALL[value as usize]),
            other => Err(format!("rotation index {other} out of range 0-3")),
        }
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min: Point,
    pub max: Point,
}

impl BBox {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min: Point::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Box of a `width` x `depth` footprint centered at `center` and turned by
    /// `rotation`.
    pub fn oriented(center: Point, width: f64, depth: f64, rotation: Rotation) -> Self {
        let (w, d) = if rotation.is_sideways() {
            (depth, width)
        } else {
            (width, depth)
        };
        Self::from_corners(
            Point::new(center.x - w / 2.0, center.y - d / 2.0),
            Point::new(center.x + w / 2.0, center.y + d / 2.0),
        )
    }

    pub fn expand(&self, margin: f64) -> Self {
        Self {
            min: self.min.translate(-margin, -margin),
            max: self.max.translate(margin, margin),
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
