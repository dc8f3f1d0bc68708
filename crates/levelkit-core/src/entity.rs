use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{BBox, Point, Rotation, Vec3};
use crate::material::Material;

/// Unique entity identifier.
pub type EntityId = Uuid;

/// Name of a room. Entities join a room by storing its name.
pub type RoomId = String;

/// The four kinds of placeable entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityKind {
    Wall,
    Floor,
    Step,
    Block,
}

impl EntityKind {
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::Wall => "wall",
            EntityKind::Floor => "floor",
            EntityKind::Step => "step",
            EntityKind::Block => "block",
        }
    }
}

/// A reference to one permanent entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: EntityId,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: EntityId) -> Self {
        Self { kind, id }
    }
}

/// A straight wall segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    pub id: EntityId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(rename = "texture")]
    pub material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
}

impl Wall {
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::nil(),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            material: Material::default_wall(),
            room_id: None,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        self.start().distance_to(&self.end())
    }

    /// Endpoint box grown by `slop` on every side.
    pub fn bbox(&self, slop: f64) -> BBox {
        BBox::from_corners(self.start(), self.end()).expand(slop)
    }
}

/// An axis-aligned floor rectangle, stored by its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "texture")]
    pub material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
}

impl Floor {
    /// Rectangle spanned by two opposite corners, in either order.
    pub fn spanning(a: Point, b: Point) -> Self {
        let bb = BBox::from_corners(a, b);
        Self {
            id: Uuid::nil(),
            x: bb.min.x,
            y: bb.min.y,
            width: bb.width(),
            height: bb.height(),
            material: Material::default_floor(),
            room_id: None,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn bbox(&self) -> BBox {
        BBox::new(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }
}

/// One stair tread. Steps are only ever created a flight at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    pub rotation: Rotation,
    #[serde(rename = "texture")]
    pub material: Material,
    /// Flight direction, only used to order treads when drawing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<Rotation>,
    pub normal: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
}

/// An oriented rectangular volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    pub id: EntityId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub depth: f64,
    /// Thickness of the block.
    pub height: f64,
    pub rotation: Rotation,
    #[serde(rename = "texture")]
    pub material: Material,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_id: Option<RoomId>,
}

impl Block {
    /// Unrotated block filling the rectangle spanned by two corners.
    pub fn spanning(a: Point, b: Point, rotation: Rotation) -> Self {
        let bb = BBox::from_corners(a, b);
        let center = bb.center();
        Self {
            id: Uuid::nil(),
            x: center.x,
            y: 0.0,
            z: center.y,
            width: bb.width(),
            depth: bb.height(),
            height: 1.0,
            rotation,
            material: Material::default_block(),
            room_id: None,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.depth
    }
}

/// Player start location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub rotation: f64,
}

impl SpawnPoint {
    pub fn at(point: Point) -> Self {
        Self {
            x: point.x,
            y: 0.0,
            z: point.y,
            rotation: 0.0,
        }
    }
}

/// A centered footprint turned by a quarter-turn rotation. Hit-testing and
/// indexing treat steps and blocks identically through this view.
pub trait Oriented {
    /// Footprint center in plane space (`x`, `z`).
    fn center(&self) -> Point;
    /// Local `(width, depth)`.
    fn footprint(&self) -> (f64, f64);
    fn rotation(&self) -> Rotation;

    fn bbox(&self) -> BBox {
        let (width, depth) = self.footprint();
        BBox::oriented(self.center(), width, depth, self.rotation())
    }
}

impl Oriented for Step {
    fn center(&self) -> Point {
        Point::new(self.x, self.z)
    }

    fn footprint(&self) -> (f64, f64) {
        (self.width, self.depth)
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }
}

impl Oriented for Block {
    fn center(&self) -> Point {
        Point::new(self.x, self.z)
    }

    fn footprint(&self) -> (f64, f64) {
        (self.width, self.depth)
    }

    fn rotation(&self) -> Rotation {
        self.rotation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_spanning_normalizes() {
        let floor = Floor::spanning(Point::new(200.0, 150.0), Point::new(100.0, 50.0));
        assert!((floor.x - 100.0).abs() < 1e-10);
        assert!((floor.y - 50.0).abs() < 1e-10);
        assert!((floor.width - 100.0).abs() < 1e-10);
        assert!((floor.height - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_block_spanning_centers() {
        let block = Block::spanning(Point::new(0.0, 0.0), Point::new(100.0, 50.0), Rotation::East);
        assert!((block.x - 50.0).abs() < 1e-10);
        assert!((block.z - 25.0).abs() < 1e-10);
        assert!((block.area() - 5000.0).abs() < 1e-10);
        let bb = block.bbox();
        assert!((bb.width() - 50.0).abs() < 1e-10);
        assert!((bb.height() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_wall_serializes_texture_and_room() {
        let mut wall = Wall::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["texture"], "north");
        assert!(json.get("roomId").is_none());

        wall.room_id = Some("1".to_string());
        let json = serde_json::to_value(&wall).unwrap();
        assert_eq!(json["roomId"], "1");
    }
}
