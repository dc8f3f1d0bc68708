use crate::entity::{Block, Floor, Oriented, Step, Wall};
use crate::geometry::Point;

/// Point-versus-entity hit tests for a single pointer position.
#[derive(Debug, Clone, Copy)]
pub struct DetectCollision {
    point: Point,
    wall_thickness: f64,
}

impl DetectCollision {
    pub fn new(point: Point, wall_thickness: f64) -> Self {
        Self {
            point,
            wall_thickness,
        }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    /// Hit when the point is within half the wall thickness of the wall's
    /// line and inside the endpoint box grown by the full thickness. Near the
    /// ends this is looser than a capsule.
    pub fn is_point_on_wall(&self, wall: &Wall) -> bool {
        let a = wall.y2 - wall.y1;
        let b = wall.x1 - wall.x2;
        let c = wall.x2 * wall.y1 - wall.x1 * wall.y2;

        let norm = (a * a + b * b).sqrt();
        if norm <= f64::EPSILON {
            return false;
        }
        let distance = (a * self.point.x + b * self.point.y + c).abs() / norm;

        distance <= self.wall_thickness / 2.0
            && wall.bbox(self.wall_thickness).contains_point(&self.point)
    }

    pub fn is_point_on_floor(&self, floor: &Floor) -> bool {
        floor.bbox().contains_point(&self.point)
    }

    pub fn is_point_on_step(&self, step: &Step) -> bool {
        self.is_point_on_oriented(step)
    }

    pub fn is_point_on_block(&self, block: &Block) -> bool {
        self.is_point_on_oriented(block)
    }

    /// Undo the entity's rotation around its center, then test against the
    /// axis-aligned footprint.
    pub fn is_point_on_oriented<T: Oriented>(&self, entity: &T) -> bool {
        let center = entity.center();
        let (lx, ly) = entity
            .rotation()
            .to_local(self.point.x - center.x, self.point.y - center.y);
        let (width, depth) = entity.footprint();
        lx.abs() <= width / 2.0 && ly.abs() <= depth / 2.0
    }
}
