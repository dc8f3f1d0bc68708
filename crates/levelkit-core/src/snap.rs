//! Grid and angle snapping of pointer positions.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_4};

use crate::geometry::Point;

/// Quantizes plane coordinates to a square grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapper {
    grid: f64,
}

impl Snapper {
    pub fn new(grid: f64) -> Self {
        Self { grid }
    }

    pub fn grid(&self) -> f64 {
        self.grid
    }

    /// Round each coordinate to the nearest grid multiple. Halves round up.
    pub fn snap_to_grid(&self, p: Point) -> Point {
        Point::new(self.snap_scalar(p.x), self.snap_scalar(p.y))
    }

    fn snap_scalar(&self, v: f64) -> f64 {
        (v / self.grid + 0.5).floor() * self.grid
    }

    /// Constrain the segment `start -> end` to one of the eight compass
    /// directions, keeping its length, then snap the run along that
    /// direction to whole grid cells. With a grid-aligned `start` the end
    /// is grid-aligned and the segment stays on its direction.
    pub fn enforce_angle(&self, start: Point, end: Point) -> Point {
        let dx = end.x - start.x;
        // Plane y grows downward; measure angles with y up.
        let dy = start.y - end.y;
        let length = (dx * dx + dy * dy).sqrt();

        let octant = (dy.atan2(dx) / FRAC_PI_4).round() as i64;
        let (ux, uy) = match octant.rem_euclid(8) {
            0 => (1.0, 0.0),
            1 => (1.0, -1.0),
            2 => (0.0, -1.0),
            3 => (-1.0, -1.0),
            4 => (-1.0, 0.0),
            5 => (-1.0, 1.0),
            6 => (0.0, 1.0),
            _ => (1.0, 1.0),
        };
        let run = if ux != 0.0 && uy != 0.0 {
            length * FRAC_1_SQRT_2
        } else {
            length
        };
        let run = self.snap_scalar(run);
        Point::new(start.x + ux * run, start.y + uy * run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GRID_SIZE, LEGACY_GRID_SIZE};

    fn is_eighth_turn(start: Point, end: Point) -> bool {
        let dx = end.x - start.x;
        let dy = start.y - end.y;
        if dx == 0.0 && dy == 0.0 {
            return true;
        }
        let steps = dy.atan2(dx) / FRAC_PI_4;
        (steps - steps.round()).abs() < 1e-9
    }

    #[test]
    fn test_snap_to_grid() {
        let snapper = Snapper::new(GRID_SIZE);
        assert_eq!(snapper.snap_to_grid(Point::new(24.0, 26.0)), Point::new(0.0, 50.0));
        assert_eq!(snapper.snap_to_grid(Point::new(-26.0, 125.0)), Point::new(-50.0, 150.0));
    }

    #[test]
    fn test_snap_is_idempotent() {
        for grid in [GRID_SIZE, LEGACY_GRID_SIZE] {
            let snapper = Snapper::new(grid);
            let mut v = -333.3;
            while v < 333.3 {
                let p = Point::new(v, v * 0.37 + 11.0);
                let once = snapper.snap_to_grid(p);
                assert_eq!(snapper.snap_to_grid(once), once);
                v += 7.9;
            }
        }
    }

    #[test]
    fn test_enforce_angle_axis_aligned() {
        let snapper = Snapper::new(GRID_SIZE);
        let end = snapper.enforce_angle(Point::new(100.0, 100.0), Point::new(310.0, 108.0));
        assert_eq!(end, Point::new(300.0, 100.0));
        let end = snapper.enforce_angle(Point::new(100.0, 100.0), Point::new(96.0, -120.0));
        assert_eq!(end, Point::new(100.0, -100.0));
    }

    #[test]
    fn test_enforce_angle_diagonal() {
        let snapper = Snapper::new(LEGACY_GRID_SIZE);
        let start = Point::new(0.0, 0.0);
        let end = snapper.enforce_angle(start, Point::new(200.0, -190.0));
        // up and to the right on screen
        assert!(end.x > 0.0 && end.y < 0.0);
        assert!((end.x + end.y).abs() < 1e-9);
    }

    #[test]
    fn test_enforce_angle_quantizes() {
        // Near-continuous grid: direction only.
        let snapper = Snapper::new(1e-9);
        let start = Point::new(13.0, -7.0);
        for (x, y) in [(50.0, 3.0), (-40.0, 90.0), (5.0, -80.0), (-61.0, -59.0), (33.0, 20.0)] {
            let end = snapper.enforce_angle(start, Point::new(x, y));
            assert!(is_eighth_turn(start, end), "({x}, {y}) -> {end:?}");
        }

        let snapper = Snapper::new(GRID_SIZE);
        let start = Point::new(100.0, 100.0);
        for (x, y) in [(500.0, 140.0), (90.0, 600.0), (-300.0, 95.0), (120.0, -400.0)] {
            let end = snapper.enforce_angle(start, Point::new(x, y));
            assert!(is_eighth_turn(start, end), "({x}, {y}) -> {end:?}");
        }
    }

    #[test]
    fn test_enforce_angle_half_cell_diagonals() {
        for grid in [GRID_SIZE, LEGACY_GRID_SIZE] {
            let snapper = Snapper::new(grid);
            for start in [Point::new(0.0, 0.0), Point::new(3.0 * grid, -2.0 * grid)] {
                for k in 0..5 {
                    let a = (2 * k + 1) as f64 * grid / 2.0;
                    for (sx, sy) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
                        let pointer = start.translate(sx * a, sy * a);
                        let end = snapper.enforce_angle(start, pointer);
                        assert!(is_eighth_turn(start, end), "{grid}: {pointer:?} -> {end:?}");
                        assert_eq!(snapper.snap_to_grid(end), end);
                        assert!(((end.x - start.x).abs() - (end.y - start.y).abs()).abs() < 1e-9);
                    }
                }
            }
        }

        let snapper = Snapper::new(GRID_SIZE);
        let end = snapper.enforce_angle(Point::new(0.0, 0.0), Point::new(75.0, -75.0));
        assert!((end.x + end.y).abs() < 1e-9 && end.x > 0.0);
        let end = snapper.enforce_angle(Point::new(0.0, 0.0), Point::new(-125.0, 125.0));
        assert!((end.x + end.y).abs() < 1e-9 && end.x < 0.0);
    }
}
