use serde::{Deserialize, Serialize};

use levelkit_core::Point;

/// Placement of the editor canvas on the page. Plane space has its origin
/// at the canvas' top-left corner, one plane unit per CSS pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Page x of the canvas' left edge.
    pub left: f64,
    /// Page y of the canvas' top edge.
    pub top: f64,
    pub canvas_width: f64,
    pub canvas_height: f64,
}

impl Viewport {
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            canvas_width,
            canvas_height,
        }
    }

    pub fn with_offset(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    pub fn resize(&mut self, canvas_width: f64, canvas_height: f64) {
        self.canvas_width = canvas_width;
        self.canvas_height = canvas_height;
    }

    /// Convert a pointer position in page coordinates to plane space.
    pub fn client_to_plane(&self, client_x: f64, client_y: f64) -> Point {
        Point::new(client_x - self.left, client_y - self.top)
    }

    /// Vertical then horizontal grid lines every `spacing` units, starting at
    /// the origin and stopping before the far canvas edge.
    pub fn grid_lines(&self, spacing: f64) -> Vec<(Point, Point)> {
        if spacing <= 0.0 {
            return Vec::new();
        }
        let mut lines = Vec::new();
        let mut x = 0.0;
        while x < self.canvas_width {
            lines.push((Point::new(x, 0.0), Point::new(x, self.canvas_height)));
            x += spacing;
        }
        let mut y = 0.0;
        while y < self.canvas_height {
            lines.push((Point::new(0.0, y), Point::new(self.canvas_width, y)));
            y += spacing;
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_to_plane() {
        let vp = Viewport::new(800.0, 600.0).with_offset(40.0, 10.0);
        assert_eq!(vp.client_to_plane(140.0, 60.0), Point::new(100.0, 50.0));
    }

    #[test]
    fn test_grid_lines() {
        let vp = Viewport::new(120.0, 100.0);
        let lines = vp.grid_lines(50.0);
        // x = 0, 50, 100 and y = 0, 50
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], (Point::new(100.0, 0.0), Point::new(100.0, 100.0)));
        assert!(vp.grid_lines(0.0).is_empty());
    }

    #[test]
    fn test_resize_regrows_grid() {
        let mut vp = Viewport::new(120.0, 100.0).with_offset(5.0, 5.0);
        vp.resize(220.0, 100.0);
        assert_eq!((vp.canvas_width, vp.canvas_height), (220.0, 100.0));
        // x = 0..200 and y = 0, 50
        assert_eq!(vp.grid_lines(50.0).len(), 7);
        assert_eq!(vp.client_to_plane(5.0, 5.0), Point::new(0.0, 0.0));
    }
}
