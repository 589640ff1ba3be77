//! Freehand drawing shape.

use super::{ShapeGeometry, point_to_polyline_dist, points_bounds};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A freehand drawing (series of points).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    /// Points in the freehand path.
    pub points: Vec<Point>,
}

impl Freehand {
    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeGeometry for Freehand {
    fn local_bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.points.as_slice() {
            [] => false,
            [only] => only.distance(point) <= tolerance,
            points => point_to_polyline_dist(point, points) <= tolerance,
        }
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        if self.points.is_empty() {
            return path;
        }
        path.move_to(self.points[0]);
        if self.points.len() < 3 {
            for p in &self.points[1..] {
                path.line_to(*p);
            }
            return path;
        }
        // Smooth through midpoints
        for w in self.points.windows(2).skip(1) {
            let mid = w[0].midpoint(w[1]);
            path.quad_to(w[0], mid);
        }
        if let Some(last) = self.points.last() {
            path.line_to(*last);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freehand_creation() {
        let mut freehand = Freehand::default();
        assert!(freehand.is_empty());
        freehand.add_point(Point::new(0.0, 0.0));
        freehand.add_point(Point::new(10.0, 10.0));
        assert_eq!(freehand.len(), 2);
    }

    #[test]
    fn test_freehand_hit_test() {
        let freehand = Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
        ]);
        assert!(freehand.hit_test(Point::new(15.0, 1.0), 2.0));
        assert!(!freehand.hit_test(Point::new(15.0, 10.0), 2.0));
        assert!(!Freehand::default().hit_test(Point::ZERO, 10.0));
    }
}
