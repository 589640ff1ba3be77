//! Line and arrow shapes.

use super::{ShapeGeometry, point_to_polyline_dist, points_bounds};
use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A polyline, optionally ending in an arrowhead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Points in local coordinates (at least two).
    pub points: Vec<Point>,
    /// Draw an arrowhead at the last point.
    #[serde(default)]
    pub arrowhead: bool,
}

impl Line {
    /// A straight segment from `start` to `end`.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
            arrowhead: false,
        }
    }

    /// A straight arrow from `start` to `end`.
    pub fn arrow(start: Point, end: Point) -> Self {
        Self {
            points: vec![start, end],
            arrowhead: true,
        }
    }
}

impl ShapeGeometry for Line {
    fn local_bounds(&self) -> Rect {
        points_bounds(&self.points)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance.max(1.0)
    }

    fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut iter = self.points.iter();
        if let Some(first) = iter.next() {
            path.move_to(*first);
            for p in iter {
                path.line_to(*p);
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_bounds_and_hit() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        let bounds = line.local_bounds();
        assert!((bounds.width() - 100.0).abs() < f64::EPSILON);
        assert!(line.hit_test(Point::new(50.0, 2.0), 3.0));
        assert!(!line.hit_test(Point::new(50.0, 20.0), 3.0));
    }

    #[test]
    fn test_arrow_flag() {
        assert!(Line::arrow(Point::ZERO, Point::new(1.0, 1.0)).arrowhead);
        assert!(!Line::new(Point::ZERO, Point::new(1.0, 1.0)).arrowhead);
    }
}
