//! Ellipse shape.

use super::ShapeGeometry;
use kurbo::{BezPath, Ellipse as KurboEllipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in a `width` x `height` box anchored at the origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub width: f64,
    pub height: f64,
}

impl Ellipse {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> KurboEllipse {
        KurboEllipse::from_rect(Rect::new(0.0, 0.0, self.width, self.height))
    }
}

impl ShapeGeometry for Ellipse {
    fn local_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let rx = self.width / 2.0 + tolerance;
        let ry = self.height / 2.0 + tolerance;
        if rx <= 0.0 || ry <= 0.0 {
            return false;
        }
        let dx = (point.x - self.width / 2.0) / rx;
        let dy = (point.y - self.height / 2.0) / ry;
        dx * dx + dy * dy <= 1.0
    }

    fn to_path(&self) -> BezPath {
        self.as_kurbo().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_hit_test() {
        let ellipse = Ellipse::new(100.0, 50.0);
        assert!(ellipse.hit_test(Point::new(50.0, 25.0), 0.0));
        assert!(!ellipse.hit_test(Point::new(2.0, 2.0), 0.0)); // corner of the box
    }
}
