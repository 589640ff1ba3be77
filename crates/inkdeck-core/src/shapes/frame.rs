//! Frame shape: the visible boundary of a slide.

use super::ShapeGeometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// A named rectangular container. Children are clipped to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Width of the frame.
    pub width: f64,
    /// Height of the frame.
    pub height: f64,
    /// Display name shown above the frame.
    pub name: String,
}

impl Frame {
    pub fn new(width: f64, height: f64, name: impl Into<String>) -> Self {
        Self {
            width,
            height,
            name: name.into(),
        }
    }

    pub fn as_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

impl ShapeGeometry for Frame {
    fn local_bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.as_rect().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.as_rect().to_path(0.1)
    }
}
