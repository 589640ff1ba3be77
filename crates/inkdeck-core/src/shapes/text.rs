//! Text shape.

use super::ShapeGeometry;
use kurbo::{BezPath, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};

/// Approximate glyph advance as a fraction of the font size.
const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Line height as a fraction of the font size.
const LINE_HEIGHT_RATIO: f64 = 1.35;

/// A block of text anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// The text content.
    pub content: String,
    /// Font size in page units used for layout.
    pub font_size: f64,
}

impl Text {
    pub fn new(content: impl Into<String>, font_size: f64) -> Self {
        Self {
            content: content.into(),
            font_size,
        }
    }

    /// Approximate layout size (width, height).
    pub fn approximate_size(&self) -> (f64, f64) {
        let lines: Vec<&str> = self.content.lines().collect();
        let line_count = lines.len().max(1) as f64;
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0).max(1) as f64;
        (
            longest * self.font_size * CHAR_WIDTH_RATIO,
            line_count * self.font_size * LINE_HEIGHT_RATIO,
        )
    }
}

impl ShapeGeometry for Text {
    fn local_bounds(&self) -> Rect {
        let (w, h) = self.approximate_size();
        Rect::new(0.0, 0.0, w, h)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.local_bounds().inflate(tolerance, tolerance).contains(point)
    }

    fn to_path(&self) -> BezPath {
        self.local_bounds().to_path(0.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_approximate_size() {
        let text = Text::new("Hello\nWorld!", 20.0);
        let (w, h) = text.approximate_size();
        assert!((w - 6.0 * 20.0 * CHAR_WIDTH_RATIO).abs() < 1e-10);
        assert!((h - 2.0 * 20.0 * LINE_HEIGHT_RATIO).abs() < 1e-10);
    }

    #[test]
    fn test_empty_text_has_area() {
        let text = Text::new("", 20.0);
        assert!(text.local_bounds().area() > 0.0);
    }
}
