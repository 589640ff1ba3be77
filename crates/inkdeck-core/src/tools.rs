//! Tool system for the canvas.

use crate::shapes::{
    Ellipse, Freehand, Line, Rectangle, Shape, ShapeKind, ShapeProps, ShapeStyle, Text,
};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Freehand,
    Text,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Line,
        ToolKind::Arrow,
        ToolKind::Freehand,
        ToolKind::Text,
    ];

    /// The shape kind this tool creates, if any.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select => None,
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            ToolKind::Line | ToolKind::Arrow => Some(ShapeKind::Line),
            ToolKind::Freehand => Some(ShapeKind::Freehand),
            ToolKind::Text => Some(ShapeKind::Text),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToolKind::Select => "Select",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Ellipse => "Ellipse",
            ToolKind::Line => "Line",
            ToolKind::Arrow => "Arrow",
            ToolKind::Freehand => "Pen",
            ToolKind::Text => "Text",
        }
    }

    /// Keyboard shortcut key.
    pub fn shortcut(self) -> &'static str {
        match self {
            ToolKind::Select => "V",
            ToolKind::Rectangle => "R",
            ToolKind::Ellipse => "E",
            ToolKind::Line => "L",
            ToolKind::Arrow => "A",
            ToolKind::Freehand => "P",
            ToolKind::Text => "T",
        }
    }

    /// Build a default-sized shape for this tool, centered on `center`
    /// (in the coordinate space of the eventual parent).
    pub fn default_shape(self, center: Point, style: ShapeStyle, opacity: f64) -> Option<Shape> {
        const W: f64 = 200.0;
        const H: f64 = 120.0;
        let top_left = Point::new(center.x - W / 2.0, center.y - H / 2.0);
        let (props, position) = match self {
            ToolKind::Select => return None,
            ToolKind::Rectangle => (ShapeProps::Rectangle(Rectangle::new(W, H)), top_left),
            ToolKind::Ellipse => (ShapeProps::Ellipse(Ellipse::new(W, H)), top_left),
            ToolKind::Line => (
                ShapeProps::Line(Line::new(Point::ZERO, Point::new(W, 0.0))),
                Point::new(top_left.x, center.y),
            ),
            ToolKind::Arrow => (
                ShapeProps::Line(Line::arrow(Point::ZERO, Point::new(W, 0.0))),
                Point::new(top_left.x, center.y),
            ),
            ToolKind::Freehand => (
                ShapeProps::Freehand(Freehand::from_points(vec![
                    Point::new(0.0, H / 2.0),
                    Point::new(W / 4.0, 0.0),
                    Point::new(W / 2.0, H / 2.0),
                    Point::new(3.0 * W / 4.0, H),
                    Point::new(W, H / 2.0),
                ])),
                top_left,
            ),
            ToolKind::Text => {
                let text = Text::new("Text", style.size.font_size());
                let (w, h) = text.approximate_size();
                (
                    ShapeProps::Text(text),
                    Point::new(center.x - w / 2.0, center.y - h / 2.0),
                )
            }
        };
        let mut shape = Shape::new(props, position).with_style(style);
        shape.opacity = opacity;
        Some(shape)
    }
}
