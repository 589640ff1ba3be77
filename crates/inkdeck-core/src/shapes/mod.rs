//! Shape records stored on canvas pages.

mod ellipse;
mod frame;
mod freehand;
mod line;
mod rectangle;
mod style;
mod text;

pub use ellipse::Ellipse;
pub use frame::Frame;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use style::{
    ColorStyle, DashStyle, FillStyle, FontStyle, ShapeStyle, SizeStyle, StyleKey, StyleValue,
};
pub use text::Text;

use kurbo::{Affine, BezPath, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShapeId(Uuid);

impl ShapeId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shape:{}", self.0)
    }
}

/// Distance from a point to a line segment (a to b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Bounding box of a point list, or an empty rect at the origin.
pub(crate) fn points_bounds(points: &[Point]) -> Rect {
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return Rect::ZERO;
    };
    iter.fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p))
}

/// Geometry of a shape in its own coordinate space.
pub trait ShapeGeometry {
    /// Bounding box in local coordinates.
    fn local_bounds(&self) -> Rect;

    /// Check if a point (in local coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool;

    /// Outline path in local coordinates.
    fn to_path(&self) -> BezPath;
}

/// Kind of a shape, used for style applicability and tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Frame,
    Rectangle,
    Ellipse,
    Text,
    Line,
    Freehand,
}

impl ShapeKind {
    /// Style properties that apply to shapes of this kind.
    pub fn supported_styles(self) -> &'static [StyleKey] {
        match self {
            ShapeKind::Frame => &[],
            ShapeKind::Rectangle | ShapeKind::Ellipse | ShapeKind::Freehand => &[
                StyleKey::Color,
                StyleKey::Fill,
                StyleKey::Dash,
                StyleKey::Size,
            ],
            ShapeKind::Text => &[StyleKey::Color, StyleKey::Size, StyleKey::Font],
            ShapeKind::Line => &[StyleKey::Color, StyleKey::Dash, StyleKey::Size],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Frame => "frame",
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Text => "text",
            ShapeKind::Line => "line",
            ShapeKind::Freehand => "freehand",
        }
    }
}

/// Kind-specific shape properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ShapeProps {
    Frame(Frame),
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Text(Text),
    Line(Line),
    Freehand(Freehand),
}

impl ShapeProps {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ShapeProps::Frame(_) => ShapeKind::Frame,
            ShapeProps::Rectangle(_) => ShapeKind::Rectangle,
            ShapeProps::Ellipse(_) => ShapeKind::Ellipse,
            ShapeProps::Text(_) => ShapeKind::Text,
            ShapeProps::Line(_) => ShapeKind::Line,
            ShapeProps::Freehand(_) => ShapeKind::Freehand,
        }
    }

    fn geometry(&self) -> &dyn ShapeGeometry {
        match self {
            ShapeProps::Frame(s) => s,
            ShapeProps::Rectangle(s) => s,
            ShapeProps::Ellipse(s) => s,
            ShapeProps::Text(s) => s,
            ShapeProps::Line(s) => s,
            ShapeProps::Freehand(s) => s,
        }
    }
}

/// A shape record on a page.
///
/// `position` and `rotation` are relative to the parent shape, or to the page
/// when the shape has no parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    /// Parent shape (a frame or another container), `None` for the page root.
    pub parent: Option<ShapeId>,
    pub position: Point,
    /// Rotation angle in radians.
    #[serde(default)]
    pub rotation: f64,
    #[serde(default)]
    pub is_locked: bool,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    pub opacity: f64,
    pub style: ShapeStyle,
    pub props: ShapeProps,
}

impl Shape {
    /// Create a new unparented shape with a fresh id.
    pub fn new(props: ShapeProps, position: Point) -> Self {
        Self {
            id: ShapeId::new(),
            parent: None,
            position,
            rotation: 0.0,
            is_locked: false,
            opacity: 1.0,
            style: ShapeStyle::default(),
            props,
        }
    }

    /// Builder: use a specific id.
    pub fn with_id(mut self, id: ShapeId) -> Self {
        self.id = id;
        self
    }

    /// Builder: set the parent.
    pub fn with_parent(mut self, parent: Option<ShapeId>) -> Self {
        self.parent = parent;
        self
    }

    /// Builder: set the style.
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.props.kind()
    }

    pub fn is_frame(&self) -> bool {
        matches!(self.props, ShapeProps::Frame(_))
    }

    pub fn as_frame(&self) -> Option<&Frame> {
        match &self.props {
            ShapeProps::Frame(frame) => Some(frame),
            _ => None,
        }
    }

    /// Transform from this shape's local space to its parent's space.
    pub fn local_transform(&self) -> Affine {
        Affine::translate(self.position.to_vec2()) * Affine::rotate(self.rotation)
    }

    pub fn local_bounds(&self) -> Rect {
        self.props.geometry().local_bounds()
    }

    pub fn hit_test_local(&self, point: Point, tolerance: f64) -> bool {
        self.props.geometry().hit_test(point, tolerance)
    }

    pub fn to_path(&self) -> BezPath {
        self.props.geometry().to_path()
    }

    /// Check if a style property applies to this shape.
    pub fn supports_style(&self, key: StyleKey) -> bool {
        self.kind().supported_styles().contains(&key)
    }

    /// Read a style property, if it applies to this shape.
    pub fn style_value(&self, key: StyleKey) -> Option<StyleValue> {
        self.supports_style(key).then(|| self.style.get(key))
    }

    /// Write a style property. Returns false if it does not apply.
    pub fn set_style_value(&mut self, value: StyleValue) -> bool {
        if !self.supports_style(value.key()) {
            return false;
        }
        self.style.set(value);
        true
    }
}

/// A partial update applied to an existing shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeUpdate {
    pub is_locked: Option<bool>,
    pub position: Option<Point>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub props: Option<ShapeProps>,
}

impl ShapeUpdate {
    /// An update that only locks the shape.
    pub fn lock() -> Self {
        Self {
            is_locked: Some(true),
            ..Default::default()
        }
    }

    /// Apply the update. Props of a different kind are ignored.
    pub fn apply(&self, shape: &mut Shape) {
        if let Some(locked) = self.is_locked {
            shape.is_locked = locked;
        }
        if let Some(position) = self.position {
            shape.position = position;
        }
        if let Some(rotation) = self.rotation {
            shape.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            shape.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(props) = &self.props {
            if props.kind() == shape.kind() {
                shape.props = props.clone();
            } else {
                log::warn!(
                    "Ignoring {} props for {} shape {}",
                    props.kind().name(),
                    shape.kind().name(),
                    shape.id
                );
            }
        }
    }
}
