//! Canvas preview painted with egui.
//!
//! Shapes are flattened to polylines through the camera transform. This is
//! an outline preview, not a full renderer: dash patterns and fills are
//! approximated and text uses egui's default font.

use egui::{Align2, Color32, CornerRadius, FontId, Painter, Pos2, Stroke, StrokeKind};
use inkdeck_core::shapes::{DashStyle, FillStyle, Frame, Shape, ShapeId, ShapeProps, ShapeStyle};
use inkdeck_core::{Camera, Page};
use inkdeck_widgets::theme;
use kurbo::{Affine, BezPath, PathEl, Point, Rect};

/// A flattened subpath in screen space.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Pos2>,
    pub closed: bool,
}

fn to_pos2(point: Point) -> Pos2 {
    Pos2::new(point.x as f32, point.y as f32)
}

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        to_pos2(Point::new(rect.x0, rect.y0)),
        to_pos2(Point::new(rect.x1, rect.y1)),
    )
}

/// Flatten a path into screen-space polylines.
pub fn flatten_path(path: &BezPath, transform: Affine) -> Vec<Polyline> {
    let mut polylines = Vec::new();
    let mut current: Option<Polyline> = None;
    let screen_path = transform * path.clone();
    kurbo::flatten(screen_path.iter(), 0.25, |el| match el {
        PathEl::MoveTo(p) => {
            if let Some(done) = current.take() {
                polylines.push(done);
            }
            current = Some(Polyline {
                points: vec![to_pos2(p)],
                closed: false,
            });
        }
        PathEl::LineTo(p) => {
            if let Some(line) = current.as_mut() {
                line.points.push(to_pos2(p));
            }
        }
        PathEl::ClosePath => {
            if let Some(mut line) = current.take() {
                if line.points.len() > 1 && line.points.first() == line.points.last() {
                    line.points.pop();
                }
                line.closed = true;
                polylines.push(line);
            }
        }
        // flatten only emits lines
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    if let Some(done) = current {
        polylines.push(done);
    }
    polylines
}

/// Stroke color for a style at an opacity.
pub fn stroke_color(style: &ShapeStyle, opacity: f64) -> Color32 {
    let rgba = style.color.color().to_rgba8();
    let alpha = (f64::from(rgba.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color32::from_rgba_unmultiplied(rgba.r, rgba.g, rgba.b, alpha)
}

/// Fill color for a style at an opacity, `None` for unfilled shapes.
pub fn fill_color(style: &ShapeStyle, opacity: f64) -> Option<Color32> {
    let strength = match style.fill {
        FillStyle::None => return None,
        FillStyle::Semi => 0.25,
        FillStyle::Pattern => 0.5,
        FillStyle::Solid => 1.0,
    };
    Some(stroke_color(style, opacity * strength))
}

/// Paint the page's shapes and the selection outline.
pub fn paint_page(painter: &Painter, page: &Page, camera: &Camera, selection: &[ShapeId]) {
    let view = camera.transform();

    for shape in page.shapes_ordered() {
        let Some(local_to_page) = page.page_transform(shape.id) else {
            continue;
        };
        let transform = view * local_to_page;
        match &shape.props {
            ShapeProps::Frame(frame) => paint_frame(painter, transform, frame),
            ShapeProps::Text(text) => {
                painter.text(
                    to_pos2(transform * Point::ZERO),
                    Align2::LEFT_TOP,
                    &text.content,
                    FontId::proportional((text.font_size * camera.zoom) as f32),
                    stroke_color(&shape.style, shape.opacity),
                );
            }
            _ => paint_outline(painter, transform, shape, camera.zoom),
        }
    }

    for &id in selection {
        if let Some(bounds) = page.page_bounds(id) {
            let rect = to_egui_rect(view.transform_rect_bbox(bounds)).expand(3.0);
            painter.rect_stroke(
                rect,
                CornerRadius::same(2),
                Stroke::new(1.5, theme::ACCENT),
                StrokeKind::Outside,
            );
        }
    }
}

fn paint_frame(painter: &Painter, transform: Affine, frame: &Frame) {
    let rect = to_egui_rect(transform.transform_rect_bbox(frame.as_rect()));
    painter.rect_filled(rect, CornerRadius::ZERO, Color32::WHITE);
    painter.rect_stroke(
        rect,
        CornerRadius::ZERO,
        Stroke::new(1.0, theme::BORDER),
        StrokeKind::Outside,
    );
    painter.text(
        rect.left_top() - egui::vec2(0.0, 4.0),
        Align2::LEFT_BOTTOM,
        &frame.name,
        FontId::proportional(12.0),
        theme::TEXT_MUTED,
    );
}

fn paint_outline(painter: &Painter, transform: Affine, shape: &Shape, zoom: f64) {
    let color = stroke_color(&shape.style, shape.opacity);
    let width = (shape.style.size.stroke_width() * zoom).max(1.0) as f32;
    let stroke = Stroke::new(width, color);
    let fillable = matches!(shape.props, ShapeProps::Rectangle(_) | ShapeProps::Ellipse(_));

    for line in flatten_path(&shape.to_path(), transform) {
        let mut points = line.points;
        if line.closed {
            if let Some(fill) = fill_color(&shape.style, shape.opacity).filter(|_| fillable) {
                painter.add(egui::Shape::convex_polygon(points.clone(), fill, Stroke::NONE));
            }
            if let Some(&first) = points.first() {
                points.push(first);
            }
        }
        match shape.style.dash {
            DashStyle::Dashed => {
                painter.extend(egui::Shape::dashed_line(&points, stroke, width * 4.0, width * 3.0));
            }
            DashStyle::Dotted => {
                painter.extend(egui::Shape::dotted_line(&points, color, width * 3.0, width / 2.0));
            }
            DashStyle::Draw | DashStyle::Solid => {
                painter.add(egui::Shape::line(points, stroke));
            }
        }
    }

    if let ShapeProps::Line(line) = &shape.props {
        if line.arrowhead {
            paint_arrowhead(painter, transform, &line.points, stroke);
        }
    }
}

fn paint_arrowhead(painter: &Painter, transform: Affine, points: &[Point], stroke: Stroke) {
    let [.., from, tip] = points else {
        return;
    };
    let from = to_pos2(transform * *from);
    let tip = to_pos2(transform * *tip);
    let dir = (tip - from).normalized();
    if !dir.is_finite() {
        return;
    }
    let size = 6.0 + stroke.width * 2.0;
    let back = tip - dir * size;
    let side = dir.rot90() * (size / 2.0);
    painter.line_segment([tip, back + side], stroke);
    painter.line_segment([tip, back - side], stroke);
}
