//! Mapping of slide intents onto editor pages and frames.
//!
//! Every slide page carries exactly one locked frame at the origin marking
//! the slide's visible area.

use super::model::{normalize_title, SlideSize};
use crate::camera::ZoomOptions;
use crate::canvas::PageId;
use crate::editor::{EditorResult, HostEditor};
use crate::shapes::{Frame, Shape, ShapeId, ShapeProps, ShapeUpdate};
use kurbo::Point;
use std::collections::HashMap;

/// Ids produced when a slide page is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideCreateResult {
    pub page_id: PageId,
    pub frame_id: ShapeId,
}

/// The first frame on the current page.
pub fn slide_frame<E: HostEditor + ?Sized>(editor: &E) -> Option<Shape> {
    editor
        .current_page_shapes()
        .into_iter()
        .find(|shape| shape.is_frame())
}

/// Make sure `page_id` is current and has a locked frame. Idempotent.
pub fn ensure_frame<E: HostEditor + ?Sized>(
    editor: &mut E,
    page_id: PageId,
    size: SlideSize,
    title: &str,
) -> EditorResult<ShapeId> {
    if editor.current_page_id() != page_id {
        editor.set_current_page(page_id)?;
    }

    if let Some(frame) = slide_frame(editor) {
        if !frame.is_locked {
            editor.update_shape(frame.id, ShapeUpdate::lock())?;
        }
        return Ok(frame.id);
    }

    let frame = Shape::new(
        ShapeProps::Frame(Frame::new(size.w, size.h, normalize_title(title))),
        Point::ZERO,
    );
    let frame_id = editor.create_shape(frame)?;
    editor.update_shape(frame_id, ShapeUpdate::lock())?;
    log::debug!("Created frame {} on {}", frame_id, page_id);
    Ok(frame_id)
}

/// Fit the viewport to the current page's frame at no more than 100% zoom.
/// Returns false when the page has no frame.
pub fn fit_to_frame<E: HostEditor + ?Sized>(editor: &mut E) -> bool {
    fit_to_frame_with(editor, ZoomOptions::default().target_zoom(1.0).immediate(true))
}

/// [`fit_to_frame`] with explicit zoom options.
pub fn fit_to_frame_with<E: HostEditor + ?Sized>(editor: &mut E, options: ZoomOptions) -> bool {
    let Some(bounds) = slide_frame(editor).and_then(|frame| editor.shape_page_bounds(frame.id))
    else {
        return false;
    };
    editor.zoom_to_bounds(bounds, options);
    true
}

/// Create a page for a new slide, switch to it and give it a frame.
pub fn create_slide<E: HostEditor + ?Sized>(
    editor: &mut E,
    title: &str,
    size: SlideSize,
) -> EditorResult<SlideCreateResult> {
    let page_id = PageId::new();
    editor.create_page(page_id, &normalize_title(title))?;
    editor.set_current_page(page_id)?;
    let frame_id = ensure_frame(editor, page_id, size, title)?;
    log::info!("Created slide page {}", page_id);
    Ok(SlideCreateResult { page_id, frame_id })
}

/// Create a new slide page holding copies of every shape on `source`.
///
/// Copies get fresh ids. Children of the source frame move to the new frame,
/// children of copied shapes follow their copied parent, and anything else
/// lands on the page root. The new page is current on return.
pub fn duplicate_slide<E: HostEditor + ?Sized>(
    editor: &mut E,
    source: PageId,
    title: &str,
    size: SlideSize,
) -> EditorResult<SlideCreateResult> {
    if editor.current_page_id() != source {
        editor.set_current_page(source)?;
    }
    let source_shapes = editor.current_page_shapes();
    let source_frame = source_shapes
        .iter()
        .find(|shape| shape.is_frame())
        .map(|shape| shape.id);

    let created = create_slide(editor, title, size)?;

    let to_copy: Vec<&Shape> = source_shapes
        .iter()
        .filter(|shape| Some(shape.id) != source_frame)
        .collect();
    let id_map: HashMap<ShapeId, ShapeId> = to_copy
        .iter()
        .map(|shape| (shape.id, ShapeId::new()))
        .collect();

    let copies: Vec<Shape> = to_copy
        .into_iter()
        .filter_map(|shape| {
            let id = *id_map.get(&shape.id)?;
            let parent = match shape.parent {
                Some(parent) if Some(parent) == source_frame => Some(created.frame_id),
                Some(parent) => id_map.get(&parent).copied(),
                None => None,
            };
            Some(Shape {
                id,
                parent,
                ..shape.clone()
            })
        })
        .collect();

    if !copies.is_empty() {
        log::debug!("Copying {} shapes from {}", copies.len(), source);
        editor.create_shapes(copies)?;
    }

    if editor.current_page_id() != created.page_id {
        editor.set_current_page(created.page_id)?;
    }
    Ok(created)
}

pub fn delete_slide_page<E: HostEditor + ?Sized>(editor: &mut E, page_id: PageId) -> EditorResult<()> {
    editor.delete_page(page_id)
}

/// Rename a slide page, substituting the fallback title when blank.
pub fn rename_slide_page<E: HostEditor + ?Sized>(
    editor: &mut E,
    page_id: PageId,
    title: &str,
) -> EditorResult<()> {
    editor.rename_page(page_id, &normalize_title(title))
}
