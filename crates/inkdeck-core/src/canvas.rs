//! Canvas document and state management.

use crate::camera::{Camera, ZoomOptions};
use crate::editor::{ChangeListener, EditorError, EditorResult, HostEditor, ListenerId};
use crate::shapes::{Shape, ShapeId, ShapeStyle, ShapeUpdate, StyleKey, StyleValue};
use crate::style::{SharedStyle, SharedStyles};
use crate::tools::ToolKind;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use uuid::Uuid;

/// Maximum number of undo states to keep.
const MAX_UNDO_HISTORY: usize = 50;

/// Hit-test tolerance in page units.
const HIT_TOLERANCE: f64 = 4.0;

/// Unique identifier for pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(Uuid);

impl PageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page:{}", self.0)
    }
}

/// A page: an independent set of shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub id: PageId,
    pub name: String,
    /// All shapes on the page, keyed by ID.
    pub shapes: HashMap<ShapeId, Shape>,
    /// Z-order of shapes (back to front).
    pub z_order: Vec<ShapeId>,
}

impl Page {
    pub fn new(id: PageId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shapes: HashMap::new(),
            z_order: Vec::new(),
        }
    }

    /// Add a shape on top of the z-order.
    pub fn add_shape(&mut self, shape: Shape) {
        let id = shape.id;
        self.z_order.push(id);
        self.shapes.insert(id, shape);
    }

    /// Remove a shape and everything parented to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Vec<Shape> {
        let mut doomed = vec![id];
        let mut i = 0;
        while i < doomed.len() {
            let parent = doomed[i];
            let children: Vec<ShapeId> = self
                .z_order
                .iter()
                .copied()
                .filter(|child| self.shapes.get(child).and_then(|s| s.parent) == Some(parent))
                .filter(|child| !doomed.contains(child))
                .collect();
            doomed.extend(children);
            i += 1;
        }

        let doomed_set: HashSet<ShapeId> = doomed.iter().copied().collect();
        self.z_order.retain(|shape_id| !doomed_set.contains(shape_id));
        doomed
            .into_iter()
            .filter_map(|shape_id| self.shapes.remove(&shape_id))
            .collect()
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn get_shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    /// Get shapes in z-order (back to front).
    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.z_order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Transform from a shape's local space to page space.
    pub fn page_transform(&self, id: ShapeId) -> Option<Affine> {
        let mut shape = self.shapes.get(&id)?;
        let mut transform = shape.local_transform();
        let mut depth = 0;
        while let Some(parent_id) = shape.parent {
            let Some(parent) = self.shapes.get(&parent_id) else {
                break;
            };
            depth += 1;
            if depth > self.shapes.len() {
                log::warn!("Parent cycle detected at {}", id);
                break;
            }
            transform = parent.local_transform() * transform;
            shape = parent;
        }
        Some(transform)
    }

    /// Axis-aligned bounds of a shape in page space.
    pub fn page_bounds(&self, id: ShapeId) -> Option<Rect> {
        let transform = self.page_transform(id)?;
        let shape = self.shapes.get(&id)?;
        Some(transform.transform_rect_bbox(shape.local_bounds()))
    }

    /// Find shapes at a point (in page coordinates), front to back.
    pub fn shapes_at_point(&self, point: Point, tolerance: f64) -> Vec<ShapeId> {
        self.z_order
            .iter()
            .rev()
            .filter(|&&id| {
                let Some(transform) = self.page_transform(id) else {
                    return false;
                };
                let local = transform.inverse() * point;
                self.shapes
                    .get(&id)
                    .is_some_and(|s| s.hit_test_local(local, tolerance))
            })
            .copied()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// A snapshot of document state for undo/redo.
#[derive(Debug, Clone)]
struct DocumentSnapshot {
    pages: Vec<Page>,
}

/// A multi-page canvas document.
#[derive(Debug, Clone)]
pub struct CanvasDocument {
    /// Unique document identifier.
    pub id: String,
    /// Document name.
    pub name: String,
    /// Pages in creation order. Never empty.
    pub pages: Vec<Page>,
    undo_stack: Vec<DocumentSnapshot>,
    redo_stack: Vec<DocumentSnapshot>,
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a document with a single empty page.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: "Untitled".to_string(),
            pages: vec![Page::new(PageId::new(), "Page 1")],
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    pub fn page(&self, id: PageId) -> Option<&Page> {
        self.pages.iter().find(|p| p.id == id)
    }

    pub fn page_mut(&mut self, id: PageId) -> Option<&mut Page> {
        self.pages.iter_mut().find(|p| p.id == id)
    }

    /// The page holding a shape.
    pub fn page_of(&self, id: ShapeId) -> Option<&Page> {
        self.pages.iter().find(|p| p.shapes.contains_key(&id))
    }

    fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            pages: self.pages.clone(),
        }
    }

    /// Push current state to undo stack (call before making changes).
    pub fn push_undo(&mut self) {
        let snapshot = self.snapshot();
        self.undo_stack.push(snapshot);
        self.redo_stack.clear();

        if self.undo_stack.len() > MAX_UNDO_HISTORY {
            self.undo_stack.remove(0);
        }
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.redo_stack.push(current);
        self.pages = snapshot.pages;
        true
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.redo_stack.pop() else {
            return false;
        };
        let current = self.snapshot();
        self.undo_stack.push(current);
        self.pages = snapshot.pages;
        true
    }

    /// Drop the newest undo step and restore the pages it captured. The
    /// redo stack is left as is.
    pub fn discard_last_undo(&mut self) -> bool {
        let Some(snapshot) = self.undo_stack.pop() else {
            return false;
        };
        self.pages = snapshot.pages;
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
}

/// Runtime canvas state: the document plus per-session instance state.
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Viewport size.
    pub viewport_size: Size,
    current_page: PageId,
    selection: Vec<ShapeId>,
    tool: ToolKind,
    next_style: ShapeStyle,
    next_opacity: f64,
    is_changing_style: bool,
    batch_depth: usize,
    batch_recorded: bool,
    batch_aborted: bool,
    batch_page: PageId,
    history_paused: usize,
    pending_notify: bool,
    listeners: Vec<(ListenerId, ChangeListener)>,
    next_listener: u64,
    version: u64,
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("document", &self.document)
            .field("camera", &self.camera)
            .field("current_page", &self.current_page)
            .field("selection", &self.selection)
            .field("tool", &self.tool)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    /// Create a new canvas with a single empty page.
    pub fn new() -> Self {
        let document = CanvasDocument::new();
        let current_page = document.pages[0].id;
        Self {
            document,
            camera: Camera::new(),
            viewport_size: Size::new(800.0, 600.0),
            current_page,
            selection: Vec::new(),
            tool: ToolKind::Select,
            next_style: ShapeStyle::default(),
            next_opacity: 1.0,
            is_changing_style: false,
            batch_depth: 0,
            batch_recorded: false,
            batch_aborted: false,
            batch_page: current_page,
            history_paused: 0,
            pending_notify: false,
            listeners: Vec::new(),
            next_listener: 0,
            version: 0,
        }
    }

    /// Set the viewport size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// The page currently being edited.
    pub fn current_page(&self) -> &Page {
        self.document
            .page(self.current_page)
            .unwrap_or(&self.document.pages[0])
    }

    /// Monotonic counter bumped on every change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn next_style(&self) -> ShapeStyle {
        self.next_style
    }

    pub fn next_opacity(&self) -> f64 {
        self.next_opacity
    }

    pub fn is_changing_style(&self) -> bool {
        self.is_changing_style
    }

    /// Set the current tool.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool != tool {
            log::debug!("Tool changed to {:?}", tool);
            self.tool = tool;
            self.changed();
        }
    }

    /// Select a shape (clears previous selection).
    pub fn select(&mut self, id: ShapeId) {
        self.selection.clear();
        self.add_to_selection(id);
    }

    /// Add to selection. Locked shapes and shapes on other pages are ignored.
    pub fn add_to_selection(&mut self, id: ShapeId) {
        let selectable = self
            .current_page()
            .get_shape(id)
            .is_some_and(|s| !s.is_locked);
        if !selectable {
            log::debug!("Shape {} is not selectable", id);
            return;
        }
        if !self.selection.contains(&id) {
            self.selection.push(id);
            self.changed();
        }
    }

    /// Clear selection.
    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.changed();
        }
    }

    pub fn is_selected(&self, id: ShapeId) -> bool {
        self.selection.contains(&id)
    }

    /// Select the topmost unlocked shape at a page point, or clear the
    /// selection if there is none.
    pub fn select_at_point(&mut self, point: Point) -> Option<ShapeId> {
        let page = self.current_page();
        let hit = page
            .shapes_at_point(point, HIT_TOLERANCE)
            .into_iter()
            .find(|id| page.get_shape(*id).is_some_and(|s| !s.is_locked));
        match hit {
            Some(id) => self.select(id),
            None => self.clear_selection(),
        }
        hit
    }

    /// Delete selected shapes.
    pub fn delete_selected(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.record_undo();
        let ids: Vec<ShapeId> = self.selection.drain(..).collect();
        let current = self.current_page;
        if let Some(page) = self.document.page_mut(current) {
            for id in ids {
                page.remove_shape(id);
            }
        }
        self.changed();
    }

    /// Create a shape with the active tool at a page point, parented to the
    /// topmost frame under the point. Switches back to the select tool with
    /// the new shape selected.
    pub fn create_shape_from_tool(&mut self, point: Point) -> EditorResult<Option<ShapeId>> {
        let page = self.current_page();
        let frame = page
            .shapes_at_point(point, 0.0)
            .into_iter()
            .find(|id| page.get_shape(*id).is_some_and(Shape::is_frame));
        let local = frame
            .and_then(|id| page.page_transform(id))
            .map_or(point, |transform| transform.inverse() * point);

        let Some(shape) = self
            .tool
            .default_shape(local, self.next_style, self.next_opacity)
        else {
            return Ok(None);
        };
        let id = self.create_shape(shape.with_parent(frame))?;
        self.set_tool(ToolKind::Select);
        self.select(id);
        Ok(Some(id))
    }

    /// Undo the last document change.
    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        if undone {
            self.after_history_change();
        }
        undone
    }

    /// Redo the last undone change.
    pub fn redo(&mut self) -> bool {
        let redone = self.document.redo();
        if redone {
            self.after_history_change();
        }
        redone
    }

    fn after_history_change(&mut self) {
        if self.document.page(self.current_page).is_none() {
            self.current_page = self.document.pages[0].id;
        }
        let page = self.current_page();
        let retained: Vec<ShapeId> = self
            .selection
            .iter()
            .copied()
            .filter(|id| page.get_shape(*id).is_some_and(|s| !s.is_locked))
            .collect();
        self.selection = retained;
        self.changed();
    }

    /// Restore the state from before the batch that just closed.
    fn rollback_batch(&mut self) {
        if self.batch_recorded {
            self.document.discard_last_undo();
        }
        log::debug!("Rolled back batch, back on page {}", self.batch_page);
        self.current_page = self.batch_page;
        self.after_history_change();
    }

    /// Advance camera animation. Returns true while it is still running.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.camera.step(dt)
    }

    /// Selected shapes on the current page.
    fn selected_shapes(&self) -> impl Iterator<Item = &Shape> {
        let page = self.current_page();
        self.selection.iter().filter_map(move |id| page.get_shape(*id))
    }

    /// Record an undo step, once per batch. Nothing is recorded while
    /// history is paused.
    fn record_undo(&mut self) {
        if self.history_paused > 0 {
            return;
        }
        if self.batch_depth > 0 {
            if self.batch_recorded {
                return;
            }
            self.batch_recorded = true;
        }
        self.document.push_undo();
    }

    fn changed(&mut self) {
        self.version += 1;
        if self.batch_depth > 0 {
            self.pending_notify = true;
        } else {
            self.notify();
        }
    }

    fn notify(&mut self) {
        for (_, listener) in self.listeners.iter_mut() {
            listener();
        }
    }

    fn update_selected(&mut self, mut f: impl FnMut(&mut Shape)) {
        if self.selection.is_empty() {
            return;
        }
        self.record_undo();
        let ids = self.selection.clone();
        let current = self.current_page;
        if let Some(page) = self.document.page_mut(current) {
            for id in ids {
                if let Some(shape) = page.get_shape_mut(id) {
                    f(shape);
                }
            }
        }
        self.changed();
    }
}

impl HostEditor for Canvas {
    fn current_page_id(&self) -> PageId {
        self.current_page().id
    }

    fn set_current_page(&mut self, id: PageId) -> EditorResult<()> {
        if self.document.page(id).is_none() {
            return Err(EditorError::PageNotFound(id));
        }
        if self.current_page != id {
            self.current_page = id;
            self.selection.clear();
            self.changed();
        }
        Ok(())
    }

    fn create_page(&mut self, id: PageId, name: &str) -> EditorResult<()> {
        if self.document.page(id).is_some() {
            return Err(EditorError::DuplicatePage(id));
        }
        self.record_undo();
        self.document.pages.push(Page::new(id, name));
        self.changed();
        Ok(())
    }

    fn delete_page(&mut self, id: PageId) -> EditorResult<()> {
        let Some(index) = self.document.pages.iter().position(|p| p.id == id) else {
            return Err(EditorError::PageNotFound(id));
        };
        if self.document.pages.len() <= 1 {
            return Err(EditorError::LastPage);
        }
        self.record_undo();
        self.document.pages.remove(index);
        if self.current_page == id {
            let neighbour = index.saturating_sub(1);
            self.current_page = self.document.pages[neighbour].id;
            self.selection.clear();
        }
        self.changed();
        Ok(())
    }

    fn rename_page(&mut self, id: PageId, name: &str) -> EditorResult<()> {
        if self.document.page(id).is_none() {
            return Err(EditorError::PageNotFound(id));
        }
        self.record_undo();
        if let Some(page) = self.document.page_mut(id) {
            page.name = name.to_string();
        }
        self.changed();
        Ok(())
    }

    fn page_ids(&self) -> Vec<PageId> {
        self.document.pages.iter().map(|p| p.id).collect()
    }

    fn page_name(&self, id: PageId) -> Option<String> {
        self.document.page(id).map(|page| page.name.clone())
    }

    fn current_page_shapes(&self) -> Vec<Shape> {
        self.current_page().shapes_ordered().cloned().collect()
    }

    fn shape(&self, id: ShapeId) -> Option<Shape> {
        self.document.page_of(id)?.get_shape(id).cloned()
    }

    fn create_shapes(&mut self, shapes: Vec<Shape>) -> EditorResult<()> {
        if shapes.is_empty() {
            return Ok(());
        }
        let mut incoming = HashSet::new();
        for shape in &shapes {
            if self.document.page_of(shape.id).is_some() || !incoming.insert(shape.id) {
                return Err(EditorError::DuplicateShape(shape.id));
            }
        }
        let page = self.current_page();
        for shape in &shapes {
            if let Some(parent) = shape.parent {
                if !incoming.contains(&parent) && page.get_shape(parent).is_none() {
                    return Err(EditorError::ShapeNotFound(parent));
                }
            }
        }

        self.record_undo();
        let current = self.current_page;
        if let Some(page) = self.document.page_mut(current) {
            for shape in shapes {
                page.add_shape(shape);
            }
        }
        self.changed();
        Ok(())
    }

    fn update_shape(&mut self, id: ShapeId, update: ShapeUpdate) -> EditorResult<()> {
        let Some(page_id) = self.document.page_of(id).map(|p| p.id) else {
            return Err(EditorError::ShapeNotFound(id));
        };
        self.record_undo();
        if let Some(shape) = self
            .document
            .page_mut(page_id)
            .and_then(|page| page.get_shape_mut(id))
        {
            update.apply(shape);
            if shape.is_locked {
                self.selection.retain(|selected| *selected != id);
            }
        }
        self.changed();
        Ok(())
    }

    fn shape_page_bounds(&self, id: ShapeId) -> Option<Rect> {
        self.document.page_of(id)?.page_bounds(id)
    }

    fn zoom_to_bounds(&mut self, bounds: Rect, options: ZoomOptions) {
        self.camera.zoom_to_bounds(bounds, self.viewport_size, options);
        self.changed();
    }

    fn selected_shape_ids(&self) -> Vec<ShapeId> {
        self.selection.clone()
    }

    fn is_in_select(&self) -> bool {
        self.tool == ToolKind::Select
    }

    fn is_in_shape_tool(&self) -> bool {
        self.tool.shape_kind().is_some()
    }

    fn shared_styles(&self) -> SharedStyles {
        let mut styles = SharedStyles::new();
        if let Some(kind) = self.tool.shape_kind() {
            for &key in kind.supported_styles() {
                styles.insert(key, SharedStyle::Shared(self.next_style.get(key)));
            }
            return styles;
        }
        for shape in self.selected_shapes() {
            for &key in shape.kind().supported_styles() {
                let entry = styles.entry(key).or_default();
                *entry = entry.merge(shape.style.get(key));
            }
        }
        styles
    }

    fn style_for_next_shape(&self, key: StyleKey) -> StyleValue {
        self.next_style.get(key)
    }

    fn set_style_for_selected_shapes(&mut self, value: StyleValue) {
        self.update_selected(|shape| {
            shape.set_style_value(value);
        });
    }

    fn set_style_for_next_shapes(&mut self, value: StyleValue) {
        self.next_style.set(value);
        self.changed();
    }

    fn shared_opacity(&self) -> SharedStyle<f64> {
        if self.is_in_select() && !self.selection.is_empty() {
            return self
                .selected_shapes()
                .fold(SharedStyle::Unset, |acc, shape| acc.merge(shape.opacity));
        }
        SharedStyle::Shared(self.next_opacity)
    }

    fn set_opacity_for_selected_shapes(&mut self, opacity: f64) {
        let opacity = opacity.clamp(0.0, 1.0);
        self.update_selected(|shape| shape.opacity = opacity);
    }

    fn set_opacity_for_next_shapes(&mut self, opacity: f64) {
        self.next_opacity = opacity.clamp(0.0, 1.0);
        self.changed();
    }

    fn set_changing_style(&mut self, changing: bool) {
        if self.is_changing_style != changing {
            self.is_changing_style = changing;
            self.changed();
        }
    }

    fn begin_batch(&mut self) {
        if self.batch_depth == 0 {
            self.batch_page = self.current_page;
            self.batch_aborted = false;
        }
        self.batch_depth += 1;
    }

    fn end_batch(&mut self) {
        if self.batch_depth == 0 {
            log::warn!("end_batch called without a matching begin_batch");
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        if std::mem::take(&mut self.batch_aborted) {
            self.pending_notify = false;
            self.rollback_batch();
        }
        self.batch_recorded = false;
        if self.pending_notify {
            self.pending_notify = false;
            self.notify();
        }
    }

    fn abort_batch(&mut self) {
        if self.batch_depth == 0 {
            log::warn!("abort_batch called without a matching begin_batch");
            return;
        }
        self.batch_aborted = true;
        self.end_batch();
    }

    fn pause_history(&mut self) {
        self.history_paused += 1;
    }

    fn resume_history(&mut self) {
        if self.history_paused == 0 {
            log::warn!("resume_history called without a matching pause_history");
            return;
        }
        self.history_paused -= 1;
    }

    fn listen(&mut self, listener: ChangeListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{ColorStyle, Frame, Rectangle, ShapeProps, Text};
    use std::cell::Cell;
    use std::rc::Rc;

    fn rect_at(x: f64, y: f64) -> Shape {
        Shape::new(
            ShapeProps::Rectangle(Rectangle::new(100.0, 50.0)),
            Point::new(x, y),
        )
    }

    fn frame_at(x: f64, y: f64) -> Shape {
        Shape::new(
            ShapeProps::Frame(Frame::new(400.0, 300.0, "Frame")),
            Point::new(x, y),
        )
    }

    #[test]
    fn test_document_creation() {
        let canvas = Canvas::new();
        assert_eq!(canvas.document.pages.len(), 1);
        assert_eq!(canvas.page_ids(), vec![canvas.current_page_id()]);
        assert!(canvas.current_page().is_empty());
        assert!(!canvas.document.can_undo());
    }

    #[test]
    fn test_add_shape() {
        let mut canvas = Canvas::new();
        let shape = rect_at(0.0, 0.0);
        let id = canvas.create_shape(shape).unwrap();
        assert_eq!(canvas.current_page().len(), 1);
        assert!(canvas.shape(id).is_some());
        assert_eq!(canvas.current_page().z_order, vec![id]);
    }

    #[test]
    fn test_remove_shape_removes_children() {
        let mut page = Page::new(PageId::new(), "P");
        let frame = frame_at(0.0, 0.0);
        let frame_id = frame.id;
        let child = rect_at(10.0, 10.0).with_parent(Some(frame_id));
        let other = rect_at(500.0, 0.0);
        let other_id = other.id;
        page.add_shape(frame);
        page.add_shape(child);
        page.add_shape(other);

        let removed = page.remove_shape(frame_id);
        assert_eq!(removed.len(), 2);
        assert_eq!(page.z_order, vec![other_id]);
    }

    #[test]
    fn test_page_bounds_composes_parents() {
        let mut canvas = Canvas::new();
        let frame = frame_at(100.0, 200.0);
        let frame_id = frame.id;
        let child = rect_at(10.0, 20.0).with_parent(Some(frame_id));
        let child_id = child.id;
        canvas.create_shapes(vec![frame, child]).unwrap();

        let bounds = canvas.shape_page_bounds(child_id).unwrap();
        assert!((bounds.x0 - 110.0).abs() < 1e-10);
        assert!((bounds.y0 - 220.0).abs() < 1e-10);
        assert!((bounds.width() - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_shapes_at_point() {
        let mut canvas = Canvas::new();
        let back = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        let front = canvas.create_shape(rect_at(50.0, 0.0)).unwrap();

        let hits = canvas.current_page().shapes_at_point(Point::new(75.0, 25.0), 0.0);
        assert_eq!(hits, vec![front, back]);
        assert!(
            canvas
                .current_page()
                .shapes_at_point(Point::new(1000.0, 1000.0), 0.0)
                .is_empty()
        );
    }

    #[test]
    fn test_canvas_selection() {
        let mut canvas = Canvas::new();
        let a = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        let b = canvas.create_shape(rect_at(200.0, 0.0)).unwrap();

        canvas.select(a);
        assert!(canvas.is_selected(a));
        canvas.add_to_selection(b);
        assert_eq!(canvas.selected_shape_ids(), vec![a, b]);
        canvas.select(b);
        assert_eq!(canvas.selected_shape_ids(), vec![b]);
        canvas.clear_selection();
        assert!(canvas.selected_shape_ids().is_empty());
    }

    #[test]
    fn test_locked_shapes_are_not_selectable() {
        let mut canvas = Canvas::new();
        let id = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.select(id);
        canvas.update_shape(id, ShapeUpdate::lock()).unwrap();
        assert!(canvas.selected_shape_ids().is_empty());

        canvas.select(id);
        assert!(canvas.selected_shape_ids().is_empty());
        assert_eq!(canvas.select_at_point(Point::new(10.0, 10.0)), None);
    }

    #[test]
    fn test_delete_selected() {
        let mut canvas = Canvas::new();
        let a = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        let b = canvas.create_shape(rect_at(200.0, 0.0)).unwrap();
        canvas.select(a);
        canvas.delete_selected();

        assert!(canvas.shape(a).is_none());
        assert!(canvas.shape(b).is_some());
        assert!(canvas.selected_shape_ids().is_empty());
    }

    #[test]
    fn test_undo_add_shape() {
        let mut canvas = Canvas::new();
        let id = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        assert!(canvas.document.can_undo());

        assert!(canvas.undo());
        assert!(canvas.shape(id).is_none());
        assert!(canvas.document.can_redo());

        assert!(canvas.redo());
        assert!(canvas.shape(id).is_some());
    }

    #[test]
    fn test_undo_clears_redo() {
        let mut canvas = Canvas::new();
        canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.undo();
        assert!(canvas.document.can_redo());

        canvas.create_shape(rect_at(10.0, 0.0)).unwrap();
        assert!(!canvas.document.can_redo());
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut canvas = Canvas::new();
        assert!(!canvas.undo());
        assert!(!canvas.redo());
    }

    #[test]
    fn test_undo_history_is_capped() {
        let mut canvas = Canvas::new();
        for i in 0..(MAX_UNDO_HISTORY + 10) {
            canvas.create_shape(rect_at(i as f64, 0.0)).unwrap();
        }
        assert_eq!(canvas.document.undo_depth(), MAX_UNDO_HISTORY);
    }

    #[test]
    fn test_batch_is_one_undo_step_and_one_notification() {
        let mut canvas = Canvas::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        canvas.listen(Box::new(move || counter.set(counter.get() + 1)));

        let version = canvas.version();
        canvas.run(|c| {
            c.create_shape(rect_at(0.0, 0.0)).unwrap();
            c.create_shape(rect_at(10.0, 0.0)).unwrap();
            c.set_style_for_next_shapes(StyleValue::Color(ColorStyle::Red));
        });

        assert_eq!(canvas.document.undo_depth(), 1);
        assert_eq!(calls.get(), 1);
        assert!(canvas.version() >= version + 3);

        canvas.undo();
        assert!(canvas.current_page().is_empty());
    }

    #[test]
    fn test_aborted_batch_rolls_back() {
        let mut canvas = Canvas::new();
        let first = canvas.current_page_id();
        canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        let depth = canvas.document.undo_depth();

        let second = PageId::new();
        canvas.begin_batch();
        canvas.create_page(second, "Second").unwrap();
        canvas.set_current_page(second).unwrap();
        canvas.create_shape(rect_at(10.0, 0.0)).unwrap();
        canvas.abort_batch();

        assert_eq!(canvas.page_ids(), vec![first]);
        assert_eq!(canvas.current_page_id(), first);
        assert_eq!(canvas.current_page_shapes().len(), 1);
        assert_eq!(canvas.document.undo_depth(), depth);
    }

    #[test]
    fn test_paused_history_records_nothing() {
        let mut canvas = Canvas::new();
        canvas.pause_history();
        canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.resume_history();
        assert!(!canvas.document.can_undo());
        assert_eq!(canvas.current_page_shapes().len(), 1);

        canvas.create_shape(rect_at(10.0, 0.0)).unwrap();
        assert_eq!(canvas.document.undo_depth(), 1);
    }

    #[test]
    fn test_unlisten() {
        let mut canvas = Canvas::new();
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let id = canvas.listen(Box::new(move || counter.set(counter.get() + 1)));
        canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.unlisten(id);
        canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_pages() {
        let mut canvas = Canvas::new();
        let first = canvas.current_page_id();
        let second = PageId::new();
        canvas.create_page(second, "Second").unwrap();
        assert_eq!(canvas.current_page_id(), first);
        assert_eq!(
            canvas.create_page(second, "Again"),
            Err(EditorError::DuplicatePage(second))
        );

        canvas.set_current_page(second).unwrap();
        canvas.rename_page(second, "Renamed").unwrap();
        assert_eq!(canvas.current_page().name, "Renamed");

        canvas.delete_page(second).unwrap();
        assert_eq!(canvas.current_page_id(), first);
        assert_eq!(canvas.delete_page(first), Err(EditorError::LastPage));
        assert_eq!(
            canvas.set_current_page(second),
            Err(EditorError::PageNotFound(second))
        );
    }

    #[test]
    fn test_switching_page_clears_selection() {
        let mut canvas = Canvas::new();
        let id = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.select(id);
        let other = PageId::new();
        canvas.create_page(other, "Other").unwrap();
        canvas.set_current_page(other).unwrap();
        assert!(canvas.selected_shape_ids().is_empty());
        assert!(canvas.current_page_shapes().is_empty());
    }

    #[test]
    fn test_undo_page_creation_restores_current_page() {
        let mut canvas = Canvas::new();
        let first = canvas.current_page_id();
        let other = PageId::new();
        canvas.create_page(other, "Other").unwrap();
        canvas.set_current_page(other).unwrap();

        canvas.undo();
        assert_eq!(canvas.current_page_id(), first);
    }

    #[test]
    fn test_create_shapes_validates() {
        let mut canvas = Canvas::new();
        let shape = rect_at(0.0, 0.0);
        let id = shape.id;
        canvas.create_shape(shape.clone()).unwrap();
        assert_eq!(canvas.create_shape(shape), Err(EditorError::DuplicateShape(id)));

        let missing = ShapeId::new();
        let orphan = rect_at(0.0, 0.0).with_parent(Some(missing));
        assert_eq!(canvas.create_shape(orphan), Err(EditorError::ShapeNotFound(missing)));
        assert_eq!(canvas.document.undo_depth(), 1);
    }

    #[test]
    fn test_update_missing_shape() {
        let mut canvas = Canvas::new();
        let id = ShapeId::new();
        assert_eq!(
            canvas.update_shape(id, ShapeUpdate::lock()),
            Err(EditorError::ShapeNotFound(id))
        );
    }

    #[test]
    fn test_create_shape_from_tool_parents_to_frame() {
        let mut canvas = Canvas::new();
        let frame = frame_at(100.0, 100.0);
        let frame_id = frame.id;
        canvas.create_shape(frame).unwrap();
        canvas.set_tool(ToolKind::Ellipse);

        let id = canvas
            .create_shape_from_tool(Point::new(300.0, 250.0))
            .unwrap()
            .unwrap();
        let shape = canvas.shape(id).unwrap();
        assert_eq!(shape.parent, Some(frame_id));
        let bounds = canvas.shape_page_bounds(id).unwrap();
        assert!((bounds.center().x - 300.0).abs() < 1e-10);
        assert!((bounds.center().y - 250.0).abs() < 1e-10);
        assert!(canvas.is_in_select());
        assert_eq!(canvas.selected_shape_ids(), vec![id]);
    }

    #[test]
    fn test_shared_styles() {
        let mut canvas = Canvas::new();
        let text = Shape::new(ShapeProps::Text(Text::new("Hi", 24.0)), Point::ZERO);
        let text_id = canvas.create_shape(text).unwrap();
        let rect_id = canvas.create_shape(rect_at(0.0, 0.0)).unwrap();
        canvas.select(text_id);
        canvas.add_to_selection(rect_id);

        let styles = canvas.shared_styles();
        assert!(styles.contains_key(&StyleKey::Font));
        assert!(styles.contains_key(&StyleKey::Fill));
        assert_eq!(
            styles.get(&StyleKey::Color),
            Some(&SharedStyle::Shared(StyleValue::Color(ColorStyle::Black)))
        );

        canvas.set_tool(ToolKind::Line);
        let styles = canvas.shared_styles();
        assert_eq!(styles.len(), 3);
        assert!(!styles.contains_key(&StyleKey::Fill));
    }
}
