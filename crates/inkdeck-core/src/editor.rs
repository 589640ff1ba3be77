//! Host editor capability surface.
//!
//! The slide and style layers never touch a document directly: every read and
//! mutation goes through [`HostEditor`]. [`crate::Canvas`] is the in-memory
//! implementation used by the desktop shell and by tests.

use crate::camera::ZoomOptions;
use crate::canvas::PageId;
use crate::shapes::{Shape, ShapeId, ShapeUpdate, StyleKey, StyleValue};
use crate::style::{SharedStyle, SharedStyles};
use kurbo::Rect;
use thiserror::Error;

/// Errors raised by the host editor for invalid references.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("Page not found: {0}")]
    PageNotFound(PageId),
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Page already exists: {0}")]
    DuplicatePage(PageId),
    #[error("Shape already exists: {0}")]
    DuplicateShape(ShapeId),
    #[error("Cannot delete the last page")]
    LastPage,
}

/// Result type for host editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Handle returned by [`HostEditor::listen`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Callback invoked after every document or instance change.
pub type ChangeListener = Box<dyn FnMut()>;

/// Operations the slide layer needs from a canvas editor.
pub trait HostEditor {
    // Pages

    fn current_page_id(&self) -> PageId;
    fn set_current_page(&mut self, id: PageId) -> EditorResult<()>;
    fn create_page(&mut self, id: PageId, name: &str) -> EditorResult<()>;
    fn delete_page(&mut self, id: PageId) -> EditorResult<()>;
    fn rename_page(&mut self, id: PageId, name: &str) -> EditorResult<()>;
    /// Page ids in the editor's own order.
    fn page_ids(&self) -> Vec<PageId>;
    fn page_name(&self, id: PageId) -> Option<String>;

    // Shapes

    /// Shapes on the current page, back to front.
    fn current_page_shapes(&self) -> Vec<Shape>;
    fn shape(&self, id: ShapeId) -> Option<Shape>;
    /// Create shapes on the current page. Parents may reference shapes
    /// created in the same call.
    fn create_shapes(&mut self, shapes: Vec<Shape>) -> EditorResult<()>;
    fn update_shape(&mut self, id: ShapeId, update: ShapeUpdate) -> EditorResult<()>;
    /// Axis-aligned bounds of a shape in page coordinates.
    fn shape_page_bounds(&self, id: ShapeId) -> Option<Rect>;

    fn create_shape(&mut self, shape: Shape) -> EditorResult<ShapeId> {
        let id = shape.id;
        self.create_shapes(vec![shape])?;
        Ok(id)
    }

    // Viewport

    fn zoom_to_bounds(&mut self, bounds: Rect, options: ZoomOptions);

    // Selection and tools

    fn selected_shape_ids(&self) -> Vec<ShapeId>;
    /// Whether the select tool is active.
    fn is_in_select(&self) -> bool;
    /// Whether a tool that creates a specific shape kind is active.
    fn is_in_shape_tool(&self) -> bool;

    // Styles

    /// Styles shared by the selection, or by the active shape tool's defaults.
    fn shared_styles(&self) -> SharedStyles;
    fn style_for_next_shape(&self, key: StyleKey) -> StyleValue;
    fn set_style_for_selected_shapes(&mut self, value: StyleValue);
    fn set_style_for_next_shapes(&mut self, value: StyleValue);
    fn shared_opacity(&self) -> SharedStyle<f64>;
    fn set_opacity_for_selected_shapes(&mut self, opacity: f64);
    fn set_opacity_for_next_shapes(&mut self, opacity: f64);
    /// Transient flag for "a style is being changed right now" feedback.
    fn set_changing_style(&mut self, changing: bool);

    // Transactions

    /// Open a batch. Nested batches join the outermost one.
    fn begin_batch(&mut self);
    /// Close a batch. The outermost close records one undo step and
    /// notifies listeners once.
    fn end_batch(&mut self);
    /// Close a batch and discard it. Once the outermost batch closes, the
    /// document and current page are back to where the batch started and
    /// no undo step remains.
    fn abort_batch(&mut self);
    /// Stop recording undo steps until the matching [`resume_history`].
    ///
    /// [`resume_history`]: HostEditor::resume_history
    fn pause_history(&mut self);
    fn resume_history(&mut self);

    /// Run `f` as a single undoable unit.
    fn run<F>(&mut self, f: F)
    where
        Self: Sized,
        F: FnOnce(&mut Self),
    {
        self.begin_batch();
        f(self);
        self.end_batch();
    }

    // Change notification

    fn listen(&mut self, listener: ChangeListener) -> ListenerId;
    fn unlisten(&mut self, id: ListenerId);
}
