//! Style resolution for the properties panel.
//!
//! The editor reports which style values the current selection shares. This
//! module turns that into per-control display state and routes user edits
//! back to the selection and the next-shape defaults.

mod color;
mod opacity;

pub use color::{
    closest_color_option, color_distance, color_option, hex_to_rgb, normalize_hex, ColorOption,
    STYLE_COLOR_OPTIONS,
};
pub use opacity::{
    nearest_opacity_index, opacity_for_index, opacity_label, opacity_slider_index,
    MIXED_OPACITY_LABEL, OPACITY_STOPS,
};

use crate::editor::HostEditor;
use crate::shapes::{StyleKey, StyleValue};
use std::collections::BTreeMap;

/// Placeholder for a property whose values differ across the selection.
pub const MIXED_LABEL: &str = "Mixed values";
/// Placeholder for a property the editor reports without a value.
pub const UNSET_LABEL: &str = "Not available";
/// Properties header when nothing is selected.
pub const NO_SELECTION_HEADER: &str = "No selection, editing defaults for next shape";

/// A style property's value across a set of shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SharedStyle<T> {
    /// Every shape agrees on this value.
    Shared(T),
    /// Shapes disagree.
    Mixed,
    /// No value to report.
    Unset,
}

impl<T> Default for SharedStyle<T> {
    fn default() -> Self {
        SharedStyle::Unset
    }
}

impl<T: PartialEq> SharedStyle<T> {
    /// Fold one more observed value into the aggregate.
    pub fn merge(self, value: T) -> Self {
        match self {
            SharedStyle::Unset => SharedStyle::Shared(value),
            SharedStyle::Shared(current) if current == value => SharedStyle::Shared(current),
            SharedStyle::Shared(_) | SharedStyle::Mixed => SharedStyle::Mixed,
        }
    }
}

impl<T> SharedStyle<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            SharedStyle::Shared(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, SharedStyle::Mixed)
    }

    /// Disabled placeholder entry to show instead of a value, if any.
    pub fn placeholder_label(&self) -> Option<&'static str> {
        match self {
            SharedStyle::Shared(_) => None,
            SharedStyle::Mixed => Some(MIXED_LABEL),
            SharedStyle::Unset => Some(UNSET_LABEL),
        }
    }
}

/// Shared values keyed by property, in panel order.
pub type SharedStyles = BTreeMap<StyleKey, SharedStyle<StyleValue>>;

/// The editor's shared styles, if the panel should use them at all.
///
/// They are relevant while a shape tool is active, while shapes are selected
/// with the select tool, or whenever the editor reports at least one value.
pub fn relevant_styles<E: HostEditor + ?Sized>(editor: &E) -> Option<SharedStyles> {
    let styles = editor.shared_styles();
    let has_selection = !editor.selected_shape_ids().is_empty();
    let relevant = editor.is_in_shape_tool()
        || (editor.is_in_select() && has_selection)
        || !styles.is_empty();
    relevant.then_some(styles)
}

/// What one property control should display. `None` hides the control.
///
/// With nothing selected in the select tool, properties the editor does not
/// report fall back to the next-shape default.
pub fn resolve_style<E: HostEditor + ?Sized>(
    editor: &E,
    key: StyleKey,
) -> Option<SharedStyle<StyleValue>> {
    if let Some(shared) = relevant_styles(editor).and_then(|styles| styles.get(&key).copied()) {
        return Some(shared);
    }
    if editor.selected_shape_ids().is_empty() && editor.is_in_select() {
        return Some(SharedStyle::Shared(editor.style_for_next_shape(key)));
    }
    None
}

/// Apply a style value as one undoable step.
///
/// The selection is updated only in the select tool; the next-shape default
/// is always updated.
pub fn apply_style<E: HostEditor>(editor: &mut E, value: StyleValue) {
    log::debug!("Applying {:?} = {}", value.key(), value.name());
    editor.run(|editor| {
        if editor.is_in_select() {
            editor.set_style_for_selected_shapes(value);
        }
        editor.set_style_for_next_shapes(value);
        editor.set_changing_style(true);
    });
}

/// Apply an opacity as one undoable step, with the same targeting as
/// [`apply_style`].
pub fn apply_opacity<E: HostEditor>(editor: &mut E, opacity: f64) {
    let opacity = opacity.clamp(0.0, 1.0);
    editor.run(|editor| {
        if editor.is_in_select() {
            editor.set_opacity_for_selected_shapes(opacity);
        }
        editor.set_opacity_for_next_shapes(opacity);
        editor.set_changing_style(true);
    });
}

/// Everything the properties panel renders, derived from editor state.
#[derive(Debug, Clone, PartialEq)]
pub struct StylePanelState {
    pub selected_count: usize,
    /// Every property in panel order with its resolved display state.
    pub styles: Vec<(StyleKey, Option<SharedStyle<StyleValue>>)>,
    pub opacity: SharedStyle<f64>,
}

impl StylePanelState {
    pub fn derive<E: HostEditor + ?Sized>(editor: &E) -> Self {
        Self {
            selected_count: editor.selected_shape_ids().len(),
            styles: StyleKey::ALL
                .iter()
                .map(|&key| (key, resolve_style(editor, key)))
                .collect(),
            opacity: editor.shared_opacity(),
        }
    }

    pub fn header_text(&self) -> String {
        if self.selected_count > 0 {
            format!("{} selected", self.selected_count)
        } else {
            NO_SELECTION_HEADER.to_string()
        }
    }

    /// Display state for one property.
    pub fn style(&self, key: StyleKey) -> Option<SharedStyle<StyleValue>> {
        self.styles
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, shared)| *shared)
    }

    /// Whether any property control is visible.
    pub fn has_visible_styles(&self) -> bool {
        self.styles.iter().any(|(_, shared)| shared.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::shapes::{
        ColorStyle, FillStyle, FontStyle, Rectangle, Shape, ShapeProps, Text,
    };
    use crate::tools::ToolKind;
    use kurbo::Point;

    fn rect(canvas: &mut Canvas, color: ColorStyle) -> crate::shapes::ShapeId {
        let mut shape = Shape::new(ShapeProps::Rectangle(Rectangle::new(50.0, 50.0)), Point::ZERO);
        shape.style.color = color;
        canvas.create_shape(shape).unwrap()
    }

    #[test]
    fn test_merge() {
        let s = SharedStyle::Unset.merge(1).merge(1);
        assert_eq!(s, SharedStyle::Shared(1));
        assert_eq!(s.merge(2), SharedStyle::Mixed);
        assert_eq!(SharedStyle::Mixed.merge(1), SharedStyle::Mixed);
        assert_eq!(SharedStyle::<i32>::Mixed.placeholder_label(), Some(MIXED_LABEL));
        assert_eq!(SharedStyle::<i32>::Unset.placeholder_label(), Some(UNSET_LABEL));
    }

    #[test]
    fn test_resolve_with_mixed_selection() {
        let mut canvas = Canvas::new();
        let a = rect(&mut canvas, ColorStyle::Red);
        let b = rect(&mut canvas, ColorStyle::Blue);
        canvas.select(a);
        canvas.add_to_selection(b);

        assert_eq!(resolve_style(&canvas, StyleKey::Color), Some(SharedStyle::Mixed));
        assert_eq!(
            resolve_style(&canvas, StyleKey::Fill),
            Some(SharedStyle::Shared(StyleValue::Fill(FillStyle::None)))
        );
        // Rectangles have no font
        assert_eq!(resolve_style(&canvas, StyleKey::Font), None);
    }

    #[test]
    fn test_resolve_falls_back_to_next_shape_defaults() {
        let mut canvas = Canvas::new();
        canvas.set_style_for_next_shapes(StyleValue::Font(FontStyle::Serif));
        let state = StylePanelState::derive(&canvas);
        assert_eq!(state.selected_count, 0);
        assert_eq!(state.header_text(), NO_SELECTION_HEADER);
        assert_eq!(
            state.style(StyleKey::Font),
            Some(SharedStyle::Shared(StyleValue::Font(FontStyle::Serif)))
        );
        assert!(state.has_visible_styles());
    }

    #[test]
    fn test_shape_tool_uses_tool_styles() {
        let mut canvas = Canvas::new();
        canvas.set_tool(ToolKind::Text);
        assert!(relevant_styles(&canvas).is_some());
        assert!(resolve_style(&canvas, StyleKey::Font).is_some());
        assert!(resolve_style(&canvas, StyleKey::Fill).is_none());
    }

    #[test]
    fn test_header_counts_selection() {
        let mut canvas = Canvas::new();
        let text = Shape::new(ShapeProps::Text(Text::new("Hi", 24.0)), Point::ZERO);
        let id = canvas.create_shape(text).unwrap();
        canvas.select(id);
        assert_eq!(StylePanelState::derive(&canvas).header_text(), "1 selected");
    }

    #[test]
    fn test_apply_style_is_one_undo_step() {
        let mut canvas = Canvas::new();
        let a = rect(&mut canvas, ColorStyle::Black);
        let b = rect(&mut canvas, ColorStyle::Black);
        canvas.select(a);
        canvas.add_to_selection(b);
        let undo_before = canvas.document.undo_depth();

        apply_style(&mut canvas, StyleValue::Color(ColorStyle::Green));

        assert_eq!(canvas.document.undo_depth(), undo_before + 1);
        assert_eq!(canvas.shape(a).unwrap().style.color, ColorStyle::Green);
        assert_eq!(canvas.shape(b).unwrap().style.color, ColorStyle::Green);
        assert_eq!(
            canvas.style_for_next_shape(StyleKey::Color),
            StyleValue::Color(ColorStyle::Green)
        );
        assert!(canvas.is_changing_style());

        assert!(canvas.undo());
        assert_eq!(canvas.shape(a).unwrap().style.color, ColorStyle::Black);
        assert_eq!(canvas.shape(b).unwrap().style.color, ColorStyle::Black);
    }

    #[test]
    fn test_apply_style_in_shape_tool_leaves_selection() {
        let mut canvas = Canvas::new();
        let a = rect(&mut canvas, ColorStyle::Black);
        canvas.select(a);
        canvas.set_tool(ToolKind::Rectangle);

        apply_style(&mut canvas, StyleValue::Color(ColorStyle::Red));

        assert_eq!(canvas.shape(a).unwrap().style.color, ColorStyle::Black);
        assert_eq!(
            canvas.style_for_next_shape(StyleKey::Color),
            StyleValue::Color(ColorStyle::Red)
        );
    }

    #[test]
    fn test_apply_opacity() {
        let mut canvas = Canvas::new();
        let a = rect(&mut canvas, ColorStyle::Black);
        let b = rect(&mut canvas, ColorStyle::Black);
        canvas.select(a);
        canvas.add_to_selection(b);
        assert_eq!(canvas.shared_opacity(), SharedStyle::Shared(1.0));

        apply_opacity(&mut canvas, opacity_for_index(nearest_opacity_index(0.6)));

        assert!((canvas.shape(a).unwrap().opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(canvas.shared_opacity(), SharedStyle::Shared(0.5));
        assert!((canvas.next_opacity() - 0.5).abs() < f64::EPSILON);
    }
}
