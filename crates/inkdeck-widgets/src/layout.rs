//! Layout helpers: separators, section labels, sidebar headers.

use egui::{Color32, Pos2, RichText, Stroke, Ui};

use crate::theme;

/// Draw a horizontal separator line across the available width.
pub fn separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let y = rect.top() + 4.0;
    ui.painter().line_segment(
        [Pos2::new(rect.left(), y), Pos2::new(rect.right(), y)],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(8.0);
}

/// Draw a short vertical separator, for horizontal toolbars.
pub fn vertical_separator(ui: &mut Ui) {
    let rect = ui.available_rect_before_wrap();
    let x = rect.left() + 1.0;
    let top = rect.center().y - 7.0;
    ui.painter().line_segment(
        [Pos2::new(x, top), Pos2::new(x, top + 14.0)],
        Stroke::new(1.0, Color32::from_gray(210)),
    );
    ui.add_space(3.0);
}

pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(11.0).color(theme::TEXT_MUTED));
}

/// Sidebar title with an optional muted subtitle line below it.
pub fn sidebar_header(ui: &mut Ui, title: &str, subtitle: Option<&str>) {
    ui.label(RichText::new(title).size(14.0).strong().color(theme::TEXT));
    if let Some(subtitle) = subtitle {
        ui.label(RichText::new(subtitle).size(11.0).color(theme::TEXT_MUTED));
    }
}
