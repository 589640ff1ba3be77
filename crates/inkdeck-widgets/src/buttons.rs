//! Button components: toggle buttons, text buttons, glyph buttons.

use egui::{vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Sense, Ui};

use crate::{sizing, theme};

/// A toggle button with a text label, filled with the accent color when
/// selected.
pub struct ToggleButton<'a> {
    label: &'a str,
    selected: bool,
    tooltip: Option<&'a str>,
    min_width: Option<f32>,
    height: f32,
}

impl<'a> ToggleButton<'a> {
    pub fn new(label: &'a str, selected: bool) -> Self {
        Self {
            label,
            selected,
            tooltip: None,
            min_width: None,
            height: sizing::MEDIUM,
        }
    }

    pub fn tooltip(mut self, tooltip: &'a str) -> Self {
        self.tooltip = Some(tooltip);
        self
    }

    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = Some(width);
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::proportional(12.0);
        let text_width = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
            .size()
            .x;
        let width = self.min_width.unwrap_or(0.0).max(text_width + 16.0);
        let (rect, response) = ui.allocate_exact_size(vec2(width, self.height), Sense::click());

        if ui.is_rect_visible(rect) {
            let (bg_color, text_color) = if self.selected {
                (theme::ACCENT, Color32::WHITE)
            } else if response.hovered() {
                (Color32::from_gray(235), Color32::from_gray(80))
            } else {
                (Color32::TRANSPARENT, Color32::from_gray(80))
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter()
                .text(rect.center(), Align2::CENTER_CENTER, self.label, font_id, text_color);
        }

        let clicked = response.clicked();
        let response = response.on_hover_cursor(CursorIcon::PointingHand);
        if let Some(tooltip) = self.tooltip {
            response.on_hover_text(tooltip);
        }
        clicked
    }
}

/// A flat text button, optionally disabled.
pub struct TextButton<'a> {
    label: &'a str,
    enabled: bool,
}

impl<'a> TextButton<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Show the button and return true if clicked while enabled.
    pub fn show(self, ui: &mut Ui) -> bool {
        let font_id = FontId::proportional(12.0);
        let text_width = ui
            .painter()
            .layout_no_wrap(self.label.to_string(), font_id.clone(), Color32::PLACEHOLDER)
            .size()
            .x;
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(text_width + 16.0, 24.0), sense);

        if ui.is_rect_visible(rect) {
            let bg_color = if self.enabled && response.hovered() {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            let text_color = if self.enabled {
                theme::TEXT
            } else {
                theme::TEXT_DISABLED
            };
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), bg_color);
            ui.painter().text(
                Pos2::new(rect.left() + 8.0, rect.center().y),
                Align2::LEFT_CENTER,
                self.label,
                font_id,
                text_color,
            );
        }

        let clicked = self.enabled && response.clicked();
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

/// A small square button showing a single glyph (arrows, copy, delete).
pub struct GlyphButton<'a> {
    glyph: &'a str,
    tooltip: &'a str,
    enabled: bool,
}

impl<'a> GlyphButton<'a> {
    pub fn new(glyph: &'a str, tooltip: &'a str) -> Self {
        Self {
            glyph,
            tooltip,
            enabled: true,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn show(self, ui: &mut Ui) -> bool {
        let sense = if self.enabled { Sense::click() } else { Sense::hover() };
        let (rect, response) = ui.allocate_exact_size(vec2(sizing::SMALL, sizing::SMALL), sense);

        if ui.is_rect_visible(rect) {
            if self.enabled && response.hovered() {
                ui.painter().rect_filled(
                    rect,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Color32::from_gray(230),
                );
            }
            let color = if self.enabled {
                theme::TEXT_MUTED
            } else {
                theme::TEXT_DISABLED
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.glyph,
                FontId::proportional(12.0),
                color,
            );
        }

        let clicked = self.enabled && response.clicked();
        let response = response.on_hover_text(self.tooltip);
        if self.enabled {
            response.on_hover_cursor(CursorIcon::PointingHand);
        }
        clicked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buttons_without_input_are_not_clicked() {
        let ctx = egui::Context::default();
        let mut clicks = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                clicks.clear();
                clicks.push(ToggleButton::new("Select", true).tooltip("V").show(ui));
                clicks.push(TextButton::new("Add").enabled(false).show(ui));
                clicks.push(GlyphButton::new("↑", "Move up").enabled(false).show(ui));
            });
        });
        assert_eq!(clicks, vec![false, false, false]);
    }
}
