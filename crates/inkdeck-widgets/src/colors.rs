//! Color swatches and the palette picker.
//!
//! The picker shows a fixed palette as a grid of swatches plus a hex field.
//! Typed hex values are snapped to the closest palette entry, so the picker
//! only ever reports values from its palette.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Pos2, Rect, Sense, Stroke, StrokeKind,
    Ui, Vec2,
};
use inkdeck_core::style::{closest_color_option, hex_to_rgb, normalize_hex, ColorOption};

use crate::{layout, sizing, theme};

/// Convert an RGB triple to an opaque egui color.
pub fn color32_from_rgb((r, g, b): (u8, u8, u8)) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Parse a hex string (`#RRGGBB` or `RRGGBB`) to an egui color.
pub fn color32_from_hex(hex: &str) -> Option<Color32> {
    hex_to_rgb(hex).map(color32_from_rgb)
}

/// How to indicate selection on a color swatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionStyle {
    None,
    /// Dark ring inset from the edge
    InnerRing,
    /// Accent border plus a check badge in the corner
    CheckBadge,
}

/// Style configuration for a color swatch.
#[derive(Debug, Clone, Copy)]
pub struct ColorSwatchStyle {
    pub size: Vec2,
    pub circular: bool,
    pub selection_style: SelectionStyle,
}

impl Default for ColorSwatchStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::SMALL, sizing::SMALL),
            circular: true,
            selection_style: SelectionStyle::InnerRing,
        }
    }
}

impl ColorSwatchStyle {
    /// Rounded square used in the palette grid.
    pub fn palette() -> Self {
        Self {
            size: vec2(24.0, 24.0),
            circular: false,
            selection_style: SelectionStyle::CheckBadge,
        }
    }

    /// Larger square used as the hex preview.
    pub fn preview() -> Self {
        Self {
            size: vec2(sizing::MEDIUM, sizing::MEDIUM),
            circular: false,
            selection_style: SelectionStyle::None,
        }
    }
}

/// A clickable color swatch.
pub struct ColorSwatch<'a> {
    color: Color32,
    tooltip: &'a str,
    selected: bool,
    style: ColorSwatchStyle,
}

impl<'a> ColorSwatch<'a> {
    pub fn new(color: Color32, tooltip: &'a str) -> Self {
        Self {
            color,
            tooltip,
            selected: false,
            style: ColorSwatchStyle::default(),
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn style(mut self, style: ColorSwatchStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the swatch and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let center = rect.center();
            let radius = rect.width().min(rect.height()) / 2.0;
            let corner = CornerRadius::same(sizing::CORNER_RADIUS);
            let outline = Stroke::new(1.0, Color32::from_black_alpha(25));

            if self.style.circular {
                painter.circle_filled(center, radius, self.color);
                painter.circle_stroke(center, radius, outline);
            } else {
                painter.rect_filled(rect, corner, self.color);
                painter.rect_stroke(rect, corner, outline, StrokeKind::Inside);
            }

            if self.selected {
                match self.style.selection_style {
                    SelectionStyle::None => {}
                    SelectionStyle::InnerRing if self.style.circular => {
                        painter.circle_stroke(
                            center,
                            radius - 3.0,
                            Stroke::new(2.0, Color32::from_gray(30)),
                        );
                    }
                    SelectionStyle::InnerRing => {
                        painter.rect_stroke(
                            rect.shrink(3.0),
                            corner,
                            Stroke::new(2.0, Color32::from_gray(30)),
                            StrokeKind::Inside,
                        );
                    }
                    SelectionStyle::CheckBadge => {
                        painter.rect_stroke(
                            rect.expand(1.0),
                            corner,
                            Stroke::new(2.0, theme::ACCENT),
                            StrokeKind::Outside,
                        );
                        let badge = Pos2::new(rect.right() - 1.0, rect.top() + 1.0);
                        painter.circle_filled(badge, 6.0, Color32::WHITE);
                        painter.circle_stroke(badge, 6.0, Stroke::new(1.0, theme::BORDER));
                        painter.text(
                            badge,
                            Align2::CENTER_CENTER,
                            "✓",
                            FontId::proportional(9.0),
                            theme::TEXT,
                        );
                    }
                }
            }
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// Text state of the picker's hex field, kept by the caller across frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HexInputState {
    pub text: String,
    synced: Option<String>,
}

impl HexInputState {
    /// Replace the typed text when the selected palette entry changed.
    ///
    /// While the selection stays the same, partial input is left alone.
    pub fn sync(&mut self, selected_hex: Option<&str>) {
        if self.synced.as_deref() == selected_hex {
            return;
        }
        self.synced = selected_hex.map(str::to_string);
        self.text = self.synced.clone().unwrap_or_default();
    }

    /// Palette entry closest to the typed text, `None` if the text is not a
    /// six-digit hex color.
    pub fn resolve<'o, T>(&self, options: &'o [ColorOption<T>]) -> Option<&'o ColorOption<T>> {
        let normalized = normalize_hex(&self.text)?;
        closest_color_option(&normalized, options)
    }

    /// Color to show next to the field: the typed color when valid, else the
    /// synced selection.
    pub fn preview_color(&self) -> Option<Color32> {
        color32_from_hex(&self.text).or_else(|| self.synced.as_deref().and_then(color32_from_hex))
    }
}

/// Palette picker: label row, swatch grid and hex field.
pub struct ColorPicker<'a, T> {
    label: &'a str,
    options: &'a [ColorOption<T>],
    value: Option<T>,
    status_text: Option<&'a str>,
    columns: usize,
}

impl<'a, T: Copy + PartialEq> ColorPicker<'a, T> {
    pub fn new(label: &'a str, options: &'a [ColorOption<T>]) -> Self {
        Self {
            label,
            options,
            value: None,
            status_text: None,
            columns: 6,
        }
    }

    /// The currently selected value, `None` when nothing is selected.
    pub fn value(mut self, value: Option<T>) -> Self {
        self.value = value;
        self
    }

    /// Secondary text shown right of the label (e.g. "Mixed values").
    pub fn status_text(mut self, text: Option<&'a str>) -> Self {
        self.status_text = text;
        self
    }

    pub fn columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    fn selected(&self) -> Option<&'a ColorOption<T>> {
        let value = self.value?;
        self.options.iter().find(|option| option.value == value)
    }

    /// Show the picker. Returns the picked value, from a swatch click or from
    /// the hex field when it is committed (Enter or focus loss).
    pub fn show(self, ui: &mut Ui, hex: &mut HexInputState) -> Option<T> {
        hex.sync(self.selected().map(|option| option.hex));
        let mut picked = None;

        ui.horizontal(|ui| {
            layout::section_label(ui, self.label);
            if let Some(status) = self.status_text {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    layout::section_label(ui, status);
                });
            }
        });

        egui::Grid::new(("color_picker", self.label))
            .spacing(vec2(6.0, 6.0))
            .show(ui, |ui| {
                for (i, option) in self.options.iter().enumerate() {
                    let color = option
                        .rgb()
                        .map(color32_from_rgb)
                        .unwrap_or(Color32::TRANSPARENT);
                    let swatch = ColorSwatch::new(color, option.label)
                        .selected(self.value == Some(option.value))
                        .style(ColorSwatchStyle::palette());
                    if swatch.show(ui) {
                        picked = Some(option.value);
                    }
                    if (i + 1) % self.columns == 0 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let field = egui::TextEdit::singleline(&mut hex.text)
                .hint_text("#000000")
                .char_limit(7)
                .desired_width(96.0);
            let response = ui.add(field);
            if response.lost_focus() {
                if let Some(option) = hex.resolve(self.options) {
                    picked = Some(option.value);
                }
            }

            let preview = hex.preview_color().unwrap_or(Color32::WHITE);
            let (rect, _) = ui.allocate_exact_size(ColorSwatchStyle::preview().size, Sense::hover());
            paint_preview(ui, rect, preview);
        });

        picked
    }
}

fn paint_preview(ui: &Ui, rect: Rect, color: Color32) {
    let corner = CornerRadius::same(sizing::CORNER_RADIUS);
    ui.painter().rect_filled(rect, corner, color);
    ui.painter()
        .rect_stroke(rect, corner, Stroke::new(1.0, theme::BORDER), StrokeKind::Inside);
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkdeck_core::shapes::ColorStyle;
    use inkdeck_core::style::STYLE_COLOR_OPTIONS;

    fn run_ui(mut add_contents: impl FnMut(&mut Ui)) {
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| add_contents(ui));
        });
    }

    #[test]
    fn test_color32_from_hex() {
        assert_eq!(color32_from_hex("#FF4D4F"), Some(Color32::from_rgb(255, 77, 79)));
        assert_eq!(color32_from_hex("1f1f1f"), Some(Color32::from_rgb(31, 31, 31)));
        assert_eq!(color32_from_hex("#12345"), None);
    }

    #[test]
    fn test_hex_sync_follows_selection() {
        let mut hex = HexInputState::default();
        hex.sync(Some("#2D70FF"));
        assert_eq!(hex.text, "#2D70FF");

        // Partial input survives while the selection is unchanged
        hex.text = "#12".to_string();
        hex.sync(Some("#2D70FF"));
        assert_eq!(hex.text, "#12");

        hex.sync(Some("#FF4D4F"));
        assert_eq!(hex.text, "#FF4D4F");

        hex.sync(None);
        assert_eq!(hex.text, "");
    }

    #[test]
    fn test_hex_resolve_snaps_to_palette() {
        let mut hex = HexInputState::default();
        hex.text = " 800000 ".to_string();
        let option = hex.resolve(&STYLE_COLOR_OPTIONS).unwrap();
        assert_eq!(option.value, ColorStyle::Red);

        hex.text = "#000000".to_string();
        assert_eq!(hex.resolve(&STYLE_COLOR_OPTIONS).unwrap().value, ColorStyle::Black);

        hex.text = "nope".to_string();
        assert!(hex.resolve(&STYLE_COLOR_OPTIONS).is_none());
    }

    #[test]
    fn test_preview_falls_back_to_selection() {
        let mut hex = HexInputState::default();
        hex.sync(Some("#32A852"));
        hex.text = "#3".to_string();
        assert_eq!(hex.preview_color(), Some(Color32::from_rgb(50, 168, 82)));

        hex.text = "#000000".to_string();
        assert_eq!(hex.preview_color(), Some(Color32::BLACK));
    }

    #[test]
    fn test_picker_without_input_picks_nothing() {
        let mut hex = HexInputState::default();
        let mut picked = Some(ColorStyle::Black);
        run_ui(|ui| {
            picked = ColorPicker::new("Color", &STYLE_COLOR_OPTIONS)
                .value(Some(ColorStyle::Blue))
                .status_text(None)
                .show(ui, &mut hex);
        });
        assert_eq!(picked, None);
        assert_eq!(hex.text, "#2D70FF");
    }

    #[test]
    fn test_picker_mixed_has_empty_hex() {
        let mut hex = HexInputState::default();
        run_ui(|ui| {
            let _ = ColorPicker::new("Color", &STYLE_COLOR_OPTIONS)
                .value(None)
                .status_text(Some("Mixed values"))
                .show(ui, &mut hex);
        });
        assert_eq!(hex.text, "");
    }
}
