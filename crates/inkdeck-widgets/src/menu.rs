//! Context menu items and panel frames.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, FontId, Frame, Margin, Pos2, Sense, Stroke,
    Ui,
};

use crate::{sizing, theme};

/// Show a menu item with an optional shortcut hint. Disabled items are drawn
/// greyed out and never report a click.
pub fn menu_item_enabled(ui: &mut Ui, label: &str, shortcut: &str, enabled: bool) -> bool {
    let sense = if enabled { Sense::click() } else { Sense::hover() };
    let (rect, response) = ui.allocate_exact_size(vec2(ui.available_width().max(140.0), 26.0), sense);

    if ui.is_rect_visible(rect) {
        if enabled && response.hovered() {
            ui.painter()
                .rect_filled(rect, CornerRadius::same(sizing::CORNER_RADIUS), theme::HOVER_BG);
        }

        let (text_color, shortcut_color) = if enabled {
            (theme::TEXT, theme::TEXT_MUTED)
        } else {
            (theme::TEXT_DISABLED, Color32::from_gray(210))
        };
        ui.painter().text(
            Pos2::new(rect.left() + 10.0, rect.center().y),
            Align2::LEFT_CENTER,
            label,
            FontId::proportional(13.0),
            text_color,
        );
        if !shortcut.is_empty() {
            ui.painter().text(
                Pos2::new(rect.right() - 10.0, rect.center().y),
                Align2::RIGHT_CENTER,
                shortcut,
                FontId::proportional(12.0),
                shortcut_color,
            );
        }
    }

    let clicked = enabled && response.clicked();
    if enabled {
        response.on_hover_cursor(CursorIcon::PointingHand);
    }
    clicked
}

pub fn menu_separator(ui: &mut Ui) {
    ui.add_space(3.0);
    let rect = ui.available_rect_before_wrap();
    ui.painter().line_segment(
        [
            Pos2::new(rect.left() + 6.0, rect.top()),
            Pos2::new(rect.right() - 6.0, rect.top()),
        ],
        Stroke::new(1.0, Color32::from_gray(230)),
    );
    ui.add_space(3.0);
}

/// Frame for the floating sidebars.
pub fn panel_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 8,
            offset: [0, 2],
            color: Color32::from_black_alpha(15),
        })
        .inner_margin(Margin::same(12))
}

/// Floating toolbar frame.
pub fn toolbar_frame() -> Frame {
    Frame::new()
        .fill(theme::PANEL_BG)
        .corner_radius(CornerRadius::same(sizing::PANEL_RADIUS))
        .stroke(Stroke::new(1.0, theme::BORDER))
        .shadow(egui::epaint::Shadow {
            spread: 0,
            blur: 6,
            offset: [0, 2],
            color: Color32::from_black_alpha(10),
        })
        .inner_margin(Margin::symmetric(10, 6))
}
