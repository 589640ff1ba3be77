//! egui widgets for the InkDeck sidebars.
//!
//! - **Buttons**: toggle buttons, text buttons, small glyph buttons
//! - **Colors**: palette swatches and the color picker with hex input
//! - **Select**: style dropdown with mixed/unset placeholders
//! - **Slider**: opacity slider snapping to fixed stops
//! - **Menu** and **Layout**: context menu items, panel frames, headers

pub mod buttons;
pub mod colors;
pub mod layout;
pub mod menu;
pub mod select;
pub mod slider;

pub use buttons::{GlyphButton, TextButton, ToggleButton};
pub use colors::{
    color32_from_hex, color32_from_rgb, ColorPicker, ColorSwatch, ColorSwatchStyle, HexInputState,
    SelectionStyle,
};
pub use layout::{section_label, separator, sidebar_header, vertical_separator};
pub use menu::{menu_item_enabled, menu_separator, panel_frame, toolbar_frame};
pub use select::StyleSelect;
pub use slider::OpacitySlider;

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (glyph buttons, color swatches)
    pub const SMALL: f32 = 20.0;
    /// Medium button size (toolbar buttons)
    pub const MEDIUM: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
    /// Sidebar width
    pub const SIDEBAR_WIDTH: f32 = 240.0;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Disabled text and glyphs
    pub const TEXT_DISABLED: Color32 = Color32::from_rgb(190, 190, 190);
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
}
