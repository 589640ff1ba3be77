//! Color palette and nearest-color matching for hex input.

use crate::shapes::ColorStyle;

/// A named palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorOption<T> {
    pub value: T,
    pub label: &'static str,
    /// `#RRGGBB`
    pub hex: &'static str,
}

impl<T> ColorOption<T> {
    pub const fn new(value: T, label: &'static str, hex: &'static str) -> Self {
        Self { value, label, hex }
    }

    /// Decoded RGB triple, `None` if the entry's hex is malformed.
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        hex_to_rgb(self.hex)
    }
}

/// The stroke color palette offered by the properties panel.
pub const STYLE_COLOR_OPTIONS: [ColorOption<ColorStyle>; 12] = [
    ColorOption::new(ColorStyle::Black, "Black", "#1F1F1F"),
    ColorOption::new(ColorStyle::Grey, "Grey", "#8C8C8C"),
    ColorOption::new(ColorStyle::LightViolet, "Light Violet", "#C5A4FF"),
    ColorOption::new(ColorStyle::Violet, "Violet", "#7A4DFF"),
    ColorOption::new(ColorStyle::Blue, "Blue", "#2D70FF"),
    ColorOption::new(ColorStyle::LightBlue, "Light Blue", "#4CB5FF"),
    ColorOption::new(ColorStyle::Yellow, "Yellow", "#F9D94A"),
    ColorOption::new(ColorStyle::Orange, "Orange", "#FF9D48"),
    ColorOption::new(ColorStyle::Green, "Green", "#32A852"),
    ColorOption::new(ColorStyle::LightGreen, "Light Green", "#7ED957"),
    ColorOption::new(ColorStyle::LightRed, "Light Red", "#FF7C7C"),
    ColorOption::new(ColorStyle::Red, "Red", "#FF4D4F"),
];

/// Palette entry for a color style.
pub fn color_option(color: ColorStyle) -> Option<&'static ColorOption<ColorStyle>> {
    STYLE_COLOR_OPTIONS.iter().find(|option| option.value == color)
}

/// Normalize a free-form hex string to `#RRGGBB`.
///
/// Surrounding whitespace is ignored and the `#` is optional. Anything other
/// than exactly six hex digits is rejected.
pub fn normalize_hex(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    Some(format!("#{}", digits.to_ascii_uppercase()))
}

/// Decode a hex string (any form [`normalize_hex`] accepts) to RGB.
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let normalized = normalize_hex(hex)?;
    let digits = &normalized[1..];
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Squared Euclidean distance between two RGB triples.
pub fn color_distance(a: (u8, u8, u8), b: (u8, u8, u8)) -> u32 {
    let d = |x: u8, y: u8| {
        let diff = i32::from(x) - i32::from(y);
        (diff * diff) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

/// Find the palette entry closest to `hex`.
///
/// Ties go to the earliest entry. Entries with malformed hex are skipped.
/// Returns `None` for malformed input or an empty palette.
pub fn closest_color_option<'a, T>(
    hex: &str,
    options: &'a [ColorOption<T>],
) -> Option<&'a ColorOption<T>> {
    let Some(target) = hex_to_rgb(hex) else {
        log::debug!("Ignoring malformed hex color {hex:?}");
        return None;
    };

    let mut best: Option<(&ColorOption<T>, u32)> = None;
    for option in options {
        let Some(rgb) = option.rgb() else { continue };
        let distance = color_distance(target, rgb);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((option, distance)),
        }
    }
    best.map(|(option, _)| option)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_hex_accepts() {
        assert_eq!(normalize_hex("ff0000").as_deref(), Some("#FF0000"));
        assert_eq!(normalize_hex("#ff0000").as_deref(), Some("#FF0000"));
        assert_eq!(normalize_hex("#FF0000").as_deref(), Some("#FF0000"));
        assert_eq!(normalize_hex("  #aBc123 ").as_deref(), Some("#ABC123"));
    }

    #[test]
    fn test_normalize_hex_rejects() {
        assert_eq!(normalize_hex("red"), None);
        assert_eq!(normalize_hex("#ff00"), None);
        assert_eq!(normalize_hex(""), None);
        assert_eq!(normalize_hex("#"), None);
        assert_eq!(normalize_hex("##ff0000"), None);
        assert_eq!(normalize_hex("#ff00000"), None);
        assert_eq!(normalize_hex("#gg0000"), None);
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#1F1F1F"), Some((31, 31, 31)));
        assert_eq!(hex_to_rgb("ff8000"), Some((255, 128, 0)));
        assert_eq!(hex_to_rgb("nope"), None);
    }

    #[test]
    fn test_closest_prefers_nearest() {
        let palette = [
            ColorOption::new("black", "Black", "#000000"),
            ColorOption::new("red", "Red", "#FF0000"),
        ];
        // 128^2 = 16384 to black, 127^2 = 16129 to red
        assert_eq!(closest_color_option("#800000", &palette).map(|o| o.value), Some("red"));
        assert_eq!(closest_color_option("#000000", &palette).map(|o| o.value), Some("black"));
    }

    #[test]
    fn test_closest_ties_go_to_first() {
        let palette = [
            ColorOption::new(1, "A", "#000000"),
            ColorOption::new(2, "B", "#000000"),
            ColorOption::new(3, "C", "#020000"),
        ];
        assert_eq!(closest_color_option("#010000", &palette).map(|o| o.value), Some(1));
    }

    #[test]
    fn test_closest_rejects_bad_input_and_empty_palette() {
        let empty: [ColorOption<u8>; 0] = [];
        assert!(closest_color_option("#000000", &empty).is_none());
        assert!(closest_color_option("black", &STYLE_COLOR_OPTIONS).is_none());
    }

    #[test]
    fn test_closest_skips_malformed_entries() {
        let palette = [
            ColorOption::new(1, "Broken", "#00"),
            ColorOption::new(2, "White", "#FFFFFF"),
        ];
        assert_eq!(closest_color_option("#000000", &palette).map(|o| o.value), Some(2));
    }

    #[test]
    fn test_style_palette() {
        assert!(STYLE_COLOR_OPTIONS.iter().all(|o| o.rgb().is_some()));
        for color in ColorStyle::ALL {
            assert!(color_option(*color).is_some());
        }
        let closest = closest_color_option("#FF5050", &STYLE_COLOR_OPTIONS);
        assert_eq!(closest.map(|o| o.value), Some(ColorStyle::Red));
    }
}
