//! Style properties carried by shapes.

use peniko::Color;
use serde::{Deserialize, Serialize};

/// Declares a closed set of named style values.
macro_rules! style_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $($variant),+
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl $name {
            /// All values in display order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical name of the value.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }
    };
}

style_enum!(
    /// Named stroke colors.
    ColorStyle, default = Black {
        Black => "black",
        Grey => "grey",
        LightViolet => "light-violet",
        Violet => "violet",
        Blue => "blue",
        LightBlue => "light-blue",
        Yellow => "yellow",
        Orange => "orange",
        Green => "green",
        LightGreen => "light-green",
        LightRed => "light-red",
        Red => "red",
    }
);

style_enum!(
    /// How a closed shape is filled.
    FillStyle, default = None {
        None => "none",
        Semi => "semi",
        Solid => "solid",
        Pattern => "pattern",
    }
);

style_enum!(
    /// Stroke dash pattern.
    DashStyle, default = Draw {
        Draw => "draw",
        Dashed => "dashed",
        Dotted => "dotted",
        Solid => "solid",
    }
);

style_enum!(
    /// Stroke and text size.
    SizeStyle, default = M {
        S => "s",
        M => "m",
        L => "l",
        Xl => "xl",
    }
);

style_enum!(
    /// Font family for text.
    FontStyle, default = Draw {
        Draw => "draw",
        Sans => "sans",
        Serif => "serif",
        Mono => "mono",
    }
);

impl ColorStyle {
    /// Resolve to a concrete color through the style palette.
    pub fn color(self) -> Color {
        crate::style::color_option(self)
            .and_then(|option| option.rgb())
            .map(|(r, g, b)| Color::from_rgba8(r, g, b, 255))
            .unwrap_or(Color::from_rgba8(0, 0, 0, 255))
    }
}

impl SizeStyle {
    /// Stroke width in page units.
    pub fn stroke_width(self) -> f64 {
        match self {
            SizeStyle::S => 2.0,
            SizeStyle::M => 3.5,
            SizeStyle::L => 5.0,
            SizeStyle::Xl => 10.0,
        }
    }

    /// Font size in page units.
    pub fn font_size(self) -> f64 {
        match self {
            SizeStyle::S => 18.0,
            SizeStyle::M => 24.0,
            SizeStyle::L => 36.0,
            SizeStyle::Xl => 44.0,
        }
    }
}

/// A style property that can be shared across a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StyleKey {
    Color,
    Fill,
    Dash,
    Size,
    Font,
}

impl StyleKey {
    /// All keys in panel order.
    pub const ALL: [StyleKey; 5] = [
        StyleKey::Color,
        StyleKey::Fill,
        StyleKey::Dash,
        StyleKey::Size,
        StyleKey::Font,
    ];

    /// Label shown next to the property control.
    pub fn label(self) -> &'static str {
        match self {
            StyleKey::Color => "Color",
            StyleKey::Fill => "Fill",
            StyleKey::Dash => "Dash",
            StyleKey::Size => "Size",
            StyleKey::Font => "Font",
        }
    }

    /// Every value this property can take, in display order.
    pub fn options(self) -> Vec<StyleValue> {
        match self {
            StyleKey::Color => ColorStyle::ALL.iter().copied().map(StyleValue::Color).collect(),
            StyleKey::Fill => FillStyle::ALL.iter().copied().map(StyleValue::Fill).collect(),
            StyleKey::Dash => DashStyle::ALL.iter().copied().map(StyleValue::Dash).collect(),
            StyleKey::Size => SizeStyle::ALL.iter().copied().map(StyleValue::Size).collect(),
            StyleKey::Font => FontStyle::ALL.iter().copied().map(StyleValue::Font).collect(),
        }
    }
}

/// A concrete value for one style property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleValue {
    Color(ColorStyle),
    Fill(FillStyle),
    Dash(DashStyle),
    Size(SizeStyle),
    Font(FontStyle),
}

impl StyleValue {
    /// The property this value belongs to.
    pub fn key(self) -> StyleKey {
        match self {
            StyleValue::Color(_) => StyleKey::Color,
            StyleValue::Fill(_) => StyleKey::Fill,
            StyleValue::Dash(_) => StyleKey::Dash,
            StyleValue::Size(_) => StyleKey::Size,
            StyleValue::Font(_) => StyleKey::Font,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StyleValue::Color(v) => v.name(),
            StyleValue::Fill(v) => v.name(),
            StyleValue::Dash(v) => v.name(),
            StyleValue::Size(v) => v.name(),
            StyleValue::Font(v) => v.name(),
        }
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ShapeStyle {
    pub color: ColorStyle,
    pub fill: FillStyle,
    pub dash: DashStyle,
    pub size: SizeStyle,
    pub font: FontStyle,
}

impl ShapeStyle {
    /// Read one property.
    pub fn get(&self, key: StyleKey) -> StyleValue {
        match key {
            StyleKey::Color => StyleValue::Color(self.color),
            StyleKey::Fill => StyleValue::Fill(self.fill),
            StyleKey::Dash => StyleValue::Dash(self.dash),
            StyleKey::Size => StyleValue::Size(self.size),
            StyleKey::Font => StyleValue::Font(self.font),
        }
    }

    /// Write one property.
    pub fn set(&mut self, value: StyleValue) {
        match value {
            StyleValue::Color(v) => self.color = v,
            StyleValue::Fill(v) => self.fill = v,
            StyleValue::Dash(v) => self.dash = v,
            StyleValue::Size(v) => self.size = v,
            StyleValue::Font(v) => self.font = v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_names_and_order() {
        assert_eq!(ColorStyle::ALL.len(), 12);
        assert_eq!(ColorStyle::ALL[0], ColorStyle::Black);
        assert_eq!(ColorStyle::LightViolet.name(), "light-violet");
        assert_eq!(FillStyle::default(), FillStyle::None);
        assert_eq!(FillStyle::None.name(), "none");
        assert_eq!(SizeStyle::default(), SizeStyle::M);
        assert_eq!(
            FontStyle::ALL.iter().map(|f| f.name()).collect::<Vec<_>>(),
            vec!["draw", "sans", "serif", "mono"]
        );
    }

    #[test]
    fn test_style_get_set() {
        let mut style = ShapeStyle::default();
        style.set(StyleValue::Dash(DashStyle::Dotted));
        assert_eq!(style.get(StyleKey::Dash), StyleValue::Dash(DashStyle::Dotted));
        assert_eq!(style.get(StyleKey::Color), StyleValue::Color(ColorStyle::Black));
    }

    #[test]
    fn test_options_match_key() {
        for key in StyleKey::ALL {
            assert!(key.options().iter().all(|v| v.key() == key));
        }
        assert_eq!(StyleKey::Size.options().len(), 4);
    }

    #[test]
    fn test_color_resolves_through_palette() {
        let rgba = ColorStyle::Red.color().to_rgba8();
        assert_eq!((rgba.r, rgba.g, rgba.b), (0xFF, 0x4D, 0x4F));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ColorStyle::LightBlue).unwrap();
        assert_eq!(json, "\"light-blue\"");
    }
}
