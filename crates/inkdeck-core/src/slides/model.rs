//! Slide records, slide sizes and deck configuration.

use crate::camera::ZoomOptions;
use crate::canvas::PageId;
use crate::shapes::ShapeId;
use serde::{Deserialize, Serialize};

/// Title used when a slide title is blank.
pub const FALLBACK_TITLE: &str = "Slide";

/// Trim a title, substituting [`FALLBACK_TITLE`] when nothing is left.
pub fn normalize_title(title: &str) -> String {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One slide, backed by exactly one editor page.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    pub id: PageId,
    pub title: String,
    /// Cached id of the page's locked frame.
    pub frame_id: Option<ShapeId>,
}

impl Slide {
    pub fn new(id: PageId, title: &str) -> Self {
        Self {
            id,
            title: normalize_title(title),
            frame_id: None,
        }
    }
}

/// Slide dimensions in page units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlideSize {
    pub w: f64,
    pub h: f64,
}

impl SlideSize {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// Supported slide aspect ratios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Widescreen,
}

impl AspectRatio {
    pub fn label(self) -> &'static str {
        match self {
            AspectRatio::Widescreen => "16:9",
        }
    }

    pub fn size(self) -> SlideSize {
        SLIDE_SIZES
            .iter()
            .find(|(ratio, _)| *ratio == self)
            .map_or(SlideSize::new(1600.0, 900.0), |(_, size)| *size)
    }
}

/// Page-unit size for each aspect ratio.
pub const SLIDE_SIZES: [(AspectRatio, SlideSize); 1] =
    [(AspectRatio::Widescreen, SlideSize::new(1600.0, 900.0))];

pub const DEFAULT_ASPECT_RATIO: AspectRatio = AspectRatio::Widescreen;

/// Deck settings. Missing fields take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    pub aspect_ratio: AspectRatio,
    /// Screen-space margin kept around the frame when fitting.
    pub fit_inset: f64,
    /// Animate the viewport when switching slides.
    pub animate_fit: bool,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            fit_inset: 0.0,
            animate_fit: false,
        }
    }
}

impl DeckConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn slide_size(&self) -> SlideSize {
        self.aspect_ratio.size()
    }

    /// Viewport options used when fitting a slide frame.
    pub fn zoom_options(&self) -> ZoomOptions {
        ZoomOptions::default()
            .target_zoom(1.0)
            .inset(self.fit_inset)
            .immediate(!self.animate_fit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_title() {
        assert_eq!(normalize_title("  Intro "), "Intro");
        assert_eq!(normalize_title("   "), FALLBACK_TITLE);
        assert_eq!(normalize_title(""), FALLBACK_TITLE);
    }

    #[test]
    fn test_default_size() {
        let size = DEFAULT_ASPECT_RATIO.size();
        assert!((size.w - 1600.0).abs() < f64::EPSILON);
        assert!((size.h - 900.0).abs() < f64::EPSILON);
        assert_eq!(DEFAULT_ASPECT_RATIO.label(), "16:9");
    }

    #[test]
    fn test_config_defaults_and_json() {
        let config = DeckConfig::default();
        let options = config.zoom_options();
        assert_eq!(options.target_zoom, Some(1.0));
        assert!(options.immediate);

        let parsed = DeckConfig::from_json(r#"{ "aspect_ratio": "16:9", "animate_fit": true }"#)
            .unwrap();
        assert!(parsed.animate_fit);
        assert!((parsed.fit_inset - 0.0).abs() < f64::EPSILON);
        assert!(!parsed.zoom_options().immediate);

        assert!(DeckConfig::from_json(r#"{ "aspect_ratio": "4:3" }"#).is_err());
    }
}
