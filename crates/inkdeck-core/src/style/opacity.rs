//! Opacity stops for the properties slider.

use super::SharedStyle;

/// Discrete opacity values the slider snaps to.
pub const OPACITY_STOPS: [f64; 5] = [0.1, 0.25, 0.5, 0.75, 1.0];

/// Label shown when the selection has differing opacities.
pub const MIXED_OPACITY_LABEL: &str = "Mixed values";

/// Index of the stop closest to `value`. Ties go to the lower index.
pub fn nearest_opacity_index(value: f64) -> usize {
    let mut best = 0;
    let mut best_diff = f64::INFINITY;
    for (i, stop) in OPACITY_STOPS.iter().enumerate() {
        let diff = (stop - value).abs();
        if diff < best_diff {
            best = i;
            best_diff = diff;
        }
    }
    best
}

/// Slider position for a shared opacity. Mixed and unset sit on the last stop.
pub fn opacity_slider_index(opacity: SharedStyle<f64>) -> usize {
    match opacity {
        SharedStyle::Shared(value) => nearest_opacity_index(value),
        SharedStyle::Mixed | SharedStyle::Unset => OPACITY_STOPS.len() - 1,
    }
}

/// Stop value for a slider position, clamped to the last stop.
pub fn opacity_for_index(index: usize) -> f64 {
    OPACITY_STOPS[index.min(OPACITY_STOPS.len() - 1)]
}

/// Text shown next to the slider.
pub fn opacity_label(opacity: SharedStyle<f64>) -> String {
    match opacity {
        SharedStyle::Shared(value) => format!("{}%", (value * 100.0).round() as i64),
        SharedStyle::Mixed | SharedStyle::Unset => MIXED_OPACITY_LABEL.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nearest_stop() {
        assert_eq!(nearest_opacity_index(0.6), 2);
        assert_eq!(nearest_opacity_index(0.0), 0);
        assert_eq!(nearest_opacity_index(1.0), 4);
        assert_eq!(nearest_opacity_index(2.0), 4);
        assert_eq!(nearest_opacity_index(0.3), 1);
    }

    #[test]
    fn test_ties_prefer_lower_stop() {
        // Exactly between 0.5 and 0.75
        assert_eq!(nearest_opacity_index(0.625), 2);
        // Exactly between 0.75 and 1.0
        assert_eq!(nearest_opacity_index(0.875), 3);
    }

    #[test]
    fn test_slider_index_for_mixed() {
        assert_eq!(opacity_slider_index(SharedStyle::Mixed), 4);
        assert_eq!(opacity_slider_index(SharedStyle::Shared(0.25)), 1);
        assert!((opacity_for_index(2) - 0.5).abs() < f64::EPSILON);
        assert!((opacity_for_index(99) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_labels() {
        assert_eq!(opacity_label(SharedStyle::Shared(0.25)), "25%");
        assert_eq!(opacity_label(SharedStyle::Shared(1.0)), "100%");
        assert_eq!(opacity_label(SharedStyle::Mixed), "Mixed values");
    }
}
