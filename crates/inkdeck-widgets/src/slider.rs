//! Opacity slider snapping to fixed stops.

use egui::{RichText, Ui};
use inkdeck_core::style::{
    opacity_for_index, opacity_label, opacity_slider_index, SharedStyle, OPACITY_STOPS,
};

use crate::{layout, theme};

pub struct OpacitySlider<'a> {
    label: &'a str,
    opacity: SharedStyle<f64>,
}

impl<'a> OpacitySlider<'a> {
    pub fn new(label: &'a str, opacity: SharedStyle<f64>) -> Self {
        Self { label, opacity }
    }

    /// Show the slider. Returns the stop value when the user moves to a
    /// different stop.
    pub fn show(self, ui: &mut Ui) -> Option<f64> {
        let original = opacity_slider_index(self.opacity);
        let mut index = original;
        let mut picked = None;

        layout::section_label(ui, self.label);
        ui.horizontal(|ui| {
            let slider = egui::Slider::new(&mut index, 0..=OPACITY_STOPS.len() - 1)
                .step_by(1.0)
                .show_value(false);
            if ui.add(slider).changed() && index != original {
                picked = Some(opacity_for_index(index));
            }
            ui.label(
                RichText::new(opacity_label(self.opacity))
                    .size(11.0)
                    .color(theme::TEXT_MUTED),
            );
        });

        picked
    }
}
