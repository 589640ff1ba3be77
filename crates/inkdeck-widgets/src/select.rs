//! Dropdown for enumerated style properties.

use egui::Ui;
use inkdeck_core::style::{SharedStyle, MIXED_LABEL, UNSET_LABEL};

use crate::layout;

/// A labelled dropdown over a fixed list of options.
///
/// Mixed and unset values show as disabled placeholder entries, so they can
/// be displayed but never picked.
pub struct StyleSelect<'a, T> {
    label: &'a str,
    value: SharedStyle<T>,
    options: &'a [T],
    option_label: fn(T) -> &'static str,
    width: f32,
}

impl<'a, T: Copy + PartialEq> StyleSelect<'a, T> {
    pub fn new(
        label: &'a str,
        value: SharedStyle<T>,
        options: &'a [T],
        option_label: fn(T) -> &'static str,
    ) -> Self {
        Self {
            label,
            value,
            options,
            option_label,
            width: 200.0,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    /// Text shown in the closed dropdown.
    pub fn selected_text(&self) -> &'static str {
        match self.value {
            SharedStyle::Shared(value) => (self.option_label)(value),
            SharedStyle::Mixed => MIXED_LABEL,
            SharedStyle::Unset => UNSET_LABEL,
        }
    }

    /// Show the dropdown. Returns the newly picked option, if it differs from
    /// the current value.
    pub fn show(self, ui: &mut Ui) -> Option<T> {
        let original = self.value.value().copied();
        let mut current = original;

        layout::section_label(ui, self.label);
        egui::ComboBox::from_id_salt(("style_select", self.label))
            .selected_text(self.selected_text())
            .width(self.width)
            .show_ui(ui, |ui| {
                ui.add_enabled_ui(false, |ui| {
                    let _ = ui.selectable_label(self.value == SharedStyle::Unset, UNSET_LABEL);
                    let _ = ui.selectable_label(self.value.is_mixed(), MIXED_LABEL);
                });
                for &option in self.options {
                    ui.selectable_value(&mut current, Some(option), (self.option_label)(option));
                }
            });

        if current != original { current } else { None }
    }
}
