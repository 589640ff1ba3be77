//! Keyboard shortcut registry.

use egui::{Context, Key, Modifiers};
use inkdeck_core::ToolKind;

use crate::ui::UiAction;

/// A keyboard shortcut bound to a UI action.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: Key,
    pub command: bool,
    pub shift: bool,
    pub description: &'static str,
    pub action: UiAction,
}

impl Shortcut {
    pub fn new(
        key: Key,
        command: bool,
        shift: bool,
        description: &'static str,
        action: UiAction,
    ) -> Self {
        Self {
            key,
            command,
            shift,
            description,
            action,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.command {
            parts.push("Ctrl");
        }
        if self.shift {
            parts.push("Shift");
        }
        parts.push(self.key.name());
        parts.join("+")
    }

    fn modifiers(&self) -> Modifiers {
        let mut modifiers = Modifiers::NONE;
        if self.command {
            modifiers = modifiers | Modifiers::COMMAND;
        }
        if self.shift {
            modifiers = modifiers | Modifiers::SHIFT;
        }
        modifiers
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// All shortcuts. Shifted variants come before their unshifted ones, since
    /// an unshifted binding also matches with Shift held.
    pub fn all() -> Vec<Shortcut> {
        let mut shortcuts: Vec<Shortcut> = ToolKind::ALL
            .iter()
            .filter_map(|&tool| {
                Key::from_name(tool.shortcut())
                    .map(|key| Shortcut::new(key, false, false, tool.label(), UiAction::SetTool(tool)))
            })
            .collect();

        shortcuts.extend([
            Shortcut::new(Key::Z, true, true, "Redo", UiAction::Redo),
            Shortcut::new(Key::Z, true, false, "Undo", UiAction::Undo),
            Shortcut::new(Key::Y, true, false, "Redo", UiAction::Redo),
            Shortcut::new(Key::Delete, false, false, "Delete selected shapes", UiAction::DeleteSelected),
            Shortcut::new(Key::Backspace, false, false, "Delete selected shapes", UiAction::DeleteSelected),
            Shortcut::new(Key::Num1, false, true, "Zoom to slide", UiAction::FitToSlide),
            // Shift+1 arrives as `!` on most layouts
            Shortcut::new(Key::Exclamationmark, false, true, "Zoom to slide", UiAction::FitToSlide),
            Shortcut::new(Key::PageDown, false, false, "Next slide", UiAction::NextSlide),
            Shortcut::new(Key::PageUp, false, false, "Previous slide", UiAction::PreviousSlide),
        ]);
        shortcuts
    }

    /// Action for the first shortcut pressed this frame. Nothing fires while a
    /// text field has keyboard focus.
    pub fn poll(ctx: &Context) -> Option<UiAction> {
        if ctx.wants_keyboard_input() {
            return None;
        }
        Self::all()
            .into_iter()
            .find(|shortcut| ctx.input_mut(|i| i.consume_key(shortcut.modifiers(), shortcut.key)))
            .map(|shortcut| shortcut.action)
    }

    /// Print all shortcuts to the log.
    pub fn log_all() {
        for shortcut in Self::all() {
            log::info!("  {:20} {}", shortcut.format(), shortcut.description);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_press(key: Key, modifiers: Modifiers) -> egui::RawInput {
        egui::RawInput {
            modifiers,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers,
            }],
            ..Default::default()
        }
    }

    fn poll_once(input: egui::RawInput) -> Option<UiAction> {
        let ctx = egui::Context::default();
        let mut action = None;
        let _ = ctx.run(input, |ctx| {
            if let Some(fired) = ShortcutRegistry::poll(ctx) {
                action = Some(fired);
            }
        });
        action
    }

    #[test]
    fn test_format() {
        let redo = Shortcut::new(Key::Z, true, true, "Redo", UiAction::Redo);
        assert_eq!(redo.format(), "Ctrl+Shift+Z");
        let delete = Shortcut::new(Key::Delete, false, false, "Delete", UiAction::DeleteSelected);
        assert_eq!(delete.format(), "Delete");
    }

    #[test]
    fn test_every_tool_has_a_shortcut() {
        let shortcuts = ShortcutRegistry::all();
        for tool in ToolKind::ALL {
            assert!(
                shortcuts.iter().any(|s| s.action == UiAction::SetTool(tool)),
                "no shortcut for {:?}",
                tool
            );
        }
    }

    #[test]
    fn test_poll_distinguishes_undo_and_redo() {
        assert_eq!(poll_once(key_press(Key::Z, Modifiers::COMMAND)), Some(UiAction::Undo));
        assert_eq!(
            poll_once(key_press(Key::Z, Modifiers::COMMAND | Modifiers::SHIFT)),
            Some(UiAction::Redo)
        );
        assert_eq!(
            poll_once(key_press(Key::R, Modifiers::NONE)),
            Some(UiAction::SetTool(ToolKind::Rectangle))
        );
        assert_eq!(poll_once(egui::RawInput::default()), None);
    }

    #[test]
    fn test_shift_one_zooms_to_slide() {
        assert_eq!(
            poll_once(key_press(Key::Exclamationmark, Modifiers::SHIFT)),
            Some(UiAction::FitToSlide)
        );
        assert_eq!(
            poll_once(key_press(Key::Num1, Modifiers::SHIFT)),
            Some(UiAction::FitToSlide)
        );
        assert_eq!(poll_once(key_press(Key::Num1, Modifiers::NONE)), None);
    }
}
