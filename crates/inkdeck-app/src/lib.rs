//! InkDeck application shell.
//!
//! Window, GPU surface and egui integration around the slide deck and the
//! in-memory canvas editor.

mod app;
mod config;
mod preview;
mod shortcuts;
mod ui;

pub use app::{App, AppError};
pub use config::{load_deck_config, AppConfig, ConfigError, CONFIG_ENV};
pub use shortcuts::{Shortcut, ShortcutRegistry};
pub use ui::{render_ui, RenameDraft, UiAction, UiProps, UiState};
