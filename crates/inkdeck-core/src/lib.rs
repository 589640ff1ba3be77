//! InkDeck Core Library
//!
//! Platform-agnostic slide deck logic layered on a multi-page canvas editor.

pub mod camera;
pub mod canvas;
pub mod editor;
pub mod shapes;
pub mod slides;
pub mod style;
pub mod tools;

pub use camera::{Camera, ZoomOptions};
pub use canvas::{Canvas, CanvasDocument, Page, PageId};
pub use editor::{EditorError, EditorResult, HostEditor, ListenerId};
pub use slides::{Deck, DeckConfig, MoveDirection, Slide, SlideRegistry, SlideSize};
pub use style::{SharedStyle, SharedStyles, StylePanelState};
pub use tools::ToolKind;
