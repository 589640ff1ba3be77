//! Slides: an ordered deck of editor pages, each bounded by a locked frame.

mod deck;
mod model;
mod ops;
mod registry;

pub use deck::Deck;
pub use model::{
    normalize_title, AspectRatio, DeckConfig, Slide, SlideSize, DEFAULT_ASPECT_RATIO,
    FALLBACK_TITLE, SLIDE_SIZES,
};
pub use ops::{
    create_slide, delete_slide_page, duplicate_slide, ensure_frame, fit_to_frame,
    fit_to_frame_with, rename_slide_page, slide_frame, SlideCreateResult,
};
pub use registry::{MoveDirection, SlideRegistry};
