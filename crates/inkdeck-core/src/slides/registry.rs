//! Ordered slide list with a current-slide pointer.
//!
//! The registry is pure state: it never talks to the editor. Guarded
//! operations (deleting the last slide, moving past either end) are no-ops.

use super::model::{normalize_title, Slide};
use crate::canvas::PageId;
use crate::shapes::ShapeId;

/// Direction for [`SlideRegistry::move_slide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlideRegistry {
    slides: Vec<Slide>,
    current: Option<PageId>,
}

impl SlideRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, id: PageId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id == id)
    }

    pub fn index_of(&self, id: PageId) -> Option<usize> {
        self.slides.iter().position(|s| s.id == id)
    }

    pub fn current(&self) -> Option<PageId> {
        self.current
    }

    pub fn current_slide(&self) -> Option<&Slide> {
        self.current.and_then(|id| self.get(id))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current.and_then(|id| self.index_of(id))
    }

    /// Title for the next appended slide.
    pub fn next_title(&self) -> String {
        format!("Slide {}", self.slides.len() + 1)
    }

    /// Title for a copy of a slide.
    pub fn copy_title(title: &str) -> String {
        format!("{title} Copy")
    }

    /// Append a slide and make it current. Returns its index.
    ///
    /// An id that is already registered is made current without adding.
    pub fn add(&mut self, id: PageId, title: &str) -> usize {
        if let Some(index) = self.index_of(id) {
            log::warn!("Slide {} is already registered", id);
            self.current = Some(id);
            return index;
        }
        self.slides.push(Slide::new(id, title));
        self.current = Some(id);
        self.slides.len() - 1
    }

    pub fn rename(&mut self, id: PageId, title: &str) {
        if let Some(slide) = self.slides.iter_mut().find(|s| s.id == id) {
            slide.title = normalize_title(title);
        }
    }

    /// Insert a new slide right after `id` and make it current.
    /// Returns the new slide's index, or `None` if `id` is unknown.
    pub fn duplicate(&mut self, id: PageId, new_id: PageId, new_title: &str) -> Option<usize> {
        let index = self.index_of(id)?;
        if self.index_of(new_id).is_some() {
            log::warn!("Slide {} is already registered", new_id);
            return None;
        }
        self.slides.insert(index + 1, Slide::new(new_id, new_title));
        self.current = Some(new_id);
        Some(index + 1)
    }

    pub fn can_delete(&self) -> bool {
        self.slides.len() > 1
    }

    /// Remove a slide. The predecessor becomes current, else the successor.
    /// Returns false when the delete was rejected.
    pub fn delete(&mut self, id: PageId) -> bool {
        if !self.can_delete() {
            log::debug!("Refusing to delete the only slide");
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.slides.remove(index);
        let next = if index > 0 {
            self.slides.get(index - 1)
        } else {
            self.slides.get(index)
        };
        self.current = next.map(|s| s.id);
        true
    }

    pub fn can_move(&self, id: PageId, direction: MoveDirection) -> bool {
        match (self.index_of(id), direction) {
            (Some(index), MoveDirection::Up) => index > 0,
            (Some(index), MoveDirection::Down) => index + 1 < self.slides.len(),
            (None, _) => false,
        }
    }

    /// Swap a slide with its neighbour. Returns false at either end.
    pub fn move_slide(&mut self, id: PageId, direction: MoveDirection) -> bool {
        if !self.can_move(id, direction) {
            log::debug!("Cannot move slide {} {:?}", id, direction);
            return false;
        }
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let target = match direction {
            MoveDirection::Up => index - 1,
            MoveDirection::Down => index + 1,
        };
        self.slides.swap(index, target);
        true
    }

    /// Keep only the slides `keep` accepts. Returns how many were dropped.
    /// The current pointer is cleared when its slide is dropped.
    pub fn retain(&mut self, mut keep: impl FnMut(&Slide) -> bool) -> usize {
        let before = self.slides.len();
        self.slides.retain(|slide| keep(slide));
        if let Some(current) = self.current {
            if self.index_of(current).is_none() {
                self.current = None;
            }
        }
        before - self.slides.len()
    }

    /// Point at a slide. Membership is not checked.
    pub fn select(&mut self, id: PageId) {
        self.current = Some(id);
    }

    pub fn set_frame(&mut self, id: PageId, frame_id: ShapeId) {
        if let Some(slide) = self.slides.iter_mut().find(|s| s.id == id) {
            slide.frame_id = Some(frame_id);
        }
    }
}
