//! Slide deck orchestration.
//!
//! [`Deck`] pairs every registry mutation with the matching page operation.
//! The registry's current slide drives the editor's current page, never the
//! other way round: switching pages through the editor directly leaves the
//! registry untouched.

use super::model::{DeckConfig, Slide, SlideSize, normalize_title};
use super::ops;
use super::registry::{MoveDirection, SlideRegistry};
use crate::canvas::PageId;
use crate::editor::{EditorResult, HostEditor};
use crate::shapes::ShapeId;

#[derive(Debug, Clone, Default)]
pub struct Deck {
    registry: SlideRegistry,
    config: DeckConfig,
    initialized: bool,
}

impl Deck {
    pub fn new(config: DeckConfig) -> Self {
        Self {
            registry: SlideRegistry::new(),
            config,
            initialized: false,
        }
    }

    pub fn registry(&self) -> &SlideRegistry {
        &self.registry
    }

    pub fn slides(&self) -> &[Slide] {
        self.registry.slides()
    }

    pub fn current(&self) -> Option<PageId> {
        self.registry.current()
    }

    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    pub fn slide_size(&self) -> SlideSize {
        self.config.slide_size()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Adopt the editor's current page as the first slide. Runs once.
    ///
    /// The page is renamed to the slide title and given its frame without
    /// recording undo steps.
    pub fn initialize<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> EditorResult<()> {
        if self.initialized {
            return Ok(());
        }
        let page_id = editor.current_page_id();
        let title = self.registry.next_title();
        let size = self.slide_size();
        let frame_id = untracked(editor, |editor| {
            ops::rename_slide_page(editor, page_id, &title)?;
            ops::ensure_frame(editor, page_id, size, &title)
        })?;
        ops::fit_to_frame_with(editor, self.config.zoom_options());

        self.registry.add(page_id, &title);
        self.registry.set_frame(page_id, frame_id);
        self.initialized = true;
        log::info!("Deck initialized on {}", page_id);
        Ok(())
    }

    /// Append a new slide titled "Slide {n}" and switch to it.
    pub fn add_slide<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> EditorResult<PageId> {
        self.transact(editor, |deck, editor| {
            let title = deck.registry.next_title();
            let created = ops::create_slide(editor, &title, deck.slide_size())?;
            deck.registry.add(created.page_id, &title);
            deck.registry.set_frame(created.page_id, created.frame_id);
            deck.sync(editor)?;
            Ok(created.page_id)
        })
    }

    pub fn select_slide<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        id: PageId,
    ) -> EditorResult<()> {
        self.transact(editor, |deck, editor| {
            deck.registry.select(id);
            deck.sync(editor)
        })
    }

    pub fn rename_slide<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        id: PageId,
        title: &str,
    ) -> EditorResult<()> {
        ops::rename_slide_page(editor, id, title)?;
        self.registry.rename(id, title);
        Ok(())
    }

    /// Copy a slide into a new slide right after it. Returns `None` when
    /// `id` is not a registered slide.
    pub fn duplicate_slide<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        id: PageId,
    ) -> EditorResult<Option<PageId>> {
        let Some(source) = self.registry.get(id) else {
            log::debug!("Cannot duplicate unknown slide {}", id);
            return Ok(None);
        };
        let title = SlideRegistry::copy_title(&source.title);
        self.transact(editor, |deck, editor| {
            let created = ops::duplicate_slide(editor, id, &title, deck.slide_size())?;
            deck.registry.duplicate(id, created.page_id, &title);
            deck.registry.set_frame(created.page_id, created.frame_id);
            deck.sync(editor)?;
            Ok(Some(created.page_id))
        })
    }

    /// Delete a slide and its page. The last slide cannot be deleted.
    pub fn delete_slide<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
        id: PageId,
    ) -> EditorResult<bool> {
        if !self.registry.can_delete() || self.registry.index_of(id).is_none() {
            log::debug!("Ignoring delete of slide {}", id);
            return Ok(false);
        }
        self.transact(editor, |deck, editor| {
            ops::delete_slide_page(editor, id)?;
            deck.registry.delete(id);
            deck.sync(editor)?;
            Ok(true)
        })
    }

    /// Reorder a slide. Pages are not touched.
    pub fn move_slide(&mut self, id: PageId, direction: MoveDirection) -> bool {
        self.registry.move_slide(id, direction)
    }

    /// Realign the registry with the editor's pages after the editor changed
    /// them on its own, e.g. through undo or redo.
    ///
    /// Slides whose pages are gone are dropped, pages without a slide are
    /// appended under their page names and titles follow the page names.
    /// If the current slide was dropped, the editor's current page becomes
    /// current. The current slide's frame is recreated when missing. None of
    /// this records undo steps, so redo stays available. Returns true when
    /// the registry changed.
    pub fn reconcile<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> EditorResult<bool> {
        let pages = editor.page_ids();
        let previous = self.registry.current();
        let dropped = self.registry.retain(|slide| pages.contains(&slide.id));

        let mut added = 0;
        let mut renamed = 0;
        for &page_id in &pages {
            let name = editor.page_name(page_id);
            if let Some(slide) = self.registry.get(page_id) {
                let stale = name
                    .as_deref()
                    .map(normalize_title)
                    .filter(|title| *title != slide.title);
                if let Some(title) = stale {
                    self.registry.rename(page_id, &title);
                    renamed += 1;
                }
                continue;
            }
            let title = name.unwrap_or_else(|| self.registry.next_title());
            self.registry.add(page_id, &title);
            added += 1;
        }

        let current = previous
            .filter(|id| self.registry.index_of(*id).is_some())
            .unwrap_or_else(|| editor.current_page_id());
        self.registry.select(current);

        let cached = self.registry.get(current).and_then(|slide| slide.frame_id);
        let frame_id = untracked(editor, |editor| self.ensure_current_frame(editor))?;
        let repaired = frame_id != cached;

        let changed = dropped + added + renamed > 0 || repaired;
        if changed {
            log::info!(
                "Reconciled slides with pages: {} dropped, {} added, {} renamed",
                dropped,
                added,
                renamed
            );
            if repaired {
                log::debug!("Repaired frame of slide {}", current);
            }
            ops::fit_to_frame_with(editor, self.config.zoom_options());
        }
        Ok(changed)
    }

    /// Point the editor at the current slide, ensure its frame and fit it.
    fn sync<E: HostEditor + ?Sized>(&mut self, editor: &mut E) -> EditorResult<()> {
        self.ensure_current_frame(editor)?;
        ops::fit_to_frame_with(editor, self.config.zoom_options());
        Ok(())
    }

    /// Point the editor at the current slide and ensure its locked frame.
    fn ensure_current_frame<E: HostEditor + ?Sized>(
        &mut self,
        editor: &mut E,
    ) -> EditorResult<Option<ShapeId>> {
        let Some(current) = self.registry.current() else {
            return Ok(None);
        };
        let title = self
            .registry
            .get(current)
            .map_or_else(|| super::FALLBACK_TITLE.to_string(), |s| s.title.clone());
        let frame_id = ops::ensure_frame(editor, current, self.slide_size(), &title)?;
        self.registry.set_frame(current, frame_id);
        Ok(Some(frame_id))
    }

    /// Run `f` inside one editor batch, so its edits form a single undo
    /// step. On error the batch is aborted and the registry restored, so
    /// neither side keeps a partial change.
    fn transact<E, T>(
        &mut self,
        editor: &mut E,
        f: impl FnOnce(&mut Self, &mut E) -> EditorResult<T>,
    ) -> EditorResult<T>
    where
        E: HostEditor + ?Sized,
    {
        let saved = self.registry.clone();
        editor.begin_batch();
        let result = f(self, editor);
        match &result {
            Ok(_) => editor.end_batch(),
            Err(err) => {
                log::warn!("Slide operation failed, rolling back: {}", err);
                editor.abort_batch();
                self.registry = saved;
            }
        }
        result
    }
}

/// Run `f` without recording undo steps.
fn untracked<E, T>(editor: &mut E, f: impl FnOnce(&mut E) -> EditorResult<T>) -> EditorResult<T>
where
    E: HostEditor + ?Sized,
{
    editor.pause_history();
    let result = f(editor);
    editor.resume_history();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::editor::EditorError;
    use crate::shapes::{Rectangle, Shape, ShapeProps};
    use kurbo::Point;

    fn setup() -> (Deck, Canvas) {
        let mut canvas = Canvas::new();
        let mut deck = Deck::new(DeckConfig::default());
        deck.initialize(&mut canvas).unwrap();
        (deck, canvas)
    }

    fn titles(deck: &Deck) -> Vec<&str> {
        deck.slides().iter().map(|s| s.title.as_str()).collect()
    }

    fn locked_frames(canvas: &Canvas) -> Vec<Shape> {
        canvas
            .current_page_shapes()
            .into_iter()
            .filter(|s| s.is_frame() && s.is_locked)
            .collect()
    }

    #[test]
    fn test_initialize_once() {
        let (mut deck, mut canvas) = setup();
        assert_eq!(titles(&deck), vec!["Slide 1"]);
        assert_eq!(deck.current(), Some(canvas.current_page_id()));
        assert!(deck.slides()[0].frame_id.is_some());

        deck.initialize(&mut canvas).unwrap();
        assert_eq!(deck.slides().len(), 1);
        assert_eq!(canvas.current_page_shapes().len(), 1);
    }

    #[test]
    fn test_add_and_duplicate_scenario() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;

        let second = deck.add_slide(&mut canvas).unwrap();
        assert_eq!(titles(&deck), vec!["Slide 1", "Slide 2"]);
        assert_eq!(deck.current(), Some(second));
        assert_eq!(canvas.current_page_id(), second);

        let copy = deck.duplicate_slide(&mut canvas, first).unwrap().unwrap();
        assert_eq!(titles(&deck), vec!["Slide 1", "Slide 1 Copy", "Slide 2"]);
        assert_eq!(deck.current(), Some(copy));
        assert_eq!(canvas.current_page_id(), copy);
        assert_eq!(canvas.current_page().name, "Slide 1 Copy");
    }

    #[test]
    fn test_duplicate_copies_content() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let frame_id = deck.slides()[0].frame_id;
        let rect = Shape::new(ShapeProps::Rectangle(Rectangle::new(10.0, 10.0)), Point::ZERO)
            .with_parent(frame_id);
        canvas.create_shape(rect).unwrap();

        let copy = deck.duplicate_slide(&mut canvas, first).unwrap().unwrap();
        let copy_frame = deck.registry().get(copy).unwrap().frame_id;
        let shapes = canvas.current_page_shapes();
        assert_eq!(shapes.len(), 2);
        assert!(shapes.iter().any(|s| !s.is_frame() && s.parent == copy_frame));
    }

    #[test]
    fn test_duplicate_unknown_slide() {
        let (mut deck, mut canvas) = setup();
        assert_eq!(deck.duplicate_slide(&mut canvas, PageId::new()), Ok(None));
        assert_eq!(deck.slides().len(), 1);
    }

    #[test]
    fn test_delete_last_slide_is_noop() {
        let (mut deck, mut canvas) = setup();
        let only = deck.slides()[0].id;
        assert_eq!(deck.delete_slide(&mut canvas, only), Ok(false));
        assert_eq!(canvas.page_ids(), vec![only]);
    }

    #[test]
    fn test_delete_moves_to_predecessor() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let second = deck.add_slide(&mut canvas).unwrap();
        let third = deck.add_slide(&mut canvas).unwrap();

        assert_eq!(deck.delete_slide(&mut canvas, second), Ok(true));
        assert_eq!(deck.current(), Some(first));
        assert_eq!(canvas.current_page_id(), first);
        assert_eq!(canvas.page_ids(), vec![first, third]);

        assert_eq!(deck.delete_slide(&mut canvas, first), Ok(true));
        assert_eq!(deck.current(), Some(third));
        assert_eq!(canvas.current_page_id(), third);
    }

    #[test]
    fn test_select_switches_page_and_fits() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        deck.add_slide(&mut canvas).unwrap();

        canvas.camera.zoom = 3.0;
        deck.select_slide(&mut canvas, first).unwrap();
        assert_eq!(canvas.current_page_id(), first);
        assert!((canvas.camera.zoom - 0.5).abs() < 1e-10);

        let unknown = PageId::new();
        assert_eq!(
            deck.select_slide(&mut canvas, unknown),
            Err(EditorError::PageNotFound(unknown))
        );
        assert_eq!(deck.current(), Some(first));
        assert_eq!(canvas.current_page_id(), first);
    }

    #[test]
    fn test_rename_slide() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        deck.rename_slide(&mut canvas, first, " Intro ").unwrap();
        assert_eq!(titles(&deck), vec!["Intro"]);
        assert_eq!(canvas.current_page().name, "Intro");

        let unknown = PageId::new();
        assert!(deck.rename_slide(&mut canvas, unknown, "X").is_err());
        assert_eq!(titles(&deck), vec!["Intro"]);
    }

    #[test]
    fn test_move_does_not_touch_editor() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let second = deck.add_slide(&mut canvas).unwrap();
        let pages = canvas.page_ids();

        assert!(deck.move_slide(second, MoveDirection::Up));
        assert_eq!(
            deck.slides().iter().map(|s| s.id).collect::<Vec<_>>(),
            vec![second, first]
        );
        assert_eq!(canvas.page_ids(), pages);
        assert!(!deck.move_slide(second, MoveDirection::Up));
    }

    #[test]
    fn test_add_slide_is_one_undo_step() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let depth = canvas.document.undo_depth();
        deck.add_slide(&mut canvas).unwrap();
        assert_eq!(canvas.document.undo_depth(), depth + 1);

        assert!(canvas.undo());
        assert_eq!(canvas.page_ids(), vec![first]);
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert_eq!(titles(&deck), vec!["Slide 1"]);
        assert_eq!(deck.current(), Some(first));
        assert_eq!(canvas.current_page_id(), first);
    }

    #[test]
    fn test_reconcile_restores_deleted_slide() {
        let (mut deck, mut canvas) = setup();
        let second = deck.add_slide(&mut canvas).unwrap();
        deck.rename_slide(&mut canvas, second, "Agenda").unwrap();
        assert_eq!(deck.delete_slide(&mut canvas, second), Ok(true));

        assert!(canvas.undo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert_eq!(titles(&deck), vec!["Slide 1", "Agenda"]);
        assert!(deck.registry().get(second).is_some());
        assert_eq!(deck.current(), Some(canvas.current_page_id()));

        assert_eq!(deck.reconcile(&mut canvas), Ok(false));
    }

    #[test]
    fn test_external_page_change_is_not_synced() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let second = deck.add_slide(&mut canvas).unwrap();
        canvas.set_current_page(first).unwrap();
        assert_eq!(deck.current(), Some(second));
    }

    #[test]
    fn test_initialize_records_no_undo_step() {
        let (mut deck, mut canvas) = setup();
        assert!(!canvas.document.can_undo());
        assert_eq!(canvas.current_page().name, "Slide 1");

        assert!(!canvas.undo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(false));
        assert_eq!(locked_frames(&canvas).len(), 1);
    }

    #[test]
    fn test_reconcile_recreates_missing_frame() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        let old_frame = deck.slides()[0].frame_id.unwrap();
        canvas.document.page_mut(first).unwrap().remove_shape(old_frame);
        assert!(canvas.current_page().is_empty());

        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        let frames = locked_frames(&canvas);
        assert_eq!(frames.len(), 1);
        assert_ne!(frames[0].id, old_frame);
        assert_eq!(deck.slides()[0].frame_id, Some(frames[0].id));
        assert!(!canvas.document.can_undo());
    }

    #[test]
    fn test_reconcile_keeps_redo_available() {
        let (mut deck, mut canvas) = setup();
        deck.add_slide(&mut canvas).unwrap();
        assert!(canvas.undo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert!(canvas.document.can_redo());

        assert!(canvas.redo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert_eq!(titles(&deck), vec!["Slide 1", "Slide 2"]);
    }

    #[test]
    fn test_reconcile_refreshes_titles_after_undo() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        deck.rename_slide(&mut canvas, first, "Intro").unwrap();
        assert_eq!(titles(&deck), vec!["Intro"]);

        assert!(canvas.undo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert_eq!(titles(&deck), vec!["Slide 1"]);

        assert!(canvas.redo());
        assert_eq!(deck.reconcile(&mut canvas), Ok(true));
        assert_eq!(titles(&deck), vec!["Intro"]);
    }

    #[test]
    fn test_failed_operation_leaves_no_page_behind() {
        let (mut deck, mut canvas) = setup();
        let first = deck.slides()[0].id;
        deck.add_slide(&mut canvas).unwrap();
        deck.select_slide(&mut canvas, first).unwrap();
        let pages = canvas.page_ids();
        let registry = deck.registry().clone();
        let depth = canvas.document.undo_depth();

        let missing = ShapeId::new();
        let result = deck.transact(&mut canvas, |deck, editor| {
            let created = ops::create_slide(editor, "Broken", deck.slide_size())?;
            deck.registry.add(created.page_id, "Broken");
            let orphan = Shape::new(ShapeProps::Rectangle(Rectangle::new(10.0, 10.0)), Point::ZERO)
                .with_parent(Some(missing));
            editor.create_shapes(vec![orphan])?;
            Ok(created.page_id)
        });

        assert_eq!(result, Err(EditorError::ShapeNotFound(missing)));
        assert_eq!(canvas.page_ids(), pages);
        assert_eq!(canvas.current_page_id(), first);
        assert_eq!(canvas.document.undo_depth(), depth);
        assert_eq!(deck.registry(), &registry);
        assert_eq!(deck.reconcile(&mut canvas), Ok(false));
    }
}
