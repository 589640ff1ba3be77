//! UI components using egui.

use egui::{Align, Align2, Context, Id, Key, Layout, RichText, TextEdit, Ui, Vec2};
use inkdeck_core::shapes::{StyleKey, StyleValue};
use inkdeck_core::style::{SharedStyle, MIXED_LABEL, STYLE_COLOR_OPTIONS};
use inkdeck_core::{MoveDirection, PageId, Slide, StylePanelState, ToolKind};
use inkdeck_widgets::{
    menu_item_enabled, menu_separator, panel_frame, section_label, separator, sidebar_header,
    sizing, theme, toolbar_frame, vertical_separator, ColorPicker, GlyphButton, HexInputState,
    OpacitySlider, StyleSelect, TextButton, ToggleButton,
};

use crate::shortcuts::ShortcutRegistry;

/// Actions that can be triggered from the UI.
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    AddSlide,
    SelectSlide(PageId),
    RenameSlide(PageId, String),
    DuplicateSlide(PageId),
    DeleteSlide(PageId),
    MoveSlide(PageId, MoveDirection),
    /// Apply a style value to the selection and to the next shapes.
    SetStyle(StyleValue),
    SetOpacity(f64),
    SetTool(ToolKind),
    Undo,
    Redo,
    DeleteSelected,
    /// Zoom the camera to the current slide's frame.
    FitToSlide,
    NextSlide,
    PreviousSlide,
}

/// In-progress rename of a slide title.
#[derive(Debug, Clone, PartialEq)]
pub struct RenameDraft {
    pub id: PageId,
    pub text: String,
    /// Focus the text field on the next frame.
    pub focus_pending: bool,
}

impl RenameDraft {
    pub fn new(slide: &Slide) -> Self {
        Self {
            id: slide.id,
            text: slide.title.clone(),
            focus_pending: true,
        }
    }

    /// Rename action for the typed text, `None` if the title is unchanged.
    pub fn commit(self, current_title: &str) -> Option<UiAction> {
        (self.text.trim() != current_title).then(|| UiAction::RenameSlide(self.id, self.text))
    }
}

/// UI state that outlives a single frame.
#[derive(Debug, Default)]
pub struct UiState {
    pub rename: Option<RenameDraft>,
    pub hex_input: HexInputState,
}

/// Read-only data the UI renders each frame.
pub struct UiProps<'a> {
    pub slides: &'a [Slide],
    pub current: Option<PageId>,
    pub panel: &'a StylePanelState,
    pub tool: ToolKind,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl UiProps<'_> {
    fn current_index(&self) -> Option<usize> {
        let current = self.current?;
        self.slides.iter().position(|slide| slide.id == current)
    }
}

/// Which per-slide controls are enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideControls {
    pub move_up: bool,
    pub move_down: bool,
    pub delete: bool,
}

impl SlideControls {
    pub fn for_slide(index: usize, len: usize) -> Self {
        Self {
            move_up: index > 0,
            move_down: index + 1 < len,
            delete: len > 1,
        }
    }
}

/// Render the UI and return any triggered action.
pub fn render_ui(ctx: &Context, ui_state: &mut UiState, props: &UiProps) -> Option<UiAction> {
    let shortcut_action = ShortcutRegistry::poll(ctx);
    let toolbar_action = render_toolbar(ctx, props);
    let slides_action = render_slides_panel(ctx, ui_state, props);
    let properties_action = render_properties_panel(ctx, ui_state, props);

    toolbar_action
        .or(slides_action)
        .or(properties_action)
        .or(shortcut_action)
}

fn render_toolbar(ctx: &Context, props: &UiProps) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(Id::new("toolbar"))
        .anchor(Align2::CENTER_TOP, Vec2::new(0.0, 12.0))
        .show(ctx, |ui| {
            toolbar_frame().show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing = Vec2::new(2.0, 0.0);

                    for tool in ToolKind::ALL {
                        let tooltip = format!("{} ({})", tool.label(), tool.shortcut());
                        if ToggleButton::new(tool.label(), props.tool == tool)
                            .tooltip(&tooltip)
                            .show(ui)
                        {
                            action = Some(UiAction::SetTool(tool));
                        }
                    }

                    vertical_separator(ui);

                    if TextButton::new("Undo").enabled(props.can_undo).show(ui) {
                        action = Some(UiAction::Undo);
                    }
                    if TextButton::new("Redo").enabled(props.can_redo).show(ui) {
                        action = Some(UiAction::Redo);
                    }
                    if TextButton::new("Fit").enabled(props.current.is_some()).show(ui) {
                        action = Some(UiAction::FitToSlide);
                    }
                });
            });
        });

    action
}

fn render_slides_panel(ctx: &Context, ui_state: &mut UiState, props: &UiProps) -> Option<UiAction> {
    let mut action = None;

    egui::Area::new(Id::new("slides_panel"))
        .anchor(Align2::LEFT_TOP, Vec2::new(12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(sizing::SIDEBAR_WIDTH);

                ui.horizontal(|ui| {
                    sidebar_header(ui, "Slides", None);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if TextButton::new("+ Add").show(ui) {
                            action = Some(UiAction::AddSlide);
                        }
                    });
                });
                separator(ui);

                let len = props.slides.len();
                for (index, slide) in props.slides.iter().enumerate() {
                    let is_current = props.current == Some(slide.id);
                    let controls = SlideControls::for_slide(index, len);
                    if let Some(row_action) =
                        slide_row(ui, ui_state, slide, index, is_current, controls)
                    {
                        action = Some(row_action);
                    }
                }

                separator(ui);
                match props.current_index() {
                    Some(index) => section_label(ui, &format!("Selected: Slide {}", index + 1)),
                    None => section_label(ui, "No slide selected"),
                }
            });
        });

    action
}

fn slide_row(
    ui: &mut Ui,
    ui_state: &mut UiState,
    slide: &Slide,
    index: usize,
    is_current: bool,
    controls: SlideControls,
) -> Option<UiAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{:>2}", index + 1))
                .size(11.0)
                .color(theme::TEXT_MUTED),
        );

        let renaming = ui_state.rename.as_ref().is_some_and(|draft| draft.id == slide.id);
        if renaming {
            action = rename_field(ui, ui_state, slide);
            return;
        }

        let response = ui.selectable_label(is_current, &slide.title);
        if response.double_clicked() {
            ui_state.rename = Some(RenameDraft::new(slide));
        } else if response.clicked() && !is_current {
            action = Some(UiAction::SelectSlide(slide.id));
        }
        response.context_menu(|ui| {
            if menu_item_enabled(ui, "Rename", "", true) {
                ui_state.rename = Some(RenameDraft::new(slide));
            }
            if menu_item_enabled(ui, "Duplicate", "", true) {
                action = Some(UiAction::DuplicateSlide(slide.id));
            }
            menu_separator(ui);
            if menu_item_enabled(ui, "Move up", "", controls.move_up) {
                action = Some(UiAction::MoveSlide(slide.id, MoveDirection::Up));
            }
            if menu_item_enabled(ui, "Move down", "", controls.move_down) {
                action = Some(UiAction::MoveSlide(slide.id, MoveDirection::Down));
            }
            menu_separator(ui);
            if menu_item_enabled(ui, "Delete", "", controls.delete) {
                action = Some(UiAction::DeleteSlide(slide.id));
            }
        });

        ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
            ui.spacing_mut().item_spacing = Vec2::new(2.0, 0.0);
            if GlyphButton::new("✕", "Delete slide").enabled(controls.delete).show(ui) {
                action = Some(UiAction::DeleteSlide(slide.id));
            }
            if GlyphButton::new("⧉", "Duplicate slide").show(ui) {
                action = Some(UiAction::DuplicateSlide(slide.id));
            }
            if GlyphButton::new("↓", "Move down").enabled(controls.move_down).show(ui) {
                action = Some(UiAction::MoveSlide(slide.id, MoveDirection::Down));
            }
            if GlyphButton::new("↑", "Move up").enabled(controls.move_up).show(ui) {
                action = Some(UiAction::MoveSlide(slide.id, MoveDirection::Up));
            }
        });
    });

    action
}

/// Inline title editor. Enter or focus loss commits, Escape cancels.
fn rename_field(ui: &mut Ui, ui_state: &mut UiState, slide: &Slide) -> Option<UiAction> {
    let draft = ui_state.rename.as_mut()?;
    let response = ui.add(TextEdit::singleline(&mut draft.text).desired_width(140.0));
    if draft.focus_pending {
        response.request_focus();
        draft.focus_pending = false;
    }
    if !response.lost_focus() {
        return None;
    }

    let draft = ui_state.rename.take()?;
    if ui.input(|i| i.key_pressed(Key::Escape)) {
        return None;
    }
    draft.commit(&slide.title)
}

fn render_properties_panel(
    ctx: &Context,
    ui_state: &mut UiState,
    props: &UiProps,
) -> Option<UiAction> {
    let mut action = None;
    let panel = props.panel;

    egui::Area::new(Id::new("properties_panel"))
        .anchor(Align2::RIGHT_TOP, Vec2::new(-12.0, 12.0))
        .show(ctx, |ui| {
            panel_frame().show(ui, |ui| {
                ui.set_width(sizing::SIDEBAR_WIDTH);
                sidebar_header(ui, "Properties", Some(&panel.header_text()));
                separator(ui);

                for key in StyleKey::ALL {
                    let Some(shared) = panel.style(key) else {
                        continue;
                    };
                    if let Some(value) = style_control(ui, ui_state, key, shared) {
                        action = Some(UiAction::SetStyle(value));
                    }
                    ui.add_space(6.0);
                }
                if !panel.has_visible_styles() {
                    section_label(ui, "Nothing to style");
                    ui.add_space(6.0);
                }

                if let Some(opacity) = OpacitySlider::new("Opacity", panel.opacity).show(ui) {
                    action = Some(UiAction::SetOpacity(opacity));
                }
            });
        });

    action
}

fn style_control(
    ui: &mut Ui,
    ui_state: &mut UiState,
    key: StyleKey,
    shared: SharedStyle<StyleValue>,
) -> Option<StyleValue> {
    match key {
        StyleKey::Color => {
            let value = match shared {
                SharedStyle::Shared(StyleValue::Color(color)) => Some(color),
                _ => None,
            };
            ColorPicker::new(key.label(), &STYLE_COLOR_OPTIONS)
                .value(value)
                .status_text(shared.is_mixed().then_some(MIXED_LABEL))
                .show(ui, &mut ui_state.hex_input)
                .map(StyleValue::Color)
        }
        _ => {
            let options = key.options();
            StyleSelect::new(key.label(), shared, &options, StyleValue::name)
                .width(sizing::SIDEBAR_WIDTH)
                .show(ui)
        }
    }
}
