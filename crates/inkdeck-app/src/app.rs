//! Core application state and lifecycle.

use std::sync::Arc;
use std::time::{Duration, Instant};

use inkdeck_core::slides::fit_to_frame_with;
use inkdeck_core::style::{apply_opacity, apply_style};
use inkdeck_core::{
    Canvas, Deck, DeckConfig, EditorResult, HostEditor, PageId, StylePanelState, ToolKind,
};
use kurbo::{Point, Vec2};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use crate::config::{load_deck_config, AppConfig};
use crate::preview;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{render_ui, UiAction, UiProps, UiState};

/// Errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface is not supported by the adapter")]
    UnsupportedSurface,
}

/// Surface and device for the window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>) -> Result<Self, AppError> {
        let size = window.inner_size();
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("inkdeck-device"),
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, size.width.max(1), size.height.max(1))
            .ok_or(AppError::UnsupportedSurface)?;
        // egui blends in gamma space and expects a linear target format.
        let caps = surface.get_capabilities(&adapter);
        if let Some(format) = caps.formats.iter().copied().find(|format| !format.is_srgb()) {
            config.format = format;
        }
        surface.configure(&device, &config);

        log::info!(
            "GPU initialized: {} ({:?}), surface {:?} {}x{}",
            adapter.get_info().name,
            adapter.get_info().backend,
            config.format,
            config.width,
            config.height
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Runtime state for the application.
struct AppState {
    window: Arc<Window>,
    gpu: Gpu,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Editor
    canvas: Canvas,
    deck: Deck,

    /// Cursor position in logical points.
    cursor: Point,
    modifiers: ModifiersState,
    background: wgpu::Color,
    last_frame: Instant,
    /// When egui asked for its next frame. Editor changes request frames
    /// through a canvas listener instead.
    next_frame: Option<Instant>,
}

impl AppState {
    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    /// Match the canvas viewport to the window, in logical points. Refits the
    /// current slide when the size changed.
    fn update_viewport(&mut self) {
        let size = self
            .window
            .inner_size()
            .to_logical::<f64>(self.scale_factor());
        if size.width <= 0.0 || size.height <= 0.0 {
            return;
        }
        let previous = self.canvas.viewport_size;
        self.canvas.set_viewport_size(size.width, size.height);
        if (previous.width - size.width).abs() > f64::EPSILON
            || (previous.height - size.height).abs() > f64::EPSILON
        {
            let options = self.deck.config().zoom_options().immediate(true);
            fit_to_frame_with(&mut self.canvas, options);
        }
    }

    fn set_cursor(&mut self, position: PhysicalPosition<f64>) {
        let logical = position.to_logical::<f64>(self.scale_factor());
        self.cursor = Point::new(logical.x, logical.y);
    }

    /// Left click on the canvas: pick a shape or place one with the active tool.
    fn handle_primary_press(&mut self) {
        let point = self.canvas.camera.screen_to_world(self.cursor);
        if self.canvas.tool() == ToolKind::Select {
            self.canvas.select_at_point(point);
        } else if let Err(e) = self.canvas.create_shape_from_tool(point) {
            log::warn!("Failed to create shape: {}", e);
        }
        self.canvas.set_changing_style(false);
    }

    fn handle_wheel(&mut self, delta: MouseScrollDelta) {
        let scroll = match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x as f64 * 20.0, y as f64 * 20.0),
            MouseScrollDelta::PixelDelta(pos) => {
                let logical = pos.to_logical::<f64>(self.scale_factor());
                Vec2::new(logical.x, logical.y)
            }
        };

        if self.modifiers.control_key() || self.modifiers.super_key() {
            let zoom_factor = if scroll.y > 0.0 { 1.1 } else { 0.9 };
            self.canvas.camera.zoom_at(self.cursor, zoom_factor);
        } else {
            self.canvas.camera.pan(scroll);
        }
    }

    fn apply_action(&mut self, action: UiAction) {
        log::debug!("UI action: {:?}", action);
        let canvas = &mut self.canvas;
        let deck = &mut self.deck;

        let result: EditorResult<()> = match action {
            UiAction::AddSlide => deck.add_slide(canvas).map(|_| ()),
            UiAction::SelectSlide(id) => deck.select_slide(canvas, id),
            UiAction::RenameSlide(id, title) => deck.rename_slide(canvas, id, &title),
            UiAction::DuplicateSlide(id) => deck.duplicate_slide(canvas, id).map(|_| ()),
            UiAction::DeleteSlide(id) => deck.delete_slide(canvas, id).map(|_| ()),
            UiAction::MoveSlide(id, direction) => {
                deck.move_slide(id, direction);
                Ok(())
            }
            UiAction::SetStyle(value) => {
                apply_style(canvas, value);
                Ok(())
            }
            UiAction::SetOpacity(opacity) => {
                apply_opacity(canvas, opacity);
                Ok(())
            }
            UiAction::SetTool(tool) => {
                canvas.set_tool(tool);
                Ok(())
            }
            UiAction::Undo => {
                if canvas.undo() {
                    deck.reconcile(canvas).map(|_| ())
                } else {
                    Ok(())
                }
            }
            UiAction::Redo => {
                if canvas.redo() {
                    deck.reconcile(canvas).map(|_| ())
                } else {
                    Ok(())
                }
            }
            UiAction::DeleteSelected => {
                canvas.delete_selected();
                Ok(())
            }
            UiAction::FitToSlide => {
                fit_to_frame_with(canvas, deck.config().zoom_options());
                Ok(())
            }
            UiAction::NextSlide => match neighbor_slide(deck, 1) {
                Some(id) => deck.select_slide(canvas, id),
                None => Ok(()),
            },
            UiAction::PreviousSlide => match neighbor_slide(deck, -1) {
                Some(id) => deck.select_slide(canvas, id),
                None => Ok(()),
            },
        };

        if let Err(e) = result {
            log::warn!("Action failed: {}", e);
        }
    }

    fn redraw(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f64();
        self.last_frame = now;
        let animating = self.canvas.tick(dt);

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let panel = StylePanelState::derive(&self.canvas);
        let selection = self.canvas.selected_shape_ids();
        let props = UiProps {
            slides: self.deck.slides(),
            current: self.deck.current(),
            panel: &panel,
            tool: self.canvas.tool(),
            can_undo: self.canvas.document.can_undo(),
            can_redo: self.canvas.document.can_redo(),
        };

        let mut ui_action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            preview::paint_page(
                &painter,
                self.canvas.current_page(),
                &self.canvas.camera,
                &selection,
            );
            if let Some(action) = render_ui(ctx, &mut self.ui_state, &props) {
                ui_action = Some(action);
            }
        });
        let repaint_delay = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .map_or(Duration::MAX, |viewport| viewport.repaint_delay);
        if let Some(action) = ui_action {
            self.apply_action(action);
            self.window.request_redraw();
        }

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                self.window.request_redraw();
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        for (id, image_delta) in &egui_output.textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point: egui_output.pixels_per_point,
        };

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui encoder"),
        });
        let user_buffers = self.egui_renderer.update_buffers(
            device,
            queue,
            &mut encoder,
            &egui_primitives,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.background),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            // egui-wgpu needs a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, &egui_primitives, &screen_descriptor);
        }

        queue.submit(user_buffers.into_iter().chain(std::iter::once(encoder.finish())));

        for id in &egui_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();

        self.next_frame = next_frame(now, animating, repaint_delay);
        if self.next_frame.is_some_and(|at| at <= now) {
            self.next_frame = None;
            self.window.request_redraw();
        }
        Ok(())
    }
}

/// When to draw again after a frame drawn at `now`. `None` waits for the
/// next event.
fn next_frame(now: Instant, animating: bool, repaint_delay: Duration) -> Option<Instant> {
    if animating || repaint_delay.is_zero() {
        return Some(now);
    }
    now.checked_add(repaint_delay)
}

/// The slide `offset` positions away from the current one, if any.
fn neighbor_slide(deck: &Deck, offset: isize) -> Option<PageId> {
    let index = deck.registry().current_index()?;
    let target = index.checked_add_signed(offset)?;
    deck.slides().get(target).map(|slide| slide.id)
}

fn clear_color(color: peniko::Color) -> wgpu::Color {
    let [r, g, b, a] = color.components;
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: f64::from(a),
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    deck_config: DeckConfig,
    state: Option<AppState>,
    /// First fatal error, reported when the event loop exits.
    error: Option<AppError>,
}

impl App {
    pub fn new(config: AppConfig, deck_config: DeckConfig) -> Self {
        Self {
            config,
            deck_config,
            state: None,
            error: None,
        }
    }

    /// Run the application until the window closes.
    pub fn run() -> Result<(), AppError> {
        let deck_config = load_deck_config().unwrap_or_else(|e| {
            log::warn!("{}; using default deck settings", e);
            DeckConfig::default()
        });

        let event_loop = EventLoop::new()?;
        let mut app = App::new(AppConfig::default(), deck_config);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<AppState, AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = pollster::block_on(Gpu::new(window.clone()))?;

        let egui_ctx = egui::Context::default();
        egui_ctx.set_visuals(egui::Visuals::light());
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let mut state = AppState {
            window: window.clone(),
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            canvas: Canvas::new(),
            deck: Deck::new(self.deck_config.clone()),
            cursor: Point::ZERO,
            modifiers: ModifiersState::empty(),
            background: clear_color(self.config.background_color),
            last_frame: Instant::now(),
            next_frame: None,
        };
        state.update_viewport();
        let redraw_window = window.clone();
        state
            .canvas
            .listen(Box::new(move || redraw_window.request_redraw()));
        if let Err(e) = state.deck.initialize(&mut state.canvas) {
            log::error!("Failed to initialize slides: {}", e);
        }

        log::info!(
            "InkDeck initialized - {} slide(s), viewport {}x{}",
            state.deck.slides().len(),
            state.canvas.viewport_size.width,
            state.canvas.viewport_size.height
        );
        log::info!("Keyboard shortcuts:");
        ShortcutRegistry::log_all();

        window.request_redraw();
        Ok(state)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() {
            return;
        }
        log::info!("Creating window...");
        match self.init(event_loop) {
            Ok(state) => self.state = Some(state),
            Err(e) => {
                log::error!("Startup failed: {}", e);
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }
        let egui_wants_input = egui_response.consumed
            || state.egui_ctx.is_pointer_over_area()
            || state.egui_ctx.wants_pointer_input()
            || state.egui_ctx.wants_keyboard_input();

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.update_viewport();
                state.window.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                state.update_viewport();
                state.window.request_redraw();
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                state.modifiers = modifiers.state();
            }

            WindowEvent::CursorMoved { position, .. } => {
                state.set_cursor(position);
            }

            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if !egui_wants_input {
                    state.handle_primary_press();
                    state.window.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if !egui_wants_input {
                    state.handle_wheel(delta);
                    state.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => match state.redraw() {
                Ok(()) => {}
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of GPU memory, exiting");
                    event_loop.exit();
                }
                Err(e) => log::warn!("Skipped frame: {}", e),
            },

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(state) = &mut self.state else {
            return;
        };
        match state.next_frame {
            Some(at) if at <= Instant::now() => {
                state.next_frame = None;
                state.window.request_redraw();
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            Some(at) => event_loop.set_control_flow(ControlFlow::WaitUntil(at)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}
