//! Core application state and lifecycle.

use std::sync::Arc;

use mathpane_core::{
    copy_text, export_to_file, Command, ExportConfig, ExportOutcome, Keymap, RenderConfig, RenderSurface,
    ShortcutError, TypesetError,
};
use mathpane_render::{FontOptions, TypstTypesetter};
use thiserror::Error;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use crate::diagnostics;
use crate::platform::SystemClipboard;
use crate::shortcuts;
use crate::ui::{render_ui, store_caret, UiAction, UiState, UiView};

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("Failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("No suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("Failed to create GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("The surface is not supported by the GPU adapter")]
    UnsupportedSurface,
    #[error("Typesetter initialisation failed: {0}")]
    Typesetter(#[from] TypesetError),
    #[error("Invalid keymap: {0}")]
    Keymap(#[from] ShortcutError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Initial figure size in pixels, before the layout settles.
    pub figure_size: (u32, u32),
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub fonts: FontOptions,
    pub keymap: Keymap,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "MathPane Equation Renderer".to_string(),
            width: 800,
            height: 275,
            figure_size: (500, 200),
            render: RenderConfig::default(),
            export: ExportConfig::default(),
            fonts: FontOptions::default(),
            keymap: Keymap::default(),
        }
    }
}

/// Surface, device and queue for the window.
struct Gpu {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl Gpu {
    async fn new(window: Arc<Window>, width: u32, height: u32) -> Result<Self, AppError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await?;
        diagnostics::log_adapter(&adapter.get_info());

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("mathpane device"),
                ..Default::default()
            })
            .await?;

        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(AppError::UnsupportedSurface)?;
        // egui-wgpu writes gamma-space colors; prefer a non-sRGB target.
        if let Some(format) = surface
            .get_capabilities(&adapter)
            .formats
            .into_iter()
            .find(|format| !format.is_srgb())
        {
            config.format = format;
        }
        config.present_mode = wgpu::PresentMode::AutoVsync;
        surface.configure(&device, &config);

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
}

/// Runtime state for the application.
struct AppState {
    // Windowing
    window: Arc<Window>,
    gpu: Gpu,

    // egui
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
    ui_state: UiState,

    // Equation
    equation: RenderSurface<TypstTypesetter>,
    figure_texture: Option<egui::TextureHandle>,
    figure_generation: Option<u64>,

    keymap: Keymap,
    export: ExportConfig,
    quit_requested: bool,
}

impl AppState {
    /// Re-upload the figure raster when the surface redrew it.
    fn sync_figure_texture(&mut self) {
        let generation = self.equation.generation();
        if self.figure_generation == Some(generation) && self.figure_texture.is_some() {
            return;
        }
        let raster = self.equation.raster();
        let image = egui::ColorImage::from_rgba_unmultiplied(
            [raster.width() as usize, raster.height() as usize],
            raster.as_raw(),
        );
        match &mut self.figure_texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.figure_texture = Some(self.egui_ctx.load_texture("figure", image, egui::TextureOptions::NEAREST));
            }
        }
        self.figure_generation = Some(generation);
    }

    fn update_source(&mut self) {
        match self.equation.set_source(self.ui_state.field.text()) {
            Ok(state) => log::trace!("Equation state: {:?}", state),
            Err(e) => log::error!("Failed to render equation: {}", e),
        }
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::Quit => self.quit_requested = true,
            Command::CopyEquation => {
                copy_text(SystemClipboard::open, self.ui_state.field.text());
            }
            Command::SaveEquation => match export_to_file(&self.equation, &self.export) {
                Ok(ExportOutcome::Written { path, cropped }) => {
                    log::debug!("Export finished: {} (cropped: {})", path.display(), cropped);
                }
                Ok(ExportOutcome::Refused) => {}
                Err(e) => log::error!("Failed to export equation: {}", e),
            },
            Command::Insert(_) => {
                if let Some(text) = self.keymap.insertion(command) {
                    self.ui_state.field.insert_at_caret(text);
                    store_caret(&self.egui_ctx, &self.ui_state.field);
                    self.ui_state.focus_input = true;
                    self.update_source();
                }
            }
        }
    }

    /// Run one egui frame, apply what it asked for and present it.
    fn redraw(&mut self) {
        let figure_px = self.ui_state.figure_px;
        if figure_px != [0, 0] {
            match self.equation.resize(figure_px[0], figure_px[1]) {
                Ok(true) => log::trace!("Figure resized to {}x{}", figure_px[0], figure_px[1]),
                Ok(false) => {}
                Err(e) => log::error!("Failed to redraw resized figure: {}", e),
            }
        }
        self.sync_figure_texture();

        let egui_input = self.egui_state.take_egui_input(&self.window);
        let mut commands = Vec::new();
        let mut ui_action = None;
        let egui_output = self.egui_ctx.run(egui_input, |ctx| {
            // Accelerators first, so bound keys never reach the input field.
            commands.extend(shortcuts::take_commands(ctx, &self.keymap));
            let view = UiView {
                keymap: &self.keymap,
                figure: self.figure_texture.as_ref(),
                render_state: self.equation.state(),
            };
            ui_action = render_ui(ctx, &mut self.ui_state, &view);
        });

        self.egui_state
            .handle_platform_output(&self.window, egui_output.platform_output);
        let egui_primitives = self
            .egui_ctx
            .tessellate(egui_output.shapes, egui_output.pixels_per_point);

        match ui_action {
            Some(UiAction::SourceEdited) => self.update_source(),
            Some(UiAction::Run(command)) => commands.push(command),
            None => {}
        }
        let changed = !commands.is_empty() || ui_action.is_some();
        for command in commands {
            self.execute(command);
        }

        self.present(&egui_primitives, &egui_output.textures_delta, egui_output.pixels_per_point);

        let repaint_now = egui_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());
        let figure_stale = self.ui_state.figure_px != [0, 0]
            && self.equation.figure().pixel_size() != (self.ui_state.figure_px[0], self.ui_state.figure_px[1]);
        if changed || repaint_now || figure_stale {
            self.window.request_redraw();
        }
    }

    fn present(
        &mut self,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        pixels_per_point: f32,
    ) {
        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(e) => {
                log::warn!("Failed to get surface texture: {:?}", e);
                let (width, height) = (self.gpu.config.width, self.gpu.config.height);
                self.gpu.resize(width, height);
                self.window.request_redraw();
                return;
            }
        };
        let surface_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        // Update egui textures
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer.update_texture(device, queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.gpu.config.width, self.gpu.config.height],
            pixels_per_point,
        };

        {
            let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui encoder"),
            });

            self.egui_renderer
                .update_buffers(device, queue, &mut encoder, primitives, &screen_descriptor);

            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui render pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // egui-wgpu wants a 'static render pass
            let mut render_pass = render_pass.forget_lifetime();
            self.egui_renderer
                .render(&mut render_pass, primitives, &screen_descriptor);
            drop(render_pass);

            queue.submit(std::iter::once(encoder.finish()));
        }

        // Free egui textures
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
        surface_texture.present();
    }
}

/// Main application struct.
pub struct App {
    config: AppConfig,
    typesetter: Option<TypstTypesetter>,
    state: Option<AppState>,
    error: Option<AppError>,
}

impl App {
    /// Create an application around an already initialised typesetter.
    pub fn new(config: AppConfig, typesetter: TypstTypesetter) -> Self {
        Self {
            config,
            typesetter: Some(typesetter),
            state: None,
            error: None,
        }
    }

    /// Load the typesetter, open the window and run until it closes.
    pub fn run(config: AppConfig) -> Result<(), AppError> {
        let typesetter = TypstTypesetter::new(config.fonts)?;
        diagnostics::log_typesetter(&typesetter);
        shortcuts::log_all(&config.keymap);

        let event_loop = EventLoop::new()?;
        let mut app = App::new(config, typesetter);
        event_loop.run_app(&mut app)?;

        match app.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let window_attrs = Window::default_attributes()
            .with_title(&self.config.title)
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(window_attrs)?);
        log::info!("Window created, initializing renderer...");

        let size = window.inner_size();
        let (width, height) = if size.width == 0 || size.height == 0 {
            (self.config.width, self.config.height)
        } else {
            (size.width, size.height)
        };
        let gpu = pollster::block_on(Gpu::new(window.clone(), width, height))?;

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, egui_wgpu::RendererOptions::default());

        let Some(typesetter) = self.typesetter.take() else {
            return Err(AppError::Typesetter(TypesetError::Fonts(
                "typesetter already in use".to_string(),
            )));
        };
        let (figure_width, figure_height) = self.config.figure_size;
        let equation = RenderSurface::new(typesetter, self.config.render.clone(), figure_width, figure_height);

        log::info!("MathPane initialized - {}x{}", width, height);

        self.state = Some(AppState {
            window: window.clone(),
            gpu,
            egui_ctx,
            egui_state,
            egui_renderer,
            ui_state: UiState::default(),
            equation,
            figure_texture: None,
            figure_generation: None,
            keymap: self.config.keymap.clone(),
            export: self.config.export.clone(),
            quit_requested: false,
        });

        window.request_redraw();
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.is_some() || self.error.is_some() {
            return;
        }
        log::info!("Creating window...");
        if let Err(e) = self.init(event_loop) {
            log::error!("Startup failed: {}", e);
            self.error = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(state) = &mut self.state else {
            return;
        };

        // Let egui process the event first
        let egui_response = state.egui_state.on_window_event(&state.window, &event);
        if egui_response.repaint {
            state.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                state.gpu.resize(size.width, size.height);
                state.window.request_redraw();
            }

            WindowEvent::Focused(true) => {
                state.ui_state.focus_input = true;
                state.window.request_redraw();
            }

            WindowEvent::RedrawRequested => {
                state.redraw();
                if state.quit_requested {
                    log::info!("Quit requested");
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }
}
