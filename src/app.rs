use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{Key, NamedKey},
    window::{Window, WindowId},
};

use crate::config::ExplorerConfig;
use crate::explorer::{Explorer, FrameOutput};
use crate::rendering::{InstanceBatch, SphereRenderer};
use crate::scene::traits::ModelError;
use crate::ui::UiSystem;

/// Initial instance buffer size; buffers grow on demand.
const INSTANCE_CAPACITY: usize = 16 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoSurfaceFormat,
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

pub struct App {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    explorer: Explorer,
    renderer: SphereRenderer,
    ui: UiSystem,
    batch: InstanceBatch,
    last_render_time: std::time::Instant,
    frame_count: u32,
    fps_timer: std::time::Instant,
}

impl App {
    pub fn new(event_loop: &ActiveEventLoop, explorer_config: ExplorerConfig) -> Result<Self, AppError> {
        let window_attributes = Window::default_attributes()
            .with_title("Bio-Scales")
            .with_inner_size(winit::dpi::PhysicalSize::new(1600, 900));

        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        let (device, queue) = pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor {
            label: Some("Bio-Scales Device"),
            ..Default::default()
        }))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(AppError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = SphereRenderer::new(&device, &config, INSTANCE_CAPACITY);
        let ui = UiSystem::new(&device, surface_format, &window);

        let mut explorer = Explorer::new(explorer_config);
        explorer.camera_mut().resize(config.width, config.height);
        explorer.start()?;

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            explorer,
            renderer,
            ui,
            batch: InstanceBatch::default(),
            last_render_time: std::time::Instant::now(),
            frame_count: 0,
            fps_timer: std::time::Instant::now(),
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Returns `Ok(false)` when the application should close.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Result<bool, AppError> {
        let response = self.ui.handle_event(&self.window, event);
        let over_ui = response.consumed || self.ui.wants_pointer_input();

        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested");
                return Ok(false);
            }
            WindowEvent::Resized(physical_size) => {
                self.resize(physical_size.width, physical_size.height);
            }
            WindowEvent::MouseInput { button, state, .. } => {
                if *button == MouseButton::Left {
                    if *state == ElementState::Pressed && !over_ui {
                        self.explorer.click();
                    }
                } else {
                    self.explorer.camera_mut().handle_mouse_button(*button, *state);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.explorer.camera_mut().handle_mouse_move(*position);
                if over_ui {
                    self.explorer.pointer_left();
                } else {
                    let ndc = glam::Vec2::new(
                        (position.x as f32 / self.config.width as f32) * 2.0 - 1.0,
                        1.0 - (position.y as f32 / self.config.height as f32) * 2.0,
                    );
                    self.explorer.pointer_moved(ndc);
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.explorer.pointer_left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                if !over_ui {
                    self.explorer.camera_mut().handle_scroll(*delta);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                    && !response.consumed
                {
                    self.explorer.request_exit();
                }
            }
            WindowEvent::RedrawRequested => {
                self.render()?;
            }
            _ => {}
        }
        Ok(true)
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.renderer.resize(&self.device, width, height);
        self.explorer.camera_mut().resize(width, height);
    }

    fn render(&mut self) -> Result<(), AppError> {
        let now = std::time::Instant::now();
        let dt = now.duration_since(self.last_render_time).as_secs_f32();
        self.last_render_time = now;

        let frame: FrameOutput = self.explorer.tick(dt)?;

        self.ui.begin_frame(&self.window);
        let (mut full_output, response) = self.ui.end_frame(&frame, self.explorer.current_level());
        if response.zoom_out_clicked {
            self.explorer.request_exit();
        }
        self.ui.handle_platform_output(&self.window, &mut full_output);

        self.batch.clear();
        for entry in self.explorer.registry().entries().filter(|e| e.visible) {
            self.batch.push_subtree(&entry.subtree);
        }
        self.batch.sort_transparent(self.explorer.camera().position());

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return Ok(());
            }
        };
        let view = output.texture.create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Frame Encoder"),
        });

        self.renderer.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            self.explorer.camera(),
            &self.batch,
        );

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };
        self.ui.render(
            &self.device,
            &self.queue,
            &mut encoder,
            &view,
            screen_descriptor,
            full_output,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        // FPS counter
        self.frame_count += 1;
        if self.fps_timer.elapsed().as_secs_f32() >= 1.0 {
            log::debug!("FPS: {} ({} spheres)", self.frame_count, self.batch.len());
            self.frame_count = 0;
            self.fps_timer = std::time::Instant::now();
        }
        Ok(())
    }

    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

struct AppState {
    app: Option<App>,
    config: Option<ExplorerConfig>,
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_some() {
            return;
        }
        let config = self.config.take().unwrap_or_default();
        match App::new(event_loop, config) {
            Ok(app) => self.app = Some(app),
            Err(e) => {
                log::error!("Failed to start: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(app) = &mut self.app else { return };

        if window_id != app.window().id() {
            return;
        }

        match app.handle_event(&event) {
            Ok(true) => {}
            Ok(false) => event_loop.exit(),
            Err(e) => {
                log::error!("Fatal: {}", e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Poll);
        if let Some(app) = &self.app {
            app.request_redraw();
        }
    }
}

pub fn run() -> Result<(), AppError> {
    env_logger::init();

    let config = ExplorerConfig::load();
    match config.save_if_missing() {
        Ok(true) => log::info!("Wrote explorer_config.ron with the current settings"),
        Ok(false) => {}
        Err(e) => log::warn!("Failed to write explorer config: {}", e),
    }

    let event_loop = EventLoop::new()?;
    let mut state = AppState {
        app: None,
        config: Some(config),
    };

    event_loop.run_app(&mut state)?;
    Ok(())
}
