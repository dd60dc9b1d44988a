//! UI System using egui-wgpu and egui-winit.
//!
//! Integrates egui with the wgpu/winit application and hosts the explorer
//! overlay.

use egui_wgpu::ScreenDescriptor;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::explorer::FrameOutput;
use crate::scene::levels::ScaleLevel;
use crate::ui::details::DetailCatalog;
use crate::ui::overlay::{Overlay, OverlayResponse};

/// The main UI system that manages egui rendering.
///
/// This struct coordinates between egui-winit for input handling and
/// egui-wgpu for GPU rendering.
pub struct UiSystem {
    /// egui context for immediate mode UI
    pub ctx: egui::Context,
    /// egui-winit state for input handling
    pub winit_state: egui_winit::State,
    /// egui-wgpu renderer
    pub renderer: egui_wgpu::Renderer,
    overlay: Overlay,
}

impl UiSystem {
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        window: &Window,
    ) -> Self {
        let ctx = egui::Context::default();

        let winit_state = egui_winit::State::new(
            ctx.clone(),
            egui::ViewportId::ROOT,
            window,
            Some(window.scale_factor() as f32),
            window.theme(),
            Some(device.limits().max_texture_dimension_2d as usize),
        );

        let renderer = egui_wgpu::Renderer::new(
            device,
            surface_format,
            egui_wgpu::RendererOptions::default(),
        );

        Self {
            ctx,
            winit_state,
            renderer,
            overlay: Overlay::new(DetailCatalog::embedded()),
        }
    }

    /// Handle a winit window event.
    ///
    /// `consumed` in the response means the event should not reach the
    /// camera or the explorer.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> egui_winit::EventResponse {
        self.winit_state.on_window_event(window, event)
    }

    /// Check if egui wants pointer (mouse) input.
    ///
    /// True while the pointer is over the zoom-out button or the detail
    /// window, or egui is dragging something.
    pub fn wants_pointer_input(&self) -> bool {
        self.ctx.wants_pointer_input() || self.ctx.is_pointer_over_area()
    }

    /// Begin a new egui frame.
    pub fn begin_frame(&mut self, window: &Window) {
        let raw_input = self.winit_state.take_egui_input(window);
        self.ctx.begin_pass(raw_input);
    }

    /// Draw the overlay and end the egui frame.
    pub fn end_frame(
        &mut self,
        frame: &FrameOutput,
        level: ScaleLevel,
    ) -> (egui::FullOutput, OverlayResponse) {
        let response = self.overlay.show(&self.ctx, frame, level);
        (self.ctx.end_pass(), response)
    }

    /// Render egui output to the screen.
    pub fn render(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        screen_descriptor: ScreenDescriptor,
        output: egui::FullOutput,
    ) {
        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let paint_jobs = self.ctx.tessellate(output.shapes, output.pixels_per_point);

        let _command_buffers = self.renderer.update_buffers(
            device,
            queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load, // Don't clear - render on top of 3D scene
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Render egui - need to forget lifetime for wgpu render pass
            self.renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    /// Forward clipboard and cursor changes to the window.
    pub fn handle_platform_output(&mut self, window: &Window, output: &mut egui::FullOutput) {
        let platform_output = std::mem::take(&mut output.platform_output);
        self.winit_state.handle_platform_output(window, platform_output);
    }
}
