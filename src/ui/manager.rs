// src/ui/manager.rs
//! ImGui integration
//!
//! Owns the imgui context together with its winit platform and wgpu renderer.
//! A frame is built with [`UiManager::update_logic`] and recorded into the
//! surface with [`UiManager::render_display_only`] after the 3D passes. A frame
//! the renderer skips is ended with [`UiManager::discard_frame`]; imgui aborts
//! if a new frame starts while the previous one is still open.

use std::time::Instant;

use imgui::{Context, FontConfig, FontSource, MouseCursor};
use imgui_wgpu::{Renderer, RendererConfig};
use imgui_winit_support::{HiDpiMode, WinitPlatform};
use wgpu::{CommandEncoder, Device, Queue, TextureFormat, TextureView};
use winit::{
    event::{Event, WindowEvent},
    window::{Window, WindowId},
};

use crate::error::{RaumplanError, Result};

const FONT_SIZE: f32 = 24.0;

/// Whether an imgui frame has been started but not yet rendered
#[derive(Debug, Default)]
struct FrameState {
    open: bool,
}

impl FrameState {
    /// Starts a frame, ending any frame that was left open
    fn begin<'a>(&mut self, context: &'a mut Context) -> &'a mut imgui::Ui {
        self.close(context);
        self.open = true;
        context.frame()
    }

    /// Ends the open frame without drawing it
    fn close(&mut self, context: &mut Context) {
        if std::mem::take(&mut self.open) {
            context.render();
        }
    }

    /// Ends the open frame and hands back its draw data
    fn finish<'a>(&mut self, context: &'a mut Context) -> Option<&'a imgui::DrawData> {
        if std::mem::take(&mut self.open) {
            Some(context.render())
        } else {
            None
        }
    }
}

pub struct UiManager {
    pub context: Context,
    platform: WinitPlatform,
    renderer: Renderer,
    last_frame: Instant,
    last_cursor: Option<MouseCursor>,
    frame: FrameState,
}

impl UiManager {
    /// Locked DPI mode; the font is rasterised once at a fixed pixel size
    pub fn new(
        device: &Device,
        queue: &Queue,
        output_color_format: TextureFormat,
        window: &Window,
    ) -> Self {
        let mut context = Context::create();
        context.set_ini_filename(None);

        let mut platform = WinitPlatform::new(&mut context);
        platform.attach_window(context.io_mut(), window, HiDpiMode::Locked(1.0));

        // the default glyph range (Latin-1) covers the umlauts in every caption
        context.fonts().add_font(&[FontSource::DefaultFontData {
            config: Some(FontConfig {
                oversample_h: 1,
                pixel_snap_h: true,
                size_pixels: FONT_SIZE,
                ..Default::default()
            }),
        }]);

        let renderer_config = RendererConfig {
            texture_format: output_color_format,
            ..Default::default()
        };
        let renderer = Renderer::new(&mut context, device, queue, renderer_config);

        Self {
            context,
            platform,
            renderer,
            last_frame: Instant::now(),
            last_cursor: None,
            frame: FrameState::default(),
        }
    }

    pub fn update_display_size(&mut self, width: u32, height: u32) {
        self.context.io_mut().display_size = [width as f32, height as f32];
    }

    /// Whether imgui wants the mouse, i.e. the cursor is over a panel
    pub fn wants_mouse(&self) -> bool {
        self.context.io().want_capture_mouse
    }

    /// Feeds a window event to imgui. Returns true when the UI captured it and
    /// it must not reach the camera.
    pub fn handle_window_event(
        &mut self,
        window: &Window,
        window_id: WindowId,
        event: &WindowEvent,
    ) -> bool {
        match event {
            WindowEvent::CursorMoved { .. }
            | WindowEvent::MouseInput { .. }
            | WindowEvent::MouseWheel { .. }
            | WindowEvent::KeyboardInput { .. }
            | WindowEvent::ModifiersChanged(_)
            | WindowEvent::Focused(_) => {
                let wrapped: Event<()> = Event::WindowEvent {
                    window_id,
                    event: event.clone(),
                };
                self.platform
                    .handle_event(self.context.io_mut(), window, &wrapped);

                // modifier and focus changes must also reach the camera
                if matches!(
                    event,
                    WindowEvent::ModifiersChanged(_) | WindowEvent::Focused(_)
                ) {
                    return false;
                }

                let io = self.context.io();
                io.want_capture_mouse || io.want_capture_keyboard
            }
            _ => false,
        }
    }

    /// Starts a frame, runs `run_ui` and returns whatever it produced
    pub fn update_logic<F, R>(&mut self, window: &Window, run_ui: F) -> Result<R>
    where
        F: FnOnce(&imgui::Ui) -> R,
    {
        let now = Instant::now();
        self.context
            .io_mut()
            .update_delta_time(now - self.last_frame);
        self.last_frame = now;

        self.platform
            .prepare_frame(self.context.io_mut(), window)?;

        let ui = self.frame.begin(&mut self.context);
        let output = run_ui(ui);

        if self.last_cursor != ui.mouse_cursor() {
            self.last_cursor = ui.mouse_cursor();
            self.platform.prepare_render(ui, window);
        }

        Ok(output)
    }

    /// Ends a frame that will not be drawn. No-op once it has been rendered.
    pub fn discard_frame(&mut self) {
        self.frame.close(&mut self.context);
    }

    /// Records the frame built by the last `update_logic` on top of the scene
    pub fn render_display_only(
        &mut self,
        device: &Device,
        queue: &Queue,
        encoder: &mut CommandEncoder,
        color_attachment: &TextureView,
    ) -> Result<()> {
        let Some(draw_data) = self.frame.finish(&mut self.context) else {
            return Ok(());
        };

        if draw_data.display_size[0] <= 0.0 || draw_data.display_size[1] <= 0.0 {
            return Ok(());
        }

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("imgui_render_pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_attachment,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        self.renderer
            .render(draw_data, queue, device, &mut render_pass)
            .map_err(|e| RaumplanError::UiRender(format!("{e:?}")))
    }
}
