use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalSize, PhysicalSize},
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    config::{self, AppConfig},
    error::{RaumplanError, Result},
    floorplan::{compose_scene, ControlAction, FloorPlanScene, SceneController},
    gfx::{camera::CameraManager, scene::node::FlattenedScene, RenderEngine},
    ui::{draw_labels, floorplan_overlay, project_labels, UiManager},
};

pub struct RaumplanApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

/// GPU-side members are created in `resumed`, once the window exists
struct AppState {
    config: AppConfig,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    ui_manager: Option<UiManager>,
    camera_manager: Option<CameraManager>,
    controller: SceneController,
    scene: FloorPlanScene,
    flattened: FlattenedScene,
    error: Option<RaumplanError>,
}

impl RaumplanApp {
    pub fn new(config: AppConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        let controller = SceneController::default();
        let scene = compose_scene(&controller.state());
        let flattened = scene.flatten();

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                ui_manager: None,
                camera_manager: None,
                controller,
                scene,
                flattened,
                error: None,
            },
        })
    }

    /// Runs the event loop until the window closes. Errors raised inside the
    /// loop end it and are returned here.
    pub fn run(mut self) -> Result<()> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let PhysicalSize { width, height } = window.inner_size();
        let (width, height) = (width.max(1), height.max(1));

        let mut render_engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            self.config.render_settings(),
        ))?;
        render_engine.upload_scene(&self.flattened, &self.scene.lights);

        let ui_manager = UiManager::new(
            render_engine.device(),
            render_engine.queue(),
            render_engine.surface_format(),
            &window,
        );

        let camera = self
            .scene
            .camera
            .orbit_camera(&self.scene.controls, width as f32 / height as f32);
        let controller = self.scene.controls.controller();

        log::info!("{} ready at {width}x{height}", config::DESCRIPTION);
        self.camera_manager = Some(CameraManager::new(camera, controller));
        self.ui_manager = Some(ui_manager);
        self.render_engine = Some(render_engine);
        self.window = Some(window);
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RaumplanError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn resize(&mut self, PhysicalSize { width, height }: PhysicalSize<u32>) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.resize(width, height);
        }
        if let Some(camera_manager) = self.camera_manager.as_mut() {
            camera_manager.camera.resize_projection(width, height);
        }
        if let Some(ui_manager) = self.ui_manager.as_mut() {
            ui_manager.update_display_size(width, height);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(render_engine), Some(ui_manager), Some(camera_manager)) = (
            self.window.as_ref(),
            self.render_engine.as_mut(),
            self.ui_manager.as_mut(),
            self.camera_manager.as_mut(),
        ) else {
            return;
        };
        camera_manager.camera.update_view_proj();

        let state = self.controller.state();
        let (width, height) = render_engine.get_surface_size();
        let labels = project_labels(
            &self.flattened.labels,
            camera_manager.get_view_proj_matrix(),
            [width as f32, height as f32],
        );

        let actions = match ui_manager.update_logic(window, |ui| {
            draw_labels(ui, &labels);
            floorplan_overlay(ui, &state)
        }) {
            Ok(actions) => actions,
            Err(e) => {
                log::warn!("skipping frame: {e}");
                return;
            }
        };

        let frame = render_engine.render_frame(
            &camera_manager.camera.uniform,
            |device, queue, encoder, view| {
                ui_manager.render_display_only(device, queue, encoder, view)
            },
        );
        // skipped or failed frames never reached the UI pass
        ui_manager.discard_frame();
        match frame {
            Ok(_) => {}
            Err(e @ RaumplanError::Surface(wgpu::SurfaceError::OutOfMemory)) => {
                self.fail(event_loop, e);
                return;
            }
            Err(e) => log::error!("frame failed: {e}"),
        }

        self.apply_actions(actions);
    }

    /// Applies clicked actions; the scene is recomposed and uploaded only when
    /// the display state actually changed
    fn apply_actions(&mut self, actions: Vec<ControlAction>) {
        let mut changed = false;
        for action in actions {
            changed |= self.controller.apply(action);
        }
        if !changed {
            return;
        }

        self.scene = compose_scene(&self.controller.state());
        self.flattened = self.scene.flatten();
        if let Some(render_engine) = self.render_engine.as_mut() {
            render_engine.upload_scene(&self.flattened, &self.scene.lights);
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_window(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.clone() else {
            return;
        };

        let captured = self
            .ui_manager
            .as_mut()
            .is_some_and(|ui_manager| ui_manager.handle_window_event(&window, window_id, &event));
        // button releases always reach the camera so a drag cannot get stuck
        if captured
            && !matches!(
                event,
                WindowEvent::MouseInput {
                    state: ElementState::Released,
                    ..
                }
            )
        {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => self.resize(size),
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            other => {
                if let Some(camera_manager) = self.camera_manager.as_mut() {
                    camera_manager.process_window_event(&other);
                }
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        // drags that start over a panel belong to the panel
        if self
            .ui_manager
            .as_ref()
            .is_some_and(|ui_manager| ui_manager.wants_mouse())
        {
            return;
        }
        if let Some(camera_manager) = self.camera_manager.as_mut() {
            camera_manager.process_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = self.window.as_ref() {
            window.request_redraw();
        }
    }
}
