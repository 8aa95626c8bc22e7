//! WGPU-based rendering engine
//!
//! Four passes per frame: shadow depth from the directional light, opaque
//! geometry, alpha-blended geometry without depth writes, then the UI overlay.

use std::sync::Arc;

use cgmath::{InnerSpace, Vector3};
use wgpu::TextureFormat;

use crate::{
    error::{RaumplanError, Result},
    gfx::{
        camera::camera_utils::CameraUniform,
        color::Color,
        lighting::LightRig,
        resources::{
            global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, ShadowBindings},
            texture_resource::TextureResource,
        },
        scene::{
            node::FlattenedScene,
            object::{DrawObject, MeshLibrary, Object, ObjectBindings},
        },
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SHADOW_PIPELINE: &str = "Shadow";
const OPAQUE_PIPELINE: &str = "Opaque";
const TRANSLUCENT_PIPELINE: &str = "Translucent";

/// Surface and shadow settings fixed at creation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub vsync: bool,
    pub clear_color: Color,
    pub shadow_map_size: u32,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            vsync: true,
            clear_color: Color::hex("#F0F0F0"),
            shadow_map_size: 2048,
        }
    }
}

/// What happened to a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Presented,
    /// The surface was lost or outdated and has been reconfigured
    Skipped,
}

pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    format: TextureFormat,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    shadow_map: TextureResource,
    shadow_bindings: ShadowBindings,
    object_bindings: ObjectBindings,
    meshes: MeshLibrary,
    objects: Vec<Object>,
    lights: Option<LightRig>,
    clear_color: wgpu::Color,
}

impl RenderEngine {
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        settings: RenderSettings,
    ) -> Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: 4096,
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(RaumplanError::UnsupportedSurface)?;
        let alpha_mode = surface_capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: choose_present_mode(&surface_capabilities.present_modes, settings.vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        log::debug!("surface configured: {:?}", config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");
        let shadow_map = TextureResource::create_shadow_map(&device, settings.shadow_map_size);

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);
        let shadow_bindings = ShadowBindings::new(&device, &shadow_map);
        let object_bindings = ObjectBindings::new(&device);
        let meshes = MeshLibrary::new(&device);

        let device: Arc<wgpu::Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device.clone());

        pipeline_manager.load_shader("floorplan", include_str!("floorplan.wgsl"));
        pipeline_manager.load_shader("shadow", include_str!("shadow_pass.wgsl"));

        // planes are single sided, so render both faces into the shadow map
        pipeline_manager.register_pipeline(
            SHADOW_PIPELINE,
            PipelineConfig::default()
                .with_label("SHADOW")
                .with_shader("shadow")
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_depth_bias(2, 2.0)
                .with_cull_mode(None)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    object_bindings.bind_group_layout().clone(),
                ])
                .with_vertex_only(),
        );

        let shaded_layouts = vec![
            global_bindings.bind_group_layout().clone(),
            object_bindings.bind_group_layout().clone(),
            shadow_bindings.bind_group_layout().clone(),
        ];

        pipeline_manager.register_pipeline(
            OPAQUE_PIPELINE,
            PipelineConfig::default()
                .with_label("OPAQUE")
                .with_shader("floorplan")
                .with_depth(TextureResource::DEPTH_FORMAT)
                .with_color_target(format, wgpu::BlendState::REPLACE)
                .with_bind_group_layouts(shaded_layouts.clone()),
        );

        pipeline_manager.register_pipeline(
            TRANSLUCENT_PIPELINE,
            PipelineConfig::default()
                .with_label("TRANSLUCENT")
                .with_shader("floorplan")
                .with_depth(TextureResource::DEPTH_FORMAT)
                .without_depth_write()
                .with_cull_mode(None)
                .with_color_target(format, wgpu::BlendState::ALPHA_BLENDING)
                .with_bind_group_layouts(shaded_layouts),
        );

        pipeline_manager.create_all_pipelines()?;

        let [r, g, b] = settings.clear_color.to_srgb_f32();

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            format,
            pipeline_manager,
            global_ubo,
            global_bindings,
            shadow_map,
            shadow_bindings,
            object_bindings,
            meshes,
            objects: Vec::new(),
            lights: None,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
        })
    }

    /// Replaces every GPU object with the given scene
    pub fn upload_scene(&mut self, scene: &FlattenedScene, lights: &LightRig) {
        self.objects = scene
            .opaque()
            .chain(scene.translucent())
            .map(|item| Object::new(&self.device, &self.object_bindings, item))
            .collect();
        self.lights = Some(lights.clone());

        log::info!(
            "uploaded {} objects ({} translucent, {} shadow casters)",
            self.objects.len(),
            self.objects.iter().filter(|o| o.translucent).count(),
            self.objects.iter().filter(|o| o.cast_shadow).count()
        );
    }

    /// Renders one frame. Lost or outdated surfaces are reconfigured and the frame
    /// is skipped; out-of-memory and other surface errors are returned.
    pub fn render_frame<F>(&mut self, camera: &CameraUniform, ui_callback: F) -> Result<FrameStatus>
    where
        F: FnOnce(&wgpu::Device, &wgpu::Queue, &mut wgpu::CommandEncoder, &wgpu::TextureView) -> Result<()>,
    {
        if let Some(lights) = &self.lights {
            update_global_ubo(&mut self.global_ubo, &self.queue, camera, lights);
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(FrameStatus::Skipped);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("surface timed out, skipping frame");
                return Ok(FrameStatus::Skipped);
            }
            Err(e) => return Err(e.into()),
        };

        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // PASS 1: shadow depth
        {
            let mut shadow_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shadow Depth Pass"),
                color_attachments: &[],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.shadow_map.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            shadow_pass.set_pipeline(self.pipeline_manager.pipeline(SHADOW_PIPELINE)?);
            shadow_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            for object in self.objects.iter().filter(|o| o.cast_shadow) {
                shadow_pass.draw_object(object, &self.meshes);
            }
        }

        // PASS 2: opaque geometry
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Opaque Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(self.pipeline_manager.pipeline(OPAQUE_PIPELINE)?);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            render_pass.set_bind_group(2, self.shadow_bindings.bind_group(), &[]);
            for object in self.objects.iter().filter(|o| !o.translucent) {
                render_pass.draw_object(object, &self.meshes);
            }
        }

        // PASS 3: translucent geometry, back to front
        {
            let eye = Vector3::new(
                camera.view_position[0],
                camera.view_position[1],
                camera.view_position[2],
            );
            let order = back_to_front(&self.objects, eye);

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Translucent Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(self.pipeline_manager.pipeline(TRANSLUCENT_PIPELINE)?);
            render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
            render_pass.set_bind_group(2, self.shadow_bindings.bind_group(), &[]);
            for index in order {
                render_pass.draw_object(&self.objects[index], &self.meshes);
            }
        }

        // PASS 4: UI overlay
        ui_callback(&self.device, &self.queue, &mut encoder, &surface_texture_view)?;

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(FrameStatus::Presented)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    pub fn get_surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.format
    }
}

fn choose_present_mode(supported: &[wgpu::PresentMode], vsync: bool) -> wgpu::PresentMode {
    if !vsync && supported.contains(&wgpu::PresentMode::Immediate) {
        wgpu::PresentMode::Immediate
    } else {
        wgpu::PresentMode::Fifo
    }
}

/// Indices of translucent objects, farthest from `eye` first
fn back_to_front(objects: &[Object], eye: Vector3<f32>) -> Vec<usize> {
    let mut order: Vec<(usize, f32)> = objects
        .iter()
        .enumerate()
        .filter(|(_, o)| o.translucent)
        .map(|(i, o)| (i, (o.center - eye).magnitude2()))
        .collect();
    order.sort_by(|a, b| b.1.total_cmp(&a.1));
    order.into_iter().map(|(i, _)| i).collect()
}
