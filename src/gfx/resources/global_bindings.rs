//! Global uniform bindings for camera and lighting
//!
//! One uniform block shared by every pipeline at group 0. The shadow map lives
//! in its own group so the depth-only pass can run without it.

use crate::{
    gfx::{
        camera::camera_utils::{convert_matrix4_to_array, CameraUniform},
        lighting::{LightRig, MAX_POINT_LIGHTS},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

use super::texture_resource::TextureResource;

/// MUST match `Globals` in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
    light_view_proj: [[f32; 4]; 4],
    /// Linear rgb premultiplied by intensity
    ambient: [f32; 4],
    /// Towards the light, w unused
    sun_direction: [f32; 4],
    sun_color: [f32; 4],
    point_positions: [[f32; 4]; MAX_POINT_LIGHTS],
    point_colors: [[f32; 4]; MAX_POINT_LIGHTS],
    /// x = number of active point lights
    point_count: [u32; 4],
}

impl GlobalUBOContent {
    pub fn new(camera: &CameraUniform, lights: &LightRig) -> Self {
        let scaled = |rgb: [f32; 3], intensity: f32| {
            [rgb[0] * intensity, rgb[1] * intensity, rgb[2] * intensity, 1.0]
        };

        let mut point_positions = [[0.0; 4]; MAX_POINT_LIGHTS];
        let mut point_colors = [[0.0; 4]; MAX_POINT_LIGHTS];
        let active = lights.points.len().min(MAX_POINT_LIGHTS);
        if lights.points.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights requested, only the first {} are used",
                lights.points.len(),
                MAX_POINT_LIGHTS
            );
        }
        for (i, light) in lights.points.iter().take(active).enumerate() {
            point_positions[i] = light.position.extend(1.0).into();
            point_colors[i] = scaled(light.color.to_linear_f32(), light.intensity);
        }

        let direction = lights.sun.direction_to_light();

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: convert_matrix4_to_array(lights.sun.view_projection()),
            ambient: scaled(lights.ambient.color.to_linear_f32(), lights.ambient.intensity),
            sun_direction: direction.extend(0.0).into(),
            sun_color: scaled(lights.sun.color.to_linear_f32(), lights.sun.intensity),
            point_positions,
            point_colors,
            point_count: [active as u32, 0, 0, 0],
        }
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Writes camera and lights for this frame; unchanged content is not re-sent
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: &CameraUniform,
    lights: &LightRig,
) {
    ubo.update_content(queue, GlobalUBOContent::new(camera, lights));
}

/// Group 0: the global uniform block
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform())
            .create(device, "Globals Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .resource(ubo.binding_resource())
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

/// Group 2: shadow map and its comparison sampler
pub struct ShadowBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: wgpu::BindGroup,
}

impl ShadowBindings {
    pub fn new(device: &wgpu::Device, shadow_map: &TextureResource) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_fragment(binding_types::depth_texture_2d())
            .next_binding_fragment(binding_types::sampler(
                wgpu::SamplerBindingType::Comparison,
            ))
            .create(device, "Shadow Bind Group Layout");

        let bind_group = BindGroupBuilder::new(&bind_group_layout)
            .texture(&shadow_map.view)
            .sampler(&shadow_map.sampler)
            .create(device, "Shadow Bind Group");

        ShadowBindings {
            bind_group_layout,
            bind_group,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
