//! GPU-side scene objects
//!
//! Every primitive is drawn from one of four shared unit meshes. An [`Object`] is
//! a flattened [`DrawItem`] with its own uniform buffer: model matrix, normal
//! matrix and material parameters.

use std::collections::HashMap;

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector3};
use wgpu::util::DeviceExt;

use crate::{
    gfx::{
        camera::camera_utils::convert_matrix4_to_array,
        geometry::GeometryData,
        scene::node::{DrawItem, ShapeKind},
    },
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let (vertices, indices) = geometry.to_scene_format();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertex Buffer")),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Index Buffer")),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// One unit mesh per shape kind, built once
pub struct MeshLibrary {
    meshes: HashMap<ShapeKind, Mesh>,
}

impl MeshLibrary {
    pub fn new(device: &wgpu::Device) -> Self {
        let meshes = [
            ShapeKind::Cube,
            ShapeKind::Plane,
            ShapeKind::Sphere,
            ShapeKind::Cylinder,
        ]
        .into_iter()
        .map(|kind| {
            let geometry = GeometryData::unit(kind);
            log::debug!(
                "unit {:?}: {} vertices, {} triangles",
                kind,
                geometry.vertex_count(),
                geometry.triangle_count()
            );
            (kind, Mesh::from_geometry(device, &geometry, &format!("{kind:?}")))
        })
        .collect();

        Self { meshes }
    }

    pub fn get(&self, kind: ShapeKind) -> Option<&Mesh> {
        self.meshes.get(&kind)
    }
}

/// MUST match `Object` in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    /// Inverse transpose of the model matrix
    pub normal: [[f32; 4]; 4],
    /// Linear rgb and opacity
    pub base_color: [f32; 4],
    pub emissive: [f32; 4],
    /// metalness, roughness, receives shadow (0 or 1), unused
    pub params: [f32; 4],
}

impl ObjectUniform {
    pub fn from_item(item: &DrawItem) -> Self {
        let model = item.model_matrix();
        let normal = model
            .invert()
            .map(|inverse| inverse.transpose())
            .unwrap_or_else(Matrix4::identity);

        let material = &item.material;
        let [r, g, b] = material.color.to_linear_f32();
        let opacity = if material.transparent {
            material.opacity
        } else {
            1.0
        };
        let [er, eg, eb] = material.emissive_linear();

        Self {
            model: convert_matrix4_to_array(model),
            normal: convert_matrix4_to_array(normal),
            base_color: [r, g, b, opacity],
            emissive: [er, eg, eb, 0.0],
            params: [
                material.metalness,
                material.roughness,
                if item.receive_shadow { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Group 1 layout shared by every object
pub struct ObjectBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
}

impl ObjectBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            bind_group_layout: BindGroupLayoutBuilder::new()
                .next_binding_rendering(binding_types::uniform())
                .create(device, "Object Bind Group Layout"),
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }
}

pub struct Object {
    pub name: &'static str,
    pub kind: ShapeKind,
    /// World-space origin, used to order translucent draws
    pub center: Vector3<f32>,
    pub translucent: bool,
    pub cast_shadow: bool,
    _uniform: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

impl Object {
    pub fn new(device: &wgpu::Device, bindings: &ObjectBindings, item: &DrawItem) -> Self {
        let uniform = UniformBuffer::new_with_data(device, &ObjectUniform::from_item(item));
        let bind_group = BindGroupBuilder::new(&bindings.bind_group_layout)
            .resource(uniform.binding_resource())
            .create(device, item.name);

        Self {
            name: item.name,
            kind: item.shape.kind(),
            center: item.world_position(),
            translucent: item.material.is_translucent(),
            cast_shadow: item.cast_shadow,
            _uniform: uniform,
            bind_group,
        }
    }
}

pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object, meshes: &'a MeshLibrary);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &'b Object, meshes: &'b MeshLibrary) {
        let Some(mesh) = meshes.get(object.kind) else {
            log::warn!("no unit mesh for {:?}, skipping '{}'", object.kind, object.name);
            return;
        };
        self.set_bind_group(1, &object.bind_group, &[]);
        self.draw_mesh(mesh);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        color::Color,
        scene::{
            material::MaterialDesc,
            node::{MeshNode, SceneNode, Shape, Transform},
        },
    };
    use cgmath::{InnerSpace, Vector4};

    fn item(node: MeshNode) -> DrawItem {
        SceneNode::from(node).flatten().items.remove(0)
    }

    #[test]
    fn test_layout_is_sixteen_byte_aligned() {
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 176);
    }

    #[test]
    fn test_box_scale_is_baked_into_model() {
        let uniform = ObjectUniform::from_item(&item(MeshNode::new(
            "slab",
            Shape::cuboid(8.0, 2.8, 0.15),
            MaterialDesc::default(),
        )));
        assert_eq!(uniform.model[0][0], 8.0);
        assert_eq!(uniform.model[1][1], 2.8);
        assert!((uniform.model[2][2] - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_normal_matrix_undoes_non_uniform_scale() {
        let node = MeshNode::new("slab", Shape::cuboid(4.0, 1.0, 0.5), MaterialDesc::default())
            .with_transform(Transform::at(1.0, 2.0, 3.0).rotated_y(0.7));
        let uniform = ObjectUniform::from_item(&item(node));
        let normal = Matrix4::from(uniform.normal);

        // a +X face normal stays perpendicular to the transformed face
        let n = (normal * Vector4::new(1.0, 0.0, 0.0, 0.0)).truncate().normalize();
        let model = Matrix4::from(uniform.model);
        let tangent = (model * Vector4::new(0.0, 0.0, 1.0, 0.0)).truncate();
        assert!(n.dot(tangent).abs() < 1e-5);
        assert!(n.dot(Vector3::unit_y()).abs() < 1e-5);
    }

    #[test]
    fn test_material_parameters() {
        let material = MaterialDesc::new(Color::hex("#87CEEB"))
            .with_opacity(0.4)
            .with_metalness(0.8)
            .with_roughness(0.2);
        let uniform = ObjectUniform::from_item(&item(
            MeshNode::new("pane", Shape::cuboid(1.0, 1.0, 1.0), material).receiving_shadow(),
        ));
        assert_eq!(uniform.base_color[3], 0.4);
        assert_eq!(uniform.params, [0.8, 0.2, 1.0, 0.0]);
    }

    #[test]
    fn test_opaque_ignores_opacity() {
        let mut material = MaterialDesc::new(Color::WHITE);
        material.opacity = 0.3;
        let uniform = ObjectUniform::from_item(&item(MeshNode::new(
            "leaf",
            Shape::cuboid(1.0, 1.0, 1.0),
            material,
        )));
        assert_eq!(uniform.base_color[3], 1.0);
        assert_eq!(uniform.params[2], 0.0);
    }
}
