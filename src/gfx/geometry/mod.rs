//! # Procedural Geometry Generation
//!
//! Every primitive in the floor plan is drawn from one of four unit meshes
//! generated here, so the crate needs no model files.
//!
//! ## Supported Primitives
//!
//! - **Cube**: unit cube, scaled per box
//! - **Sphere**: UV sphere of radius 1
//! - **Plane**: flat plane in XY
//! - **Cylinder**: capped cylinder along Y
//!
//! ## Usage
//!
//! ```rust
//! use raumplan::gfx::geometry::{generate_cube, generate_cylinder};
//!
//! let cube = generate_cube();
//! assert_eq!(cube.triangle_count(), 12);
//!
//! let leg = generate_cylinder(1.0, 1.0, 24);
//! assert!(leg.vertex_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::{node::ShapeKind, vertex::Vertex3D};

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Unit mesh for a shape kind; [`crate::gfx::scene::node::Shape::scale`] sizes it
    pub fn unit(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Cube => generate_cube(),
            ShapeKind::Plane => generate_plane(1.0, 1.0, 1, 1),
            ShapeKind::Sphere => generate_sphere(32, 16),
            ShapeKind::Cylinder => generate_cylinder(1.0, 1.0, 32),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into the vertex format used by the renderer
    pub fn to_scene_format(&self) -> (Vec<Vertex3D>, Vec<u32>) {
        let vertices: Vec<Vertex3D> = self
            .vertices
            .iter()
            .enumerate()
            .map(|(i, position)| Vertex3D {
                position: *position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        (vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_meshes_fit_unit_bounds() {
        for kind in [
            ShapeKind::Cube,
            ShapeKind::Plane,
            ShapeKind::Sphere,
            ShapeKind::Cylinder,
        ] {
            let data = GeometryData::unit(kind);
            assert!(data.triangle_count() > 0, "{kind:?} has no triangles");
            let (vertices, indices) = data.to_scene_format();
            assert_eq!(vertices.len(), data.vertex_count());
            assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
        }
    }
}
