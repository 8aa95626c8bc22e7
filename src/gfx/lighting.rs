//! Light source descriptions
//!
//! Plain data consumed by the global uniform. A rig holds one ambient term, one
//! directional light (optionally shadow casting) and up to
//! [`MAX_POINT_LIGHTS`] point lights.

use cgmath::{InnerSpace, Matrix4, Point3, Vector3};

use crate::gfx::{camera::orbit_camera::OPENGL_TO_WGPU_MATRIX, color::Color};

pub const MAX_POINT_LIGHTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Orthographic frustum used for the directional shadow map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadowCamera {
    pub map_size: u32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub color: Color,
    pub intensity: f32,
    pub shadow: Option<ShadowCamera>,
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light
    pub fn direction_to_light(&self) -> Vector3<f32> {
        (self.position - self.target).normalize()
    }

    /// Light-space view-projection for the shadow pass, identity when not casting
    pub fn view_projection(&self) -> Matrix4<f32> {
        let Some(shadow) = self.shadow else {
            return cgmath::SquareMatrix::identity();
        };

        let view = Matrix4::look_at_rh(
            Point3::new(self.position.x, self.position.y, self.position.z),
            Point3::new(self.target.x, self.target.y, self.target.z),
            Vector3::unit_y(),
        );
        let proj = cgmath::ortho(
            shadow.left,
            shadow.right,
            shadow.bottom,
            shadow.top,
            shadow.near,
            shadow.far,
        );
        OPENGL_TO_WGPU_MATRIX * proj * view
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vector3<f32>,
    pub color: Color,
    pub intensity: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub sun: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl LightRig {
    pub fn shadow_map_size(&self) -> Option<u32> {
        self.sun.shadow.map(|s| s.map_size)
    }
}
