//! Material descriptors for scene meshes
//!
//! A [`MaterialDesc`] is plain data: each mesh declares its own and nothing is shared.
//! The renderer turns it into a per-object uniform when the scene is uploaded.

use crate::gfx::color::Color;

/// Presentational surface properties of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialDesc {
    pub color: Color,
    pub transparent: bool,
    pub opacity: f32,
    pub metalness: f32,
    pub roughness: f32,
    pub emissive: Color,
    pub emissive_intensity: f32,
}

impl MaterialDesc {
    /// Matte, opaque material of the given colour
    pub fn new(color: Color) -> Self {
        Self {
            color,
            transparent: false,
            opacity: 1.0,
            metalness: 0.0,
            roughness: 1.0,
            emissive: Color::BLACK,
            emissive_intensity: 1.0,
        }
    }

    /// Builder pattern: Make the material alpha-blended with the given opacity
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.transparent = true;
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metalness(mut self, metalness: f32) -> Self {
        self.metalness = metalness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set emissive colour and intensity
    pub fn with_emission(mut self, emissive: Color, intensity: f32) -> Self {
        self.emissive = emissive;
        self.emissive_intensity = intensity;
        self
    }

    /// Whether the mesh belongs in the alpha-blended pass
    pub fn is_translucent(&self) -> bool {
        self.transparent && self.opacity < 1.0
    }

    /// Linear emissive radiance (colour times intensity)
    pub fn emissive_linear(&self) -> [f32; 3] {
        let [r, g, b] = self.emissive.to_linear_f32();
        let k = self.emissive_intensity;
        [r * k, g * k, b * k]
    }
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self::new(Color::WHITE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_matte_and_opaque() {
        let material = MaterialDesc::new(Color::hex("#8B4513"));
        assert!(!material.is_translucent());
        assert_eq!(material.metalness, 0.0);
        assert_eq!(material.roughness, 1.0);
        assert_eq!(material.emissive_linear(), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_opacity_marks_translucent() {
        let pane = MaterialDesc::new(Color::hex("#87CEEB")).with_opacity(0.4);
        assert!(pane.transparent);
        assert!(pane.is_translucent());
        assert_eq!(pane.opacity, 0.4);
    }

    #[test]
    fn test_emission_scales_with_intensity() {
        let screen = MaterialDesc::new(Color::WHITE).with_emission(Color::WHITE, 0.3);
        for channel in screen.emissive_linear() {
            assert!((channel - 0.3).abs() < 1e-6);
        }
    }
}
