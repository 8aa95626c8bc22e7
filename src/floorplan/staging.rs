//! Scene staging
//!
//! [`compose_scene`] is a pure function of the display state: camera, orbit
//! settings, lights and the apartment root.

use cgmath::{Deg, Rad, Vector3};
use std::f32::consts::FRAC_PI_2;

use crate::gfx::{
    camera::{CameraController, OrbitCamera, OrbitCameraBounds},
    color::Color,
    lighting::{AmbientLight, DirectionalLight, LightRig, PointLight, ShadowCamera},
    scene::node::{FlattenedScene, Group, SceneNode},
};

use super::{apartment::apartment, state::DisplayState};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSetup {
    pub fov_y: Deg<f32>,
    pub position: Vector3<f32>,
    pub target: Vector3<f32>,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            fov_y: Deg(60.0),
            position: Vector3::new(8.0, 8.0, 8.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraSetup {
    pub fn orbit_camera(&self, controls: &OrbitControlsConfig, aspect: f32) -> OrbitCamera {
        OrbitCamera::looking_at(self.position, self.target, controls.bounds(), aspect)
            .with_projection(Rad::from(self.fov_y), self.near, self.far)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitControlsConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// Largest angle between the view direction and the vertical axis
    pub max_polar_angle: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
}

impl Default for OrbitControlsConfig {
    fn default() -> Self {
        Self {
            min_distance: 5.0,
            max_distance: 20.0,
            max_polar_angle: FRAC_PI_2 - 0.1,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
        }
    }
}

impl OrbitControlsConfig {
    pub fn bounds(&self) -> OrbitCameraBounds {
        OrbitCameraBounds {
            min_distance: Some(self.min_distance),
            max_distance: Some(self.max_distance),
            min_pitch: FRAC_PI_2 - self.max_polar_angle,
            // straight down is allowed, minus a hair so look_at keeps a valid up vector
            max_pitch: FRAC_PI_2 - 1e-3,
            min_yaw: None,
            max_yaw: None,
        }
    }

    pub fn controller(&self) -> CameraController {
        CameraController::new(0.005, 0.5).with_enabled(
            self.enable_rotate,
            self.enable_zoom,
            self.enable_pan,
        )
    }
}

pub fn light_rig() -> LightRig {
    LightRig {
        ambient: AmbientLight {
            color: Color::WHITE,
            intensity: 0.5,
        },
        sun: DirectionalLight {
            position: Vector3::new(10.0, 10.0, 5.0),
            target: Vector3::new(0.0, 0.0, 0.0),
            color: Color::WHITE,
            intensity: 1.0,
            shadow: Some(ShadowCamera {
                map_size: 2048,
                left: -15.0,
                right: 15.0,
                top: 15.0,
                bottom: -15.0,
                near: 0.5,
                far: 50.0,
            }),
        },
        points: vec![
            PointLight {
                position: Vector3::new(0.0, 2.0, 0.0),
                color: Color::WHITE,
                intensity: 0.5,
            },
            PointLight {
                position: Vector3::new(-3.0, 2.0, -3.0),
                color: Color::hex("#FFA500"),
                intensity: 0.3,
            },
            PointLight {
                position: Vector3::new(3.0, 2.0, 3.0),
                color: Color::hex("#87CEEB"),
                intensity: 0.3,
            },
        ],
    }
}

/// Everything needed to draw one frame's worth of content
#[derive(Debug, Clone, PartialEq)]
pub struct FloorPlanScene {
    pub camera: CameraSetup,
    pub controls: OrbitControlsConfig,
    pub lights: LightRig,
    pub root: Group,
}

impl FloorPlanScene {
    /// World-space draw items and labels of the apartment
    pub fn flatten(&self) -> FlattenedScene {
        SceneNode::from(self.root.clone()).flatten()
    }
}

pub fn compose_scene(state: &DisplayState) -> FloorPlanScene {
    FloorPlanScene {
        camera: CameraSetup::default(),
        controls: OrbitControlsConfig::default(),
        lights: light_rig(),
        root: apartment(state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::lighting::MAX_POINT_LIGHTS;
    use cgmath::InnerSpace;

    #[test]
    fn test_flatten_follows_label_visibility() {
        let shown = compose_scene(&DisplayState::default()).flatten();
        assert_eq!(shown.labels.len(), 4);

        let hidden = compose_scene(&DisplayState {
            labels_visible: false,
            ..DisplayState::default()
        })
        .flatten();
        assert!(hidden.labels.is_empty());
        assert_eq!(hidden.items.len(), shown.items.len());
    }

    #[test]
    fn test_composition_is_deterministic() {
        for state in DisplayState::all() {
            assert_eq!(compose_scene(&state), compose_scene(&state));
        }
    }

    #[test]
    fn test_staging_does_not_depend_on_state() {
        let reference = compose_scene(&DisplayState::default());
        for state in DisplayState::all() {
            let scene = compose_scene(&state);
            assert_eq!(scene.camera, reference.camera);
            assert_eq!(scene.controls, reference.controls);
            assert_eq!(scene.lights, reference.lights);
        }
    }

    #[test]
    fn test_camera_starts_inside_orbit_bounds() {
        let scene = compose_scene(&DisplayState::default());
        let camera = scene.camera.orbit_camera(&scene.controls, 16.0 / 9.0);
        assert!((camera.eye - scene.camera.position).magnitude() < 1e-4);
        assert!((5.0..=20.0).contains(&camera.distance));
        assert!(camera.polar_angle() <= scene.controls.max_polar_angle + 1e-6);
        assert!((camera.fovy.0 - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
        assert_eq!(camera.znear, 0.1);
        assert_eq!(camera.zfar, 1000.0);
    }

    #[test]
    fn test_light_rig() {
        let rig = light_rig();
        assert_eq!(rig.ambient.intensity, 0.5);
        assert_eq!(rig.shadow_map_size(), Some(2048));
        assert_eq!(rig.points.len(), 3);
        assert!(rig.points.len() <= MAX_POINT_LIGHTS);
        assert_eq!(rig.points[1].color, Color::hex("#FFA500"));
        assert_eq!(rig.points[2].color, Color::hex("#87CEEB"));
    }
}
