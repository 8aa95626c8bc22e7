use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, MouseButton, MouseScrollDelta, WindowEvent},
};

use super::orbit_camera::OrbitCamera;

/// Maps mouse input onto an [`OrbitCamera`].
///
/// Left drag rotates, right drag or shift + left drag pans, the wheel zooms.
/// Button and wheel state come from window events so the UI can capture them
/// first; motion comes from raw device deltas.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    is_shift_held: bool,
    is_left_pressed: bool,
    is_right_pressed: bool,
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            is_shift_held: false,
            is_left_pressed: false,
            is_right_pressed: false,
        }
    }

    pub fn with_enabled(mut self, rotate: bool, zoom: bool, pan: bool) -> Self {
        self.enable_rotate = rotate;
        self.enable_zoom = zoom;
        self.enable_pan = pan;
        self
    }

    pub fn process_window_event(&mut self, event: &WindowEvent, camera: &mut OrbitCamera) -> bool {
        match event {
            WindowEvent::ModifiersChanged(modifiers) => {
                self.is_shift_held = modifiers.state().shift_key();
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let pressed = *state == ElementState::Pressed;
                match button {
                    MouseButton::Left => self.is_left_pressed = pressed,
                    MouseButton::Right => self.is_right_pressed = pressed,
                    _ => (),
                }
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32 * 0.05
                    }
                };
                self.on_scroll(scroll_amount, camera)
            }
            WindowEvent::Focused(false) => {
                self.release_all();
                false
            }
            _ => false,
        }
    }

    pub fn process_device_event(&mut self, event: &DeviceEvent, camera: &mut OrbitCamera) -> bool {
        let DeviceEvent::MouseMotion { delta } = event else {
            return false;
        };
        let (dx, dy) = (delta.0 as f32, delta.1 as f32);

        if self.is_panning() {
            self.on_pan(dx, dy, camera)
        } else if self.is_rotating() {
            self.on_drag(dx, dy, camera)
        } else {
            false
        }
    }

    /// Orbits around the target by a pixel delta
    pub fn on_drag(&self, dx: f32, dy: f32, camera: &mut OrbitCamera) -> bool {
        if !self.enable_rotate {
            return false;
        }
        camera.add_yaw(-dx * self.rotate_speed);
        camera.add_pitch(dy * self.rotate_speed);
        true
    }

    /// Positive amounts move away from the target
    pub fn on_scroll(&self, amount: f32, camera: &mut OrbitCamera) -> bool {
        if !self.enable_zoom {
            return false;
        }
        camera.add_distance(amount * self.zoom_speed);
        true
    }

    pub fn on_pan(&self, dx: f32, dy: f32, camera: &mut OrbitCamera) -> bool {
        if !self.enable_pan {
            return false;
        }
        camera.pan((-dx * self.pan_speed, dy * self.pan_speed));
        true
    }

    pub fn is_panning(&self) -> bool {
        self.is_right_pressed || (self.is_left_pressed && self.is_shift_held)
    }

    pub fn is_rotating(&self) -> bool {
        self.is_left_pressed && !self.is_shift_held
    }

    /// Drops held buttons, e.g. when the UI takes over the pointer
    pub fn release_all(&mut self) {
        self.is_left_pressed = false;
        self.is_right_pressed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::orbit_camera::OrbitCameraBounds;
    use cgmath::{Vector3, Zero};
    use std::f32::consts::FRAC_PI_2;

    fn camera() -> OrbitCamera {
        let bounds = OrbitCameraBounds {
            min_distance: Some(5.0),
            max_distance: Some(20.0),
            min_pitch: 0.1,
            max_pitch: FRAC_PI_2 - 1e-3,
            ..OrbitCameraBounds::default()
        };
        OrbitCamera::looking_at(Vector3::new(8.0, 8.0, 8.0), Vector3::zero(), bounds, 1.0)
    }

    #[test]
    fn test_any_input_sequence_respects_bounds() {
        let controller = CameraController::new(0.01, 0.5);
        let mut camera = camera();
        let moves = [(300.0, 900.0), (-50.0, -2000.0), (0.0, 400.0), (1000.0, 10.0)];

        for (i, (dx, dy)) in moves.iter().cycle().take(40).enumerate() {
            controller.on_drag(*dx, *dy, &mut camera);
            controller.on_scroll(if i % 3 == 0 { 25.0 } else { -40.0 }, &mut camera);
            controller.on_pan(*dx * 0.1, *dy * 0.1, &mut camera);

            assert!((5.0..=20.0).contains(&camera.distance), "{}", camera.distance);
            assert!(camera.polar_angle() <= FRAC_PI_2 - 0.1 + 1e-6);
            assert!(camera.polar_angle() >= 0.0);
        }
    }

    #[test]
    fn test_disabled_zoom_leaves_distance() {
        let controller = CameraController::new(0.01, 0.5).with_enabled(true, false, true);
        let mut camera = camera();
        let before = camera.distance;
        assert!(!controller.on_scroll(10.0, &mut camera));
        assert_eq!(camera.distance, before);
    }

    #[test]
    fn test_drag_changes_yaw() {
        let controller = CameraController::new(0.01, 0.5);
        let mut camera = camera();
        let before = camera.yaw;
        controller.on_drag(50.0, 0.0, &mut camera);
        assert!((camera.yaw - (before - 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_pan_mode_selection() {
        let mut controller = CameraController::new(0.01, 0.5);
        assert!(!controller.is_rotating() && !controller.is_panning());
        controller.is_left_pressed = true;
        assert!(controller.is_rotating());
        controller.is_shift_held = true;
        assert!(controller.is_panning() && !controller.is_rotating());
        controller.is_shift_held = false;
        controller.release_all();
        controller.is_right_pressed = true;
        assert!(controller.is_panning());
    }
}
