use cgmath::{Matrix4, SquareMatrix, Vector3, Vector4};
use winit::event::{DeviceEvent, WindowEvent};

use super::{camera_controller::CameraController, orbit_camera::OrbitCamera};

pub struct CameraManager {
    pub camera: OrbitCamera,
    pub controller: CameraController,
}

impl CameraManager {
    pub fn new(camera: OrbitCamera, controller: CameraController) -> Self {
        Self { camera, controller }
    }

    /// Button, wheel and modifier state. Returns whether the camera moved.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        self.controller
            .process_window_event(event, &mut self.camera)
    }

    /// Raw mouse motion. Returns whether the camera moved.
    pub fn process_device_event(&mut self, event: &DeviceEvent) -> bool {
        self.controller
            .process_device_event(event, &mut self.camera)
    }

    pub fn get_view_proj_matrix(&self) -> Matrix4<f32> {
        self.camera.build_view_projection_matrix()
    }
}

pub trait Camera: Sized {
    fn build_view_projection_matrix(&self) -> Matrix4<f32>;
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self {
            view_position: [0.0; 4],
            view_proj: convert_matrix4_to_array(Matrix4::identity()),
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}

/// Projects a world position to pixel coordinates, origin top left.
///
/// Returns `None` for points behind the camera or outside the depth range.
pub fn project_to_screen(
    view_proj: Matrix4<f32>,
    position: Vector3<f32>,
    viewport: [f32; 2],
) -> Option<[f32; 2]> {
    let clip = view_proj * Vector4::new(position.x, position.y, position.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }

    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }

    Some([
        (ndc.x + 1.0) * 0.5 * viewport[0],
        (1.0 - ndc.y) * 0.5 * viewport[1],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::orbit_camera::OrbitCameraBounds;
    use cgmath::Zero;

    fn camera() -> OrbitCamera {
        OrbitCamera::looking_at(
            Vector3::new(8.0, 8.0, 8.0),
            Vector3::zero(),
            OrbitCameraBounds::default(),
            800.0 / 600.0,
        )
    }

    #[test]
    fn test_target_lands_at_viewport_centre() {
        let view_proj = camera().build_view_projection_matrix();
        let [x, y] = project_to_screen(view_proj, Vector3::zero(), [800.0, 600.0])
            .expect("target is visible");
        assert!((x - 400.0).abs() < 1e-2);
        assert!((y - 300.0).abs() < 1e-2);
    }

    #[test]
    fn test_points_behind_camera_are_skipped() {
        let view_proj = camera().build_view_projection_matrix();
        let behind = Vector3::new(16.0, 16.0, 16.0);
        assert_eq!(project_to_screen(view_proj, behind, [800.0, 600.0]), None);
    }

    #[test]
    fn test_higher_points_project_higher_on_screen() {
        let view_proj = camera().build_view_projection_matrix();
        let low = project_to_screen(view_proj, Vector3::new(0.0, 0.0, 0.0), [800.0, 600.0]);
        let high = project_to_screen(view_proj, Vector3::new(0.0, 2.5, 0.0), [800.0, 600.0]);
        assert!(high.expect("visible")[1] < low.expect("visible")[1]);
    }

    #[test]
    fn test_uniform_default_is_identity() {
        let uniform = CameraUniform::default();
        assert_eq!(uniform.view_proj[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(uniform.view_proj[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
