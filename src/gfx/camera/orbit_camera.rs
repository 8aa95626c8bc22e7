use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Camera orbiting a target on a sphere, Y up.
///
/// `pitch` is the elevation above the horizontal plane, so the polar angle
/// measured from the vertical axis is `π/2 - pitch`.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // recomputed by `update()`
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: Rad(std::f32::consts::FRAC_PI_3),
            znear: 0.1,
            zfar: 1000.0,
            uniform: CameraUniform::default(),
        };
        camera.update();
        camera
    }

    /// Places the camera at `eye` looking at `target`, then applies `bounds`
    pub fn looking_at(
        eye: Vector3<f32>,
        target: Vector3<f32>,
        bounds: OrbitCameraBounds,
        aspect: f32,
    ) -> Self {
        let offset = eye - target;
        let distance = offset.magnitude();
        let pitch = (offset.y / distance).asin();
        let yaw = offset.x.atan2(offset.z);

        let mut camera = Self::new(distance, pitch, yaw, target, aspect);
        camera.bounds = bounds;
        camera.set_distance(distance);
        camera.set_pitch(pitch);
        camera
    }

    pub fn with_projection(mut self, fovy: Rad<f32>, znear: f32, zfar: f32) -> Self {
        self.fovy = fovy;
        self.znear = znear;
        self.zfar = zfar;
        self
    }

    /// Angle between the view direction from the target and the vertical axis
    pub fn polar_angle(&self) -> f32 {
        std::f32::consts::FRAC_PI_2 - self.pitch
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.0 + f32::EPSILON)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Moves eye and target together in the view plane.
    /// `delta.0` is horizontal, `delta.1` vertical, both scaled by distance.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let pan_scale = self.distance * 0.1;
        let movement = right * delta.0 * pan_scale + up * delta.1 * pan_scale;

        self.target += movement;
        self.update();
    }

    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    pub fn resize_projection(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height.max(1) as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: None,
            min_pitch: -std::f32::consts::FRAC_PI_2 + 1e-3,
            max_pitch: std::f32::consts::FRAC_PI_2 - 1e-3,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn bounded() -> OrbitCameraBounds {
        OrbitCameraBounds {
            min_distance: Some(5.0),
            max_distance: Some(20.0),
            min_pitch: 0.1,
            max_pitch: FRAC_PI_2 - 1e-3,
            ..OrbitCameraBounds::default()
        }
    }

    #[test]
    fn test_looking_at_reproduces_eye() {
        let camera = OrbitCamera::looking_at(
            Vector3::new(8.0, 8.0, 8.0),
            Vector3::zero(),
            bounded(),
            1.5,
        );
        assert!((camera.eye - Vector3::new(8.0, 8.0, 8.0)).magnitude() < 1e-4);
        assert!((camera.distance - 192f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_distance_is_clamped() {
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(8.0, 8.0, 8.0), Vector3::zero(), bounded(), 1.0);
        camera.set_distance(1.0);
        assert_eq!(camera.distance, 5.0);
        camera.set_distance(100.0);
        assert_eq!(camera.distance, 20.0);
        for _ in 0..200 {
            camera.add_distance(-3.0);
        }
        assert!(camera.distance >= 5.0);
    }

    #[test]
    fn test_camera_never_goes_below_the_floor_plane() {
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(8.0, 8.0, 8.0), Vector3::zero(), bounded(), 1.0);
        camera.add_pitch(-10.0);
        assert!(camera.polar_angle() <= FRAC_PI_2 - 0.1 + 1e-6);
        assert!(camera.eye.y > 0.0);
        camera.add_pitch(10.0);
        assert!(camera.polar_angle() >= 0.0);
    }

    #[test]
    fn test_pan_moves_target_and_keeps_offset() {
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(8.0, 8.0, 8.0), Vector3::zero(), bounded(), 1.0);
        let offset = camera.eye - camera.target;
        camera.pan((1.0, 0.5));
        assert!(camera.target.magnitude() > 0.0);
        assert!((camera.eye - camera.target - offset).magnitude() < 1e-4);
    }

    #[test]
    fn test_view_projection_maps_target_to_centre() {
        let mut camera =
            OrbitCamera::looking_at(Vector3::new(8.0, 8.0, 8.0), Vector3::zero(), bounded(), 1.0);
        camera.update_view_proj();
        let clip = camera.build_view_projection_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
        assert_eq!(camera.uniform.view_position[3], 1.0);
    }
}
