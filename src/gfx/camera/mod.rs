pub mod camera_controller;
pub mod camera_utils;
pub mod orbit_camera;

pub use camera_controller::CameraController;
pub use camera_utils::{project_to_screen, Camera, CameraManager, CameraUniform};
pub use orbit_camera::{OrbitCamera, OrbitCameraBounds};
