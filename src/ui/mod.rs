//! # User Interface
//!
//! Dear ImGui overlays drawn on top of the 3D scene:
//!
//! - [`UiManager`] - imgui context, winit platform and wgpu renderer
//! - [`panel`] - title, room list and the control panel
//! - [`labels`] - room names projected to the screen each frame
//!
//! Window events go to the [`UiManager`] first; the camera only sees the ones
//! the UI did not capture.

pub mod labels;
pub mod manager;
pub mod panel;

pub use labels::{draw_labels, project_labels, ScreenLabel};
pub use manager::UiManager;
pub use panel::{control_buttons, floorplan_overlay, ControlButton};
