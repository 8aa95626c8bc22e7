// src/lib.rs
//! 3D Raumplan
//!
//! An interactive 3D floor plan of a modern European apartment, rendered with
//! wgpu and winit. Labels and floor and wall colours are switched from an
//! imgui control panel; the camera orbits the apartment with the mouse.
//!
//! The apartment itself ([`floorplan`]) is composed by pure functions from a
//! [`floorplan::DisplayState`], so everything except window and GPU setup is
//! testable without a display.

pub mod app;
pub mod config;
pub mod error;
pub mod floorplan;
pub mod gfx;
pub mod ui;
pub mod wgpu_utils;

pub use app::RaumplanApp;
pub use config::AppConfig;
pub use error::{RaumplanError, Result};

/// Creates the application with the default configuration
pub fn default() -> Result<RaumplanApp> {
    RaumplanApp::new(AppConfig::default())
}
