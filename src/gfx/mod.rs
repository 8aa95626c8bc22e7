//! # Graphics Module
//!
//! Everything between the composed scene graph and the pixels on screen.
//!
//! - **Scene** ([`scene`]) - scene graph nodes, materials and GPU objects
//! - **Geometry** ([`geometry`]) - procedural unit meshes for every primitive
//! - **Camera** ([`camera`]) - Y-up orbit camera and its mouse controller
//! - **Lighting** ([`lighting`]) - ambient, directional and point lights
//! - **Rendering** ([`rendering`]) - pipelines, shaders and the frame loop
//! - **Resources** ([`resources`]) - global uniforms, depth and shadow textures
//!
//! The [`RenderEngine`] never sees a [`scene::node::Group`] directly; the app
//! flattens the graph and uploads the resulting draw items when the display
//! state changes.

pub mod camera;
pub mod color;
pub mod geometry;
pub mod lighting;
pub mod rendering;
pub mod resources;
pub mod scene;

pub use camera::orbit_camera::OrbitCamera;
pub use color::Color;
pub use rendering::render_engine::RenderEngine;
