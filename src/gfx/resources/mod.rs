//! GPU resource management
//!
//! Global uniforms, shadow map bindings and depth textures.

pub mod global_bindings;
pub mod texture_resource;

pub use global_bindings::{update_global_ubo, GlobalBindings, GlobalUBO, ShadowBindings};
pub use texture_resource::TextureResource;
