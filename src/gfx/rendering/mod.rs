// src/gfx/rendering/mod.rs
//! Core rendering functionality
//!
//! Pipelines are registered by name with the [`PipelineManager`]; the
//! [`RenderEngine`] owns the surface and records the passes of each frame.

pub mod pipeline_manager;
pub mod render_engine;

pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::{FrameStatus, RenderEngine, RenderSettings};
