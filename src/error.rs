//! Error type for the library
//!
//! Composition is infallible. Everything here comes from window, GPU or UI setup
//! and per-frame presentation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RaumplanError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    RequestAdapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface reports no supported formats")]
    UnsupportedSurface,

    #[error("shader '{0}' is not loaded")]
    ShaderNotFound(String),

    #[error("pipeline '{0}' is not registered")]
    PipelineNotFound(String),

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    #[error("UI platform error: {0}")]
    UiPlatform(#[from] winit::error::ExternalError),

    #[error("UI render error: {0}")]
    UiRender(String),
}

pub type Result<T, E = RaumplanError> = std::result::Result<T, E>;
