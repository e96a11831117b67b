//! Top-level application errors.

use stardrift_config::ConfigError;
use stardrift_render::RenderContextError;

/// Errors that abort the flythrough.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be loaded or written.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// GPU or surface initialization failed.
    #[error("render initialization failed: {0}")]
    Init(#[from] RenderContextError),

    /// The event loop could not be created or run.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// An unrecoverable runtime failure (lost device, out of memory).
    #[error("runtime failure: {0}")]
    Runtime(String),
}
