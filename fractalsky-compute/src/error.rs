use fractalsky_color::PaletteError;
use fractalsky_core::{ConfigError, ParamError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Grid has {grid} pixels but the session buffers hold {buffers}")]
    SizeMismatch { grid: usize, buffers: usize },

    #[error(transparent)]
    Param(#[from] ParamError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Palette(#[from] PaletteError),
}

#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("Malformed worker request: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Param(#[from] ParamError),
}
