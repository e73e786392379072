//! Top-level error for a render run.

use thiserror::Error;

use crate::application::use_cases::ReplayError;
use crate::config::ConfigError;
use crate::infrastructure::storage::{FillLogError, LoadError};

/// Any failure that ends a run.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Candle files could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The fill log could not be read.
    #[error(transparent)]
    FillLog(#[from] FillLogError),

    /// Rendering failed.
    #[error(transparent)]
    Replay(#[from] ReplayError),
}
