//! Error types for core module
//!
//! Settings persistence and start-up errors.

use crate::game::trainer::{CatalogError, TrainerError};
use crate::game::OpponentError;
use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Opening catalog could not be loaded
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Training session could not start
    #[error(transparent)]
    Trainer(#[from] TrainerError),

    /// Bot client could not be built
    #[error(transparent)]
    Opponent(#[from] OpponentError),

    /// Trainer mode with a catalog that has no openings
    #[error("No openings in {path}")]
    NoOpenings { path: String },

    /// No usable location for the settings file
    #[error("Settings path has no parent directory: {path}")]
    SettingsPath { path: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
