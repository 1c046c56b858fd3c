//! Opening trainer
//!
//! - `catalog` - named openings loaded from JSON
//! - `session` - shuffled drill over one opening with scoring and feedback

pub mod catalog;
pub mod session;

pub use catalog::{CatalogError, CatalogResult, OpeningCatalog};
pub use session::{
    TrainerFeedback, TrainerPhase, TrainerStep, TrainingSession, Verdict, FEEDBACK_DELAY,
};

use crate::game::error::GameError;

/// Errors returned by a training session
#[derive(Debug, thiserror::Error)]
pub enum TrainerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error("Feedback is still showing")]
    ShowingFeedback,

    #[error("Every position of this opening has been answered")]
    Completed,
}

/// Result type alias for trainer operations
pub type TrainerResult<T> = Result<T, TrainerError>;
