//! Chess game logic module
//!
//! Everything that decides what happens on the board, with no window or
//! network code: the controller state machine, move history, sound cue
//! selection, the bot collaborator seam and the opening trainer.
//!
//! # Module Organization
//!
//! - `controller` - [`BoardController`], the single owner of the position
//! - `history` - ordered log of played plies
//! - `cue` - which sound accompanies an applied move
//! - `depth` - bot search depth, clamped to 0..=9
//! - `opponent` - bot provider trait and the HTTP client
//! - `trainer` - opening catalog and training session
//! - `error` - [`GameError`]
//!
//! # Capability layers
//!
//! - Viewer: `BoardController::new()`
//! - Versus bot: `BoardController::with_opponent(depth)` plus an [`OpponentMoveProvider`]
//! - Trainer: [`TrainingSession`], which owns a viewer controller and a catalog

pub mod controller;
pub mod cue;
pub mod depth;
pub mod error;
pub mod history;
pub mod opponent;
pub mod trainer;

pub use controller::{
    AppliedMove, BoardController, GameEnd, MoveOutcome, OpponentOutcome, OpponentRequest,
    PlayState, Prompt, RequestPurpose,
};
pub use cue::SoundCue;
pub use depth::{SearchDepth, DEFAULT_SEARCH_DEPTH, MAX_SEARCH_DEPTH};
pub use error::{GameError, GameResult};
pub use history::{HistoryEntry, MoveHistory};
pub use opponent::{resolve_with, HttpBotClient, OpponentError, OpponentMoveProvider};
pub use trainer::{
    OpeningCatalog, TrainerError, TrainerFeedback, TrainerPhase, TrainerStep, TrainingSession,
    Verdict, FEEDBACK_DELAY,
};
