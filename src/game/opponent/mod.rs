//! Bot opponent collaborator
//!
//! The bot is a remote service: it receives the position as FEN plus a search
//! depth and answers with one move in algebraic notation. The controller never
//! talks to the network itself. It hands out an [`OpponentRequest`] ticket,
//! something else runs the request (a Bevy compute task in the window, a
//! direct call in the terminal), and the answer goes back through
//! [`BoardController::resolve_opponent`].
//!
//! # Architecture
//!
//! - [`OpponentMoveProvider`]: the seam; [`HttpBotClient`] is the real implementation
//! - [`resolve_with`]: runs one request synchronously and feeds the answer back
//! - [`OpponentError`]: every way the bot can fail, all recoverable

pub mod http;

pub use http::{HttpBotClient, DEFAULT_BOT_ENDPOINT};

use super::controller::{BoardController, OpponentOutcome, OpponentRequest};
use super::depth::SearchDepth;
use super::error::GameResult;

/// Errors returned by the bot or while interpreting its answer
#[derive(Debug, thiserror::Error)]
pub enum OpponentError {
    /// The request never produced a response
    #[error("Bot unreachable: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with a non-success status
    #[error("Bot answered with HTTP {status}")]
    Status { status: u16 },

    /// The answer does not denote a legal move in the requested position
    #[error("Bot answered '{response}', which is not a legal move")]
    Unparseable { response: String },
}

/// Result type alias for bot calls
pub type OpponentResult<T> = Result<T, OpponentError>;

/// Something that can choose a move for a position
///
/// Implementations block until the move is known; callers that must stay
/// responsive run them on a worker.
pub trait OpponentMoveProvider: Send + Sync {
    /// Return one move in algebraic notation for `fen`, searched to `depth`
    fn request_move(&self, fen: &str, depth: SearchDepth) -> OpponentResult<String>;
}

/// Run `request` against `provider` and apply the answer to `controller`
pub fn resolve_with<P>(
    controller: &mut BoardController,
    provider: &P,
    request: &OpponentRequest,
) -> GameResult<OpponentOutcome>
where
    P: OpponentMoveProvider + ?Sized,
{
    let response = provider.request_move(&request.fen, request.depth);
    controller.resolve_opponent(request.ticket, response)
}
