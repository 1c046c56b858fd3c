//! Board interaction controller
//!
//! Owns the position, the move history, the orientation flag and the input
//! gate. Every mutation of the board goes through a method on
//! [`BoardController`]; front ends (the Bevy systems, the terminal loop, the
//! trainer) only call these methods and read the results.
//!
//! # State machine
//!
//! ```text
//!            submit_move                 resolve_opponent
//! [Idle] ──────────────> [PlayerMoving] ──> [WaitingOnOpponent] ──> [Idle]
//!   ^                          │                                      │
//!   └──────────────────────────┘ (no opponent attached)               │
//!                                                                     v
//!                          [GameOver] <── terminal position after any applied move
//! ```
//!
//! `GameOver` only leaves through [`BoardController::restart`].
//!
//! # Opponent requests
//!
//! When an opponent is attached, a successful human move closes the gate and
//! returns an [`OpponentRequest`]. The request carries a ticket; only the
//! answer to the outstanding ticket is applied, so answers that arrive after a
//! restart are dropped. A failed or unusable answer re-opens the gate and
//! leaves the position as it was.

use super::cue::SoundCue;
use super::depth::SearchDepth;
use super::error::{GameError, GameResult};
use super::history::{HistoryEntry, MoveHistory};
use super::opponent::OpponentError;
use crate::rendering::{Highlight, HighlightTone, Orientation};
use bevy::prelude::Resource;
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{Board, CastlingMode, Chess, Color, EnPassantMode, Move, Position, Role, Square};
use std::fmt;
use tracing::{debug, info, warn};

/// Input gate of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Waiting for a move from the user
    Idle,
    /// A human move is being validated and applied
    PlayerMoving,
    /// A request to the bot is outstanding
    WaitingOnOpponent(RequestPurpose),
    /// The position is terminal; only restart is accepted
    GameOver(GameEnd),
}

/// Why the bot was asked for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPurpose {
    /// Play the answer as the opponent's reply
    Reply,
    /// Only highlight the answer for the user
    Hint,
}

/// How a finished game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEnd {
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
}

impl fmt::Display for GameEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEnd::Checkmate {
                winner: Color::White,
            } => f.write_str("Checkmate, White wins"),
            GameEnd::Checkmate {
                winner: Color::Black,
            } => f.write_str("Checkmate, Black wins"),
            GameEnd::Stalemate => f.write_str("Stalemate"),
            GameEnd::InsufficientMaterial => f.write_str("Draw by insufficient material"),
        }
    }
}

/// Text shown in the move input field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    EnterMove,
    InvalidMove,
    OpponentThinking,
    OpponentFailed(String),
    Finished(GameEnd),
}

impl Prompt {
    /// Whether the prompt reports a problem and should be drawn in red
    pub fn is_error(&self) -> bool {
        matches!(self, Prompt::InvalidMove | Prompt::OpponentFailed(_))
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prompt::EnterMove => f.write_str("Enter your move here"),
            Prompt::InvalidMove => f.write_str("Invalid Move"),
            Prompt::OpponentThinking => f.write_str("Bot is thinking..."),
            Prompt::OpponentFailed(reason) => write!(f, "Bot failed: {reason}"),
            Prompt::Finished(end) => write!(f, "{end}"),
        }
    }
}

/// A move after it has been applied to the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    /// SAN including check/mate suffix
    pub san: String,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Role>,
    pub gives_check: bool,
    /// Side that played the move
    pub color: Color,
    pub cue: SoundCue,
}

/// Ticket for one outstanding call to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpponentRequest {
    pub ticket: u64,
    /// Position to search, as FEN
    pub fen: String,
    pub depth: SearchDepth,
    pub purpose: RequestPurpose,
}

/// Result of a successful human move
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub applied: AppliedMove,
    /// Set when the bot has to answer this move
    pub request: Option<OpponentRequest>,
}

/// Result of a bot answer that was accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpponentOutcome {
    /// The answer was played as the opponent's move
    Replied(AppliedMove),
    /// The answer was highlighted as a suggestion
    Hinted(Highlight),
}

#[derive(Debug, Clone, Copy)]
struct OpponentSeat {
    depth: SearchDepth,
    /// Side the human plays; the bot plays the other one
    human: Color,
}

/// Single owner of the position and everything derived from it
#[derive(Resource, Debug, Clone)]
pub struct BoardController {
    position: Chess,
    /// Position before each applied ply, parallel to `history`
    snapshots: Vec<Chess>,
    history: MoveHistory,
    orientation: Orientation,
    state: PlayState,
    highlight: Option<Highlight>,
    prompt: Prompt,
    seat: Option<OpponentSeat>,
    pending: Option<OpponentRequest>,
    next_ticket: u64,
}

impl Default for BoardController {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardController {
    /// Board without an opponent: moves for both sides come from the user
    pub fn new() -> Self {
        Self {
            position: Chess::default(),
            snapshots: Vec::new(),
            history: MoveHistory::default(),
            orientation: Orientation::default(),
            state: PlayState::Idle,
            highlight: None,
            prompt: Prompt::EnterMove,
            seat: None,
            pending: None,
            next_ticket: 0,
        }
    }

    /// Board where the user plays White against the bot
    pub fn with_opponent(depth: SearchDepth) -> Self {
        Self {
            seat: Some(OpponentSeat {
                depth,
                human: Color::White,
            }),
            ..Self::new()
        }
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    /// Current position as FEN
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == PlayState::Idle
    }

    /// Squares to recolor on the next redraw
    pub fn highlight(&self) -> Option<Highlight> {
        self.highlight
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn has_opponent(&self) -> bool {
        self.seat.is_some()
    }

    /// Depth sent with bot requests, `None` without an opponent
    pub fn depth(&self) -> Option<SearchDepth> {
        self.seat.map(|seat| seat.depth)
    }

    /// Side the user plays against the bot
    pub fn human_color(&self) -> Option<Color> {
        self.seat.map(|seat| seat.human)
    }

    /// Idle with the bot on move, e.g. after a failed reply or a take-back
    /// past one; [`Self::retry_opponent`] asks it again
    pub fn awaits_opponent(&self) -> bool {
        self.state == PlayState::Idle
            && self
                .seat
                .is_some_and(|seat| self.position.turn() != seat.human)
    }

    pub fn pending_request(&self) -> Option<&OpponentRequest> {
        self.pending.as_ref()
    }

    /// Set the bot depth, clamped to the accepted range
    pub fn set_depth(&mut self, value: i64) -> SearchDepth {
        let depth = SearchDepth::clamped(value);
        if let Some(seat) = self.seat.as_mut() {
            seat.depth = depth;
        }
        depth
    }

    /// Terminal condition of the current position, if any
    pub fn game_end(&self) -> Option<GameEnd> {
        if self.position.is_checkmate() {
            Some(GameEnd::Checkmate {
                winner: self.position.turn().other(),
            })
        } else if self.position.is_stalemate() {
            Some(GameEnd::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(GameEnd::InsufficientMaterial)
        } else {
            None
        }
    }

    /// SAN of every legal move in the current position
    pub fn legal_moves_san(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| SanPlus::from_move(self.position.clone(), m).to_string())
            .collect()
    }

    /// Resolve typed SAN to a legal move
    ///
    /// Only the canonical SAN of a legal move is accepted, with its `+`/`#`
    /// suffix or without one. A wrong suffix, coordinate notation or
    /// redundant disambiguation is rejected.
    pub fn parse_move(&self, notation: &str) -> GameResult<Move> {
        let trimmed = notation.trim();
        let illegal = || GameError::IllegalMove {
            notation: trimmed.to_string(),
        };
        let m = self.san_to_move(trimmed).ok_or_else(illegal)?;

        let canonical = SanPlus::from_move(self.position.clone(), &m);
        if trimmed == canonical.to_string() || trimmed == canonical.san.to_string() {
            Ok(m)
        } else {
            Err(illegal())
        }
    }

    fn san_to_move(&self, notation: &str) -> Option<Move> {
        notation
            .parse::<SanPlus>()
            .ok()
            .and_then(|san| san.san.to_move(&self.position).ok())
    }

    /// Bot answers may be loose SAN or coordinate notation (`e2e4`)
    fn parse_opponent_move(&self, response: &str) -> Result<Move, OpponentError> {
        let trimmed = response.trim();
        self.san_to_move(trimmed)
            .or_else(|| {
                trimmed
                    .parse::<UciMove>()
                    .ok()
                    .and_then(|uci| uci.to_move(&self.position).ok())
            })
            .ok_or_else(|| OpponentError::Unparseable {
                response: trimmed.to_string(),
            })
    }

    /// Validate and play a move typed by the user
    ///
    /// Rejected without any change while the gate is closed. An illegal move
    /// switches the prompt to "Invalid Move" and leaves position and history
    /// untouched.
    pub fn submit_move(&mut self, notation: &str) -> GameResult<MoveOutcome> {
        if self.state != PlayState::Idle {
            debug!("[BOARD] Ignoring '{}' while {:?}", notation, self.state);
            return Err(GameError::NotAcceptingInput { state: self.state });
        }
        if let Some(seat) = self.seat {
            if self.position.turn() != seat.human {
                return Err(GameError::NotYourTurn);
            }
        }

        let m = match self.parse_move(notation) {
            Ok(m) => m,
            Err(e) => {
                info!("[BOARD] Rejected move '{}'", notation.trim());
                self.prompt = Prompt::InvalidMove;
                return Err(e);
            }
        };

        self.state = PlayState::PlayerMoving;
        let applied = self.apply(&m);
        self.settle();

        let request = match (self.state, self.seat) {
            (PlayState::Idle, Some(_)) => Some(self.open_request(RequestPurpose::Reply)),
            _ => None,
        };

        Ok(MoveOutcome { applied, request })
    }

    /// Ask the bot for the best move for the side to move, without playing it
    pub fn request_hint(&mut self) -> GameResult<OpponentRequest> {
        if self.seat.is_none() {
            return Err(GameError::NoOpponent);
        }
        if self.state != PlayState::Idle {
            return Err(GameError::NotAcceptingInput { state: self.state });
        }
        Ok(self.open_request(RequestPurpose::Hint))
    }

    /// Ask the bot again after a failed reply left it on move
    pub fn retry_opponent(&mut self) -> GameResult<OpponentRequest> {
        let Some(seat) = self.seat else {
            return Err(GameError::NoOpponent);
        };
        if self.state != PlayState::Idle {
            return Err(GameError::NotAcceptingInput { state: self.state });
        }
        if self.position.turn() == seat.human {
            return Err(GameError::NotYourTurn);
        }
        Ok(self.open_request(RequestPurpose::Reply))
    }

    /// Feed the bot's answer for `ticket` back into the board
    ///
    /// On any failure the gate re-opens, the prompt reports the failure, and
    /// the position is unchanged.
    pub fn resolve_opponent(
        &mut self,
        ticket: u64,
        response: Result<String, OpponentError>,
    ) -> GameResult<OpponentOutcome> {
        let purpose = match self.pending.as_ref() {
            Some(pending) if pending.ticket == ticket => pending.purpose,
            _ => {
                debug!("[BOT] Dropping answer for stale ticket {}", ticket);
                return Err(GameError::StaleResponse { ticket });
            }
        };
        self.pending = None;

        let m = match response.and_then(|text| self.parse_opponent_move(&text)) {
            Ok(m) => m,
            Err(e) => return Err(self.fail_opponent(e)),
        };

        match purpose {
            RequestPurpose::Reply => {
                let applied = self.apply(&m);
                self.settle();
                Ok(OpponentOutcome::Replied(applied))
            }
            RequestPurpose::Hint => {
                let hint = Highlight {
                    from: m.from().unwrap_or_else(|| m.to()),
                    to: m.to(),
                    tone: HighlightTone::Default,
                };
                self.highlight = Some(hint);
                self.state = PlayState::Idle;
                self.prompt = Prompt::EnterMove;
                Ok(OpponentOutcome::Hinted(hint))
            }
        }
    }

    /// Reset to the standard starting position
    ///
    /// Allowed from every state; an outstanding bot request becomes stale.
    /// When the board is flipped and a bot is attached the user plays Black,
    /// so the returned request asks the bot for White's first move.
    pub fn restart(&mut self) -> Option<OpponentRequest> {
        info!("[BOARD] Restart");
        self.reset_to(Chess::default());

        let seat = self.seat.as_mut()?;
        seat.human = self.orientation.bottom_color();
        if seat.human == Color::Black {
            Some(self.open_request(RequestPurpose::Reply))
        } else {
            None
        }
    }

    /// Replace the position with `fen`, clearing history
    pub fn load_fen(&mut self, fen: &str) -> GameResult<()> {
        let invalid = |message: String| GameError::InvalidPosition {
            fen: fen.to_string(),
            message,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        self.reset_to(position);
        Ok(())
    }

    /// Undo the last full turn (two plies)
    ///
    /// Returns `Ok(false)` without changes when fewer than two plies exist.
    /// Only allowed while idle; a finished game has to be restarted.
    pub fn take_back(&mut self) -> GameResult<bool> {
        if self.state != PlayState::Idle {
            return Err(GameError::NotAcceptingInput { state: self.state });
        }
        if self.history.len() < 2 {
            return Ok(false);
        }
        self.pop_ply();
        self.pop_ply();
        self.state = PlayState::Idle;
        self.prompt = Prompt::EnterMove;
        info!("[BOARD] Took back one turn, {} plies remain", self.history.len());
        Ok(true)
    }

    /// Undo only the last ply; used by the trainer to revert a wrong answer
    pub fn revert_last_ply(&mut self) -> bool {
        if !self.pop_ply() {
            return false;
        }
        self.state = PlayState::Idle;
        self.prompt = Prompt::EnterMove;
        true
    }

    /// Mirror the rendering; the position is not touched
    pub fn flip(&mut self) {
        self.orientation = self.orientation.flipped();
        debug!("[BOARD] Orientation now {:?}", self.orientation);
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
    }

    /// Recolor the current highlight, e.g. green/red for trainer feedback
    pub fn set_highlight_tone(&mut self, tone: HighlightTone) {
        if let Some(highlight) = self.highlight.as_mut() {
            highlight.tone = tone;
        }
    }

    fn apply(&mut self, m: &Move) -> AppliedMove {
        let color = self.position.turn();
        let number = self.position.fullmoves().get();
        let from = m.from().unwrap_or_else(|| m.to());
        let to = m.to();
        let captured = m.capture();

        self.snapshots.push(self.position.clone());
        let san = SanPlus::from_move_and_play_unchecked(&mut self.position, m).to_string();
        let gives_check = self.position.is_check();
        let cue = SoundCue::select(gives_check, captured.is_some());

        self.history.push(HistoryEntry {
            number,
            color,
            san: san.clone(),
            from,
            to,
        });
        self.highlight = Some(Highlight {
            from,
            to,
            tone: HighlightTone::Default,
        });
        info!("[BOARD] {:?} played {} ({:?})", color, san, cue);

        AppliedMove {
            san,
            from,
            to,
            captured,
            gives_check,
            color,
            cue,
        }
    }

    /// Leave `PlayerMoving`/`WaitingOnOpponent` after a move was applied
    fn settle(&mut self) {
        match self.game_end() {
            Some(end) => {
                info!("[BOARD] Game over: {}", end);
                self.state = PlayState::GameOver(end);
                self.prompt = Prompt::Finished(end);
            }
            None => {
                self.state = PlayState::Idle;
                self.prompt = Prompt::EnterMove;
            }
        }
    }

    fn open_request(&mut self, purpose: RequestPurpose) -> OpponentRequest {
        let depth = self.seat.map(|seat| seat.depth).unwrap_or_default();
        let request = OpponentRequest {
            ticket: self.next_ticket,
            fen: self.fen(),
            depth,
            purpose,
        };
        self.next_ticket += 1;
        self.state = PlayState::WaitingOnOpponent(purpose);
        self.prompt = Prompt::OpponentThinking;
        self.pending = Some(request.clone());
        debug!("[BOT] Opened ticket {} ({:?})", request.ticket, purpose);
        request
    }

    fn fail_opponent(&mut self, error: OpponentError) -> GameError {
        warn!("[BOT] {}", error);
        self.state = PlayState::Idle;
        self.prompt = Prompt::OpponentFailed(error.to_string());
        GameError::Opponent(error)
    }

    fn pop_ply(&mut self) -> bool {
        let Some(previous) = self.snapshots.pop() else {
            return false;
        };
        self.position = previous;
        self.history.pop();
        self.highlight = self.history.last().map(|entry| Highlight {
            from: entry.from,
            to: entry.to,
            tone: HighlightTone::Default,
        });
        true
    }

    fn reset_to(&mut self, position: Chess) {
        self.position = position;
        self.snapshots.clear();
        self.history.clear();
        self.highlight = None;
        self.pending = None;
        self.prompt = Prompt::EnterMove;
        self.state = match self.game_end() {
            Some(end) => PlayState::GameOver(end),
            None => PlayState::Idle,
        };
    }
}
