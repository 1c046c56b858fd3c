//! Opening training session
//!
//! Walks through the positions of one opening in shuffled order. For each
//! prompt the trainee enters a move:
//!
//! - right answer: score +1, green highlight, next prompt after [`FEEDBACK_DELAY`]
//! - wrong answer: red highlight, the move is taken back after [`FEEDBACK_DELAY`]
//! - skip: the expected move is shown in green, next prompt after [`FEEDBACK_DELAY`]
//!
//! Time is supplied by the caller through [`TrainingSession::advance`], so
//! the session runs the same under Bevy's clock and in tests.
//!
//! When the last prompt has been answered the session is `Completed` and
//! accepts no more answers until an opening is selected again.

use super::catalog::OpeningCatalog;
use super::{TrainerError, TrainerResult};
use crate::game::controller::{AppliedMove, BoardController};
use crate::rendering::HighlightTone;
use bevy::prelude::Resource;
use rand::seq::SliceRandom;
use rand::Rng;
use shakmaty::san::SanPlus;
use std::time::Duration;
use tracing::{info, warn};

/// How long feedback stays on the board before the session moves on
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1000);

/// Judgement of one answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    Skipped,
}

impl Verdict {
    pub fn tone(self) -> HighlightTone {
        match self {
            Verdict::Correct | Verdict::Skipped => HighlightTone::Correct,
            Verdict::Incorrect => HighlightTone::Incorrect,
        }
    }
}

/// Where the session is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerPhase {
    /// Waiting for an answer
    Prompting,
    /// Showing feedback; the deferred step runs when `remaining` reaches zero
    Feedback { verdict: Verdict, remaining: Duration },
    /// Every position of the opening has been answered
    Completed,
}

/// Result of an accepted answer or skip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainerFeedback {
    pub verdict: Verdict,
    pub applied: AppliedMove,
}

/// What [`TrainingSession::advance`] did once feedback expired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrainerStep {
    /// A wrong answer was taken back; same prompt again
    Reverted,
    /// The next position is on the board
    NextPrompt,
    /// No positions left
    Completed,
}

/// Opening drill over a catalog
#[derive(Resource, Debug, Clone)]
pub struct TrainingSession {
    catalog: OpeningCatalog,
    opening: String,
    order: Vec<String>,
    index: usize,
    board: BoardController,
    score: u32,
    phase: TrainerPhase,
}

impl TrainingSession {
    /// Start drilling `opening` with a freshly shuffled order
    pub fn new<R: Rng + ?Sized>(
        catalog: OpeningCatalog,
        opening: &str,
        rng: &mut R,
    ) -> TrainerResult<Self> {
        let mut session = Self {
            catalog,
            opening: String::new(),
            order: Vec::new(),
            index: 0,
            board: BoardController::new(),
            score: 0,
            phase: TrainerPhase::Completed,
        };
        session.select_opening(opening, rng)?;
        Ok(session)
    }

    /// Switch to `opening` (or restart the current one) with a new shuffle
    ///
    /// The score carries over between openings.
    pub fn select_opening<R: Rng + ?Sized>(
        &mut self,
        opening: &str,
        rng: &mut R,
    ) -> TrainerResult<()> {
        let mut order = self.catalog.positions(opening)?;
        order.shuffle(rng);

        info!(
            "[TRAINER] Drilling '{}' with {} positions",
            opening,
            order.len()
        );
        self.opening = opening.to_string();
        self.order = order;
        self.index = 0;
        self.phase = TrainerPhase::Prompting;
        self.load_current()
    }

    pub fn catalog(&self) -> &OpeningCatalog {
        &self.catalog
    }

    pub fn opening(&self) -> &str {
        &self.opening
    }

    pub fn board(&self) -> &BoardController {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn phase(&self) -> TrainerPhase {
        self.phase
    }

    /// (1-based prompt number, number of prompts)
    pub fn progress(&self) -> (usize, usize) {
        ((self.index + 1).min(self.order.len()), self.order.len())
    }

    /// FEN of the position being asked
    pub fn current_position(&self) -> Option<&str> {
        self.order.get(self.index).map(String::as_str)
    }

    /// Expected move for the position being asked
    pub fn current_answer(&self) -> Option<&str> {
        self.current_position()
            .and_then(|fen| self.catalog.answer(&self.opening, fen))
    }

    pub fn flip(&mut self) {
        self.board.flip();
    }

    /// Judge and play the trainee's move
    ///
    /// Illegal notation is rejected by the board with no state change.
    pub fn attempt(&mut self, notation: &str) -> TrainerResult<TrainerFeedback> {
        self.ensure_prompting()?;
        let expected = self.expected_san()?;

        let outcome = self.board.submit_move(notation)?;
        let verdict = if outcome.applied.san == expected {
            self.score += 1;
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        info!(
            "[TRAINER] {} for {} (expected {}), score {}",
            match verdict {
                Verdict::Correct => "Correct",
                _ => "Incorrect",
            },
            outcome.applied.san,
            expected,
            self.score
        );

        Ok(self.show_feedback(verdict, outcome.applied))
    }

    /// Play the expected move for the trainee and move on
    pub fn skip(&mut self) -> TrainerResult<TrainerFeedback> {
        self.ensure_prompting()?;
        let answer = self
            .current_answer()
            .ok_or(TrainerError::Completed)?
            .to_string();
        let outcome = self.board.submit_move(&answer)?;
        info!("[TRAINER] Skipped, answer was {}", outcome.applied.san);
        Ok(self.show_feedback(Verdict::Skipped, outcome.applied))
    }

    /// Let `elapsed` time pass; runs the deferred step once feedback expires
    pub fn advance(&mut self, elapsed: Duration) -> Option<TrainerStep> {
        let TrainerPhase::Feedback { verdict, remaining } = self.phase else {
            return None;
        };
        let remaining = remaining.saturating_sub(elapsed);
        if !remaining.is_zero() {
            self.phase = TrainerPhase::Feedback { verdict, remaining };
            return None;
        }

        match verdict {
            Verdict::Incorrect => {
                self.board.revert_last_ply();
                self.phase = TrainerPhase::Prompting;
                Some(TrainerStep::Reverted)
            }
            Verdict::Correct | Verdict::Skipped => Some(self.next_prompt()),
        }
    }

    fn show_feedback(&mut self, verdict: Verdict, applied: AppliedMove) -> TrainerFeedback {
        self.board.set_highlight_tone(verdict.tone());
        self.phase = TrainerPhase::Feedback {
            verdict,
            remaining: FEEDBACK_DELAY,
        };
        TrainerFeedback { verdict, applied }
    }

    fn next_prompt(&mut self) -> TrainerStep {
        loop {
            self.index += 1;
            if self.index >= self.order.len() {
                info!("[TRAINER] '{}' completed, score {}", self.opening, self.score);
                self.phase = TrainerPhase::Completed;
                return TrainerStep::Completed;
            }
            match self.load_current() {
                Ok(()) => {
                    self.phase = TrainerPhase::Prompting;
                    return TrainerStep::NextPrompt;
                }
                Err(e) => warn!("[TRAINER] Skipping unloadable prompt: {}", e),
            }
        }
    }

    fn load_current(&mut self) -> TrainerResult<()> {
        let fen = self
            .current_position()
            .ok_or(TrainerError::Completed)?
            .to_string();
        self.board.load_fen(&fen)?;
        Ok(())
    }

    fn expected_san(&self) -> TrainerResult<String> {
        let answer = self.current_answer().ok_or(TrainerError::Completed)?;
        let m = self.board.parse_move(answer)?;
        Ok(SanPlus::from_move(self.board.position().clone(), &m).to_string())
    }

    fn ensure_prompting(&self) -> TrainerResult<()> {
        match self.phase {
            TrainerPhase::Prompting => Ok(()),
            TrainerPhase::Feedback { .. } => Err(TrainerError::ShowingFeedback),
            TrainerPhase::Completed => Err(TrainerError::Completed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const AFTER_E4: &str = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1";
    const AFTER_E4_E5: &str = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";

    fn session() -> TrainingSession {
        let mut catalog = OpeningCatalog::default();
        catalog.insert("King's Pawn", AFTER_E4, "e5");
        catalog.insert("King's Pawn", AFTER_E4_E5, "Nf3");
        TrainingSession::new(catalog, "King's Pawn", &mut StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn test_starts_prompting_first_shuffled_position() {
        let s = session();
        assert_eq!(s.phase(), TrainerPhase::Prompting);
        assert_eq!(s.progress(), (1, 2));
        assert_eq!(s.board().fen(), s.current_position().unwrap());
    }

    #[test]
    fn test_correct_answer_scores_and_advances() {
        let mut s = session();
        let answer = s.current_answer().unwrap().to_string();

        let feedback = s.attempt(&answer).unwrap();
        assert_eq!(feedback.verdict, Verdict::Correct);
        assert_eq!(s.score(), 1);
        assert_eq!(s.board().highlight().unwrap().tone, HighlightTone::Correct);

        assert_eq!(s.advance(Duration::from_millis(400)), None);
        assert_eq!(s.advance(Duration::from_millis(600)), Some(TrainerStep::NextPrompt));
        assert_eq!(s.progress(), (2, 2));
    }

    #[test]
    fn test_wrong_suffix_is_not_a_correct_answer() {
        let mut catalog = OpeningCatalog::default();
        catalog.insert("Open Game", AFTER_E4_E5, "Nf3");
        let mut s =
            TrainingSession::new(catalog, "Open Game", &mut StdRng::seed_from_u64(1)).unwrap();

        assert!(matches!(
            s.attempt("Nf3#"),
            Err(TrainerError::Game(GameError::IllegalMove { .. }))
        ));
        assert_eq!(s.score(), 0);
        assert_eq!(s.phase(), TrainerPhase::Prompting);
        assert_eq!(s.board().fen(), AFTER_E4_E5);

        assert_eq!(s.attempt("Nf3").unwrap().verdict, Verdict::Correct);
    }

    #[test]
    fn test_wrong_answer_reverts_after_delay() {
        let mut s = session();
        let before = s.board().fen();
        let wrong = if s.current_answer() == Some("e5") { "d5" } else { "d4" };

        let feedback = s.attempt(wrong).unwrap();
        assert_eq!(feedback.verdict, Verdict::Incorrect);
        assert_eq!(s.score(), 0);
        assert_eq!(s.board().highlight().unwrap().tone, HighlightTone::Incorrect);
        assert_ne!(s.board().fen(), before);

        assert!(matches!(
            s.attempt("a6"),
            Err(TrainerError::ShowingFeedback)
        ));
        assert_eq!(s.advance(FEEDBACK_DELAY), Some(TrainerStep::Reverted));
        assert_eq!(s.board().fen(), before);
        assert_eq!(s.progress(), (1, 2));
        assert_eq!(s.phase(), TrainerPhase::Prompting);
    }

    #[test]
    fn test_illegal_answer_is_ignored() {
        let mut s = session();
        let before = s.board().fen();
        assert!(matches!(s.attempt("Qxh7"), Err(TrainerError::Game(_))));
        assert_eq!(s.board().fen(), before);
        assert_eq!(s.phase(), TrainerPhase::Prompting);
    }

    #[test]
    fn test_skip_then_complete() {
        let mut s = session();
        let feedback = s.skip().unwrap();
        assert_eq!(feedback.verdict, Verdict::Skipped);
        assert_eq!(s.score(), 0);
        assert_eq!(s.advance(FEEDBACK_DELAY), Some(TrainerStep::NextPrompt));

        s.skip().unwrap();
        assert_eq!(s.advance(FEEDBACK_DELAY), Some(TrainerStep::Completed));
        assert_eq!(s.phase(), TrainerPhase::Completed);
        assert!(matches!(s.skip(), Err(TrainerError::Completed)));
    }

    #[test]
    fn test_reselecting_opening_restarts_order() {
        let mut s = session();
        let answer = s.current_answer().unwrap().to_string();
        s.attempt(&answer).unwrap();
        s.advance(FEEDBACK_DELAY);

        s.select_opening("King's Pawn", &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(s.progress(), (1, 2));
        assert_eq!(s.score(), 1);
    }
}
