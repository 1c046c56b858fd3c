//! Board command handling
//!
//! The panel (and tests) write [`BoardCommand`]s; [`handle_board_commands`]
//! routes them to the training session when one exists, otherwise to the
//! [`BoardController`]. Sounds are requested through [`CuePlayed`] so the
//! logic runs without audio.

use super::tasks::{spawn_opponent_request, OpponentLink};
use crate::core::BoardSettings;
use crate::game::{
    BoardController, GameError, SoundCue, TrainerError, TrainerPhase, TrainerStep,
    TrainingSession,
};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

/// User intent, written by the panel
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum BoardCommand {
    /// A move in algebraic notation
    Submit(String),
    /// Ask the bot for the best move without playing it
    RequestHint,
    /// Ask the bot again after it failed to reply
    RetryOpponent,
    Restart,
    TakeBack,
    Flip,
    /// Trainer: show the answer
    Skip,
    /// Trainer: drill this opening
    SelectOpening(String),
    /// Bot search depth; clamped to 0..=9
    SetDepth(i64),
}

/// A move was applied and its sound should play
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuePlayed(pub SoundCue);

/// Whichever board is on screen: the trainer's or the free/bot board
#[derive(SystemParam)]
pub struct ActiveBoard<'w> {
    pub session: Option<Res<'w, TrainingSession>>,
    pub controller: Option<Res<'w, BoardController>>,
}

impl ActiveBoard<'_> {
    pub fn get(&self) -> Option<&BoardController> {
        match (&self.session, &self.controller) {
            (Some(session), _) => Some(session.board()),
            (None, Some(controller)) => Some(controller),
            (None, None) => None,
        }
    }

    pub fn is_changed(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.is_changed())
            || self.controller.as_ref().is_some_and(|c| c.is_changed())
    }
}

/// Apply every queued [`BoardCommand`]
pub fn handle_board_commands(
    mut commands: Commands,
    mut reader: MessageReader<BoardCommand>,
    mut cues: MessageWriter<CuePlayed>,
    session: Option<ResMut<TrainingSession>>,
    controller: Option<ResMut<BoardController>>,
    link: Option<Res<OpponentLink>>,
    mut settings: ResMut<BoardSettings>,
) {
    if let Some(mut session) = session {
        for command in reader.read() {
            apply_to_session(&mut session, command, &mut cues, &mut settings);
        }
        return;
    }

    let Some(mut controller) = controller else {
        reader.clear();
        return;
    };
    for command in reader.read() {
        apply_to_controller(
            &mut commands,
            &mut controller,
            link.as_deref(),
            command,
            &mut cues,
            &mut settings,
        );
    }
}

fn apply_to_controller(
    commands: &mut Commands,
    controller: &mut BoardController,
    link: Option<&OpponentLink>,
    command: &BoardCommand,
    cues: &mut MessageWriter<CuePlayed>,
    settings: &mut ResMut<BoardSettings>,
) {
    let request = match command {
        BoardCommand::Submit(notation) => match controller.submit_move(notation) {
            Ok(outcome) => {
                cues.write(CuePlayed(outcome.applied.cue));
                outcome.request
            }
            Err(e) => {
                debug!("[BOARD] {}", e);
                None
            }
        },
        BoardCommand::RequestHint => log_rejected(controller.request_hint()),
        BoardCommand::RetryOpponent => log_rejected(controller.retry_opponent()),
        BoardCommand::Restart => controller.restart(),
        BoardCommand::TakeBack => {
            if let Err(e) = controller.take_back() {
                debug!("[BOARD] {}", e);
            }
            None
        }
        BoardCommand::Flip => {
            controller.flip();
            None
        }
        BoardCommand::SetDepth(value) => {
            settings.search_depth = controller.set_depth(*value);
            None
        }
        BoardCommand::Skip | BoardCommand::SelectOpening(_) => {
            debug!("[BOARD] {:?} only applies to the trainer", command);
            None
        }
    };

    if let Some(request) = request {
        spawn_opponent_request(commands, link, request);
    }
}

fn log_rejected<T>(result: Result<T, GameError>) -> Option<T> {
    result
        .map_err(|e| debug!("[BOARD] {}", e))
        .ok()
}

fn apply_to_session(
    session: &mut TrainingSession,
    command: &BoardCommand,
    cues: &mut MessageWriter<CuePlayed>,
    settings: &mut ResMut<BoardSettings>,
) {
    let result = match command {
        BoardCommand::Submit(notation) => session.attempt(notation).map(|feedback| {
            cues.write(CuePlayed(feedback.applied.cue));
        }),
        BoardCommand::Skip => session.skip().map(|feedback| {
            cues.write(CuePlayed(feedback.applied.cue));
        }),
        BoardCommand::Restart => {
            let opening = session.opening().to_string();
            session.select_opening(&opening, &mut rand::rng())
        }
        BoardCommand::SelectOpening(name) => {
            session.select_opening(name, &mut rand::rng()).map(|()| {
                settings.opening = Some(name.clone());
            })
        }
        BoardCommand::Flip => {
            session.flip();
            Ok(())
        }
        BoardCommand::RequestHint
        | BoardCommand::RetryOpponent
        | BoardCommand::TakeBack
        | BoardCommand::SetDepth(_) => {
            debug!("[TRAINER] {:?} is not available while training", command);
            Ok(())
        }
    };

    match result {
        Ok(()) => {}
        Err(TrainerError::Game(e)) => debug!("[TRAINER] {}", e),
        Err(e) => info!("[TRAINER] {}", e),
    }
}

/// Count down trainer feedback
pub fn tick_trainer(time: Res<Time>, session: Option<ResMut<TrainingSession>>) {
    let Some(mut session) = session else {
        return;
    };
    if !matches!(session.phase(), TrainerPhase::Feedback { .. }) {
        return;
    }
    match session.advance(time.delta()) {
        Some(TrainerStep::Completed) => {
            info!(
                "[TRAINER] Finished '{}', score {}",
                session.opening(),
                session.score()
            );
        }
        Some(step) => debug!("[TRAINER] {:?}", step),
        None => {}
    }
}
