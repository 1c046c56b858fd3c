//! Integration tests for the Bevy wiring
//!
//! Runs [`BoardLogicPlugin`] under `MinimalPlugins`: commands go in as
//! messages, bot answers come back from the async compute pool, and the
//! trainer clock is driven by a manual time step.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use boardbot::app::{insert_mode, BoardCommand, BoardLogicPlugin, CuePlayed, OpponentLink};
use boardbot::core::{BoardSettings, ModeSetup};
use boardbot::game::opponent::OpponentResult;
use boardbot::game::{
    BoardController, OpeningCatalog, OpponentMoveProvider, SearchDepth, SoundCue,
    TrainerPhase, TrainingSession,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

/// Bot that always answers the same move
struct FixedBot(&'static str);

impl OpponentMoveProvider for FixedBot {
    fn request_move(&self, _fen: &str, _depth: SearchDepth) -> OpponentResult<String> {
        Ok(self.0.to_string())
    }
}

fn logic_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins).add_plugins(BoardLogicPlugin);
    app
}

fn send(app: &mut App, command: BoardCommand) {
    app.world_mut().write_message(command);
    app.update();
}

/// Update until `done` holds or give up after a few seconds
fn update_until(app: &mut App, done: impl Fn(&World) -> bool) {
    for _ in 0..500 {
        app.update();
        if done(app.world()) {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("condition not reached");
}

#[test]
fn test_viewer_moves_both_sides() {
    let mut app = logic_app();
    insert_mode(&mut app, ModeSetup::Viewer(BoardController::new()));
    app.update();

    send(&mut app, BoardCommand::Submit("e4".into()));
    send(&mut app, BoardCommand::Submit("e5".into()));
    send(&mut app, BoardCommand::Submit("Ke3".into()));

    let controller = app.world().resource::<BoardController>();
    assert_eq!(controller.history().lines(), vec!["1. e4", "1... e5"]);
    assert_eq!(controller.prompt().to_string(), "Invalid Move");
}

#[test]
fn test_bot_reply_arrives_from_task() {
    let mut app = logic_app();
    app.insert_resource(BoardController::with_opponent(SearchDepth::default()))
        .insert_resource(OpponentLink::new(FixedBot("c5")));
    app.update();

    send(&mut app, BoardCommand::Submit("e4".into()));

    update_until(&mut app, |world| {
        world.resource::<BoardController>().history().len() == 2
    });
    let controller = app.world().resource::<BoardController>();
    assert_eq!(controller.history().lines(), vec!["1. e4", "1... c5"]);
    assert!(controller.is_idle());
}

#[test]
fn test_cues_are_announced() {
    let mut app = logic_app();
    insert_mode(&mut app, ModeSetup::Viewer(BoardController::new()));
    app.update();

    for notation in ["e4", "d5", "exd5"] {
        app.world_mut()
            .write_message(BoardCommand::Submit(notation.into()));
    }
    app.update();

    let cues: Vec<SoundCue> = app
        .world_mut()
        .resource_mut::<Messages<CuePlayed>>()
        .drain()
        .map(|CuePlayed(cue)| cue)
        .collect();
    assert_eq!(cues, vec![SoundCue::Move, SoundCue::Move, SoundCue::Capture]);
}

#[test]
fn test_depth_command_updates_settings() {
    let mut app = logic_app();
    app.insert_resource(BoardController::with_opponent(SearchDepth::default()));
    app.update();

    send(&mut app, BoardCommand::SetDepth(15));

    let depth = app.world().resource::<BoardController>().depth();
    assert_eq!(depth.map(|d| d.get()), Some(9));
    assert_eq!(app.world().resource::<BoardSettings>().search_depth.get(), 9);
}

#[test]
fn test_trainer_feedback_expires_on_clock() {
    let mut catalog = OpeningCatalog::default();
    catalog.insert(
        "Open Game",
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        "e5",
    );
    catalog.insert(
        "Open Game",
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
        "Nf3",
    );
    let session =
        TrainingSession::new(catalog, "Open Game", &mut StdRng::seed_from_u64(1)).unwrap();

    let mut app = logic_app();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(300)));
    insert_mode(&mut app, ModeSetup::Trainer(session));
    app.update();

    send(&mut app, BoardCommand::Skip);
    assert!(matches!(
        app.world().resource::<TrainingSession>().phase(),
        TrainerPhase::Feedback { .. }
    ));

    update_until(&mut app, |world| {
        world.resource::<TrainingSession>().phase() == TrainerPhase::Prompting
    });
    assert_eq!(app.world().resource::<TrainingSession>().progress(), (2, 2));
}
