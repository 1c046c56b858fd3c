//! Bevy plugins
//!
//! [`BoardLogicPlugin`] holds everything that changes the board: commands,
//! bot tasks and the trainer clock. It runs under `MinimalPlugins`.
//! [`BoardViewPlugin`] adds the camera, sprites, sounds and the side panel
//! on top of `DefaultPlugins` and `EguiPlugin`. Settings are only written
//! to disk when [`crate::core::CorePlugin`] is added as well.

use super::sounds::{load_cue_sounds, play_cues};
use super::sprites::{load_piece_images, redraw_board, spawn_camera};
use super::systems::{handle_board_commands, tick_trainer, BoardCommand, CuePlayed};
use super::tasks::{poll_opponent_task, OpponentLink};
use crate::core::{BoardSettings, ModeSetup};
use crate::ui::panel::{board_panel_system, MoveInput};
use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

/// System ordering within `Update`
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BoardSystems {
    /// Commands, bot answers and trainer timing
    Logic,
    /// Sprites and sounds
    Presentation,
}

/// Board state machine wiring
pub struct BoardLogicPlugin;

impl Plugin for BoardLogicPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardSettings>()
            .add_message::<BoardCommand>()
            .add_message::<CuePlayed>()
            .configure_sets(
                Update,
                (BoardSystems::Logic, BoardSystems::Presentation).chain(),
            )
            .add_systems(
                Update,
                (handle_board_commands, poll_opponent_task, tick_trainer)
                    .chain()
                    .in_set(BoardSystems::Logic),
            );
    }
}

/// Window front end
pub struct BoardViewPlugin;

impl Plugin for BoardViewPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MoveInput>()
            .add_systems(Startup, (spawn_camera, load_piece_images, load_cue_sounds))
            .add_systems(
                Update,
                (redraw_board, play_cues).in_set(BoardSystems::Presentation),
            )
            .add_systems(EguiPrimaryContextPass, board_panel_system);
    }
}

/// Insert the board resources for `setup`
///
/// Requires [`BoardLogicPlugin`]. In bot mode a restart is queued so the bot
/// opens the game when the user plays Black.
pub fn insert_mode(app: &mut App, setup: ModeSetup) {
    match setup {
        ModeSetup::Viewer(controller) => {
            app.insert_resource(controller);
        }
        ModeSetup::Bot { controller, client } => {
            app.insert_resource(controller)
                .insert_resource(OpponentLink::new(client));
            app.world_mut().write_message(BoardCommand::Restart);
        }
        ModeSetup::Trainer(session) => {
            app.insert_resource(session);
        }
    }
}
