//! Bevy application layer
//!
//! The domain types live in [`crate::game`] and know nothing about the ECS
//! beyond `Resource` derives. This module connects them to Bevy:
//!
//! - `systems` - [`BoardCommand`] handling and the trainer clock
//! - `tasks` - bot requests on the async compute pool
//! - `sprites` - frame to sprite conversion
//! - `sounds` - move sounds
//! - `plugin` - [`BoardLogicPlugin`] and [`BoardViewPlugin`]

pub mod plugin;
pub mod sounds;
pub mod sprites;
pub mod systems;
pub mod tasks;

pub use plugin::{insert_mode, BoardLogicPlugin, BoardSystems, BoardViewPlugin};
pub use systems::{ActiveBoard, BoardCommand, CuePlayed};
pub use tasks::{OpponentLink, PendingOpponentMove};
