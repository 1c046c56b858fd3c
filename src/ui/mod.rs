//! egui user interface
//!
//! - `panel` - the side panel next to the board
//! - `colors` - panel palette

pub mod colors;
pub mod panel;

pub use panel::{board_panel_system, MoveInput};
