//! 2D chess board driven by typed algebraic notation
//!
//! Three ways to use the board:
//!
//! - viewer: enter moves for both sides
//! - bot: play against a remote engine that answers with one move per request
//! - trainer: find the book move in shuffled positions of an opening
//!
//! [`game`] holds the rules-facing logic and [`rendering`] the pure board
//! renderer. [`app`] and [`ui`] put both in a Bevy window, [`headless`] in a
//! terminal. [`core`] loads settings and command-line flags.

pub mod app;
pub mod core;
pub mod game;
pub mod headless;
pub mod rendering;
pub mod ui;
