//! Rendering module - 2D board frames independent of the window backend
//!
//! The renderer is a pure function of the board, the orientation and the
//! highlight. It produces a [`Frame`] of fill/sprite commands that the Bevy
//! view turns into sprites, and that tests can inspect directly.
//!
//! # Architecture
//!
//! - `layout` - square ↔ tile mapping, canvas size and display scale
//! - `theme` - square and highlight colors
//! - `frame` - draw commands and the [`render`] function

pub mod frame;
pub mod layout;
pub mod theme;

pub use frame::{render, BoardView, DrawCommand, Frame, Highlight, HighlightTone, PieceSprite};
pub use layout::{CanvasLayout, Orientation, Rect};
pub use theme::{BoardTheme, Rgba};
