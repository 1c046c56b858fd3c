//! Board colors
//!
//! Colors are stored as plain sRGB bytes so the renderer stays independent of
//! the window backend; the Bevy view converts them with `Color::srgba_u8`.

use super::frame::HighlightTone;
use serde::{Deserialize, Serialize};

/// 8-bit sRGB color with alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }
}

/// Yellow used for the last move and for hints
pub const HIGHLIGHT_DEFAULT: Rgba = Rgba::rgb(0xfe, 0xe2, 0x58);
/// Trainer: the answer was right
pub const HIGHLIGHT_CORRECT: Rgba = Rgba::rgb(0x35, 0xde, 0x62);
/// Trainer: the answer was wrong
pub const HIGHLIGHT_INCORRECT: Rgba = Rgba::rgb(0xe8, 0x33, 0x17);

impl HighlightTone {
    pub fn color(self) -> Rgba {
        match self {
            HighlightTone::Default => HIGHLIGHT_DEFAULT,
            HighlightTone::Correct => HIGHLIGHT_CORRECT,
            HighlightTone::Incorrect => HIGHLIGHT_INCORRECT,
        }
    }
}

/// Board visual themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoardTheme {
    #[default]
    Walnut,
    Classic,
    Modern,
    Marble,
}

impl BoardTheme {
    pub const ALL: [BoardTheme; 4] = [
        BoardTheme::Walnut,
        BoardTheme::Classic,
        BoardTheme::Modern,
        BoardTheme::Marble,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BoardTheme::Walnut => "Walnut",
            BoardTheme::Classic => "Classic",
            BoardTheme::Modern => "Modern",
            BoardTheme::Marble => "Marble",
        }
    }

    /// Returns (light_square_color, dark_square_color)
    pub fn colors(&self) -> (Rgba, Rgba) {
        match self {
            BoardTheme::Walnut => (Rgba::rgb(0xeb, 0xd2, 0xb7), Rgba::rgb(0xa1, 0x6f, 0x5a)),
            BoardTheme::Classic => (Rgba::rgb(0xee, 0xee, 0xd2), Rgba::rgb(0x76, 0x96, 0x56)),
            BoardTheme::Modern => (Rgba::rgb(0xe6, 0xe6, 0xe6), Rgba::rgb(0x4d, 0x4d, 0x4d)),
            BoardTheme::Marble => (Rgba::rgb(0xf2, 0xf2, 0xf2), Rgba::rgb(0x26, 0x26, 0x26)),
        }
    }
}
