//! Square ↔ tile mapping
//!
//! The canvas is a square of `size` logical pixels split into 8x8 tiles.
//! Tile `(col, row)` has its origin at the top-left corner, `row` growing
//! downwards. With White at the bottom, a8 is tile (0, 0) and h1 is (7, 7);
//! flipping mirrors both axes.

use serde::{Deserialize, Serialize};
use shakmaty::{Color, File, Rank, Square};

/// Which side is drawn at the bottom of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    WhiteBottom,
    BlackBottom,
}

impl Orientation {
    pub fn from_flipped(flipped: bool) -> Self {
        if flipped {
            Orientation::BlackBottom
        } else {
            Orientation::WhiteBottom
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::WhiteBottom => Orientation::BlackBottom,
            Orientation::BlackBottom => Orientation::WhiteBottom,
        }
    }

    pub fn is_flipped(self) -> bool {
        self == Orientation::BlackBottom
    }

    /// Color whose pieces start at the bottom edge
    pub fn bottom_color(self) -> Color {
        match self {
            Orientation::WhiteBottom => Color::White,
            Orientation::BlackBottom => Color::Black,
        }
    }

    /// Tile column and row for `square`
    pub fn tile_of(self, square: Square) -> (u32, u32) {
        let col = u32::from(square.file());
        let row = 7 - u32::from(square.rank());
        match self {
            Orientation::WhiteBottom => (col, row),
            Orientation::BlackBottom => (7 - col, 7 - row),
        }
    }

    /// Square drawn at tile `(col, row)`; both must be below 8
    pub fn square_at(self, col: u32, row: u32) -> Square {
        let (col, row) = match self {
            Orientation::WhiteBottom => (col, row),
            Orientation::BlackBottom => (7 - col, 7 - row),
        };
        Square::from_coords(File::new(col), Rank::new(7 - row))
    }
}

/// Axis-aligned rectangle in logical pixels, origin top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// Fixed drawing surface, scaled for high-density displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasLayout {
    /// Edge length in logical pixels
    pub size: f32,
    /// Physical pixels per logical pixel
    pub scale_factor: f32,
}

impl Default for CanvasLayout {
    fn default() -> Self {
        Self {
            size: 640.0,
            scale_factor: 1.0,
        }
    }
}

impl CanvasLayout {
    pub fn new(size: f32, scale_factor: f32) -> Self {
        Self {
            size,
            scale_factor: scale_factor.max(1.0),
        }
    }

    pub fn tile_size(&self) -> f32 {
        self.size / 8.0
    }

    /// Edge length of the backing surface in physical pixels
    pub fn physical_size(&self) -> u32 {
        (self.size * self.scale_factor).round() as u32
    }

    pub fn tile_rect(&self, col: u32, row: u32) -> Rect {
        let tile = self.tile_size();
        Rect {
            x: col as f32 * tile,
            y: row as f32 * tile,
            width: tile,
            height: tile,
        }
    }

    pub fn square_rect(&self, square: Square, orientation: Orientation) -> Rect {
        let (col, row) = orientation.tile_of(square);
        self.tile_rect(col, row)
    }

    /// Square under a logical-pixel point, if it is on the board
    pub fn square_at_point(&self, x: f32, y: f32, orientation: Orientation) -> Option<Square> {
        if x < 0.0 || y < 0.0 || x >= self.size || y >= self.size {
            return None;
        }
        let tile = self.tile_size();
        Some(orientation.square_at((x / tile) as u32, (y / tile) as u32))
    }
}
