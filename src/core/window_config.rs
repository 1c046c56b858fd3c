//! Window configuration resource
//!
//! The window holds the board canvas plus the side panel, so its size follows
//! the configured board size.

use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowResolution};

/// Width of the egui side panel in logical pixels
pub const PANEL_WIDTH: f32 = 300.0;

/// Margin around the board in logical pixels
pub const BOARD_MARGIN: f32 = 20.0;

/// Configuration for the primary application window
#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct WindowConfig {
    pub title: String,
    /// Board edge length in logical pixels
    pub board_size: f32,
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::for_board(640.0)
    }
}

impl WindowConfig {
    pub fn for_board(board_size: f32) -> Self {
        Self {
            title: "Boardbot".to_string(),
            board_size,
            resizable: false,
        }
    }

    /// Window size in logical pixels
    pub fn size(&self) -> (u32, u32) {
        let width = self.board_size + PANEL_WIDTH + 2.0 * BOARD_MARGIN;
        let height = self.board_size + 2.0 * BOARD_MARGIN;
        (width.round() as u32, height.round() as u32)
    }

    /// Create a Bevy Window from this configuration
    pub fn to_window(&self) -> Window {
        let (width, height) = self.size();
        Window {
            title: self.title.clone(),
            resolution: WindowResolution::new(width, height),
            resizable: self.resizable,
            present_mode: PresentMode::AutoVsync,
            ..default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_fits_board_and_panel() {
        let config = WindowConfig::for_board(640.0);
        assert_eq!(config.size(), (980, 680));
    }
}
