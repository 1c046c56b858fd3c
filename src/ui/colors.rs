//! Color palette for the side panel

use bevy_egui::egui;

/// Panel colors
pub struct UiColors;

impl UiColors {
    /// Panel background
    pub const BG_DARK: egui::Color32 = egui::Color32::from_rgb(20, 20, 25);

    /// Invalid move and bot failures
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(220, 50, 50);

    /// Headings
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(240, 240, 245);

    /// Body text
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(200, 200, 205);

    /// Hints
    pub const TEXT_TERTIARY: egui::Color32 = egui::Color32::from_rgb(150, 150, 155);
}
