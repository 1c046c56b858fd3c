//! Core module - configuration and application infrastructure
//!
//! # Module Organization
//!
//! - `settings` - [`BoardSettings`], persisted as JSON in the platform config dir
//! - `cli` - [`Cli`] flags that override settings for one run
//! - `window_config` - [`WindowConfig`] sized around the board and side panel
//! - `mode` - [`ModeSetup`], the board/bot/trainer for the configured mode
//! - `error` - [`CoreError`]
//!
//! The [`CorePlugin`] registers the window config and saves settings whenever
//! they change.

pub mod cli;
pub mod error;
pub mod mode;
pub mod settings;
pub mod window_config;

pub use cli::Cli;
pub use error::{CoreError, CoreResult};
pub use mode::ModeSetup;
pub use settings::{load_settings, save_settings_system, settings_path, BoardSettings, PlayMode};
pub use window_config::WindowConfig;

use bevy::prelude::*;

/// Settings persistence and window configuration
///
/// Settings inserted before the plugin is added are kept; otherwise defaults
/// are used.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BoardSettings>()
            .init_resource::<WindowConfig>()
            .register_type::<WindowConfig>()
            .add_systems(Last, save_settings_system);
    }
}
