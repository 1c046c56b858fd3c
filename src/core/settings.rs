//! User settings and their persistence
//!
//! [`BoardSettings`] is stored as pretty JSON in the platform config
//! directory, e.g. `~/.config/boardbot/settings.json`, falling back to
//! `settings.json` in the working directory when no config dir exists.
//!
//! Load failures fall back to defaults; save failures are logged and never
//! interrupt play.

use super::error::{CoreError, CoreResult};
use crate::game::SearchDepth;
use crate::game::opponent::DEFAULT_BOT_ENDPOINT;
use crate::rendering::BoardTheme;
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings filename
const SETTINGS_FILENAME: &str = "settings.json";

/// Which capability layer the board runs with
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PlayMode {
    /// Move both sides by hand
    Viewer,
    /// Play against the remote bot
    #[default]
    Bot,
    /// Drill openings from the catalog
    Trainer,
}

/// Persisted user preferences
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardSettings {
    pub mode: PlayMode,
    /// URL of the bot service
    pub bot_endpoint: String,
    pub search_depth: SearchDepth,
    pub request_timeout_secs: u64,
    /// Start with Black at the bottom
    pub flipped: bool,
    /// Opening catalog JSON
    pub openings_path: PathBuf,
    /// Opening to drill first; the first catalog entry when unset
    pub opening: Option<String>,
    pub board_theme: BoardTheme,
    /// Board edge length in logical pixels
    pub board_size: f32,
    /// 0.0 - 1.0
    pub master_volume: f32,
    pub highlight_last_move: bool,
    /// Log filter for the window build, e.g. `info,boardbot=debug`
    pub log_filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            mode: PlayMode::default(),
            bot_endpoint: DEFAULT_BOT_ENDPOINT.to_string(),
            search_depth: SearchDepth::default(),
            request_timeout_secs: 30,
            flipped: false,
            openings_path: PathBuf::from("assets/openings.json"),
            opening: None,
            board_theme: BoardTheme::default(),
            board_size: 640.0,
            master_volume: 0.8,
            highlight_last_move: true,
            log_filter: "info,wgpu=error,naga=warn".to_string(),
        }
    }
}

impl BoardSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let mut settings: BoardSettings = serde_json::from_str(json)?;
        settings.master_volume = settings.master_volume.clamp(0.0, 1.0);
        Ok(settings)
    }

    /// Read settings from `path`
    pub fn read_from(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Write settings to `path`, creating the directory if needed
    pub fn write_to(&self, path: &Path) -> CoreResult<()> {
        let parent = path.parent().ok_or_else(|| CoreError::SettingsPath {
            path: path.display().to_string(),
        })?;
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// Resolve the settings file path
pub fn settings_path() -> PathBuf {
    if let Some(proj_dirs) = ProjectDirs::from("dev", "boardbot", "boardbot") {
        proj_dirs.config_dir().join(SETTINGS_FILENAME)
    } else {
        PathBuf::from(SETTINGS_FILENAME)
    }
}

/// Load settings from the config dir, or defaults
pub fn load_settings() -> BoardSettings {
    let path = settings_path();
    if !path.exists() {
        info!("[SETTINGS] No settings file found at {:?}. Using defaults.", path);
        return BoardSettings::default();
    }
    match BoardSettings::read_from(&path) {
        Ok(settings) => {
            info!("[SETTINGS] Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!(
                "[SETTINGS] Failed to load settings at {:?}: {}. Using defaults.",
                path, e
            );
            BoardSettings::default()
        }
    }
}

/// Save settings when they change
///
/// The first frame is skipped: inserting the resource marks it changed, and
/// command-line overrides should not be written back on their own.
pub fn save_settings_system(settings: Res<BoardSettings>) {
    if !settings.is_changed() || settings.is_added() {
        return;
    }
    let path = settings_path();
    match settings.write_to(&path) {
        Ok(()) => info!("[SETTINGS] Saved settings to {:?}", path),
        Err(e) => error!("[SETTINGS] Failed to save settings at {:?}: {}", path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings = BoardSettings::from_json(r#"{ "flipped": true }"#).unwrap();
        assert!(settings.flipped);
        assert_eq!(settings.search_depth, SearchDepth::default());
        assert_eq!(settings.bot_endpoint, DEFAULT_BOT_ENDPOINT);
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let settings =
            BoardSettings::from_json(r#"{ "search_depth": 42, "master_volume": 3.0 }"#).unwrap();
        assert_eq!(settings.search_depth.get(), 9);
        assert_eq!(settings.master_volume, 1.0);
    }

    #[test]
    fn test_mode_names() {
        let settings = BoardSettings::from_json(r#"{ "mode": "trainer" }"#).unwrap();
        assert_eq!(settings.mode, PlayMode::Trainer);
        assert!(BoardSettings::from_json(r#"{ "mode": "arcade" }"#).is_err());
    }

    #[test]
    fn test_write_then_read() {
        let dir = std::env::temp_dir().join(format!("boardbot-settings-{}", std::process::id()));
        let path = dir.join(SETTINGS_FILENAME);
        let settings = BoardSettings {
            mode: PlayMode::Viewer,
            master_volume: 0.25,
            ..Default::default()
        };

        settings.write_to(&path).unwrap();
        assert_eq!(BoardSettings::read_from(&path).unwrap(), settings);
        let _ = fs::remove_dir_all(&dir);
    }
}
