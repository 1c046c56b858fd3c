//! Building the board for the configured [`PlayMode`]
//!
//! Both front ends (window and terminal) start from the same [`ModeSetup`].

use super::error::{CoreError, CoreResult};
use super::settings::{BoardSettings, PlayMode};
use crate::game::{BoardController, HttpBotClient, OpeningCatalog, TrainingSession};
use crate::rendering::Orientation;
use tracing::info;

/// Board, bot and trainer for one run
#[derive(Debug)]
pub enum ModeSetup {
    /// Both sides moved by hand
    Viewer(BoardController),
    /// User against the bot; call `restart` once so the bot opens when the
    /// user plays Black
    Bot {
        controller: BoardController,
        client: HttpBotClient,
    },
    Trainer(TrainingSession),
}

impl ModeSetup {
    pub fn from_settings(settings: &BoardSettings) -> CoreResult<Self> {
        let orientation = Orientation::from_flipped(settings.flipped);
        info!("[SETTINGS] Starting in {:?} mode", settings.mode);

        match settings.mode {
            PlayMode::Viewer => {
                let mut controller = BoardController::new();
                controller.set_orientation(orientation);
                Ok(ModeSetup::Viewer(controller))
            }
            PlayMode::Bot => {
                let client =
                    HttpBotClient::new(settings.bot_endpoint.clone(), settings.request_timeout())?;
                let mut controller = BoardController::with_opponent(settings.search_depth);
                controller.set_orientation(orientation);
                Ok(ModeSetup::Bot { controller, client })
            }
            PlayMode::Trainer => {
                let catalog = OpeningCatalog::load(&settings.openings_path)?;
                let opening = settings
                    .opening
                    .as_deref()
                    .filter(|name| catalog.contains(name))
                    .or_else(|| catalog.names().next())
                    .map(str::to_string)
                    .ok_or_else(|| CoreError::NoOpenings {
                        path: settings.openings_path.display().to_string(),
                    })?;
                let mut session = TrainingSession::new(catalog, &opening, &mut rand::rng())?;
                if orientation.is_flipped() {
                    session.flip();
                }
                Ok(ModeSetup::Trainer(session))
            }
        }
    }

    pub fn mode(&self) -> PlayMode {
        match self {
            ModeSetup::Viewer(_) => PlayMode::Viewer,
            ModeSetup::Bot { .. } => PlayMode::Bot,
            ModeSetup::Trainer(_) => PlayMode::Trainer,
        }
    }
}
