//! Move sounds
//!
//! One clip per [`SoundCue`]. Each cue spawns a one-shot player that
//! despawns itself when the clip ends.

use super::systems::CuePlayed;
use crate::core::BoardSettings;
use crate::game::SoundCue;
use bevy::audio::{AudioPlayer, AudioSource, PlaybackSettings, Volume};
use bevy::prelude::*;

/// Handles for the three move sounds
#[derive(Resource, Clone)]
pub struct CueSounds {
    pub move_piece: Handle<AudioSource>,
    pub capture: Handle<AudioSource>,
    pub check: Handle<AudioSource>,
}

impl CueSounds {
    pub fn new(asset_server: &AssetServer) -> Self {
        Self {
            move_piece: asset_server.load(SoundCue::Move.asset_path()),
            capture: asset_server.load(SoundCue::Capture.asset_path()),
            check: asset_server.load(SoundCue::Check.asset_path()),
        }
    }

    pub fn handle(&self, cue: SoundCue) -> Handle<AudioSource> {
        match cue {
            SoundCue::Move => self.move_piece.clone(),
            SoundCue::Capture => self.capture.clone(),
            SoundCue::Check => self.check.clone(),
        }
    }
}

pub fn load_cue_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(CueSounds::new(&asset_server));
}

/// Play a clip for every applied move
pub fn play_cues(
    mut commands: Commands,
    mut cues: MessageReader<CuePlayed>,
    sounds: Option<Res<CueSounds>>,
    settings: Res<BoardSettings>,
) {
    let Some(sounds) = sounds else {
        cues.clear();
        return;
    };
    for CuePlayed(cue) in cues.read() {
        if settings.master_volume <= 0.0 {
            continue;
        }
        commands.spawn((
            AudioPlayer::new(sounds.handle(*cue)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(settings.master_volume)),
        ));
    }
}
