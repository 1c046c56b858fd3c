//! Audio cue selection for applied moves
//!
//! Exactly one cue is played per applied move. Check wins over capture and
//! capture wins over a quiet move.

/// Which sound accompanies an applied move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Quiet move
    Move,
    /// A piece was taken
    Capture,
    /// The side to move is now in check
    Check,
}

impl SoundCue {
    /// Pick the cue for a move by priority: check, then capture, then quiet
    pub fn select(gives_check: bool, is_capture: bool) -> Self {
        if gives_check {
            SoundCue::Check
        } else if is_capture {
            SoundCue::Capture
        } else {
            SoundCue::Move
        }
    }

    /// Asset path of the clip, relative to the asset root
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundCue::Move => "sounds/move.mp3",
            SoundCue::Capture => "sounds/capture.mp3",
            SoundCue::Check => "sounds/check.mp3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_beats_capture() {
        assert_eq!(SoundCue::select(true, true), SoundCue::Check);
        assert_eq!(SoundCue::select(true, false), SoundCue::Check);
    }

    #[test]
    fn test_capture_beats_quiet() {
        assert_eq!(SoundCue::select(false, true), SoundCue::Capture);
        assert_eq!(SoundCue::select(false, false), SoundCue::Move);
    }
}
