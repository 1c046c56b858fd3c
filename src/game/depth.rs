//! Search depth forwarded to the bot service
//!
//! The bot endpoint accepts a depth between 0 and 9. Every value that reaches
//! the controller (UI drag value, CLI flag, settings file) goes through
//! [`SearchDepth::clamped`], so an out-of-range depth is never sent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest search the bot service accepts
pub const MAX_SEARCH_DEPTH: u8 = 9;

/// Depth used when nothing else is configured
pub const DEFAULT_SEARCH_DEPTH: u8 = 3;

/// Bot search depth, always within `0..=MAX_SEARCH_DEPTH`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u8")]
pub struct SearchDepth(u8);

impl SearchDepth {
    /// Clamp an arbitrary integer into the accepted range
    ///
    /// Values below zero become 0, values above [`MAX_SEARCH_DEPTH`] become
    /// [`MAX_SEARCH_DEPTH`], anything in between passes through unchanged.
    pub fn clamped(value: i64) -> Self {
        Self(value.clamp(0, i64::from(MAX_SEARCH_DEPTH)) as u8)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for SearchDepth {
    fn default() -> Self {
        Self(DEFAULT_SEARCH_DEPTH)
    }
}

impl From<i64> for SearchDepth {
    fn from(value: i64) -> Self {
        Self::clamped(value)
    }
}

impl From<SearchDepth> for u8 {
    fn from(depth: SearchDepth) -> Self {
        depth.0
    }
}

impl fmt::Display for SearchDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_depth_clamps_to_zero() {
        assert_eq!(SearchDepth::clamped(-1).get(), 0);
        assert_eq!(SearchDepth::clamped(i64::MIN).get(), 0);
    }

    #[test]
    fn test_large_depth_clamps_to_nine() {
        assert_eq!(SearchDepth::clamped(10).get(), 9);
        assert_eq!(SearchDepth::clamped(i64::MAX).get(), 9);
    }

    #[test]
    fn test_in_range_depth_passes_through() {
        for value in 0..=9 {
            assert_eq!(SearchDepth::clamped(value).get() as i64, value);
        }
    }

    #[test]
    fn test_settings_value_is_clamped_on_load() {
        let depth: SearchDepth = serde_json::from_str("42").unwrap();
        assert_eq!(depth.get(), 9);

        let json = serde_json::to_string(&SearchDepth::clamped(4)).unwrap();
        assert_eq!(json, "4");
    }
}
