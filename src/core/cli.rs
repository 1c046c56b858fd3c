//! Command-line flags
//!
//! Every flag is optional and overrides the persisted [`BoardSettings`] for
//! this run only.

use super::settings::{BoardSettings, PlayMode};
use crate::game::SearchDepth;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Capability layer to start in
    #[arg(long, value_enum)]
    pub mode: Option<PlayMode>,

    /// Bot service URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bot search depth (clamped to 0-9)
    #[arg(long, allow_negative_numbers = true)]
    pub depth: Option<i64>,

    /// Start with Black at the bottom
    #[arg(long)]
    pub flip: bool,

    /// Opening catalog JSON file
    #[arg(long)]
    pub openings: Option<PathBuf>,

    /// Opening to drill first
    #[arg(long)]
    pub opening: Option<String>,

    /// Play in the terminal instead of opening a window
    #[arg(long)]
    pub headless: bool,

    /// Log filter, e.g. `info,boardbot=debug`
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Overlay the flags that were given onto `settings`
    pub fn apply(&self, settings: &mut BoardSettings) {
        if let Some(mode) = self.mode {
            settings.mode = mode;
        }
        if let Some(endpoint) = &self.endpoint {
            settings.bot_endpoint = endpoint.clone();
        }
        if let Some(depth) = self.depth {
            settings.search_depth = SearchDepth::clamped(depth);
        }
        if self.flip {
            settings.flipped = true;
        }
        if let Some(path) = &self.openings {
            settings.openings_path = path.clone();
        }
        if let Some(opening) = &self.opening {
            settings.opening = Some(opening.clone());
        }
        if let Some(filter) = &self.log_filter {
            settings.log_filter = filter.clone();
        }
    }
}
