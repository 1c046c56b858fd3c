//! Move history log
//!
//! Keeps the ordered list of plies played on the board for display in the
//! side panel and the terminal front end. Entries are appended by the
//! controller after every applied move and only removed by a restart (clear)
//! or a take-back (pop).
//!
//! # Display
//!
//! White's plies render as `"1. e4"`, Black's as `"1... e5"`, numbered with
//! the full-move counter of the position the ply was played from.

use shakmaty::{Color, Square};
use std::fmt;

/// One played ply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Full-move number the ply belongs to (starts at 1)
    pub number: u32,
    /// Side that played the ply
    pub color: Color,
    /// SAN of the ply, including `+`/`#` suffixes
    pub san: String,
    /// Origin square, kept so a take-back can restore the previous highlight
    pub from: Square,
    /// Destination square
    pub to: Square,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.color {
            Color::White => write!(f, "{}. {}", self.number, self.san),
            Color::Black => write!(f, "{}... {}", self.number, self.san),
        }
    }
}

/// Chronological list of plies since the last reset
#[derive(Debug, Clone, Default)]
pub struct MoveHistory {
    entries: Vec<HistoryEntry>,
}

impl MoveHistory {
    pub fn push(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
    }

    /// Remove and return the most recent ply
    pub fn pop(&mut self) -> Option<HistoryEntry> {
        self.entries.pop()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// Number of plies recorded
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Display lines, one per ply
    pub fn lines(&self) -> Vec<String> {
        self.entries.iter().map(ToString::to_string).collect()
    }
}
