//! Opening catalog
//!
//! A JSON object mapping opening names to positions, each position (FEN)
//! mapped to the one move the trainee is expected to find:
//!
//! ```json
//! {
//!   "Italian Game": {
//!     "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3": "Bc4"
//!   }
//! }
//! ```
//!
//! Entries whose position does not parse or whose answer is not legal in
//! that position are dropped at load time with a warning, so the session can
//! assume every prompt is playable.

use crate::game::BoardController;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Errors raised while loading or querying the catalog
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown opening: {name}")]
    UnknownOpening { name: String },

    #[error("Opening '{name}' has no playable positions")]
    EmptyOpening { name: String },
}

/// Result type alias for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Named openings, each a map of FEN → correct continuation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OpeningCatalog {
    openings: BTreeMap<String, BTreeMap<String, String>>,
}

impl OpeningCatalog {
    /// Parse and validate a catalog from JSON text
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let raw: OpeningCatalog = serde_json::from_str(json)?;
        Ok(raw.validated())
    }

    /// Read and validate a catalog file
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let contents = fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        info!(
            "[TRAINER] Loaded {} openings from {:?}",
            catalog.len(),
            path
        );
        Ok(catalog)
    }

    /// Add or replace one prompt
    pub fn insert(&mut self, opening: &str, fen: &str, answer: &str) {
        self.openings
            .entry(opening.to_string())
            .or_default()
            .insert(fen.trim().to_string(), answer.trim().to_string());
    }

    /// Opening names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.openings.keys().map(String::as_str)
    }

    pub fn contains(&self, opening: &str) -> bool {
        self.openings.contains_key(opening)
    }

    /// Distinct positions of `opening`
    pub fn positions(&self, opening: &str) -> CatalogResult<Vec<String>> {
        let prompts = self
            .openings
            .get(opening)
            .ok_or_else(|| CatalogError::UnknownOpening {
                name: opening.to_string(),
            })?;
        if prompts.is_empty() {
            return Err(CatalogError::EmptyOpening {
                name: opening.to_string(),
            });
        }
        Ok(prompts.keys().cloned().collect())
    }

    /// Expected move for `fen` in `opening`
    pub fn answer(&self, opening: &str, fen: &str) -> Option<&str> {
        self.openings
            .get(opening)
            .and_then(|prompts| prompts.get(fen.trim()))
            .map(String::as_str)
    }

    /// Number of openings
    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    fn validated(self) -> Self {
        let mut checked = OpeningCatalog::default();
        let mut probe = BoardController::new();

        for (name, prompts) in self.openings {
            let mut kept = 0;
            for (fen, answer) in prompts {
                if let Err(e) = probe.load_fen(&fen) {
                    warn!("[TRAINER] Skipping position in '{}': {}", name, e);
                    continue;
                }
                if probe.parse_move(&answer).is_err() {
                    warn!(
                        "[TRAINER] Skipping '{}' in '{}': {} is not legal there",
                        fen, name, answer
                    );
                    continue;
                }
                checked.insert(&name, &fen, &answer);
                kept += 1;
            }
            if kept == 0 {
                warn!("[TRAINER] Opening '{}' has no playable positions", name);
                checked.openings.entry(name).or_default();
            }
        }
        checked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ITALIAN: &str =
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3";

    #[test]
    fn test_parse_and_lookup() {
        let json = format!(r#"{{ "Italian Game": {{ "{ITALIAN}": "Bc4" }} }}"#);
        let catalog = OpeningCatalog::from_json(&json).unwrap();

        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["Italian Game"]);
        assert_eq!(catalog.answer("Italian Game", ITALIAN), Some("Bc4"));
        assert_eq!(catalog.positions("Italian Game").unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let json = format!(
            r#"{{ "Italian Game": {{ "{ITALIAN}": "Bc4", "garbage": "e4", "{ITALIAN} ": "Ke3" }} }}"#
        );
        let catalog = OpeningCatalog::from_json(&json).unwrap();
        let positions = catalog.positions("Italian Game").unwrap();
        assert_eq!(positions, vec![ITALIAN.to_string()]);
        assert_eq!(catalog.answer("Italian Game", ITALIAN), Some("Bc4"));
    }

    #[test]
    fn test_unknown_and_empty_openings() {
        let catalog = OpeningCatalog::from_json(r#"{ "Empty": {} }"#).unwrap();
        assert!(matches!(
            catalog.positions("Missing"),
            Err(CatalogError::UnknownOpening { .. })
        ));
        assert!(matches!(
            catalog.positions("Empty"),
            Err(CatalogError::EmptyOpening { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            OpeningCatalog::from_json("[1, 2"),
            Err(CatalogError::Json(_))
        ));
    }
}
