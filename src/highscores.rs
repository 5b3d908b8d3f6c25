//! High score leaderboard system
//!
//! Persisted as a bare JSON array of `{name, score}` under one key, top 5 only.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_HIGH_SCORES;
use crate::error::StoreError;
use crate::persistence::{self, KeyValueStore};

/// Name recorded when the player leaves the prompt empty
pub const DEFAULT_PLAYER_NAME: &str = "Player";

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    /// Player's name
    pub name: String,
    /// Final score
    pub score: u64,
}

/// High score leaderboard, always sorted by score (highest first)
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "highScores";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build from arbitrary entries, restoring order and the size cap
    pub fn from_entries(entries: Vec<ScoreEntry>) -> Self {
        let mut scores = Self { entries };
        scores.normalize();
        scores
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Check if a score would make it onto the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Ties with the lowest entry lose: the older entry keeps its place
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Append a score, re-sort, and keep the top entries.
    /// Returns the rank achieved (1-indexed) or None if it fell off the end.
    pub fn submit(&mut self, name: &str, score: u64) -> Option<usize> {
        let name = name.trim();
        let name = if name.is_empty() {
            DEFAULT_PLAYER_NAME
        } else {
            name
        };

        let entry = ScoreEntry {
            name: name.to_string(),
            score,
        };

        // Insert after any equal scores, same order a stable sort would give
        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_HIGH_SCORES);
    }

    /// Load high scores; missing or malformed data means no high scores
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match persistence::load_json::<Vec<ScoreEntry>>(store, Self::STORAGE_KEY) {
            Some(entries) => {
                log::info!("Loaded {} high scores", entries.len());
                Self::from_entries(entries)
            }
            None => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
        }
    }

    /// Save high scores
    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), StoreError> {
        persistence::save_json(store, Self::STORAGE_KEY, self)?;
        log::info!("High scores saved ({} entries)", self.entries.len());
        Ok(())
    }
}
