//! Completed game records
//!
//! Persisted to durable storage, keeps the ten fewest-move completions for
//! each board size.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::persistence::{Persistence, keys};

/// Maximum number of records kept per board size
pub const MAX_RECORDS: usize = 10;

/// A single completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Moves taken to clear the board
    pub moves: u32,
    /// Board size the game was played on
    pub pairs: usize,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Fewest-moves leaderboards, one per board size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Records {
    /// Sorted ascending by moves; each board size holds at most MAX_RECORDS
    pub entries: Vec<RecordEntry>,
    /// Every completion, recorded or not
    pub games_completed: u64,
}

impl Records {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records for one board size, fewest moves first
    pub fn entries_for(&self, pairs: usize) -> impl Iterator<Item = &RecordEntry> {
        self.entries.iter().filter(move |e| e.pairs == pairs)
    }

    /// Check if a result would make its board size's leaderboard
    pub fn qualifies(&self, moves: u32, pairs: usize) -> bool {
        let mut same_size = self.entries_for(pairs);
        match same_size.nth(MAX_RECORDS - 1) {
            Some(worst) => moves < worst.moves,
            None => true,
        }
    }

    /// Count a completed game and record it if it qualifies
    /// Returns the rank within its board size (1-indexed) or None if it didn't qualify
    pub fn add_result(&mut self, moves: u32, pairs: usize, timestamp: f64) -> Option<usize> {
        self.games_completed += 1;
        if !self.qualifies(moves, pairs) {
            return None;
        }

        // Ties go after existing entries
        let rank = self.entries_for(pairs).filter(|e| e.moves <= moves).count() + 1;
        let pos = self
            .entries
            .iter()
            .position(|e| moves < e.moves)
            .unwrap_or(self.entries.len());
        self.entries.insert(
            pos,
            RecordEntry {
                moves,
                pairs,
                timestamp,
            },
        );

        self.trim();

        Some(rank)
    }

    /// Drop everything past MAX_RECORDS within each board size
    fn trim(&mut self) {
        let mut kept: HashMap<usize, usize> = HashMap::new();
        self.entries.retain(|e| {
            let count = kept.entry(e.pairs).or_default();
            *count += 1;
            *count <= MAX_RECORDS
        });
    }

    /// Fewest moves recorded for a board size
    pub fn best_for(&self, pairs: usize) -> Option<u32> {
        self.entries_for(pairs).map(|e| e.moves).min()
    }

    /// Load records from durable storage
    pub fn load(persistence: &Persistence) -> Self {
        match persistence.load_durable::<Records>(keys::RECORDS) {
            Ok(Some(mut records)) => {
                records.entries.sort_by_key(|e| e.moves);
                records.trim();
                log::info!("Loaded {} records", records.entries.len());
                records
            }
            Ok(None) => {
                log::info!("No records found, starting fresh");
                Self::new()
            }
            Err(e) => {
                log::warn!("Ignoring stored records: {}", e);
                Self::new()
            }
        }
    }

    /// Save records to durable storage
    pub fn save(&self, persistence: &mut Persistence) {
        match persistence.save_durable(keys::RECORDS, self) {
            Ok(()) => log::info!("Records saved ({} entries)", self.entries.len()),
            Err(e) => log::warn!("Failed to save records: {}", e),
        }
    }
}
