//! Save/load persistence
//!
//! Features:
//! - Key-value storage port with browser and in-memory backends
//! - Session scope (board, moves, selection) and durable scope (total moves,
//!   settings, records)
//! - Shape validation of restored boards

pub mod adapter;
pub mod store;
pub mod validation;

pub use adapter::{Persistence, PersistenceError, SessionSnapshot};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use validation::{BoardError, validate_board};

/// Storage keys
pub mod keys {
    /// Session: serialized card sequence
    pub const GAME_CARDS: &str = "gameCards";
    /// Session: decimal move count
    pub const GAME_MOVES: &str = "gameMoves";
    /// Session: serialized selection indices
    pub const SELECTED_CARDS: &str = "selectedCards";
    /// Durable: decimal total move count
    pub const TOTAL_MOVES: &str = "totalMoves";
    /// Durable: settings JSON
    pub const SETTINGS: &str = "memorySettings";
    /// Durable: completed game records JSON
    pub const RECORDS: &str = "memoryRecords";
}
