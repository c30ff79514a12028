//! Memory Match - a card-pairs memory game
//!
//! Core modules:
//! - `sim`: Game rules (board generation, flip/match/revert transitions)
//! - `game`: Controller tying rules, persistence, settings and records together
//! - `persistence`: Session/durable key-value storage with load validation
//! - `platform`: Browser/native platform abstraction
//! - `ui`: View-model for the tile grid and HUD

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod game;
pub mod persistence;
pub mod platform;
pub mod records;
pub mod settings;
pub mod sim;
pub mod ui;

pub use game::{Game, GameEvent};
pub use records::Records;
pub use settings::{Difficulty, Settings};

/// Game configuration constants
pub mod consts {
    /// How long a mismatched pair stays face up before flipping back
    pub const MISMATCH_DELAY_MS: u32 = 1000;
    /// How long the completion notice stays on screen
    pub const NOTICE_DURATION_MS: u32 = 3000;

    /// Tiles per grid row
    pub const GRID_COLUMNS: usize = 4;

    /// Default number of pairs on the board
    pub const DEFAULT_PAIRS: usize = 8;

    /// Symbol table; a board of K pairs uses the first K entries
    pub const SYMBOLS: [&str; 12] = [
        "🎮", "🎲", "🎯", "🎪", "🎨", "🎭",
        "🎸", "🎺", "🎳", "🎹", "🎬", "🎤",
    ];
}
