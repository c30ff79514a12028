//! Game rules module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Randomness only through an injected `Rng`
//! - No storage, timers or DOM access
//! - Card ids stay stable for the lifetime of a board

pub mod card;
pub mod deck;
pub mod state;

pub use card::{Card, CardFace};
pub use deck::{generate_cards, shuffle};
pub use state::{FlipOutcome, GameState, IgnoreReason, RevertTicket};
