//! Card entity
//!
//! Field names serialize in camelCase so stored boards keep the
//! `{ id, value, isFlipped, isMatched }` shape.

use serde::{Deserialize, Serialize};

/// Visible state of a single card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardFace {
    /// Face down, clickable
    Hidden,
    /// Face up, waiting for its pair to resolve
    Pending,
    /// Face up permanently
    Matched,
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Position index assigned at generation time
    pub id: u32,
    /// Symbol shown when face up
    pub value: String,
    pub is_flipped: bool,
    pub is_matched: bool,
}

impl Card {
    pub fn new(id: u32, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
            is_flipped: false,
            is_matched: false,
        }
    }

    pub fn face(&self) -> CardFace {
        if self.is_matched {
            CardFace::Matched
        } else if self.is_flipped {
            CardFace::Pending
        } else {
            CardFace::Hidden
        }
    }

    /// True if the player should see the symbol
    pub fn is_face_up(&self) -> bool {
        self.is_flipped || self.is_matched
    }

    /// Cards pair up by symbol, never by id
    pub fn pairs_with(&self, other: &Card) -> bool {
        self.value == other.value
    }
}
