//! Game state and selection rules
//!
//! At most two cards are face up and unresolved at any time. The selection
//! holds their indices until a match locks them or a revert hides them again.

use serde::{Deserialize, Serialize};

use super::card::Card;

/// Handle for a scheduled mismatch revert
///
/// Carries the generation of the board it was issued for, so a revert that
/// fires after "New Game" cannot touch the fresh board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevertTicket {
    pub generation: u64,
    pub first: usize,
    pub second: usize,
}

/// Why a click did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OutOfRange,
    /// Two cards are already waiting to flip back
    AwaitingRevert,
    AlreadyMatched,
    AlreadyRevealed,
}

/// Result of flipping a card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    Ignored(IgnoreReason),
    /// First card of a pair turned face up
    Revealed,
    Matched { first: usize, second: usize },
    /// Pair differs; both stay face up until the ticket is redeemed
    Mismatched(RevertTicket),
}

/// Board, counters and selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    /// Bumped on every new game
    pub generation: u64,
    pub cards: Vec<Card>,
    /// Moves in the current game
    pub moves: u32,
    /// Moves across every game ever played
    pub total_moves: u64,
    /// Indices of face-up unresolved cards, in click order
    pub selected: Vec<usize>,
}

impl GameState {
    pub fn new(cards: Vec<Card>, total_moves: u64) -> Self {
        Self {
            generation: 0,
            cards,
            moves: 0,
            total_moves,
            selected: Vec::with_capacity(2),
        }
    }

    /// Rebuild a state from restored session values
    pub fn restore(cards: Vec<Card>, moves: u32, selected: Vec<usize>, total_moves: u64) -> Self {
        Self {
            generation: 0,
            cards,
            moves,
            total_moves,
            selected,
        }
    }

    /// Flip the card at `index` and resolve the pair if it is the second one
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.selected.len() >= 2 {
            return FlipOutcome::Ignored(IgnoreReason::AwaitingRevert);
        }
        let Some(card) = self.cards.get_mut(index) else {
            return FlipOutcome::Ignored(IgnoreReason::OutOfRange);
        };
        if card.is_matched {
            return FlipOutcome::Ignored(IgnoreReason::AlreadyMatched);
        }
        if card.is_flipped {
            return FlipOutcome::Ignored(IgnoreReason::AlreadyRevealed);
        }

        card.is_flipped = true;
        self.selected.push(index);

        if self.selected.len() < 2 {
            return FlipOutcome::Revealed;
        }

        // Counted as soon as the pair is complete, before comparing
        self.moves += 1;
        self.total_moves += 1;

        let (first, second) = (self.selected[0], self.selected[1]);
        if self.cards[first].pairs_with(&self.cards[second]) {
            self.cards[first].is_matched = true;
            self.cards[second].is_matched = true;
            self.selected.clear();
            FlipOutcome::Matched { first, second }
        } else {
            FlipOutcome::Mismatched(RevertTicket {
                generation: self.generation,
                first,
                second,
            })
        }
    }

    /// Hide a mismatched pair again
    ///
    /// Returns false, leaving the state untouched, if the ticket belongs to an
    /// older board or the selection no longer holds its pair.
    pub fn revert(&mut self, ticket: RevertTicket) -> bool {
        if ticket.generation != self.generation
            || self.selected.as_slice() != [ticket.first, ticket.second]
        {
            return false;
        }
        for index in [ticket.first, ticket.second] {
            if let Some(card) = self.cards.get_mut(index) {
                card.is_flipped = false;
            }
        }
        self.selected.clear();
        true
    }

    /// Ticket for a pair still waiting to flip back, if any
    pub fn pending_revert(&self) -> Option<RevertTicket> {
        match self.selected.as_slice() {
            [first, second] => Some(RevertTicket {
                generation: self.generation,
                first: *first,
                second: *second,
            }),
            _ => None,
        }
    }

    /// Replace the board; total moves carry over
    pub fn start_new_game(&mut self, cards: Vec<Card>) {
        self.generation += 1;
        self.cards = cards;
        self.moves = 0;
        self.selected.clear();
    }

    /// True once every card on a non-empty board is matched
    pub fn is_complete(&self) -> bool {
        !self.cards.is_empty() && self.cards.iter().all(|c| c.is_matched)
    }

    pub fn pairs(&self) -> usize {
        self.cards.len() / 2
    }
}
