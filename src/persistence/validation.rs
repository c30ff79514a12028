//! Shape validation for restored boards
//!
//! Stored data can parse as JSON and still describe a board the rules could
//! never produce. Anything rejected here is discarded and regenerated.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::sim::{Card, CardFace};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board is empty")]
    Empty,
    #[error("board has an odd number of cards ({0})")]
    OddCount(usize),
    #[error("card id {0} is used more than once")]
    DuplicateId(u32),
    #[error("symbol {value:?} appears {count} times")]
    UnpairedSymbol { value: String, count: usize },
    #[error("card {0} is matched but face down")]
    MatchedFaceDown(u32),
    #[error("symbol {0:?} is matched on only one card")]
    HalfMatched(String),
    #[error("selection holds {0} cards")]
    SelectionTooLarge(usize),
    #[error("selection index {0} is out of range")]
    SelectionOutOfRange(usize),
    #[error("selection lists index {0} twice")]
    DuplicateSelection(usize),
    #[error("selection does not match the face-up cards")]
    SelectionMismatch,
    #[error("cards {0} and {1} are an unresolved matching pair")]
    UnresolvedMatch(usize, usize),
}

/// Check that `cards` and `selected` describe a reachable game position
pub fn validate_board(cards: &[Card], selected: &[usize]) -> Result<(), BoardError> {
    if cards.is_empty() {
        return Err(BoardError::Empty);
    }
    if cards.len() % 2 != 0 {
        return Err(BoardError::OddCount(cards.len()));
    }

    let mut ids = HashSet::with_capacity(cards.len());
    // value -> (copies, matched copies)
    let mut symbols: HashMap<&str, (usize, usize)> = HashMap::new();
    for card in cards {
        if !ids.insert(card.id) {
            return Err(BoardError::DuplicateId(card.id));
        }
        if card.is_matched && !card.is_flipped {
            return Err(BoardError::MatchedFaceDown(card.id));
        }
        let entry = symbols.entry(card.value.as_str()).or_default();
        entry.0 += 1;
        if card.is_matched {
            entry.1 += 1;
        }
    }

    // Sort for a stable error when several symbols are off
    let mut symbols: Vec<_> = symbols.into_iter().collect();
    symbols.sort_by(|a, b| a.0.cmp(b.0));
    for (value, (count, matched)) in symbols {
        if count != 2 {
            return Err(BoardError::UnpairedSymbol {
                value: value.to_string(),
                count,
            });
        }
        if matched == 1 {
            return Err(BoardError::HalfMatched(value.to_string()));
        }
    }

    if selected.len() > 2 {
        return Err(BoardError::SelectionTooLarge(selected.len()));
    }
    let mut seen = HashSet::with_capacity(2);
    for &index in selected {
        if index >= cards.len() {
            return Err(BoardError::SelectionOutOfRange(index));
        }
        if !seen.insert(index) {
            return Err(BoardError::DuplicateSelection(index));
        }
    }

    let pending: HashSet<usize> = cards
        .iter()
        .enumerate()
        .filter(|(_, c)| c.face() == CardFace::Pending)
        .map(|(i, _)| i)
        .collect();
    if pending != seen {
        return Err(BoardError::SelectionMismatch);
    }

    if let [first, second] = *selected {
        if cards[first].pairs_with(&cards[second]) {
            return Err(BoardError::UnresolvedMatch(first, second));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(values: &[&str]) -> Vec<Card> {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| Card::new(i as u32, *v))
            .collect()
    }

    #[test]
    fn test_fresh_board_is_valid() {
        let cards = board(&["a", "b", "a", "b"]);
        assert_eq!(validate_board(&cards, &[]), Ok(()));
    }

    #[test]
    fn test_shape_errors() {
        assert_eq!(validate_board(&[], &[]), Err(BoardError::Empty));
        assert_eq!(
            validate_board(&board(&["a", "a", "b"]), &[]),
            Err(BoardError::OddCount(3))
        );

        let mut cards = board(&["a", "a", "b", "b"]);
        cards[3].id = 0;
        assert_eq!(validate_board(&cards, &[]), Err(BoardError::DuplicateId(0)));

        assert_eq!(
            validate_board(&board(&["a", "a", "a", "a"]), &[]),
            Err(BoardError::UnpairedSymbol {
                value: "a".to_string(),
                count: 4
            })
        );
    }

    #[test]
    fn test_matched_flags() {
        let mut cards = board(&["a", "a", "b", "b"]);
        cards[0].is_matched = true;
        assert_eq!(validate_board(&cards, &[]), Err(BoardError::MatchedFaceDown(0)));

        cards[0].is_flipped = true;
        assert_eq!(
            validate_board(&cards, &[]),
            Err(BoardError::HalfMatched("a".to_string()))
        );

        cards[1].is_flipped = true;
        cards[1].is_matched = true;
        assert_eq!(validate_board(&cards, &[]), Ok(()));
    }

    #[test]
    fn test_selection_rules() {
        let mut cards = board(&["a", "b", "a", "b"]);
        assert_eq!(
            validate_board(&cards, &[0, 1, 2]),
            Err(BoardError::SelectionTooLarge(3))
        );
        assert_eq!(
            validate_board(&cards, &[7]),
            Err(BoardError::SelectionOutOfRange(7))
        );

        cards[0].is_flipped = true;
        assert_eq!(
            validate_board(&cards, &[0, 0]),
            Err(BoardError::DuplicateSelection(0))
        );
        // Face-up card missing from the selection
        assert_eq!(validate_board(&cards, &[]), Err(BoardError::SelectionMismatch));
        assert_eq!(validate_board(&cards, &[0]), Ok(()));

        cards[1].is_flipped = true;
        assert_eq!(validate_board(&cards, &[0, 1]), Ok(()));

        cards[1].is_flipped = false;
        cards[2].is_flipped = true;
        assert_eq!(
            validate_board(&cards, &[0, 2]),
            Err(BoardError::UnresolvedMatch(0, 2))
        );
    }
}
