//! View-model for the tile grid and HUD
//!
//! Pure functions from game state to what the page (or terminal) shows.

use crate::consts::GRID_COLUMNS;
use crate::sim::{Card, CardFace, GameState};

/// Label on a face-down tile
pub const HIDDEN_LABEL: &str = "?";

/// What a single tile shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub label: String,
    pub face: CardFace,
}

impl TileView {
    pub fn from_card(card: &Card) -> Self {
        let label = if card.is_face_up() {
            card.value.clone()
        } else {
            HIDDEN_LABEL.to_string()
        };
        Self {
            label,
            face: card.face(),
        }
    }

    /// CSS classes for the tile button
    pub fn class_name(&self) -> &'static str {
        match self.face {
            CardFace::Hidden => "tile hidden",
            CardFace::Pending => "tile revealed",
            CardFace::Matched => "tile revealed matched",
        }
    }
}

pub fn tiles(state: &GameState) -> Vec<TileView> {
    state.cards.iter().map(TileView::from_card).collect()
}

pub fn moves_text(moves: u32) -> String {
    format!("Current Moves: {}", moves)
}

pub fn total_moves_text(total_moves: u64) -> String {
    format!("Total Moves (All Games): {}", total_moves)
}

pub fn best_text(best: Option<u32>) -> String {
    match best {
        Some(moves) => format!("Best: {} moves", moves),
        None => "Best: -".to_string(),
    }
}

/// Completion notice
pub fn completion_message(moves: u32, rank: Option<usize>) -> String {
    let mut message = format!("Congratulations! You completed the game in {} moves.", moves);
    if rank == Some(1) {
        message.push_str(" New best!");
    }
    message
}

/// Plain-text board, one grid row per line
///
/// Tiles are numbered so a terminal player can pick them by index.
pub fn render_text_board(state: &GameState) -> String {
    let views = tiles(state);
    let mut out = String::new();
    for (row, chunk) in views.chunks(GRID_COLUMNS).enumerate() {
        let line: Vec<String> = chunk
            .iter()
            .enumerate()
            .map(|(col, tile)| format!("{:>2}:{}", row * GRID_COLUMNS + col, tile.label))
            .collect();
        out.push_str(&line.join("  "));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        let cards = ["x", "y", "x", "y", "z", "z"]
            .iter()
            .enumerate()
            .map(|(i, v)| Card::new(i as u32, *v))
            .collect();
        GameState::new(cards, 0)
    }

    #[test]
    fn test_hidden_tiles_show_placeholder() {
        let mut state = state();
        state.flip(0);
        let views = tiles(&state);
        assert_eq!(views[0].label, "x");
        assert_eq!(views[0].class_name(), "tile revealed");
        assert_eq!(views[1].label, HIDDEN_LABEL);
        assert_eq!(views[1].class_name(), "tile hidden");

        state.flip(2);
        assert_eq!(tiles(&state)[2].class_name(), "tile revealed matched");
    }

    #[test]
    fn test_hud_text() {
        assert_eq!(moves_text(3), "Current Moves: 3");
        assert_eq!(total_moves_text(120), "Total Moves (All Games): 120");
        assert_eq!(best_text(None), "Best: -");
        assert_eq!(best_text(Some(9)), "Best: 9 moves");
        assert_eq!(
            completion_message(12, Some(4)),
            "Congratulations! You completed the game in 12 moves."
        );
        assert!(completion_message(8, Some(1)).ends_with("New best!"));
    }

    #[test]
    fn test_text_board_rows() {
        let board = render_text_board(&state());
        let lines: Vec<&str> = board.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], " 0:?   1:?   2:?   3:?");
        assert_eq!(lines[1], " 4:?   5:?");
    }
}
