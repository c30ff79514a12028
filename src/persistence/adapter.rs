//! Session and durable persistence
//!
//! The session store mirrors the board, move count and selection; the durable
//! store keeps the running total plus settings and records. Both are plain
//! string-valued stores, so JSON and decimal encodings happen here.

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::keys;
use super::store::{KeyValueStore, MemoryStore, StoreError};
use super::validation::{BoardError, validate_board};
use crate::sim::{Card, GameState};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("malformed JSON under {key}: {source}")]
    Json {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed integer under {key}: {value:?}")]
    Integer { key: &'static str, value: String },
    #[error("invalid stored board: {0}")]
    Board(#[from] BoardError),
}

/// Session values restored on page load
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub cards: Vec<Card>,
    pub moves: u32,
    pub selected: Vec<usize>,
}

/// Persistence port handed to the game controller
pub struct Persistence {
    session: Box<dyn KeyValueStore>,
    durable: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(
        session: impl KeyValueStore + 'static,
        durable: impl KeyValueStore + 'static,
    ) -> Self {
        Self {
            session: Box::new(session),
            durable: Box::new(durable),
        }
    }

    pub fn from_boxed(session: Box<dyn KeyValueStore>, durable: Box<dyn KeyValueStore>) -> Self {
        Self { session, durable }
    }

    /// Both scopes backed by memory
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), MemoryStore::new())
    }

    pub fn session(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }

    pub fn durable(&self) -> &dyn KeyValueStore {
        self.durable.as_ref()
    }

    /// Drop the session scope, as a browser does when the tab closes
    pub fn end_session(&mut self, session: impl KeyValueStore + 'static) {
        self.session = Box::new(session);
    }

    /// Load the saved board, if any
    ///
    /// Missing moves or selection fall back to zero / empty. The board must
    /// pass `validate_board`.
    pub fn load_session(&self) -> Result<Option<SessionSnapshot>, PersistenceError> {
        let Some(cards_json) = self.session.get(keys::GAME_CARDS)? else {
            return Ok(None);
        };
        let cards: Vec<Card> = parse_json(keys::GAME_CARDS, &cards_json)?;

        let moves = match self.session.get(keys::GAME_MOVES)? {
            Some(value) => parse_int(keys::GAME_MOVES, &value)?,
            None => 0,
        };

        let selected: Vec<usize> = match self.session.get(keys::SELECTED_CARDS)? {
            Some(json) => parse_json(keys::SELECTED_CARDS, &json)?,
            None => Vec::new(),
        };

        validate_board(&cards, &selected)?;

        Ok(Some(SessionSnapshot {
            cards,
            moves,
            selected,
        }))
    }

    /// Mirror board, moves and selection into the session scope
    pub fn save_session(&mut self, state: &GameState) -> Result<(), PersistenceError> {
        let cards = to_json(keys::GAME_CARDS, &state.cards)?;
        let selected = to_json(keys::SELECTED_CARDS, &state.selected)?;
        self.session.set(keys::GAME_CARDS, &cards)?;
        self.session.set(keys::GAME_MOVES, &state.moves.to_string())?;
        self.session.set(keys::SELECTED_CARDS, &selected)?;
        Ok(())
    }

    /// Running total across games, zero if never saved
    pub fn load_total_moves(&self) -> Result<u64, PersistenceError> {
        match self.durable.get(keys::TOTAL_MOVES)? {
            Some(value) => parse_int(keys::TOTAL_MOVES, &value),
            None => Ok(0),
        }
    }

    pub fn save_total_moves(&mut self, total: u64) -> Result<(), PersistenceError> {
        self.durable.set(keys::TOTAL_MOVES, &total.to_string())?;
        Ok(())
    }

    /// Load a JSON value from the durable scope
    pub fn load_durable<T: DeserializeOwned>(
        &self,
        key: &'static str,
    ) -> Result<Option<T>, PersistenceError> {
        match self.durable.get(key)? {
            Some(json) => parse_json(key, &json).map(Some),
            None => Ok(None),
        }
    }

    /// Save a JSON value to the durable scope
    pub fn save_durable<T: Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<(), PersistenceError> {
        let json = to_json(key, value)?;
        self.durable.set(key, &json)?;
        Ok(())
    }
}

fn parse_json<T: DeserializeOwned>(key: &'static str, json: &str) -> Result<T, PersistenceError> {
    serde_json::from_str(json).map_err(|source| PersistenceError::Json { key, source })
}

fn to_json<T: Serialize + ?Sized>(
    key: &'static str,
    value: &T,
) -> Result<String, PersistenceError> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Json { key, source })
}

fn parse_int<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, PersistenceError> {
    value.trim().parse().map_err(|_| PersistenceError::Integer {
        key,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_state() -> GameState {
        let cards = ["a", "b", "a", "b"]
            .iter()
            .enumerate()
            .map(|(i, v)| Card::new(i as u32, *v))
            .collect();
        GameState::new(cards, 5)
    }

    #[test]
    fn test_empty_stores_load_defaults() {
        let persistence = Persistence::in_memory();
        assert!(persistence.load_session().unwrap().is_none());
        assert_eq!(persistence.load_total_moves().unwrap(), 0);
    }

    #[test]
    fn test_session_written_under_expected_keys() {
        let mut persistence = Persistence::in_memory();
        let mut state = sample_state();
        state.flip(1);
        persistence.save_session(&state).unwrap();

        let session = persistence.session();
        assert_eq!(session.get(keys::GAME_MOVES).unwrap().as_deref(), Some("0"));
        assert_eq!(
            session.get(keys::SELECTED_CARDS).unwrap().as_deref(),
            Some("[1]")
        );
        let cards = session.get(keys::GAME_CARDS).unwrap().unwrap();
        assert!(cards.starts_with(r#"[{"id":0,"value":"a","isFlipped":false,"isMatched":false}"#));

        let snapshot = persistence.load_session().unwrap().unwrap();
        assert_eq!(snapshot.cards, state.cards);
        assert_eq!(snapshot.selected, vec![1]);
    }

    #[test]
    fn test_total_moves_decimal() {
        let mut persistence = Persistence::in_memory();
        persistence.save_total_moves(123).unwrap();
        assert_eq!(
            persistence.durable().get(keys::TOTAL_MOVES).unwrap().as_deref(),
            Some("123")
        );
        assert_eq!(persistence.load_total_moves().unwrap(), 123);
    }

    #[test]
    fn test_malformed_values_are_errors() {
        let mut session = MemoryStore::new();
        session.set(keys::GAME_CARDS, "{not json").unwrap();
        let mut durable = MemoryStore::new();
        durable.set(keys::TOTAL_MOVES, "lots").unwrap();
        let persistence = Persistence::new(session, durable);

        assert!(matches!(
            persistence.load_session(),
            Err(PersistenceError::Json { key: keys::GAME_CARDS, .. })
        ));
        assert!(matches!(
            persistence.load_total_moves(),
            Err(PersistenceError::Integer { key: keys::TOTAL_MOVES, .. })
        ));
    }

    #[test]
    fn test_invalid_board_rejected() {
        let mut session = MemoryStore::new();
        session
            .set(
                keys::GAME_CARDS,
                r#"[{"id":0,"value":"a","isFlipped":false,"isMatched":false},
                    {"id":0,"value":"a","isFlipped":false,"isMatched":false}]"#,
            )
            .unwrap();
        let persistence = Persistence::new(session, MemoryStore::new());
        assert!(matches!(
            persistence.load_session(),
            Err(PersistenceError::Board(BoardError::DuplicateId(0)))
        ));
    }

    #[test]
    fn test_end_session_keeps_durable_scope() {
        let mut persistence = Persistence::in_memory();
        persistence.save_session(&sample_state()).unwrap();
        persistence.save_total_moves(9).unwrap();

        persistence.end_session(MemoryStore::new());
        assert!(persistence.load_session().unwrap().is_none());
        assert_eq!(persistence.load_total_moves().unwrap(), 9);
    }
}
