//! Game controller
//!
//! Owns the rules state, settings, records, RNG and persistence port. Every
//! input comes back as a list of `GameEvent`s for the UI to render, and every
//! state change is mirrored to storage before the call returns.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::persistence::Persistence;
use crate::platform;
use crate::records::Records;
use crate::settings::{Difficulty, Settings};
use crate::sim::{FlipOutcome, GameState, RevertTicket, generate_cards};

/// Something the UI should show or schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A card turned face up
    Revealed { index: usize },
    /// Two cards locked face up
    Matched { first: usize, second: usize },
    /// Two cards differ; redeem the ticket after `delay_ms`
    Mismatched { ticket: RevertTicket, delay_ms: u32 },
    /// A mismatched pair turned face down
    Reverted { first: usize, second: usize },
    /// Board cleared; `rank` is the position on this board size's
    /// leaderboard if it made the list
    Completed { moves: u32, rank: Option<usize> },
    /// A fresh board replaced the old one
    NewGame { generation: u64 },
}

pub struct Game<R: Rng = Pcg32> {
    state: GameState,
    settings: Settings,
    records: Records,
    persistence: Persistence,
    rng: R,
}

impl Game<Pcg32> {
    /// Load with an RNG seeded from `seed`
    pub fn seeded(persistence: Persistence, seed: u64) -> Self {
        Self::load(persistence, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// Restore the previous session, or start fresh
    pub fn load(persistence: Persistence, mut rng: R) -> Self {
        let settings = Settings::load(&persistence);
        let records = Records::load(&persistence);

        let total_moves = persistence.load_total_moves().unwrap_or_else(|e| {
            log::warn!("Resetting total moves: {}", e);
            0
        });

        let state = match persistence.load_session() {
            Ok(Some(snapshot)) => {
                log::info!(
                    "Restored board ({} cards, {} moves)",
                    snapshot.cards.len(),
                    snapshot.moves
                );
                GameState::restore(snapshot.cards, snapshot.moves, snapshot.selected, total_moves)
            }
            Ok(None) => {
                log::info!("No saved board, dealing {} pairs", settings.pairs);
                GameState::new(generate_cards(settings.symbols(), &mut rng), total_moves)
            }
            Err(e) => {
                log::warn!("Discarding saved board: {}", e);
                GameState::new(generate_cards(settings.symbols(), &mut rng), total_moves)
            }
        };

        let mut game = Self {
            state,
            settings,
            records,
            persistence,
            rng,
        };

        if game.state.is_complete() {
            game.new_game();
        } else {
            game.save_session();
        }
        game
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn records(&self) -> &Records {
        &self.records
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    /// Give back the storage port, e.g. to reload from it
    pub fn into_persistence(self) -> Persistence {
        self.persistence
    }

    /// Handle a click on the card at `index`
    pub fn click(&mut self, index: usize) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.state.flip(index) {
            FlipOutcome::Ignored(reason) => {
                log::debug!("Click on card {} ignored: {:?}", index, reason);
                return events;
            }
            FlipOutcome::Revealed => {
                events.push(GameEvent::Revealed { index });
                self.save_session();
            }
            FlipOutcome::Matched { first, second } => {
                events.push(GameEvent::Revealed { index });
                events.push(GameEvent::Matched { first, second });
                self.save_session();
                self.save_total_moves();
                if self.state.is_complete() {
                    self.complete(&mut events);
                }
            }
            FlipOutcome::Mismatched(ticket) => {
                events.push(GameEvent::Revealed { index });
                events.push(GameEvent::Mismatched {
                    ticket,
                    delay_ms: self.settings.mismatch_delay_ms,
                });
                self.save_session();
                self.save_total_moves();
            }
        }
        events
    }

    /// Flip a mismatched pair back once its delay has passed
    pub fn resolve_mismatch(&mut self, ticket: RevertTicket) -> Vec<GameEvent> {
        if !self.state.revert(ticket) {
            log::debug!("Stale revert for generation {} ignored", ticket.generation);
            return Vec::new();
        }
        self.save_session();
        vec![GameEvent::Reverted {
            first: ticket.first,
            second: ticket.second,
        }]
    }

    /// Mismatch left pending by a previous page, so its timer can be re-armed
    pub fn resume(&self) -> Option<GameEvent> {
        self.state
            .pending_revert()
            .map(|ticket| GameEvent::Mismatched {
                ticket,
                delay_ms: self.settings.mismatch_delay_ms,
            })
    }

    /// Deal a fresh board; total moves are kept
    pub fn new_game(&mut self) -> Vec<GameEvent> {
        let cards = generate_cards(self.settings.symbols(), &mut self.rng);
        self.state.start_new_game(cards);
        self.save_session();
        log::info!(
            "New game {} ({} pairs)",
            self.state.generation,
            self.settings.pairs
        );
        vec![GameEvent::NewGame {
            generation: self.state.generation,
        }]
    }

    /// Switch board size and deal a new game
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Vec<GameEvent> {
        self.settings.apply_difficulty(difficulty);
        self.settings.save(&mut self.persistence);
        self.new_game()
    }

    pub fn set_sound(&mut self, sound: bool) {
        self.settings.sound = sound;
        self.settings.save(&mut self.persistence);
    }

    fn complete(&mut self, events: &mut Vec<GameEvent>) {
        let moves = self.state.moves;
        let rank = self
            .records
            .add_result(moves, self.state.pairs(), platform::now_ms());
        self.records.save(&mut self.persistence);
        log::info!("Board cleared in {} moves (rank {:?})", moves, rank);

        events.push(GameEvent::Completed { moves, rank });
        events.extend(self.new_game());
    }

    fn save_session(&mut self) {
        if let Err(e) = self.persistence.save_session(&self.state) {
            log::warn!("Failed to save session: {}", e);
        }
    }

    fn save_total_moves(&mut self) {
        if let Err(e) = self.persistence.save_total_moves(self.state.total_moves) {
            log::warn!("Failed to save total moves: {}", e);
        }
    }
}
