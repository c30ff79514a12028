//! Game settings and preferences
//!
//! Persisted in durable storage next to the running move total.

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_PAIRS, MISMATCH_DELAY_MS, NOTICE_DURATION_MS, SYMBOLS};
use crate::persistence::{Persistence, keys};

/// Longest allowed mismatch delay
const MAX_MISMATCH_DELAY_MS: u32 = 10_000;

/// Board size presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" | "med" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Number of distinct symbols on the board
    pub fn pairs(&self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Normal => DEFAULT_PAIRS,
            Difficulty::Hard => 12,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pairs on the board (1..=SYMBOLS.len())
    pub pairs: usize,
    /// How long a mismatched pair stays visible
    pub mismatch_delay_ms: u32,
    /// How long the completion notice stays visible
    pub notice_ms: u32,

    // === Audio ===
    pub sound: bool,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pairs: DEFAULT_PAIRS,
            mismatch_delay_ms: MISMATCH_DELAY_MS,
            notice_ms: NOTICE_DURATION_MS,
            sound: true,
            volume: 0.6,
        }
    }
}

impl Settings {
    pub fn apply_difficulty(&mut self, difficulty: Difficulty) {
        self.pairs = difficulty.pairs();
    }

    /// Pull out-of-range values back into bounds
    pub fn clamped(mut self) -> Self {
        self.pairs = self.pairs.clamp(1, SYMBOLS.len());
        self.mismatch_delay_ms = self.mismatch_delay_ms.min(MAX_MISMATCH_DELAY_MS);
        self.volume = if self.volume.is_finite() {
            self.volume.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self
    }

    /// Symbols used for a board of this size
    pub fn symbols(&self) -> &'static [&'static str] {
        &SYMBOLS[..self.pairs.clamp(1, SYMBOLS.len())]
    }

    /// Effective volume (0 when sound is off)
    pub fn effective_volume(&self) -> f32 {
        if self.sound { self.volume } else { 0.0 }
    }

    /// Load settings from durable storage
    pub fn load(persistence: &Persistence) -> Self {
        match persistence.load_durable::<Settings>(keys::SETTINGS) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from storage");
                settings.clamped()
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to durable storage
    pub fn save(&self, persistence: &mut Persistence) {
        match persistence.save_durable(keys::SETTINGS, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Failed to save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::KeyValueStore;

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::from_str("HARD"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::from_str(" easy "), Some(Difficulty::Easy));
        assert_eq!(Difficulty::from_str("med"), Some(Difficulty::Normal));
        assert_eq!(Difficulty::from_str("nightmare"), None);
        assert_eq!(Difficulty::Hard.as_str(), "Hard");
    }

    #[test]
    fn test_presets_fit_symbol_table() {
        for d in [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard] {
            let mut settings = Settings::default();
            settings.apply_difficulty(d);
            assert_eq!(settings.pairs, d.pairs());
            assert_eq!(settings.symbols().len(), d.pairs());
        }
    }

    #[test]
    fn test_clamped() {
        let settings = Settings {
            pairs: 99,
            mismatch_delay_ms: 60_000,
            volume: f32::NAN,
            ..Settings::default()
        }
        .clamped();
        assert_eq!(settings.pairs, SYMBOLS.len());
        assert_eq!(settings.mismatch_delay_ms, MAX_MISMATCH_DELAY_MS);
        assert_eq!(settings.volume, 0.0);

        let settings = Settings {
            pairs: 0,
            ..Settings::default()
        }
        .clamped();
        assert_eq!(settings.pairs, 1);
    }

    #[test]
    fn test_save_and_load() {
        let mut persistence = Persistence::in_memory();
        assert_eq!(Settings::load(&persistence), Settings::default());

        let mut settings = Settings::default();
        settings.apply_difficulty(Difficulty::Easy);
        settings.sound = false;
        settings.save(&mut persistence);
        assert_eq!(Settings::load(&persistence), settings);
        assert_eq!(settings.effective_volume(), 0.0);
    }

    #[test]
    fn test_partial_and_broken_json() {
        let mut durable = crate::persistence::MemoryStore::new();
        durable.set(keys::SETTINGS, r#"{"pairs":4}"#).unwrap();
        let persistence = Persistence::new(crate::persistence::MemoryStore::new(), durable);
        let settings = Settings::load(&persistence);
        assert_eq!(settings.pairs, 4);
        assert_eq!(settings.mismatch_delay_ms, MISMATCH_DELAY_MS);

        let mut durable = crate::persistence::MemoryStore::new();
        durable.set(keys::SETTINGS, "][").unwrap();
        let persistence = Persistence::new(crate::persistence::MemoryStore::new(), durable);
        assert_eq!(Settings::load(&persistence), Settings::default());
    }
}
