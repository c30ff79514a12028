//! Audio system using Web Audio API
//!
//! Short procedurally generated tones for card events.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A card turned face up
    Flip,
    /// Pair locked
    Match,
    /// Pair differs
    Mismatch,
    /// Board cleared
    Complete,
    /// Fresh board dealt
    Shuffle,
}

impl SoundEffect {
    /// Sound for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Revealed { .. } => Some(SoundEffect::Flip),
            GameEvent::Matched { .. } => Some(SoundEffect::Match),
            GameEvent::Mismatched { .. } => Some(SoundEffect::Mismatch),
            GameEvent::Completed { .. } => Some(SoundEffect::Complete),
            GameEvent::NewGame { .. } => Some(SoundEffect::Shuffle),
            GameEvent::Reverted { .. } => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Set volume (0.0 - 1.0); 0 mutes
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Flip => self.play_flip(ctx, vol),
            SoundEffect::Match => self.play_match(ctx, vol),
            SoundEffect::Mismatch => self.play_mismatch(ctx, vol),
            SoundEffect::Complete => self.play_complete(ctx, vol),
            SoundEffect::Shuffle => self.play_shuffle(ctx, vol),
        }
    }

    // === Sound generators ===

    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Single decaying tone starting `offset` seconds from now
    fn blip(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        level: f32,
        offset: f64,
        length: f64,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, osc_type) else {
            return;
        };
        let t = ctx.current_time() + offset;

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + length)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + length + 0.02).ok();
    }

    /// Flip - quick tick
    fn play_flip(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, 520.0, OscillatorType::Triangle, vol * 0.25, 0.0, 0.06);
    }

    /// Match - rising two-note chime
    fn play_match(&self, ctx: &AudioContext, vol: f32) {
        self.blip(ctx, 660.0, OscillatorType::Sine, vol * 0.4, 0.0, 0.12);
        self.blip(ctx, 880.0, OscillatorType::Sine, vol * 0.4, 0.1, 0.18);
    }

    /// Mismatch - low falling buzz
    fn play_mismatch(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.25)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.25)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.3).ok();
    }

    /// Complete - major arpeggio
    fn play_complete(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [523.25, 659.25, 783.99, 1046.5].into_iter().enumerate() {
            self.blip(ctx, freq, OscillatorType::Sine, vol * 0.4, i as f64 * 0.12, 0.3);
        }
    }

    /// Shuffle - soft descending ripple
    fn play_shuffle(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [900.0, 750.0, 600.0].into_iter().enumerate() {
            self.blip(ctx, freq, OscillatorType::Triangle, vol * 0.15, i as f64 * 0.04, 0.05);
        }
    }
}
