//! Audio cues
//!
//! Procedurally generated sound effects via the Web Audio API. Natively the
//! cues are only logged.

use std::time::Duration;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

#[cfg(target_arch = "wasm32")]
use crate::error::StartupError;
use crate::settings::AudioSettings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball jumps off the floor
    Jump,
    /// Ball lands hard
    Bounce,
}

impl SoundEffect {
    /// How long the effect stays audible
    pub fn length(&self) -> Duration {
        match self {
            SoundEffect::Jump => Duration::from_millis(250),
            SoundEffect::Bounce => Duration::from_millis(120),
        }
    }
}

/// One-shot gate: a cue fires only when its previous playback has finished
#[derive(Debug, Clone, Copy)]
pub struct CueGate {
    length: Duration,
    playing_until: Option<Duration>,
}

impl CueGate {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            playing_until: None,
        }
    }

    pub fn is_playing(&self, now: Duration) -> bool {
        self.playing_until.is_some_and(|end| now < end)
    }

    /// Start the cue unless it is still playing. Returns true if it started.
    pub fn try_fire(&mut self, now: Duration) -> bool {
        if self.is_playing(now) {
            return false;
        }
        self.playing_until = Some(now + self.length);
        true
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    jump_gate: CueGate,
}

impl AudioManager {
    pub fn new(settings: &AudioSettings) -> Self {
        #[cfg(target_arch = "wasm32")]
        let ctx = match Self::create_context() {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                log::warn!("{}, sound disabled", e);
                None
            }
        };

        let mut manager = Self {
            #[cfg(target_arch = "wasm32")]
            ctx,
            master_volume: 0.0,
            sfx_volume: 0.0,
            muted: settings.muted,
            jump_gate: CueGate::new(SoundEffect::Jump.length()),
        };
        manager.set_master_volume(settings.master_volume);
        manager.set_sfx_volume(settings.sfx_volume);
        manager
    }

    /// May fail outside a secure context
    #[cfg(target_arch = "wasm32")]
    fn create_context() -> Result<AudioContext, StartupError> {
        AudioContext::new().map_err(|_| StartupError::AudioUnavailable)
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        #[cfg(target_arch = "wasm32")]
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the cues for a frame's events. Returns the effects started.
    pub fn handle_events(&mut self, events: &[GameEvent], now: Duration) -> Vec<SoundEffect> {
        let mut played = Vec::new();
        for event in events {
            let effect = match event {
                GameEvent::Jump => SoundEffect::Jump,
                GameEvent::Bounce { .. } => SoundEffect::Bounce,
                GameEvent::Wrapped | GameEvent::Reset => continue,
            };
            if self.play(effect, now) {
                played.push(effect);
            }
        }
        played
    }

    /// Play a sound effect. The jump cue is not restarted while it plays.
    pub fn play(&mut self, effect: SoundEffect, now: Duration) -> bool {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return false;
        }
        if effect == SoundEffect::Jump && !self.jump_gate.try_fire(now) {
            return false;
        }

        self.output(effect, vol);
        true
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn output(&self, effect: SoundEffect, vol: f32) {
        log::debug!("Sound {:?} at volume {:.2}", effect, vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn output(&self, effect: SoundEffect, vol: f32) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Jump => self.play_jump(ctx, vol),
            SoundEffect::Bounce => self.play_bounce(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    #[cfg(target_arch = "wasm32")]
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

    /// Jump - rising boing
    #[cfg(target_arch = "wasm32")]
    fn play_jump(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();
        let len = SoundEffect::Jump.length().as_secs_f64();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + len * 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len).ok();
    }

    /// Bounce - soft thump
    #[cfg(target_arch = "wasm32")]
    fn play_bounce(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();
        let len = SoundEffect::Bounce.length().as_secs_f64();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + len)
            .ok();
        osc.frequency().set_value_at_time(120.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(50.0, t + len)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + len).ok();
    }
}
