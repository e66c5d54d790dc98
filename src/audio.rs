//! Audio cues
//!
//! Playback is fire-and-forget: a missing audio element, a blocked context or
//! a rejected play promise is silently ignored.

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gauge clicked
    Chime,
    /// Time of day or gauge theme changed
    Shimmer,
}

/// Id of the page's optional recorded chime
pub const CHIME_ELEMENT_ID: &str = "chimeSound";

pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    master_volume: f32,
    muted: bool,
    requests: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - synthesized cues disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            muted: false,
            requests: 0,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            muted: false,
            requests: 0,
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.master_volume }
    }

    /// Number of cues requested while audible
    pub fn requests(&self) -> u32 {
        self.requests
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.requests += 1;
        self.play_backend(effect, vol);
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn play_backend(&self, effect: SoundEffect, vol: f32) {
        log::debug!("Audio cue {:?} at volume {:.2} (no output device)", effect, vol);
    }

    #[cfg(target_arch = "wasm32")]
    fn play_backend(&self, effect: SoundEffect, vol: f32) {
        if effect == SoundEffect::Chime && Self::play_element(CHIME_ELEMENT_ID, vol) {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }
        match effect {
            SoundEffect::Chime => self.play_bell(ctx, vol),
            SoundEffect::Shimmer => self.play_shimmer(ctx, vol),
        }
    }

    /// Restart a page `<audio>` element; false if there is none
    #[cfg(target_arch = "wasm32")]
    fn play_element(id: &str, vol: f32) -> bool {
        use wasm_bindgen::prelude::*;
        use wasm_bindgen::JsCast;

        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id))
            .and_then(|e| e.dyn_into::<web_sys::HtmlAudioElement>().ok())
        else {
            return false;
        };
        element.set_current_time(0.0);
        element.set_volume(vol as f64);
        if let Ok(promise) = element.play() {
            let ignore = Closure::<dyn FnMut(JsValue)>::new(|_| {});
            let _ = promise.catch(&ignore);
            ignore.forget();
        }
        true
    }

    #[cfg(target_arch = "wasm32")]
    fn create_osc(&self, ctx: &AudioContext, freq: f32, osc_type: OscillatorType) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Struck bell: fundamental plus two inharmonic partials
    #[cfg(target_arch = "wasm32")]
    fn play_bell(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (freq, level, decay) in [(1318.5, 0.3, 1.2), (2637.0, 0.12, 0.8), (3950.0, 0.06, 0.5)] {
            if let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) {
                gain.gain().set_value_at_time(vol * level, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.001, t + decay).ok();
                osc.start().ok();
                osc.stop_with_when(t + decay + 0.05).ok();
            }
        }
    }

    /// Rising sparkle arpeggio
    #[cfg(target_arch = "wasm32")]
    fn play_shimmer(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [880.0, 1108.7, 1318.5, 1760.0].iter().enumerate() {
            let delay = i as f64 * 0.06;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain().exponential_ramp_to_value_at_time(0.01, t + 0.3).ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.35).ok();
            }
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_muted_cues_are_dropped() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::Chime);
        audio.set_muted(true);
        audio.play(SoundEffect::Chime);
        assert_eq!(audio.requests(), 1);
    }

    #[test]
    fn test_zero_volume_is_silent() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(-1.0);
        audio.play(SoundEffect::Shimmer);
        assert_eq!(audio.requests(), 0);
    }
}
