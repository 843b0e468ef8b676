//! Landing sound
//!
//! Plays the page's `<audio>` element when one is provided, otherwise
//! synthesizes a short pop with the Web Audio API. Playback failures are
//! logged and otherwise ignored.

use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AudioContext, Document, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

/// Where the pop comes from
enum Source {
    /// A page-provided clip, rewound before every play
    Element(HtmlAudioElement),
    /// Procedural fallback
    Synth(AudioContext),
    None,
}

/// Audio manager for the widget
pub struct AudioManager {
    source: Source,
    volume: f32,
}

impl AudioManager {
    /// Look up `<audio id="{element_id}">`, falling back to a synth
    pub fn new(document: &Document, element_id: &str, volume: f32) -> Self {
        let element = document
            .get_element_by_id(element_id)
            .and_then(|el| el.dyn_into::<HtmlAudioElement>().ok());

        let source = match element {
            Some(el) => {
                log::info!("Using <audio id=\"{element_id}\"> for landing sound");
                Source::Element(el)
            }
            None => match AudioContext::new() {
                Ok(ctx) => Source::Synth(ctx),
                Err(e) => {
                    log::warn!("Failed to create AudioContext - audio disabled: {e:?}");
                    Source::None
                }
            },
        };

        Self {
            source,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Play the landing pop from the start, cutting off any earlier one
    pub fn play_landing(&self, impact_speed: f32) {
        if self.volume <= 0.0 {
            return;
        }
        match &self.source {
            Source::Element(el) => self.play_element(el),
            Source::Synth(ctx) => self.play_pop(ctx, impact_speed),
            Source::None => {}
        }
    }

    fn play_element(&self, el: &HtmlAudioElement) {
        el.set_volume(self.volume as f64);
        el.set_current_time(0.0);
        match el.play() {
            Ok(promise) => {
                // Autoplay policy rejects the promise before the first user gesture
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::warn!("Landing sound rejected: {e:?}");
                    }
                });
            }
            Err(e) => log::warn!("Landing sound failed: {e:?}"),
        }
    }

    /// Create an oscillator with gain envelope
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

    /// Pop - quick downward sine chirp, louder for harder impacts
    fn play_pop(&self, ctx: &AudioContext, impact_speed: f32) {
        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let Some((osc, gain)) = self.create_osc(ctx, 520.0, OscillatorType::Sine) else {
            log::warn!("Failed to build pop oscillator");
            return;
        };
        let t = ctx.current_time();
        let level = self.volume * (0.3 + (impact_speed / 10.0).min(0.5));

        gain.gain().set_value_at_time(level, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.12)
            .ok();
        osc.frequency().set_value_at_time(520.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(140.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.15).ok();
    }
}
