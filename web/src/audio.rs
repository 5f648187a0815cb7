use std::cell::RefCell;

use animaru_core::Effect;
use wasm_bindgen::JsValue;
use web_sys::AudioContext;

/// Decorative sounds, failures are never allowed to reach game logic.
pub(crate) trait Feedback {
    fn place_tone(&self);
    fn completion_chord(&self);
}

pub(crate) fn play_feedback(feedback: &impl Feedback, effects: &[Effect]) {
    for effect in effects {
        match effect {
            Effect::PlayPlaceTone => feedback.place_tone(),
            Effect::PlayCompletionChord => feedback.completion_chord(),
            _ => {}
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Tone {
    frequency: f32,
    volume: f32,
    /// Seconds from now.
    offset: f64,
    /// Seconds until the tone fades out.
    duration: f64,
}

const FADE_TO: f32 = 0.01;

const PLACE_TONE: Tone = Tone {
    frequency: 300.0,
    volume: 0.1,
    offset: 0.0,
    duration: 0.1,
};

const CHORD_FREQUENCIES: [f32; 4] = [523.25, 659.25, 783.99, 1046.50];
const CHORD_STEP: f64 = 0.1;

fn chord_tones() -> impl Iterator<Item = Tone> {
    CHORD_FREQUENCIES
        .into_iter()
        .enumerate()
        .map(|(i, frequency)| Tone {
            frequency,
            volume: 0.2,
            offset: i as f64 * CHORD_STEP,
            duration: 0.3,
        })
}

/// Web Audio oscillator sounds.
///
/// Browsers refuse to start audio before the first user gesture, so the context is only created by [`Self::unlock`].
/// Until then every sound is silently skipped.
#[derive(Debug, Default)]
pub(crate) struct WebAudioFeedback {
    context: RefCell<Option<AudioContext>>,
}

impl WebAudioFeedback {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_unlocked(&self) -> bool {
        self.context.borrow().is_some()
    }

    pub(crate) fn unlock(&self) {
        if self.is_unlocked() {
            return;
        }
        match AudioContext::new() {
            Ok(context) => {
                log::debug!("audio unlocked");
                self.context.replace(Some(context));
            }
            Err(err) => log::debug!("audio unavailable: {:?}", err),
        }
    }

    fn play(&self, tone: Tone) {
        if let Err(err) = self.try_play(tone) {
            log::debug!("could not play {:?}: {:?}", tone, err);
        }
    }

    fn try_play(&self, tone: Tone) -> Result<(), JsValue> {
        let context = self.context.borrow();
        let Some(context) = context.as_ref() else {
            return Ok(());
        };

        let oscillator = context.create_oscillator()?;
        let gain = context.create_gain()?;
        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&context.destination())?;

        let start = context.current_time() + tone.offset;
        let end = start + tone.duration;
        oscillator.frequency().set_value_at_time(tone.frequency, start)?;
        gain.gain().set_value_at_time(tone.volume, start)?;
        gain.gain().exponential_ramp_to_value_at_time(FADE_TO, end)?;

        oscillator.start_with_when(start)?;
        oscillator.stop_with_when(end)?;
        Ok(())
    }
}

impl Feedback for WebAudioFeedback {
    fn place_tone(&self) {
        self.play(PLACE_TONE);
    }

    fn completion_chord(&self) {
        for tone in chord_tones() {
            self.play(tone);
        }
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn sounds_before_unlock_are_skipped() {
        let feedback = WebAudioFeedback::new();
        assert!(!feedback.is_unlocked());
        feedback.place_tone();
        feedback.completion_chord();
        assert!(!feedback.is_unlocked());
    }
}
