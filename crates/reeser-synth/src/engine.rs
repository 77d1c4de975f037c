//! The detuned synth engine: voice state plus per-block parameter diffing.
//!
//! The host calls [`DetunedSynth::prepare`] once the sample rate is known,
//! then [`DetunedSynth::render`] for every block with that block's events
//! and a parameter snapshot. Parameter changes are detected by comparing
//! the snapshot against the values seen on the previous block.

use crate::block::{process_block, validate_block};
use crate::error::{Result, SynthError};
use crate::event::NoteEvent;
use crate::params::SynthParams;
use crate::voice::DetunedVoice;

/// Parameter values applied on the previous block.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Shadow {
    detune_amount: f32,
    waveform: i32,
}

/// Monophonic detuned wavetable synth.
///
/// # Example
///
/// ```rust
/// use reeser_synth::{DetunedSynth, NoteEvent, SynthParams};
///
/// let mut synth = DetunedSynth::new();
/// synth.prepare(48000.0).unwrap();
///
/// let mut left = vec![0.0f32; 256];
/// let mut right = vec![0.0f32; 256];
/// let params = SynthParams::new(12.0, 1, 0.8);
/// synth
///     .render(&mut [&mut left, &mut right], &[NoteEvent::note_on(32, 38)], params)
///     .unwrap();
///
/// assert!(left[..32].iter().all(|&s| s == 0.0));
/// assert!(left[32..].iter().any(|&s| s != 0.0));
/// assert_eq!(left, right);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DetunedSynth {
    voice: Option<DetunedVoice>,
    sample_rate: f64,
    shadow: Option<Shadow>,
}

impl DetunedSynth {
    /// Create an engine that must be prepared before rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)initialize for `sample_rate` Hz.
    ///
    /// Builds a fresh silent voice with a sine table. Any held note, bend,
    /// and parameter history is discarded; the next `render` applies its
    /// snapshot in full.
    pub fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        self.sample_rate = sample_rate;
        self.voice = Some(DetunedVoice::new(sample_rate));
        self.shadow = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, "detuned synth prepared");
        Ok(())
    }

    /// Render one block.
    ///
    /// `buffer` holds one slice per output channel, all the same length and
    /// pre-zeroed by the caller; synthesized audio is added into channel 0
    /// and then copied to every other channel. `events` must be ordered by
    /// offset, and every offset must lie inside the block.
    ///
    /// Detune must lie in `[0, 100]` and gain in `[0, 1]`; NaN or
    /// out-of-range values reject the block like a bad event does.
    ///
    /// Parameter changes are applied before the first sample: a waveform
    /// change regenerates the table, a detune change retunes a sounding
    /// note, and gain is taken as-is.
    pub fn render(
        &mut self,
        buffer: &mut [&mut [f32]],
        events: &[NoteEvent],
        params: SynthParams,
    ) -> Result<()> {
        let Some(voice) = self.voice.as_mut() else {
            return Err(SynthError::NotPrepared);
        };
        if let Err(err) = validate_block(buffer, events).and_then(|_| params.validate()) {
            #[cfg(feature = "tracing")]
            tracing::debug!(error = %err, "block rejected");
            return Err(err);
        }

        let current = Shadow {
            detune_amount: params.detune_amount,
            waveform: params.waveform,
        };
        let waveform_changed = self.shadow.map_or(params.waveform() != voice.waveform(), |p| {
            p.waveform != current.waveform
        });
        let detune_changed = self
            .shadow
            .is_none_or(|p| p.detune_amount != current.detune_amount);

        if waveform_changed {
            voice.set_waveform(params.waveform());
            #[cfg(feature = "tracing")]
            tracing::debug!(waveform = params.waveform().name(), "wavetable regenerated");
        }
        if detune_changed {
            voice.set_detune_amount(current.detune_amount);
        }
        voice.set_gain(params.gain);
        self.shadow = Some(current);

        process_block(voice, buffer, events)
    }

    /// `true` once `prepare` has succeeded.
    pub fn is_prepared(&self) -> bool {
        self.voice.is_some()
    }

    /// Sample rate given to the last successful `prepare`, or 0.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// The voice, once prepared.
    pub fn voice(&self) -> Option<&DetunedVoice> {
        self.voice.as_ref()
    }
}
