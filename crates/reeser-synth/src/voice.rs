//! The detuned voice: two oscillators playing one note.
//!
//! Both oscillators read the same waveform. Oscillator A is tuned above the
//! note and oscillator B the same number of Hz below it, so the pair beats
//! symmetrically around the true pitch. The pair always starts and stops
//! together.

use crate::block::BlockVoice;
use crate::event::EventKind;
use crate::oscillator::WavetableOscillator;
use crate::params::{DEFAULT_GAIN, MAX_DETUNE_AMOUNT};
use crate::tuning::{detuned_pair, pitch_bend_to_semitones};
use crate::wavetable::{WAVETABLE_LENGTH, Waveform, Wavetable};

/// A monophonic, last-note-priority voice built from a detuned oscillator pair.
///
/// ## Parameters
/// - `detune_amount`: Detune control, 0.01 semitone per unit (0.0 to 100.0, default 0.0)
/// - `waveform`: Shared oscillator waveform (default Sine)
/// - `gain`: Output gain, each oscillator contributes `gain / 2` (0.0 to 1.0, default 0.5)
///
/// Pitch bend persists across notes until the wheel moves again.
///
/// # Example
///
/// ```rust
/// use reeser_synth::DetunedVoice;
///
/// let mut voice = DetunedVoice::new(48000.0);
/// voice.set_detune_amount(20.0);
/// voice.note_on(45);
/// assert!(voice.is_playing());
///
/// let (upper, lower) = voice.frequencies();
/// assert!(upper > 110.0 && lower < 110.0);
///
/// voice.note_off(45);
/// assert!(!voice.is_playing());
/// ```
#[derive(Debug, Clone)]
pub struct DetunedVoice {
    osc_a: WavetableOscillator,
    osc_b: WavetableOscillator,
    waveform: Waveform,
    /// Note currently held, if any.
    note: Option<u8>,
    /// Pitch wheel offset in semitones.
    bend: f32,
    detune_amount: f32,
    gain: f32,
}

impl DetunedVoice {
    /// Create a silent sine voice at `sample_rate` Hz.
    pub fn new(sample_rate: f64) -> Self {
        let table = Wavetable::generate(Waveform::Sine, WAVETABLE_LENGTH);
        Self {
            osc_a: WavetableOscillator::new(table.clone(), sample_rate),
            osc_b: WavetableOscillator::new(table, sample_rate),
            waveform: Waveform::Sine,
            note: None,
            bend: 0.0,
            detune_amount: 0.0,
            gain: DEFAULT_GAIN,
        }
    }

    /// Start `note`, replacing any held note.
    pub fn note_on(&mut self, note: u8) {
        self.note = Some(note);
        self.retune();
    }

    /// Release `note` if it is the one being held.
    ///
    /// A release for any other note is stale and ignored.
    pub fn note_off(&mut self, note: u8) {
        if self.note == Some(note) {
            self.silence();
        }
    }

    /// Release whatever is held.
    pub fn all_notes_off(&mut self) {
        self.silence();
    }

    /// Move the pitch wheel (14-bit, centered at 8192).
    ///
    /// Retunes immediately while sounding; otherwise the bend is kept for
    /// the next note.
    pub fn pitch_bend(&mut self, value: u16) {
        self.bend = pitch_bend_to_semitones(value);
        if self.is_playing() {
            self.retune();
        }
    }

    /// Set the detune control. Retunes immediately while sounding.
    ///
    /// Pinned to `[0, 100]` (NaN reads as 0) so the lower oscillator can
    /// never reach 0 Hz and fall out of the pair.
    pub fn set_detune_amount(&mut self, detune_amount: f32) {
        self.detune_amount = if detune_amount.is_nan() {
            0.0
        } else {
            detune_amount.clamp(0.0, MAX_DETUNE_AMOUNT)
        };
        if self.is_playing() {
            self.retune();
        }
    }

    /// Switch both oscillators to a freshly generated table for `waveform`.
    ///
    /// Phase and pitch are untouched, so a sounding note keeps sounding.
    /// The table is generated once and shared between the pair.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        let table = Wavetable::generate(waveform, WAVETABLE_LENGTH);
        self.osc_a.update_wavetable(table.clone());
        self.osc_b.update_wavetable(table);
    }

    /// Set the output gain.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// `true` while the pair is sounding.
    pub fn is_playing(&self) -> bool {
        debug_assert_eq!(
            self.osc_a.is_playing(),
            self.osc_b.is_playing(),
            "detuned pair out of step"
        );
        self.osc_a.is_playing() && self.osc_b.is_playing()
    }

    /// Note currently held.
    pub fn note(&self) -> Option<u8> {
        self.note
    }

    /// Current pitch wheel offset in semitones.
    pub fn bend_semitones(&self) -> f32 {
        self.bend
    }

    /// Current detune control value.
    pub fn detune_amount(&self) -> f32 {
        self.detune_amount
    }

    /// Current waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current gain.
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Frequencies `(a, b)` the pair is playing, in Hz. Both zero when silent.
    pub fn frequencies(&self) -> (f32, f32) {
        (self.osc_a.frequency(), self.osc_b.frequency())
    }

    /// Upper oscillator.
    pub fn osc_a(&self) -> &WavetableOscillator {
        &self.osc_a
    }

    /// Lower oscillator.
    pub fn osc_b(&self) -> &WavetableOscillator {
        &self.osc_b
    }

    fn retune(&mut self) {
        let Some(note) = self.note else {
            return;
        };
        let pitch = f32::from(note) + self.bend;
        let (upper, lower) = detuned_pair(pitch, self.detune_amount);
        self.osc_a.set_frequency(upper);
        self.osc_b.set_frequency(lower);
    }

    fn silence(&mut self) {
        self.note = None;
        self.osc_a.stop();
        self.osc_b.stop();
    }
}

impl BlockVoice for DetunedVoice {
    #[inline]
    fn render_span(&mut self, out: &mut [f32]) {
        if !self.is_playing() {
            return;
        }
        let half_gain = self.gain / 2.0;
        for sample in out.iter_mut() {
            *sample += self.osc_a.next_sample() * half_gain + self.osc_b.next_sample() * half_gain;
        }
    }

    fn apply_event(&mut self, kind: &EventKind) {
        match *kind {
            EventKind::NoteOn { note } => self.note_on(note),
            EventKind::NoteOff { note } => self.note_off(note),
            EventKind::AllNotesOff => self.all_notes_off(),
            EventKind::PitchBend { value } => self.pitch_bend(value),
        }
    }
}
