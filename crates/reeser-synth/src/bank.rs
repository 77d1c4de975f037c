//! Note-indexed oscillator bank.
//!
//! One oscillator per MIDI note, so any number of notes can sound at once.
//! Each note owns its oscillator outright: a note-off stops exactly that
//! note and nothing else. Tables are the short 64-sample variant.

use alloc::vec::Vec;

use crate::block::{BlockVoice, process_block, validate_block};
use crate::error::{Result, SynthError};
use crate::event::{EventKind, NoteEvent};
use crate::oscillator::WavetableOscillator;
use crate::params::{DEFAULT_GAIN, SynthParams};
use crate::tuning::{midi_to_freq, pitch_bend_to_semitones};
use crate::wavetable::{SIMPLE_WAVETABLE_LENGTH, Waveform, Wavetable};

/// Number of oscillators in a bank, one per MIDI note.
pub const NOTE_COUNT: usize = 128;

/// Arena of [`NOTE_COUNT`] oscillators indexed by note number.
///
/// Indexing is checked: anything past note 127 is an error rather than a
/// panic.
#[derive(Debug, Clone)]
pub struct OscillatorBank {
    oscillators: Vec<WavetableOscillator>,
}

impl OscillatorBank {
    /// Build a silent bank where every oscillator reads a copy of `table`.
    pub fn new(table: &Wavetable, sample_rate: f64) -> Self {
        let oscillators = (0..NOTE_COUNT)
            .map(|_| WavetableOscillator::new(table.clone(), sample_rate))
            .collect();
        Self { oscillators }
    }

    /// Oscillator for `note`.
    pub fn get(&self, note: usize) -> Result<&WavetableOscillator> {
        self.oscillators
            .get(note)
            .ok_or(SynthError::NoteOutOfRange(note))
    }

    /// Mutable oscillator for `note`.
    pub fn get_mut(&mut self, note: usize) -> Result<&mut WavetableOscillator> {
        self.oscillators
            .get_mut(note)
            .ok_or(SynthError::NoteOutOfRange(note))
    }

    /// Give every oscillator a copy of `table`, keeping phases.
    pub fn set_wavetable(&mut self, table: &Wavetable) {
        for osc in &mut self.oscillators {
            osc.update_wavetable(table.clone());
        }
    }

    /// Stop every oscillator.
    pub fn stop_all(&mut self) {
        for osc in &mut self.oscillators {
            osc.stop();
        }
    }

    /// Notes currently sounding, lowest first.
    pub fn active_notes(&self) -> impl Iterator<Item = usize> + '_ {
        self.oscillators
            .iter()
            .enumerate()
            .filter(|(_, osc)| osc.is_playing())
            .map(|(note, _)| note)
    }

    /// Number of sounding oscillators.
    pub fn active_count(&self) -> usize {
        self.active_notes().count()
    }

    /// All oscillators in note order.
    pub fn iter(&self) -> impl Iterator<Item = &WavetableOscillator> {
        self.oscillators.iter()
    }
}

/// Bank plus the state the events act on.
#[derive(Debug, Clone)]
pub struct BankVoice {
    bank: OscillatorBank,
    waveform: Waveform,
    bend: f32,
    gain: f32,
}

impl BankVoice {
    /// Silent sine bank at `sample_rate` Hz.
    pub fn new(sample_rate: f64) -> Self {
        let table = Wavetable::generate(Waveform::Sine, SIMPLE_WAVETABLE_LENGTH);
        Self {
            bank: OscillatorBank::new(&table, sample_rate),
            waveform: Waveform::Sine,
            bend: 0.0,
            gain: DEFAULT_GAIN,
        }
    }

    /// Start `note` at its pitch plus the current bend.
    pub fn note_on(&mut self, note: u8) {
        let freq = midi_to_freq(f32::from(note) + self.bend);
        if let Ok(osc) = self.bank.get_mut(usize::from(note)) {
            osc.set_frequency(freq);
        }
    }

    /// Stop `note` only.
    pub fn note_off(&mut self, note: u8) {
        if let Ok(osc) = self.bank.get_mut(usize::from(note)) {
            osc.stop();
        }
    }

    /// Stop everything.
    pub fn all_notes_off(&mut self) {
        self.bank.stop_all();
    }

    /// Move the pitch wheel and retune every sounding note.
    pub fn pitch_bend(&mut self, value: u16) {
        self.bend = pitch_bend_to_semitones(value);
        let bend = self.bend;
        for (note, osc) in (0u8..).zip(self.bank.oscillators.iter_mut()) {
            if osc.is_playing() {
                osc.set_frequency(midi_to_freq(f32::from(note) + bend));
            }
        }
    }

    /// Retable the whole bank with `waveform`.
    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.waveform = waveform;
        let table = Wavetable::generate(waveform, SIMPLE_WAVETABLE_LENGTH);
        self.bank.set_wavetable(&table);
    }

    /// Set per-oscillator gain.
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
    }

    /// The oscillator arena.
    pub fn bank(&self) -> &OscillatorBank {
        &self.bank
    }

    /// Current waveform.
    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// Current pitch wheel offset in semitones.
    pub fn bend_semitones(&self) -> f32 {
        self.bend
    }
}

impl BlockVoice for BankVoice {
    fn render_span(&mut self, out: &mut [f32]) {
        let gain = self.gain;
        for osc in self.bank.oscillators.iter_mut().filter(|o| o.is_playing()) {
            for sample in out.iter_mut() {
                *sample += osc.next_sample() * gain;
            }
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

/// Engine driving an [`OscillatorBank`], one oscillator per held note.
///
/// Takes the same parameter snapshot as [`DetunedSynth`](crate::DetunedSynth);
/// the detune control has no effect here since there is no oscillator pair.
///
/// # Example
///
/// ```rust
/// use reeser_synth::{NoteBankSynth, NoteEvent, SynthParams};
///
/// let mut synth = NoteBankSynth::new();
/// synth.prepare(44100.0).unwrap();
///
/// let mut out = vec![0.0f32; 128];
/// let events = [NoteEvent::note_on(0, 60), NoteEvent::note_on(0, 64)];
/// synth.render(&mut [&mut out], &events, SynthParams::default()).unwrap();
///
/// assert_eq!(synth.voice().unwrap().bank().active_count(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteBankSynth {
    voice: Option<BankVoice>,
    sample_rate: f64,
    previous_waveform: Option<i32>,
}

impl NoteBankSynth {
    /// Create an engine that must be prepared before rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)build the bank for `sample_rate` Hz.
    pub fn prepare(&mut self, sample_rate: f64) -> Result<()> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(SynthError::InvalidSampleRate(sample_rate));
        }
        self.sample_rate = sample_rate;
        self.voice = Some(BankVoice::new(sample_rate));
        self.previous_waveform = None;

        #[cfg(feature = "tracing")]
        tracing::debug!(sample_rate, oscillators = NOTE_COUNT, "note bank prepared");
        Ok(())
    }

    /// Render one block. Same buffer and event contract as
    /// [`DetunedSynth::render`](crate::DetunedSynth::render).
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

        let waveform_changed = self
            .previous_waveform
            .map_or(params.waveform() != voice.waveform(), |p| p != params.waveform);
        if waveform_changed {
            voice.set_waveform(params.waveform());
        }
        voice.set_gain(params.gain);
        self.previous_waveform = Some(params.waveform);

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

    /// The bank voice, once prepared.
    pub fn voice(&self) -> Option<&BankVoice> {
        self.voice.as_ref()
    }
}
