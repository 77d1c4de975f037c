//! Reeser Synth - detuned wavetable synthesis core
//!
//! This crate renders a monophonic "reese" voice: two wavetable oscillators
//! playing one note, detuned symmetrically around its pitch. Audio is
//! produced block by block, with every note and pitch-wheel event taking
//! effect at the exact sample it is stamped with.
//!
//! # Core Components
//!
//! ## Wavetables and Oscillators
//!
//! - [`Wavetable`] - One immutable period of a waveform
//! - [`Waveform`] - Sine, saw, or square, selected by host integer
//! - [`WavetableOscillator`] - Phase accumulator with linear interpolation
//!
//! ```rust
//! use reeser_synth::{Waveform, Wavetable, WavetableOscillator, WAVETABLE_LENGTH};
//!
//! let table = Wavetable::generate(Waveform::Saw, WAVETABLE_LENGTH);
//! let mut osc = WavetableOscillator::new(table, 48000.0);
//! osc.set_frequency(110.0);
//!
//! let sample = osc.next_sample();
//! assert_eq!(sample, 1.0);
//! ```
//!
//! ## Engines
//!
//! - [`DetunedSynth`] - The detuned oscillator pair with last-note priority
//! - [`NoteBankSynth`] - One oscillator per MIDI note via [`OscillatorBank`]
//!
//! Both engines take a [`SynthParams`] snapshot per block. A control thread
//! can publish values through [`SharedParams`] without locking.
//!
//! ## Events
//!
//! - [`NoteEvent`] / [`EventKind`] - Block-relative timestamped events
//! - [`EventKind::from_midi`] - Decode raw MIDI channel messages
//!
//! ## Custom Voices
//!
//! Anything implementing [`BlockVoice`] can be driven by [`process_block`],
//! which handles event splitting and channel mirroring.
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc` for table storage).
//! Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! reeser-synth = { version = "0.1", default-features = false }
//! ```
//!
//! # Example: Rendering a Block
//!
//! ```rust
//! use reeser_synth::{DetunedSynth, NoteEvent, SynthParams};
//!
//! let mut synth = DetunedSynth::new();
//! synth.prepare(48000.0)?;
//!
//! // 25 units = a quarter semitone above the note for the upper oscillator
//! let params = SynthParams::new(25.0, 1, 0.7);
//!
//! let mut left = vec![0.0f32; 512];
//! let mut right = vec![0.0f32; 512];
//! let events = [NoteEvent::note_on(0, 36), NoteEvent::note_off(400, 36)];
//! synth.render(&mut [&mut left, &mut right], &events, params)?;
//!
//! assert!(left[400..].iter().all(|&s| s == 0.0));
//! # Ok::<(), reeser_synth::SynthError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bank;
pub mod block;
pub mod engine;
pub mod error;
pub mod event;
pub mod oscillator;
pub mod params;
pub mod tuning;
pub mod voice;
pub mod wavetable;

// Re-export main types at crate root
pub use bank::{BankVoice, NOTE_COUNT, NoteBankSynth, OscillatorBank};
pub use block::{BlockVoice, process_block, validate_block};
pub use engine::DetunedSynth;
pub use error::{Result, SynthError};
pub use event::{EventKind, MAX_NOTE, NoteEvent, validate_events};
pub use oscillator::WavetableOscillator;
pub use params::{DEFAULT_GAIN, MAX_DETUNE_AMOUNT, SharedParams, SynthParams};
pub use tuning::{
    DETUNE_SEMITONES_PER_UNIT, PITCH_BEND_CENTER, PITCH_BEND_MAX, detune_amount_to_cents,
    detune_offset_hz, detuned_pair, midi_to_freq, pitch_bend_to_semitones,
};
pub use voice::DetunedVoice;
pub use wavetable::{SIMPLE_WAVETABLE_LENGTH, WAVETABLE_LENGTH, Waveform, Wavetable};
