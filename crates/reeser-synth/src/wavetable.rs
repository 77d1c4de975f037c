//! Single-cycle wavetables.
//!
//! A [`Wavetable`] holds exactly one period of a waveform. Tables are
//! immutable once built; changing the waveform means generating a new table
//! and handing it to the oscillator wholesale.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::f32::consts::TAU;
use core::ops::Deref;
use libm::sinf;

use crate::error::{Result, SynthError};

/// Table length used by the detuned voice.
pub const WAVETABLE_LENGTH: usize = 512;

/// Table length used by the note-indexed oscillator bank.
pub const SIMPLE_WAVETABLE_LENGTH: usize = 64;

/// Waveform shapes that can be generated into a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// Sine, starting at zero and rising.
    #[default]
    Sine,
    /// Descending sawtooth from +1 to -1.
    Saw,
    /// Square, low for the first half of the cycle and high for the second.
    Square,
}

impl Waveform {
    /// All generatable waveforms in selector order.
    pub const ALL: [Waveform; 3] = [Waveform::Sine, Waveform::Saw, Waveform::Square];

    /// Map a host selector to a waveform.
    ///
    /// `0` is sine, `1` is saw, `2` is square. Any other value falls back
    /// to sine.
    pub fn from_selector(selector: i32) -> Self {
        match selector {
            1 => Waveform::Saw,
            2 => Waveform::Square,
            _ => Waveform::Sine,
        }
    }

    /// Host selector value for this waveform.
    pub fn selector(self) -> i32 {
        match self {
            Waveform::Sine => 0,
            Waveform::Saw => 1,
            Waveform::Square => 2,
        }
    }

    /// Lowercase display name.
    pub fn name(self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Saw => "saw",
            Waveform::Square => "square",
        }
    }
}

/// One period of a periodic waveform.
///
/// Always non-empty. Dereferences to `[f32]` for read access.
///
/// # Example
///
/// ```rust
/// use reeser_synth::{Wavetable, Waveform, WAVETABLE_LENGTH};
///
/// let table = Wavetable::generate(Waveform::Saw, WAVETABLE_LENGTH);
/// assert_eq!(table.len(), 512);
/// assert_eq!(table[0], 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Wavetable {
    samples: Box<[f32]>,
}

impl Wavetable {
    /// Generate `len` samples of `waveform`.
    ///
    /// - Sine: `sin(2π·i/N)`
    /// - Saw: `1 - 2·i/(N-1)`
    /// - Square: `-1` for `i < N/2`, `+1` otherwise
    ///
    /// `len` is raised to 1 if zero. A one-sample saw is `[1.0]`.
    pub fn generate(waveform: Waveform, len: usize) -> Self {
        let n = len.max(1);
        let samples: Vec<f32> = match waveform {
            Waveform::Sine => (0..n)
                .map(|i| sinf(TAU * i as f32 / n as f32))
                .collect(),
            Waveform::Saw if n == 1 => alloc::vec![1.0],
            Waveform::Saw => {
                let last = (n - 1) as f32;
                (0..n).map(|i| 1.0 - 2.0 * i as f32 / last).collect()
            }
            Waveform::Square => (0..n)
                .map(|i| if i < n / 2 { -1.0 } else { 1.0 })
                .collect(),
        };
        Self {
            samples: samples.into_boxed_slice(),
        }
    }

    /// Generate a table from a host selector, falling back to sine.
    pub fn from_selector(selector: i32, len: usize) -> Self {
        Self::generate(Waveform::from_selector(selector), len)
    }

    /// Wrap arbitrary single-cycle samples.
    pub fn from_samples(samples: Vec<f32>) -> Result<Self> {
        if samples.is_empty() {
            return Err(SynthError::EmptyWavetable);
        }
        Ok(Self {
            samples: samples.into_boxed_slice(),
        })
    }

    /// Borrow the samples.
    pub fn as_slice(&self) -> &[f32] {
        &self.samples
    }
}

impl Deref for Wavetable {
    type Target = [f32];

    fn deref(&self) -> &[f32] {
        &self.samples
    }
}
