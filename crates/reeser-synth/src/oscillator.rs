//! Wavetable oscillator with linear interpolation.
//!
//! The oscillator reads a single-cycle [`Wavetable`] at a fractional index
//! that advances by a fixed increment every sample. The increment is the
//! only activity flag: zero means stopped.

use libm::fmodf;

use crate::wavetable::Wavetable;

/// Table-lookup oscillator.
///
/// Phase is measured in table samples, in `[0, table.len())` for forward
/// playback. All arithmetic is single precision; the float modulo used to
/// wrap phase accumulates rounding error over very long notes, which is
/// accepted.
///
/// # Example
///
/// ```rust
/// use reeser_synth::{Wavetable, WavetableOscillator, Waveform};
///
/// let table = Wavetable::generate(Waveform::Sine, 512);
/// let mut osc = WavetableOscillator::new(table, 48000.0);
/// assert!(!osc.is_playing());
///
/// osc.set_frequency(440.0);
/// assert!(osc.is_playing());
/// let first = osc.next_sample();
/// assert_eq!(first, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct WavetableOscillator {
    table: Wavetable,
    sample_rate: f64,
    /// Fractional read position, in table samples.
    phase: f32,
    /// Table samples advanced per output sample.
    increment: f32,
}

impl WavetableOscillator {
    /// Create a stopped oscillator reading `table` at `sample_rate` Hz.
    pub fn new(table: Wavetable, sample_rate: f64) -> Self {
        Self {
            table,
            sample_rate,
            phase: 0.0,
            increment: 0.0,
        }
    }

    /// Set the playback frequency in Hz.
    ///
    /// No range check. Zero silences the oscillator like [`stop`](Self::stop)
    /// but leaves phase where it is; negative values play the table backwards.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.increment = frequency * self.table.len() as f32 / self.sample_rate as f32;
    }

    /// Return the interpolated sample at the current phase, then advance.
    ///
    /// Valid while stopped too: it keeps returning the sample at the held
    /// phase. Callers use [`is_playing`](Self::is_playing) to decide whether
    /// to mix the result.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = self.interpolate();
        self.phase = fmodf(self.phase + self.increment, self.table.len() as f32);
        sample
    }

    /// Replace the wavetable. Phase is kept as-is.
    ///
    /// If the new table is shorter than the current phase, the next read
    /// wraps the phase into the new length.
    pub fn update_wavetable(&mut self, table: Wavetable) {
        let len = self.table.len();
        self.table = table;
        if self.table.len() != len {
            self.phase = fmodf(self.phase, self.table.len() as f32);
        }
    }

    /// Silence the oscillator: phase and increment both go to zero.
    pub fn stop(&mut self) {
        self.phase = 0.0;
        self.increment = 0.0;
    }

    /// `true` while the increment is non-zero.
    pub fn is_playing(&self) -> bool {
        self.increment != 0.0
    }

    /// Current fractional phase in table samples.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Current per-sample phase increment.
    pub fn increment(&self) -> f32 {
        self.increment
    }

    /// Frequency in Hz implied by the current increment.
    pub fn frequency(&self) -> f32 {
        self.increment * self.sample_rate as f32 / self.table.len() as f32
    }

    /// The table currently being read.
    pub fn table(&self) -> &Wavetable {
        &self.table
    }

    /// Sample rate fixed at construction.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    #[inline]
    fn interpolate(&self) -> f32 {
        let len = self.table.len();
        let n = len as f32;

        // Reverse playback leaves fmod results negative.
        let mut position = if self.phase < 0.0 { self.phase + n } else { self.phase };
        if position >= n {
            position = 0.0;
        }

        let index = position as usize;
        let next = (index + 1) % len;
        let frac = position - index as f32;

        (1.0 - frac) * self.table[index] + frac * self.table[next]
    }
}
