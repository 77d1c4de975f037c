//! Host parameters and their hand-off to the audio thread.
//!
//! [`SynthParams`] is the per-block snapshot `render` consumes.
//! [`SharedParams`] is the store a control thread writes into and the audio
//! thread samples once per block. Values are f32 bit-cast into `AtomicU32`
//! so neither side ever blocks.

use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

use crate::error::{Result, SynthError};
use crate::wavetable::Waveform;

/// Upper bound of the detune control.
pub const MAX_DETUNE_AMOUNT: f32 = 100.0;

/// Default output gain.
pub const DEFAULT_GAIN: f32 = 0.5;

/// Snapshot of the three host parameters for one block.
///
/// ## Parameters
/// - `detune_amount`: Detune control, 0.01 semitone per unit (0.0 to 100.0, default 0.0)
/// - `waveform`: Waveform selector, 0 = sine, 1 = saw, 2 = square (default 0)
/// - `gain`: Output gain (0.0 to 1.0, default 0.5)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthParams {
    /// Detune control value.
    pub detune_amount: f32,
    /// Waveform selector. Unknown values render as sine.
    pub waveform: i32,
    /// Linear output gain.
    pub gain: f32,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            detune_amount: 0.0,
            waveform: 0,
            gain: DEFAULT_GAIN,
        }
    }
}

impl SynthParams {
    /// Create a snapshot from raw values.
    pub fn new(detune_amount: f32, waveform: i32, gain: f32) -> Self {
        Self {
            detune_amount,
            waveform,
            gain,
        }
    }

    /// The waveform the selector resolves to.
    pub fn waveform(&self) -> Waveform {
        Waveform::from_selector(self.waveform)
    }

    /// Check that detune and gain are finite and inside their host ranges.
    ///
    /// The waveform selector is not checked; unknown values render as sine.
    pub fn validate(&self) -> Result<()> {
        check_range("detune_amount", self.detune_amount, 0.0, MAX_DETUNE_AMOUNT)?;
        check_range("gain", self.gain, 0.0, 1.0)
    }

    /// Copy with every value pinned into its host range.
    ///
    /// NaN stays NaN; [`validate`](Self::validate) still rejects it.
    pub fn clamped(self) -> Self {
        Self {
            detune_amount: self.detune_amount.clamp(0.0, MAX_DETUNE_AMOUNT),
            waveform: self.waveform.clamp(0, 2),
            gain: self.gain.clamp(0.0, 1.0),
        }
    }
}

fn check_range(name: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    // NaN is never contained
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SynthError::ParameterOutOfRange {
            name,
            value,
            min,
            max,
        })
    }
}

/// Lock-free single-writer/single-reader parameter store.
///
/// The control side calls the `set_*` methods; the audio side calls
/// [`snapshot`](Self::snapshot) once at the top of each block. Each value is
/// published independently, so a snapshot taken mid-update may pair a new
/// detune with an old gain. The next block picks up the rest.
///
/// # Example
///
/// ```rust
/// use reeser_synth::SharedParams;
///
/// let shared = SharedParams::default();
/// shared.set_detune_amount(25.0);
/// shared.set_waveform(1);
///
/// let snap = shared.snapshot();
/// assert_eq!(snap.detune_amount, 25.0);
/// assert_eq!(snap.waveform, 1);
/// ```
#[derive(Debug)]
pub struct SharedParams {
    detune_amount: AtomicU32,
    waveform: AtomicI32,
    gain: AtomicU32,
}

impl Default for SharedParams {
    fn default() -> Self {
        Self::new(SynthParams::default())
    }
}

impl SharedParams {
    /// Create a store holding `initial`.
    pub fn new(initial: SynthParams) -> Self {
        Self {
            detune_amount: AtomicU32::new(initial.detune_amount.to_bits()),
            waveform: AtomicI32::new(initial.waveform),
            gain: AtomicU32::new(initial.gain.to_bits()),
        }
    }

    /// Publish a new detune amount.
    pub fn set_detune_amount(&self, value: f32) {
        self.detune_amount.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Publish a new waveform selector.
    pub fn set_waveform(&self, selector: i32) {
        self.waveform.store(selector, Ordering::Relaxed);
    }

    /// Publish a new gain.
    pub fn set_gain(&self, value: f32) {
        self.gain.store(value.to_bits(), Ordering::Relaxed);
    }

    /// Publish all three values.
    pub fn store(&self, params: SynthParams) {
        self.set_detune_amount(params.detune_amount);
        self.set_waveform(params.waveform);
        self.set_gain(params.gain);
    }

    /// Read the latest published values.
    pub fn snapshot(&self) -> SynthParams {
        SynthParams {
            detune_amount: f32::from_bits(self.detune_amount.load(Ordering::Relaxed)),
            waveform: self.waveform.load(Ordering::Relaxed),
            gain: f32::from_bits(self.gain.load(Ordering::Relaxed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_host_defaults() {
        let p = SynthParams::default();
        assert_eq!(p.detune_amount, 0.0);
        assert_eq!(p.waveform, 0);
        assert_eq!(p.gain, 0.5);
        assert_eq!(SharedParams::default().snapshot(), p);
    }

    #[test]
    fn clamped_pins_ranges() {
        let p = SynthParams::new(250.0, 7, -0.5).clamped();
        assert_eq!(p, SynthParams::new(100.0, 2, 0.0));
        let q = SynthParams::new(-3.0, -1, 4.0).clamped();
        assert_eq!(q, SynthParams::new(0.0, 0, 1.0));
    }

    #[test]
    fn validate_accepts_host_ranges() {
        assert_eq!(SynthParams::default().validate(), Ok(()));
        assert_eq!(SynthParams::new(100.0, 9, 1.0).validate(), Ok(()));
        assert_eq!(SynthParams::new(0.0, -1, 0.0).validate(), Ok(()));
    }

    #[test]
    fn validate_rejects_out_of_range_and_nan() {
        assert!(matches!(
            SynthParams::new(1200.0, 0, 1.0).validate(),
            Err(SynthError::ParameterOutOfRange { name: "detune_amount", .. })
        ));
        assert!(matches!(
            SynthParams::new(0.0, 0, f32::NAN).validate(),
            Err(SynthError::ParameterOutOfRange { name: "gain", .. })
        ));
        assert!(SynthParams::new(f32::INFINITY, 0, 0.5).validate().is_err());
        assert!(SynthParams::new(0.0, 0, -0.1).validate().is_err());
        // clamping cannot repair NaN
        assert!(SynthParams::new(f32::NAN, 0, 0.5).clamped().validate().is_err());
    }

    #[test]
    fn unknown_selector_resolves_to_sine() {
        assert_eq!(SynthParams::new(0.0, 9, 1.0).waveform(), Waveform::Sine);
    }

    #[test]
    fn store_then_snapshot_round_trips() {
        let shared = SharedParams::default();
        let p = SynthParams::new(33.3, 2, 0.8);
        shared.store(p);
        assert_eq!(shared.snapshot(), p);
    }

    #[cfg(feature = "std")]
    #[test]
    fn snapshot_sees_writes_from_another_thread() {
        use std::sync::Arc;

        let shared = Arc::new(SharedParams::default());
        let writer = Arc::clone(&shared);
        std::thread::spawn(move || {
            writer.set_gain(0.25);
            writer.set_waveform(1);
        })
        .join()
        .unwrap();

        let snap = shared.snapshot();
        assert_eq!(snap.gain, 0.25);
        assert_eq!(snap.waveform, 1);
    }
}
