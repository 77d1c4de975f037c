//! Pitch math: note numbers, pitch wheel, and detune.

use libm::powf;

/// Reference pitch of A4 in Hz.
pub const A4_FREQUENCY: f32 = 440.0;

/// MIDI note number of A4.
pub const A4_NOTE: f32 = 69.0;

/// Wheel value with no bend applied.
pub const PITCH_BEND_CENTER: u16 = 8192;

/// Largest 14-bit wheel value.
pub const PITCH_BEND_MAX: u16 = 16383;

/// Semitones added per unit of wheel deflection, scaled by the center value.
const PITCH_BEND_SCALE: f32 = 4.0;

/// Semitones added to the note per detune unit before converting to Hz.
///
/// A detune amount `d` therefore places the upper oscillator exactly `d`
/// cents above the note. The lower oscillator is mirrored in Hz, not in
/// cents, so it lands very slightly more than `d` cents below.
pub const DETUNE_SEMITONES_PER_UNIT: f32 = 0.01;

/// Convert a (fractional) MIDI note number to Hz, equal temperament.
///
/// `f = 440 · 2^((note - 69) / 12)`
#[inline]
pub fn midi_to_freq(note: f32) -> f32 {
    A4_FREQUENCY * powf(2.0, (note - A4_NOTE) / 12.0)
}

/// Convert a 14-bit pitch wheel value to a semitone offset.
///
/// `4 · (value - 8192) / 8192`. Centered at 8192; 0 gives -4.0 and 16383
/// gives just under +4.0.
#[inline]
pub fn pitch_bend_to_semitones(value: u16) -> f32 {
    PITCH_BEND_SCALE * (f32::from(value) - f32::from(PITCH_BEND_CENTER))
        / f32::from(PITCH_BEND_CENTER)
}

/// Frequency offset in Hz applied symmetrically to the oscillator pair.
///
/// `freq(note + detune / 100) - freq(note)`
#[inline]
pub fn detune_offset_hz(note: f32, detune_amount: f32) -> f32 {
    midi_to_freq(note + detune_amount * DETUNE_SEMITONES_PER_UNIT) - midi_to_freq(note)
}

/// Cents between the note and the upper oscillator for a detune amount.
#[inline]
pub fn detune_amount_to_cents(detune_amount: f32) -> f32 {
    detune_amount * DETUNE_SEMITONES_PER_UNIT * 100.0
}

/// Frequencies `(upper, lower)` of the detuned pair around `note`.
#[inline]
pub fn detuned_pair(note: f32, detune_amount: f32) -> (f32, f32) {
    let base = midi_to_freq(note);
    let offset = detune_offset_hz(note, detune_amount);
    (base + offset, base - offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_is_440() {
        assert_eq!(midi_to_freq(69.0), 440.0);
    }

    #[test]
    fn octaves_double() {
        assert!((midi_to_freq(81.0) - 880.0).abs() < 1e-3);
        assert!((midi_to_freq(57.0) - 220.0).abs() < 1e-3);
        assert!((midi_to_freq(60.0) - 261.6256).abs() < 1e-2);
    }

    #[test]
    fn wheel_center_is_zero() {
        assert_eq!(pitch_bend_to_semitones(PITCH_BEND_CENTER), 0.0);
        assert_eq!(pitch_bend_to_semitones(0), -4.0);
        assert!((pitch_bend_to_semitones(PITCH_BEND_MAX) - 4.0).abs() < 1e-3);
        assert_eq!(pitch_bend_to_semitones(8192 + 2048), 1.0);
    }

    #[test]
    fn detune_zero_has_no_offset() {
        assert_eq!(detune_offset_hz(60.0, 0.0), 0.0);
        let (a, b) = detuned_pair(69.0, 0.0);
        assert_eq!(a, 440.0);
        assert_eq!(b, 440.0);
    }

    #[test]
    fn full_detune_reaches_one_semitone_up() {
        let offset = detune_offset_hz(69.0, 100.0);
        let expected = midi_to_freq(70.0) - 440.0;
        assert!((offset - expected).abs() < 1e-3);
        assert_eq!(detune_amount_to_cents(100.0), 100.0);
    }

    #[test]
    fn pair_is_symmetric_about_base() {
        for &(note, d) in &[(36.0, 12.5), (60.0, 50.0), (96.0, 100.0)] {
            let (a, b) = detuned_pair(note, d);
            let mid = (a + b) / 2.0;
            let base = midi_to_freq(note);
            assert!((mid - base).abs() <= base * 1e-5, "note {note} d {d}");
            assert!(a > base && b < base);
        }
    }
}
