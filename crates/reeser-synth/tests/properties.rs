//! Property-based tests for the synthesis core.
//!
//! Uses proptest to check the oscillator period, detune symmetry around the
//! note, and output bounds for arbitrary event batches.

use proptest::prelude::*;
use reeser_synth::{
    DetunedSynth, DetunedVoice, NoteEvent, SynthParams, WAVETABLE_LENGTH, Waveform, Wavetable,
    WavetableOscillator, midi_to_freq,
};

/// Circular distance between two phases in a table of `len` samples.
fn phase_distance(a: f32, b: f32, len: f32) -> f32 {
    let d = (a - b).rem_euclid(len);
    d.min(len - d)
}

fn waveform_strategy() -> impl Strategy<Value = Waveform> {
    prop::sample::select(Waveform::ALL.to_vec())
}

fn event_strategy(frames: usize) -> impl Strategy<Value = NoteEvent> {
    (0..frames, 0u8..4, 0u8..=127, 0u16..=16383).prop_map(|(offset, kind, note, bend)| {
        match kind {
            0 => NoteEvent::note_on(offset, note),
            1 => NoteEvent::note_off(offset, note),
            2 => NoteEvent::all_notes_off(offset),
            _ => NoteEvent::pitch_bend(offset, bend),
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// round(sr / f) samples bring the phase back to within one increment
    /// of where it started.
    #[test]
    fn one_period_returns_phase(
        sample_rate in 8000.0f64..=192000.0,
        frequency in 20.0f32..=4000.0,
        waveform in waveform_strategy(),
    ) {
        let table = Wavetable::generate(waveform, WAVETABLE_LENGTH);
        let mut osc = WavetableOscillator::new(table, sample_rate);
        osc.set_frequency(frequency);

        let steps = (sample_rate / f64::from(frequency)).round() as usize;
        for _ in 0..steps {
            osc.next_sample();
        }

        let len = WAVETABLE_LENGTH as f32;
        let tolerance = osc.increment().abs().max(1.0);
        let drift = phase_distance(osc.phase(), 0.0, len);
        prop_assert!(drift <= tolerance, "drift {drift} > {tolerance}");
    }

    /// The pair is centered on the note for every note and detune amount.
    #[test]
    fn detune_is_symmetric(note in 0u8..=127, detune in 0.0f32..=100.0) {
        let mut voice = DetunedVoice::new(48000.0);
        voice.set_detune_amount(detune);
        voice.note_on(note);

        let (a, b) = voice.frequencies();
        let base = midi_to_freq(f32::from(note));
        prop_assert!(a >= b);
        prop_assert!(((a + b) / 2.0 - base).abs() <= base * 1e-4);
    }

    /// Output never exceeds gain, and every channel carries the same signal.
    #[test]
    fn output_bounded_and_mirrored(
        mut events in prop::collection::vec(event_strategy(256), 0..12),
        detune in 0.0f32..=100.0,
        selector in 0i32..3,
        gain in 0.0f32..=1.0,
    ) {
        events.sort_by_key(|e| e.offset);

        let mut synth = DetunedSynth::new();
        synth.prepare(44100.0).unwrap();

        let mut left = vec![0.0f32; 256];
        let mut right = vec![0.0f32; 256];
        let params = SynthParams::new(detune, selector, gain);
        synth.render(&mut [&mut left, &mut right], &events, params).unwrap();

        for &s in &left {
            prop_assert!(s.is_finite());
            prop_assert!(s.abs() <= gain + 1e-5, "sample {s} exceeds gain {gain}");
        }
        prop_assert_eq!(left, right);
    }
}
