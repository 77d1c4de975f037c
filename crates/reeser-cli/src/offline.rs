//! Offline block rendering through the detuned engine.

use anyhow::Context;
use indicatif::ProgressBar;
use reeser_synth::{DetunedSynth, NoteEvent, SynthParams};

use crate::schedule::Schedule;

/// Fixed settings for one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderSettings {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Frames per engine call.
    pub block_size: usize,
    /// Output channel count.
    pub channels: usize,
}

/// Render `total_frames` frames of `schedule` and return one buffer per
/// channel.
///
/// Each block is zeroed before the engine sees it and receives only the
/// events that fall inside it.
pub fn render_schedule(
    settings: RenderSettings,
    params: SynthParams,
    schedule: &Schedule,
    total_frames: usize,
    progress: &ProgressBar,
) -> anyhow::Result<Vec<Vec<f32>>> {
    let RenderSettings {
        sample_rate,
        block_size,
        channels,
    } = settings;
    anyhow::ensure!(block_size > 0, "block size must be at least 1");
    anyhow::ensure!(channels > 0, "at least one output channel is required");

    let mut synth = DetunedSynth::new();
    synth
        .prepare(f64::from(sample_rate))
        .with_context(|| format!("cannot run at {sample_rate} Hz"))?;

    let mut output: Vec<Vec<f32>> = (0..channels)
        .map(|_| Vec::with_capacity(total_frames))
        .collect();
    let mut block = vec![vec![0.0f32; block_size]; channels];
    let mut events: Vec<NoteEvent> = Vec::new();

    let mut start = 0;
    while start < total_frames {
        let frames = block_size.min(total_frames - start);
        schedule.block_events(start as u64, frames, &mut events);

        let mut refs: Vec<&mut [f32]> = block
            .iter_mut()
            .map(|channel| {
                let span = &mut channel[..frames];
                span.fill(0.0);
                span
            })
            .collect();
        synth
            .render(&mut refs, &events, params)
            .with_context(|| format!("render failed at frame {start}"))?;

        for (out, channel) in output.iter_mut().zip(&block) {
            out.extend_from_slice(&channel[..frames]);
        }
        start += frames;
        progress.inc(frames as u64);
    }

    tracing::debug!(frames = total_frames, channels, block_size, "render complete");
    Ok(output)
}

/// Peak and RMS of a signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalStats {
    /// Largest absolute sample.
    pub peak: f32,
    /// Root mean square.
    pub rms: f32,
}

impl SignalStats {
    /// Measure `samples`. An empty slice measures as silence.
    pub fn measure(samples: &[f32]) -> Self {
        if samples.is_empty() {
            return Self {
                peak: 0.0,
                rms: 0.0,
            };
        }
        let peak = samples.iter().fold(0.0f32, |m, s| m.max(s.abs()));
        let sum_sq: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
        let rms = (sum_sq / samples.len() as f64).sqrt() as f32;
        Self { peak, rms }
    }

    /// Peak in dBFS.
    pub fn peak_db(&self) -> f32 {
        to_db(self.peak)
    }

    /// RMS in dBFS.
    pub fn rms_db(&self) -> f32 {
        to_db(self.rms)
    }
}

fn to_db(linear: f32) -> f32 {
    20.0 * linear.max(1e-10).log10()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reeser_config::ScoreNote;

    fn settings(block_size: usize) -> RenderSettings {
        RenderSettings {
            sample_rate: 48000,
            block_size,
            channels: 2,
        }
    }

    #[test]
    fn renders_requested_length_with_partial_last_block() {
        let schedule = Schedule::from_notes(&[ScoreNote::new(69, 0.0, 0.01)], 48000);
        let out = render_schedule(
            settings(100),
            SynthParams::new(0.0, 0, 1.0),
            &schedule,
            1050,
            &ProgressBar::hidden(),
        )
        .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].len(), 1050);
        assert_eq!(out[0], out[1]);
        assert!(out[0][..480].iter().any(|&s| s != 0.0));
        assert!(out[0][480..].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn block_size_does_not_change_audio() {
        let notes = [
            ScoreNote::new(45, 0.0, 0.02),
            ScoreNote::new(48, 0.015, 0.01).with_bend(10000),
        ];
        let schedule = Schedule::from_notes(&notes, 48000);
        let params = SynthParams::new(30.0, 1, 0.5);
        let hidden = ProgressBar::hidden();

        let small = render_schedule(settings(64), params, &schedule, 2000, &hidden).unwrap();
        let large = render_schedule(settings(1024), params, &schedule, 2000, &hidden).unwrap();
        assert_eq!(small[0], large[0]);
    }

    #[test]
    fn zero_block_size_is_an_error() {
        let schedule = Schedule::default();
        let result = render_schedule(
            settings(0),
            SynthParams::default(),
            &schedule,
            10,
            &ProgressBar::hidden(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn stats_of_known_signals() {
        let stats = SignalStats::measure(&[1.0, -1.0, 1.0, -1.0]);
        assert_eq!(stats.peak, 1.0);
        assert!((stats.rms - 1.0).abs() < 1e-6);
        assert!(stats.peak_db().abs() < 1e-6);

        let silent = SignalStats::measure(&[]);
        assert_eq!(silent.peak, 0.0);
        assert!(silent.rms_db() < -150.0);
    }
}
