//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use reeser_config::{Patch, validate_patch};
use std::path::Path;

use crate::offline::{RenderSettings, SignalStats, render_schedule};
use crate::schedule::Schedule;
use crate::wav::{BitDepth, write_wav};

/// Output options shared by every command that writes audio.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Sample rate in Hz (overrides the patch)
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Frames per engine call (overrides the patch)
    #[arg(long)]
    pub block_size: Option<usize>,

    /// Number of output channels; every channel carries the same signal
    #[arg(long, default_value = "2")]
    pub channels: usize,

    /// Sample encoding of the written file
    #[arg(long, value_enum, default_value = "32")]
    pub bit_depth: BitDepth,
}

/// Render `patch` through the detuned engine and write it to `output`.
///
/// Command-line overrides are applied before the patch is validated.
pub fn render_patch(mut patch: Patch, output: &Path, args: &OutputArgs) -> anyhow::Result<()> {
    if let Some(sample_rate) = args.sample_rate {
        patch.sample_rate = sample_rate;
    }
    if let Some(block_size) = args.block_size {
        patch.block_size = block_size;
    }
    validate_patch(&patch).with_context(|| format!("patch '{}' is invalid", patch.name))?;
    if patch.notes.is_empty() {
        anyhow::bail!("patch '{}' has no notes to render", patch.name);
    }

    let schedule = Schedule::from_notes(&patch.notes, patch.sample_rate);
    let total_frames = usize::try_from(schedule.end_sample())
        .context("score is too long to render")?
        .max(1);
    let settings = RenderSettings {
        sample_rate: patch.sample_rate,
        block_size: patch.block_size,
        channels: args.channels,
    };

    println!(
        "Rendering '{}' ({:.2}s, {} Hz, {} ch, block {})...",
        patch.name,
        total_frames as f64 / f64::from(patch.sample_rate),
        patch.sample_rate,
        args.channels,
        patch.block_size
    );
    tracing::info!(
        patch = %patch.name,
        frames = total_frames,
        events = schedule.events().len(),
        "render started"
    );

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let audio = render_schedule(settings, patch.synth_params(), &schedule, total_frames, &pb)?;
    pb.finish_with_message("done");

    write_wav(output, &audio, patch.sample_rate, args.bit_depth)?;

    let stats = SignalStats::measure(audio.first().map_or(&[][..], Vec::as_slice));
    println!("\nStats:");
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        stats.rms_db(),
        stats.peak_db()
    );
    println!("Wrote {}", output.display());
    Ok(())
}
