//! Render a single note with explicit parameters.

use clap::{Args, ValueEnum};
use reeser_config::{Patch, PatchParams, ScoreNote};
use reeser_synth::{DEFAULT_GAIN, Waveform};
use std::path::PathBuf;

use super::common::{OutputArgs, render_patch};

/// Waveform types for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliWaveform {
    #[default]
    Sine,
    Saw,
    Square,
}

impl From<CliWaveform> for Waveform {
    fn from(w: CliWaveform) -> Self {
        match w {
            CliWaveform::Sine => Waveform::Sine,
            CliWaveform::Saw => Waveform::Saw,
            CliWaveform::Square => Waveform::Square,
        }
    }
}

#[derive(Args)]
pub struct NoteArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// MIDI note number (69 = A4)
    #[arg(long, default_value = "45")]
    note: u8,

    /// Note length in seconds
    #[arg(long, default_value = "2.0")]
    duration: f64,

    /// Detune amount (0-100)
    #[arg(long, default_value = "0.0")]
    detune: f32,

    /// Oscillator waveform
    #[arg(long, value_enum, default_value = "sine")]
    waveform: CliWaveform,

    /// Output gain (0-1)
    #[arg(long, default_value_t = DEFAULT_GAIN)]
    gain: f32,

    /// Pitch wheel position (0-16383, 8192 = center)
    #[arg(long)]
    bend: Option<u16>,

    #[command(flatten)]
    out: OutputArgs,
}

pub fn run(args: NoteArgs) -> anyhow::Result<()> {
    let mut note = ScoreNote::new(args.note, 0.0, args.duration);
    if let Some(bend) = args.bend {
        note = note.with_bend(bend);
    }
    let waveform = Waveform::from(args.waveform);
    let patch = Patch::new(format!("note {}", args.note))
        .with_params(PatchParams {
            detune_amount: args.detune,
            waveform: waveform.selector(),
            gain: args.gain,
        })
        .with_note(note);
    render_patch(patch, &args.output, &args.out)
}
