//! Print a generated wavetable.

use clap::Args;
use reeser_synth::{WAVETABLE_LENGTH, Waveform, Wavetable};
use serde::Serialize;

use super::note::CliWaveform;

#[derive(Args)]
pub struct TableArgs {
    /// Waveform to generate
    #[arg(long, value_enum, default_value = "sine")]
    waveform: CliWaveform,

    /// Table length in samples
    #[arg(long, default_value_t = WAVETABLE_LENGTH)]
    length: usize,

    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TableDump<'a> {
    waveform: &'static str,
    length: usize,
    samples: &'a [f32],
}

pub fn run(args: TableArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.length > 0, "table length must be at least 1");
    let waveform = Waveform::from(args.waveform);
    let table = Wavetable::generate(waveform, args.length);

    if args.json {
        let dump = TableDump {
            waveform: waveform.name(),
            length: table.len(),
            samples: table.as_slice(),
        };
        println!("{}", serde_json::to_string_pretty(&dump)?);
    } else {
        println!("{} table, {} samples:", waveform.name(), table.len());
        for (i, sample) in table.iter().enumerate() {
            println!("  {i:5}  {sample:+.6}");
        }
    }
    Ok(())
}
