//! Reeser CLI - render the detuned wavetable synth offline.

mod commands;
mod offline;
mod schedule;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reeser")]
#[command(author, version, about = "Detuned wavetable synth renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a patch's score to a WAV file
    Render(commands::render::RenderArgs),

    /// Render a single note with explicit parameters
    Note(commands::note::NoteArgs),

    /// List, show, and save patches
    Patches(commands::patches::PatchesArgs),

    /// Print a generated wavetable
    Table(commands::table::TableArgs),
}

fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so stdout stays parseable.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    tracing_log::LogTracer::init().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render(args) => commands::render::run(args),
        Commands::Note(args) => commands::note::run(args),
        Commands::Patches(args) => commands::patches::run(args),
        Commands::Table(args) => commands::table::run(args),
    }
}
