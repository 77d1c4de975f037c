//! Render a patch's score to a WAV file.

use clap::Args;
use reeser_config::resolve_patch;
use std::path::PathBuf;

use super::common::{OutputArgs, render_patch};

#[derive(Args)]
pub struct RenderArgs {
    /// Patch file path, user patch name, or factory patch name
    #[arg(value_name = "PATCH")]
    patch: String,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    #[command(flatten)]
    out: OutputArgs,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let patch = resolve_patch(&args.patch).map_err(|e| {
        anyhow::anyhow!("{e}. Use 'reeser patches list' to see available patches.")
    })?;
    render_patch(patch, &args.output, &args.out)
}
