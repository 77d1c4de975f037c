//! Patch management commands.
//!
//! Lists, shows, and saves patches.

use anyhow::Context;
use clap::{Args, Subcommand};
use reeser_config::{
    ensure_user_patches_dir, factory_patches, list_user_patches, patch_name_from_path,
    resolve_patch, user_patches_dir,
};

#[derive(Args)]
pub struct PatchesArgs {
    #[command(subcommand)]
    command: PatchesCommand,
}

#[derive(Subcommand)]
enum PatchesCommand {
    /// List available patches (factory and user)
    List {
        /// Show only factory patches
        #[arg(long)]
        factory: bool,

        /// Show only user patches
        #[arg(long)]
        user: bool,
    },

    /// Print a patch as TOML
    Show {
        /// Patch name or path
        name: String,
    },

    /// Copy a patch into the user patches directory
    Save {
        /// Source patch name or path
        source: String,

        /// Name for the saved file (defaults to the source name)
        #[arg(short, long)]
        name: Option<String>,

        /// Overwrite if the patch already exists
        #[arg(long)]
        force: bool,
    },

    /// Show the user patches directory
    Paths,
}

pub fn run(args: PatchesArgs) -> anyhow::Result<()> {
    match args.command {
        PatchesCommand::List { factory, user } => list_patches(factory, user),
        PatchesCommand::Show { name } => show_patch(&name),
        PatchesCommand::Save {
            source,
            name,
            force,
        } => save_patch(&source, name.as_deref(), force),
        PatchesCommand::Paths => {
            println!("User patches: {}", user_patches_dir().display());
            Ok(())
        }
    }
}

fn list_patches(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    if !user_only {
        println!("Factory Patches:");
        println!("================");
        for patch in factory_patches() {
            let desc = patch.description.as_deref().unwrap_or("");
            println!("  {:20} - {}", patch.name, desc);
        }
        println!();
    }

    if !factory_only {
        println!("User Patches:");
        println!("=============");
        let user_patches = list_user_patches();
        if user_patches.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create one with: reeser patches save <source> --name <name>\n");
        } else {
            for path in user_patches {
                let name = patch_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());
                println!("  {:20} - {}", name, path.display());
            }
        }
    }
    Ok(())
}

fn show_patch(name: &str) -> anyhow::Result<()> {
    let patch = resolve_patch(name)?;
    print!("{}", patch.to_toml()?);
    Ok(())
}

fn save_patch(source: &str, name: Option<&str>, force: bool) -> anyhow::Result<()> {
    let patch = resolve_patch(source)?;
    let file_stem = name.map_or_else(|| file_stem_for(&patch.name), file_stem_for);

    let dir = ensure_user_patches_dir()?;
    let path = dir.join(format!("{file_stem}.toml"));
    if path.exists() && !force {
        anyhow::bail!(
            "Patch '{}' already exists. Use --force to overwrite.",
            path.display()
        );
    }

    let mut saved = patch;
    if let Some(name) = name {
        saved.name = name.to_string();
    }
    saved
        .save(&path)
        .with_context(|| format!("cannot save patch '{file_stem}'"))?;
    println!("Saved {}", path.display());
    Ok(())
}

/// File stem for a patch name: lowercase, spaces to dashes.
fn file_stem_for(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "-")
}
