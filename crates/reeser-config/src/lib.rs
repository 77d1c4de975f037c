//! Patch management for the reeser synth.
//!
//! A patch stores the three host parameters (detune amount, waveform
//! selector, gain) together with render settings and an optional score of
//! timed notes, as TOML.
//!
//! # Features
//!
//! - **Patches**: Load and save [`Patch`] files
//! - **Validation**: Range-check every parameter and score note
//! - **Paths**: Platform-specific user patch directory
//! - **Factory Patches**: Built-in patches that need no files
//!
//! # Example
//!
//! ```rust,no_run
//! use reeser_config::{Patch, PatchParams, ScoreNote, user_patches_dir, validate_patch};
//!
//! let patch = Patch::new("My Reese")
//!     .with_description("Slow beating saw bass")
//!     .with_params(PatchParams { detune_amount: 30.0, waveform: 1, gain: 0.7 })
//!     .with_note(ScoreNote::new(38, 0.0, 2.0));
//!
//! validate_patch(&patch).unwrap();
//! patch.save(user_patches_dir().join("my_reese.toml")).unwrap();
//! ```

mod error;
mod patch;

/// Platform-specific paths for user patches.
pub mod paths;

/// Patch validation.
pub mod validation;

/// Factory patches bundled with the library.
pub mod factory_patches;

pub use error::ConfigError;
pub use factory_patches::{
    FACTORY_PATCH_NAMES, factory_patch_names, factory_patches, get_factory_patch,
    is_factory_patch,
};
pub use patch::{Patch, PatchParams, ScoreNote};
pub use paths::{
    ensure_user_patches_dir, find_patch, list_user_patches, patch_name_from_path, resolve_patch,
    user_patches_dir,
};
pub use validation::{ValidationError, ValidationResult, validate_patch};
