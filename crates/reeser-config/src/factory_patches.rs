//! Factory patches bundled with the reeser library.
//!
//! These are always available without external files and double as
//! starting points for user patches.

use crate::Patch;

/// Identifiers of the factory patches.
pub static FACTORY_PATCH_NAMES: &[&str] = &["init", "reese", "wide-saw", "hollow-square"];

/// TOML content for factory patches, embedded at compile time.
static FACTORY_PATCHES_TOML: &[(&str, &str)] = &[
    ("init", INIT_PATCH),
    ("reese", REESE_PATCH),
    ("wide-saw", WIDE_SAW_PATCH),
    ("hollow-square", HOLLOW_SQUARE_PATCH),
];

/// Host defaults with a single A4.
const INIT_PATCH: &str = r#"
name = "Init"
description = "Host defaults: sine, no detune, half gain"
sample_rate = 48000
block_size = 512

[params]
detune_amount = 0.0
waveform = 0
gain = 0.5

[[notes]]
note = 69
start = 0.0
length = 1.0
"#;

const REESE_PATCH: &str = r#"
name = "Reese"
description = "Detuned saw pair, slow beating bass line"
sample_rate = 48000
block_size = 512

[params]
detune_amount = 25.0
waveform = 1
gain = 0.7

[[notes]]
note = 38
start = 0.0
length = 1.5

[[notes]]
note = 41
start = 1.5
length = 0.5

[[notes]]
note = 36
start = 2.0
length = 1.0
bend = 10240

[[notes]]
note = 38
start = 3.0
length = 1.0
bend = 8192
"#;

const WIDE_SAW_PATCH: &str = r#"
name = "Wide Saw"
description = "Full detune for a chorused lead"
sample_rate = 48000
block_size = 256

[params]
detune_amount = 100.0
waveform = 1
gain = 0.6

[[notes]]
note = 57
start = 0.0
length = 0.75

[[notes]]
note = 60
start = 0.75
length = 0.75

[[notes]]
note = 64
start = 1.5
length = 1.5
"#;

const HOLLOW_SQUARE_PATCH: &str = r#"
name = "Hollow Square"
description = "Lightly detuned square, overlapping legato notes"
sample_rate = 48000
block_size = 512

[params]
detune_amount = 8.0
waveform = 2
gain = 0.4

[[notes]]
note = 45
start = 0.0
length = 1.1

[[notes]]
note = 52
start = 1.0
length = 1.0
"#;

/// Load all factory patches.
///
/// # Example
///
/// ```rust
/// use reeser_config::factory_patches;
///
/// for patch in factory_patches() {
///     println!("{}: {}", patch.name, patch.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_patches() -> Vec<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by identifier or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use reeser_config::get_factory_patch;
///
/// let reese = get_factory_patch("reese").unwrap();
/// assert_eq!(reese.name, "Reese");
/// assert!(get_factory_patch("Wide Saw").is_some());
/// ```
pub fn get_factory_patch(name: &str) -> Option<Patch> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PATCHES_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return Patch::from_toml(toml).ok();
    }

    factory_patches()
        .into_iter()
        .find(|p| p.name.to_lowercase() == name_lower)
}

/// Identifiers of all factory patches.
pub fn factory_patch_names() -> Vec<&'static str> {
    FACTORY_PATCHES_TOML.iter().map(|(name, _)| *name).collect()
}

/// `true` if `name` matches a factory patch identifier or display name.
pub fn is_factory_patch(name: &str) -> bool {
    get_factory_patch(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_patch;

    #[test]
    fn all_factory_patches_parse_and_validate() {
        for (name, toml) in FACTORY_PATCHES_TOML {
            let patch = Patch::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory patch '{name}' should parse: {e}"));
            assert!(!patch.name.is_empty(), "patch '{name}' should have a name");
            assert!(patch.description.is_some(), "patch '{name}' should have a description");
            assert!(!patch.notes.is_empty(), "patch '{name}' should have notes");
            validate_patch(&patch)
                .unwrap_or_else(|e| panic!("factory patch '{name}' invalid: {e}"));
        }
    }

    #[test]
    fn names_list_matches_table() {
        assert_eq!(factory_patch_names(), FACTORY_PATCH_NAMES.to_vec());
        assert_eq!(factory_patches().len(), FACTORY_PATCH_NAMES.len());
    }

    #[test]
    fn lookup_by_id_display_name_and_case() {
        assert_eq!(get_factory_patch("init").unwrap().name, "Init");
        assert_eq!(get_factory_patch("HOLLOW-SQUARE").unwrap().name, "Hollow Square");
        assert_eq!(get_factory_patch("wide saw").unwrap().params.detune_amount, 100.0);
        assert!(get_factory_patch("missing").is_none());
        assert!(is_factory_patch("Reese"));
        assert!(!is_factory_patch("my-patch"));
    }

    #[test]
    fn init_uses_host_defaults() {
        let init = get_factory_patch("init").unwrap();
        assert_eq!(init.params, crate::PatchParams::default());
    }
}
