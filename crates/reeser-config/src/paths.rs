//! Platform-specific paths for user patches.
//!
//! - **User patches**: `~/.config/reeser/patches/` (Linux),
//!   `~/Library/Application Support/reeser/patches/` (macOS),
//!   `%APPDATA%\reeser\patches\` (Windows)

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::factory_patches::get_factory_patch;
use crate::patch::Patch;

/// Application name used for directory paths.
const APP_NAME: &str = "reeser";

/// Subdirectory name for patches.
const PATCHES_SUBDIR: &str = "patches";

/// Returns the user-specific patches directory.
///
/// Falls back to `./reeser/patches` if the config directory cannot be
/// determined.
pub fn user_patches_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PATCHES_SUBDIR)
}

/// Find a patch file by path or name.
///
/// `name` is tried as a file path first, then as a file in `dir` (with or
/// without the `.toml` extension).
pub fn find_patch_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{name}.toml")
    };
    let candidate = dir.join(filename);
    candidate.is_file().then_some(candidate)
}

/// Find a patch file by path or name, searching the user patches directory.
pub fn find_patch(name: &str) -> Option<PathBuf> {
    find_patch_in(name, &user_patches_dir())
}

/// Resolve `name` to a patch: a file path, a user patch, or a factory patch,
/// in that order.
pub fn resolve_patch(name: &str) -> Result<Patch, ConfigError> {
    resolve_patch_in(name, &user_patches_dir())
}

/// [`resolve_patch`] against an explicit user directory.
pub fn resolve_patch_in(name: &str, dir: &Path) -> Result<Patch, ConfigError> {
    if let Some(path) = find_patch_in(name, dir) {
        return Patch::load(path);
    }
    get_factory_patch(name).ok_or_else(|| ConfigError::PatchNotFound(name.to_string()))
}

/// Ensure the user patches directory exists.
pub fn ensure_user_patches_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_patches_dir();
    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }
    Ok(dir)
}

/// List patch files in `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_patches_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut patches: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    patches.sort();
    patches
}

/// List patch files in the user patches directory.
pub fn list_user_patches() -> Vec<PathBuf> {
    list_patches_in_dir(&user_patches_dir())
}

/// Patch name derived from a file path (the file stem).
pub fn patch_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn user_dir_ends_with_app_and_subdir() {
        let dir = user_patches_dir();
        assert!(dir.ends_with(Path::new("reeser").join("patches")));
    }

    #[test]
    fn finds_by_name_with_or_without_extension() {
        let tmp = TempDir::new().unwrap();
        Patch::new("Mine").save(tmp.path().join("mine.toml")).unwrap();

        assert!(find_patch_in("mine", tmp.path()).is_some());
        assert!(find_patch_in("mine.toml", tmp.path()).is_some());
        assert!(find_patch_in("other", tmp.path()).is_none());
    }

    #[test]
    fn resolve_prefers_files_then_factory() {
        let tmp = TempDir::new().unwrap();
        Patch::new("Shadowed")
            .save(tmp.path().join("reese.toml"))
            .unwrap();

        assert_eq!(resolve_patch_in("reese", tmp.path()).unwrap().name, "Shadowed");
        assert_eq!(resolve_patch_in("init", tmp.path()).unwrap().name, "Init");
        assert!(matches!(
            resolve_patch_in("nope", tmp.path()),
            Err(ConfigError::PatchNotFound(_))
        ));
    }

    #[test]
    fn lists_only_toml_files_sorted() {
        let tmp = TempDir::new().unwrap();
        Patch::new("B").save(tmp.path().join("b.toml")).unwrap();
        Patch::new("A").save(tmp.path().join("a.toml")).unwrap();
        std::fs::write(tmp.path().join("notes.txt"), "x").unwrap();

        let names: Vec<_> = list_patches_in_dir(tmp.path())
            .iter()
            .filter_map(|p| patch_name_from_path(p))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_dir_lists_nothing() {
        assert!(list_patches_in_dir(Path::new("/definitely/not/here")).is_empty());
    }
}
