//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/app/assets/icons/  ← cwd
/// /home/user/app/stripes.toml   ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Walk up from `start` looking for `config_name`.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Expand `~` and anchor relative paths at `root`.
///
/// Trailing separators survive, since they change how a source is expanded.
pub fn resolve_path(path: &str, root: &Path) -> String {
    let expanded = shellexpand::tilde(path);
    let expanded = Path::new(expanded.as_ref());
    if expanded.is_relative() {
        root.join(expanded).to_string_lossy().into_owned()
    } else {
        expanded.to_string_lossy().into_owned()
    }
}

// ============================================================================
// tests
// ============================================================================
