//! `stripes init`: write a starter config.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::DEFAULT_CONFIG;
use crate::log;

/// Write [`DEFAULT_CONFIG`] to `path`.
///
/// An existing file is left alone unless `force` is set.
pub fn write_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "'{}' already exists, pass --force to overwrite",
            path.display()
        );
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SpriteConfig, SpriteOptions};
    use tempfile::TempDir;

    #[test]
    fn test_write_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stripes.toml");
        write_config(&path, false).unwrap();

        let options = SpriteOptions::from_path(&path).unwrap();
        assert!(options.source.unwrap().ends_with("icons/"));

        let config = SpriteOptions::from_str(DEFAULT_CONFIG)
            .unwrap()
            .resolve()
            .unwrap();
        let defaults = SpriteConfig::default();
        assert_eq!(config.remove_attributes, defaults.remove_attributes);
        assert_eq!(config.container_attributes, defaults.container_attributes);
        assert_eq!(config.symbol_attributes, defaults.symbol_attributes);
    }

    #[test]
    fn test_existing_config_not_overwritten() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("stripes.toml");
        fs::write(&path, "custom content").unwrap();

        assert!(write_config(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "custom content");

        write_config(&path, true).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    }
}
