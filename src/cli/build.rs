//! `stripes build`: resolve configuration, run the pipeline, report.
//!
//! Phases:
//! - **Config** - defaults < stripes.toml < CLI flags
//! - **Pipeline** - discover, normalize, compose, persist
//! - **Report** - manifest file, stdout when no destination is set

use anyhow::{Context, Result};
use std::{
    fs,
    io::{IsTerminal, Write, stdout},
    path::Path,
};

use super::BuildArgs;
use crate::{
    config::{SpriteConfig, load_options},
    debug, log,
    logger::set_verbose,
    sprite::{Pipeline, SpriteOutput},
};

/// Run one build from the command line.
pub async fn run_build(config_path: Option<&Path>, args: &BuildArgs) -> Result<SpriteOutput> {
    set_verbose(args.verbose);

    let config = resolve_config(config_path, args)?;
    debug!("config"; "{:?}", config);

    let printing = config.destination.is_none();
    let output = Pipeline::new(config)
        .with_progress(std::io::stderr().is_terminal())
        .run()
        .await?;

    if let Some(manifest) = &args.manifest {
        write_manifest(manifest, &output)?;
    }

    if printing {
        let mut stdout = stdout().lock();
        writeln!(stdout, "{}", output.document).context("Failed to write sprite to stdout")?;
        stdout.flush()?;
    }

    log!("build"; "Stripes generated ({} icons)", output.identifiers.len());
    Ok(output)
}

/// Merge the config file layer with the CLI layer.
pub fn resolve_config(config_path: Option<&Path>, args: &BuildArgs) -> Result<SpriteConfig> {
    let file = load_options(config_path)?;
    Ok(file.merge(args.to_options()).resolve()?)
}

fn write_manifest(path: &Path, output: &SpriteOutput) -> Result<()> {
    let json = output.manifest_json()?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create '{}'", parent.display()))?;
    }
    fs::write(path, json)
        .with_context(|| format!("Failed to write manifest '{}'", path.display()))?;
    debug!("build"; "manifest written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_FILE;
    use tempfile::TempDir;

    fn write_icon(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, r#"<svg viewBox="0 0 4 4"><path fill="red" d="M0"/></svg>"#).unwrap();
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(
            &config_path,
            "source = \"icons\"\nidentifier_prefix = \"file\"\ndestination = \"out.svg\"",
        )
        .unwrap();

        let args = BuildArgs {
            prefix: Some("cli".into()),
            ..BuildArgs::default()
        };
        let config = resolve_config(Some(&config_path), &args).unwrap();

        assert_eq!(config.identifier_prefix.as_deref(), Some("cli"));
        assert_eq!(
            config.source,
            Some(temp.path().join("icons").to_string_lossy().into_owned())
        );
        assert_eq!(config.destination, Some(temp.path().join("out.svg")));
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        assert!(resolve_config(Some(&missing), &BuildArgs::default()).is_err());
    }

    #[tokio::test]
    async fn test_run_build_writes_sprite_and_manifest() {
        let temp = TempDir::new().unwrap();
        write_icon(&temp.path().join("icons/home.svg"));
        write_icon(&temp.path().join("icons/star.svg"));
        let config_path = temp.path().join(CONFIG_FILE);
        fs::write(&config_path, "").unwrap();

        let destination = temp.path().join("dist/sprite.svg");
        let manifest = temp.path().join("dist/icons.json");
        let args = BuildArgs {
            source: Some(format!("{}/icons/", temp.path().to_string_lossy())),
            output: Some(destination.clone()),
            manifest: Some(manifest.clone()),
            ..BuildArgs::default()
        };

        let output = run_build(Some(&config_path), &args).await.unwrap();
        assert_eq!(fs::read_to_string(&destination).unwrap(), output.document);

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({ "identifiers": ["home", "star"] }));
    }
}
