//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{AttrMap, SpriteOptions};

/// Stripes SVG sprite assembler CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: stripes.toml, searched upward)
    #[arg(short = 'C', long, global = true, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Assemble icons into one sprite
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Write a default stripes.toml
    #[command(visible_alias = "i")]
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

/// Build command arguments; each one overrides the config file.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Icon file, directory or glob pattern
    #[arg(value_hint = clap::ValueHint::AnyPath)]
    pub source: Option<String>,

    /// Write the sprite here instead of stdout
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Prefix joined to every identifier with `-`
    #[arg(short, long)]
    pub prefix: Option<String>,

    /// Attributes to strip from icon bodies (comma-separated)
    #[arg(short, long = "remove", value_delimiter = ',')]
    pub remove: Option<Vec<String>>,

    /// Attribute on the root element, as NAME=VALUE (repeatable)
    #[arg(long = "container-attr", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub container_attrs: Vec<(String, String)>,

    /// Attribute on every symbol, as NAME=VALUE (repeatable)
    #[arg(long = "symbol-attr", value_name = "NAME=VALUE", value_parser = parse_key_value)]
    pub symbol_attrs: Vec<(String, String)>,

    /// Write `{"identifiers": [...]}` JSON here
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub manifest: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// The CLI layer of the configuration.
    ///
    /// Relative paths stay relative to the working directory. Attribute
    /// flags replace the whole table once any is given.
    pub fn to_options(&self) -> SpriteOptions {
        let attrs = |pairs: &[(String, String)]| {
            (!pairs.is_empty()).then(|| pairs.iter().cloned().collect::<AttrMap>())
        };

        SpriteOptions {
            source: self.source.clone(),
            destination: self.output.clone(),
            remove_attributes: self.remove.clone(),
            identifier_prefix: self.prefix.clone(),
            container_attributes: attrs(&self.container_attrs),
            symbol_attributes: attrs(&self.symbol_attrs),
        }
    }
}

/// Parse `NAME=VALUE`; the value may itself contain `=`.
pub fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing attribute name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("style=fill: currentColor").unwrap(),
            ("style".to_string(), "fill: currentColor".to_string())
        );
        assert_eq!(
            parse_key_value("data-x=a=b").unwrap(),
            ("data-x".to_string(), "a=b".to_string())
        );
        assert_eq!(parse_key_value("class=").unwrap().1, "");
        assert!(parse_key_value("class").is_err());
        assert!(parse_key_value("=x").is_err());
    }

    #[test]
    fn test_build_command_parses() {
        let cli = Cli::try_parse_from([
            "stripes",
            "b",
            "icons/",
            "-o",
            "dist/sprite.svg",
            "-p",
            "icon",
            "-r",
            "fill,stroke",
            "--container-attr",
            "class=icons",
            "--container-attr",
            "style=display: none",
            "-V",
        ])
        .unwrap();

        let Commands::Build { args } = cli.command else {
            panic!("expected build");
        };
        assert!(args.verbose);

        let options = args.to_options();
        assert_eq!(options.source.as_deref(), Some("icons/"));
        assert_eq!(options.destination, Some(PathBuf::from("dist/sprite.svg")));
        assert_eq!(options.identifier_prefix.as_deref(), Some("icon"));
        assert_eq!(
            options.remove_attributes,
            Some(vec!["fill".to_string(), "stroke".to_string()])
        );
        let container = options.container_attributes.unwrap();
        assert_eq!(container.names().collect::<Vec<_>>(), vec!["class", "style"]);
        assert!(options.symbol_attributes.is_none());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = Cli::try_parse_from(["stripes", "init", "-C", "custom.toml", "--force"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.toml")));
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }

    #[test]
    fn test_empty_build_overrides_nothing() {
        assert_eq!(BuildArgs::default().to_options(), SpriteOptions::default());
    }
}
