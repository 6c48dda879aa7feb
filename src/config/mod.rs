//! Sprite configuration: `stripes.toml`, CLI overrides and defaults.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── attrs.rs   # AttrMap (ordered attribute mapping)
//! ├── types/     # ConfigError, diagnostics, field names
//! ├── util.rs    # config lookup, path resolution
//! └── mod.rs     # SpriteOptions / SpriteConfig (this file)
//! ```
//!
//! # Precedence
//!
//! Built-in defaults < `stripes.toml` < CLI arguments. Merging is shallow:
//! an attribute table given at a higher level replaces the lower one whole.
//!
//! ```toml
//! source = "icons/"
//! destination = "dist/sprite.svg"
//! identifier_prefix = "icon"
//! remove_attributes = ["fill", "stroke"]
//!
//! [container_attributes]
//! class = "icons"
//!
//! [symbol_attributes]
//! style = "fill: currentColor"
//! ```

mod attrs;
pub mod types;
mod util;

pub use attrs::{AttrMap, is_valid_attribute_name, write_attribute};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};
pub use util::{find_config_file, resolve_path};

use crate::{debug, log};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "stripes.toml";

/// Attributes stripped from icon bodies unless set to `none`.
pub const DEFAULT_REMOVE_ATTRIBUTES: &[&str] = &["fill", "stroke", "vector-effect", "xmlns:default"];

/// Attributes the composer writes on the root element itself.
const RESERVED_CONTAINER_ATTRIBUTES: &[&str] = &["version", "xmlns", "xmlns:xlink"];

/// Attributes the assembler writes on every symbol itself.
const RESERVED_SYMBOL_ATTRIBUTES: &[&str] = &["id", "viewBox"];

// ============================================================================
// partial configuration
// ============================================================================

/// Caller-supplied configuration; every field optional.
///
/// Produced by the config file and by the CLI, then merged and resolved
/// into a [`SpriteConfig`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteOptions {
    /// File, directory or glob pattern of icons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Where to write the sprite.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    /// Attribute names stripped from icon bodies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_attributes: Option<Vec<String>>,

    /// Prefix joined to every identifier with `-`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier_prefix: Option<String>,

    /// Attributes on the root `<svg>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_attributes: Option<AttrMap>,

    /// Attributes on every `<symbol>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol_attributes: Option<AttrMap>,
}

impl SpriteOptions {
    /// Load options from a config file.
    ///
    /// Unknown fields are reported and ignored. Relative paths are anchored
    /// at the config file's directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (options, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        let root = path.parent().unwrap_or(Path::new(""));
        Ok(options.rebase(root))
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let options = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((options, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Anchor relative `source`/`destination` at `root`, expanding `~`.
    pub fn rebase(mut self, root: &Path) -> Self {
        if let Some(source) = self.source.take() {
            self.source = Some(if source.is_empty() {
                source
            } else {
                resolve_path(&source, root)
            });
        }
        if let Some(destination) = self.destination.take() {
            self.destination = Some(if destination.as_os_str().is_empty() {
                destination
            } else {
                PathBuf::from(resolve_path(&destination.to_string_lossy(), root))
            });
        }
        self
    }

    /// Overlay `over` on top of `self`; fields set in `over` win.
    pub fn merge(self, over: SpriteOptions) -> SpriteOptions {
        SpriteOptions {
            source: over.source.or(self.source),
            destination: over.destination.or(self.destination),
            remove_attributes: over.remove_attributes.or(self.remove_attributes),
            identifier_prefix: over.identifier_prefix.or(self.identifier_prefix),
            container_attributes: over.container_attributes.or(self.container_attributes),
            symbol_attributes: over.symbol_attributes.or(self.symbol_attributes),
        }
    }

    /// Fill every unset field from the defaults and validate attribute names.
    ///
    /// A missing `source` or `destination` is not an error here; each is
    /// checked where it is actually needed.
    pub fn resolve(self) -> Result<SpriteConfig, ConfigError> {
        let defaults = SpriteConfig::default();

        let mut remove_attributes: Vec<String> = Vec::new();
        for name in self
            .remove_attributes
            .unwrap_or(defaults.remove_attributes)
        {
            if !remove_attributes.contains(&name) {
                remove_attributes.push(name);
            }
        }

        let config = SpriteConfig {
            source: self.source,
            destination: self.destination,
            remove_attributes,
            identifier_prefix: self.identifier_prefix.filter(|prefix| !prefix.is_empty()),
            container_attributes: self
                .container_attributes
                .unwrap_or(defaults.container_attributes),
            symbol_attributes: self.symbol_attributes.unwrap_or(defaults.symbol_attributes),
        };

        config.validate()?;
        Ok(config)
    }
}

// ============================================================================
// resolved configuration
// ============================================================================

/// Fully resolved configuration for one sprite build.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteConfig {
    pub source: Option<String>,
    pub destination: Option<PathBuf>,
    /// Ordered, without duplicates.
    pub remove_attributes: Vec<String>,
    /// Never `Some("")`.
    pub identifier_prefix: Option<String>,
    pub container_attributes: AttrMap,
    pub symbol_attributes: AttrMap,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            remove_attributes: DEFAULT_REMOVE_ATTRIBUTES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
            identifier_prefix: None,
            container_attributes: [
                ("class", "test-icons"),
                ("style", "display: none;"),
                ("x", "0px"),
                ("y", "0px"),
            ]
            .into_iter()
            .collect(),
            symbol_attributes: [("style", "fill: currentColor")].into_iter().collect(),
        }
    }
}

impl SpriteConfig {
    /// Check attribute names once, collecting every problem.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        for name in &self.remove_attributes {
            if !is_valid_attribute_name(name) {
                diag.error(
                    FieldPath::REMOVE_ATTRIBUTES,
                    format!("invalid attribute name `{name}`"),
                );
            }
        }

        Self::validate_attr_map(
            &mut diag,
            FieldPath::CONTAINER_ATTRIBUTES,
            &self.container_attributes,
            RESERVED_CONTAINER_ATTRIBUTES,
        );
        Self::validate_attr_map(
            &mut diag,
            FieldPath::SYMBOL_ATTRIBUTES,
            &self.symbol_attributes,
            RESERVED_SYMBOL_ATTRIBUTES,
        );

        if let Some(prefix) = &self.identifier_prefix
            && prefix.chars().any(|c| c.is_whitespace() || c == '"')
        {
            diag.error_with_hint(
                FieldPath::IDENTIFIER_PREFIX,
                format!("`{prefix}` cannot be used in an id"),
                "use letters, digits, `-` or `_`",
            );
        }

        diag.into_result().map_err(ConfigError::Diagnostics)
    }

    fn validate_attr_map(
        diag: &mut ConfigDiagnostics,
        field: FieldPath,
        attrs: &AttrMap,
        reserved: &[&str],
    ) {
        for name in attrs.names() {
            if !is_valid_attribute_name(name) {
                diag.error(field, format!("invalid attribute name `{name}`"));
            } else if reserved.contains(&name) {
                diag.error_with_hint(
                    field,
                    format!("`{name}` is always written by stripes"),
                    "remove it from this table",
                );
            }
        }
    }
}

// ============================================================================
// loading
// ============================================================================

/// Template written by `stripes init`.
pub const DEFAULT_CONFIG: &str = r#"# stripes configuration

# File, directory or glob pattern of icons.
source = "icons/"

# Where to write the sprite. Omit to print it to stdout.
destination = "dist/sprite.svg"

# identifier_prefix = "icon"

remove_attributes = ["fill", "stroke", "vector-effect", "xmlns:default"]

[container_attributes]
class = "test-icons"
style = "display: none;"
x = "0px"
y = "0px"

[symbol_attributes]
style = "fill: currentColor"
"#;

/// Load file-level options.
///
/// An explicit path must exist. Otherwise `stripes.toml` is searched upward
/// from the current directory, and a missing file means defaults only.
pub fn load_options(explicit: Option<&Path>) -> Result<SpriteOptions, ConfigError> {
    let path = match explicit {
        Some(path) => find_config_file(path).ok_or_else(|| {
            ConfigError::Validation(format!("config file `{}` not found", path.display()))
        })?,
        None => match find_config_file(Path::new(CONFIG_FILE)) {
            Some(found) => found,
            None => {
                debug!("config"; "no {} found, using defaults", CONFIG_FILE);
                return Ok(SpriteOptions::default());
            }
        },
    };

    debug!("config"; "loading {}", path.display());
    SpriteOptions::from_path(&path)
}

// ============================================================================
// Test Helpers
// ============================================================================

#[cfg(test)]
impl SpriteOptions {
    /// Parse options from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

/// Resolve a config with the given source and otherwise default settings.
#[cfg(test)]
pub fn test_config(source: impl Into<String>) -> SpriteConfig {
    SpriteOptions {
        source: Some(source.into()),
        ..SpriteOptions::default()
    }
    .resolve()
    .unwrap()
}

// ============================================================================
// tests
// ============================================================================
