//! Config keys named in diagnostics.

use owo_colors::OwoColorize;
use std::fmt;

/// A top-level key of `stripes.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    pub const REMOVE_ATTRIBUTES: Self = Self("remove_attributes");
    pub const IDENTIFIER_PREFIX: Self = Self("identifier_prefix");
    pub const CONTAINER_ATTRIBUTES: Self = Self("container_attributes");
    pub const SYMBOL_ATTRIBUTES: Self = Self("symbol_attributes");
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
