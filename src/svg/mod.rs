//! Per-icon SVG transform.
//!
//! The sprite pipeline treats this as a black box behind the [`Transform`]
//! trait: import a file, optimize it, then extract root attributes and the
//! inner body markup.
//!
//! # Architecture
//!
//! ```text
//! icon.svg
//!     │
//!     ▼
//! ┌────────┐
//! │ import │ ──► read + parse into owned quick-xml events
//! └───┬────┘
//!     ▼
//! ┌──────────┐
//! │ optimize │ ──► drop comments/metadata/editor data, keep text spacing
//! └───┬──────┘
//!     ▼
//! ┌──────┐
//! │ tags │ ──► root attributes + serialized body (usvg size fallback)
//! └──────┘
//! ```

mod import;
mod optimize;
mod tags;

use std::path::Path;

use quick_xml::events::Event;
use thiserror::Error;

pub use import::{import_svg, parse_svg};
pub use optimize::optimize_svg;
pub use tags::{SvgTags, extract_tags};

/// Errors raised while transforming a single icon.
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to read icon")]
    Read(#[source] std::io::Error),

    #[error("malformed markup: {0}")]
    Xml(String),

    #[error("root element is `{0}`, expected `svg`")]
    NotSvg(String),

    #[error("document has no root element")]
    Empty,

    #[error("root element has no viewBox and no intrinsic size")]
    MissingViewBox,
}

impl TransformError {
    pub(crate) fn xml(err: impl std::fmt::Display) -> Self {
        Self::Xml(err.to_string())
    }
}

/// A parsed icon: the original text plus its owned event stream.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    source: String,
    events: Vec<Event<'static>>,
}

impl SvgDocument {
    pub(crate) fn new(source: String, events: Vec<Event<'static>>) -> Self {
        Self { source, events }
    }

    /// Original markup as read from disk.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn events(&self) -> &[Event<'static>] {
        &self.events
    }

    pub(crate) fn into_parts(self) -> (String, Vec<Event<'static>>) {
        (self.source, self.events)
    }
}

/// The import -> optimize -> tag-extract engine used for every icon.
///
/// Implementations must be shareable across blocking worker threads.
pub trait Transform: Send + Sync + 'static {
    fn import(&self, path: &Path) -> Result<SvgDocument, TransformError>;

    fn optimize(&self, document: SvgDocument) -> Result<SvgDocument, TransformError>;

    fn tags(&self, document: &SvgDocument) -> Result<SvgTags, TransformError>;
}

/// Built-in transform on top of quick-xml and usvg.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgTransform;

impl Transform for SvgTransform {
    fn import(&self, path: &Path) -> Result<SvgDocument, TransformError> {
        import_svg(path)
    }

    fn optimize(&self, document: SvgDocument) -> Result<SvgDocument, TransformError> {
        optimize_svg(document)
    }

    fn tags(&self, document: &SvgDocument) -> Result<SvgTags, TransformError> {
        extract_tags(document)
    }
}
