//! Sprite assembly pipeline.
//!
//! # Architecture
//!
//! ```text
//! source ──► discover ──► [normalize + symbol] × N ──► compose ──► sink
//!                          (JoinSet, one blocking task per icon)
//! ```
//!
//! Icons are normalized in parallel and land in one slot per discovered
//! file, so the sprite always lists symbols in discovery order. The first
//! failing icon aborts the rest and nothing is written.

mod compose;
mod discover;
mod error;
mod normalize;
mod sink;
mod symbol;

pub use compose::compose_sprite;
pub use discover::{ICON_EXTENSION, discover_icons};
pub use error::{DiscoveryError, SpriteError};
pub use normalize::{NormalizedIcon, icon_identifier, normalize_icon};
pub use sink::persist;
pub use symbol::assemble_symbol;

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

use crate::config::SpriteConfig;
use crate::logger::ProgressLine;
use crate::svg::{SvgTransform, Transform};
use crate::{debug, log};

/// Composed sprite plus the identifiers it contains, in document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpriteOutput {
    #[serde(skip)]
    pub document: String,
    pub identifiers: Vec<String>,
}

impl SpriteOutput {
    /// `{"identifiers": [...]}`
    pub fn manifest_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// One sprite build over a resolved config.
///
/// ```ignore
/// let output = Pipeline::new(config).with_progress(true).run().await?;
/// ```
pub struct Pipeline<T: Transform = SvgTransform> {
    config: Arc<SpriteConfig>,
    transform: Arc<T>,
    progress: bool,
}

impl Pipeline<SvgTransform> {
    pub fn new(config: SpriteConfig) -> Self {
        Self {
            config: Arc::new(config),
            transform: Arc::new(SvgTransform),
            progress: false,
        }
    }
}

impl<T: Transform> Pipeline<T> {
    /// Swap the per-icon transform.
    #[allow(dead_code)] // only alternate transforms in tests use it
    pub fn with_transform<U: Transform>(self, transform: U) -> Pipeline<U> {
        Pipeline {
            config: self.config,
            transform: Arc::new(transform),
            progress: self.progress,
        }
    }

    /// Show a live `icons(n/total)` counter while normalizing.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Discover, normalize, compose and optionally persist.
    pub async fn run(&self) -> Result<SpriteOutput, SpriteError> {
        let files = discover_icons(self.config.source.as_deref())?;
        if files.is_empty() {
            log!(
                "warning";
                "no icons matched `{}`",
                self.config.source.as_deref().unwrap_or_default()
            );
        }

        let identifiers =
            unique_identifiers(&files, self.config.identifier_prefix.as_deref())?;
        let icons = self.normalize_all(files).await?;

        let symbols: Vec<String> = icons
            .iter()
            .map(|icon| assemble_symbol(icon, &self.config.symbol_attributes))
            .collect();
        let document = compose_sprite(&symbols, &self.config.container_attributes);
        debug!("sprite"; "composed {} symbol(s), {} bytes", symbols.len(), document.len());

        persist(&document, self.config.destination.as_deref()).await?;

        Ok(SpriteOutput {
            document,
            identifiers,
        })
    }

    /// Fan out one blocking task per file, fan in by index.
    async fn normalize_all(&self, files: Vec<PathBuf>) -> Result<Vec<NormalizedIcon>, SpriteError> {
        let total = files.len();
        let progress = (self.progress && total > 0).then(|| ProgressLine::new(&[("icons", total)]));

        let mut tasks = JoinSet::new();
        for (index, path) in files.into_iter().enumerate() {
            let transform = Arc::clone(&self.transform);
            let config = Arc::clone(&self.config);
            tasks.spawn_blocking(move || {
                let icon = normalize_icon(
                    transform.as_ref(),
                    &path,
                    &config.remove_attributes,
                    config.identifier_prefix.as_deref(),
                );
                (index, icon)
            });
        }

        let mut slots: Vec<Option<NormalizedIcon>> = vec![None; total];
        while let Some(joined) = tasks.join_next().await {
            let (index, icon) = match joined {
                Ok(done) => done,
                Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
                Err(err) => unreachable!("icon task cancelled while awaited: {err}"),
            };

            match icon {
                Ok(icon) => slots[index] = Some(icon),
                Err(err) => {
                    tasks.abort_all();
                    return Err(err);
                }
            }

            if let Some(progress) = &progress {
                progress.inc("icons");
            }
        }

        if let Some(progress) = progress {
            progress.finish();
        }

        Ok(slots.into_iter().flatten().collect())
    }
}

/// Derive every identifier up front, rejecting collisions.
fn unique_identifiers(
    files: &[PathBuf],
    prefix: Option<&str>,
) -> Result<Vec<String>, SpriteError> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(files.len());
    let mut identifiers = Vec::with_capacity(files.len());

    for (index, path) in files.iter().enumerate() {
        let identifier = icon_identifier(path, prefix);
        if let Some(&first) = seen.get(&identifier) {
            return Err(SpriteError::DuplicateIdentifier {
                identifier,
                first: files[first].clone(),
                second: path.clone(),
            });
        }
        seen.insert(identifier.clone(), index);
        identifiers.push(identifier);
    }

    Ok(identifiers)
}
