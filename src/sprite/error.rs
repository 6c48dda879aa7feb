//! Sprite pipeline errors.

use std::path::PathBuf;
use thiserror::Error;

use crate::svg::TransformError;

/// Every way a sprite build can fail.
///
/// Each variant carries enough context to name the offending file.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("no source configured")]
    MissingSource,

    #[error("cannot expand `{pattern}`")]
    Discovery {
        pattern: String,
        #[source]
        source: DiscoveryError,
    },

    #[error("failed to transform `{}`", path.display())]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },

    #[error(
        "identifier `{identifier}` used by both `{}` and `{}`",
        first.display(),
        second.display()
    )]
    DuplicateIdentifier {
        identifier: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("destination is empty")]
    MissingDestination,

    #[error("failed to write `{}`", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Underlying cause of a [`SpriteError::Discovery`].
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),

    #[error(transparent)]
    Walk(#[from] glob::GlobError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_names_paths() {
        let err = SpriteError::DuplicateIdentifier {
            identifier: "home".into(),
            first: PathBuf::from("a/home.svg"),
            second: PathBuf::from("b/home.svg"),
        };
        let display = err.to_string();
        assert!(display.contains("`home`"));
        assert!(display.contains("a/home.svg"));
        assert!(display.contains("b/home.svg"));
    }

    #[test]
    fn test_transform_source_chain() {
        let err = SpriteError::Transform {
            path: PathBuf::from("icons/bad.svg"),
            source: TransformError::Empty,
        };
        assert!(err.to_string().contains("icons/bad.svg"));
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some(TransformError::Empty.to_string())
        );
    }
}
