//! Persisting the finished sprite.

use std::path::Path;

use super::SpriteError;
use crate::log;

/// Write `document` to `destination`, replacing any existing file.
///
/// No destination means no write. Missing parent directories are created.
pub async fn persist(document: &str, destination: Option<&Path>) -> Result<(), SpriteError> {
    let Some(path) = destination else {
        return Ok(());
    };
    if path.as_os_str().is_empty() {
        return Err(SpriteError::MissingDestination);
    }

    let write_error = |source| SpriteError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
    }
    tokio::fs::write(path, document).await.map_err(write_error)?;

    log!("sprite"; "wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_no_destination() {
        assert!(persist("<svg/>", None).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_destination() {
        let err = persist("<svg/>", Some(Path::new(""))).await.unwrap_err();
        assert!(matches!(err, SpriteError::MissingDestination));
    }

    #[tokio::test]
    async fn test_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dist/nested/sprite.svg");

        persist("<svg>long old content</svg>", Some(&path)).await.unwrap();
        persist("<svg/>", Some(&path)).await.unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<svg/>");
    }

    #[tokio::test]
    async fn test_write_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();

        let err = persist("<svg/>", Some(&blocker.join("sprite.svg")))
            .await
            .unwrap_err();
        assert!(matches!(err, SpriteError::Write { .. }));
    }
}
