//! Source expansion: path or pattern to an ordered list of icon files.
//!
//! | `source`            | pattern             |
//! |---------------------|---------------------|
//! | `icons/home.svg`    | as given            |
//! | `icons/*.svg`       | as given            |
//! | `icons/`            | `icons/*.svg`       |
//! | `icons`             | `icons/*.svg`       |
//! | `icons [old]/`      | `icons [[]old[]]/*.svg` |

use std::path::{MAIN_SEPARATOR, PathBuf};

use super::{DiscoveryError, SpriteError};
use crate::debug;

/// Extension every icon file carries.
pub const ICON_EXTENSION: &str = ".svg";

/// Turn `source` into a glob pattern.
///
/// A `.svg` source is already a pattern. Anything else names a directory,
/// whose path is escaped so glob metacharacters in it match literally.
pub fn icon_pattern(source: &str) -> Result<String, SpriteError> {
    if source.is_empty() {
        return Err(SpriteError::MissingSource);
    }

    if source.ends_with(ICON_EXTENSION) {
        return Ok(source.to_string());
    }

    let mut pattern = glob::Pattern::escape(source);
    if !is_separator_terminated(source) {
        pattern.push('/');
    }
    pattern.push('*');
    pattern.push_str(ICON_EXTENSION);
    Ok(pattern)
}

fn is_separator_terminated(source: &str) -> bool {
    source.ends_with('/') || source.ends_with(MAIN_SEPARATOR)
}

/// Expand `source` into the regular files it matches, in enumeration order.
pub fn discover_icons(source: Option<&str>) -> Result<Vec<PathBuf>, SpriteError> {
    let pattern = icon_pattern(source.unwrap_or_default())?;
    let discovery = |source: DiscoveryError| SpriteError::Discovery {
        pattern: pattern.clone(),
        source,
    };

    let entries = glob::glob(&pattern).map_err(|err| discovery(err.into()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|err| discovery(err.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }

    debug!("discover"; "{} matched {} file(s)", pattern, files.len());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<svg/>").unwrap();
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_icon_pattern() {
        assert_eq!(icon_pattern("icons/home.svg").unwrap(), "icons/home.svg");
        assert_eq!(icon_pattern("icons/*.svg").unwrap(), "icons/*.svg");
        assert_eq!(icon_pattern("icons/").unwrap(), "icons/*.svg");
        assert_eq!(icon_pattern("icons").unwrap(), "icons/*.svg");
        assert_eq!(icon_pattern("a[1]/").unwrap(), "a[[]1[]]/*.svg");
    }

    #[test]
    fn test_empty_source() {
        assert!(matches!(icon_pattern(""), Err(SpriteError::MissingSource)));
        assert!(matches!(
            discover_icons(None),
            Err(SpriteError::MissingSource)
        ));
    }

    #[test]
    fn test_directory_is_not_recursive() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "b.svg");
        touch(&dir, "a.svg");
        touch(&dir, "notes.txt");
        touch(&dir, "nested/c.svg");
        fs::create_dir_all(dir.path().join("folder.svg")).unwrap();

        let source = dir.path().to_string_lossy().into_owned();
        let files = discover_icons(Some(&source)).unwrap();
        assert_eq!(names(&files), vec!["a.svg", "b.svg"]);
    }

    #[test]
    fn test_trailing_separator_matches_bare_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "home.svg");

        let bare = dir.path().to_string_lossy().into_owned();
        let slashed = format!("{bare}/");
        assert_eq!(
            discover_icons(Some(&bare)).unwrap(),
            discover_icons(Some(&slashed)).unwrap()
        );
    }

    #[test]
    fn test_explicit_file_and_glob() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "home.svg");
        touch(&dir, "user.svg");

        let single = dir.path().join("home.svg").to_string_lossy().into_owned();
        assert_eq!(names(&discover_icons(Some(&single)).unwrap()), vec!["home.svg"]);

        let pattern = dir.path().join("u*.svg").to_string_lossy().into_owned();
        assert_eq!(names(&discover_icons(Some(&pattern)).unwrap()), vec!["user.svg"]);
    }

    #[test]
    fn test_literal_brackets_in_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "set [v2]/home.svg");

        let source = dir.path().join("set [v2]").to_string_lossy().into_owned();
        assert_eq!(names(&discover_icons(Some(&source)).unwrap()), vec!["home.svg"]);
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("missing").to_string_lossy().into_owned();
        assert!(discover_icons(Some(&source)).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_pattern() {
        let err = discover_icons(Some("icons/[.svg")).unwrap_err();
        assert!(matches!(err, SpriteError::Discovery { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_directory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        touch(&dir, "open/a.svg");
        let locked = dir.path().join("locked");
        fs::create_dir_all(&locked).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // permissions are not enforced for root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let pattern = format!("{}/*/*.svg", dir.path().to_string_lossy());
        let result = discover_icons(Some(&pattern));
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        match result {
            Err(SpriteError::Discovery {
                pattern: reported,
                source: DiscoveryError::Walk(err),
            }) => {
                assert_eq!(reported, pattern);
                assert!(err.path().ends_with("locked"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
