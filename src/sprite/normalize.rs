//! One icon file to one sanitized, named icon.

use regex::{Captures, Regex};
use std::path::Path;
use std::sync::LazyLock;

use super::{ICON_EXTENSION, SpriteError};
use crate::svg::{Transform, TransformError};

/// Attribute token: leading whitespace, name, double-quoted value.
static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([ \t\r\n]+)([^ \t\r\n=/<>"']+)="([^"]*)""#).expect("valid attribute regex")
});

/// Value that keeps a presentation attribute in place.
const KEEP_VALUE: &str = "none";

/// A single icon ready to become a symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIcon {
    pub identifier: String,
    pub view_box: String,
    /// Inner markup with configured attributes stripped.
    pub body: String,
}

/// File name without directories or `.svg`, joined to `prefix` with `-`.
pub fn icon_identifier(path: &Path, prefix: Option<&str>) -> String {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let name = file_name
        .strip_suffix(ICON_EXTENSION)
        .unwrap_or(&file_name);

    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}-{name}"),
        _ => name.to_string(),
    }
}

/// Remove every `name="value"` token whose name is listed, unless the
/// value is `none`. The token's leading whitespace goes with it.
pub fn strip_attributes(body: &str, names: &[String]) -> String {
    if names.is_empty() {
        return body.to_string();
    }

    ATTRIBUTE
        .replace_all(body, |caps: &Captures| {
            let name = &caps[2];
            let value = &caps[3];
            if value != KEEP_VALUE && names.iter().any(|listed| listed == name) {
                String::new()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Import, optimize and tag-extract one file, then name and strip it.
pub fn normalize_icon<T: Transform + ?Sized>(
    transform: &T,
    path: &Path,
    remove_attributes: &[String],
    prefix: Option<&str>,
) -> Result<NormalizedIcon, SpriteError> {
    let (view_box, body) = extract(transform, path).map_err(|source| SpriteError::Transform {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(NormalizedIcon {
        identifier: icon_identifier(path, prefix),
        view_box,
        body: strip_attributes(&body, remove_attributes),
    })
}

fn extract<T: Transform + ?Sized>(
    transform: &T,
    path: &Path,
) -> Result<(String, String), TransformError> {
    let document = transform.import(path)?;
    let document = transform.optimize(document)?;
    let tags = transform.tags(&document)?;

    let view_box = tags.view_box().ok_or(TransformError::MissingViewBox)?;
    Ok((view_box, tags.body().to_string()))
}
