//! Icon cleanup.
//!
//! Removes markup that carries no rendering meaning (declarations, comments,
//! metadata, editor namespaces, indentation) and normalizes attribute quoting.
//! Whitespace inside text content and under `xml:space="preserve"` is kept.

use std::borrow::Cow;

use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesStart, Event};

use super::{SvgDocument, TransformError};

/// Namespace prefixes written by vector editors.
const EDITOR_PREFIXES: &[&[u8]] = &[b"sodipodi:", b"inkscape:", b"sketch:"];

/// Elements whose whitespace children are rendered.
const TEXT_ELEMENTS: &[&[u8]] = &[b"text", b"tspan", b"textPath", b"style"];

/// Optimize a parsed icon.
pub fn optimize_svg(document: SvgDocument) -> Result<SvgDocument, TransformError> {
    let (source, events) = document.into_parts();
    let mut optimized = Vec::with_capacity(events.len());
    // Depth inside a dropped subtree (0 = not skipping).
    let mut skip_depth = 0usize;
    // One entry per open element: whether whitespace text inside it is kept.
    let mut preserve = Vec::new();

    for event in events {
        if skip_depth > 0 {
            match event {
                Event::Start(_) => skip_depth += 1,
                Event::End(_) => skip_depth -= 1,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
            Event::Text(ref text)
                if !preserve.last().copied().unwrap_or(false)
                    && text.iter().all(u8::is_ascii_whitespace) => {}
            Event::Start(ref start) if is_dropped_element(start) => skip_depth = 1,
            Event::Empty(ref start) if is_dropped_element(start) => {}
            Event::Start(start) => {
                let inherited = preserve.last().copied().unwrap_or(false);
                preserve.push(preserves_whitespace(&start, inherited)?);
                optimized.push(Event::Start(rebuild_element(&start)?));
            }
            Event::Empty(start) => optimized.push(Event::Empty(rebuild_element(&start)?)),
            Event::End(end) => {
                preserve.pop();
                optimized.push(Event::End(end));
            }
            other => optimized.push(other),
        }
    }

    Ok(SvgDocument::new(source, optimized))
}

fn is_dropped_element(start: &BytesStart<'_>) -> bool {
    let name = start.name();
    name.local_name().as_ref() == b"metadata" || is_editor_name(name.as_ref())
}

fn is_editor_name(name: &[u8]) -> bool {
    EDITOR_PREFIXES.iter().any(|prefix| name.starts_with(prefix))
        || name
            .strip_prefix(b"xmlns:")
            .is_some_and(|ns| EDITOR_PREFIXES.iter().any(|p| p.strip_suffix(b":") == Some(ns)))
}

/// `xml:space` wins; otherwise text elements preserve and others inherit.
fn preserves_whitespace(start: &BytesStart<'_>, inherited: bool) -> Result<bool, TransformError> {
    for attr in start.attributes() {
        let attr = attr.map_err(TransformError::xml)?;
        if attr.key.as_ref() == b"xml:space" {
            return Ok(attr.value.as_ref() == b"preserve");
        }
    }
    Ok(inherited || TEXT_ELEMENTS.contains(&start.local_name().as_ref()))
}

/// Rebuild a start tag with double-quoted attributes and no editor data.
fn rebuild_element(start: &BytesStart<'_>) -> Result<BytesStart<'static>, TransformError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut rebuilt = BytesStart::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(TransformError::xml)?;
        if !is_editor_name(attr.key.as_ref()) {
            rebuilt.push_attribute(double_quoted(attr));
        }
    }
    Ok(rebuilt)
}

/// Values from single-quoted attributes may contain a raw `"`.
fn double_quoted(attr: Attribute<'_>) -> Attribute<'_> {
    if !attr.value.contains(&b'"') {
        return attr;
    }
    let mut value = Vec::with_capacity(attr.value.len() + 8);
    for &byte in attr.value.iter() {
        if byte == b'"' {
            value.extend_from_slice(b"&quot;");
        } else {
            value.push(byte);
        }
    }
    Attribute {
        key: attr.key,
        value: Cow::Owned(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::{extract_tags, parse_svg};

    fn optimized_body(svg: &str) -> String {
        let doc = optimize_svg(parse_svg(svg).unwrap()).unwrap();
        extract_tags(&doc).unwrap().body().to_string()
    }

    #[test]
    fn test_removes_noise() {
        let svg = r#"<?xml version="1.0"?>
<!DOCTYPE svg>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">
  <!-- comment -->
  <metadata><rdf:RDF/></metadata>
  <path d="M0 0"/>
</svg>"#;
        assert_eq!(
            optimized_body(svg),
            r#"<path d="M0 0"/>"#
        );
    }

    #[test]
    fn test_removes_editor_data() {
        let svg = r#"<svg xmlns:inkscape="x" xmlns:sodipodi="y" viewBox="0 0 1 1"><sodipodi:namedview pagecolor="white"/><g inkscape:label="Layer"><path d="M0 0"/></g></svg>"#;
        let doc = optimize_svg(parse_svg(svg).unwrap()).unwrap();
        let tags = extract_tags(&doc).unwrap();

        assert_eq!(tags.body(), r#"<g><path d="M0 0"/></g>"#);
        assert!(tags.attribute("xmlns:inkscape").is_none());
        assert_eq!(tags.attribute("viewBox"), Some("0 0 1 1"));
    }

    #[test]
    fn test_keeps_shapes() {
        let svg = r#"<svg viewBox="0 0 8 8"><rect x="1" y="1" width="2" height="3"/><circle cx="4" cy="4" r="2"/></svg>"#;
        assert_eq!(
            optimized_body(svg),
            r#"<rect x="1" y="1" width="2" height="3"/><circle cx="4" cy="4" r="2"/>"#
        );
    }

    #[test]
    fn test_keeps_whitespace_in_text() {
        let svg = r#"<svg viewBox="0 0 8 8">
  <text><tspan>a</tspan> <tspan>b</tspan></text>
  <text>&lt; &gt;</text>
</svg>"#;
        assert_eq!(
            optimized_body(svg),
            r#"<text><tspan>a</tspan> <tspan>b</tspan></text><text>&lt; &gt;</text>"#
        );
    }

    #[test]
    fn test_xml_space_scopes_whitespace() {
        let svg = r#"<svg viewBox="0 0 8 8"><g xml:space="preserve"> <path d="M0"/> </g><g> <path d="M1"/> </g><text xml:space="default"> <tspan>x</tspan></text></svg>"#;
        assert_eq!(
            optimized_body(svg),
            r#"<g xml:space="preserve"> <path d="M0"/> </g><g><path d="M1"/></g><text xml:space="default"><tspan>x</tspan></text>"#
        );
    }

    #[test]
    fn test_normalizes_single_quotes() {
        let svg = r#"<svg viewBox='0 0 1 1'><text font-family='"Fira"'>a</text></svg>"#;
        assert_eq!(
            optimized_body(svg),
            r#"<text font-family="&quot;Fira&quot;">a</text>"#
        );
    }
}
