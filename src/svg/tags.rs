//! Root attribute and body extraction.

use quick_xml::Writer;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};

use super::{SvgDocument, TransformError};

/// Root `<svg>` attributes and serialized inner markup of one icon.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgTags {
    attributes: Vec<(String, String)>,
    body: String,
    /// Rendered (width, height), only computed when the root lacks a viewBox.
    intrinsic_size: Option<(f32, f32)>,
}

impl SvgTags {
    /// Look up a root attribute by its qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Inner markup of the root element.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The root `viewBox`, or `0 0 W H` from the rendered size when absent.
    pub fn view_box(&self) -> Option<String> {
        if let Some(view_box) = self.attribute("viewBox") {
            return Some(view_box.to_string());
        }
        self.intrinsic_size
            .map(|(width, height)| format!("0 0 {width} {height}"))
    }
}

/// Split a document into root attributes and body markup.
pub fn extract_tags(document: &SvgDocument) -> Result<SvgTags, TransformError> {
    let events = document.events();
    let root_index = events
        .iter()
        .position(|event| matches!(event, Event::Start(_) | Event::Empty(_)))
        .ok_or(TransformError::Empty)?;

    let (root, self_closing) = match &events[root_index] {
        Event::Start(start) => (start, false),
        Event::Empty(start) => (start, true),
        _ => return Err(TransformError::Empty),
    };

    let attributes = root_attributes(root)?;
    let body = if self_closing {
        String::new()
    } else {
        serialize_body(&events[root_index + 1..])?
    };

    let intrinsic_size = if attributes.iter().any(|(key, _)| key == "viewBox") {
        None
    } else {
        intrinsic_size(document.source())
    };

    Ok(SvgTags {
        attributes,
        body,
        intrinsic_size,
    })
}

fn root_attributes(root: &BytesStart<'_>) -> Result<Vec<(String, String)>, TransformError> {
    let mut attributes = Vec::new();
    for attr in root.attributes() {
        let attr = attr.map_err(TransformError::xml)?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let raw = String::from_utf8_lossy(&attr.value);
        let value = match unescape(&raw) {
            Ok(value) => value.into_owned(),
            Err(_) => raw.to_string(),
        };
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Serialize events up to (not including) the root's closing tag.
fn serialize_body(events: &[Event<'static>]) -> Result<String, TransformError> {
    let mut writer = Writer::new(Vec::new());
    let mut depth = 0usize;

    for event in events {
        match event {
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            _ => {}
        }
        writer
            .write_event(event.borrow())
            .map_err(TransformError::xml)?;
    }

    String::from_utf8(writer.into_inner()).map_err(TransformError::xml)
}

/// Size of the icon as rendered by usvg.
fn intrinsic_size(source: &str) -> Option<(f32, f32)> {
    let tree = usvg::Tree::from_str(source, &usvg::Options::default()).ok()?;
    let size = tree.size();
    Some((size.width(), size.height()))
}
