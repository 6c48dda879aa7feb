//! Icon import: read and parse into an owned event stream.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::{SvgDocument, TransformError};

/// Read an icon file and parse it.
pub fn import_svg(path: &Path) -> Result<SvgDocument, TransformError> {
    let content = fs::read_to_string(path).map_err(TransformError::Read)?;
    parse_svg(content)
}

/// Parse SVG markup, checking that it is one well-formed `<svg>` element.
pub fn parse_svg(content: impl Into<String>) -> Result<SvgDocument, TransformError> {
    let content = content.into();
    let events = {
        let mut reader = Reader::from_str(&content);
        let mut events = Vec::new();
        let mut depth = 0usize;
        let mut seen_root = false;

        loop {
            let event = reader.read_event().map_err(|err| {
                TransformError::Xml(format!("{err} (byte {})", reader.buffer_position()))
            })?;

            match &event {
                Event::Eof => break,
                Event::Start(start) => {
                    if depth == 0 {
                        check_root(start, &mut seen_root)?;
                    }
                    depth += 1;
                }
                Event::Empty(start) if depth == 0 => check_root(start, &mut seen_root)?,
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Text(text) if depth == 0 => {
                    if !text.iter().all(u8::is_ascii_whitespace) {
                        return Err(TransformError::xml("text outside of root element"));
                    }
                }
                _ => {}
            }

            events.push(event.into_owned());
        }

        if depth != 0 {
            return Err(TransformError::xml("unclosed root element"));
        }
        if !seen_root {
            return Err(TransformError::Empty);
        }
        events
    };

    Ok(SvgDocument::new(content, events))
}

fn check_root(start: &BytesStart<'_>, seen_root: &mut bool) -> Result<(), TransformError> {
    if *seen_root {
        return Err(TransformError::xml("multiple root elements"));
    }
    *seen_root = true;

    let local = start.local_name();
    if local.as_ref() != b"svg" {
        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        return Err(TransformError::NotSvg(name));
    }
    Ok(())
}
