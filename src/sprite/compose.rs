//! Root `<svg>` composition.

use crate::config::{AttrMap, write_attribute};

pub const SVG_VERSION: &str = "1.1";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// Join `symbols` with single spaces inside the sprite's root element.
pub fn compose_sprite<S: AsRef<str>>(symbols: &[S], attributes: &AttrMap) -> String {
    let body_len: usize = symbols.iter().map(|s| s.as_ref().len() + 1).sum();
    let mut document = String::with_capacity(body_len + 160);

    document.push_str("<svg");
    write_attribute(&mut document, "version", SVG_VERSION);
    write_attribute(&mut document, "xmlns", SVG_NAMESPACE);
    write_attribute(&mut document, "xmlns:xlink", XLINK_NAMESPACE);
    attributes.write_to(&mut document);
    document.push('>');

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            document.push(' ');
        }
        document.push_str(symbol.as_ref());
    }

    document.push_str("</svg>");
    document
}
