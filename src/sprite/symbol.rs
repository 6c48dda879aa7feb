//! `<symbol>` assembly.

use super::NormalizedIcon;
use crate::config::{AttrMap, write_attribute};

/// Wrap one icon as `<symbol id viewBox ...attributes>body</symbol>`.
pub fn assemble_symbol(icon: &NormalizedIcon, attributes: &AttrMap) -> String {
    let mut symbol = String::with_capacity(icon.body.len() + 64);
    symbol.push_str("<symbol");
    write_attribute(&mut symbol, "id", &icon.identifier);
    write_attribute(&mut symbol, "viewBox", &icon.view_box);
    attributes.write_to(&mut symbol);
    symbol.push('>');
    symbol.push_str(&icon.body);
    symbol.push_str("</symbol>");
    symbol
}
