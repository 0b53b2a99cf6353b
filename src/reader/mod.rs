//! Readers - parse raw report input into a [`Suite`](crate::model::Suite)
//!
//! Shared helpers for XML/JSON document loading, attribute parsing and path
//! normalization live here.

pub mod checkstyle;
pub mod junit;
pub mod pdepend;
pub mod phploc;
pub mod phpmd;
pub mod psalm;

use crate::errors::{ConvertError, Result};
use crate::format::Format;

/// Decode raw input bytes; readers only accept UTF-8. A leading BOM is dropped.
pub fn decode(format: Format, input: &[u8]) -> Result<&str> {
    let text = std::str::from_utf8(input)
        .map_err(|e| ConvertError::parse(format.name(), format!("input is not valid UTF-8: {}", e)))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Parse an XML document, mapping syntax errors to a positioned parse error
pub(crate) fn xml_document(format: Format, input: &str) -> Result<roxmltree::Document<'_>> {
    roxmltree::Document::parse(input).map_err(|e| {
        let pos = e.pos();
        ConvertError::parse_at(format.name(), e.to_string(), pos.row, pos.col)
    })
}

/// Require the root element to have the given tag name
pub(crate) fn expect_root<'a, 'input>(
    format: Format,
    doc: &'a roxmltree::Document<'input>,
    names: &[&str],
) -> Result<roxmltree::Node<'a, 'input>> {
    let root = doc.root_element();
    let tag = root.tag_name().name();
    if names.contains(&tag) {
        Ok(root)
    } else {
        let expected = names
            .iter()
            .map(|n| format!("<{}>", n))
            .collect::<Vec<_>>()
            .join(" or ");
        let pos = doc.text_pos_at(root.range().start);
        Err(ConvertError::parse_at(
            format.name(),
            format!("expected root element {}, found <{}>", expected, tag),
            pos.row,
            pos.col,
        ))
    }
}

/// Child elements with the given tag name
pub(crate) fn children_named<'a, 'input: 'a>(
    node: roxmltree::Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = roxmltree::Node<'a, 'input>> + 'a {
    node.children()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

/// Non-empty attribute value
pub(crate) fn attr<'a>(node: roxmltree::Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name).map(str::trim).filter(|v| !v.is_empty())
}

/// Lenient unsigned attribute: unparsable values are treated as absent
pub(crate) fn attr_u32(node: roxmltree::Node<'_, '_>, name: &str) -> Option<u32> {
    attr(node, name).and_then(parse_u32)
}

/// Lenient float attribute: unparsable values are treated as absent
pub(crate) fn attr_f64(node: roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    attr(node, name).and_then(parse_f64)
}

/// Accepts `0.5` and the decimal-comma `0,5`; anything with more than one
/// separator is ambiguous and treated as absent
pub(crate) fn parse_f64(value: &str) -> Option<f64> {
    let separators = value.matches([',', '.']).count();
    if separators > 1 && value.contains(',') {
        return None;
    }
    value.replace(',', ".").parse::<f64>().ok()
}

/// Accepts `12` and `12.0`; negative values are dropped
pub(crate) fn parse_u32(value: &str) -> Option<u32> {
    value
        .parse::<u32>()
        .ok()
        .or_else(|| value.parse::<f64>().ok().filter(|v| *v >= 0.0).map(|v| v as u32))
}

/// Parse JSON, mapping syntax and shape errors to a positioned parse error
pub(crate) fn json_from_str<T: serde::de::DeserializeOwned>(format: Format, input: &str) -> Result<T> {
    serde_json::from_str(input).map_err(|e| json_error(format, &e))
}

pub(crate) fn json_error(format: Format, err: &serde_json::Error) -> ConvertError {
    let message = strip_json_position(&err.to_string());
    if err.line() > 0 {
        ConvertError::parse_at(format.name(), message, err.line() as u32, err.column() as u32)
    } else {
        ConvertError::parse(format.name(), message)
    }
}

/// serde_json appends " at line X column Y"; the position is carried separately
fn strip_json_position(message: &str) -> String {
    match message.rfind(" at line ") {
        Some(idx) => message[..idx].to_string(),
        None => message.to_string(),
    }
}

/// Strip `root_path` from the front of `path`, plus any separator or `./`
/// left behind. Paths outside the root are returned unchanged.
pub fn clean_path(path: &str, root_path: Option<&str>) -> String {
    let path = path.trim();
    let raw_root = root_path.map(str::trim).unwrap_or("");
    let root = raw_root.trim_end_matches(['/', '\\']);

    let relative = match path.strip_prefix(root) {
        // Root is the filesystem root itself
        _ if root.is_empty() && !raw_root.is_empty() => path.trim_start_matches(['/', '\\']),
        Some(rest)
            if !root.is_empty()
                && root != "."
                && (rest.is_empty() || rest.starts_with(['/', '\\'])) =>
        {
            rest.trim_start_matches(['/', '\\'])
        }
        _ => path,
    };

    let relative = relative.strip_prefix("./").unwrap_or(relative);
    if relative.is_empty() {
        path.to_string()
    } else {
        relative.to_string()
    }
}

/// Test case name for a located issue: `file line 10, column 2`
pub(crate) fn located_case_name(file: &str, line: Option<u32>, column: Option<u32>) -> String {
    let mut name = file.to_string();
    if let Some(line) = line {
        name.push_str(&format!(" line {}", line));
        if let Some(column) = column.filter(|c| *c > 0) {
            name.push_str(&format!(", column {}", column));
        }
    }
    name
}
