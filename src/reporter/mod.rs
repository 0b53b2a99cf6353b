//! Reporter - Output formatting for every writable format
//!
//! File formats (JUnit, CheckStyle, GitLab) build a whole document, line
//! protocols (TeamCity, GitHub annotations) emit one line per event.

pub mod checkstyle;
pub mod github;
pub mod gitlab;
pub mod junit;
pub mod plain;
pub mod teamcity;

use crate::errors::{ConvertError, Result};
use crate::format::Format;
use crate::model::{Failure, TestCase};

/// Escape XML special characters. Attributes are always double-quoted,
/// so apostrophes are kept as-is. Control characters XML 1.0 cannot carry
/// become U+FFFD so their position stays visible.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\n' | '\r' | '\t' => out.push(c),
            // Not representable in XML 1.0
            c if (c as u32) < 0x20 => out.push(char::REPLACEMENT_CHARACTER),
            c => out.push(c),
        }
    }
    out
}

/// Escape an attribute value; line breaks become character references so
/// parsers do not normalize them to spaces
pub(crate) fn escape_attr(s: &str) -> String {
    escape_xml(s)
        .replace('\r', "&#13;")
        .replace('\n', "&#10;")
        .replace('\t', "&#9;")
}

/// Fail when a format that needs a message meets a failure without one
pub(crate) fn require_message(format: Format, case: &TestCase, failure: &Failure) -> Result<()> {
    if failure.message.trim().is_empty() {
        Err(ConvertError::render(
            format.name(),
            format!("failure in \"{}\" has an empty message", case.name),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_xml_entities() {
        assert_eq!(escape_xml("<test>"), "&lt;test&gt;");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("\"quoted\""), "&quot;quoted&quot;");
        assert_eq!(escape_xml("bell\u{7}"), "bell\u{fffd}");
        assert_eq!(escape_xml("\u{1b}[31mred\u{1b}[0m"), "\u{fffd}[31mred\u{fffd}[0m");
        assert_eq!(escape_xml("such as '$input'"), "such as '$input'");
    }

    #[test]
    fn attributes_keep_line_breaks() {
        assert_eq!(escape_attr("a\nb"), "a&#10;b");
        assert_eq!(escape_xml("a\nb"), "a\nb");
    }

    #[test]
    fn empty_message_is_a_render_error() {
        let case = TestCase::new("case");
        let failure = Failure::failure("T", "  ");
        let err = require_message(Format::GithubCli, &case, &failure).unwrap_err();
        assert!(matches!(err, ConvertError::Render { .. }));
        assert!(require_message(Format::GithubCli, &case, &Failure::failure("T", "m")).is_ok());
    }
}
