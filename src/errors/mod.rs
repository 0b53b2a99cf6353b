//! Conversion errors with miette diagnostics
//!
//! Every failure of a conversion is one of these variants; the CLI decides
//! exit codes and messages by matching on them, never on message text.

pub mod suggestions;

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used across readers, writers and the converter
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Which side of a conversion a format was requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => write!(f, "input"),
            Direction::Write => write!(f, "output"),
        }
    }
}

/// Main error type for report conversion
#[derive(Error, Debug, Diagnostic)]
pub enum ConvertError {
    /// Input path does not resolve
    #[error("File \"{path}\" not found")]
    #[diagnostic(
        code(ci_report::file::not_found),
        help("Check that the file path is correct and the file exists")
    )]
    FileNotFound { path: String },

    /// Input or output could not be read/written
    #[error("IO error on \"{path}\": {message}")]
    #[diagnostic(code(ci_report::io))]
    Io { path: String, message: String },

    /// Input bytes do not match the declared source format
    #[error("Unable to parse {format} input{}: {message}", position_suffix(.line, .column))]
    #[diagnostic(
        code(ci_report::parse),
        help("Make sure --input-format matches the file contents")
    )]
    Parse {
        format: String,
        message: String,
        line: Option<u32>,
        column: Option<u32>,
    },

    /// Format name is not registered
    #[error("Unknown format: '{name}'")]
    #[diagnostic(code(ci_report::unknown_format), help("{suggestion}"))]
    UnknownFormat { name: String, suggestion: String },

    /// Format exists but cannot be used on the requested side
    #[error("Format '{format}' cannot be used as {direction}")]
    #[diagnostic(
        code(ci_report::unsupported_direction),
        help("Run 'ci-report-converter convert:map' to see supported directions")
    )]
    UnsupportedDirection { format: String, direction: Direction },

    /// Both formats are known but the pair is not meaningful
    #[error("Conversion from '{from}' to '{to}' is not supported")]
    #[diagnostic(
        code(ci_report::unsupported_conversion),
        help("Run 'ci-report-converter convert:map' to see supported pairs")
    )]
    UnsupportedConversion { from: String, to: String },

    /// IR is valid but breaks a writer precondition
    #[error("Unable to render {format}: {message}")]
    #[diagnostic(code(ci_report::render))]
    Render { format: String, message: String },
}

impl ConvertError {
    pub fn parse(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn parse_at(
        format: impl Into<String>,
        message: impl Into<String>,
        line: u32,
        column: u32,
    ) -> Self {
        Self::Parse {
            format: format.into(),
            message: message.into(),
            line: Some(line),
            column: Some(column),
        }
    }

    /// Unknown format error with a "did you mean" suggestion
    pub fn unknown_format(name: impl Into<String>, known: &[&str]) -> Self {
        let name = name.into();
        let suggestion = suggestions::suggest_format(&name, known);
        Self::UnknownFormat { name, suggestion }
    }

    pub fn render(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            format: format.into(),
            message: message.into(),
        }
    }

    pub fn from_io(path: impl Into<String>, err: &std::io::Error) -> Self {
        let path = path.into();
        if err.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::Io {
                path,
                message: err.to_string(),
            }
        }
    }
}

fn position_suffix(line: &Option<u32>, column: &Option<u32>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(" at line {}, column {}", line, column),
        (Some(line), None) => format!(" at line {}", line),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_message_matches_cli_contract() {
        let err = ConvertError::FileNotFound {
            path: "/undefined/file.xml".to_string(),
        };
        assert_eq!(err.to_string(), "File \"/undefined/file.xml\" not found");
    }

    #[test]
    fn parse_error_carries_position() {
        let err = ConvertError::parse_at("junit", "unexpected end", 3, 14);
        assert_eq!(
            err.to_string(),
            "Unable to parse junit input at line 3, column 14: unexpected end"
        );

        let err = ConvertError::parse("phpmd-json", "missing field `files`");
        assert_eq!(
            err.to_string(),
            "Unable to parse phpmd-json input: missing field `files`"
        );
    }

    #[test]
    fn unknown_format_suggests_close_match() {
        let err = ConvertError::unknown_format("junt", &["junit", "checkstyle"]);
        if let ConvertError::UnknownFormat { suggestion, .. } = err {
            assert!(suggestion.contains("junit"));
        } else {
            panic!("Expected UnknownFormat");
        }
    }

    #[test]
    fn io_not_found_maps_to_file_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        assert!(matches!(
            ConvertError::from_io("x.xml", &io),
            ConvertError::FileNotFound { .. }
        ));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        assert!(matches!(
            ConvertError::from_io("x.xml", &io),
            ConvertError::Io { .. }
        ));
    }

    #[test]
    fn directions_display() {
        let err = ConvertError::UnsupportedDirection {
            format: "github-cli".to_string(),
            direction: Direction::Read,
        };
        assert_eq!(err.to_string(), "Format 'github-cli' cannot be used as input");
    }
}
