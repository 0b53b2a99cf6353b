//! Test cases and the failures reported inside them

use std::fmt;

use serde::{Deserialize, Serialize};

/// Normalized severity bucket shared by every format
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// Map a tool-specific severity label onto a bucket.
    ///
    /// Unrecognised labels fall back to `Warning`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "error" | "failure" | "fatal" | "critical" | "blocker" => Severity::Error,
            "info" | "information" | "notice" | "note" | "ignore" | "hint" => Severity::Info,
            _ => Severity::Warning,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which JUnit child element a failure came from (or should become)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    Failure,
    Error,
    Warning,
}

impl FailureKind {
    pub fn element_name(&self) -> &'static str {
        match self {
            FailureKind::Failure => "failure",
            FailureKind::Error => "error",
            FailureKind::Warning => "warning",
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            FailureKind::Failure | FailureKind::Error => Severity::Error,
            FailureKind::Warning => Severity::Warning,
        }
    }
}

/// Source location; every part is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
}

impl Location {
    pub fn new(file: Option<String>, line: Option<u32>, column: Option<u32>) -> Self {
        Self { file, line, column }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self {
            file: Some(path.into()),
            ..Self::default()
        }
    }

    /// `path:line:column`, dropping the parts that are absent.
    ///
    /// A column without a line is meaningless and is never printed.
    pub fn to_path_string(&self) -> String {
        let mut out = self.file.clone().unwrap_or_default();
        if let Some(line) = self.line {
            out.push_str(&format!(":{}", line));
            if let Some(column) = self.column {
                out.push_str(&format!(":{}", column));
            }
        }
        out
    }

    /// Fill absent parts from `other`
    pub fn or(&self, other: &Location) -> Location {
        Location {
            file: self.file.clone().or_else(|| other.file.clone()),
            line: self.line.or(other.line),
            column: self.column.or(other.column),
        }
    }
}

/// One reported problem inside a test case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: FailureKind,
    /// Format-specific type tag (rule id, `ERROR`, exception class...)
    pub failure_type: String,
    /// Rule id exactly as the source report named it, if it named one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    pub severity: Severity,
    pub message: String,
    /// Free-text body (stack trace, description)
    pub details: Option<String>,
    pub location: Location,
}

impl Failure {
    pub fn new(kind: FailureKind, failure_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            failure_type: failure_type.into(),
            rule: None,
            severity: kind.default_severity(),
            message: message.into(),
            details: None,
            location: Location::default(),
        }
    }

    pub fn failure(failure_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Failure, failure_type, message)
    }

    pub fn error(failure_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Error, failure_type, message)
    }

    pub fn warning(failure_type: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Warning, failure_type, message)
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_rule(mut self, rule: Option<String>) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        let details = details.into();
        self.details = if details.is_empty() { None } else { Some(details) };
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Message plus details, without repeating the message when the
    /// details already start with it.
    pub fn full_text(&self) -> String {
        let details = self.details.as_deref().map(str::trim).unwrap_or("");
        if details.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() || details.starts_with(self.message.as_str()) {
            details.to_string()
        } else {
            format!("{}\n{}", self.message, details)
        }
    }
}

/// Marker for a skipped test case
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skipped {
    pub message: Option<String>,
}

/// One test/check result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCase {
    pub name: String,
    pub class: Option<String>,
    pub classname: Option<String>,
    pub location: Location,
    /// Duration in seconds
    pub time: Option<f64>,
    pub assertions: Option<u32>,
    pub failures: Vec<Failure>,
    pub skipped: Option<Skipped>,
    pub stdout: Option<String>,
}

impl TestCase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets both `class` and `classname`, which most readers derive identically
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        let class = class.into();
        self.classname = Some(class.clone());
        self.class = Some(class);
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    pub fn with_time(mut self, seconds: f64) -> Self {
        self.time = Some(seconds);
        self
    }

    pub fn with_assertions(mut self, assertions: u32) -> Self {
        self.assertions = Some(assertions);
        self
    }

    pub fn with_failure(mut self, failure: Failure) -> Self {
        self.failures.push(failure);
        self
    }

    pub fn with_skipped(mut self, message: Option<String>) -> Self {
        self.skipped = Some(Skipped { message });
        self
    }

    pub fn with_stdout(mut self, output: impl Into<String>) -> Self {
        self.stdout = Some(output.into());
        self
    }

    pub fn is_passing(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn count_kind(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }

    /// Where a failure is located, falling back to the case's own location
    pub fn failure_location(&self, failure: &Failure) -> Location {
        failure.location.or(&self.location)
    }
}
