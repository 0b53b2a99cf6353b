//! GitHub Actions workflow commands (`::error file=...::message`)
//!
//! See: https://docs.github.com/en/actions/using-workflows/workflow-commands-for-github-actions

use super::require_message;
use crate::errors::Result;
use crate::format::{Format, RenderOptions, Writer};
use crate::model::{Failure, Severity, Suite, TestCase};

pub struct GithubCliWriter;

impl Writer for GithubCliWriter {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String> {
        let mut lines = Vec::new();

        for current in suite.iter_suites() {
            if current.cases.iter().all(TestCase::is_passing) {
                continue;
            }

            let title = if std::ptr::eq(current, suite) {
                options.group_name(suite)
            } else {
                current.name.as_str()
            };
            lines.push(format!("::group::{}", escape_data(title)));
            for case in &current.cases {
                for failure in &case.failures {
                    require_message(Format::GithubCli, case, failure)?;
                    lines.push(annotation(case, failure));
                }
            }
            lines.push("::endgroup::".to_string());
        }

        if lines.is_empty() {
            return Ok(String::new());
        }
        let mut out = lines.join("\n");
        out.push('\n');
        Ok(out)
    }
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "notice",
    }
}

fn annotation(case: &TestCase, failure: &Failure) -> String {
    let location = case.failure_location(failure);
    let mut properties = Vec::new();
    if let Some(file) = &location.file {
        properties.push(format!("file={}", escape_property(file)));
    }
    if let Some(line) = location.line {
        properties.push(format!("line={}", line));
    }
    if let Some(column) = location.column {
        properties.push(format!("col={}", column));
    }

    let command = level(failure.severity);
    let message = escape_data(&failure.full_text());
    if properties.is_empty() {
        format!("::{}::{}", command, message)
    } else {
        format!("::{} {}::{}", command, properties.join(","), message)
    }
}

/// Escape a command message
pub(crate) fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Escape a command property value
pub(crate) fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}
