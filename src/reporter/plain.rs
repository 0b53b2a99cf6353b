//! Plain text report for terminals and build logs

use crate::errors::Result;
use crate::format::{RenderOptions, Writer};
use crate::model::{FailureKind, Suite, TestCase};

pub struct PlainTextWriter;

impl Writer for PlainTextWriter {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String> {
        Ok(generate_text(suite, options.group_name(suite)))
    }
}

/// Failures grouped by suite followed by a totals line
pub fn generate_text(suite: &Suite, root_name: &str) -> String {
    let mut out = String::new();

    for current in suite.iter_suites() {
        if current.cases.iter().all(TestCase::is_passing) {
            continue;
        }

        let name = if std::ptr::eq(current, suite) {
            root_name
        } else {
            current.name.as_str()
        };
        out.push_str(name);
        out.push('\n');

        for case in &current.cases {
            for failure in &case.failures {
                let location = case.failure_location(failure);
                let place = if location.file.is_some() {
                    location.to_path_string()
                } else {
                    case.name.clone()
                };
                let message = failure.message.lines().next().unwrap_or_default();
                out.push_str(&format!(
                    "  {} [{}] {}\n",
                    place,
                    failure.severity.as_str(),
                    message
                ));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{}: {} tests, {} failures, {} errors, {} warnings, {} skipped\n",
        root_name,
        suite.test_count(),
        suite.count_kind(FailureKind::Failure),
        suite.count_kind(FailureKind::Error),
        suite.count_kind(FailureKind::Warning),
        suite.skipped_count()
    ));
    out
}
