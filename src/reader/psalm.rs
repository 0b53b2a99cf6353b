//! Psalm JSON reader (`psalm --output-format=json`)

use serde::Deserialize;
use tracing::debug;

use super::{clean_path, json_from_str, located_case_name};
use crate::converter::ConvertOptions;
use crate::errors::Result;
use crate::format::{Format, Reader};
use crate::model::{Failure, Location, Severity, Suite, TestCase};

#[derive(Debug, Deserialize)]
struct Issue {
    #[serde(default)]
    severity: Option<String>,
    #[serde(default)]
    line_from: Option<u32>,
    #[serde(default)]
    column_from: Option<u32>,
    #[serde(rename = "type", default)]
    issue_type: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

pub struct PsalmReader;

impl Reader for PsalmReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let issues: Vec<Issue> = json_from_str(Format::PsalmJson, input)?;
        let mut suite = Suite::new(options.root_suite_name(Format::PsalmJson));

        for issue in &issues {
            let raw = issue
                .file_name
                .as_deref()
                .or(issue.file_path.as_deref())
                .unwrap_or_default();
            let file = clean_path(raw, options.root_path());
            let case = issue_case(issue, &file);

            match suite.suites.iter_mut().find(|s| s.file.as_deref() == Some(file.as_str())) {
                Some(file_suite) => file_suite.push_case(case),
                None => suite.push_suite(Suite::new(file.clone()).with_file(file).with_case(case)),
            }
        }

        debug!(
            files = suite.suites.len(),
            issues = issues.len(),
            "Parsed psalm report"
        );
        Ok(suite)
    }
}

fn issue_case(issue: &Issue, file: &str) -> TestCase {
    let issue_type = issue.issue_type.as_deref().unwrap_or("Unknown");
    let severity_label = issue.severity.as_deref().unwrap_or("error");
    let column = issue.column_from.filter(|c| *c > 0);
    let location = Location::new(Some(file.to_string()), issue.line_from, column);

    let mut details = vec![issue.message.clone()];
    if let Some(snippet) = issue.snippet.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        details.push(format!("Snippet  : `{}`", snippet));
    }
    if let Some(link) = &issue.link {
        details.push(format!("Docs     : {}", link));
    }
    details.push(format!("File Path: {}", location.to_path_string()));
    details.push(format!("Severity : {}", severity_label));

    let failure = Failure::failure(issue_type, issue.message.clone())
        .with_severity(Severity::from_label(severity_label))
        .with_details(details.join("\n"))
        .with_location(location.clone());

    TestCase::new(located_case_name(file, issue.line_from, column))
        .with_class(issue_type)
        .with_location(location)
        .with_failure(failure)
}
