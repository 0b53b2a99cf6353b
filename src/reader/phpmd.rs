//! PHPMD JSON reader
//!
//! `{"files": [{"file", "violations": [...]}], "errors": [...]}`. Each
//! violation becomes one failing case whose class is the rule name, so the
//! inspections writer can group occurrences by rule.

use serde::Deserialize;
use tracing::debug;

use super::{clean_path, json_from_str, located_case_name};
use crate::converter::ConvertOptions;
use crate::errors::Result;
use crate::format::{Format, Reader};
use crate::model::{Failure, Location, Severity, Suite, TestCase};

#[derive(Debug, Deserialize)]
struct PhpMdReport {
    files: Vec<PhpMdFile>,
    #[serde(default)]
    errors: Vec<PhpMdError>,
}

#[derive(Debug, Deserialize)]
struct PhpMdFile {
    file: String,
    #[serde(default)]
    violations: Vec<Violation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Violation {
    #[serde(default)]
    begin_line: Option<u32>,
    #[serde(default)]
    end_line: Option<u32>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    rule_set: Option<String>,
    #[serde(default)]
    external_info_url: Option<String>,
    #[serde(default)]
    priority: Option<u8>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhpMdError {
    #[serde(default)]
    file_name: String,
    #[serde(default)]
    message: String,
}

pub struct PhpMdReader;

impl Reader for PhpMdReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let report: PhpMdReport = json_from_str(Format::PhpMdJson, input)?;
        let mut suite = Suite::new(options.root_suite_name(Format::PhpMdJson));

        for entry in &report.files {
            let file = clean_path(&entry.file, options.root_path());
            let mut file_suite = Suite::new(file.clone()).with_file(file.clone());
            for violation in &entry.violations {
                file_suite.push_case(violation_case(violation, &file));
            }
            suite.push_suite(file_suite);
        }

        for error in &report.errors {
            let file = clean_path(&error.file_name, options.root_path());
            let failure = Failure::error("ProcessingError", error.message.clone())
                .with_location(Location::file(file.clone()));
            suite.push_case(
                TestCase::new(file.clone())
                    .with_class("ProcessingError")
                    .with_location(Location::file(file))
                    .with_failure(failure),
            );
        }

        debug!(
            files = report.files.len(),
            violations = suite.test_count(),
            "Parsed phpmd report"
        );
        Ok(suite)
    }
}

/// PHPMD priorities run from 1 (highest) to 5
fn priority_severity(priority: Option<u8>) -> Severity {
    match priority {
        Some(1 | 2) => Severity::Error,
        Some(5) => Severity::Info,
        _ => Severity::Warning,
    }
}

fn violation_case(violation: &Violation, file: &str) -> TestCase {
    let rule = violation.rule.as_deref().unwrap_or("Unknown");
    let location = Location::new(Some(file.to_string()), violation.begin_line, None);
    let message = violation.description.trim();

    let mut details = vec![message.to_string()];
    if let Some(rule_set) = &violation.rule_set {
        details.push(format!("Rule     : {} / {}", rule_set, rule));
    } else {
        details.push(format!("Rule     : {}", rule));
    }
    if let Some(priority) = violation.priority {
        details.push(format!("Priority : {}", priority));
    }
    if let Some(url) = &violation.external_info_url {
        details.push(format!("Docs     : {}", url));
    }
    let lines = match (violation.begin_line, violation.end_line) {
        (Some(begin), Some(end)) if end > begin => format!(":{}-{}", begin, end),
        (Some(begin), _) => format!(":{}", begin),
        _ => String::new(),
    };
    details.push(format!("File Path: {}{}", file, lines));

    let failure = Failure::failure(rule, message)
        .with_severity(priority_severity(violation.priority))
        .with_details(details.join("\n"))
        .with_location(location.clone());

    TestCase::new(located_case_name(file, violation.begin_line, None))
        .with_class(rule)
        .with_location(location)
        .with_failure(failure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConvertError;

    const REPORT: &str = r#"{
  "version": "@package_version@",
  "package": "phpmd",
  "timestamp": "2021-03-13T12:00:00+00:00",
  "files": [
    {
      "file": "/app/src/Commands/Convert.php",
      "violations": [
        {
          "beginLine": 52,
          "endLine": 52,
          "package": "App\\Commands",
          "function": "execute",
          "class": "Convert",
          "method": "execute",
          "description": "Avoid unused parameters such as '$input'.",
          "rule": "UnusedFormalParameter",
          "ruleSet": "Unused Code Rules",
          "externalInfoUrl": "https://phpmd.org/rules/unusedcode.html#unusedformalparameter",
          "priority": 3
        },
        {
          "beginLine": 60,
          "endLine": 75,
          "description": "The method execute() has a Cyclomatic Complexity of 12.",
          "rule": "CyclomaticComplexity",
          "priority": 1
        }
      ]
    }
  ],
  "errors": [
    {"fileName": "/app/src/Broken.php", "message": "Unexpected token"}
  ]
}"#;

    fn parse(input: &str, options: &ConvertOptions) -> Result<Suite> {
        PhpMdReader.parse(input, options)
    }

    #[test]
    fn one_case_per_violation() {
        let suite = parse(REPORT, &ConvertOptions::new().with_root_path("/app")).unwrap();

        assert_eq!(suite.name, "PHPmd");
        assert_eq!(suite.suites.len(), 1);
        assert_eq!(suite.suites[0].name, "src/Commands/Convert.php");

        let case = &suite.suites[0].cases[0];
        assert_eq!(case.name, "src/Commands/Convert.php line 52");
        assert_eq!(case.class.as_deref(), Some("UnusedFormalParameter"));

        let failure = &case.failures[0];
        assert_eq!(failure.failure_type, "UnusedFormalParameter");
        assert_eq!(failure.message, "Avoid unused parameters such as '$input'.");
        assert_eq!(failure.severity, Severity::Warning);
        let details = failure.details.as_deref().unwrap();
        assert!(details.contains("Rule     : Unused Code Rules / UnusedFormalParameter"));
        assert!(details.contains("Docs     : https://phpmd.org/rules/unusedcode.html#unusedformalparameter"));
        assert!(details.ends_with("File Path: src/Commands/Convert.php:52"));
    }

    #[test]
    fn priority_maps_to_severity() {
        assert_eq!(priority_severity(Some(1)), Severity::Error);
        assert_eq!(priority_severity(Some(2)), Severity::Error);
        assert_eq!(priority_severity(Some(4)), Severity::Warning);
        assert_eq!(priority_severity(Some(5)), Severity::Info);
        assert_eq!(priority_severity(None), Severity::Warning);

        let suite = parse(REPORT, &ConvertOptions::new()).unwrap();
        let complex = &suite.suites[0].cases[1].failures[0];
        assert_eq!(complex.severity, Severity::Error);
        assert!(complex.details.as_deref().unwrap().ends_with(":60-75"));
    }

    #[test]
    fn processing_errors_become_cases() {
        let suite = parse(REPORT, &ConvertOptions::new().with_root_path("/app")).unwrap();
        assert_eq!(suite.cases.len(), 1);
        assert_eq!(suite.cases[0].name, "src/Broken.php");
        assert_eq!(suite.cases[0].failures[0].message, "Unexpected token");
        assert_eq!(suite.test_count(), 3);
    }

    #[test]
    fn files_are_required() {
        let err = parse(r#"{"version": "1"}"#, &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
        assert!(err.to_string().contains("files"));
    }
}
