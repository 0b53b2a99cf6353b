//! CheckStyle XML reader
//!
//! `<checkstyle>` → `<file name>` → `<error line column severity message source>`.
//! Each file becomes a child suite and each `<error>` one failing test case.

use tracing::{debug, trace};

use super::{attr, attr_u32, children_named, clean_path, expect_root, located_case_name, xml_document};
use crate::converter::ConvertOptions;
use crate::errors::Result;
use crate::format::{Format, Reader};
use crate::model::{Failure, Location, Severity, Suite, TestCase};

pub struct CheckStyleReader;

impl Reader for CheckStyleReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let doc = xml_document(Format::CheckStyle, input)?;
        let root = expect_root(Format::CheckStyle, &doc, &["checkstyle"])?;

        let mut suite = Suite::new(options.root_suite_name(Format::CheckStyle));

        for file_node in children_named(root, "file") {
            let raw_name = attr(file_node, "name").unwrap_or_default();
            let file = clean_path(raw_name, options.root_path());
            let mut file_suite = Suite::new(file.clone()).with_file(file.clone());

            for error in children_named(file_node, "error") {
                file_suite.push_case(error_case(error, &file));
            }

            trace!(file = %file, errors = file_suite.cases.len(), "checkstyle file");
            suite.push_suite(file_suite);
        }

        debug!(
            files = suite.suites.len(),
            errors = suite.test_count(),
            "Parsed checkstyle report"
        );
        Ok(suite)
    }
}

fn error_case(error: roxmltree::Node<'_, '_>, file: &str) -> TestCase {
    let line = attr_u32(error, "line");
    let column = attr_u32(error, "column").filter(|c| *c > 0);
    let severity_label = attr(error, "severity").unwrap_or("error");
    let message = error.attribute("message").unwrap_or_default().to_string();
    let source = attr(error, "source").map(str::to_string);
    let failure_type = source.clone().unwrap_or_else(|| severity_label.to_uppercase());

    let location = Location::new(Some(file.to_string()), line, column);
    let details = format!(
        "\n{}\nFile Path: {}\nSeverity : {}\n",
        message,
        location.to_path_string(),
        severity_label
    );

    let failure = Failure::failure(failure_type.clone(), message)
        .with_severity(Severity::from_label(severity_label))
        .with_rule(source)
        .with_details(details)
        .with_location(location.clone());

    TestCase::new(located_case_name(file, line, column))
        .with_class(failure_type)
        .with_location(location)
        .with_failure(failure)
}
