//! JUnit XML Reporter
//!
//! Generates JUnit XML mirroring the suite tree. Suite counters are computed
//! from the tree at render time. Compatible with Jenkins, GitLab, TeamCity
//! and other CI systems.

use super::{escape_attr, escape_xml};
use crate::errors::Result;
use crate::format::{RenderOptions, Writer};
use crate::model::{Failure, FailureKind, Suite, TestCase};

pub struct JUnitWriter;

impl Writer for JUnitWriter {
    fn render(&self, suite: &Suite, _options: &RenderOptions) -> Result<String> {
        Ok(generate_junit(suite))
    }
}

/// Generate JUnit XML output from a suite tree
pub fn generate_junit(suite: &Suite) -> String {
    let mut xml = String::new();

    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<testsuites>\n");
    write_suite(&mut xml, suite, 1);
    xml.push_str("</testsuites>\n");
    xml
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

fn write_suite(xml: &mut String, suite: &Suite, depth: usize) {
    let pad = indent(depth);
    let mut attrs = vec![("name", suite.name.clone())];
    if let Some(file) = &suite.file {
        attrs.push(("file", file.clone()));
    }
    attrs.push(("tests", suite.test_count().to_string()));

    let counters = [
        ("assertions", suite.assertion_count()),
        ("errors", suite.count_kind(FailureKind::Error)),
        ("warnings", suite.count_kind(FailureKind::Warning)),
        ("failures", suite.count_kind(FailureKind::Failure)),
        ("skipped", suite.skipped_count()),
    ];
    for (name, value) in counters {
        if value > 0 {
            attrs.push((name, value.to_string()));
        }
    }
    if let Some(time) = suite.total_time() {
        attrs.push(("time", format!("{:.6}", time)));
    }

    if suite.is_empty() {
        xml.push_str(&format!("{}<testsuite{}/>\n", pad, render_attrs(&attrs)));
        return;
    }

    xml.push_str(&format!("{}<testsuite{}>\n", pad, render_attrs(&attrs)));
    for child in &suite.suites {
        write_suite(xml, child, depth + 1);
    }
    for case in &suite.cases {
        write_case(xml, case, depth + 1);
    }
    xml.push_str(&format!("{}</testsuite>\n", pad));
}

fn write_case(xml: &mut String, case: &TestCase, depth: usize) {
    let pad = indent(depth);
    let mut attrs = vec![("name", case.name.clone())];
    if let Some(class) = &case.class {
        attrs.push(("class", class.clone()));
    }
    if let Some(classname) = &case.classname {
        attrs.push(("classname", classname.clone()));
    }
    if let Some(file) = &case.location.file {
        attrs.push(("file", file.clone()));
    }
    if let Some(line) = case.location.line {
        attrs.push(("line", line.to_string()));
    }
    if let Some(assertions) = case.assertions {
        attrs.push(("assertions", assertions.to_string()));
    }
    if let Some(time) = case.time {
        attrs.push(("time", format!("{:.6}", time)));
    }

    if case.failures.is_empty() && case.skipped.is_none() && case.stdout.is_none() {
        xml.push_str(&format!("{}<testcase{}/>\n", pad, render_attrs(&attrs)));
        return;
    }

    xml.push_str(&format!("{}<testcase{}>\n", pad, render_attrs(&attrs)));
    let inner = indent(depth + 1);

    for failure in &case.failures {
        write_failure(xml, failure, &inner);
    }

    if let Some(skipped) = &case.skipped {
        match &skipped.message {
            Some(message) => xml.push_str(&format!(
                "{}<skipped message=\"{}\"/>\n",
                inner,
                escape_attr(message)
            )),
            None => xml.push_str(&format!("{}<skipped/>\n", inner)),
        }
    }

    if let Some(stdout) = &case.stdout {
        xml.push_str(&format!(
            "{}<system-out>{}</system-out>\n",
            inner,
            escape_xml(stdout)
        ));
    }

    xml.push_str(&format!("{}</testcase>\n", pad));
}

fn write_failure(xml: &mut String, failure: &Failure, pad: &str) {
    let element = failure.kind.element_name();
    let mut attrs = Vec::new();
    if !failure.failure_type.is_empty() {
        attrs.push(("type", failure.failure_type.clone()));
    }
    attrs.push(("message", failure.message.clone()));

    match failure.details.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(details) => {
            // The body sits on its own lines
            let mut body = escape_xml(details);
            if !body.starts_with('\n') {
                body.insert(0, '\n');
            }
            if !body.ends_with('\n') {
                body.push('\n');
            }
            xml.push_str(&format!(
                "{}<{}{}>{}</{}>\n",
                pad,
                element,
                render_attrs(&attrs),
                body,
                element
            ));
        }
        None => xml.push_str(&format!("{}<{}{}/>\n", pad, element, render_attrs(&attrs))),
    }
}

fn render_attrs(attrs: &[(&str, String)]) -> String {
    attrs
        .iter()
        .map(|(name, value)| format!(" {}=\"{}\"", name, escape_attr(value)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn checkstyle_like() -> Suite {
        let location = Location::new(Some("a.php".into()), Some(10), Some(2));
        let case = || {
            TestCase::new("a.php line 10, column 2")
                .with_class("ERROR")
                .with_location(location.clone())
                .with_failure(
                    Failure::failure("ERROR", "X")
                        .with_details("\nX\nFile Path: a.php:10:2\nSeverity : error\n"),
                )
        };
        Suite::new("S").with_suite(
            Suite::new("a.php")
                .with_file("a.php")
                .with_case(case())
                .with_case(case()),
        )
    }

    #[test]
    fn generates_valid_xml() {
        let xml = generate_junit(&checkstyle_like());

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuites>\n"));
        assert!(xml.ends_with("</testsuites>\n"));
        assert!(!xml.ends_with("\n\n"));
        assert!(roxmltree::Document::parse(&xml).is_ok());
    }

    #[test]
    fn counts_are_recursive() {
        let xml = generate_junit(&checkstyle_like());
        assert!(xml.contains("  <testsuite name=\"S\" tests=\"2\" failures=\"2\">\n"));
        assert!(xml.contains(
            "    <testsuite name=\"a.php\" file=\"a.php\" tests=\"2\" failures=\"2\">\n"
        ));
    }

    #[test]
    fn failure_body_is_literal() {
        let xml = generate_junit(&checkstyle_like());
        let expected = concat!(
            "      <testcase name=\"a.php line 10, column 2\" class=\"ERROR\" classname=\"ERROR\" file=\"a.php\" line=\"10\">\n",
            "        <failure type=\"ERROR\" message=\"X\">\n",
            "X\n",
            "File Path: a.php:10:2\n",
            "Severity : error\n",
            "</failure>\n",
            "      </testcase>\n",
        );
        assert!(xml.contains(expected), "{}", xml);
    }

    #[test]
    fn empty_suite_self_closes() {
        let xml = generate_junit(&Suite::new("root"));
        assert!(xml.contains("  <testsuite name=\"root\" tests=\"0\"/>\n"));
    }

    #[test]
    fn renders_skips_output_and_kinds() {
        let suite = Suite::new("root").with_case(
            TestCase::new("t")
                .with_time(0.5)
                .with_assertions(2)
                .with_failure(Failure::error("E", "boom <here>"))
                .with_failure(Failure::warning("W", "risky"))
                .with_skipped(Some("later".into()))
                .with_stdout("out & about"),
        );
        let xml = generate_junit(&suite);

        assert!(xml.contains(
            "<testsuite name=\"root\" tests=\"1\" assertions=\"2\" errors=\"1\" warnings=\"1\" skipped=\"1\" time=\"0.500000\">"
        ));
        assert!(xml.contains("<testcase name=\"t\" assertions=\"2\" time=\"0.500000\">"));
        assert!(xml.contains("<error type=\"E\" message=\"boom &lt;here&gt;\"/>"));
        assert!(xml.contains("<warning type=\"W\" message=\"risky\"/>"));
        assert!(xml.contains("<skipped message=\"later\"/>"));
        assert!(xml.contains("<system-out>out &amp; about</system-out>"));
    }

    #[test]
    fn multiline_messages_survive_attributes() {
        let suite = Suite::new("root")
            .with_case(TestCase::new("t").with_failure(Failure::failure("F", "line1\nline2")));
        let xml = generate_junit(&suite);
        let doc = roxmltree::Document::parse(&xml).unwrap();
        let failure = doc
            .descendants()
            .find(|n| n.has_tag_name("failure"))
            .unwrap();
        assert_eq!(failure.attribute("message"), Some("line1\nline2"));
    }
}
