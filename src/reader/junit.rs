//! JUnit XML reader
//!
//! Accepts `<testsuites>` or a bare `<testsuite>` root. Suite-level counters
//! (`tests`, `failures`, ...) are ignored; the model derives them.

use tracing::{debug, trace};

use super::{attr, attr_f64, attr_u32, children_named, clean_path, expect_root, xml_document};
use crate::converter::ConvertOptions;
use crate::errors::{ConvertError, Result};
use crate::format::{Format, Reader};
use crate::model::{Failure, FailureKind, Location, Suite, TestCase};

pub struct JUnitReader;

impl Reader for JUnitReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let doc = xml_document(Format::JUnit, input)?;
        let root = expect_root(Format::JUnit, &doc, &["testsuites", "testsuite"])?;

        let suite = if root.tag_name().name() == "testsuite" {
            let mut suite = read_suite(root, options)?;
            if let Some(name) = options.suite_name() {
                suite = Suite::new(name).with_suite(suite);
            }
            suite
        } else {
            let mut top: Vec<Suite> = children_named(root, "testsuite")
                .map(|node| read_suite(node, options))
                .collect::<Result<_>>()?;

            match (options.suite_name(), top.len()) {
                (None, 1) => top.remove(0),
                (name, _) => {
                    let name = name
                        .or_else(|| attr(root, "name"))
                        .unwrap_or(Format::JUnit.default_suite_name());
                    let mut suite = Suite::new(name);
                    for child in top {
                        suite.push_suite(child);
                    }
                    suite
                }
            }
        };

        debug!(
            suites = suite.iter_suites().count(),
            tests = suite.test_count(),
            failures = suite.failure_count(),
            "Parsed junit report"
        );
        Ok(suite)
    }
}

fn read_suite(node: roxmltree::Node<'_, '_>, options: &ConvertOptions) -> Result<Suite> {
    let name = attr(node, "name").unwrap_or_default();
    let mut suite = Suite::new(name);
    if let Some(file) = attr(node, "file") {
        suite = suite.with_file(clean_path(file, options.root_path()));
    }

    for child in node.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "testsuite" => suite.push_suite(read_suite(child, options)?),
            "testcase" => suite.push_case(read_case(child, options)?),
            other => trace!(element = other, "Ignoring suite child"),
        }
    }

    Ok(suite)
}

fn read_case(node: roxmltree::Node<'_, '_>, options: &ConvertOptions) -> Result<TestCase> {
    let name = attr(node, "name").ok_or_else(|| {
        let pos = node.document().text_pos_at(node.range().start);
        ConvertError::parse_at(
            Format::JUnit.name(),
            "<testcase> is missing the name attribute",
            pos.row,
            pos.col,
        )
    })?;

    let location = Location::new(
        attr(node, "file").map(|f| clean_path(f, options.root_path())),
        attr_u32(node, "line"),
        None,
    );

    let mut case = TestCase::new(name).with_location(location.clone());
    case.class = attr(node, "class").map(str::to_string);
    case.classname = attr(node, "classname").map(str::to_string);
    case.assertions = attr_u32(node, "assertions");
    case.time = attr_f64(node, "time");

    for child in node.children().filter(|n| n.is_element()) {
        let kind = match child.tag_name().name() {
            "failure" => FailureKind::Failure,
            "error" => FailureKind::Error,
            "warning" => FailureKind::Warning,
            "skipped" => {
                let message = attr(child, "message").map(str::to_string);
                case = case.with_skipped(message);
                continue;
            }
            "system-out" => {
                if let Some(text) = child.text().filter(|t| !t.trim().is_empty()) {
                    case = case.with_stdout(text.trim());
                }
                continue;
            }
            other => {
                trace!(element = other, "Ignoring testcase child");
                continue;
            }
        };
        case.failures.push(read_failure(child, kind, &location));
    }

    Ok(case)
}

fn read_failure(node: roxmltree::Node<'_, '_>, kind: FailureKind, location: &Location) -> Failure {
    let body = node.text().unwrap_or_default();
    let message = attr(node, "message")
        .map(str::to_string)
        .or_else(|| {
            body.lines()
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_default();
    let failure_type = attr(node, "type")
        .map(str::to_string)
        .unwrap_or_else(|| kind.element_name().to_string());

    Failure::new(kind, failure_type, message)
        .with_details(body.trim_matches('\n'))
        .with_location(location.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Severity;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuites>
  <testsuite name="Unit" tests="99" failures="42">
    <testsuite name="MathTest" file="/app/tests/MathTest.php">
      <testcase name="testAdd" class="MathTest" classname="MathTest" file="/app/tests/MathTest.php" line="12" assertions="3" time="0.010000"/>
      <testcase name="testDiv" class="MathTest" classname="MathTest" file="/app/tests/MathTest.php" line="20" assertions="1" time="0.002">
        <failure type="PHPUnit\Framework\ExpectationFailedException">Failed asserting that 2 is 3.
/app/tests/MathTest.php:22</failure>
      </testcase>
      <testcase name="testSkip" class="MathTest">
        <skipped/>
        <system-out>debug output</system-out>
      </testcase>
    </testsuite>
    <testcase name="testBoom" class="BoomTest">
      <error type="RuntimeException" message="Boom">trace</error>
      <warning message="Risky"/>
    </testcase>
  </testsuite>
</testsuites>
"#;

    fn parse(input: &str, options: &ConvertOptions) -> Result<Suite> {
        JUnitReader.parse(input, options)
    }

    #[test]
    fn decimal_comma_durations() {
        let input = r#"<testsuites><testsuite name="S">
  <testcase name="a" time="0,5"/>
  <testcase name="b" time="1,234.5"/>
</testsuite></testsuites>"#;
        let suite = parse(input, &ConvertOptions::new()).unwrap();
        assert_eq!(suite.cases[0].time, Some(0.5));
        assert_eq!(suite.cases[1].time, None);
    }

    #[test]
    fn single_top_suite_becomes_root() {
        let suite = parse(REPORT, &ConvertOptions::new().with_root_path("/app")).unwrap();

        assert_eq!(suite.name, "Unit");
        assert_eq!(suite.suites.len(), 1);
        assert_eq!(suite.suites[0].file.as_deref(), Some("tests/MathTest.php"));
        assert_eq!(suite.test_count(), 4);
        assert_eq!(suite.failure_count(), 3);
        assert_eq!(suite.skipped_count(), 1);
        assert_eq!(suite.assertion_count(), 4);
    }

    #[test]
    fn suite_name_wraps_top_level_suites() {
        let suite = parse(REPORT, &ConvertOptions::new().with_suite_name("CI")).unwrap();
        assert_eq!(suite.name, "CI");
        assert_eq!(suite.suites[0].name, "Unit");
        assert_eq!(suite.test_count(), 4);
    }

    #[test]
    fn failure_message_falls_back_to_body() {
        let suite = parse(REPORT, &ConvertOptions::new()).unwrap();
        let case = &suite.suites[0].cases[1];

        assert_eq!(case.location.line, Some(20));
        assert_eq!(case.time, Some(0.002));
        let failure = &case.failures[0];
        assert_eq!(failure.kind, FailureKind::Failure);
        assert_eq!(failure.message, "Failed asserting that 2 is 3.");
        assert!(failure.details.as_deref().unwrap().ends_with("MathTest.php:22"));
    }

    #[test]
    fn reads_errors_warnings_and_skips() {
        let suite = parse(REPORT, &ConvertOptions::new()).unwrap();
        let boom = &suite.cases[0];

        assert_eq!(boom.failures.len(), 2);
        assert_eq!(boom.failures[0].kind, FailureKind::Error);
        assert_eq!(boom.failures[0].failure_type, "RuntimeException");
        assert_eq!(boom.failures[1].kind, FailureKind::Warning);
        assert_eq!(boom.failures[1].severity, Severity::Warning);
        assert_eq!(boom.failures[1].failure_type, "warning");

        let skipped = &suite.suites[0].cases[2];
        assert!(skipped.skipped.is_some());
        assert_eq!(skipped.stdout.as_deref(), Some("debug output"));
    }

    #[test]
    fn accepts_bare_testsuite_root() {
        let input = r#"<testsuite name="Only"><testcase name="a"/></testsuite>"#;
        let suite = parse(input, &ConvertOptions::new()).unwrap();
        assert_eq!(suite.name, "Only");
        assert_eq!(suite.test_count(), 1);
    }

    #[test]
    fn multiple_top_suites_get_a_root() {
        let input = r#"<testsuites name="All"><testsuite name="A"/><testsuite name="B"/></testsuites>"#;
        let suite = parse(input, &ConvertOptions::new()).unwrap();
        assert_eq!(suite.name, "All");
        assert_eq!(suite.suites.len(), 2);
    }

    #[test]
    fn testcase_name_is_required() {
        let input = r#"<testsuites><testsuite name="A"><testcase class="X"/></testsuite></testsuites>"#;
        let err = parse(input, &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { line: Some(1), .. }));
    }
}
