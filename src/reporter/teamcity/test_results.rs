//! TeamCity test reporting: suites, tests, failures and durations

use super::message::{Emitter, ServiceMessage};
use crate::errors::Result;
use crate::format::{Format, RenderOptions, Writer};
use crate::model::{Suite, TestCase};

pub struct TeamCityTestsWriter;

impl Writer for TeamCityTestsWriter {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String> {
        let mut emitter = Emitter::new(Format::TeamCityTests.name(), options.flow_id.clone());
        emitter.emit(ServiceMessage::new("testCount").attr("count", suite.test_count().to_string()))?;
        write_suite(&mut emitter, suite, options.group_name(suite))?;
        emitter.finish()
    }
}

fn write_suite(emitter: &mut Emitter, suite: &Suite, name: &str) -> Result<()> {
    emitter.open_suite(name, suite_location_hint(suite))?;
    for child in &suite.suites {
        write_suite(emitter, child, &child.name)?;
    }
    for case in &suite.cases {
        write_case(emitter, case)?;
    }
    emitter.close_suite()
}

fn write_case(emitter: &mut Emitter, case: &TestCase) -> Result<()> {
    emitter.emit(
        ServiceMessage::new("testStarted")
            .attr("name", case.name.as_str())
            .attr_opt("locationHint", case_location_hint(case)),
    )?;

    for failure in &case.failures {
        emitter.emit(
            ServiceMessage::new("testFailed")
                .attr("name", case.name.as_str())
                .attr("message", failure.message.as_str())
                .attr("details", failure.details.as_deref().unwrap_or_default()),
        )?;
    }

    if let Some(skipped) = &case.skipped {
        emitter.emit(
            ServiceMessage::new("testIgnored")
                .attr("name", case.name.as_str())
                .attr("message", skipped.message.as_deref().unwrap_or_default()),
        )?;
    }

    if let Some(stdout) = &case.stdout {
        emitter.emit(
            ServiceMessage::new("testStdOut")
                .attr("name", case.name.as_str())
                .attr("out", stdout.as_str()),
        )?;
    }

    let duration = case.time.map(|seconds| ((seconds * 1000.0).round() as u64).to_string());
    emitter.emit(
        ServiceMessage::new("testFinished")
            .attr("name", case.name.as_str())
            .attr_opt("duration", duration),
    )
}

fn suite_location_hint(suite: &Suite) -> Option<String> {
    let file = suite.file.as_deref()?;
    if suite.name == file {
        Some(format!("php_qn://{}", file))
    } else {
        Some(format!("php_qn://{}::\\{}", file, suite.name))
    }
}

fn case_location_hint(case: &TestCase) -> Option<String> {
    let file = case.location.file.as_deref()?;
    match case.class.as_deref() {
        Some(class) if !class.is_empty() => Some(format!("php_qn://{}::\\{}::{}", file, class, case.name)),
        _ => Some(format!("php_qn://{}", file)),
    }
}
