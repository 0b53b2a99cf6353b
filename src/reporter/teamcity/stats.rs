//! TeamCity build statistics (`buildStatisticValue`)
//!
//! Metrics carried by the suite are reported as-is. A suite without metrics
//! (JUnit input) reports its derived test counters instead.

use super::message::{Emitter, ServiceMessage};
use crate::errors::Result;
use crate::format::{Format, RenderOptions, Writer};
use crate::model::metric::format_number;
use crate::model::{FailureKind, Suite};

pub struct TeamCityStatsWriter;

impl Writer for TeamCityStatsWriter {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String> {
        let prefix = options.group_name(suite);
        let mut emitter = Emitter::new(Format::TeamCityStats.name(), options.flow_id.clone());

        for (title, value) in statistics(suite) {
            emitter.emit(
                ServiceMessage::new("buildStatisticValue")
                    .attr("key", format!("{}: {}", prefix, title))
                    .attr("value", value),
            )?;
        }

        emitter.finish()
    }
}

/// `(title, formatted value)` pairs for every reported statistic
fn statistics(suite: &Suite) -> Vec<(String, String)> {
    let metrics: Vec<_> = suite.iter_suites().flat_map(|s| s.metrics.iter()).collect();
    if !metrics.is_empty() {
        return metrics
            .into_iter()
            .map(|m| (m.title.clone(), m.formatted_value()))
            .collect();
    }

    let mut stats = vec![
        ("Tests".to_string(), suite.test_count().to_string()),
        ("Failures".to_string(), suite.count_kind(FailureKind::Failure).to_string()),
        ("Errors".to_string(), suite.count_kind(FailureKind::Error).to_string()),
        ("Warnings".to_string(), suite.count_kind(FailureKind::Warning).to_string()),
        ("Skipped".to_string(), suite.skipped_count().to_string()),
        ("Assertions".to_string(), suite.assertion_count().to_string()),
    ];
    if let Some(time) = suite.total_time() {
        stats.push(("Time".to_string(), format_number(time)));
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Failure, Metric, TestCase};

    #[test]
    fn reports_metrics() {
        let suite = Suite::new("PHPloc")
            .with_metric(Metric::new("loc", "Lines of Code (LOC)", 1024.0))
            .with_metric(Metric::new("ccnByLloc", "Average Complexity per LLOC", 0.25));

        let out = TeamCityStatsWriter.render(&suite, &RenderOptions::new("10000")).unwrap();
        assert_eq!(
            out,
            "##teamcity[buildStatisticValue key='PHPloc: Lines of Code (LOC)' value='1024' flowId='10000']\n\
             ##teamcity[buildStatisticValue key='PHPloc: Average Complexity per LLOC' value='0.25' flowId='10000']\n"
        );
    }

    #[test]
    fn suite_name_prefixes_keys() {
        let suite = Suite::new("PHPloc").with_metric(Metric::new("files", "Files", 3.0));
        let options = RenderOptions::new("1").with_suite_name(Some("Stats".into()));
        let out = TeamCityStatsWriter.render(&suite, &options).unwrap();
        assert!(out.contains("key='Stats: Files' value='3'"));
    }

    #[test]
    fn derives_test_statistics_without_metrics() {
        let suite = Suite::new("JUnit")
            .with_case(TestCase::new("a").with_time(0.25).with_assertions(3))
            .with_case(TestCase::new("b").with_time(0.5).with_failure(Failure::failure("F", "m")))
            .with_case(TestCase::new("c").with_skipped(None));

        let out = TeamCityStatsWriter.render(&suite, &RenderOptions::new("1")).unwrap();
        assert!(out.contains("key='JUnit: Tests' value='3'"));
        assert!(out.contains("key='JUnit: Failures' value='1'"));
        assert!(out.contains("key='JUnit: Errors' value='0'"));
        assert!(out.contains("key='JUnit: Skipped' value='1'"));
        assert!(out.contains("key='JUnit: Assertions' value='3'"));
        assert!(out.contains("key='JUnit: Time' value='0.75'"));
        assert_eq!(out.lines().count(), 7);
    }
}
