//! Aggregate outcome of a conversion

use std::collections::HashSet;

use serde::Serialize;

use crate::model::inspection::inspection_name;
use crate::model::Suite;

/// Counts computed in one pass over the parsed suite
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub test_count: usize,
    pub failure_count: usize,
    /// Distinct inspection types (rules) among the failures
    pub inspection_count: usize,
    pub metric_count: usize,
    pub had_failures: bool,
}

impl Summary {
    pub fn from_suite(suite: &Suite) -> Self {
        let mut summary = Self::default();
        let mut rules = HashSet::new();
        summary.visit(suite, &mut rules);
        summary.inspection_count = rules.len();
        summary.had_failures = summary.failure_count > 0;
        summary
    }

    fn visit(&mut self, suite: &Suite, rules: &mut HashSet<String>) {
        self.metric_count += suite.metrics.len();
        self.test_count += suite.cases.len();
        for case in &suite.cases {
            self.failure_count += case.failures.len();
            rules.extend(case.failures.iter().map(|f| inspection_name(case, f)));
        }
        for child in &suite.suites {
            self.visit(child, rules);
        }
    }

    /// Whether the caller should treat this run as failed
    pub fn is_failure(&self, non_zero_on_failure: bool) -> bool {
        non_zero_on_failure && self.had_failures
    }

    /// Process exit code for a successful conversion
    pub fn exit_code(&self, non_zero_on_failure: bool) -> i32 {
        i32::from(self.is_failure(non_zero_on_failure))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Failure, Metric, TestCase};

    #[test]
    fn counts_leaves_and_failures() {
        let suite = Suite::new("root")
            .with_suite(
                Suite::new("a")
                    .with_case(TestCase::new("1").with_class("R1").with_failure(Failure::failure("R1", "m")))
                    .with_case(TestCase::new("2").with_class("R1").with_failure(Failure::failure("R1", "m"))),
            )
            .with_case(TestCase::new("3"));

        let summary = Summary::from_suite(&suite);
        assert_eq!(summary.test_count, 3);
        assert_eq!(summary.failure_count, 2);
        assert_eq!(summary.inspection_count, 1);
        assert!(summary.had_failures);
        assert_eq!(summary.exit_code(true), 1);
        assert_eq!(summary.exit_code(false), 0);
    }

    #[test]
    fn metrics_only_suite_passes() {
        let suite = Suite::new("PHPloc").with_metric(Metric::new("loc", "LOC", 10.0));
        let summary = Summary::from_suite(&suite);
        assert_eq!(summary.metric_count, 1);
        assert!(!summary.had_failures);
        assert_eq!(summary.exit_code(true), 0);
    }
}
