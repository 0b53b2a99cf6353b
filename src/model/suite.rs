//! Suites - named groupings of test cases and nested suites

use serde::{Deserialize, Serialize};

use super::case::{FailureKind, TestCase};
use super::metric::Metric;

/// A named grouping of test cases and/or nested suites.
///
/// Counts are never stored: `test_count`, `failure_count` and friends walk
/// the tree every time, so they cannot drift from the children.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Suite {
    pub name: String,
    pub file: Option<String>,
    pub suites: Vec<Suite>,
    pub cases: Vec<TestCase>,
    /// Side-channel for metrics-only inputs
    pub metrics: Vec<Metric>,
}

impl Suite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_suite(mut self, suite: Suite) -> Self {
        self.suites.push(suite);
        self
    }

    pub fn with_case(mut self, case: TestCase) -> Self {
        self.cases.push(case);
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn push_suite(&mut self, suite: Suite) {
        self.suites.push(suite);
    }

    pub fn push_case(&mut self, case: TestCase) {
        self.cases.push(case);
    }

    /// Number of test case leaves in this subtree
    pub fn test_count(&self) -> usize {
        self.cases.len() + self.suites.iter().map(Suite::test_count).sum::<usize>()
    }

    /// Total number of failures of every kind in this subtree
    pub fn failure_count(&self) -> usize {
        self.fold_cases(|case| case.failures.len())
    }

    /// Number of failures of one kind in this subtree
    pub fn count_kind(&self, kind: FailureKind) -> usize {
        self.fold_cases(|case| case.count_kind(kind))
    }

    pub fn skipped_count(&self) -> usize {
        self.fold_cases(|case| usize::from(case.skipped.is_some()))
    }

    pub fn assertion_count(&self) -> usize {
        self.fold_cases(|case| case.assertions.unwrap_or(0) as usize)
    }

    /// Sum of case durations, `None` when no case carries one
    pub fn total_time(&self) -> Option<f64> {
        let mut any = false;
        let mut total = 0.0;
        for case in self.iter_cases() {
            if let Some(time) = case.time {
                any = true;
                total += time;
            }
        }
        any.then_some(total)
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty() && self.cases.is_empty()
    }

    /// Depth-first iterator over every case, own cases after nested suites
    pub fn iter_cases(&self) -> impl Iterator<Item = &TestCase> + '_ {
        let mut out: Vec<&TestCase> = Vec::new();
        self.collect_cases(&mut out);
        out.into_iter()
    }

    /// Depth-first iterator over this suite and every nested suite
    pub fn iter_suites(&self) -> impl Iterator<Item = &Suite> + '_ {
        let mut out: Vec<&Suite> = Vec::new();
        self.collect_suites(&mut out);
        out.into_iter()
    }

    fn collect_cases<'a>(&'a self, out: &mut Vec<&'a TestCase>) {
        for suite in &self.suites {
            suite.collect_cases(out);
        }
        out.extend(self.cases.iter());
    }

    fn collect_suites<'a>(&'a self, out: &mut Vec<&'a Suite>) {
        out.push(self);
        for suite in &self.suites {
            suite.collect_suites(out);
        }
    }

    fn fold_cases(&self, per_case: impl Fn(&TestCase) -> usize + Copy) -> usize {
        self.cases.iter().map(per_case).sum::<usize>()
            + self
                .suites
                .iter()
                .map(|suite| suite.fold_cases(per_case))
                .sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Failure;

    fn sample() -> Suite {
        Suite::new("root")
            .with_suite(
                Suite::new("a.php")
                    .with_case(TestCase::new("one").with_failure(Failure::failure("E", "x")))
                    .with_case(
                        TestCase::new("two")
                            .with_failure(Failure::error("E", "y"))
                            .with_failure(Failure::warning("W", "z")),
                    ),
            )
            .with_suite(Suite::new("empty"))
            .with_case(TestCase::new("three").with_time(0.5).with_assertions(3))
            .with_case(TestCase::new("four").with_skipped(None).with_time(0.25))
    }

    #[test]
    fn counts_are_recursive() {
        let suite = sample();
        assert_eq!(suite.test_count(), 4);
        assert_eq!(suite.failure_count(), 3);
        assert_eq!(suite.count_kind(FailureKind::Failure), 1);
        assert_eq!(suite.count_kind(FailureKind::Error), 1);
        assert_eq!(suite.count_kind(FailureKind::Warning), 1);
        assert_eq!(suite.skipped_count(), 1);
        assert_eq!(suite.assertion_count(), 3);
        assert_eq!(suite.total_time(), Some(0.75));
        assert_eq!(suite.suites[0].test_count(), 2);
        assert_eq!(suite.suites[1].test_count(), 0);
    }

    #[test]
    fn counts_follow_mutation() {
        let mut suite = sample();
        suite.suites[1].push_case(TestCase::new("late").with_failure(Failure::failure("E", "m")));
        assert_eq!(suite.test_count(), 5);
        assert_eq!(suite.failure_count(), 4);
    }

    #[test]
    fn iterators_visit_everything() {
        let suite = sample();
        let names: Vec<_> = suite.iter_cases().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three", "four"]);

        let suites: Vec<_> = suite.iter_suites().map(|s| s.name.as_str()).collect();
        assert_eq!(suites, vec!["root", "a.php", "empty"]);
    }

    #[test]
    fn total_time_absent_without_durations() {
        let suite = Suite::new("s").with_case(TestCase::new("t"));
        assert_eq!(suite.total_time(), None);
        assert!(!suite.is_empty());
        assert!(Suite::new("e").is_empty());
    }
}
