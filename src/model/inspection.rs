//! Inspections - deduplicated problem types plus their instances
//!
//! Static-analysis consumers (TeamCity inspections) want every rule declared
//! once and then referenced by each occurrence. The report is derived from a
//! [`Suite`] rather than stored, so the suite stays the single source of truth.

use std::collections::HashSet;

use super::case::{Failure, Location, Severity, TestCase};
use super::suite::Suite;

/// Description attached to every declared inspection type
pub const DEFAULT_DESCRIPTION: &str = "Issues found while checking coding standards";

/// A deduplicated problem type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionType {
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
}

/// One occurrence of an inspection type
#[derive(Debug, Clone, PartialEq)]
pub struct InspectionInstance {
    pub type_id: String,
    pub message: String,
    pub location: Location,
    pub severity: Severity,
}

/// Inspection types in first-seen order plus every instance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionReport {
    pub types: Vec<InspectionType>,
    pub instances: Vec<InspectionInstance>,
}

impl InspectionReport {
    /// Build the report for `suite`, filing every type under `category`.
    ///
    /// Instances without a file are attributed to their case name.
    pub fn from_suite(suite: &Suite, category: &str) -> Self {
        let mut report = Self::default();
        let mut declared: HashSet<String> = HashSet::new();

        for case in suite.iter_cases() {
            for failure in &case.failures {
                let name = inspection_name(case, failure);
                let id = format!("{}:{}", category, name);

                if declared.insert(id.clone()) {
                    report.types.push(InspectionType {
                        id: id.clone(),
                        name,
                        category: category.to_string(),
                        description: DEFAULT_DESCRIPTION.to_string(),
                    });
                }

                let mut location = case.failure_location(failure);
                if location.file.is_none() {
                    location.file = Some(case.name.clone());
                }

                report.instances.push(InspectionInstance {
                    type_id: id,
                    message: failure.full_text(),
                    location,
                    severity: failure.severity,
                });
            }
        }

        report
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Instances referencing the given type id
    pub fn instances_of<'a>(&'a self, type_id: &'a str) -> impl Iterator<Item = &'a InspectionInstance> + 'a {
        self.instances.iter().filter(move |i| i.type_id == type_id)
    }
}

/// Rule name for a failure: the case class when present, else the failure type
pub(crate) fn inspection_name(case: &TestCase, failure: &Failure) -> String {
    case.class
        .as_deref()
        .filter(|c| !c.is_empty())
        .or(Some(failure.failure_type.as_str()).filter(|t| !t.is_empty()))
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case(class: &str, file: &str, line: u32) -> TestCase {
        TestCase::new(format!("{} line {}", file, line))
            .with_class(class)
            .with_location(Location::new(Some(file.to_string()), Some(line), None))
            .with_failure(Failure::warning(class, format!("{} violated", class)))
    }

    #[test]
    fn types_are_declared_once() {
        let suite = Suite::new("PHPmd")
            .with_suite(
                Suite::new("a.php")
                    .with_case(case("UnusedLocalVariable", "a.php", 1))
                    .with_case(case("UnusedLocalVariable", "a.php", 5)),
            )
            .with_suite(Suite::new("b.php").with_case(case("ElseExpression", "b.php", 9)));

        let report = InspectionReport::from_suite(&suite, "PHPmd");

        assert_eq!(report.types.len(), 2);
        assert_eq!(report.types[0].id, "PHPmd:UnusedLocalVariable");
        assert_eq!(report.types[0].category, "PHPmd");
        assert_eq!(report.types[0].description, DEFAULT_DESCRIPTION);
        assert_eq!(report.instances.len(), 3);
        assert_eq!(report.instances_of("PHPmd:UnusedLocalVariable").count(), 2);
        assert_eq!(report.instances[2].location.file.as_deref(), Some("b.php"));
    }

    #[test]
    fn falls_back_to_failure_type() {
        let suite = Suite::new("S").with_case(TestCase::new("t").with_failure(Failure::error("Boom", "m")));
        let report = InspectionReport::from_suite(&suite, "Cat");
        assert_eq!(report.types[0].id, "Cat:Boom");
        assert_eq!(report.types[0].name, "Boom");
        assert_eq!(report.instances[0].location.file.as_deref(), Some("t"));
    }

    #[test]
    fn passing_suite_has_no_inspections() {
        let suite = Suite::new("S").with_case(TestCase::new("ok"));
        let report = InspectionReport::from_suite(&suite, "S");
        assert!(report.is_empty());
        assert!(report.instances.is_empty());
    }
}
