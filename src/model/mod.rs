//! Report Model - Canonical intermediate representation
//!
//! Every reader produces a [`Suite`] tree and every writer consumes one.
//! The tree only holds parent-to-child containment, aggregate counts are
//! always computed from the children on demand.

pub mod case;
pub mod inspection;
pub mod metric;
pub mod suite;

pub use case::{Failure, FailureKind, Location, Severity, Skipped, TestCase};
pub use inspection::{InspectionInstance, InspectionReport, InspectionType};
pub use metric::Metric;
pub use suite::Suite;
