//! TeamCity Reporters - service messages for tests, inspections and statistics

pub mod inspections;
pub mod message;
pub mod stats;
pub mod test_results;

pub use inspections::TeamCityInspectionsWriter;
pub use message::{escape, unescape, Emitter, ServiceMessage, StreamState};
pub use stats::TeamCityStatsWriter;
pub use test_results::TeamCityTestsWriter;
