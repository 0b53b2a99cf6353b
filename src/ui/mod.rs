//! User interface components for the ci-report-converter CLI
//!
//! **OutputMode** detects whether we run in an interactive terminal, in CI
//! or piped; **Printer** writes reports and status lines accordingly.

pub mod output;

pub use output::Printer;
