//! ci-report-converter - Convert CI report artifacts between formats
//!
//! Reads reports produced by static-analysis tools and test runners
//! (CheckStyle, JUnit, PHPMD, Psalm, PHPLoc, PDepend) into one suite tree
//! and renders it for a CI surface (JUnit, CheckStyle, TeamCity service
//! messages, GitHub Actions annotations, GitLab Code Quality, plain text).
//!
//! # Modules
//!
//! - `model` - Suite/TestCase/Failure tree shared by every format
//! - `reader` - One parser per input format
//! - `reporter` - One renderer per output format
//! - `matrix` - Which (source, target) pairs are meaningful
//! - `converter` - Resolves formats and runs reader then writer
//!
//! # Example
//!
//! ```rust,ignore
//! use ci_report_converter::{convert, ConvertOptions};
//!
//! let options = ConvertOptions::new().with_suite_name("Lint").with_root_path("src");
//! let conversion = convert(checkstyle_xml.as_bytes(), "checkstyle", "junit", &options)?;
//!
//! println!("{}", conversion.output);
//! std::process::exit(conversion.exit_code(&options));
//! ```

pub mod converter;
pub mod errors;
pub mod format;
pub mod matrix;
pub mod model;
pub mod reader;
pub mod reporter;

// Re-export commonly used types
pub use converter::{convert, convert_file, convert_formats, stats, Conversion, ConvertOptions, Summary};
pub use errors::{ConvertError, Direction, Result};
pub use format::{Format, Reader, RenderOptions, Writer};
pub use matrix::{Compatibility, CompatibilityMatrix};
pub use model::Suite;
