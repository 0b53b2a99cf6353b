//! Converter - resolves formats, runs reader then writer, reports a summary
//!
//! A conversion is pure: it owns its suite tree from parse to render and
//! performs no I/O apart from the explicit [`convert_file`] helper. Either
//! the whole output is produced or an error is returned.

pub mod options;
pub mod summary;

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::errors::{ConvertError, Direction, Result};
use crate::format::{Format, RenderOptions};
use crate::matrix::{Compatibility, CompatibilityMatrix};
use crate::reader;

pub use options::ConvertOptions;
pub use summary::Summary;

/// Rendered output plus the counts gathered from the parsed report
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub output: String,
    pub summary: Summary,
    /// Flow id used for TeamCity service messages
    pub flow_id: String,
}

impl Conversion {
    /// Process exit code the caller should use for this successful run
    pub fn exit_code(&self, options: &ConvertOptions) -> i32 {
        self.summary.exit_code(options.non_zero_on_failure)
    }
}

/// Convert `input` from the `source` format into the `target` format.
///
/// Format names are resolved through the registry; the pair is checked
/// against the compatibility matrix before any parsing happens.
pub fn convert(input: &[u8], source: &str, target: &str, options: &ConvertOptions) -> Result<Conversion> {
    let source = source.parse::<Format>()?;
    let target = target.parse::<Format>()?;
    convert_formats(input, source, target, options)
}

/// Same as [`convert`] with already-resolved formats
pub fn convert_formats(
    input: &[u8],
    source: Format,
    target: Format,
    options: &ConvertOptions,
) -> Result<Conversion> {
    ensure_supported(source, target)?;

    let reader = source.reader().ok_or_else(|| ConvertError::UnsupportedDirection {
        format: source.name().to_string(),
        direction: Direction::Read,
    })?;
    let writer = target.writer().ok_or_else(|| ConvertError::UnsupportedDirection {
        format: target.name().to_string(),
        direction: Direction::Write,
    })?;

    let text = reader::decode(source, input)?;
    debug!(source = %source, bytes = input.len(), "Parsing input");
    let suite = reader.parse(text, options)?;

    let flow_id = options
        .flow_id()
        .map(str::to_string)
        .unwrap_or_else(|| default_flow_id(source, target, input));

    let render_options = RenderOptions::new(flow_id.clone())
        .with_suite_name(options.suite_name().map(str::to_string));

    debug!(target = %target, flow_id = %flow_id, "Rendering output");
    let output = writer.render(&suite, &render_options)?;
    let summary = Summary::from_suite(&suite);

    info!(
        "Converted {} to {}: {} tests, {} failures",
        source, target, summary.test_count, summary.failure_count
    );

    Ok(Conversion {
        output,
        summary,
        flow_id,
    })
}

/// Read `path` and convert it; a missing file becomes [`ConvertError::FileNotFound`]
pub fn convert_file(
    path: impl AsRef<Path>,
    source: &str,
    target: &str,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let path = path.as_ref();
    let input = std::fs::read(path).map_err(|e| ConvertError::from_io(path.display().to_string(), &e))?;
    convert(&input, source, target, options)
}

/// Shortcut for converting metrics into TeamCity build statistics
pub fn stats(input: &[u8], source: &str, options: &ConvertOptions) -> Result<Conversion> {
    convert(input, source, Format::TeamCityStats.name(), options)
}

/// Fail fast when the matrix does not allow the pair
fn ensure_supported(source: Format, target: Format) -> Result<()> {
    match CompatibilityMatrix::new().get(source, target).compatibility {
        Compatibility::Supported => Ok(()),
        Compatibility::WriteOnly => Err(ConvertError::UnsupportedDirection {
            format: source.name().to_string(),
            direction: Direction::Read,
        }),
        Compatibility::ReadOnly => Err(ConvertError::UnsupportedDirection {
            format: target.name().to_string(),
            direction: Direction::Write,
        }),
        Compatibility::Unsupported => Err(ConvertError::UnsupportedConversion {
            from: source.name().to_string(),
            to: target.name().to_string(),
        }),
    }
}

/// Stable flow id derived from the formats and the input bytes.
///
/// Identical input always maps to the same id, so repeated runs produce
/// byte-identical output.
pub fn default_flow_id(source: Format, target: Format, input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.name().as_bytes());
    hasher.update(b"|");
    hasher.update(target.name().as_bytes());
    hasher.update(b"|");
    hasher.update(input);

    let digest = hasher.finalize();
    let value = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    value.to_string()
}
