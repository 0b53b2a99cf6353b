//! Command implementations plus the file/stdin/stdout plumbing they share

pub mod convert;
pub mod map;
pub mod stats;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use ci_report_converter::{Conversion, ConvertError};
use tracing::debug;

use crate::ui::Printer;

/// Read the whole input from a file, or from stdin when no path is given
pub fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "Reading input file");
            std::fs::read(path).map_err(|e| ConvertError::from_io(path.display().to_string(), &e).into())
        }
        None => {
            debug!("Reading input from stdin");
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Unable to read from stdin")?;
            Ok(buffer)
        }
    }
}

/// Save the output to a file and report where it went, or print it to stdout
pub fn write_output(conversion: &Conversion, path: Option<&Path>, printer: &Printer) -> Result<()> {
    let Some(path) = path else {
        printer.report(&conversion.output).context("Unable to write to stdout")?;
        return Ok(());
    };

    save(path, &conversion.output)?;
    printer.success(&format!("Result is saved: {}", path.display()));
    if conversion.summary.failure_count > 0 {
        printer.warning(&format!("Found failures: {}", conversion.summary.failure_count));
    }
    Ok(())
}

fn save(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Unable to create directory {}", parent.display()))?;
    }
    std::fs::write(path, content).with_context(|| format!("Unable to write {}", path.display()))
}
