//! Map command - print the compatibility matrix as a Markdown table

use anyhow::{Context, Result};
use ci_report_converter::CompatibilityMatrix;

use crate::ui::Printer;

pub fn run(printer: &Printer) -> Result<i32> {
    let markdown = CompatibilityMatrix::new().to_markdown();
    printer.report(markdown.trim_end()).context("Unable to write to stdout")?;
    Ok(0)
}
