//! Convert command - one report from one format into another

use anyhow::Result;
use ci_report_converter::convert;
use tracing::debug;

use super::{read_input, write_output};
use crate::cli::config::ConvertCommandConfig;
use crate::ui::Printer;

/// Run a conversion and return the process exit code
pub fn run(config: ConvertCommandConfig, printer: &Printer) -> Result<i32> {
    debug!(
        from = %config.input_format,
        to = %config.output_format,
        "Starting conversion"
    );

    let input = read_input(config.input_file.as_deref())?;
    let options = config.convert_options();
    let conversion = convert(&input, &config.input_format, &config.output_format, &options)?;

    write_output(&conversion, config.output_file.as_deref(), printer)?;
    Ok(conversion.exit_code(&options))
}
