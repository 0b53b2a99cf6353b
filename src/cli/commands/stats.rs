//! TeamCity stats command - metrics reports as `buildStatisticValue` messages

use anyhow::Result;
use ci_report_converter::stats;

use super::{read_input, write_output};
use crate::cli::config::ConvertCommandConfig;
use crate::ui::Printer;

/// The output format of `config` is ignored; statistics are always rendered
pub fn run(config: ConvertCommandConfig, printer: &Printer) -> Result<i32> {
    let input = read_input(config.input_file.as_deref())?;
    let options = config.convert_options();
    let conversion = stats(&input, &config.input_format, &options)?;

    write_output(&conversion, config.output_file.as_deref(), printer)?;
    Ok(conversion.exit_code(&options))
}
