//! ci-report-converter - Convert CI report artifacts between formats
//!
//! Thin command-line front end over the library: argument parsing, file and
//! stdin/stdout plumbing, logging setup and exit codes.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use miette::Diagnostic;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod ui;

use ci_report_converter::ConvertError;
use cli::commands;
use cli::config::{parse_flag, ConvertCommandConfig};
use ui::Printer;

/// Convert CI reports between formats
#[derive(Parser)]
#[command(
    name = "ci-report-converter",
    version,
    about = "Convert CI report artifacts between formats",
    long_about = "Reads reports from static-analysis tools and test runners and renders them \
                  for a CI surface.\n\n\
                  Inputs: CheckStyle, JUnit, PHPMD, Psalm, PHPLoc, PDepend\n\
                  Outputs: JUnit, CheckStyle, TeamCity, GitHub Actions, GitLab, plain text"
)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a report from one format into another
    #[command(name = "convert")]
    Convert {
        /// Source format
        #[arg(short = 'S', long, default_value = "checkstyle")]
        input_format: String,

        /// Target format
        #[arg(short = 'T', long, default_value = "tc-tests")]
        output_format: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Print the format compatibility matrix as a Markdown table
    #[command(name = "convert:map")]
    Map,

    /// Push metrics from a report into TeamCity build statistics
    #[command(name = "teamcity:stats")]
    TeamCityStats {
        /// Source format (phploc-json, pdepend-xml, junit)
        #[arg(short = 'S', long)]
        input_format: String,

        #[command(flatten)]
        report: ReportArgs,
    },
}

/// Options shared by every command that converts a report
#[derive(Args)]
struct ReportArgs {
    /// Input file (reads stdin when omitted)
    #[arg(short = 'I', long)]
    input_file: Option<PathBuf>,

    /// Output file (writes stdout when omitted)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Root suite name
    #[arg(short = 'N', long)]
    suite_name: Option<String>,

    /// Prefix stripped from every file path in the report
    #[arg(short = 'R', long)]
    root_path: Option<String>,

    /// Flow id for TeamCity service messages
    #[arg(short = 'F', long = "tc-flow-id")]
    flow_id: Option<String>,

    /// Exit with code 1 when the report contains failures
    #[arg(
        short = 'Q',
        long,
        value_parser = parse_flag,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_value = "no",
        default_missing_value = "yes"
    )]
    non_zero_code: bool,
}

impl ReportArgs {
    fn into_config(self, input_format: String, output_format: &str) -> ConvertCommandConfig {
        ConvertCommandConfig::new(input_format, output_format)
            .with_input_file(self.input_file)
            .with_output_file(self.output_file)
            .with_suite_name(self.suite_name)
            .with_root_path(self.root_path)
            .with_flow_id(self.flow_id)
            .with_non_zero_code(self.non_zero_code)
    }
}

fn init_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("ci_report_converter=warn"),
            1 => EnvFilter::new("ci_report_converter=info"),
            2 => EnvFilter::new("ci_report_converter=debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run(command: Commands, printer: &Printer) -> anyhow::Result<i32> {
    match command {
        Commands::Convert {
            input_format,
            output_format,
            report,
        } => commands::convert::run(report.into_config(input_format, &output_format), printer),
        Commands::Map => commands::map::run(printer),
        Commands::TeamCityStats {
            input_format,
            report,
        } => commands::stats::run(report.into_config(input_format, "tc-stats"), printer),
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let printer = Printer::new();
    let code = match run(cli.command, &printer) {
        Ok(code) => code,
        Err(err) => {
            printer.error(&err.to_string());
            if let Some(help) = err.downcast_ref::<ConvertError>().and_then(|e| e.help()) {
                printer.hint(&help.to_string());
            }
            1
        }
    };

    std::process::exit(code);
}
