//! Output abstraction layer for consistent CLI output
//!
//! Reports go to stdout untouched; status lines are colored only on an
//! interactive terminal. Errors always go to stderr.

use std::io::{self, IsTerminal, Write};

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Interactive terminal with colors
    Interactive,
    /// CI environment - plain text, no colors
    CI,
    /// Piped output - plain text, no colors
    Plain,
}

impl OutputMode {
    /// Detect the appropriate output mode based on environment
    pub fn detect() -> Self {
        if is_ci::cached() {
            return OutputMode::CI;
        }

        if io::stdout().is_terminal() {
            OutputMode::Interactive
        } else {
            OutputMode::Plain
        }
    }

    /// Whether colors should be used
    pub fn colors_enabled(&self) -> bool {
        matches!(self, OutputMode::Interactive)
    }
}

impl Default for OutputMode {
    fn default() -> Self {
        Self::detect()
    }
}

/// Centralized printer that respects output mode
#[derive(Debug, Clone)]
pub struct Printer {
    mode: OutputMode,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    /// Create a new printer with auto-detected mode
    pub fn new() -> Self {
        Self::with_mode(OutputMode::detect())
    }

    /// Create a printer with a specific mode
    pub fn with_mode(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Print a rendered report followed by a newline
    pub fn report(&self, content: &str) -> io::Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", content)?;
        stdout.flush()
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        use colored::Colorize;
        if self.mode.colors_enabled() {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        use colored::Colorize;
        if self.mode.colors_enabled() {
            println!("{}", message.yellow());
        } else {
            println!("{}", message);
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_line(message));
    }

    /// Print a hint line to stderr
    pub fn hint(&self, message: &str) {
        use colored::Colorize;
        if self.mode.colors_enabled() {
            eprintln!("{}", message.dimmed());
        } else {
            eprintln!("{}", message);
        }
    }

    fn error_line(&self, message: &str) -> String {
        use colored::Colorize;
        let line = format!("Error: {}", message);
        if self.mode.colors_enabled() {
            line.red().to_string()
        } else {
            line
        }
    }
}
