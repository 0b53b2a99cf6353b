//! CLI Configuration Structs
//!
//! Builder-style configuration handed from argument parsing to the command
//! handlers, so handlers do not take one parameter per flag.

use std::path::PathBuf;

use ci_report_converter::ConvertOptions;

/// Configuration for `convert` and `teamcity:stats`
#[derive(Debug, Clone)]
pub struct ConvertCommandConfig {
    /// Source format name
    pub input_format: String,
    /// Target format name
    pub output_format: String,
    /// Read from stdin when absent
    pub input_file: Option<PathBuf>,
    /// Write to stdout when absent
    pub output_file: Option<PathBuf>,
    pub suite_name: Option<String>,
    pub root_path: Option<String>,
    pub flow_id: Option<String>,
    /// Exit with code 1 when the report has failures
    pub non_zero_code: bool,
}

impl ConvertCommandConfig {
    pub fn new(input_format: impl Into<String>, output_format: impl Into<String>) -> Self {
        Self {
            input_format: input_format.into(),
            output_format: output_format.into(),
            input_file: None,
            output_file: None,
            suite_name: None,
            root_path: None,
            flow_id: None,
            non_zero_code: false,
        }
    }

    pub fn with_input_file(mut self, path: Option<PathBuf>) -> Self {
        self.input_file = path;
        self
    }

    pub fn with_output_file(mut self, path: Option<PathBuf>) -> Self {
        self.output_file = path;
        self
    }

    pub fn with_suite_name(mut self, name: Option<String>) -> Self {
        self.suite_name = name;
        self
    }

    pub fn with_root_path(mut self, path: Option<String>) -> Self {
        self.root_path = path;
        self
    }

    pub fn with_flow_id(mut self, flow_id: Option<String>) -> Self {
        self.flow_id = flow_id;
        self
    }

    pub fn with_non_zero_code(mut self, enabled: bool) -> Self {
        self.non_zero_code = enabled;
        self
    }

    /// Library options for this invocation
    pub fn convert_options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new().with_non_zero_on_failure(self.non_zero_code);
        if let Some(name) = &self.suite_name {
            options = options.with_suite_name(name.as_str());
        }
        if let Some(path) = &self.root_path {
            options = options.with_root_path(path.as_str());
        }
        if let Some(flow_id) = &self.flow_id {
            options = options.with_flow_id(flow_id.as_str());
        }
        options
    }
}

/// Parse the `--non-zero-code` value; accepts the usual yes/no spellings
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "y" | "yes" | "true" | "on" | "1" => Ok(true),
        "n" | "no" | "false" | "off" | "0" => Ok(false),
        other => Err(format!("expected yes or no, got '{}'", other)),
    }
}
