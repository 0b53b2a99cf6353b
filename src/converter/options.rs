//! Conversion options supplied by the caller

use crate::format::Format;

/// Options consumed by readers, writers and the converter itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Root suite name; each source format has its own fallback
    pub suite_name: Option<String>,
    /// Prefix stripped from every file path
    pub root_path: Option<String>,
    /// TeamCity flow id; derived from the input when absent
    pub flow_id: Option<String>,
    /// Whether failures found in the report should fail the caller
    pub non_zero_on_failure: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suite_name(mut self, name: impl Into<String>) -> Self {
        self.suite_name = Some(name.into());
        self
    }

    pub fn with_root_path(mut self, path: impl Into<String>) -> Self {
        self.root_path = Some(path.into());
        self
    }

    pub fn with_flow_id(mut self, flow_id: impl Into<String>) -> Self {
        self.flow_id = Some(flow_id.into());
        self
    }

    pub fn with_non_zero_on_failure(mut self, enabled: bool) -> Self {
        self.non_zero_on_failure = enabled;
        self
    }

    /// Explicit suite name, ignoring blanks
    pub fn suite_name(&self) -> Option<&str> {
        self.suite_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }

    pub fn root_path(&self) -> Option<&str> {
        self.root_path
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    pub fn flow_id(&self) -> Option<&str> {
        self.flow_id.as_deref().map(str::trim).filter(|f| !f.is_empty())
    }

    /// Suite name option, or the source format's default root name
    pub fn root_suite_name(&self, source: Format) -> String {
        self.suite_name()
            .unwrap_or(source.default_suite_name())
            .to_string()
    }
}
