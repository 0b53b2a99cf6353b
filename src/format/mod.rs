//! Format registry
//!
//! Every supported format is one [`Format`] variant. Reader and writer
//! implementations are looked up by matching on the variant, so adding a
//! format means adding a variant plus its arms here and in the matrix.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::converter::ConvertOptions;
use crate::errors::{ConvertError, Result};
use crate::model::Suite;
use crate::reader;
use crate::reporter;

/// Parses raw input into a suite tree
pub trait Reader {
    /// Either returns a complete tree or fails; never a partial result.
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite>;
}

/// Renders a suite tree into output text
pub trait Writer {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String>;
}

/// Values resolved by the converter before rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Flow id shared by every TeamCity service message of one run
    pub flow_id: String,
    /// Caller-supplied suite name, when given
    pub suite_name: Option<String>,
}

impl RenderOptions {
    pub fn new(flow_id: impl Into<String>) -> Self {
        Self {
            flow_id: flow_id.into(),
            suite_name: None,
        }
    }

    pub fn with_suite_name(mut self, name: Option<String>) -> Self {
        self.suite_name = name;
        self
    }

    /// Suite name option, or the root suite's own name
    pub fn group_name<'a>(&'a self, suite: &'a Suite) -> &'a str {
        self.suite_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(suite.name.as_str())
    }
}

/// Every format known to the converter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Format {
    CheckStyle,
    JUnit,
    PhpMdJson,
    PsalmJson,
    PhpLocJson,
    PDependXml,
    TeamCityTests,
    TeamCityInspections,
    TeamCityStats,
    GithubCli,
    GitLabJson,
    PlainText,
}

impl Format {
    pub const ALL: [Format; 12] = [
        Format::CheckStyle,
        Format::JUnit,
        Format::PhpMdJson,
        Format::PsalmJson,
        Format::PhpLocJson,
        Format::PDependXml,
        Format::TeamCityTests,
        Format::TeamCityInspections,
        Format::TeamCityStats,
        Format::GithubCli,
        Format::GitLabJson,
        Format::PlainText,
    ];

    /// Registry name used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Format::CheckStyle => "checkstyle",
            Format::JUnit => "junit",
            Format::PhpMdJson => "phpmd-json",
            Format::PsalmJson => "psalm-json",
            Format::PhpLocJson => "phploc-json",
            Format::PDependXml => "pdepend-xml",
            Format::TeamCityTests => "tc-tests",
            Format::TeamCityInspections => "tc-inspections",
            Format::TeamCityStats => "tc-stats",
            Format::GithubCli => "github-cli",
            Format::GitLabJson => "gitlab-json",
            Format::PlainText => "plain",
        }
    }

    /// Human readable title used in documentation tables
    pub fn title(&self) -> &'static str {
        match self {
            Format::CheckStyle => "CheckStyle.xml",
            Format::JUnit => "JUnit.xml",
            Format::PhpMdJson => "PHPmd.json",
            Format::PsalmJson => "Psalm.json",
            Format::PhpLocJson => "PHPloc.json",
            Format::PDependXml => "PDepend.xml",
            Format::TeamCityTests => "TeamCity - Tests",
            Format::TeamCityInspections => "TeamCity - Inspections",
            Format::TeamCityStats => "TeamCity - Statistics",
            Format::GithubCli => "GitHub Actions - Annotations",
            Format::GitLabJson => "GitLab - Code Quality JSON",
            Format::PlainText => "Plain Text",
        }
    }

    /// Root suite name used when the caller gives none
    pub fn default_suite_name(&self) -> &'static str {
        match self {
            Format::CheckStyle => "CheckStyle",
            Format::JUnit => "JUnit",
            Format::PhpMdJson => "PHPmd",
            Format::PsalmJson => "Psalm",
            Format::PhpLocJson => "PHPloc",
            Format::PDependXml => "PDepend",
            _ => "root",
        }
    }

    /// Whether the format only carries metrics (no tests or failures)
    pub fn is_metrics_only(&self) -> bool {
        matches!(self, Format::PhpLocJson | Format::PDependXml)
    }

    pub fn can_read(&self) -> bool {
        self.reader().is_some()
    }

    pub fn can_write(&self) -> bool {
        self.writer().is_some()
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Format::name).collect()
    }

    pub fn readable() -> impl Iterator<Item = Format> {
        Self::ALL.into_iter().filter(Format::can_read)
    }

    pub fn writable() -> impl Iterator<Item = Format> {
        Self::ALL.into_iter().filter(Format::can_write)
    }

    /// Reader implementation, `None` for write-only formats
    pub fn reader(&self) -> Option<Box<dyn Reader>> {
        match self {
            Format::CheckStyle => Some(Box::new(reader::checkstyle::CheckStyleReader)),
            Format::JUnit => Some(Box::new(reader::junit::JUnitReader)),
            Format::PhpMdJson => Some(Box::new(reader::phpmd::PhpMdReader)),
            Format::PsalmJson => Some(Box::new(reader::psalm::PsalmReader)),
            Format::PhpLocJson => Some(Box::new(reader::phploc::PhpLocReader)),
            Format::PDependXml => Some(Box::new(reader::pdepend::PDependReader)),
            Format::TeamCityTests
            | Format::TeamCityInspections
            | Format::TeamCityStats
            | Format::GithubCli
            | Format::GitLabJson
            | Format::PlainText => None,
        }
    }

    /// Writer implementation, `None` for read-only formats
    pub fn writer(&self) -> Option<Box<dyn Writer>> {
        match self {
            Format::CheckStyle => Some(Box::new(reporter::checkstyle::CheckStyleWriter)),
            Format::JUnit => Some(Box::new(reporter::junit::JUnitWriter)),
            Format::TeamCityTests => Some(Box::new(reporter::teamcity::TeamCityTestsWriter)),
            Format::TeamCityInspections => {
                Some(Box::new(reporter::teamcity::TeamCityInspectionsWriter))
            }
            Format::TeamCityStats => Some(Box::new(reporter::teamcity::TeamCityStatsWriter)),
            Format::GithubCli => Some(Box::new(reporter::github::GithubCliWriter)),
            Format::GitLabJson => Some(Box::new(reporter::gitlab::GitLabWriter)),
            Format::PlainText => Some(Box::new(reporter::plain::PlainTextWriter)),
            Format::PhpMdJson
            | Format::PsalmJson
            | Format::PhpLocJson
            | Format::PDependXml => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Format {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.name() == wanted)
            .ok_or_else(|| ConvertError::unknown_format(s, &Self::names()))
    }
}
