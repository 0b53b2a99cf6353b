//! Compatibility Matrix
//!
//! Declares, for every ordered (source, target) pair of registered formats,
//! whether the conversion is meaningful. The converter consults it before
//! touching any reader or writer, and `convert:map` renders it as Markdown.

use serde::Serialize;

use crate::format::Format;

/// Status of one (source, target) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compatibility {
    Supported,
    Unsupported,
    /// The target can only be read
    ReadOnly,
    /// The source can only be written
    WriteOnly,
}

impl Compatibility {
    pub fn is_supported(&self) -> bool {
        matches!(self, Compatibility::Supported)
    }
}

/// One declared matrix cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixEntry {
    pub source: Format,
    pub target: Format,
    pub compatibility: Compatibility,
    pub description: String,
}

/// Static table over the full format set
#[derive(Debug, Clone)]
pub struct CompatibilityMatrix {
    entries: Vec<MatrixEntry>,
}

impl Default for CompatibilityMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl CompatibilityMatrix {
    pub fn new() -> Self {
        let mut entries = Vec::with_capacity(Format::ALL.len() * Format::ALL.len());
        for source in Format::ALL {
            for target in Format::ALL {
                entries.push(Self::declare(source, target));
            }
        }
        Self { entries }
    }

    fn declare(source: Format, target: Format) -> MatrixEntry {
        let (compatibility, description) = if !source.can_read() {
            (
                Compatibility::WriteOnly,
                format!("{} is an output-only format", source.title()),
            )
        } else if !target.can_write() {
            (
                Compatibility::ReadOnly,
                format!("{} is an input-only format", target.title()),
            )
        } else if pair_supported(source, target) {
            (Compatibility::Supported, describe(source, target))
        } else {
            (
                Compatibility::Unsupported,
                format!("{} has nothing {} can display", source.title(), target.title()),
            )
        };

        MatrixEntry {
            source,
            target,
            compatibility,
            description,
        }
    }

    /// Every declared entry, source-major in registry order
    pub fn entries(&self) -> &[MatrixEntry] {
        &self.entries
    }

    /// Entry for a pair; every pair of registered formats is declared
    pub fn get(&self, source: Format, target: Format) -> &MatrixEntry {
        let width = Format::ALL.len();
        let index = Self::position(source) * width + Self::position(target);
        &self.entries[index]
    }

    pub fn is_supported(&self, source: Format, target: Format) -> bool {
        self.get(source, target).compatibility.is_supported()
    }

    /// Supported targets for a source
    pub fn targets_for(&self, source: Format) -> Vec<Format> {
        Format::writable()
            .filter(|target| self.is_supported(source, *target))
            .collect()
    }

    fn position(format: Format) -> usize {
        Format::ALL
            .iter()
            .position(|f| *f == format)
            .unwrap_or_default()
    }

    /// Markdown table: rows are input formats, columns are output formats
    pub fn to_markdown(&self) -> String {
        let targets: Vec<Format> = Format::writable().collect();

        let mut header = String::from("| Input Format \\ Output Format |");
        let mut divider = String::from("|:---|");
        for target in &targets {
            header.push_str(&format!(" {} |", target.title()));
            divider.push_str(":---:|");
        }

        let mut lines = vec![header, divider];
        for source in Format::readable() {
            let mut row = format!("| {} |", source.title());
            for target in &targets {
                let cell = if self.is_supported(source, *target) { "Yes" } else { "-" };
                row.push_str(&format!(" {} |", cell));
            }
            lines.push(row);
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

/// Which readable sources pair with which writable targets
fn pair_supported(source: Format, target: Format) -> bool {
    if source.is_metrics_only() {
        return target == Format::TeamCityStats;
    }
    match target {
        Format::TeamCityStats => source == Format::JUnit,
        _ => true,
    }
}

fn describe(source: Format, target: Format) -> String {
    match target {
        Format::TeamCityStats if source.is_metrics_only() => {
            format!("{} metrics reported as TeamCity build statistics", source.title())
        }
        Format::TeamCityStats => format!("{} test counts reported as TeamCity build statistics", source.title()),
        Format::TeamCityInspections => {
            format!("{} issues grouped into TeamCity inspection types", source.title())
        }
        Format::TeamCityTests => format!("{} results streamed as TeamCity test events", source.title()),
        Format::GithubCli => format!("{} failures as GitHub Actions annotations", source.title()),
        _ => format!("{} converted to {}", source.title(), target.title()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pair_is_declared() {
        let matrix = CompatibilityMatrix::new();
        assert_eq!(matrix.entries().len(), Format::ALL.len() * Format::ALL.len());

        for source in Format::ALL {
            for target in Format::ALL {
                let entry = matrix.get(source, target);
                assert_eq!(entry.source, source);
                assert_eq!(entry.target, target);
                assert!(!entry.description.is_empty());
            }
        }
    }

    #[test]
    fn directions_are_respected() {
        let matrix = CompatibilityMatrix::new();
        assert_eq!(
            matrix.get(Format::GithubCli, Format::JUnit).compatibility,
            Compatibility::WriteOnly
        );
        assert_eq!(
            matrix.get(Format::JUnit, Format::PhpMdJson).compatibility,
            Compatibility::ReadOnly
        );
    }

    #[test]
    fn metrics_only_pair_with_stats() {
        let matrix = CompatibilityMatrix::new();
        assert!(matrix.is_supported(Format::PhpLocJson, Format::TeamCityStats));
        assert!(matrix.is_supported(Format::PDependXml, Format::TeamCityStats));
        assert_eq!(
            matrix.get(Format::PhpLocJson, Format::JUnit).compatibility,
            Compatibility::Unsupported
        );
        assert_eq!(matrix.targets_for(Format::PhpLocJson), vec![Format::TeamCityStats]);
    }

    #[test]
    fn stats_only_accept_junit_among_test_sources() {
        let matrix = CompatibilityMatrix::new();
        assert!(matrix.is_supported(Format::JUnit, Format::TeamCityStats));
        assert!(!matrix.is_supported(Format::CheckStyle, Format::TeamCityStats));
        assert!(matrix.is_supported(Format::CheckStyle, Format::JUnit));
        assert!(matrix.is_supported(Format::PhpMdJson, Format::TeamCityInspections));
    }

    #[test]
    fn markdown_has_row_per_reader() {
        let markdown = CompatibilityMatrix::new().to_markdown();
        let lines: Vec<_> = markdown.lines().collect();

        assert_eq!(lines.len(), 2 + Format::readable().count());
        assert!(lines[0].contains("JUnit.xml"));
        assert!(lines[0].contains("TeamCity - Tests"));
        assert!(lines.iter().any(|l| l.starts_with("| PHPloc.json |")));
        assert!(markdown.ends_with('\n'));
    }
}
