//! GitLab Code Quality Reporter
//!
//! Generates GitLab Code Quality JSON for merge request integration.
//! See: https://docs.gitlab.com/ee/ci/testing/code_quality.html

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::require_message;
use crate::errors::{ConvertError, Result};
use crate::format::{Format, RenderOptions, Writer};
use crate::model::inspection::inspection_name;
use crate::model::{Failure, Severity, Suite, TestCase};

/// GitLab Code Quality issue
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabIssue {
    description: String,
    check_name: String,
    fingerprint: String,
    severity: String,
    location: GitLabLocation,
}

/// GitLab location information
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabLocation {
    path: String,
    lines: GitLabLines,
}

/// GitLab line information
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GitLabLines {
    begin: u32,
}

pub struct GitLabWriter;

impl Writer for GitLabWriter {
    fn render(&self, suite: &Suite, _options: &RenderOptions) -> Result<String> {
        let mut issues = Vec::new();
        for case in suite.iter_cases() {
            for failure in &case.failures {
                require_message(Format::GitLabJson, case, failure)?;
                issues.push(issue(case, failure));
            }
        }

        let mut json = serde_json::to_string_pretty(&issues)
            .map_err(|e| ConvertError::render(Format::GitLabJson.name(), e.to_string()))?;
        json.push('\n');
        Ok(json)
    }
}

fn issue(case: &TestCase, failure: &Failure) -> GitLabIssue {
    let location = case.failure_location(failure);
    let path = location.file.clone().unwrap_or_else(|| case.name.clone());
    let line = location.line.unwrap_or(1);
    let check_name = inspection_name(case, failure);

    GitLabIssue {
        description: failure.message.clone(),
        fingerprint: fingerprint(&check_name, &path, line, &failure.message),
        check_name,
        severity: map_severity(failure.severity).to_string(),
        location: GitLabLocation {
            path,
            lines: GitLabLines { begin: line },
        },
    }
}

/// 16-character hex string (first 64 bits of SHA256)
fn fingerprint(check_name: &str, path: &str, line: u32, message: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(check_name.as_bytes());
    hasher.update(b"|");
    hasher.update(path.as_bytes());
    hasher.update(b"|");
    hasher.update(line.to_string().as_bytes());
    hasher.update(b"|");
    hasher.update(message.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)[..16].to_string()
}

/// GitLab supports: info, minor, major, critical, blocker
fn map_severity(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "critical",
        Severity::Warning => "major",
        Severity::Info => "info",
    }
}
