//! Numeric metrics carried alongside a suite (PHPLoc, PDepend)

use serde::{Deserialize, Serialize};

/// One named metric value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    /// Raw key as found in the input
    pub key: String,
    /// Human readable title
    pub title: String,
    pub value: f64,
}

impl Metric {
    pub fn new(key: impl Into<String>, title: impl Into<String>, value: f64) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            value,
        }
    }

    /// Value formatted for line protocols: integers without a fraction,
    /// everything else rounded to six decimals with trailing zeros removed.
    pub fn formatted_value(&self) -> String {
        format_number(self.value)
    }
}

pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }

    let fixed = format!("{:.6}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
