//! "Did you mean?" suggestions for mistyped format names
//!
//! Uses Jaro-Winkler similarity to find the closest registered name.

use strsim::jaro_winkler;

/// Default similarity threshold for suggestions (0.0 to 1.0)
const DEFAULT_THRESHOLD: f64 = 0.6;

/// Find the most similar string from a list of candidates
///
/// Returns the best match if it exceeds the threshold, or None otherwise.
pub fn find_similar<'a>(input: &str, candidates: &[&'a str], threshold: f64) -> Option<&'a str> {
    candidates
        .iter()
        .map(|c| (jaro_winkler(input, c), *c))
        .filter(|(score, _)| *score > threshold)
        .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(_, name)| name)
}

/// Generate a suggestion for an unknown format name
pub fn suggest_format(unknown: &str, known: &[&str]) -> String {
    let normalized = unknown.trim().to_ascii_lowercase();

    if let Some(suggestion) = find_similar(&normalized, known, DEFAULT_THRESHOLD) {
        format!(
            "Did you mean '{}'?\n\nAvailable formats: {}",
            suggestion,
            known.join(", ")
        )
    } else {
        format!("Available formats: {}", known.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORMATS: &[&str] = &["checkstyle", "junit", "phpmd-json", "tc-tests", "tc-inspections"];

    #[test]
    fn finds_close_match() {
        assert_eq!(find_similar("chekstyle", FORMATS, DEFAULT_THRESHOLD), Some("checkstyle"));
        assert_eq!(find_similar("tc-test", FORMATS, DEFAULT_THRESHOLD), Some("tc-tests"));
    }

    #[test]
    fn no_match_for_garbage() {
        assert_eq!(find_similar("zzzzzz", FORMATS, DEFAULT_THRESHOLD), None);
    }

    #[test]
    fn suggestion_lists_formats() {
        let text = suggest_format("JUNIT-XML", FORMATS);
        assert!(text.contains("Did you mean 'junit'?"));
        assert!(text.contains("Available formats: checkstyle, junit"));

        let text = suggest_format("qqqq", FORMATS);
        assert!(!text.contains("Did you mean"));
    }
}
