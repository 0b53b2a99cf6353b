//! CheckStyle XML Reporter
//!
//! Groups failures by file path in first-seen order. Suites that carry a file
//! but no failures still produce an empty `<file>` element.

use std::collections::HashMap;

use super::{escape_attr, require_message};
use crate::errors::Result;
use crate::format::{Format, RenderOptions, Writer};
use crate::model::{Failure, Suite, TestCase};

pub struct CheckStyleWriter;

impl Writer for CheckStyleWriter {
    fn render(&self, suite: &Suite, _options: &RenderOptions) -> Result<String> {
        let mut files = FileIndex::default();
        collect(suite, &mut files)?;

        let mut xml = String::new();
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<checkstyle>\n");
        for (name, errors) in &files.entries {
            if errors.is_empty() {
                xml.push_str(&format!("  <file name=\"{}\"/>\n", escape_attr(name)));
                continue;
            }
            xml.push_str(&format!("  <file name=\"{}\">\n", escape_attr(name)));
            for error in errors {
                xml.push_str(&format!("    {}\n", error));
            }
            xml.push_str("  </file>\n");
        }
        xml.push_str("</checkstyle>\n");
        Ok(xml)
    }
}

/// Rendered `<error>` elements per file, in first-seen order
#[derive(Default)]
struct FileIndex {
    positions: HashMap<String, usize>,
    entries: Vec<(String, Vec<String>)>,
}

impl FileIndex {
    fn entry(&mut self, file: &str) -> &mut Vec<String> {
        let index = match self.positions.get(file) {
            Some(index) => *index,
            None => {
                self.entries.push((file.to_string(), Vec::new()));
                self.positions.insert(file.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[index].1
    }
}

fn collect(suite: &Suite, files: &mut FileIndex) -> Result<()> {
    if let Some(file) = &suite.file {
        files.entry(file);
    }
    for child in &suite.suites {
        collect(child, files)?;
    }
    for case in &suite.cases {
        for failure in &case.failures {
            require_message(Format::CheckStyle, case, failure)?;
            let location = case.failure_location(failure);
            let file = location.file.as_deref().unwrap_or(case.name.as_str());
            files.entry(file).push(error_element(case, failure));
        }
    }
    Ok(())
}

fn error_element(case: &TestCase, failure: &Failure) -> String {
    let location = case.failure_location(failure);
    let mut out = String::from("<error");
    if let Some(line) = location.line {
        out.push_str(&format!(" line=\"{}\"", line));
    }
    if let Some(column) = location.column {
        out.push_str(&format!(" column=\"{}\"", column));
    }
    out.push_str(&format!(" severity=\"{}\"", failure.severity.as_str()));
    out.push_str(&format!(" message=\"{}\"", escape_attr(&failure.message)));
    if let Some(source) = source(failure) {
        out.push_str(&format!(" source=\"{}\"", escape_attr(source)));
    }
    out.push_str("/>");
    out
}

/// The rule id the report named, else a type tag that is more than the
/// upper-cased severity a sourceless `<error>` gets on read
fn source(failure: &Failure) -> Option<&str> {
    if let Some(rule) = failure.rule.as_deref() {
        return Some(rule);
    }
    let tag = failure.failure_type.as_str();
    let derived = tag.is_empty() || tag.eq_ignore_ascii_case(failure.severity.as_str());
    (!derived).then_some(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::ConvertOptions;
    use crate::errors::ConvertError;
    use crate::format::Reader;
    use crate::model::Location;
    use crate::reader::checkstyle::CheckStyleReader;

    fn render(suite: &Suite) -> Result<String> {
        CheckStyleWriter.render(suite, &RenderOptions::new("1"))
    }

    #[test]
    fn groups_by_file() {
        let suite = Suite::new("root")
            .with_case(
                TestCase::new("a")
                    .with_location(Location::new(Some("a.php".into()), Some(3), Some(1)))
                    .with_failure(Failure::failure("Rule.A", "first")),
            )
            .with_case(
                TestCase::new("b")
                    .with_location(Location::file("b.php"))
                    .with_failure(Failure::warning("Rule.B", "second")),
            )
            .with_case(
                TestCase::new("c")
                    .with_location(Location::new(Some("a.php".into()), Some(9), None))
                    .with_failure(Failure::error("Rule.C", "third & last")),
            );

        let xml = render(&suite).unwrap();
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<checkstyle>\n",
            "  <file name=\"a.php\">\n",
            "    <error line=\"3\" column=\"1\" severity=\"error\" message=\"first\" source=\"Rule.A\"/>\n",
            "    <error line=\"9\" severity=\"error\" message=\"third &amp; last\" source=\"Rule.C\"/>\n",
            "  </file>\n",
            "  <file name=\"b.php\">\n",
            "    <error severity=\"warning\" message=\"second\" source=\"Rule.B\"/>\n",
            "  </file>\n",
            "</checkstyle>\n",
        );
        assert_eq!(xml, expected);
    }

    #[test]
    fn case_name_stands_in_for_missing_file() {
        let suite = Suite::new("root").with_case(TestCase::new("testFoo").with_failure(Failure::failure("F", "m")));
        assert!(render(&suite).unwrap().contains("<file name=\"testFoo\">"));
    }

    #[test]
    fn empty_message_fails() {
        let suite = Suite::new("root").with_case(TestCase::new("t").with_failure(Failure::failure("F", "")));
        assert!(matches!(render(&suite).unwrap_err(), ConvertError::Render { .. }));
    }

    #[test]
    fn reader_output_round_trips() {
        let input = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<checkstyle>\n",
            "  <file name=\"a.php\">\n",
            "    <error line=\"10\" column=\"2\" severity=\"error\" message=\"X\" source=\"ERROR\"/>\n",
            "  </file>\n",
            "  <file name=\"clean.php\"/>\n",
            "</checkstyle>\n",
        );
        let suite = CheckStyleReader.parse(input, &ConvertOptions::new()).unwrap();
        assert_eq!(render(&suite).unwrap(), input);
    }

    #[test]
    fn missing_source_stays_missing() {
        let input = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<checkstyle>\n",
            "  <file name=\"a.php\">\n",
            "    <error line=\"10\" column=\"2\" severity=\"error\" message=\"X\"/>\n",
            "    <error line=\"12\" severity=\"warning\" message=\"Y\"/>\n",
            "    <error line=\"14\" severity=\"info\" message=\"Z\" source=\"INFO\"/>\n",
            "  </file>\n",
            "</checkstyle>\n",
        );
        let suite = CheckStyleReader.parse(input, &ConvertOptions::new()).unwrap();
        assert_eq!(render(&suite).unwrap(), input);
    }
}
