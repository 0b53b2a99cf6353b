//! PDepend summary XML reader (`pdepend --summary-xml`)
//!
//! Project-wide metrics are attributes of the `<metrics>` root element. Nested
//! package/class/method elements are not read.

use tracing::{debug, trace};

use super::{expect_root, xml_document};
use crate::converter::ConvertOptions;
use crate::errors::Result;
use crate::format::{Format, Reader};
use crate::model::{Metric, Suite};

const TITLES: &[(&str, &str)] = &[
    ("ahh", "Average Hierarchy Height"),
    ("andc", "Average Number of Derived Classes"),
    ("calls", "Number of Method or Function Calls"),
    ("ccn", "Cyclomatic Complexity Number"),
    ("ccn2", "Extended Cyclomatic Complexity Number"),
    ("cloc", "Comment Lines of Code"),
    ("clsa", "Number of Abstract Classes"),
    ("clsc", "Number of Concrete Classes"),
    ("eloc", "Executable Lines of Code"),
    ("fanout", "Number of Fanouts"),
    ("leafs", "Number of Leaf Classes"),
    ("lloc", "Logical Lines Of Code"),
    ("loc", "Lines Of Code"),
    ("maxDIT", "Max Depth of Inheritance Tree"),
    ("ncloc", "Non Comment Lines Of Code"),
    ("noc", "Number Of Classes"),
    ("nof", "Number Of Functions"),
    ("noi", "Number Of Interfaces"),
    ("nom", "Number Of Methods"),
    ("nop", "Number of Packages"),
    ("roots", "Number of Root Classes"),
];

fn metric_title(key: &str) -> &str {
    TITLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)
        .unwrap_or(key)
}

pub struct PDependReader;

impl Reader for PDependReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let doc = xml_document(Format::PDependXml, input)?;
        let root = expect_root(Format::PDependXml, &doc, &["metrics"])?;

        let mut suite = Suite::new(options.root_suite_name(Format::PDependXml));
        for attribute in root.attributes() {
            let key = attribute.name();
            match attribute.value().trim().parse::<f64>() {
                Ok(value) if value.is_finite() => {
                    suite.metrics.push(Metric::new(key, metric_title(key), value));
                }
                _ => trace!(key = key, "Skipping non-numeric pdepend attribute"),
            }
        }

        debug!(metrics = suite.metrics.len(), "Parsed pdepend summary");
        Ok(suite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConvertError;

    const REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<metrics generated="2021-03-13T12:00:00" pdepend="2.9.1" ahh="0.5" andc="0.25" calls="120" ccn="88" ncloc="900" noc="12" nom="40">
  <package name="App"/>
</metrics>
"#;

    #[test]
    fn numeric_root_attributes_become_metrics() {
        let suite = PDependReader.parse(REPORT, &ConvertOptions::new()).unwrap();

        assert_eq!(suite.name, "PDepend");
        let keys: Vec<_> = suite.metrics.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, ["ahh", "andc", "calls", "ccn", "ncloc", "noc", "nom"]);
        assert_eq!(suite.metrics[0].title, "Average Hierarchy Height");
        assert_eq!(suite.metrics[4].formatted_value(), "900");
    }

    #[test]
    fn requires_metrics_root() {
        let err = PDependReader.parse("<checkstyle/>", &ConvertOptions::new()).unwrap_err();
        assert!(matches!(err, ConvertError::Parse { .. }));
    }
}
