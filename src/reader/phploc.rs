//! PHPLoc JSON reader (`phploc --log-json`)
//!
//! A flat object of metric keys. Only numeric values are kept; the suite has
//! no test cases, just metrics in document order.

use serde_json::{Map, Value};
use tracing::debug;

use super::json_from_str;
use crate::converter::ConvertOptions;
use crate::errors::{ConvertError, Result};
use crate::format::{Format, Reader};
use crate::model::{Metric, Suite};

const TITLES: &[(&str, &str)] = &[
    ("directories", "Directories"),
    ("files", "Files"),
    ("loc", "Lines of Code (LOC)"),
    ("cloc", "Comment Lines of Code (CLOC)"),
    ("ncloc", "Non-Comment Lines of Code (NCLOC)"),
    ("lloc", "Logical Lines of Code (LLOC)"),
    ("llocClasses", "LLOC: Classes"),
    ("llocFunctions", "LLOC: Functions"),
    ("llocGlobal", "LLOC: Not in classes or functions"),
    ("classLlocMin", "Classes Length (LLOC): Minimum"),
    ("classLlocAvg", "Classes Length (LLOC): Average"),
    ("classLlocMax", "Classes Length (LLOC): Maximum"),
    ("methodLlocMin", "Method Length (LLOC): Minimum"),
    ("methodLlocAvg", "Method Length (LLOC): Average"),
    ("methodLlocMax", "Method Length (LLOC): Maximum"),
    ("llocByNof", "Average Function Length (LLOC)"),
    ("ccn", "Cyclomatic Complexity"),
    ("ccnMethods", "Cyclomatic Complexity: Methods"),
    ("ccnByLloc", "Average Complexity per LLOC"),
    ("classCcnMin", "Complexity per Class: Minimum"),
    ("classCcnAvg", "Complexity per Class: Average"),
    ("classCcnMax", "Complexity per Class: Maximum"),
    ("methodCcnMin", "Complexity per Method: Minimum"),
    ("methodCcnAvg", "Complexity per Method: Average"),
    ("methodCcnMax", "Complexity per Method: Maximum"),
    ("globalAccesses", "Global Accesses"),
    ("globalConstantAccesses", "Global Accesses: Global Constants"),
    ("globalVariableAccesses", "Global Accesses: Global Variables"),
    ("superGlobalVariableAccesses", "Global Accesses: Super-Global Variables"),
    ("attributeAccesses", "Attribute Accesses"),
    ("instanceAttributeAccesses", "Attribute Accesses: Non-Static"),
    ("staticAttributeAccesses", "Attribute Accesses: Static"),
    ("methodCalls", "Method Calls"),
    ("instanceMethodCalls", "Method Calls: Non-Static"),
    ("staticMethodCalls", "Method Calls: Static"),
    ("namespaces", "Namespaces"),
    ("interfaces", "Interfaces"),
    ("traits", "Traits"),
    ("classes", "Classes"),
    ("abstractClasses", "Classes: Abstract"),
    ("concreteClasses", "Classes: Concrete"),
    ("finalClasses", "Classes: Final"),
    ("nonFinalClasses", "Classes: Non-Final"),
    ("methods", "Methods"),
    ("nonStaticMethods", "Methods: Non-Static"),
    ("staticMethods", "Methods: Static"),
    ("publicMethods", "Methods: Public"),
    ("protectedMethods", "Methods: Protected"),
    ("privateMethods", "Methods: Private"),
    ("nonPublicMethods", "Methods: Non-Public"),
    ("averageMethodsPerClass", "Methods per Class: Average"),
    ("minimumMethodsPerClass", "Methods per Class: Minimum"),
    ("maximumMethodsPerClass", "Methods per Class: Maximum"),
    ("functions", "Functions"),
    ("namedFunctions", "Functions: Named"),
    ("anonymousFunctions", "Functions: Anonymous"),
    ("constants", "Constants"),
    ("globalConstants", "Constants: Global"),
    ("classConstants", "Constants: Class"),
    ("publicClassConstants", "Constants: Public Class"),
    ("nonPublicClassConstants", "Constants: Non-Public Class"),
    ("testClasses", "Test Classes"),
    ("testMethods", "Test Methods"),
];

/// Human title for a PHPLoc key, the raw key when unknown
fn metric_title(key: &str) -> &str {
    TITLES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, title)| *title)
        .unwrap_or(key)
}

pub struct PhpLocReader;

impl Reader for PhpLocReader {
    fn parse(&self, input: &str, options: &ConvertOptions) -> Result<Suite> {
        let value: Value = json_from_str(Format::PhpLocJson, input)?;
        let object: Map<String, Value> = match value {
            Value::Object(map) => map,
            other => {
                return Err(ConvertError::parse(
                    Format::PhpLocJson.name(),
                    format!("expected a JSON object of metrics, found {}", json_kind(&other)),
                ))
            }
        };

        let mut suite = Suite::new(options.root_suite_name(Format::PhpLocJson));
        for (key, value) in &object {
            match value.as_f64() {
                Some(number) => suite.metrics.push(Metric::new(key.clone(), metric_title(key), number)),
                None => debug!(key = %key, "Skipping non-numeric phploc value"),
            }
        }

        debug!(metrics = suite.metrics.len(), "Parsed phploc report");
        Ok(suite)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
