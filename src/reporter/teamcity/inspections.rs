//! TeamCity code inspections: one `inspectionType` per rule, then instances

use super::message::{Emitter, ServiceMessage};
use crate::errors::Result;
use crate::format::{Format, RenderOptions, Writer};
use crate::model::{InspectionReport, Severity, Suite};
use crate::reporter::require_message;

pub struct TeamCityInspectionsWriter;

impl Writer for TeamCityInspectionsWriter {
    fn render(&self, suite: &Suite, options: &RenderOptions) -> Result<String> {
        for case in suite.iter_cases() {
            for failure in &case.failures {
                require_message(Format::TeamCityInspections, case, failure)?;
            }
        }

        let report = InspectionReport::from_suite(suite, options.group_name(suite));
        let mut emitter = Emitter::new(Format::TeamCityInspections.name(), options.flow_id.clone());

        for inspection_type in &report.types {
            emitter.emit(
                ServiceMessage::new("inspectionType")
                    .attr("id", inspection_type.id.as_str())
                    .attr("name", inspection_type.name.as_str())
                    .attr("category", inspection_type.category.as_str())
                    .attr("description", inspection_type.description.as_str()),
            )?;
        }

        for instance in &report.instances {
            emitter.emit(
                ServiceMessage::new("inspection")
                    .attr("typeId", instance.type_id.as_str())
                    .attr("message", instance.message.as_str())
                    .attr("file", instance.location.file.as_deref().unwrap_or_default())
                    .attr_opt("line", instance.location.line.map(|l| l.to_string()))
                    .attr("SEVERITY", severity_label(instance.severity)),
            )?;
        }

        emitter.finish()
    }
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "ERROR",
        Severity::Warning => "WARNING",
        Severity::Info => "INFO",
    }
}
