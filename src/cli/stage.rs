//! `stage` command: critical-analysis stage of a single date.

use super::output::{paint, write_json, OutputFormat};
use crate::review::{CriticalAnalysisClassifier, StageLevel};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Write;

#[derive(Serialize)]
struct StageOutput {
    last_analysis: NaiveDate,
    today: NaiveDate,
    #[serde(flatten)]
    stage: crate::review::CriticalAnalysisStage,
}

/// Run the stage command
pub fn run_stage(
    classifier: &CriticalAnalysisClassifier,
    last_analysis: NaiveDate,
    format: OutputFormat,
    color: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let stage = classifier.stage(last_analysis);

    match format {
        OutputFormat::Json => write_json(
            &StageOutput {
                last_analysis,
                today: classifier.today(),
                stage,
            },
            out,
        ),
        OutputFormat::Table => {
            let level = match stage.level {
                StageLevel::Within(index) => classifier
                    .thresholds()
                    .steps()
                    .get(index)
                    .map_or_else(String::new, |step| format!("within {} months", step.max_months)),
                StageLevel::Overdue => "overdue".to_string(),
            };
            if level.is_empty() {
                writeln!(out, "{}", paint(&stage.label(), color))?;
            } else {
                writeln!(out, "{} ({level})", paint(&stage.label(), color))?;
            }
            Ok(())
        }
    }
}
