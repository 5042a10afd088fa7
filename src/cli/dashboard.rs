//! `dashboard` command: summary cards from exported JSON.
//!
//! Each file holds either a JSON array or a paginated `{"results": [...]}`
//! object, as returned by the admin API.

use super::output::{paint, write_json, OutputFormat};
use crate::dashboard::DashboardCard;
use crate::error::{ErrorContext, KometroError};
use crate::model::{Instrument, PendingRevision};
use crate::review::CriticalAnalysisClassifier;
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Arguments of the `dashboard` command.
#[derive(Debug, Clone, Default)]
pub struct DashboardOptions {
    pub revisions: Option<PathBuf>,
    pub instruments: Option<PathBuf>,
    pub format: OutputFormat,
    pub color: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Listed<T> {
    Page { results: Vec<T> },
    List(Vec<T>),
}

/// Read a list of `T` from a JSON file.
pub fn load_listed<T: DeserializeOwned>(path: &Path) -> crate::error::Result<Vec<T>> {
    let content = std::fs::read_to_string(path).map_err(|e| KometroError::io(path, e))?;
    let listed: Listed<T> = serde_json::from_str(&content)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(match listed {
        Listed::Page { results } => results,
        Listed::List(items) => items,
    })
}

/// Run the dashboard command
pub fn run_dashboard(
    classifier: &CriticalAnalysisClassifier,
    options: &DashboardOptions,
    out: &mut dyn Write,
) -> Result<()> {
    let mut cards = Vec::new();

    if let Some(path) = &options.revisions {
        let pending: Vec<PendingRevision> = load_listed(path)?;
        cards.push(
            DashboardCard::revisions("Revisions awaiting approval", pending, classifier)
                .with_subheader(format!("Critical analysis as of {}", classifier.today())),
        );
    }
    if let Some(path) = &options.instruments {
        let instruments: Vec<Instrument> = load_listed(path)?;
        cards.push(DashboardCard::instruments("Instruments", instruments));
    }

    if cards.is_empty() {
        anyhow::bail!("pass --revisions and/or --instruments");
    }

    match options.format {
        OutputFormat::Json => write_json(&cards, out),
        OutputFormat::Table => {
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write_card(card, options.color, out)?;
            }
            Ok(())
        }
    }
}

fn write_card(card: &DashboardCard, color: bool, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "== {} ==", card.title)?;
    if let Some(subheader) = &card.subheader {
        writeln!(out, "{subheader}")?;
    }

    if let Some(message) = card.empty_message() {
        writeln!(out, "  {message}")?;
    }

    for entry in &card.entries {
        writeln!(out, "  {}  [{}]", entry.title(), entry.url())?;
        writeln!(out, "    {}", entry.subtitle())?;
        if let Some(detail) = entry.detail() {
            writeln!(out, "    {detail}")?;
        }
        if let Some(badge) = &entry.badge {
            writeln!(out, "    {}", paint(badge, color))?;
        }
    }

    if let Some(link) = card.see_all_link() {
        writeln!(out, "  See all: {link}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::review::{FixedClock, StageThresholds};
    use chrono::NaiveDate;

    fn classifier() -> CriticalAnalysisClassifier {
        CriticalAnalysisClassifier::new(
            StageThresholds::default(),
            FixedClock(NaiveDate::from_ymd_opt(2025, 10, 1).unwrap()),
        )
    }

    #[test]
    fn test_load_listed_accepts_page_and_array() {
        let dir = tempfile::tempdir().unwrap();
        let page = dir.path().join("page.json");
        let array = dir.path().join("array.json");
        std::fs::write(&page, r#"{"count": 1, "results": [{"id": 1, "tag": "T-1"}]}"#).unwrap();
        std::fs::write(&array, r#"[{"id": 2}, {"id": 3}]"#).unwrap();

        let from_page: Vec<Instrument> = load_listed(&page).unwrap();
        let from_array: Vec<Instrument> = load_listed(&array).unwrap();
        assert_eq!(from_page.len(), 1);
        assert_eq!(from_array.len(), 2);
    }

    #[test]
    fn test_dashboard_text_output() {
        let dir = tempfile::tempdir().unwrap();
        let instruments = dir.path().join("instruments.json");
        std::fs::write(
            &instruments,
            r#"[{"id": 7, "tag": "BAL-01", "descricao": "Balança", "fabricante": "Toledo",
                 "modelo": "X1", "faixaNominalMin": 0, "faixaNominalMax": 30,
                 "unidade": [{"unidade": "kg"}], "data": "2025-12-01", "isExpired": false}]"#,
        )
        .unwrap();

        let options = DashboardOptions {
            instruments: Some(instruments),
            ..DashboardOptions::default()
        };
        let mut out = Vec::new();
        run_dashboard(&classifier(), &options, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("BAL-01 - Balança  [/dashboard/instrumento/7]"), "{text}");
        assert!(text.contains("Toledo | X1 | 0 - 30 kg"), "{text}");
        assert!(text.contains("Next calibration 01/12/25"), "{text}");
        assert!(text.contains("See all: /dashboard/instrumentos"), "{text}");
    }

    #[test]
    fn test_dashboard_requires_input() {
        let mut out = Vec::new();
        assert!(run_dashboard(&classifier(), &DashboardOptions::default(), &mut out).is_err());
    }
}
