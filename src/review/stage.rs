//! Critical-analysis staging.
//!
//! A document must be critically re-analysed periodically. The number of whole
//! months since its last analysis is mapped onto an ordered threshold table to
//! pick the badge color shown next to it.

use super::clock::Clock;
use crate::model::{Label, LabelColor};
use chrono::{Datelike, NaiveDate};
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Month arithmetic
// ============================================================================

/// Whole calendar months from `from` to `to`, truncated toward zero.
///
/// A month counts once its day-of-month is reached; when `from` falls on a
/// day the target month does not have (Jan 31 → Feb), the last day of the
/// target month counts. Negative when `to` is before `from`.
#[must_use]
pub fn months_between(from: NaiveDate, to: NaiveDate) -> i64 {
    if to < from {
        return -months_between(to, from);
    }

    let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());

    let anniversary_day = from.day().min(days_in_month(to.year(), to.month()));
    if to.day() < anniversary_day {
        months -= 1;
    }

    months
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map_or(28, |d| d.day())
}

/// Whole months elapsed between the last critical analysis and `today`.
#[must_use]
pub fn months_since_analysis(last_analysis: NaiveDate, today: NaiveDate) -> i64 {
    months_between(last_analysis, today)
}

/// Human-readable month count shown inside the badge.
#[must_use]
pub fn months_label(months: i64) -> String {
    if months == 1 {
        "1 month".to_string()
    } else {
        format!("{months} months")
    }
}

// ============================================================================
// Threshold table
// ============================================================================

/// One row of the threshold table: up to `max_months` elapsed, use `color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StageThreshold {
    pub max_months: i64,
    pub color: LabelColor,
}

impl StageThreshold {
    #[must_use]
    pub const fn new(max_months: i64, color: LabelColor) -> Self {
        Self { max_months, color }
    }
}

/// Reasons a threshold table is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThresholdError {
    #[error("at least one threshold is required")]
    Empty,

    #[error("threshold {index} has negative max_months ({max_months})")]
    Negative { index: usize, max_months: i64 },

    #[error("threshold {index} ({max_months}) must be greater than the previous one")]
    NotAscending { index: usize, max_months: i64 },
}

/// Ordered threshold table plus the color used past the last threshold.
///
/// Invariants: non-empty, non-negative, strictly ascending `max_months`.
/// They hold for every value, including ones deserialized from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStageThresholds", into = "RawStageThresholds")]
pub struct StageThresholds {
    steps: Vec<StageThreshold>,
    overdue: LabelColor,
}

/// Serialized shape of [`StageThresholds`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RawStageThresholds {
    /// Thresholds evaluated in ascending order, first match wins
    pub thresholds: Vec<StageThreshold>,
    /// Color once every threshold is exceeded
    pub overdue_color: LabelColor,
}

impl StageThresholds {
    pub fn new(steps: Vec<StageThreshold>, overdue: LabelColor) -> Result<Self, ThresholdError> {
        if steps.is_empty() {
            return Err(ThresholdError::Empty);
        }

        for (index, step) in steps.iter().enumerate() {
            if step.max_months < 0 {
                return Err(ThresholdError::Negative {
                    index,
                    max_months: step.max_months,
                });
            }
            if index > 0 && step.max_months <= steps[index - 1].max_months {
                return Err(ThresholdError::NotAscending {
                    index,
                    max_months: step.max_months,
                });
            }
        }

        Ok(Self { steps, overdue })
    }

    #[must_use]
    pub fn steps(&self) -> &[StageThreshold] {
        &self.steps
    }

    #[must_use]
    pub const fn overdue_color(&self) -> LabelColor {
        self.overdue
    }

    /// Stage for a given number of elapsed months.
    ///
    /// Non-positive counts (an analysis dated in the future) land on the
    /// first, least severe threshold.
    #[must_use]
    pub fn classify(&self, months_elapsed: i64) -> CriticalAnalysisStage {
        let clamped = months_elapsed.max(0);
        let matched = self
            .steps
            .iter()
            .enumerate()
            .find(|(_, step)| clamped <= step.max_months);

        match matched {
            Some((index, step)) => CriticalAnalysisStage {
                color: step.color,
                months_elapsed,
                level: StageLevel::Within(index),
            },
            None => CriticalAnalysisStage {
                color: self.overdue,
                months_elapsed,
                level: StageLevel::Overdue,
            },
        }
    }
}

impl Default for StageThresholds {
    fn default() -> Self {
        Self {
            steps: vec![
                StageThreshold::new(6, LabelColor::Success),
                StageThreshold::new(9, LabelColor::Info),
                StageThreshold::new(12, LabelColor::Warning),
            ],
            overdue: LabelColor::Error,
        }
    }
}

impl TryFrom<RawStageThresholds> for StageThresholds {
    type Error = ThresholdError;

    fn try_from(raw: RawStageThresholds) -> Result<Self, Self::Error> {
        Self::new(raw.thresholds, raw.overdue_color)
    }
}

impl From<StageThresholds> for RawStageThresholds {
    fn from(value: StageThresholds) -> Self {
        Self {
            thresholds: value.steps,
            overdue_color: value.overdue,
        }
    }
}

impl JsonSchema for StageThresholds {
    fn schema_name() -> String {
        RawStageThresholds::schema_name()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        RawStageThresholds::json_schema(gen)
    }
}

// ============================================================================
// Stage result
// ============================================================================

/// Which row of the table matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageLevel {
    /// Index into the threshold table
    Within(usize),
    Overdue,
}

/// Result of classifying a document's last critical analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CriticalAnalysisStage {
    pub color: LabelColor,
    pub months_elapsed: i64,
    pub level: StageLevel,
}

impl CriticalAnalysisStage {
    #[must_use]
    pub const fn is_overdue(&self) -> bool {
        matches!(self.level, StageLevel::Overdue)
    }

    #[must_use]
    pub fn label(&self) -> Label {
        Label::new(months_label(self.months_elapsed), self.color)
    }
}

impl fmt::Display for CriticalAnalysisStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", months_label(self.months_elapsed), self.color)
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Threshold table bound to a clock.
#[derive(Debug)]
pub struct CriticalAnalysisClassifier {
    thresholds: StageThresholds,
    clock: Box<dyn Clock>,
}

impl CriticalAnalysisClassifier {
    pub fn new(thresholds: StageThresholds, clock: impl Clock + 'static) -> Self {
        Self {
            thresholds,
            clock: Box::new(clock),
        }
    }

    #[must_use]
    pub const fn thresholds(&self) -> &StageThresholds {
        &self.thresholds
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    #[must_use]
    pub fn months_since_analysis(&self, last_analysis: NaiveDate) -> i64 {
        months_since_analysis(last_analysis, self.clock.today())
    }

    #[must_use]
    pub fn stage(&self, last_analysis: NaiveDate) -> CriticalAnalysisStage {
        self.thresholds
            .classify(self.months_since_analysis(last_analysis))
    }

    /// Stage for an optional date; no date means no critical-analysis tracking.
    #[must_use]
    pub fn stage_for(&self, last_analysis: Option<NaiveDate>) -> Option<CriticalAnalysisStage> {
        last_analysis.map(|date| self.stage(date))
    }
}
