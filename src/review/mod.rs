//! Critical-analysis review staging.
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use kometro_docs::review::{CriticalAnalysisClassifier, FixedClock, StageThresholds};
//! use kometro_docs::model::LabelColor;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 10, 1).unwrap();
//! let classifier = CriticalAnalysisClassifier::new(StageThresholds::default(), FixedClock(today));
//!
//! let last = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let stage = classifier.stage(last);
//! assert_eq!(stage.months_elapsed, 9);
//! assert_eq!(stage.color, LabelColor::Info);
//! ```

mod clock;
mod stage;

pub use clock::{Clock, FixedClock, SystemClock};
pub use stage::{
    months_between, months_label, months_since_analysis, CriticalAnalysisClassifier,
    CriticalAnalysisStage, RawStageThresholds, StageLevel, StageThreshold, StageThresholds,
    ThresholdError,
};
