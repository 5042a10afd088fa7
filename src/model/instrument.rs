//! Calibrated measurement instruments.

use super::dates::{lenient_date, lenient_text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Server-assigned instrument identifier.
pub type InstrumentId = u64;

/// Engineering unit attached to an instrument's nominal range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(rename = "unidade")]
    pub symbol: String,
}

/// A measurement device tracked for calibration expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instrument {
    pub id: InstrumentId,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "fabricante", default)]
    pub manufacturer: Option<String>,
    #[serde(rename = "modelo", default)]
    pub model: Option<String>,
    #[serde(rename = "faixaNominalMin", default, with = "lenient_text")]
    pub nominal_min: Option<String>,
    #[serde(rename = "faixaNominalMax", default, with = "lenient_text")]
    pub nominal_max: Option<String>,
    #[serde(rename = "unidade", default)]
    pub units: Vec<Unit>,
    /// Last calibration date when expired, next calibration date otherwise
    #[serde(rename = "data", default, with = "lenient_date")]
    pub calibration_date: Option<NaiveDate>,
    #[serde(rename = "isExpired", default)]
    pub is_expired: bool,
}

impl Instrument {
    #[must_use]
    pub const fn new(id: InstrumentId) -> Self {
        Self {
            id,
            tag: None,
            description: None,
            manufacturer: None,
            model: None,
            nominal_min: None,
            nominal_max: None,
            units: Vec::new(),
            calibration_date: None,
            is_expired: false,
        }
    }

    /// Unit symbols in server order.
    #[must_use]
    pub fn unit_symbols(&self) -> Vec<&str> {
        self.units.iter().map(|u| u.symbol.as_str()).collect()
    }
}
