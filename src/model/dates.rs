//! Lenient date handling for server payloads.
//!
//! The admin API returns dates either as `YYYY-MM-DD` or as full date-times,
//! and older records carry empty strings or nulls. Anything that does not
//! parse is treated as absent rather than failing the whole page.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serializer};

/// Wire date format used when serializing dates back to the server.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a server date string, accepting plain dates and date-times.
#[must_use]
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, WIRE_DATE_FORMAT)
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|dt| dt.date())
        })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Other(IgnoredAny),
}

/// `#[serde(with = "lenient_date")]` adapter for `Option<NaiveDate>` fields.
pub mod lenient_date {
    use super::{parse_date, NaiveDate, RawDate, WIRE_DATE_FORMAT};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<RawDate> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawDate::Text(text)) => {
                let parsed = parse_date(&text);
                if parsed.is_none() && !text.trim().is_empty() {
                    tracing::debug!("Ignoring unparseable date '{}'", text);
                }
                parsed
            }
            Some(RawDate::Other(_)) | None => None,
        })
    }

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_some(&date.format(WIRE_DATE_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawText {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Other(IgnoredAny),
}

/// `#[serde(with = "lenient_text")]` adapter for display fields that the
/// server sometimes sends as numbers (nominal ranges, for instance).
pub mod lenient_text {
    use super::{Deserialize, Deserializer, RawText, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<RawText> = Option::deserialize(deserializer)?;
        Ok(match raw {
            Some(RawText::Text(text)) => Some(text),
            Some(RawText::Integer(n)) => Some(n.to_string()),
            Some(RawText::Float(n)) => Some(n.to_string()),
            Some(RawText::Bool(b)) => Some(b.to_string()),
            Some(RawText::Other(_)) | None => None,
        })
    }

    pub fn serialize<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(text) => serializer.serialize_some(text),
            None => serializer.serialize_none(),
        }
    }
}
