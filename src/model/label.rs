//! Badge colors shared by status labels, critical-analysis stages and
//! calibration badges.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named badge color, resolved to an actual palette by the presentation layer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum LabelColor {
    #[default]
    Default,
    Primary,
    Secondary,
    Info,
    Success,
    Warning,
    Error,
}

impl LabelColor {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LabelColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece of text rendered inside a colored badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Label {
    pub text: String,
    pub color: LabelColor,
}

impl Label {
    pub fn new(text: impl Into<String>, color: LabelColor) -> Self {
        Self {
            text: text.into(),
            color,
        }
    }
}
