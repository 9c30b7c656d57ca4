//! Common domain type definitions
//!
//! Small enum types shared by the employee record, the loader and the
//! aggregation code.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether an employee has left the company
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Attrition {
    /// Still employed (coded 0)
    Stayed,
    /// Left the company (coded 1)
    Left,
}

impl Attrition {
    /// Parse the flag from the textual encodings found in HR extracts
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "yes" | "y" | "true" | "left" => Some(Self::Left),
            "0" | "no" | "n" | "false" | "stayed" => Some(Self::Stayed),
            _ => None,
        }
    }

    /// Numeric encoding (left=1, stayed=0)
    #[must_use]
    pub const fn as_flag(self) -> u8 {
        match self {
            Self::Stayed => 0,
            Self::Left => 1,
        }
    }

    /// Whether the employee left
    #[must_use]
    pub const fn has_left(self) -> bool {
        matches!(self, Self::Left)
    }
}

impl From<Attrition> for u8 {
    fn from(value: Attrition) -> Self {
        value.as_flag()
    }
}

impl TryFrom<u8> for Attrition {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Stayed),
            1 => Ok(Self::Left),
            other => Err(format!("attrition flag must be 0 or 1, got {other}")),
        }
    }
}

impl fmt::Display for Attrition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_flag())
    }
}

/// Parse a yes/no style flag such as the `OverTime` column
#[must_use]
pub fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "yes" | "y" | "true" => Some(true),
        "0" | "no" | "n" | "false" => Some(false),
        _ => None,
    }
}

/// Age range used for grouped attrition analysis
///
/// Variants are declared in band order so the derived `Ord` sorts
/// youngest band first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// 18 to 25 inclusive
    #[serde(rename = "18-25")]
    From18To25,
    /// 26 to 35 inclusive
    #[serde(rename = "26-35")]
    From26To35,
    /// 36 to 45 inclusive
    #[serde(rename = "36-45")]
    From36To45,
    /// 46 to 60 inclusive (labelled "45-60" in dashboards)
    #[serde(rename = "45-60")]
    From46To60,
    /// Everything older than 60
    #[serde(rename = "60+")]
    Over60,
}

impl AgeBand {
    /// All bands in display order
    pub const ALL: [Self; 5] = [
        Self::From18To25,
        Self::From26To35,
        Self::From36To45,
        Self::From46To60,
        Self::Over60,
    ];

    /// Dashboard label for the band
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::From18To25 => "18-25",
            Self::From26To35 => "26-35",
            Self::From36To45 => "36-45",
            Self::From46To60 => "45-60",
            Self::Over60 => "60+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
