//! Reference lists and week metadata returned by the schedule API.

use serde::{Deserialize, Serialize};

/// Specialty (program) a group belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Specialty {
    /// Opaque tab id used by the schedule API.
    pub id: String,
    pub name: String,
}

/// Study group; `id` and `name` usually coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Group {
    pub id: String,
    pub name: String,
    pub specialty_id: String,
}

/// Numerator/denominator tag of the current calendar week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekParity {
    #[default]
    Numerator,
    Denominator,
}

impl WeekParity {
    /// Parses the API tag; unknown tags fall back to numerator.
    pub fn from_tag(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "denominator" => Self::Denominator,
            _ => Self::Numerator,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Numerator => "numerator",
            Self::Denominator => "denominator",
        }
    }
}

/// Week label and parity delivered with the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInfo {
    /// Server-formatted date label, e.g. "27 Ноября - Четверг".
    pub label: String,
    pub parity: WeekParity,
    /// Localized parity name.
    pub parity_label: String,
}
