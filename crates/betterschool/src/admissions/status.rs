use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Admission status shown on a school listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionStatus {
    Open,
    Deadline,
    Closed,
    Unknown,
}

impl AdmissionStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Open, Self::Deadline, Self::Closed, Self::Unknown]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Deadline => "deadline",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Deadline => "Closing Soon",
            Self::Closed => "Closed",
            Self::Unknown => "Unknown",
        }
    }

    /// Badge text for listings; `Unknown` renders no badge.
    pub const fn badge(self) -> Option<&'static str> {
        match self {
            Self::Unknown => None,
            other => Some(other.label()),
        }
    }

    const fn precedence(self) -> u8 {
        match self {
            Self::Open => 3,
            Self::Deadline => 2,
            Self::Closed => 1,
            Self::Unknown => 0,
        }
    }

    /// Combines per-window statuses: open beats deadline beats closed beats unknown.
    pub fn aggregate<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        statuses
            .into_iter()
            .max_by_key(|status| status.precedence())
            .unwrap_or(Self::Unknown)
    }
}

impl fmt::Display for AdmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not an admission status (expected open, deadline, closed or unknown)")]
pub struct UnknownStatusError(pub String);

impl FromStr for AdmissionStatus {
    type Err = UnknownStatusError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "deadline" | "closing" | "closing-soon" => Ok(Self::Deadline),
            "closed" => Ok(Self::Closed),
            "unknown" => Ok(Self::Unknown),
            _ => Err(UnknownStatusError(value.to_string())),
        }
    }
}
