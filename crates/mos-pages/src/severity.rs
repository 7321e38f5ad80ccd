//! Severity levels shared by the audit and error logs.

use chrono::{DateTime, TimeZone, Utc};
use mos_core::{BadgeTone, StatusEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl StatusEnum for Severity {
    fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Low => BadgeTone::Neutral,
            Self::Medium => BadgeTone::Warning,
            Self::High | Self::Critical => BadgeTone::Negative,
        }
    }
}

/// Seed timestamp helper; out-of-range input falls back to the epoch.
pub(crate) fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}
