//! Growth signals and the per-type toggles of the signal mapper.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Conversion,
    Engagement,
    Retention,
    Revenue,
}

impl StatusEnum for SignalType {
    fn all() -> &'static [Self] {
        &[
            Self::Conversion,
            Self::Engagement,
            Self::Retention,
            Self::Revenue,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Conversion => "conversion",
            Self::Engagement => "engagement",
            Self::Retention => "retention",
            Self::Revenue => "revenue",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Revenue | Self::Conversion => BadgeTone::Positive,
            Self::Engagement => BadgeTone::Neutral,
            Self::Retention => BadgeTone::Warning,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalStatus {
    New,
    Processed,
}

impl StatusEnum for SignalStatus {
    fn all() -> &'static [Self] {
        &[Self::New, Self::Processed]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Processed => "Processed",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::New => BadgeTone::Warning,
            Self::Processed => BadgeTone::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Display id, e.g. `SIG-45620`.
    pub id: String,
    pub name: String,
    pub signal_type: SignalType,
    /// Scoring output, 0 to 100.
    pub score: f64,
    pub source: String,
    pub status: SignalStatus,
    pub detected: DateTime<Utc>,
}

impl Record for Signal {
    type Status = SignalStatus;

    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "signal_type" => Some(self.signal_type.label().into()),
            "score" => Some(Value::Float(self.score)),
            "source" => Some(self.source.as_str().into()),
            "status" => Some(self.status.label().into()),
            "detected" => Some(Value::Timestamp(self.detected)),
            _ => None,
        }
    }

    fn status(&self) -> Option<SignalStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: SignalStatus) -> bool {
        self.status = status;
        true
    }
}

impl PageRecord for Signal {
    const PAGE: Page = Page::Signals;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        match column {
            "signal_type" => Some(self.signal_type.tone()),
            "status" => Some(self.status.tone()),
            _ => None,
        }
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("id", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("name", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("signal_type", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("score", FieldKind::Number).sortable())
            .with_field(FieldDef::new("source", FieldKind::Text).searchable().filterable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable())
            .with_field(FieldDef::new("detected", FieldKind::Timestamp).sortable())
            .with_default_sort("score", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let signal = |id: &str,
                      name: &str,
                      signal_type: SignalType,
                      score: f64,
                      source: &str,
                      detected: DateTime<Utc>| Signal {
            id: id.to_string(),
            name: name.to_string(),
            signal_type,
            score,
            source: source.to_string(),
            status: SignalStatus::New,
            detected,
        };
        vec![
            signal("SIG-45601", "Trial to paid spike", SignalType::Conversion, 87.5, "Stripe", at(2024, 3, 4, 8, 12)),
            signal("SIG-45602", "Onboarding drop-off", SignalType::Retention, 64.0, "Mixpanel", at(2024, 3, 4, 9, 3)),
            signal("SIG-45603", "Pricing page dwell", SignalType::Engagement, 71.2, "GA4", at(2024, 3, 3, 17, 45)),
            signal("SIG-45604", "Expansion seats", SignalType::Revenue, 92.1, "Salesforce", at(2024, 3, 2, 14, 20)),
            signal("SIG-45605", "Webinar attendance", SignalType::Engagement, 55.8, "Zoom", at(2024, 3, 1, 11, 0)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "signal_type", "score", "source", "status"]
    }

    fn parse_status(label: &str) -> Option<SignalStatus> {
        SignalStatus::parse(label)
    }
}
