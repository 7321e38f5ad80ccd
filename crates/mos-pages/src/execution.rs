//! Signal execution log: one row per automated action taken on a signal.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Success,
    Error,
}

impl StatusEnum for Outcome {
    fn all() -> &'static [Self] {
        &[Self::Success, Self::Error]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Success => BadgeTone::Positive,
            Self::Error => BadgeTone::Negative,
        }
    }
}

/// Log rows are read-only; `outcome` is a filter, not a status action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionEntry {
    pub id: i64,
    pub signal_id: String,
    pub action: String,
    pub outcome: Outcome,
    pub duration_ms: i64,
    pub timestamp: DateTime<Utc>,
}

impl Record for ExecutionEntry {
    type Status = ();

    fn id(&self) -> RecordId {
        RecordId::Num(self.id)
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::Int(self.id)),
            "signal_id" => Some(self.signal_id.as_str().into()),
            "action" => Some(self.action.as_str().into()),
            "outcome" => Some(self.outcome.label().into()),
            "duration_ms" => Some(Value::Int(self.duration_ms)),
            "timestamp" => Some(Value::Timestamp(self.timestamp)),
            _ => None,
        }
    }
}

impl PageRecord for ExecutionEntry {
    const PAGE: Page = Page::Executions;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "outcome").then(|| self.outcome.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("signal_id", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("action", FieldKind::Text).searchable().filterable())
            .with_field(FieldDef::new("outcome", FieldKind::Status).filterable())
            .with_field(FieldDef::new("duration_ms", FieldKind::Number).sortable())
            .with_field(FieldDef::new("timestamp", FieldKind::Timestamp).sortable())
            .with_default_sort("timestamp", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let entry = |id: i64,
                     signal_id: &str,
                     action: &str,
                     outcome: Outcome,
                     duration_ms: i64,
                     timestamp: DateTime<Utc>| ExecutionEntry {
            id,
            signal_id: signal_id.to_string(),
            action: action.to_string(),
            outcome,
            duration_ms,
            timestamp,
        };
        vec![
            entry(1, "SIG-45617", "Send nurture email", Outcome::Success, 420, at(2024, 3, 5, 8, 0)),
            entry(2, "SIG-45618", "Update CRM stage", Outcome::Success, 180, at(2024, 3, 5, 8, 4)),
            entry(3, "SIG-45619", "Notify account owner", Outcome::Error, 3000, at(2024, 3, 5, 8, 9)),
            entry(4, "SIG-45620", "Launch retargeting ad", Outcome::Success, 950, at(2024, 3, 5, 8, 15)),
            entry(5, "SIG-45621", "Send nurture email", Outcome::Success, 400, at(2024, 3, 5, 8, 21)),
            entry(6, "SIG-45622", "Create sales task", Outcome::Error, 2750, at(2024, 3, 5, 8, 30)),
            entry(7, "SIG-45623", "Update CRM stage", Outcome::Success, 210, at(2024, 3, 5, 8, 42)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["timestamp", "signal_id", "action", "outcome", "duration_ms"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mos_core::FilterValue;

    #[test]
    fn errors_only() {
        let mut list = ExecutionEntry::seeded_list().unwrap();
        list.set_filter("outcome", FilterValue::Equals("error".into()))
            .unwrap();
        assert_eq!(list.visible_ids(), vec![RecordId::Num(6), RecordId::Num(3)]);
    }

    #[test]
    fn log_rows_have_no_status_action() {
        let mut list = ExecutionEntry::seeded_list().unwrap();
        assert!(!list.mutate_status(&RecordId::Num(1), ()));
        assert!(list.status_counts().is_empty());
    }
}
