//! Error log with resolve action.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::page::{Page, PageRecord};
use crate::severity::{at, Severity};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorStatus {
    Open,
    Resolved,
}

impl StatusEnum for ErrorStatus {
    fn all() -> &'static [Self] {
        &[Self::Open, Self::Resolved]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Resolved => "Resolved",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Open => BadgeTone::Negative,
            Self::Resolved => BadgeTone::Positive,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    /// Display id, e.g. `ERR-1042`.
    pub id: String,
    pub message: String,
    pub module: String,
    pub severity: Severity,
    pub status: ErrorStatus,
    pub occurred: DateTime<Utc>,
}

impl Record for ErrorEntry {
    type Status = ErrorStatus;

    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "message" => Some(self.message.as_str().into()),
            "module" => Some(self.module.as_str().into()),
            "severity" => Some(self.severity.label().into()),
            "status" => Some(self.status.label().into()),
            "occurred" => Some(Value::Timestamp(self.occurred)),
            _ => None,
        }
    }

    fn status(&self) -> Option<ErrorStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: ErrorStatus) -> bool {
        self.status = status;
        true
    }
}

impl PageRecord for ErrorEntry {
    const PAGE: Page = Page::Errors;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        match column {
            "severity" => Some(self.severity.tone()),
            "status" => Some(self.status.tone()),
            _ => None,
        }
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("id", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("message", FieldKind::Text).searchable())
            .with_field(FieldDef::new("module", FieldKind::Text).filterable().sortable())
            .with_field(FieldDef::new("severity", FieldKind::Status).filterable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable())
            .with_field(FieldDef::new("occurred", FieldKind::Timestamp).sortable())
            .with_default_sort("occurred", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let error = |id: &str,
                     message: &str,
                     module: &str,
                     severity: Severity,
                     status: ErrorStatus,
                     occurred: DateTime<Utc>| ErrorEntry {
            id: id.to_string(),
            message: message.to_string(),
            module: module.to_string(),
            severity,
            status,
            occurred,
        };
        vec![
            error("ERR-1040", "CRM webhook timed out", "integrations", Severity::High, ErrorStatus::Open, at(2024, 3, 5, 6, 41)),
            error("ERR-1041", "Template variable {first_name} missing", "content", Severity::Medium, ErrorStatus::Open, at(2024, 3, 4, 22, 13)),
            error("ERR-1042", "Ad budget sync rejected", "signals", Severity::Critical, ErrorStatus::Open, at(2024, 3, 4, 15, 0)),
            error("ERR-1039", "Export quota exceeded", "reports", Severity::Low, ErrorStatus::Resolved, at(2024, 3, 2, 9, 55)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["id", "message", "module", "severity", "status", "occurred"]
    }

    fn parse_status(label: &str) -> Option<ErrorStatus> {
        ErrorStatus::parse(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mos_core::FilterValue;

    #[test]
    fn resolve_open_critical() {
        let mut list = ErrorEntry::seeded_list().unwrap();
        list.set_filter("severity", FilterValue::Equals("critical".into()))
            .unwrap();
        list.select_all();
        let changed = list.apply_bulk_action(ErrorStatus::Resolved);
        assert_eq!(changed, vec![RecordId::Text("ERR-1042".into())]);
        assert_eq!(list.status_counts().get("Open"), Some(&2));
    }
}
