//! Audit log of user actions across modules.

use chrono::{DateTime, Utc};
use mos_core::{BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value};
use serde::{Deserialize, Serialize};

use crate::page::{Page, PageRecord};
use crate::severity::{at, Severity};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: i64,
    pub action: String,
    pub user: String,
    pub module: String,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
}

impl Record for AuditEntry {
    type Status = ();

    fn id(&self) -> RecordId {
        RecordId::Num(self.id)
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::Int(self.id)),
            "action" => Some(self.action.as_str().into()),
            "user" => Some(self.user.as_str().into()),
            "module" => Some(self.module.as_str().into()),
            "severity" => Some(self.severity.label().into()),
            "timestamp" => Some(Value::Timestamp(self.timestamp)),
            _ => None,
        }
    }
}

impl PageRecord for AuditEntry {
    const PAGE: Page = Page::Audit;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "severity").then(|| self.severity.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("action", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("user", FieldKind::Text).searchable().filterable().sortable())
            .with_field(FieldDef::new("module", FieldKind::Text).filterable().sortable())
            .with_field(FieldDef::new("severity", FieldKind::Status).filterable())
            .with_field(FieldDef::new("timestamp", FieldKind::Timestamp).sortable())
            .with_default_sort("timestamp", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let entry = |id: i64,
                     action: &str,
                     user: &str,
                     module: &str,
                     severity: Severity,
                     timestamp: DateTime<Utc>| AuditEntry {
            id,
            action: action.to_string(),
            user: user.to_string(),
            module: module.to_string(),
            severity,
            timestamp,
        };
        vec![
            entry(1, "Approved draft #3", "maya@acme.io", "content", Severity::Low, at(2024, 3, 1, 16, 5)),
            entry(2, "Revoked token Legacy Zapier", "devon@acme.io", "settings", Severity::High, at(2024, 3, 2, 9, 12)),
            entry(3, "Edited guardrail Tone floor", "maya@acme.io", "governance", Severity::Medium, at(2024, 3, 3, 13, 47)),
            entry(4, "Exported signal report", "li@acme.io", "signals", Severity::Low, at(2024, 3, 4, 10, 30)),
            entry(5, "Disabled guardrail PII scrub", "devon@acme.io", "governance", Severity::Critical, at(2024, 3, 4, 18, 2)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["timestamp", "user", "action", "module", "severity"]
    }
}
