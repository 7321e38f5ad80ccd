//! Governance guardrails: add, toggle, delete.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::error::{required, PageError};
use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuardrailStatus {
    Active,
    Inactive,
}

impl GuardrailStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

impl StatusEnum for GuardrailStatus {
    fn all() -> &'static [Self] {
        &[Self::Active, Self::Inactive]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Positive,
            Self::Inactive => BadgeTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardrail {
    pub id: i64,
    pub name: String,
    pub rule: String,
    pub module: String,
    pub status: GuardrailStatus,
    pub created: DateTime<Utc>,
}

impl Guardrail {
    /// A new active guardrail. Name and rule must not be blank.
    pub fn new(
        id: i64,
        name: &str,
        rule: &str,
        module: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, PageError> {
        Ok(Self {
            id,
            name: required("name", name)?,
            rule: required("rule", rule)?,
            module: module.trim().to_string(),
            status: GuardrailStatus::Active,
            created: now,
        })
    }
}

impl Record for Guardrail {
    type Status = GuardrailStatus;

    fn id(&self) -> RecordId {
        RecordId::Num(self.id)
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::Int(self.id)),
            "name" => Some(self.name.as_str().into()),
            "rule" => Some(self.rule.as_str().into()),
            "module" => Some(self.module.as_str().into()),
            "status" => Some(self.status.label().into()),
            "created" => Some(Value::Timestamp(self.created)),
            _ => None,
        }
    }

    fn status(&self) -> Option<GuardrailStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: GuardrailStatus) -> bool {
        self.status = status;
        true
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value) {
            ("rule", Value::Text(rule)) if !rule.trim().is_empty() => {
                self.rule = rule;
                true
            }
            _ => false,
        }
    }
}

impl PageRecord for Guardrail {
    const PAGE: Page = Page::Guardrails;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "status").then(|| self.status.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("name", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("rule", FieldKind::Text).searchable())
            .with_field(FieldDef::new("module", FieldKind::Text).filterable().sortable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("created", FieldKind::Timestamp).sortable())
            .with_default_sort("created", SortDirection::Asc)
    }

    fn seed() -> Vec<Self> {
        let guardrail = |id: i64,
                         name: &str,
                         rule: &str,
                         module: &str,
                         status: GuardrailStatus,
                         created: DateTime<Utc>| Guardrail {
            id,
            name: name.to_string(),
            rule: rule.to_string(),
            module: module.to_string(),
            status,
            created,
        };
        vec![
            guardrail(1, "Tone floor", "Block drafts with tone score below 60", "content", GuardrailStatus::Active, at(2024, 1, 8, 9, 0)),
            guardrail(2, "PII scrub", "Redact emails and phone numbers from prompts", "governance", GuardrailStatus::Inactive, at(2024, 1, 15, 14, 30)),
            guardrail(3, "Spend cap", "Pause ad actions above $5,000/day", "signals", GuardrailStatus::Active, at(2024, 2, 1, 10, 0)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "rule", "module", "status"]
    }

    fn parse_status(label: &str) -> Option<GuardrailStatus> {
        GuardrailStatus::parse(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_toggle_delete() {
        let mut list = Guardrail::seeded_list().unwrap();
        let g = Guardrail::new(4, "Claims check", "Flag unverifiable superlatives", "content", at(2024, 3, 6, 9, 0))
            .unwrap();
        list.add(g).unwrap();
        assert_eq!(list.visible_ids().last(), Some(&RecordId::Num(4)));

        let id = RecordId::Num(2);
        let next = list.get(&id).unwrap().status.toggled();
        assert!(list.mutate_status(&id, next));
        assert_eq!(list.get(&id).unwrap().status, GuardrailStatus::Active);

        assert!(list.remove(&RecordId::Num(4)).is_some());
        assert_eq!(list.status_counts().get("Active"), Some(&3));
    }

    #[test]
    fn blank_rule_rejected() {
        let now = at(2024, 3, 6, 9, 0);
        assert_eq!(
            Guardrail::new(5, "Empty", " ", "content", now),
            Err(PageError::EmptyField("rule"))
        );
    }
}
