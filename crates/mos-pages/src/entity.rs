//! Marketing entities mirrored from connected systems: sync and owner assignment.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncStatus {
    Synced,
    OutOfSync,
}

impl StatusEnum for SyncStatus {
    fn all() -> &'static [Self] {
        &[Self::Synced, Self::OutOfSync]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Synced => "Synced",
            Self::OutOfSync => "Out of Sync",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Synced => BadgeTone::Positive,
            Self::OutOfSync => BadgeTone::Warning,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub owner: Option<String>,
    pub status: SyncStatus,
    pub updated: DateTime<Utc>,
}

impl Record for Entity {
    type Status = SyncStatus;

    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "kind" => Some(self.kind.as_str().into()),
            "owner" => Some(self.owner.clone().into()),
            "status" => Some(self.status.label().into()),
            "updated" => Some(Value::Timestamp(self.updated)),
            _ => None,
        }
    }

    fn status(&self) -> Option<SyncStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: SyncStatus) -> bool {
        self.status = status;
        true
    }

    /// `owner` is assignable; `Null` unassigns.
    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value) {
            ("owner", Value::Text(owner)) if !owner.trim().is_empty() => {
                self.owner = Some(owner);
                true
            }
            ("owner", Value::Null) => {
                self.owner = None;
                true
            }
            _ => false,
        }
    }
}

impl PageRecord for Entity {
    const PAGE: Page = Page::Entities;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "status").then(|| self.status.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("name", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("kind", FieldKind::Text).filterable().sortable())
            .with_field(FieldDef::new("owner", FieldKind::Text).searchable().filterable().sortable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("updated", FieldKind::Timestamp).sortable())
            .with_default_sort("name", SortDirection::Asc)
    }

    fn seed() -> Vec<Self> {
        let entity = |id: &str,
                      name: &str,
                      kind: &str,
                      owner: Option<&str>,
                      status: SyncStatus,
                      updated: DateTime<Utc>| Entity {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            owner: owner.map(str::to_string),
            status,
            updated,
        };
        vec![
            entity("ENT-201", "Q2 Enterprise Push", "Campaign", Some("maya@acme.io"), SyncStatus::Synced, at(2024, 3, 4, 12, 0)),
            entity("ENT-202", "Churn-risk SMB", "Segment", None, SyncStatus::OutOfSync, at(2024, 3, 3, 8, 30)),
            entity("ENT-203", "Webinar Attendees", "Audience", Some("li@acme.io"), SyncStatus::Synced, at(2024, 3, 2, 19, 15)),
            entity("ENT-204", "Annual Upgrade Offer", "Campaign", None, SyncStatus::OutOfSync, at(2024, 2, 28, 11, 45)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "kind", "owner", "status", "updated"]
    }

    fn parse_status(label: &str) -> Option<SyncStatus> {
        SyncStatus::parse(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mos_core::FilterValue;

    #[test]
    fn sync_out_of_sync_entities() {
        let mut list = Entity::seeded_list().unwrap();
        list.set_filter("status", FilterValue::Equals("out of sync".into()))
            .unwrap();
        assert_eq!(list.visible().len(), 2);
        list.select_all();
        list.apply_bulk_action(SyncStatus::Synced);
        assert!(list.visible().is_empty());
        assert_eq!(SyncStatus::parse("OUT OF SYNC"), Some(SyncStatus::OutOfSync));
    }

    #[test]
    fn assign_and_unassign_owner() {
        let mut e = Entity::seed().remove(1);
        assert!(e.set_field("owner", "devon@acme.io".into()));
        assert_eq!(e.owner.as_deref(), Some("devon@acme.io"));
        assert!(e.set_field("owner", Value::Null));
        assert!(e.owner.is_none());
        assert!(!e.set_field("name", "Renamed".into()));
    }

    #[test]
    fn unowned_sort_first() {
        let mut list = Entity::seeded_list().unwrap();
        list.set_sort("owner", SortDirection::Asc).unwrap();
        let ids = list.visible_ids();
        assert_eq!(
            &ids[..2],
            &[RecordId::Text("ENT-202".into()), RecordId::Text("ENT-204".into())]
        );
    }
}
