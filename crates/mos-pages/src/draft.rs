//! Content drafts awaiting approval.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};

use crate::error::{required, PageError};
use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DraftStatus {
    Pending,
    Approved,
    Rejected,
}

impl StatusEnum for DraftStatus {
    fn all() -> &'static [Self] {
        &[Self::Pending, Self::Approved, Self::Rejected]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Pending => BadgeTone::Warning,
            Self::Approved => BadgeTone::Positive,
            Self::Rejected => BadgeTone::Negative,
        }
    }
}

/// A generated piece of copy under review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: i64,
    pub title: String,
    pub channel: String,
    /// Brand-tone match, 0 to 100.
    pub tone_score: i64,
    pub status: DraftStatus,
    pub updated: DateTime<Utc>,
}

impl Draft {
    /// A new pending draft. The title must not be blank.
    pub fn new(id: i64, title: &str, channel: &str, now: DateTime<Utc>) -> Result<Self, PageError> {
        Ok(Self {
            id,
            title: required("title", title)?,
            channel: required("channel", channel)?,
            tone_score: 0,
            status: DraftStatus::Pending,
            updated: now,
        })
    }
}

impl Record for Draft {
    type Status = DraftStatus;

    fn id(&self) -> RecordId {
        RecordId::Num(self.id)
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(Value::Int(self.id)),
            "title" => Some(self.title.as_str().into()),
            "channel" => Some(self.channel.as_str().into()),
            "tone_score" => Some(Value::Int(self.tone_score)),
            "status" => Some(self.status.label().into()),
            "updated" => Some(Value::Timestamp(self.updated)),
            _ => None,
        }
    }

    fn status(&self) -> Option<DraftStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: DraftStatus) -> bool {
        self.status = status;
        true
    }

    fn set_field(&mut self, key: &str, value: Value) -> bool {
        match (key, value) {
            ("title", Value::Text(title)) if !title.trim().is_empty() => {
                self.title = title;
                true
            }
            _ => false,
        }
    }
}

impl PageRecord for Draft {
    const PAGE: Page = Page::Drafts;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "status").then(|| self.status.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("title", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("channel", FieldKind::Text).searchable().filterable())
            .with_field(FieldDef::new("tone_score", FieldKind::Number).sortable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("updated", FieldKind::Timestamp).sortable())
            .with_default_sort("updated", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let draft = |id: i64,
                     title: &str,
                     channel: &str,
                     tone_score: i64,
                     status: DraftStatus,
                     updated: DateTime<Utc>| Draft {
            id,
            title: title.to_string(),
            channel: channel.to_string(),
            tone_score,
            status,
            updated,
        };
        vec![
            draft(1, "Spring launch announcement", "email", 92, DraftStatus::Pending, at(2024, 3, 4, 9, 15)),
            draft(2, "Feature teaser thread", "social", 78, DraftStatus::Pending, at(2024, 3, 4, 11, 40)),
            draft(3, "Customer story: Northwind", "blog", 88, DraftStatus::Approved, at(2024, 3, 1, 16, 5)),
            draft(4, "Win-back offer", "email", 61, DraftStatus::Rejected, at(2024, 2, 27, 8, 0)),
            draft(5, "Webinar reminder", "email", 84, DraftStatus::Pending, at(2024, 3, 5, 7, 30)),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["id", "title", "channel", "tone_score", "status", "updated"]
    }

    fn parse_status(label: &str) -> Option<DraftStatus> {
        DraftStatus::parse(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mos_core::FilterValue;

    #[test]
    fn seed_is_valid_and_newest_first() {
        let list = Draft::seeded_list().unwrap();
        let ids = list.visible_ids();
        assert_eq!(ids.first(), Some(&RecordId::Num(5)));
        assert_eq!(ids.last(), Some(&RecordId::Num(4)));
    }

    #[test]
    fn approve_and_reject() {
        let mut list = Draft::seeded_list().unwrap();
        assert!(list.mutate_status(&RecordId::Num(1), DraftStatus::Approved));
        assert!(list.mutate_status(&RecordId::Num(2), DraftStatus::Rejected));
        list.set_filter("status", FilterValue::Equals("pending".into()))
            .unwrap();
        assert_eq!(list.visible_ids(), vec![RecordId::Num(5)]);
    }

    #[test]
    fn blank_title_rejected() {
        let now = at(2024, 3, 6, 0, 0);
        assert_eq!(
            Draft::new(9, "  ", "email", now),
            Err(PageError::EmptyField("title"))
        );
        let d = Draft::new(9, "Promo", "email", now).unwrap();
        assert_eq!(d.status, DraftStatus::Pending);
    }

    #[test]
    fn title_edit_keeps_other_fields() {
        let mut d = Draft::seed().remove(0);
        let before = d.clone();
        assert!(d.set_field("title", "Spring launch v2".into()));
        assert!(!d.set_field("title", "".into()));
        assert!(!d.set_field("status", "Approved".into()));
        assert_eq!(d.title, "Spring launch v2");
        assert_eq!(d.status, before.status);
        assert_eq!(d.tone_score, before.tone_score);
    }
}
