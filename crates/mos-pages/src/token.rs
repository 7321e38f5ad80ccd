//! API tokens: issue, revoke, delete.

use chrono::{DateTime, Utc};
use mos_core::{
    BadgeTone, FieldDef, FieldKind, ListSchema, Record, RecordId, SortDirection, StatusEnum, Value,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{required, PageError};
use crate::page::{Page, PageRecord};
use crate::severity::at;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenStatus {
    Active,
    Revoked,
}

impl StatusEnum for TokenStatus {
    fn all() -> &'static [Self] {
        &[Self::Active, Self::Revoked]
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Revoked => "Revoked",
        }
    }

    fn tone(&self) -> BadgeTone {
        match self {
            Self::Active => BadgeTone::Positive,
            Self::Revoked => BadgeTone::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: String,
    pub name: String,
    pub scopes: Vec<String>,
    /// Masked key shown in the table; the secret itself is never stored.
    pub prefix: String,
    pub status: TokenStatus,
    pub created: DateTime<Utc>,
    pub last_used: Option<DateTime<Utc>>,
}

impl ApiToken {
    /// Issue a new active token. The name must not be blank.
    pub fn issue(name: &str, scopes: &[&str], now: DateTime<Utc>) -> Result<Self, PageError> {
        let name = required("name", name)?;
        let key = Uuid::new_v4().simple().to_string();
        Ok(Self {
            id: format!("tok_{}", &key[..12]),
            name,
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            prefix: format!("mos_{}…", &key[12..18]),
            status: TokenStatus::Active,
            created: now,
            last_used: None,
        })
    }
}

impl Record for ApiToken {
    type Status = TokenStatus;

    fn id(&self) -> RecordId {
        RecordId::Text(self.id.clone())
    }

    fn field(&self, key: &str) -> Option<Value> {
        match key {
            "id" => Some(self.id.as_str().into()),
            "name" => Some(self.name.as_str().into()),
            "scopes" => Some(Value::List(
                self.scopes.iter().map(|s| s.as_str().into()).collect(),
            )),
            "prefix" => Some(self.prefix.as_str().into()),
            "status" => Some(self.status.label().into()),
            "created" => Some(Value::Timestamp(self.created)),
            "last_used" => Some(self.last_used.into()),
            _ => None,
        }
    }

    fn status(&self) -> Option<TokenStatus> {
        Some(self.status)
    }

    fn set_status(&mut self, status: TokenStatus) -> bool {
        self.status = status;
        true
    }
}

impl PageRecord for ApiToken {
    const PAGE: Page = Page::Tokens;

    fn badge(&self, column: &str) -> Option<BadgeTone> {
        (column == "status").then(|| self.status.tone())
    }

    fn schema() -> ListSchema {
        ListSchema::new(Self::PAGE.slug())
            .with_field(FieldDef::new("name", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("scopes", FieldKind::Tags).searchable().filterable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("created", FieldKind::Timestamp).sortable())
            .with_field(FieldDef::new("last_used", FieldKind::Timestamp).sortable())
            .with_default_sort("created", SortDirection::Desc)
    }

    fn seed() -> Vec<Self> {
        let token = |id: &str,
                     name: &str,
                     scopes: &[&str],
                     status: TokenStatus,
                     created: DateTime<Utc>,
                     last_used: Option<DateTime<Utc>>| ApiToken {
            id: id.to_string(),
            name: name.to_string(),
            scopes: scopes.iter().map(|s| s.to_string()).collect(),
            prefix: format!("mos_{}…", &id[4..]),
            status,
            created,
            last_used,
        };
        vec![
            token("tok_7f3a91", "Production CRM sync", &["read", "write"], TokenStatus::Active, at(2024, 1, 12, 10, 0), Some(at(2024, 3, 5, 7, 58))),
            token("tok_b2c4d0", "Analytics export", &["read"], TokenStatus::Active, at(2024, 2, 2, 15, 30), Some(at(2024, 3, 4, 23, 10))),
            token("tok_0e9d17", "Legacy Zapier", &["read", "write", "admin"], TokenStatus::Revoked, at(2023, 11, 20, 9, 0), None),
        ]
    }

    fn columns() -> &'static [&'static str] {
        &["name", "prefix", "scopes", "status", "created", "last_used"]
    }

    fn parse_status(label: &str) -> Option<TokenStatus> {
        TokenStatus::parse(label)
    }
}
