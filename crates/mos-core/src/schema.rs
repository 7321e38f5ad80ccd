use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ListError;
use crate::query::{SortDescriptor, SortDirection};

/// How a field's values are matched and ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Number,
    Timestamp,
    /// Closed enumeration; equality filters compare labels case-insensitively.
    Status,
    /// List of tags; a tag-set filter matches if any element is selected.
    Tags,
}

/// A field a list page knows how to search, filter or sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub kind: FieldKind,
    pub searchable: bool,
    pub filterable: bool,
    pub sortable: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            searchable: false,
            filterable: false,
            sortable: false,
        }
    }

    pub fn searchable(mut self) -> Self {
        self.searchable = true;
        self
    }

    pub fn filterable(mut self) -> Self {
        self.filterable = true;
        self
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }
}

/// Per-page configuration of a record list.
///
/// Fields not declared here are invisible to search, filters and sort even if
/// the record exposes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSchema {
    pub name: String,
    pub fields: Vec<FieldDef>,
    pub default_sort: Option<SortDescriptor>,
}

impl ListSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            default_sort: None,
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_default_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.default_sort = Some(SortDescriptor {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn searchable_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| f.searchable)
    }

    /// Look up a field that may be filtered on.
    pub fn filterable(&self, name: &str) -> Result<&FieldDef, ListError> {
        let def = self
            .field(name)
            .ok_or_else(|| ListError::UnknownField(name.to_string()))?;
        if !def.filterable {
            return Err(ListError::NotFilterable(name.to_string()));
        }
        Ok(def)
    }

    /// Look up a field that may be sorted on.
    pub fn sortable(&self, name: &str) -> Result<&FieldDef, ListError> {
        let def = self
            .field(name)
            .ok_or_else(|| ListError::UnknownField(name.to_string()))?;
        if !def.sortable {
            return Err(ListError::NotSortable(name.to_string()));
        }
        Ok(def)
    }

    /// Reject duplicate field names and a default sort on an unsortable field.
    pub fn validate(&self) -> Result<(), ListError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ListError::DuplicateField {
                    list: self.name.clone(),
                    field: field.name.clone(),
                });
            }
        }
        if let Some(sort) = &self.default_sort {
            self.sortable(&sort.field)?;
        }
        Ok(())
    }
}
