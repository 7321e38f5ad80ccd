use crate::record::RecordId;

/// Errors from list configuration and collection edits.
///
/// Status mutation has no error path: an unknown id is skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListError {
    #[error("Record already exists: {0}")]
    DuplicateId(RecordId),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field '{0}' is not filterable")]
    NotFilterable(String),

    #[error("Field '{0}' is not sortable")]
    NotSortable(String),

    #[error("Duplicate field name '{field}' in list '{list}'")]
    DuplicateField { list: String, field: String },
}
