use serde::{Deserialize, Serialize};

use crate::record::RecordId;

/// Events emitted by a record list when its collection changes.
///
/// Query and selection changes are not collection changes and emit nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListEvent {
    Added(RecordId),
    Removed(RecordId),
    StatusChanged(RecordId),
    Replaced(RecordId),
    Reloaded { count: usize },
}
