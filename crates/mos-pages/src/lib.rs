//! mos-pages: the record types behind each Marketing OS list page.
//!
//! Every page is a [`PageRecord`]: a typed row implementing
//! [`mos_core::Record`], the [`mos_core::ListSchema`] that says which of its
//! fields are searchable, filterable and sortable, and the seed collection
//! the page mounts with.

pub mod audit;
pub mod draft;
pub mod entity;
pub mod error;
pub mod error_log;
pub mod execution;
pub mod guardrail;
pub mod page;
pub mod severity;
pub mod signal;
pub mod token;

pub use audit::AuditEntry;
pub use draft::{Draft, DraftStatus};
pub use entity::{Entity, SyncStatus};
pub use error::PageError;
pub use error_log::{ErrorEntry, ErrorStatus};
pub use execution::{ExecutionEntry, Outcome};
pub use guardrail::{Guardrail, GuardrailStatus};
pub use page::{Page, PageRecord};
pub use severity::Severity;
pub use signal::{Signal, SignalStatus, SignalType};
pub use token::{ApiToken, TokenStatus};
