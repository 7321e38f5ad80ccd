//! mos-core: the filterable record list behind every Marketing OS page.
//!
//! A page is a collection of [`Record`]s plus a [`ListSchema`] naming which
//! fields are searchable, filterable and sortable. [`RecordList`] derives the
//! visible rows from a [`ListQuery`] (search, then filters, then a stable
//! sort), tracks a selection, and applies status changes one record or one
//! selection at a time.

pub mod error;
pub mod event;
pub mod list;
pub mod query;
pub mod record;
pub mod schema;
pub mod status;

pub use error::*;
pub use event::*;
pub use list::*;
pub use query::*;
pub use record::*;
pub use schema::*;
pub use status::*;
