//! Async data source layer for Marketing OS list pages
//!
//! A page's records come from a [`RecordSource`]: a load of the whole
//! collection and per-record patches. [`SimulatedSource`] stands in for the
//! backend with an in-memory collection and a fixed latency.
//!
//! [`ListController`] binds a `RecordList` to a source. Local query and
//! selection edits stay synchronous; status changes and bulk actions make a
//! round trip first and are applied from the stored result. Dropping the
//! [`MountGuard`] returned by `mount` abandons whatever is still in flight.
//!
//! [`MosConfig`] carries the latency, list defaults and log level.

pub mod config;
pub mod controller;
pub mod error;
pub mod source;

pub use config::{ListConfig, LoggingConfig, MosConfig, SourceConfig};
pub use controller::{BulkOutcome, ListController, MountGuard};
pub use error::{ConfigError, SourceError};
pub use source::{Patch, RecordSource, SimulatedSource};
