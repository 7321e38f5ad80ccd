use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mos_core::{Record, RecordId, Value};
use tokio::sync::Mutex;

use crate::config::SourceConfig;
use crate::error::SourceError;

/// Change to apply to one record at the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Patch<S> {
    Status(S),
    Field(String, Value),
}

/// Where a list page gets its records from and sends its edits to.
///
/// A real backend implements this over its API client; pages only see the
/// collection and the updated record.
#[async_trait]
pub trait RecordSource<R>: Send + Sync
where
    R: Record + Send + Sync + 'static,
    R::Status: Send + Sync,
{
    /// Fetch the full collection.
    async fn load(&self) -> Result<Vec<R>, SourceError>;

    /// Apply a patch and return the record as stored afterwards.
    async fn mutate(&self, id: &RecordId, patch: Patch<R::Status>) -> Result<R, SourceError>;
}

#[async_trait]
impl<R, T> RecordSource<R> for Arc<T>
where
    R: Record + Send + Sync + 'static,
    R::Status: Send + Sync,
    T: RecordSource<R> + ?Sized,
{
    async fn load(&self) -> Result<Vec<R>, SourceError> {
        (**self).load().await
    }

    async fn mutate(&self, id: &RecordId, patch: Patch<R::Status>) -> Result<R, SourceError> {
        (**self).mutate(id, patch).await
    }
}

/// In-memory source that answers after a fixed delay.
pub struct SimulatedSource<R> {
    records: Mutex<Vec<R>>,
    latency: Duration,
    offline: AtomicBool,
}

impl<R: Record> SimulatedSource<R> {
    pub fn new(seed: Vec<R>, latency: Duration) -> Self {
        Self {
            records: Mutex::new(seed),
            latency,
            offline: AtomicBool::new(false),
        }
    }

    pub fn from_config(seed: Vec<R>, config: &SourceConfig) -> Self {
        Self::new(seed, config.latency())
    }

    /// While offline every call fails with `SourceError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    async fn round_trip(&self) -> Result<(), SourceError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.offline.load(Ordering::SeqCst) {
            return Err(SourceError::Unavailable("simulated backend is offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R> RecordSource<R> for SimulatedSource<R>
where
    R: Record + Send + Sync + 'static,
    R::Status: Send + Sync,
{
    async fn load(&self) -> Result<Vec<R>, SourceError> {
        self.round_trip().await?;
        let records = self.records.lock().await;
        tracing::debug!(count = records.len(), "simulated load");
        Ok(records.clone())
    }

    async fn mutate(&self, id: &RecordId, patch: Patch<R::Status>) -> Result<R, SourceError> {
        self.round_trip().await?;
        let mut records = self.records.lock().await;
        let record = records
            .iter_mut()
            .find(|r| r.id() == *id)
            .ok_or_else(|| SourceError::NotFound(id.clone()))?;

        let applied = match patch {
            Patch::Status(status) => record.set_status(status),
            Patch::Field(key, value) => {
                if !record.set_field(&key, value) {
                    return Err(SourceError::Rejected {
                        id: id.clone(),
                        reason: format!("field '{}' is not editable", key),
                    });
                }
                true
            }
        };
        if !applied {
            return Err(SourceError::Rejected {
                id: id.clone(),
                reason: "record has no status".into(),
            });
        }
        tracing::debug!(%id, "simulated mutate");
        Ok(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mos_core::DynamicRecord;

    fn source() -> SimulatedSource<DynamicRecord> {
        SimulatedSource::new(
            vec![
                DynamicRecord::new(1).with_status("Pending").with_field("title", "a"),
                DynamicRecord::new(2).with_field("title", "b"),
            ],
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn load_returns_seed() {
        let records = source().load().await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn mutate_status_persists() {
        let src = source();
        let updated = src
            .mutate(&RecordId::Num(1), Patch::Status("Approved".into()))
            .await
            .unwrap();
        assert_eq!(updated.status.as_deref(), Some("Approved"));
        let reloaded = src.load().await.unwrap();
        assert_eq!(reloaded[0].status.as_deref(), Some("Approved"));
    }

    #[tokio::test]
    async fn unknown_id_and_read_only_field() {
        let src = source();
        assert_eq!(
            src.mutate(&RecordId::Num(9), Patch::Status("x".into()))
                .await
                .unwrap_err(),
            SourceError::NotFound(RecordId::Num(9))
        );
        let err = src
            .mutate(&RecordId::Num(1), Patch::Field("id".into(), Value::Int(5)))
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Rejected { .. }));
    }

    #[tokio::test]
    async fn offline_source_fails() {
        let src = source();
        src.set_offline(true);
        assert!(matches!(
            src.load().await,
            Err(SourceError::Unavailable(_))
        ));
        src.set_offline(false);
        assert!(src.load().await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn latency_is_applied() {
        let src = SimulatedSource::new(vec![DynamicRecord::new(1)], Duration::from_millis(400));
        let start = tokio::time::Instant::now();
        src.load().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(400));
    }
}
