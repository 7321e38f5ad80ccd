use std::future::Future;

use mos_core::{Record, RecordId, RecordList};
use tokio::sync::watch;

use crate::error::SourceError;
use crate::source::{Patch, RecordSource};

/// Held by the mounted view. Dropping it (or calling `cancel`) abandons any
/// pending round trip of the controller it was created with.
#[derive(Debug)]
pub struct MountGuard {
    tx: watch::Sender<bool>,
}

impl MountGuard {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Result of a bulk action against a source.
#[derive(Debug, Default, PartialEq)]
pub struct BulkOutcome {
    pub applied: Vec<RecordId>,
    pub failed: Vec<(RecordId, SourceError)>,
}

impl BulkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Binds a record list to its source: loads into it and pushes edits through
/// the source before applying the stored result locally.
pub struct ListController<R: Record, S> {
    list: RecordList<R>,
    source: S,
    mounted: watch::Receiver<bool>,
}

impl<R, S> ListController<R, S>
where
    R: Record + Send + Sync + 'static,
    R::Status: Send + Sync,
    S: RecordSource<R>,
{
    pub fn mount(list: RecordList<R>, source: S) -> (Self, MountGuard) {
        let (tx, rx) = watch::channel(false);
        let controller = Self {
            list,
            source,
            mounted: rx,
        };
        (controller, MountGuard { tx })
    }

    pub fn list(&self) -> &RecordList<R> {
        &self.list
    }

    /// Query and selection edits are local and synchronous.
    pub fn list_mut(&mut self) -> &mut RecordList<R> {
        &mut self.list
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run a round trip unless the view unmounts first.
    async fn guarded<T, F>(&self, fut: F) -> Result<T, SourceError>
    where
        F: Future<Output = Result<T, SourceError>>,
    {
        let mut mounted = self.mounted.clone();
        tokio::select! {
            biased;
            _ = unmounted(&mut mounted) => Err(SourceError::Cancelled),
            result = fut => result,
        }
    }

    /// Replace the list's collection with the source's. Returns the record count.
    pub async fn load(&mut self) -> Result<usize, SourceError> {
        let records = self.guarded(self.source.load()).await?;
        self.list.replace_all(records)?;
        tracing::info!(list = %self.list.schema().name, count = self.list.len(), "Loaded records");
        Ok(self.list.len())
    }

    /// Change one record's status through the source.
    ///
    /// An id the list does not hold is skipped: `Ok(false)`, no round trip.
    pub async fn mutate_status(&mut self, id: &RecordId, status: R::Status) -> Result<bool, SourceError> {
        self.patch(id, Patch::Status(status)).await
    }

    pub async fn patch(&mut self, id: &RecordId, patch: Patch<R::Status>) -> Result<bool, SourceError> {
        if self.list.get(id).is_none() {
            tracing::debug!(%id, "skipping patch for unknown record");
            return Ok(false);
        }
        let record = self.guarded(self.source.mutate(id, patch)).await?;
        Ok(self.list.replace(record))
    }

    /// Push a status to every selected record, one round trip each, then
    /// clear the selection whatever the outcome.
    pub async fn apply_bulk_action(&mut self, status: R::Status) -> BulkOutcome {
        let targets = self.list.selected_ids();
        let mut outcome = BulkOutcome::default();
        let mut remaining = targets.into_iter();

        while let Some(id) = remaining.next() {
            match self.patch(&id, Patch::Status(status.clone())).await {
                Ok(true) => outcome.applied.push(id),
                Ok(false) => {}
                Err(SourceError::Cancelled) => {
                    outcome.failed.push((id, SourceError::Cancelled));
                    outcome
                        .failed
                        .extend(remaining.by_ref().map(|id| (id, SourceError::Cancelled)));
                }
                Err(e) => {
                    tracing::warn!(%id, "Bulk action failed: {}", e);
                    outcome.failed.push((id, e));
                }
            }
        }

        self.list.clear_selection();
        tracing::debug!(
            applied = outcome.applied.len(),
            failed = outcome.failed.len(),
            "Bulk action finished"
        );
        outcome
    }
}

/// Resolves once the guard cancels or is dropped.
async fn unmounted(mounted: &mut watch::Receiver<bool>) {
    loop {
        if *mounted.borrow_and_update() {
            return;
        }
        if mounted.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SimulatedSource;
    use mos_core::{DynamicRecord, FieldDef, FieldKind, ListSchema};
    use std::time::Duration;

    fn seed() -> Vec<DynamicRecord> {
        vec![
            DynamicRecord::new(1).with_status("Pending"),
            DynamicRecord::new(2).with_status("Pending"),
        ]
    }

    fn controller(latency: Duration) -> (ListController<DynamicRecord, SimulatedSource<DynamicRecord>>, MountGuard) {
        let schema = ListSchema::new("drafts")
            .with_field(FieldDef::new("status", FieldKind::Status).filterable());
        let list = RecordList::new(schema, Vec::new()).unwrap();
        ListController::mount(list, SimulatedSource::new(seed(), latency))
    }

    #[tokio::test]
    async fn load_fills_list() {
        let (mut c, _guard) = controller(Duration::ZERO);
        assert_eq!(c.load().await.unwrap(), 2);
        assert_eq!(c.list().len(), 2);
    }

    #[tokio::test]
    async fn unknown_id_is_skipped_without_round_trip() {
        let (mut c, _guard) = controller(Duration::ZERO);
        c.load().await.unwrap();
        c.source().set_offline(true);
        assert_eq!(
            c.mutate_status(&RecordId::Num(9), "Approved".into()).await,
            Ok(false)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_guard_cancels_pending_load() {
        let (mut c, guard) = controller(Duration::from_millis(500));
        drop(guard);
        assert_eq!(c.load().await, Err(SourceError::Cancelled));
        assert!(c.list().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_mid_flight() {
        let (mut c, guard) = controller(Duration::from_millis(500));
        let (result, _) = tokio::join!(c.load(), async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            guard.cancel();
        });
        assert_eq!(result, Err(SourceError::Cancelled));
        assert!(c.list().is_empty());
    }
}
