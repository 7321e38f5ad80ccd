use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::ListError;
use crate::event::ListEvent;
use crate::query::{derive_visible, FilterValue, ListQuery, SortDescriptor, SortDirection};
use crate::record::{Record, RecordId, Value};
use crate::schema::ListSchema;

/// In-memory view-model behind every list page.
///
/// Holds the collection, the query the visible list is derived from, and a
/// selection of ids. The visible list is recomputed on every read, so it
/// always reflects the latest mutation.
#[derive(Debug)]
pub struct RecordList<R: Record> {
    schema: ListSchema,
    records: Vec<R>,
    query: ListQuery,
    selection: BTreeSet<RecordId>,
    sort_reset: SortDirection,
    subscribers: Vec<Sender<ListEvent>>,
}

impl<R: Record> RecordList<R> {
    /// Create a list over a seed collection. Ids must be unique.
    pub fn new(schema: ListSchema, seed: Vec<R>) -> Result<Self, ListError> {
        schema.validate()?;
        ensure_unique(&seed)?;
        let query = ListQuery {
            sort: schema.default_sort.clone(),
            ..Default::default()
        };
        Ok(Self {
            schema,
            records: seed,
            query,
            selection: BTreeSet::new(),
            sort_reset: SortDirection::Asc,
            subscribers: Vec::new(),
        })
    }

    /// Direction used when `toggle_sort` switches to a new key.
    pub fn with_sort_reset(mut self, direction: SortDirection) -> Self {
        self.sort_reset = direction;
        self
    }

    pub fn schema(&self) -> &ListSchema {
        &self.schema
    }

    pub fn query(&self) -> &ListQuery {
        &self.query
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&R> {
        self.records.iter().find(|r| r.id() == *id)
    }

    /// Subscribe to collection changes.
    pub fn subscribe(&mut self) -> Receiver<ListEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn emit(&mut self, event: ListEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    // Query

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.query.search = text.into();
    }

    /// Set one filter dimension. `FilterValue::All` clears it.
    pub fn set_filter(&mut self, key: &str, value: FilterValue) -> Result<(), ListError> {
        self.schema.filterable(key)?;
        match value {
            FilterValue::All => {
                self.query.filters.remove(key);
            }
            value => {
                self.query.filters.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Toggle one tag in a tag-set filter.
    ///
    /// With no active filter on `key`, every tag present in the collection
    /// starts out selected, so the first toggle deselects `tag`.
    pub fn toggle_tag(&mut self, key: &str, tag: &str) -> Result<(), ListError> {
        self.schema.filterable(key)?;
        let mut selected = match self.query.filters.get(key) {
            Some(FilterValue::AnyOf(set)) => set.clone(),
            Some(FilterValue::Equals(v)) => BTreeSet::from([v.display()]),
            Some(FilterValue::All) | None => self.tag_domain(key),
        };
        if !selected.remove(tag) {
            selected.insert(tag.to_string());
        }
        self.query
            .filters
            .insert(key.to_string(), FilterValue::AnyOf(selected));
        Ok(())
    }

    /// Every distinct value of `key` across the collection.
    pub fn tag_domain(&self, key: &str) -> BTreeSet<String> {
        let mut domain = BTreeSet::new();
        for record in &self.records {
            match record.field(key) {
                Some(Value::List(items)) => domain.extend(items.iter().map(Value::display)),
                Some(Value::Null) | None => {}
                Some(v) => {
                    domain.insert(v.display());
                }
            }
        }
        domain
    }

    pub fn clear_filters(&mut self) {
        self.query.filters.clear();
    }

    pub fn set_sort(&mut self, key: &str, direction: SortDirection) -> Result<(), ListError> {
        self.schema.sortable(key)?;
        self.query.sort = Some(SortDescriptor {
            field: key.to_string(),
            direction,
        });
        Ok(())
    }

    /// Column-header behaviour: the same key flips direction, a new key
    /// starts at the configured reset direction.
    pub fn toggle_sort(&mut self, key: &str) -> Result<SortDirection, ListError> {
        self.schema.sortable(key)?;
        let direction = match &self.query.sort {
            Some(current) if current.field == key => current.direction.flipped(),
            _ => self.sort_reset,
        };
        self.query.sort = Some(SortDescriptor {
            field: key.to_string(),
            direction,
        });
        Ok(direction)
    }

    pub fn clear_sort(&mut self) {
        self.query.sort = None;
    }

    // Derived view

    pub fn visible(&self) -> Vec<&R> {
        derive_visible(&self.records, &self.schema, &self.query)
    }

    pub fn visible_ids(&self) -> Vec<RecordId> {
        self.visible().into_iter().map(|r| r.id()).collect()
    }

    pub fn visible_page(&self, offset: usize, limit: usize) -> Vec<&R> {
        self.visible().into_iter().skip(offset).take(limit).collect()
    }

    /// Record count per status label, over the whole collection.
    ///
    /// Reads the `status` field; records without one are not counted.
    pub fn status_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            if let Some(status) = record.field("status").filter(|v| !v.is_null()) {
                *counts.entry(status.display()).or_insert(0) += 1;
            }
        }
        counts
    }

    // Selection

    /// Returns whether `id` is selected afterwards.
    pub fn toggle_select(&mut self, id: &RecordId) -> bool {
        if self.selection.remove(id) {
            false
        } else {
            self.selection.insert(id.clone());
            true
        }
    }

    /// Select exactly the currently visible ids.
    pub fn select_all(&mut self) {
        self.selection = self.visible_ids().into_iter().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: &RecordId) -> bool {
        self.selection.contains(id)
    }

    pub fn selected_ids(&self) -> Vec<RecordId> {
        self.selection.iter().cloned().collect()
    }

    // Mutation

    /// Set one record's status. An unknown id is skipped without error.
    pub fn mutate_status(&mut self, id: &RecordId, status: R::Status) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == *id) else {
            tracing::debug!(list = %self.schema.name, %id, "skipping status change for unknown record");
            return false;
        };
        if !record.set_status(status.clone()) {
            tracing::debug!(list = %self.schema.name, %id, "record has no status");
            return false;
        }
        tracing::debug!(list = %self.schema.name, %id, ?status, "status changed");
        self.emit(ListEvent::StatusChanged(id.clone()));
        true
    }

    /// Apply a status to every selected record, then clear the selection.
    ///
    /// Returns the ids that changed, in collection order.
    pub fn apply_bulk_action(&mut self, status: R::Status) -> Vec<RecordId> {
        let targets: Vec<RecordId> = self
            .records
            .iter()
            .map(|r| r.id())
            .filter(|id| self.selection.contains(id))
            .collect();
        let changed: Vec<RecordId> = targets
            .into_iter()
            .filter(|id| self.mutate_status(id, status.clone()))
            .collect();
        tracing::debug!(list = %self.schema.name, count = changed.len(), "bulk action applied");
        self.selection.clear();
        changed
    }

    pub fn add(&mut self, record: R) -> Result<(), ListError> {
        let id = record.id();
        if self.get(&id).is_some() {
            return Err(ListError::DuplicateId(id));
        }
        tracing::debug!(list = %self.schema.name, %id, "record added");
        self.records.push(record);
        self.emit(ListEvent::Added(id));
        Ok(())
    }

    /// Delete a record. Also drops it from the selection.
    pub fn remove(&mut self, id: &RecordId) -> Option<R> {
        let index = self.records.iter().position(|r| r.id() == *id)?;
        let record = self.records.remove(index);
        self.selection.remove(id);
        tracing::debug!(list = %self.schema.name, %id, "record removed");
        self.emit(ListEvent::Removed(id.clone()));
        Some(record)
    }

    /// Swap in a new version of an existing record, keeping its position.
    pub fn replace(&mut self, record: R) -> bool {
        let id = record.id();
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            tracing::debug!(list = %self.schema.name, %id, "skipping replace for unknown record");
            return false;
        };
        *slot = record;
        self.emit(ListEvent::Replaced(id));
        true
    }

    /// Replace the whole collection, keeping the query. Selected ids that no
    /// longer exist are dropped.
    pub fn replace_all(&mut self, records: Vec<R>) -> Result<(), ListError> {
        ensure_unique(&records)?;
        let ids: HashSet<RecordId> = records.iter().map(|r| r.id()).collect();
        self.selection.retain(|id| ids.contains(id));
        self.records = records;
        tracing::info!(list = %self.schema.name, count = self.records.len(), "collection reloaded");
        let count = self.records.len();
        self.emit(ListEvent::Reloaded { count });
        Ok(())
    }
}

fn ensure_unique<R: Record>(records: &[R]) -> Result<(), ListError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        let id = record.id();
        if !seen.insert(id.clone()) {
            return Err(ListError::DuplicateId(id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::DynamicRecord;
    use crate::schema::{FieldDef, FieldKind};

    fn schema() -> ListSchema {
        ListSchema::new("drafts")
            .with_field(FieldDef::new("title", FieldKind::Text).searchable().sortable())
            .with_field(FieldDef::new("status", FieldKind::Status).filterable().sortable())
            .with_field(FieldDef::new("tone", FieldKind::Number).sortable())
    }

    fn draft(id: i64, title: &str, status: &str, tone: i64) -> DynamicRecord {
        DynamicRecord::new(id)
            .with_status(status)
            .with_field("title", title)
            .with_field("tone", tone)
    }

    fn seeded() -> RecordList<DynamicRecord> {
        RecordList::new(
            schema(),
            vec![
                draft(1, "Spring promo", "Pending", 80),
                draft(2, "Webinar invite", "Pending", 65),
                draft(3, "Churn survey", "Approved", 91),
            ],
        )
        .unwrap()
    }

    fn id(n: i64) -> RecordId {
        RecordId::Num(n)
    }

    #[test]
    fn duplicate_seed_ids_rejected() {
        let err = RecordList::new(schema(), vec![draft(1, "a", "Pending", 1), draft(1, "b", "Pending", 2)])
            .unwrap_err();
        assert_eq!(err, ListError::DuplicateId(id(1)));
    }

    #[test]
    fn default_sort_applies_on_creation() {
        let list = RecordList::new(
            schema().with_default_sort("tone", SortDirection::Desc),
            vec![draft(1, "a", "Pending", 10), draft(2, "b", "Pending", 20)],
        )
        .unwrap();
        assert_eq!(list.visible_ids(), vec![id(2), id(1)]);
    }

    #[test]
    fn filter_all_sentinel_clears_dimension() {
        let mut list = seeded();
        list.set_filter("status", FilterValue::Equals("Approved".into()))
            .unwrap();
        assert_eq!(list.visible_ids(), vec![id(3)]);
        list.set_filter("status", FilterValue::All).unwrap();
        assert_eq!(list.visible().len(), 3);
        assert!(list.query().filters.is_empty());
    }

    #[test]
    fn filter_on_unfilterable_field_fails() {
        let mut list = seeded();
        assert_eq!(
            list.set_filter("title", FilterValue::Equals("x".into())),
            Err(ListError::NotFilterable("title".into()))
        );
    }

    #[test]
    fn toggle_sort_flips_then_resets() {
        let mut list = seeded();
        assert_eq!(list.toggle_sort("tone").unwrap(), SortDirection::Asc);
        assert_eq!(list.visible_ids(), vec![id(2), id(1), id(3)]);
        assert_eq!(list.toggle_sort("tone").unwrap(), SortDirection::Desc);
        assert_eq!(list.visible_ids(), vec![id(3), id(1), id(2)]);
        assert_eq!(list.toggle_sort("title").unwrap(), SortDirection::Asc);
    }

    #[test]
    fn clear_sort_restores_collection_order() {
        let mut list = seeded();
        list.set_sort("tone", SortDirection::Desc).unwrap();
        assert_eq!(list.visible_ids(), vec![id(3), id(1), id(2)]);
        list.clear_sort();
        assert_eq!(list.query().sort, None);
        assert_eq!(list.visible_ids(), vec![id(1), id(2), id(3)]);
        // The next toggle starts from the reset direction again.
        assert_eq!(list.toggle_sort("tone").unwrap(), SortDirection::Asc);
    }

    #[test]
    fn configured_sort_reset_direction() {
        let mut list = seeded().with_sort_reset(SortDirection::Desc);
        assert_eq!(list.toggle_sort("title").unwrap(), SortDirection::Desc);
        assert_eq!(list.toggle_sort("title").unwrap(), SortDirection::Asc);
    }

    #[test]
    fn mutate_unknown_id_is_noop() {
        let mut list = seeded();
        let before = list.records().to_vec();
        assert!(!list.mutate_status(&id(99), "Approved".into()));
        assert_eq!(list.records(), before.as_slice());
    }

    #[test]
    fn bulk_action_applies_to_selection_then_clears() {
        let mut list = seeded();
        list.set_filter("status", FilterValue::Equals("Pending".into()))
            .unwrap();
        list.select_all();
        assert_eq!(list.selected_ids(), vec![id(1), id(2)]);

        let changed = list.apply_bulk_action("Approved".into());
        assert_eq!(changed, vec![id(1), id(2)]);
        assert!(list.selected_ids().is_empty());
        assert!(list.visible().is_empty());
    }

    #[test]
    fn selection_survives_filtering() {
        let mut list = seeded();
        list.toggle_select(&id(3));
        list.set_filter("status", FilterValue::Equals("Pending".into()))
            .unwrap();
        assert!(list.is_selected(&id(3)));
        assert!(!list.visible_ids().contains(&id(3)));
        assert!(!list.toggle_select(&id(3)));
    }

    #[test]
    fn add_and_remove() {
        let mut list = seeded();
        assert_eq!(
            list.add(draft(2, "dup", "Pending", 0)),
            Err(ListError::DuplicateId(id(2)))
        );
        list.add(draft(4, "Holiday teaser", "Pending", 70)).unwrap();
        assert_eq!(list.len(), 4);

        list.toggle_select(&id(4));
        let removed = list.remove(&id(4)).unwrap();
        assert_eq!(removed.id, id(4));
        assert!(!list.is_selected(&id(4)));
        assert!(list.remove(&id(4)).is_none());
    }

    #[test]
    fn replace_all_prunes_selection() {
        let mut list = seeded();
        list.select_all();
        list.set_search_text("promo");
        list.replace_all(vec![draft(1, "Spring promo v2", "Pending", 80)])
            .unwrap();
        assert_eq!(list.selected_ids(), vec![id(1)]);
        assert_eq!(list.visible_ids(), vec![id(1)]);
    }

    #[test]
    fn status_counts_over_collection() {
        let mut list = seeded();
        list.set_filter("status", FilterValue::Equals("Approved".into()))
            .unwrap();
        let counts = list.status_counts();
        assert_eq!(counts.get("Pending"), Some(&2));
        assert_eq!(counts.get("Approved"), Some(&1));
    }

    #[test]
    fn pagination_over_visible_list() {
        let list = seeded();
        let page: Vec<RecordId> = list.visible_page(1, 5).iter().map(|r| r.id()).collect();
        assert_eq!(page, vec![id(2), id(3)]);
        assert!(list.visible_page(3, 5).is_empty());
    }

    #[test]
    fn events_are_emitted_for_collection_changes() {
        let mut list = seeded();
        let rx = list.subscribe();
        list.set_search_text("x");
        list.mutate_status(&id(1), "Rejected".into());
        list.mutate_status(&id(42), "Rejected".into());
        list.remove(&id(2));
        let events: Vec<ListEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![ListEvent::StatusChanged(id(1)), ListEvent::Removed(id(2))]
        );
    }

    #[test]
    fn dropped_subscriber_is_forgotten() {
        let mut list = seeded();
        drop(list.subscribe());
        list.mutate_status(&id(1), "Rejected".into());
        assert!(list.subscribers.is_empty());
    }
}
