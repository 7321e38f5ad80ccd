//! Controller round trips against the simulated source with real page records.

use std::sync::Arc;
use std::time::Duration;

use mos_core::{FilterValue, RecordId, RecordList, SortDirection, Value};
use mos_pages::{Draft, DraftStatus, Entity, PageRecord, SyncStatus};
use mos_source::{ListController, MosConfig, Patch, SimulatedSource, SourceError};

fn empty_list<R: PageRecord>() -> RecordList<R> {
    RecordList::new(R::schema(), Vec::new()).unwrap()
}

#[tokio::test]
async fn bulk_approve_through_source() {
    let source = Arc::new(SimulatedSource::new(Draft::seed(), Duration::ZERO));
    let (mut controller, _guard) = ListController::mount(empty_list::<Draft>(), source.clone());
    controller.load().await.unwrap();

    let list = controller.list_mut();
    list.set_filter("status", FilterValue::Equals("Pending".into()))
        .unwrap();
    list.select_all();
    assert_eq!(list.selected_ids().len(), 3);

    let outcome = controller.apply_bulk_action(DraftStatus::Approved).await;
    assert!(outcome.is_complete());
    assert_eq!(outcome.applied.len(), 3);
    assert!(controller.list().selected_ids().is_empty());
    assert!(controller.list().visible().is_empty());

    // The source holds the approved state too.
    controller.load().await.unwrap();
    assert_eq!(controller.list().status_counts().get("Pending"), None);
}

#[tokio::test]
async fn offline_source_reports_every_failure_and_clears_selection() {
    let source = Arc::new(SimulatedSource::new(Draft::seed(), Duration::ZERO));
    let (mut controller, _guard) = ListController::mount(empty_list::<Draft>(), source.clone());
    controller.load().await.unwrap();

    controller.list_mut().toggle_select(&RecordId::Num(1));
    controller.list_mut().toggle_select(&RecordId::Num(2));
    source.set_offline(true);

    let outcome = controller.apply_bulk_action(DraftStatus::Rejected).await;
    assert!(outcome.applied.is_empty());
    assert_eq!(outcome.failed.len(), 2);
    assert!(outcome
        .failed
        .iter()
        .all(|(_, e)| matches!(e, SourceError::Unavailable(_))));
    assert!(controller.list().selected_ids().is_empty());
    assert_eq!(
        controller.list().get(&RecordId::Num(1)).unwrap().status,
        DraftStatus::Pending
    );
}

#[tokio::test]
async fn assign_entity_owner() {
    let source = SimulatedSource::new(Entity::seed(), Duration::ZERO);
    let (mut controller, _guard) = ListController::mount(empty_list::<Entity>(), source);
    controller.load().await.unwrap();

    let id = RecordId::Text("ENT-202".into());
    assert_eq!(
        controller
            .patch(&id, Patch::Field("owner".into(), Value::from("li@acme.io")))
            .await,
        Ok(true)
    );
    assert_eq!(
        controller.list().get(&id).unwrap().owner.as_deref(),
        Some("li@acme.io")
    );

    let err = controller
        .patch(&id, Patch::Field("name".into(), Value::from("x")))
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::Rejected { .. }));

    assert_eq!(controller.mutate_status(&id, SyncStatus::Synced).await, Ok(true));
}

#[tokio::test(start_paused = true)]
async fn unmount_during_bulk_action_cancels_the_rest() {
    let source = SimulatedSource::new(Draft::seed(), Duration::from_millis(300));
    let (mut controller, guard) = ListController::mount(empty_list::<Draft>(), source);
    controller.load().await.unwrap();
    controller.list_mut().select_all();

    let (outcome, _) = tokio::join!(
        controller.apply_bulk_action(DraftStatus::Approved),
        async {
            tokio::time::sleep(Duration::from_millis(450)).await;
            drop(guard);
        }
    );
    assert_eq!(outcome.applied.len(), 1);
    assert_eq!(outcome.failed.len(), 4);
    assert!(outcome
        .failed
        .iter()
        .all(|(_, e)| *e == SourceError::Cancelled));
}

#[tokio::test]
async fn config_drives_sort_reset_and_latency() {
    let config = MosConfig::from_toml(
        r#"
        [source]
        latency_ms = 0

        [list]
        sort_reset = "desc"
        "#,
    )
    .unwrap();
    let list = empty_list::<Draft>().with_sort_reset(config.list.sort_reset);
    let source = SimulatedSource::from_config(Draft::seed(), &config.source);
    let (mut controller, _guard) = ListController::mount(list, source);
    controller.load().await.unwrap();

    let direction = controller.list_mut().toggle_sort("tone_score").unwrap();
    assert_eq!(direction, SortDirection::Desc);
    assert_eq!(
        controller.list().visible_ids().first(),
        Some(&RecordId::Num(1))
    );
}
