

use fixtures::AssetFixture;
use tower::Service;

use crate::tracker::{
    api::InvocationResponse, error::TrackerError, init_tracker, services::ledger::MemoryLedger,
};

#[tokio::test]
async fn integration_custody_scenario() {
    // A1: created by alice in NY, handed over to bob in LA, then removed
    //
    // ABSENT --write--> EXISTS(1 event) --update--> EXISTS(2 events) --delete--> ABSENT
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let mut tracker = init_tracker(MemoryLedger::new());
    let asset = AssetFixture::new("A1");

    create_asset!(tracker, asset);
    let record = fetch_asset!(tracker, asset);
    assert_eq!(record.trace_history.len(), 1);
    assert!(record.children().is_empty());
    assert_eq!(record.trace_history[0].owner, "alice");
    assert_eq!(record.trace_history[0].status, "shipped");
    assert_eq!(record.trace_history[0].move_date_time, "2024-01-01T00:00Z");
    assert_eq!(record.trace_history[0].location, "NY");
    assert_eq!(record.trace_history[0].geo_location, "40.7,-74.0");
    assert_eq!(record.information().asset_name, "Aspirin");
    assert_eq!(record.information().company, "Acme");
    assert_eq!(record.information().packing_type, "blister");
    assert_eq!(record.information().package_size, "100ct");
    assert_eq!(record.information().mfg_date, "2024-01-01");
    assert_eq!(record.information().lot_number, "LOT1");
    assert_eq!(record.information().expiry_date, "2026-01-01");

    append_trace!(tracker, asset, "bob");
    let record = fetch_asset!(tracker, asset);
    assert_eq!(record.trace_history.len(), 2);
    assert_eq!(record.trace_history[1].owner, "bob");
    assert_eq!(record.trace_history[1].status, "received");

    delete_asset!(tracker, asset);
    assert_not_found!(tracker, asset);
}

#[tokio::test]
async fn integration_independent_assets() {
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let ledger = MemoryLedger::new();
    let mut tracker = init_tracker(ledger.clone());
    let pallet = AssetFixture::new("P1").with_child("B1", "box").with_child("B2", "box");
    let box1 = AssetFixture::new("B1");
    let box2 = AssetFixture::new("B2");

    create_asset!(tracker, pallet);
    create_asset!(tracker, box1);
    create_asset!(tracker, box2);
    assert_eq!(ledger.len(), 3);

    append_trace!(tracker, box1, "bob");
    delete_asset!(tracker, box2);

    // Child references are weak: deleting a child leaves the parent untouched
    let record = fetch_asset!(tracker, pallet);
    assert_eq!(record.children().len(), 2);
    assert_eq!(record.trace_history.len(), 1);
    assert_eq!(fetch_asset!(tracker, box1).trace_history.len(), 2);
    assert_not_found!(tracker, box2);
}

#[tokio::test]
async fn integration_concurrent_distinct_assets() {
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let ledger = MemoryLedger::new();
    let tracker = init_tracker(ledger.clone());

    let handles = (0..16)
        .map(|i| {
            let mut tracker = tracker.clone();
            tokio::spawn(async move {
                let asset = AssetFixture::new(&format!("A{i}"));
                create_asset!(tracker, asset);
                append_trace!(tracker, asset, "bob");
                append_trace!(tracker, asset, "carol");
                fetch_asset!(tracker, asset)
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let record = handle.await.unwrap();
        assert_eq!(
            record.trace_history.iter().map(|e| e.owner.as_str()).collect::<Vec<_>>(),
            vec!["alice", "bob", "carol"]
        );
    }
    assert_eq!(ledger.len(), 16);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn integration_concurrent_appends_same_asset() {
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let ledger = MemoryLedger::new();
    let mut tracker = init_tracker(ledger.clone());
    let asset = AssetFixture::new("A1");
    create_asset!(tracker, asset);

    let handles = (0..200)
        .map(|i| {
            let mut tracker = tracker.clone();
            tokio::spawn(async move {
                let asset = AssetFixture::new("A1");
                append_trace!(tracker, asset, &format!("owner-{i}"));
            })
        })
        .collect::<Vec<_>>();
    for handle in handles {
        handle.await.unwrap();
    }

    // Every acknowledged append is kept, none overwritten by a concurrent one
    let record = fetch_asset!(tracker, asset);
    assert_eq!(record.trace_history.len(), 201);
    assert_eq!(record.trace_history[0].owner, "alice");
    let mut owners =
        record.trace_history[1..].iter().map(|e| e.owner.to_owned()).collect::<Vec<_>>();
    owners.sort();
    let mut expected = (0..200).map(|i| format!("owner-{i}")).collect::<Vec<_>>();
    expected.sort();
    assert_eq!(owners, expected);
    assert_eq!(ledger.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn integration_concurrent_creates_same_asset() {
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let mut tracker = init_tracker(MemoryLedger::new());

    let handles = (0..32)
        .map(|i| {
            let mut tracker = tracker.clone();
            tokio::spawn(async move {
                let mut args = AssetFixture::new("A1").write_args();
                args[4] = format!("owner-{i}");
                invoke!(tracker, "write", args)
            })
        })
        .collect::<Vec<_>>();

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(response) => {
                assert_eq!(response, InvocationResponse::Empty);
                created += 1;
            }
            Err(e) => assert_eq!(e, TrackerError::AlreadyExists("A1".to_string())),
        }
    }
    assert_eq!(created, 1);

    // The single winner's seed event is the whole history
    let record = fetch_asset!(tracker, AssetFixture::new("A1"));
    assert_eq!(record.trace_history.len(), 1);
    assert!(record.trace_history[0].owner.starts_with("owner-"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn integration_concurrent_deletes_same_asset() {
    #[cfg(feature = "tracker_tracing")]
    crate::tracker_tracing::init();
    let ledger = MemoryLedger::new();
    let mut tracker = init_tracker(ledger.clone());
    let asset = AssetFixture::new("A1");
    create_asset!(tracker, asset);

    let handles = (0..16)
        .map(|_| {
            let mut tracker = tracker.clone();
            tokio::spawn(async move { invoke!(tracker, "delete", vec!["A1".to_string()]) })
        })
        .collect::<Vec<_>>();

    let mut deleted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => deleted += 1,
            Err(e) => assert_eq!(e, TrackerError::NotFound("A1".to_string())),
        }
    }
    assert_eq!(deleted, 1);
    assert!(ledger.is_empty());
}
