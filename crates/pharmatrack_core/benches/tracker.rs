use criterion::{Criterion, black_box, criterion_group, criterion_main};
use pharmatrack_core::tracker::{
    api::{Invocation, LedgerRequest, LifecycleRequest},
    infrastructure::{
        arguments::{NewAsset, TraceUpdate},
        asset::{AssetRecord, TraceEvent},
    },
    init_tracker,
    services::{ledger::MemoryLedger, lifecycle::LifecycleService},
};
use tower::Service;

// Helper functions for creating test data
fn create_args(id: &str, child_count: usize) -> Vec<String> {
    let mut args: Vec<String> = [
        id,
        "box",
        "drug",
        "classA",
        "alice",
        "shipped",
        "2024-01-01T00:00Z",
        "NY",
        "40.7,-74.0",
        "Aspirin",
        "Acme",
        "blister",
        "100ct",
        "2024-01-01",
        "LOT1",
        "2026-01-01",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    for i in 0..child_count {
        args.push(format!("{id}-C{i}"));
        args.push("vial".to_string());
    }
    args
}

fn trace_event(i: usize) -> TraceEvent {
    TraceEvent::new(
        format!("owner-{i}"),
        "received".to_string(),
        "2024-01-05T00:00Z".to_string(),
        "LA".to_string(),
        "34.0,-118.2".to_string(),
    )
}

fn record_with_history(len: usize) -> AssetRecord {
    let mut record = AssetRecord::from(NewAsset::from_args("write", create_args("A1", 8)).unwrap());
    for i in 0..len {
        record.append_trace_event(trace_event(i));
    }
    record
}

fn bench_record_encode(c: &mut Criterion) {
    let record = record_with_history(100);
    c.bench_function("record_encode_100_events", |b| {
        b.iter(|| black_box(record.encode().unwrap()));
    });
}

fn bench_record_decode(c: &mut Criterion) {
    let bytes = record_with_history(100).encode().unwrap();
    c.bench_function("record_decode_100_events", |b| {
        b.iter(|| black_box(AssetRecord::decode(&bytes).unwrap()));
    });
}

fn bench_dispatch_create(c: &mut Criterion) {
    c.bench_function("dispatch_create", |b| {
        b.to_async(tokio::runtime::Runtime::new().unwrap()).iter(|| async {
            let mut tracker = init_tracker(MemoryLedger::new());
            let _ = black_box(tracker.call(Invocation::new("write", create_args("A1", 4))).await);
        });
    });
}

fn bench_lifecycle_append_long_history(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let ledger = MemoryLedger::new();
    let lifecycle = LifecycleService::new(ledger.clone());
    runtime.block_on(async {
        let mut ledger = ledger.clone();
        let record = record_with_history(1000);
        ledger
            .call(LedgerRequest::Put { key: "A1".to_string(), value: record.encode().unwrap() })
            .await
            .unwrap();
    });

    c.bench_function("lifecycle_append_after_1000_events", |b| {
        b.to_async(&runtime).iter(|| {
            let mut lifecycle = lifecycle.clone();
            async move {
                let _ = black_box(
                    lifecycle
                        .call(LifecycleRequest::AppendTraceEvent(TraceUpdate {
                            asset_id: "A1".to_string(),
                            event: trace_event(0),
                        }))
                        .await,
                );
            }
        });
    });

    c.bench_function("lifecycle_fetch", |b| {
        b.to_async(&runtime).iter(|| {
            let mut lifecycle = lifecycle.clone();
            async move {
                let _ = black_box(lifecycle.call(LifecycleRequest::Fetch("A1".to_string())).await);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_record_encode,
    bench_record_decode,
    bench_dispatch_create,
    bench_lifecycle_append_long_history
);
criterion_main!(benches);
