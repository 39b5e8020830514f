//! Registry benchmarks
//!
//! Measures the hot paths a client hits per request (`pick`, `snapshot`)
//! and the cost of membership churn (`add` followed by close notifications).
//!
//! Run with: cargo bench --bench registry_benchmarks

use connection_registry::{CloseHandler, CloseNotifier, Connection, ConnectionRegistry};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

#[derive(Clone)]
struct BenchConnection {
    closed: Arc<CloseNotifier>,
}

impl BenchConnection {
    fn new() -> Self {
        Self {
            closed: Arc::new(CloseNotifier::new()),
        }
    }
}

impl Connection for BenchConnection {
    fn on_closed(&self, handler: CloseHandler) {
        self.closed.subscribe(handler);
    }
}

fn populated(size: usize) -> ConnectionRegistry<BenchConnection> {
    let registry = ConnectionRegistry::new();
    registry.add((0..size).map(|_| BenchConnection::new()));
    registry
}

// ============================================================================
// Selection
// ============================================================================

fn pick_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pick");

    for size in [1usize, 8, 64, 512] {
        let registry = populated(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| black_box(registry.pick().ok()));
        });
    }

    group.finish();
}

// ============================================================================
// Snapshots
// ============================================================================

fn snapshot_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");

    for size in [8usize, 64, 512] {
        let registry = populated(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &registry, |b, registry| {
            b.iter(|| black_box(registry.snapshot()));
        });
    }

    group.finish();
}

// ============================================================================
// Membership churn
// ============================================================================

fn churn_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("churn");

    for batch in [1usize, 16, 128] {
        group.throughput(Throughput::Elements(batch as u64));
        group.bench_with_input(
            BenchmarkId::new("add_then_close", batch),
            &batch,
            |b, &batch| {
                let registry = populated(32);
                b.iter(|| {
                    let connections: Vec<BenchConnection> =
                        (0..batch).map(|_| BenchConnection::new()).collect();
                    registry.add(connections.clone());
                    for conn in &connections {
                        conn.closed.notify_closed();
                    }
                    black_box(registry.len())
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, pick_benchmarks, snapshot_benchmarks, churn_benchmarks);
criterion_main!(benches);
