//! # Read-Path Benchmarks
//!
//! Hot loops under committer-shaped load:
//!
//! - push into a full buffer (every push evicts)
//! - tail range queries (the common subscriber pattern)
//! - suffix range queries (cold subscribers catching up)
//! - driving a long suspension chain through the resolver loop

use std::collections::BTreeSet;
use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::Rng;

use lc_01_event_buffer::{EventsBuffer, NullMetricsSink};
use lc_02_continuations::{run, LedgerResolvers, Outcome, VisibleByKey};
use shared_types::{
    ContractId, ContractInstance, GlobalKeyWithMaintainers, Package, PackageId, Party,
};

const BUFFER_SIZE: usize = 10_000;
const CHUNK_SIZE: usize = 100;

fn full_buffer() -> EventsBuffer<u64, [u8; 32]> {
    let buffer = EventsBuffer::new(BUFFER_SIZE, Arc::new(NullMetricsSink), CHUNK_SIZE);
    for offset in 1..=BUFFER_SIZE as u64 {
        buffer.push(offset, [0xAB; 32]).unwrap();
    }
    buffer
}

fn bench_push_at_capacity(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_push");
    group.throughput(Throughput::Elements(1));

    group.bench_function("push_evicting", |b| {
        let buffer = full_buffer();
        let mut offset = BUFFER_SIZE as u64;
        b.iter(|| {
            offset += 1;
            buffer.push(black_box(offset), black_box([0xCD; 32])).unwrap();
        });
    });

    group.finish();
}

fn bench_slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("buffer_slice");
    let buffer = full_buffer();
    let top = BUFFER_SIZE as u64;

    group.bench_function("tail_window", |b| {
        let mut rng = rand::thread_rng();
        b.iter(|| {
            let start = rng.gen_range(top - 500..top - 100);
            let slice = buffer.slice(&black_box(start), &top, |entry| Some(entry[0]));
            black_box(slice)
        });
    });

    group.bench_function("suffix_from_beginning", |b| {
        b.iter(|| {
            let slice = buffer.slice(&black_box(0), &top, |entry| Some(entry[0]));
            black_box(slice)
        });
    });

    group.finish();
}

/// Constant resolvers: every lookup hits, nothing allocates beyond clones.
struct StaticResolvers {
    package: Package,
}

impl LedgerResolvers for StaticResolvers {
    fn contract(&self, _id: &ContractId) -> Option<ContractInstance> {
        None
    }

    fn package(&self, _id: &PackageId) -> Option<Package> {
        Some(self.package.clone())
    }

    fn contract_id_by_key(&self, _key: &GlobalKeyWithMaintainers) -> Option<ContractId> {
        None
    }

    fn local_key_visible(&self, _stakeholders: &BTreeSet<Party>) -> VisibleByKey {
        VisibleByKey::Visible
    }
}

fn bench_drive_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("continuation_drive");
    let resolvers = StaticResolvers {
        package: Package::new("bench", "1.0.0"),
    };

    fn chain(depth: u32, acc: u32) -> Outcome<u32> {
        if depth == 0 {
            Outcome::Done(acc)
        } else {
            Outcome::need_package(PackageId::new("p"), move |_| chain(depth - 1, acc + 1))
        }
    }

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("thousand_suspensions", |b| {
        b.iter(|| run(chain(black_box(1_000), 0), &resolvers).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_push_at_capacity, bench_slice, bench_drive_chain);
criterion_main!(benches);
