use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use flakeid::{FlakeGenerator, NodeId, SystemClock, TimeSource};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

struct FixedMockTime {
    nanos: u64,
}

impl TimeSource for FixedMockTime {
    fn current_nanos(&self) -> u64 {
        self.nanos
    }
}

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

const NODE: NodeId = NodeId::new([0x02, 0x42, 0xac, 0x11, 0x00, 0x02]);

/// Benchmarks the hot path where the clock never moves and the counter never
/// runs out.
fn bench_fixed_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();

            for _ in 0..iters {
                let generator = FlakeGenerator::from_components(
                    NODE,
                    0,
                    0,
                    FixedMockTime {
                        nanos: 1_700_000_000_000_000_000,
                    },
                );
                for _ in 0..TOTAL_IDS {
                    black_box(generator.next_id().unwrap());
                }
            }

            start.elapsed()
        });
    });

    group.finish();
}

/// Benchmarks generation against the wall clock.
fn bench_system_clock(c: &mut Criterion) {
    let mut group = c.benchmark_group("system_clock");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = FlakeGenerator::from_components(NODE, 0, 0, SystemClock);
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.next_id().unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks one shared generator contended by several threads.
fn bench_contended(c: &mut Criterion) {
    let threads = num_cpus::get().clamp(2, 8);
    let mut group = c.benchmark_group(format!("contended/threads/{threads}"));
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let generator = FlakeGenerator::from_components(NODE, 0, 0, SystemClock);
            let barrier = Arc::new(Barrier::new(threads + 1));
            let mut elapsed = core::time::Duration::ZERO;

            for _ in 0..iters {
                let start = scope(|s| {
                    for _ in 0..threads {
                        let generator = generator.clone();
                        let barrier = Arc::clone(&barrier);
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(generator.next_id().unwrap());
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                elapsed += start.elapsed();
            }

            elapsed
        });
    });

    group.finish();
}

#[cfg(feature = "base32")]
fn bench_base32(c: &mut Criterion) {
    let mut group = c.benchmark_group("base32");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    let generator = FlakeGenerator::from_components(NODE, 0, 0, SystemClock);
    let ids: Vec<_> = (0..TOTAL_IDS)
        .map(|_| generator.next_id().unwrap())
        .collect();

    group.bench_function("encode", |b| {
        b.iter(|| {
            let mut buf = [0_u8; flakeid::BASE32_LEN];
            for id in &ids {
                id.encode_to_buf(&mut buf);
                black_box(&buf);
            }
        });
    });

    group.finish();
}

#[cfg(feature = "base32")]
criterion_group!(
    benches,
    bench_fixed_clock,
    bench_system_clock,
    bench_contended,
    bench_base32
);
#[cfg(not(feature = "base32"))]
criterion_group!(benches, bench_fixed_clock, bench_system_clock, bench_contended);
criterion_main!(benches);
