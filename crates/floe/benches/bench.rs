use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use floe::{SnowflakeGenerator, WallClock};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn bench_single_thread(c: &mut Criterion) {
    let mut group = c.benchmark_group("generator/single");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for _ in 0..iters {
                let generator = SnowflakeGenerator::new(1, 1, WallClock::default())
                    .expect("valid identity");
                for _ in 0..TOTAL_IDS {
                    black_box(generator.generate_id().expect("clock should not regress"));
                }
            }
            start.elapsed()
        })
    });

    group.finish();
}

fn bench_contended(c: &mut Criterion) {
    let threads = 4;
    let mut group = c.benchmark_group("generator/contended");
    group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));

    group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
        b.iter_custom(|iters| {
            let mut total = std::time::Duration::ZERO;
            for _ in 0..iters {
                let generator = Arc::new(
                    SnowflakeGenerator::new(1, 1, WallClock::default()).expect("valid identity"),
                );
                let barrier = Arc::new(Barrier::new(threads));

                let start = Instant::now();
                scope(|s| {
                    for _ in 0..threads {
                        let generator = Arc::clone(&generator);
                        let barrier = Arc::clone(&barrier);
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..TOTAL_IDS {
                                black_box(
                                    generator.generate_id().expect("clock should not regress"),
                                );
                            }
                        });
                    }
                });
                total += start.elapsed();
            }
            total
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_thread, bench_contended);
criterion_main!(benches);
