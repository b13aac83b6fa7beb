/*!
 * Memory Map Benchmarks
 *
 * First-fit search cost on an empty map versus a fragmented one
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mlfq_dispatcher::resources::{MemoryMap, MemoryScope};

/// Map with every other `hole`-sized run occupied
fn fragmented(hole: usize) -> MemoryMap {
    let mut map = MemoryMap::new(1024, 960);
    while map.reserve(hole, MemoryScope::User).is_ok() {}
    let mut offset = 0;
    while offset + hole <= 960 {
        map.release(offset, hole);
        offset += hole * 2;
    }
    map
}

fn bench_first_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("first_fit");

    for hole in [4usize, 16, 64] {
        let empty = MemoryMap::new(1024, 960);
        let holes = fragmented(hole);

        group.bench_with_input(BenchmarkId::new("empty", hole), &hole, |b, &hole| {
            b.iter(|| empty.check(black_box(hole + 1), MemoryScope::User))
        });
        group.bench_with_input(BenchmarkId::new("fragmented", hole), &hole, |b, &hole| {
            b.iter(|| holes.check(black_box(hole + 1), MemoryScope::User))
        });
    }

    group.finish();
}

fn bench_reserve_release(c: &mut Criterion) {
    c.bench_function("reserve_release_64", |b| {
        let mut map = MemoryMap::new(1024, 960);
        b.iter(|| {
            let offset = map.reserve(black_box(64), MemoryScope::User).unwrap();
            map.release(offset, 64);
        })
    });
}

criterion_group!(benches, bench_first_fit, bench_reserve_release);
criterion_main!(benches);
