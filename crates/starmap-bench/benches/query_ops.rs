//! Criterion micro-benchmarks for catalog construction and queries.

use criterion::{criterion_group, criterion_main, Criterion};
use starmap_bench::{dense_universe, world_name, MILIEU};
use starmap_core::{HexPosition, SectorIndex, SectorOffset};
use starmap_query::Overlay;
use std::hint::black_box;

fn centre() -> HexPosition {
    HexPosition::from_sector(SectorIndex::new(0, 0), SectorOffset::new(16, 20))
}

/// Benchmark: build a 4x4-sector universe at 30% density (~6K worlds).
fn bench_build_universe(c: &mut Criterion) {
    c.bench_function("build_universe_4x4_30pct", |b| {
        b.iter(|| black_box(dense_universe(4, 30)));
    });
}

/// Benchmark: world lookup over every hex of one sector.
fn bench_world_at_sector(c: &mut Criterion) {
    let universe = dense_universe(4, 30);
    let view = Overlay::new(&universe, MILIEU, true);
    let sector = SectorIndex::new(0, 0);

    c.bench_function("world_at_sector_1280", |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for oy in 1..=40 {
                for ox in 1..=32 {
                    let hex = HexPosition::from_sector(sector, SectorOffset::new(ox, oy));
                    hits += usize::from(view.world_at(hex).is_some());
                }
            }
            black_box(hits)
        });
    });
}

/// Benchmark: radius 6 and radius 30 around the centre of a sector.
fn bench_radius(c: &mut Criterion) {
    let universe = dense_universe(4, 30);
    let view = Overlay::new(&universe, MILIEU, true);

    c.bench_function("worlds_in_radius_6", |b| {
        b.iter(|| black_box(view.worlds_in_radius(centre(), 6, None).count()));
    });
    c.bench_function("worlds_in_radius_30", |b| {
        b.iter(|| black_box(view.worlds_in_radius(centre(), 30, None).count()));
    });
}

/// Benchmark: flood fill through a 70%-dense map (one large component).
fn bench_flood(c: &mut Criterion) {
    let universe = dense_universe(2, 70);
    let view = Overlay::new(&universe, MILIEU, true);
    let start = view
        .worlds_in_radius(centre(), 3, None)
        .next()
        .map(|w| w.position())
        .unwrap_or_else(centre);

    c.bench_function("flood_dense_2x2", |b| {
        b.iter(|| black_box(view.flood(start, None).count()));
    });
}

/// Benchmark: location parsing across the three grammars.
fn bench_parse_location(c: &mut Criterion) {
    let universe = dense_universe(4, 30);
    let view = Overlay::new(&universe, MILIEU, true);
    let inputs = ["Sector 0:0 1620", "(516, -20)", "1, -1, 15, 19", "nowhere at all"];

    c.bench_function("parse_location_mixed", |b| {
        b.iter(|| {
            for text in &inputs {
                black_box(view.parse_location(text).is_ok());
            }
        });
    });
}

/// Benchmark: world search with prefix, hint and wildcard queries.
fn bench_search_worlds(c: &mut Criterion) {
    let universe = dense_universe(4, 30);
    let view = Overlay::new(&universe, MILIEU, true);
    let prefix = world_name(17)[..4].to_string();
    let hinted = format!("{} (Sector 0:0)", &world_name(3000)[..3]);

    c.bench_function("search_worlds_prefix", |b| {
        b.iter(|| black_box(view.search_worlds(&prefix, 25).len()));
    });
    c.bench_function("search_worlds_hint", |b| {
        b.iter(|| black_box(view.search_worlds(&hinted, 25).len()));
    });
    c.bench_function("search_worlds_wildcard_uncapped", |b| {
        b.iter(|| black_box(view.search_worlds("*or*", 0).len()));
    });
}

criterion_group!(
    benches,
    bench_build_universe,
    bench_world_at_sector,
    bench_radius,
    bench_flood,
    bench_parse_location,
    bench_search_worlds
);
criterion_main!(benches);
