//! Benchmarks for similarity ranking
//!
//! Run with: cargo bench --package recommender
//!
//! Uses synthetic rows sized like the TMDB 5000 catalog, so no data files
//! are needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recommender::ranking::{rank, scan_window};
use recommender::SCAN_WINDOW;

const CATALOG_SIZE: usize = 4803;

/// Deterministic pseudo-scores in [0, 1) with plenty of ties
fn synthetic_row(size: usize, seed: usize) -> Vec<f64> {
    (0..size)
        .map(|i| ((i * 7919 + seed * 104_729) % 1000) as f64 / 1000.0)
        .collect()
}

fn bench_rank_row(c: &mut Criterion) {
    let row = synthetic_row(CATALOG_SIZE, 1);

    c.bench_function("rank_row", |b| {
        b.iter(|| {
            let ranked = rank(black_box(&row));
            black_box(ranked)
        })
    });
}

fn bench_rank_and_window(c: &mut Criterion) {
    let row = synthetic_row(CATALOG_SIZE, 2);

    c.bench_function("rank_and_scan_window", |b| {
        b.iter(|| {
            let ranked = rank(black_box(&row));
            let window = scan_window(&ranked, black_box(SCAN_WINDOW)).to_vec();
            black_box(window)
        })
    });
}

fn bench_parse_similarity(c: &mut Criterion) {
    let size = 300;
    let rows: Vec<Vec<f64>> = (0..size).map(|seed| synthetic_row(size, seed)).collect();
    let json = serde_json::to_string(&rows).expect("Failed to encode matrix");

    c.bench_function("parse_similarity_300", |b| {
        b.iter(|| {
            let matrix = catalog::parser::parse_similarity_str(black_box(&json), "similarity.json")
                .unwrap();
            black_box(matrix)
        })
    });
}

criterion_group!(
    benches,
    bench_rank_row,
    bench_rank_and_window,
    bench_parse_similarity
);
criterion_main!(benches);
