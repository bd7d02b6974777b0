//! Performance benchmarks for the catalog search engine.
//!
//! Covers the two hot paths: one-time engine construction (fit + index build)
//! and the per-query pipeline (transform + k-NN scan + ranking).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use appleverse::engine::SearchEngine;
use appleverse::types::CatalogRecord;

const CULTIVAR_STEMS: [&str; 10] = [
    "Gala", "Fuji", "Braeburn", "Jonathan", "Delicious", "Pippin", "Russet", "Spitzenburg",
    "Winesap", "Gravenstein",
];
const COUNTRIES: [&str; 5] = ["United States", "New Zealand", "Japan", "England", "Canada"];

/// Generate a deterministic synthetic catalog of the given size
fn generate_catalog(size: usize) -> Vec<CatalogRecord> {
    (0..size)
        .map(|i| CatalogRecord {
            id: format!("mal{:05}", i),
            cultivar_name: format!("{} {}", CULTIVAR_STEMS[i % CULTIVAR_STEMS.len()], i),
            accession: format!("mal{:05}", i),
            origin_country: COUNTRIES[i % COUNTRIES.len()].to_string(),
            origin_province: String::new(),
            origin_city: String::new(),
            pedigree: format!(
                "{} x {}",
                CULTIVAR_STEMS[(i + 3) % CULTIVAR_STEMS.len()],
                CULTIVAR_STEMS[(i + 7) % CULTIVAR_STEMS.len()]
            ),
            genus: "Malus".to_string(),
            species: "domestica".to_string(),
            images: Vec::new(),
        })
        .collect()
}

fn bench_engine_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_build");

    for size in [100, 1_000, 5_000] {
        let catalog = generate_catalog(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &catalog, |b, catalog| {
            b.iter(|| SearchEngine::build(black_box(catalog.clone())).unwrap())
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for size in [100, 1_000, 5_000] {
        let engine = SearchEngine::build(generate_catalog(size)).unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("exact_match", size), &engine, |b, engine| {
            b.iter(|| engine.search(black_box("Gala 10"), black_box(5)).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("free_text", size), &engine, |b, engine| {
            b.iter(|| {
                engine
                    .search(black_box("delicious united states winesap"), black_box(5))
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_engine_build, bench_search);
criterion_main!(benches);
