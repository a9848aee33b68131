//! Benchmarks for ancestry resolution throughput.
//!
//! Run with: cargo bench -p gaz-ancestry

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use gaz_ancestry::AncestryResolver;
use gaz_place::{Place, PlaceId};
use gaz_test_utils::{admin, city};

/// One country, `states` ADM1s with ten ADM2s each, five towns per ADM2.
fn build_country(states: usize) -> Vec<Place> {
    let mut places = vec![admin(1, "BM")];
    let mut next = 1u32;
    let mut id = || {
        next += 1;
        next
    };

    for s in 0..states {
        let state = format!("BM.S{s}");
        places.push(admin(id(), &state));
        for k in 0..10 {
            let county = format!("{state}.K{k}");
            places.push(admin(id(), &county));
            for _ in 0..5 {
                places.push(city(id(), "Town", &county));
            }
        }
    }
    places
}

fn run(places: Vec<Place>) -> usize {
    let mut resolver = AncestryResolver::new();
    let mut emitted: Vec<PlaceId> = Vec::with_capacity(places.len());
    for place in places {
        let _ = resolver.ingest(place, &mut emitted);
    }
    let _ = resolver.finalize(&mut emitted);
    emitted.len()
}

fn bench_ingest_order(c: &mut Criterion) {
    let mut group = c.benchmark_group("ingest_order");

    for states in [10, 100] {
        let parents_first = build_country(states);
        let mut children_first = parents_first.clone();
        children_first.reverse();

        group.bench_with_input(
            BenchmarkId::new("parents_first", parents_first.len()),
            &parents_first,
            |b, places| {
                b.iter_batched(|| places.clone(), |p| black_box(run(p)), BatchSize::LargeInput);
            },
        );

        // every place waits until the country arrives last, then one cascade
        group.bench_with_input(
            BenchmarkId::new("children_first", children_first.len()),
            &children_first,
            |b, places| {
                b.iter_batched(|| places.clone(), |p| black_box(run(p)), BatchSize::LargeInput);
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_ingest_order);
criterion_main!(benches);
