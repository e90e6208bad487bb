//! Condition builder benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use newsstand_bench::fixtures::{generate_house_ids, Scale};
use newsstand_core::market::{item_summary_mappings, realm_mappings, HOUSES_SQL, ITEM_SUMMARY_SQL};
use newsstand_core::{build, FieldMapping, RequestParams};

fn bench_build_realm(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/realm");

    group.bench_function("no_params", |b| {
        let params = RequestParams::new();
        b.iter(|| black_box(build(HOUSES_SQL, realm_mappings(), &params).unwrap()));
    });

    group.bench_function("region_realm", |b| {
        let params = RequestParams::new()
            .with("region", "eu")
            .with("realm", "silvermoon");
        b.iter(|| black_box(build(HOUSES_SQL, realm_mappings(), &params).unwrap()));
    });

    group.finish();
}

fn bench_membership(c: &mut Criterion) {
    let mut group = c.benchmark_group("builder/membership");

    for scale in [Scale::Tiny, Scale::Small, Scale::Large] {
        let houses = generate_house_ids(scale);
        let params = RequestParams::new()
            .with("house", houses.clone())
            .with("id", "775");

        group.bench_with_input(BenchmarkId::new("build", scale.count()), &params, |b, params| {
            b.iter(|| black_box(build(ITEM_SUMMARY_SQL, item_summary_mappings(), params).unwrap()));
        });

        let mapping = FieldMapping::membership("house");
        group.bench_with_input(BenchmarkId::new("normalize", scale.count()), &houses, |b, houses| {
            b.iter(|| black_box(newsstand_core::query::normalize(houses, &mapping)));
        });

        let query = build(ITEM_SUMMARY_SQL, item_summary_mappings(), &params).unwrap();
        group.bench_with_input(BenchmarkId::new("expand", scale.count()), &query, |b, query| {
            b.iter(|| black_box(query.expand()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build_realm, bench_membership);
criterion_main!(benches);
