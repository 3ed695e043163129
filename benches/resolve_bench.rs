//! Benchmarks for route resolution
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use postee_ui::router::{register_routes, revisions, Route, View};

fn wide_table(size: usize) -> Vec<Route> {
    (0..size)
        .map(|i| {
            Route::component(
                format!("section-{}", i),
                format!("/section-{}/:item", i),
                View::PluginDetails,
            )
        })
        .collect()
}

fn bench_register(c: &mut Criterion) {
    let mut group = c.benchmark_group("register");

    group.bench_function("later_revision", |b| {
        b.iter(|| register_routes(black_box(revisions::later())).unwrap())
    });

    for size in [10, 100] {
        group.bench_function(format!("wide_{}", size), |b| {
            b.iter(|| register_routes(black_box(wide_table(size))).unwrap())
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let router = register_routes(revisions::later()).unwrap();

    group.throughput(Throughput::Elements(1));

    group.bench_function("static", |b| {
        b.iter(|| router.resolve(black_box("/settings")).unwrap())
    });

    group.bench_function("param", |b| {
        b.iter(|| router.resolve(black_box("/plugin/slack-alerts")).unwrap())
    });

    group.bench_function("redirect", |b| {
        b.iter(|| router.resolve(black_box("/")).unwrap())
    });

    group.bench_function("not_found", |b| {
        b.iter(|| router.resolve(black_box("/does/not/exist")).unwrap())
    });

    let wide = register_routes(wide_table(100)).unwrap();
    group.bench_function("last_of_100", |b| {
        b.iter(|| wide.resolve(black_box("/section-99/item?x=1")).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_register, bench_resolve);
criterion_main!(benches);
