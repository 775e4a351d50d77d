#![deny(warnings)]

use bezier_canvas::*;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

fn curve_benchmark(c: &mut Criterion) {
    let cubic = Cubic::new((158.0, 70.0), (210.0, 250.0), (25.0, 190.0), (219.0, 89.0));
    let mut group = c.benchmark_group("cubic");
    group
        .throughput(Throughput::Elements(1))
        .bench_function("polynomial", |b| b.iter(|| black_box(cubic).at(0.3)))
        .bench_function("casteljau", |b| {
            b.iter(|| black_box(cubic).casteljau_at(0.3))
        });
    group.finish();
}

fn rasterize_benchmark(c: &mut Criterion) {
    let cubic = Cubic::new((100.0, 600.0), (200.0, 100.0), (500.0, 650.0), (600.0, 50.0));
    let mut img = Canvas::new_default(CANVAS_HEIGHT, CANVAS_WIDTH);
    let rasterizers: [Box<dyn Rasterizer>; 2] = [
        Box::new(NaiveRasterizer::default()),
        Box::new(CasteljauRasterizer::default()),
    ];

    let mut group = c.benchmark_group("rasterize");
    group.throughput(Throughput::Elements(ParamSweep::default().len() as u64));
    for rasterizer in rasterizers.iter() {
        group.bench_function(rasterizer.name(), |b| {
            b.iter(|| {
                img.clear();
                rasterizer.rasterize(black_box(cubic), &mut img)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, curve_benchmark, rasterize_benchmark);
criterion_main!(benches);
