use criterion::{Criterion, criterion_group, criterion_main};
use dcm2png::image::{self, IntensityWindow};
use dcm2png::types::{BitDepth, Dimensions};
use dcm2png::SampleGrid;
use std::hint::black_box;

/// 2048x2048 12-bit grid, roughly the size of a CR/DX plate
fn synthetic_grid() -> SampleGrid {
    let rows = 2048_u16;
    let cols = 2048_u16;
    let samples = (0..usize::from(rows) * usize::from(cols))
        .map(|i| ((i * 2_654_435_761) % 4096) as f32)
        .collect();

    SampleGrid::new(Dimensions::new(rows, cols), BitDepth::new(16, 12), samples).unwrap()
}

fn bench_percentile_window(c: &mut Criterion) {
    let grid = synthetic_grid();

    c.bench_function("percentile_window_2048", |b| {
        b.iter(|| IntensityWindow::from_samples(black_box(grid.samples())).unwrap());
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");
    let grid = synthetic_grid();
    let window = IntensityWindow::from_samples(grid.samples()).unwrap();

    group.bench_function("full_2048", |b| {
        b.iter(|| image::normalize(black_box(&grid)).unwrap());
    });

    group.bench_function("fixed_window_2048", |b| {
        b.iter(|| image::normalize_with_window(black_box(&grid), black_box(&window)));
    });

    group.finish();
}

criterion_group!(benches, bench_percentile_window, bench_normalize);
criterion_main!(benches);
