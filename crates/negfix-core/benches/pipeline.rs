//! Benchmarks for negfix-core pipeline stages
//!
//! Run with: cargo bench -p negfix-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use negfix_core::pipeline::{apply_gamma, invert, normalize, process_image, remove_cast};
use negfix_core::{ConvertOptions, GammaProfile, NormalizeOptions, Rgb16Image};

/// Generate a synthetic negative: a diagonal gradient over an orange-ish base.
fn generate_test_negative(width: u32, height: u32) -> Rgb16Image {
    let mut image = Rgb16Image::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let t = (x + y) as f32 / (width + height) as f32;
            image.set_pixel(
                x,
                y,
                [
                    (20000.0 + 40000.0 * t) as u16,
                    (14000.0 + 30000.0 * t) as u16,
                    (9000.0 + 20000.0 * t) as u16,
                ],
            );
        }
    }
    image
}

fn levels_options() -> NormalizeOptions {
    NormalizeOptions {
        border_percent: 10,
        threshold_upper: 0,
        threshold_lower: 0,
    }
}

fn portra800() -> GammaProfile {
    GammaProfile::new(0.5228012326204643, 0.536735995403697, 0.6114420242779521)
}

/// Benchmark the individual stages
fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");

    for size in [256u32, 1024] {
        let image = generate_test_negative(size, size);
        let label = format!("{}x{}", size, size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));

        group.bench_with_input(BenchmarkId::new("remove_cast", &label), &image, |b, img| {
            b.iter(|| remove_cast(black_box(img), [62000, 48000, 30000]));
        });
        group.bench_with_input(BenchmarkId::new("apply_gamma", &label), &image, |b, img| {
            let exponents = portra800().reciprocal();
            b.iter(|| apply_gamma(black_box(img), &exponents));
        });
        group.bench_with_input(BenchmarkId::new("normalize", &label), &image, |b, img| {
            let options = levels_options();
            b.iter(|| normalize(black_box(img), &options));
        });
        group.bench_with_input(BenchmarkId::new("invert", &label), &image, |b, img| {
            b.iter(|| invert(black_box(img)));
        });
    }

    group.finish();
}

/// Benchmark the full pipeline
fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    let options = ConvertOptions {
        gamma: portra800(),
        base_color: Some([62000, 48000, 30000]),
        normalize: Some(levels_options()),
        invert: true,
    };

    for size in [512u32, 2048] {
        let image = generate_test_negative(size, size);
        group.throughput(Throughput::Elements(u64::from(size) * u64::from(size)));
        group.bench_with_input(
            BenchmarkId::new("process_image", format!("{}x{}", size, size)),
            &image,
            |b, img| {
                b.iter(|| process_image(black_box(img), &options));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_full_pipeline);
criterion_main!(benches);
