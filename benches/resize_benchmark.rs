use criterion::{black_box, criterion_group, criterion_main, Criterion};
use resizebench::{Dimensions, LanczosResampler, RasterBuffer, Resampler};

fn benchmark_resample(c: &mut Criterion) {
    let resampler = LanczosResampler::new();
    let source = RasterBuffer::new(image::DynamicImage::new_rgb8(640, 480));

    c.bench_function("resample_upscale_2x", |b| {
        b.iter(|| resampler.resample(black_box(&source), Dimensions::new(1280, 960)))
    });

    c.bench_function("resample_downscale_half", |b| {
        b.iter(|| resampler.resample(black_box(&source), Dimensions::new(320, 240)))
    });
}

criterion_group!(benches, benchmark_resample);
criterion_main!(benches);
