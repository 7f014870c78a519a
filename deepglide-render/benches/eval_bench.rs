use criterion::{criterion_group, criterion_main, Criterion};

use deepglide_core::{FractalParams, Mandelbrot, MandelbrotFf, Viewport};
use deepglide_render::{render, Palette};

fn bench_native_frame(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::new(-0.5, 0.0, 3.0, 640, 480).unwrap();

    c.bench_function("native_frame_640x480", |b| {
        b.iter(|| render(&mandelbrot, &viewport));
    });
}

fn bench_extended_frame(c: &mut Criterion) {
    let viewport = Viewport::new(-0.743_643_887, 0.131_825_904, 1e-5, 256, 256).unwrap();
    let params = FractalParams::new(1000).unwrap();
    let fractal = MandelbrotFf::new(params, viewport.center_ff());

    c.bench_function("extended_frame_256x256_1000iter", |b| {
        b.iter(|| render(&fractal, &viewport));
    });
}

fn bench_colorize(c: &mut Criterion) {
    let mandelbrot = Mandelbrot::default();
    let viewport = Viewport::new(-0.5, 0.0, 3.0, 640, 480).unwrap();
    let result = render(&mandelbrot, &viewport);
    let palette = Palette::default();

    c.bench_function("colorize_640x480", |b| {
        b.iter(|| palette.colorize(&result.iterations));
    });
}

criterion_group!(
    benches,
    bench_native_frame,
    bench_extended_frame,
    bench_colorize
);
criterion_main!(benches);
