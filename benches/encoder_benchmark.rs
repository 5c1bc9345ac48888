#![allow(clippy::expect_used, clippy::unwrap_used, missing_docs)]
//! Benchmark for output encoders (PNG, terminal).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matrix_heatmap::color::Rgba;
use matrix_heatmap::framebuffer::Framebuffer;
use matrix_heatmap::output::{PngEncoder, TerminalEncoder, TerminalMode};

fn gradient(width: u32, height: u32) -> Framebuffer {
    let mut fb = Framebuffer::new(width, height).expect("framebuffer creation should succeed");
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f32 / width as f32) * 255.0) as u8;
            let g = ((y as f32 / height as f32) * 255.0) as u8;
            fb.set_pixel(x, y, Rgba::new(r, g, 128, 255));
        }
    }
    fb
}

fn png_encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("png_encoder");

    for (width, height) in [(800, 600), (1920, 1080), (3840, 2160)] {
        let fb = gradient(width, height);

        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{width}x{height}")),
            &(width, height),
            |b, _| {
                b.iter(|| PngEncoder::to_bytes(black_box(&fb)).expect("encoding should succeed"));
            },
        );
    }

    group.finish();
}

fn terminal_encoder_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("terminal_encoder");
    let fb = gradient(800, 600);

    for mode in [TerminalMode::Ascii, TerminalMode::UnicodeHalfBlock, TerminalMode::AnsiTrueColor] {
        group.bench_with_input(BenchmarkId::from_parameter(format!("{mode:?}")), &mode, |b, &mode| {
            b.iter(|| TerminalEncoder::new().mode(mode).max_width(120).render(black_box(&fb)));
        });
    }

    group.finish();
}

criterion_group!(benches, png_encoder_benchmark, terminal_encoder_benchmark);
criterion_main!(benches);
