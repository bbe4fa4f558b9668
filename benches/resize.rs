//! Benchmarks for pixelx decode, resize, and pixel access.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pixelx::{ChannelLayout, Filter, Image, ResizeConfig};
use std::hint::black_box;
use std::io::Cursor;

/// Generate a gradient RGBA image for benchmarking.
fn generate_gradient_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = ((x * 255) / width.max(1)) as u8;
            let g = ((y * 255) / height.max(1)) as u8;
            let b = (((x + y) * 127) / (width + height).max(1)) as u8;
            data.push(r);
            data.push(g);
            data.push(b);
            data.push(255);
        }
    }
    data
}

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let buf = image::RgbaImage::from_raw(width, height, generate_gradient_rgba(width, height))
        .expect("buffer size");
    let mut out = Vec::new();
    image::DynamicImage::ImageRgba8(buf)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .expect("png encode");
    out
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_png");

    for &(width, height) in &[(64, 64), (256, 256), (512, 512)] {
        let png = gradient_png(width, height);
        group.throughput(Throughput::Elements((width * height) as u64));

        group.bench_with_input(
            BenchmarkId::new("source", format!("{}x{}", width, height)),
            &png,
            |b, png| b.iter(|| Image::from_memory(black_box(png)).unwrap()),
        );
        group.bench_with_input(
            BenchmarkId::new("rgb", format!("{}x{}", width, height)),
            &png,
            |b, png| b.iter(|| pixelx::decode_as(black_box(png), ChannelLayout::Rgb).unwrap()),
        );
    }

    group.finish();
}

fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize_half");
    let img = Image::from_raw(generate_gradient_rgba(512, 512), 512, 512, ChannelLayout::Rgba)
        .expect("buffer size");
    group.throughput(Throughput::Elements(512 * 512));

    for filter in [
        Filter::Box,
        Filter::Triangle,
        Filter::CubicBSpline,
        Filter::CatmullRom,
        Filter::MitchellNetravali,
    ] {
        let config = ResizeConfig::new().filter(filter);
        group.bench_with_input(
            BenchmarkId::new("filter", format!("{:?}", filter)),
            &config,
            |b, config| b.iter(|| img.resize_with(256, 256, black_box(config)).unwrap()),
        );
    }

    group.finish();
}

fn bench_pixel_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("pixel_access");
    let img = Image::from_raw(generate_gradient_rgba(256, 256), 256, 256, ChannelLayout::Rgba)
        .expect("buffer size");
    group.throughput(Throughput::Elements(256 * 256));

    group.bench_function("checked", |b| {
        b.iter(|| {
            let mut sum = 0.0f32;
            for y in 0..256 {
                for x in 0..256 {
                    sum += img.pixel_at(x, y).unwrap().r;
                }
            }
            black_box(sum)
        })
    });
    group.bench_function("iter", |b| {
        b.iter(|| black_box(img.normalized_pixels().map(|p| p.r).sum::<f32>()))
    });

    group.finish();
}

criterion_group!(benches, bench_decode, bench_resize, bench_pixel_access);
criterion_main!(benches);
