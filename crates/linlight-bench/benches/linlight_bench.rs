//! Benchmarks for linear buffer operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use linlight_core::{DeviceFormat, DeviceSurface, LinearImageBuffer, Planes, SampleData, DEFAULT_MONITOR_GAMMA};

/// Surface of `format` filled with a repeating code ramp.
fn gradient_surface(format: DeviceFormat, width: usize, height: usize) -> DeviceSurface {
    let len = width * height * format.channels();
    let samples = if format.bit_depth() == 16 {
        SampleData::U16((0..len).map(|i| (i % 65536) as u16).collect())
    } else {
        SampleData::U8((0..len).map(|i| (i % 256) as u8).collect())
    };
    DeviceSurface::new(format, width, height, samples).unwrap()
}

/// Device ingestion and emission at common sizes.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for &(w, h) in [(256, 256), (1920, 1080)].iter() {
        group.throughput(Throughput::Elements((w * h) as u64));

        for format in [DeviceFormat::Rgb24, DeviceFormat::Bgr32, DeviceFormat::Rgb48] {
            let surface = gradient_surface(format, w, h);
            let id = format!("{}_{}x{}", format, w, h);
            group.bench_with_input(BenchmarkId::new("ingest", &id), &surface, |b, s| {
                b.iter(|| LinearImageBuffer::from_device_surface(black_box(s), DEFAULT_MONITOR_GAMMA).unwrap())
            });
        }

        let surface = gradient_surface(DeviceFormat::Rgb24, w, h);
        let buf = LinearImageBuffer::from_device_surface(&surface, DEFAULT_MONITOR_GAMMA).unwrap();
        group.bench_with_input(BenchmarkId::new("emit_rgb24", format!("{w}x{h}")), &buf, |b, buf| {
            b.iter(|| buf.to_device_surface(96.0, 96.0, DEFAULT_MONITOR_GAMMA, None).unwrap())
        });
    }

    group.finish();
}

/// Element-wise arithmetic around the single-task threshold.
fn bench_arith(c: &mut Criterion) {
    let mut group = c.benchmark_group("arith");

    for &(w, h) in [(64, 64), (128, 128), (1024, 1024)].iter() {
        let value = {
            let mut v = LinearImageBuffer::new(w, h, Planes::Gray).unwrap();
            v.add_scalar(1.0);
            v
        };
        let base = LinearImageBuffer::new(w, h, Planes::Gray).unwrap();
        group.throughput(Throughput::Elements((w * h) as u64));

        group.bench_with_input(BenchmarkId::new("subtract_from", w * h), &base, |b, base| {
            b.iter(|| {
                let mut buf = base.clone();
                buf.subtract_from(black_box(&value)).unwrap();
                buf
            })
        });

        let gray = value.clone();
        let rgb = LinearImageBuffer::new(w, h, Planes::Rgb).unwrap();
        group.bench_with_input(BenchmarkId::new("broadcast_add", w * h), &rgb, |b, rgb| {
            b.iter(|| {
                let mut buf = rgb.clone();
                buf.for_each_with(black_box(&gray), |a, g| a + g).unwrap();
                buf
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_convert, bench_arith);
criterion_main!(benches);
