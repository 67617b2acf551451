use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};
use std::hint::black_box;

use coav_core::{DepthFrame, Detector};
use coav_detection::{build_histogram, DepthImagePolarHistDetector, PolarHistParams};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

/// A wall on the left half and a post in the middle, with some dropouts.
fn synthetic_frame(width: usize, height: usize) -> DepthFrame {
    let data = (0..width * height)
        .map(|i| {
            let x = i % width;
            match x {
                _ if i % 31 == 0 => 0,
                x if x < width / 2 => 1800,
                x if (width * 9 / 20..width * 11 / 20).contains(&x) => 900,
                _ => 6000,
            }
        })
        .collect();
    DepthFrame::new(data, width, height, FRAC_PI_2, FRAC_PI_3, 0.001).expect("frame")
}

fn bench_polar_hist(c: &mut Criterion) {
    let params = PolarHistParams::with_angle_step_deg(2.0, 2.0, 0.3);
    let mut group = c.benchmark_group("polar_hist");

    for &(w, h) in &[(320usize, 240usize), (640, 480), (1280, 720)] {
        let frame = synthetic_frame(w, h);
        let mut detector = DepthImagePolarHistDetector::new(params.clone()).expect("detector");

        group.bench_with_input(BenchmarkId::new("detect", format!("{w}x{h}")), &frame, |b, f| {
            b.iter(|| black_box(detector.detect(black_box(f)).len()))
        });
        group.bench_with_input(
            BenchmarkId::new("histogram", format!("{w}x{h}")),
            &frame,
            |b, f| b.iter(|| build_histogram(black_box(f), &params)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_polar_hist);
criterion_main!(benches);
