use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gts_transforms::{make_transform, IntrinsicMatrix, Transformer};
use std::hint::black_box;

fn bench_make_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_transform");

    group.bench_function(BenchmarkId::new("make_transform", ""), |b| {
        b.iter(|| black_box(make_transform(1.0, 2.0, 0.5, 0.1, 1.5, 0.3)))
    });

    group.finish();
}

fn bench_project_image_corner(c: &mut Criterion) {
    let mut group = c.benchmark_group("project_image_corner");

    let camera_pose = make_transform(0.0, 0.0, 0.5, 0.0, std::f64::consts::FRAC_PI_2, 0.0);
    let intrinsics = IntrinsicMatrix::new(800.0, 800.0, 0.0, 320.0, 240.0)
        .expect("valid intrinsic matrix");
    let transformer = Transformer::new(camera_pose, intrinsics);
    let robot_pose = make_transform(1.0, 2.0, 0.0, 0.0, 0.0, 0.7);

    group.bench_function(BenchmarkId::new("project_image_corner", ""), |b| {
        b.iter(|| black_box(transformer.project_image_corner(&robot_pose)))
    });

    group.finish();
}

criterion_group!(benches, bench_make_transform, bench_project_image_corner);
criterion_main!(benches);
