//! Benchmarks for per-frame exercise processing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use repcoach_core::{angle, JointSet, Landmark, Point2};
use repcoach_exercise::{Exercise, ExerciseKind};

/// Full upper-body joint set with the arm at the given elbow angle phase
fn create_test_frame(phase: f64) -> JointSet {
    let wrist_angle = phase * std::f64::consts::PI;
    JointSet::new()
        .with(Landmark::Nose, (0.5 + 0.1 * phase, 0.2))
        .with(Landmark::LeftShoulder, (0.6, 0.35))
        .with(Landmark::RightShoulder, (0.4, 0.35))
        .with(Landmark::LeftElbow, (0.62, 0.5))
        .with(Landmark::LeftWrist, (0.62 + 0.15 * wrist_angle.sin(), 0.5 + 0.15 * wrist_angle.cos()))
        .with(Landmark::LeftHip, (0.58, 0.7))
        .with(Landmark::LeftAnkle, (0.57, 0.95))
}

fn benchmark_angle(c: &mut Criterion) {
    let a = Point2::new(0.6, 0.35);
    let b = Point2::new(0.62, 0.5);
    let p = Point2::new(0.7, 0.6);

    c.bench_function("angle", |bench| bench.iter(|| angle(black_box(a), black_box(b), black_box(p))));
}

fn benchmark_process(c: &mut Criterion) {
    let frames: Vec<JointSet> = (0..60).map(|i| create_test_frame(i as f64 / 60.0)).collect();

    for kind in ExerciseKind::ALL {
        let mut exercise = Exercise::new(kind);
        c.bench_function(&format!("process_60_frames_{}", kind.slug()), |b| {
            b.iter(|| {
                for frame in &frames {
                    let _ = exercise.process(black_box(frame));
                }
                exercise.reps()
            })
        });
    }
}

criterion_group!(benches, benchmark_angle, benchmark_process);
criterion_main!(benches);
