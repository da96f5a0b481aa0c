use criterion::{Criterion, black_box, criterion_group, criterion_main};
use offbeat::model::Sample;
use offbeat::repair;

/// Synthetic recording with periodic negative-delta and regression triggers.
fn synthetic_recording(len: usize) -> Vec<Sample> {
    (0..len)
        .map(|i| {
            let delta = if i % 17 == 0 {
                -0.05
            } else {
                0.01 * (i % 4) as f64
            };
            Sample::new((i / 4) as u32, i32::from(i % 3 == 0), delta, (i % 8) as i32)
        })
        .collect()
}

fn repair_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("repair");

    let samples = synthetic_recording(10_000);
    group.bench_function("repair_10k", |b| {
        b.iter(|| {
            let mut data = samples.clone();
            repair::repair_samples(black_box(&mut data));
        });
    });

    let clean: Vec<Sample> = (0..10_000)
        .map(|i| Sample::new((i / 4) as u32, 1, 0.01 * (i % 4) as f64, 3))
        .collect();
    group.bench_function("repair_10k_clean", |b| {
        b.iter(|| {
            let mut data = clean.clone();
            repair::repair_samples(black_box(&mut data));
        });
    });

    group.finish();
}

criterion_group!(benches, repair_benchmark);
criterion_main!(benches);
