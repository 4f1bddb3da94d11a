//! Throughput benchmarks for the Metropolis trial loop

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use spin_factions::{SimConfig, Simulation};

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for n in [25usize, 50, 100] {
        group.bench_function(format!("n{}_1000_trials", n), |b| {
            let mut sim = Simulation::new(SimConfig {
                n,
                ..SimConfig::default()
            })
            .unwrap();

            b.iter(|| {
                sim.step(black_box(1000), false);
            });
        });
    }

    group.finish();
}

fn bench_inject(c: &mut Criterion) {
    c.bench_function("inject_event_n50", |b| {
        let mut sim = Simulation::new(SimConfig {
            n: 50,
            ..SimConfig::default()
        })
        .unwrap();

        b.iter(|| {
            sim.inject_event(black_box(0.3));
        });
    });
}

criterion_group!(benches, bench_step, bench_inject);
criterion_main!(benches);
