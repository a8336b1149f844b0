use boid_core::{Flock, FlockConfig, UpdateOrder};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

// The neighbour scan is brute force, so step time grows with the square of the flock size
fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("flock_step");

    for order in [UpdateOrder::Sequential, UpdateOrder::Snapshot] {
        for num_boids in [100, 500, 1000] {
            let config = FlockConfig {
                num_boids,
                spawn_radius: 20.0,
                update_order: order,
                ..FlockConfig::default()
            };
            let id = BenchmarkId::new(format!("{:?}", order), num_boids);
            group.bench_with_input(id, &config, |b, config| {
                let mut flock =
                    Flock::spawn_with_rng(*config, &mut StdRng::seed_from_u64(1)).unwrap();
                b.iter(|| flock.step(black_box(1.0 / 60.0)).unwrap());
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
