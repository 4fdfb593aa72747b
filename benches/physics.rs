use criterion::BenchmarkId;
use criterion::Criterion;
use std::hint::black_box;

use gravitas::components::{Body, BodyId};
use gravitas::physics::collisions::{DEFAULT_MERGE_DISTANCE_FACTOR, plan_merges};
use gravitas::physics::gravity::accumulate_forces;
use gravitas::physics::math::{Scalar, random_grid_position, random_velocity};
use gravitas::resources::{RenderingRng, SharedRng};
use gravitas::scenarios;
use gravitas::simulation::Simulation;
use rand::Rng;

const G: Scalar = 0.001;

fn generate_test_bodies(count: usize, seed: u64) -> Vec<Body> {
    let mut rng = SharedRng::from_seed(seed);

    (0..count)
        .map(|i| {
            let position = random_grid_position(&mut *rng, 800, 800);
            let velocity = random_velocity(&mut *rng, 1.0);
            let mass = rng.random_range(1.0..200.0);
            Body::new(mass, position, velocity)
                .unwrap()
                .with_id(BodyId(i as u32))
        })
        .collect()
}

fn bench_force_accumulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("force_accumulation");

    let body_counts = [10, 50, 100, 250, 500, 1_000];

    for &count in &body_counts {
        let bodies = generate_test_bodies(count, 42);

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            let mut bodies = bodies.clone();
            b.iter(|| {
                black_box(accumulate_forces(black_box(&mut bodies), G));
            });
        });
    }

    group.finish();
}

fn bench_merge_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge_planning");

    let body_counts = [10, 100, 500, 1_000];

    for &count in &body_counts {
        let bodies = generate_test_bodies(count, 42);

        group.bench_with_input(BenchmarkId::new("bodies", count), &count, |b, _| {
            b.iter(|| {
                black_box(plan_merges(black_box(&bodies), DEFAULT_MERGE_DISTANCE_FACTOR));
            });
        });
    }

    group.finish();
}

fn bench_scatter_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("scatter_tick");

    let particle_counts = [50, 200, 500];
    let planet_count = 5;

    for &count in &particle_counts {
        let bodies = scenarios::random_scatter(
            count,
            planet_count,
            800,
            800,
            &mut SharedRng::from_seed(7),
            &mut RenderingRng::from_seed(7),
        )
        .unwrap();

        group.bench_with_input(BenchmarkId::new("particles", count), &count, |b, _| {
            b.iter(|| {
                let mut simulation = Simulation::from_bodies(G, bodies.clone());
                for iteration in 1..=10 {
                    black_box(simulation.advance(iteration).unwrap());
                }
                black_box(simulation.body_count());
            });
        });
    }

    group.finish();
}

criterion::criterion_group!(
    benches,
    bench_force_accumulation,
    bench_merge_planning,
    bench_scatter_tick,
);

criterion::criterion_main!(benches);
