//! Criterion benchmarks for the cost pipeline and the three strategies.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swarmpath::metaheuristics::{BeeParams, PsoParams, SwarmSettings};
use swarmpath::planner::{
    extract_obstacle_clusters, CostFunction, CostWeights, GridCoord, LengthMetric, OccupancyMap,
    Planner, PlannerConfig, Strategy,
};

/// Square map with a few rectangular blocks.
fn obstacle_map(size: usize) -> OccupancyMap {
    let mut map = OccupancyMap::free(size, size).expect("should create");
    let s = size as i32;
    map.fill_rect(GridCoord::new(s / 4, s / 4), GridCoord::new(s / 2, s / 2));
    map.fill_rect(GridCoord::new(s / 2 + 2, s / 8), GridCoord::new(s / 2 + 4, s / 3));
    map.fill_rect(GridCoord::new(s / 8, 2 * s / 3), GridCoord::new(s / 3, 2 * s / 3 + 3));
    map
}

fn bench_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cost");
    let raw = [0.1, 0.8, 0.5, 0.2, 0.9, 0.7];

    for size in [64, 256].iter() {
        let map = obstacle_map(*size);
        let end = GridCoord::new(*size as i32 - 1, *size as i32 - 1);

        let two = CostFunction::new(
            &map,
            GridCoord::new(0, 0),
            end,
            CostWeights::default(),
            LengthMetric::Steps,
        )
        .expect("should create");
        group.bench_with_input(BenchmarkId::new("two_terms", size), size, |b, _| {
            b.iter(|| two.evaluate(black_box(&raw)));
        });

        let three = CostFunction::new(
            &map,
            GridCoord::new(0, 0),
            end,
            CostWeights::from_slice(&[0.8, 0.1, 0.1]).expect("valid weights"),
            LengthMetric::Euclidean,
        )
        .expect("should create");
        group.bench_with_input(BenchmarkId::new("with_repulsion", size), size, |b, _| {
            b.iter(|| three.evaluate(black_box(&raw)));
        });
    }

    group.finish();
}

fn bench_clusters(c: &mut Criterion) {
    let mut group = c.benchmark_group("Clusters");

    for size in [64, 256, 1024].iter() {
        let map = obstacle_map(*size);
        group.bench_with_input(BenchmarkId::new("map", size), size, |b, _| {
            b.iter(|| extract_obstacle_clusters(black_box(&map)));
        });
    }

    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("Strategies");
    group.sample_size(20);

    let map = obstacle_map(64);
    let strategies = [
        Strategy::Pso(PsoParams::default()),
        Strategy::GreyWolf,
        Strategy::Bee(BeeParams::default()),
    ];

    for strategy in strategies {
        let config = PlannerConfig::new().with_strategy(strategy).with_swarm(
            SwarmSettings::new()
                .with_population(30)
                .with_iterations(30)
                .with_seed(42),
        );
        let planner = Planner::new(map.clone(), config).expect("valid config");

        group.bench_function(strategy.as_str(), |b| {
            b.iter(|| {
                planner
                    .get_path(black_box(GridCoord::new(0, 0)), GridCoord::new(63, 63))
                    .expect("should plan")
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_cost, bench_clusters, bench_strategies);
criterion_main!(benches);
