//! Benchmarks for the local search regimes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use cvrp_ls::{
    Amount, Config, Input, Job, LocalSearch, Matrix, NoopTsp, Regime, Solution, Vehicle,
};

/// Build a grid instance: jobs on a unit grid, rounded Euclidean costs,
/// a single depot at the origin.
fn create_benchmark_input(size: usize, vehicles: usize) -> Input {
    let mut coords = vec![(0.0, 0.0)];
    let grid_size = (size as f64).sqrt().ceil() as usize;
    for i in 0..size {
        let row = i / grid_size;
        let col = i % grid_size;
        coords.push((col as f64 * 10.0, row as f64 * 10.0));
    }

    let rows: Vec<Vec<i64>> = coords
        .iter()
        .map(|&(x1, y1)| {
            coords
                .iter()
                .map(|&(x2, y2)| {
                    let dx = x1 - x2;
                    let dy = y1 - y2;
                    (dx * dx + dy * dy).sqrt().round() as i64
                })
                .collect()
        })
        .collect();
    let matrix = Matrix::from_rows(rows).unwrap();

    let jobs = (0..size)
        .map(|j| Job::new(j as u64 + 1, j + 1, Amount::new(vec![1])))
        .collect();
    let capacity = (size / vehicles + 1) as i64;
    let fleet = (0..vehicles)
        .map(|v| Vehicle::new(v as u64 + 1, Some(0), Some(0), Amount::new(vec![capacity])))
        .collect();

    Input::new(jobs, fleet, matrix).unwrap()
}

/// Deal jobs round-robin over the routes.
fn create_benchmark_solution(size: usize, vehicles: usize) -> Solution {
    let mut routes = vec![Vec::new(); vehicles];
    for j in 0..size {
        routes[j % vehicles].push(j);
    }
    Solution::new(routes)
}

fn benchmark_regimes(c: &mut Criterion) {
    let mut group = c.benchmark_group("regimes");

    for &size in [20, 50, 100].iter() {
        let vehicles = (size / 10).max(2);
        let input = create_benchmark_input(size, vehicles);
        let solution = create_benchmark_solution(size, vehicles);
        let tsp = NoopTsp;

        for (name, regime) in [
            ("fixed_source_and_target", Regime::FixedSourceAndTarget),
            ("fixed_source", Regime::FixedSource),
            ("exhaustive", Regime::Exhaustive),
        ] {
            group.bench_with_input(
                BenchmarkId::new(name, size),
                &regime,
                |b, &regime| {
                    b.iter(|| {
                        let mut search =
                            LocalSearch::new(&input, &solution, &tsp, Config::new()).unwrap();
                        search.run_regime(regime).unwrap();
                        search.solution()
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for &size in [20, 50].iter() {
        let vehicles = (size / 10).max(2);
        let input = create_benchmark_input(size, vehicles);
        let solution = create_benchmark_solution(size, vehicles);
        let tsp = NoopTsp;

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let mut search =
                    LocalSearch::new(&input, &solution, &tsp, Config::new()).unwrap();
                search.run().unwrap();
                search.solution()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_regimes, benchmark_full_pipeline);
criterion_main!(benches);
