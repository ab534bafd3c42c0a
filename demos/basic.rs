//! Basic example: improve a small two-vehicle solution and dump each
//! accepted step as JSON.

use cvrp_ls::{
    Amount, Config, Input, Job, LocalSearch, Matrix, NoopTsp, Solution, SolutionLogger, Vehicle,
};

/// Prints every accepted step as a JSON document.
struct JsonLogger;

impl SolutionLogger for JsonLogger {
    fn log_solution(&mut self, routes: &[Vec<usize>], step: usize) {
        match serde_json::to_string(routes) {
            Ok(json) => println!("step {}: {}", step, json),
            Err(e) => eprintln!("step {}: serialization failed: {}", step, e),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Five locations: a depot at index 0 and four job sites roughly on a
    // line, with costs growing with index distance.
    let rows: Vec<Vec<i64>> = (0..5)
        .map(|i: i64| (0..5).map(|j: i64| (i - j).abs() * 10).collect())
        .collect();
    let matrix = Matrix::from_rows(rows)?;

    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1])),
        Job::new(2, 2, Amount::new(vec![1])),
        Job::new(3, 3, Amount::new(vec![1])),
        Job::new(4, 4, Amount::new(vec![1])),
    ];
    let vehicles = vec![
        Vehicle::new(1, Some(0), Some(0), Amount::new(vec![2])),
        Vehicle::new(2, Some(0), Some(0), Amount::new(vec![2])),
    ];
    let input = Input::new(jobs, vehicles, matrix)?;

    // A deliberately poor split: far jobs mixed into both routes.
    let initial = Solution::new(vec![vec![0, 3], vec![2, 1]]);
    println!("initial cost: {}", initial.total_cost(&input));

    let tsp = NoopTsp;
    let mut search = LocalSearch::new(&input, &initial, &tsp, Config::new())?
        .with_logger(Box::new(JsonLogger));
    search.run()?;

    let improved = search.solution();
    println!("final cost: {}", improved.total_cost(&input));
    for (v, route) in improved.routes.iter().enumerate() {
        println!("route {}: {:?}", v, route);
    }
    println!("unassigned: {:?}", search.unassigned());

    Ok(())
}
