//! Route sequences and cumulative loads.

use crate::amount::Amount;
use crate::problem::Input;
use crate::solution::Solution;

/// The engine's mutable view of a solution: one job sequence per vehicle
/// plus, for each route, the running prefix sums of job demands.
///
/// `amounts[v][i]` is the combined demand of `routes[v][..=i]`, so the
/// last entry is the route's total load.
#[derive(Debug, Clone)]
pub struct RouteState {
    routes: Vec<Vec<usize>>,
    amounts: Vec<Vec<Amount>>,
}

impl RouteState {
    /// Build the state from a solution, computing all load prefixes.
    pub fn new(input: &Input, solution: &Solution) -> Self {
        let mut state = RouteState {
            routes: solution.routes.clone(),
            amounts: vec![Vec::new(); solution.routes.len()],
        };
        for v in 0..state.routes.len() {
            state.update_amounts(input, v);
        }
        state
    }

    /// All routes, in vehicle-rank order.
    pub fn routes(&self) -> &[Vec<usize>] {
        &self.routes
    }

    /// The route for the vehicle at `v`.
    pub fn route(&self, v: usize) -> &[usize] {
        &self.routes[v]
    }

    /// Number of jobs in the route for the vehicle at `v`.
    pub fn len(&self, v: usize) -> usize {
        self.routes[v].len()
    }

    /// The job at `rank` in the route for the vehicle at `v`.
    pub fn job_at(&self, v: usize, rank: usize) -> usize {
        self.routes[v][rank]
    }

    /// Total load of the route for the vehicle at `v`.
    pub fn total_amount(&self, input: &Input, v: usize) -> Amount {
        match self.amounts[v].last() {
            Some(total) => total.clone(),
            None => Amount::zeros(input.amount_size()),
        }
    }

    /// Insert `job` at `rank`, shifting later jobs back.
    pub fn insert(&mut self, input: &Input, v: usize, rank: usize, job: usize) {
        self.replace_range(input, v, rank, rank, &[job]);
    }

    /// Remove and return the job at `rank`.
    pub fn erase(&mut self, input: &Input, v: usize, rank: usize) -> usize {
        self.replace_range(input, v, rank, rank + 1, &[])[0]
    }

    /// Replace `routes[v][lo..hi]` with `new_jobs`, returning the removed
    /// jobs. Load prefixes are rebuilt from `lo` forward.
    pub fn replace_range(
        &mut self,
        input: &Input,
        v: usize,
        lo: usize,
        hi: usize,
        new_jobs: &[usize],
    ) -> Vec<usize> {
        let removed = self.routes[v]
            .splice(lo..hi, new_jobs.iter().copied())
            .collect();
        self.rebuild_amounts_from(input, v, lo);
        removed
    }

    /// Rebuild the full load prefix for the route at `v`.
    pub fn update_amounts(&mut self, input: &Input, v: usize) {
        self.rebuild_amounts_from(input, v, 0);
    }

    fn rebuild_amounts_from(&mut self, input: &Input, v: usize, lo: usize) {
        let mut running = if lo > 0 {
            self.amounts[v][lo - 1].clone()
        } else {
            Amount::zeros(input.amount_size())
        };

        self.amounts[v].truncate(lo);
        for rank in lo..self.routes[v].len() {
            running += &input.jobs[self.routes[v][rank]].amount;
            self.amounts[v].push(running.clone());
        }
    }
}
