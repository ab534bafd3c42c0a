//! Solution representation and route costing.

use crate::problem::{Cost, Input};
use serde::{Deserialize, Serialize};

/// One job sequence per vehicle, in vehicle-rank order.
///
/// Jobs are referenced by their index in the input's job list. Jobs
/// appearing in no route are unassigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub routes: Vec<Vec<usize>>,
}

impl Solution {
    /// Create a solution from explicit routes.
    pub fn new(routes: Vec<Vec<usize>>) -> Self {
        Solution { routes }
    }

    /// Create a solution with one empty route per vehicle.
    pub fn empty(vehicle_count: usize) -> Self {
        Solution {
            routes: vec![Vec::new(); vehicle_count],
        }
    }

    /// Total travel cost over all routes.
    pub fn total_cost(&self, input: &Input) -> Cost {
        self.routes
            .iter()
            .enumerate()
            .map(|(v, route)| route_cost(input, v, route))
            .sum()
    }
}

/// Travel cost of a single route, honoring open starts and ends.
///
/// An empty route costs nothing: a vehicle with no jobs does not leave
/// its depot.
pub fn route_cost(input: &Input, vehicle_rank: usize, route: &[usize]) -> Cost {
    if route.is_empty() {
        return 0;
    }

    let mut cost = input.start_cost(vehicle_rank, route[0]);

    for pair in route.windows(2) {
        cost += input.edge_cost(input.jobs[pair[0]].index, input.jobs[pair[1]].index);
    }

    cost + input.end_cost(route[route.len() - 1], vehicle_rank)
}
