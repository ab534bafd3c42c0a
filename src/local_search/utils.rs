//! Shared insertion and replacement cost formulas.
//!
//! All helpers honor open tours: a missing start or end depot simply
//! drops the corresponding term.

use crate::problem::{Gain, Input};

use super::route_state::RouteState;

/// Cost added by inserting `job` at `rank` in the route for vehicle `v`.
///
/// Three cases: inserting into an empty route, appending past the last
/// job, and inserting before an existing job. The removed bridging edge
/// is credited where one exists.
pub fn job_insertion_cost(
    input: &Input,
    state: &RouteState,
    v: usize,
    rank: usize,
    job: usize,
) -> Gain {
    let route = state.route(v);
    let n = route.len();
    let vehicle = &input.vehicles[v];
    let index = input.jobs[job].index;

    let mut previous_cost = 0;
    let mut next_cost = 0;
    let mut old_edge_cost = 0;

    if rank == n {
        if n == 0 {
            if let Some(start) = vehicle.start {
                previous_cost = input.edge_cost(start, index);
            }
            if let Some(end) = vehicle.end {
                next_cost = input.edge_cost(index, end);
            }
        } else {
            let p_index = input.jobs[route[rank - 1]].index;
            previous_cost = input.edge_cost(p_index, index);
            if let Some(end) = vehicle.end {
                old_edge_cost = input.edge_cost(p_index, end);
                next_cost = input.edge_cost(index, end);
            }
        }
    } else {
        let n_index = input.jobs[route[rank]].index;
        next_cost = input.edge_cost(index, n_index);

        if rank == 0 {
            if let Some(start) = vehicle.start {
                previous_cost = input.edge_cost(start, index);
                old_edge_cost = input.edge_cost(start, n_index);
            }
        } else {
            let p_index = input.jobs[route[rank - 1]].index;
            previous_cost = input.edge_cost(p_index, index);
            old_edge_cost = input.edge_cost(p_index, n_index);
        }
    }

    previous_cost + next_cost - old_edge_cost
}

/// Cost added by inserting the ordered segment `(first, second)` at
/// `rank` in the route for vehicle `v`.
///
/// The segment's internal edge travels with it and is not part of the
/// delta.
pub fn segment_insertion_cost(
    input: &Input,
    state: &RouteState,
    v: usize,
    rank: usize,
    first: usize,
    second: usize,
) -> Gain {
    let route = state.route(v);
    let n = route.len();
    let vehicle = &input.vehicles[v];
    let first_index = input.jobs[first].index;
    let second_index = input.jobs[second].index;

    let mut previous_cost = 0;
    let mut next_cost = 0;
    let mut old_edge_cost = 0;

    if rank == n {
        if n == 0 {
            if let Some(start) = vehicle.start {
                previous_cost = input.edge_cost(start, first_index);
            }
            if let Some(end) = vehicle.end {
                next_cost = input.edge_cost(second_index, end);
            }
        } else {
            let p_index = input.jobs[route[rank - 1]].index;
            previous_cost = input.edge_cost(p_index, first_index);
            if let Some(end) = vehicle.end {
                old_edge_cost = input.edge_cost(p_index, end);
                next_cost = input.edge_cost(second_index, end);
            }
        }
    } else {
        let n_index = input.jobs[route[rank]].index;
        next_cost = input.edge_cost(second_index, n_index);

        if rank == 0 {
            if let Some(start) = vehicle.start {
                previous_cost = input.edge_cost(start, first_index);
                old_edge_cost = input.edge_cost(start, n_index);
            }
        } else {
            let p_index = input.jobs[route[rank - 1]].index;
            previous_cost = input.edge_cost(p_index, first_index);
            old_edge_cost = input.edge_cost(p_index, n_index);
        }
    }

    previous_cost + next_cost - old_edge_cost
}

/// Cost of the edges that would surround `new_job` if it stood in for the
/// job currently at `rank` in the route for vehicle `v`.
pub fn replacement_cost(
    input: &Input,
    state: &RouteState,
    v: usize,
    rank: usize,
    new_job: usize,
) -> Gain {
    let route = state.route(v);
    let n = route.len();
    let vehicle = &input.vehicles[v];
    let index = input.jobs[new_job].index;

    let previous = if rank > 0 {
        Some(input.jobs[route[rank - 1]].index)
    } else {
        vehicle.start
    };
    let next = if rank + 1 < n {
        Some(input.jobs[route[rank + 1]].index)
    } else {
        vehicle.end
    };

    let mut cost = 0;
    if let Some(p) = previous {
        cost += input.edge_cost(p, index);
    }
    if let Some(q) = next {
        cost += input.edge_cost(index, q);
    }
    cost
}

/// Cost of the edges that would surround the ordered segment
/// `(first, second)` if it stood in for the segment at edge rank `rank`
/// in the route for vehicle `v`.
pub fn segment_replacement_cost(
    input: &Input,
    state: &RouteState,
    v: usize,
    rank: usize,
    first: usize,
    second: usize,
) -> Gain {
    let route = state.route(v);
    let n = route.len();
    let vehicle = &input.vehicles[v];

    let previous = if rank > 0 {
        Some(input.jobs[route[rank - 1]].index)
    } else {
        vehicle.start
    };
    let next = if rank + 2 < n {
        Some(input.jobs[route[rank + 2]].index)
    } else {
        vehicle.end
    };

    let mut cost = 0;
    if let Some(p) = previous {
        cost += input.edge_cost(p, input.jobs[first].index);
    }
    if let Some(q) = next {
        cost += input.edge_cost(input.jobs[second].index, q);
    }
    cost
}
