//! Per-route removal gains and candidate ranks.

use crate::problem::{Gain, Input};

use super::route_state::RouteState;

/// Cached removal gains for every route.
///
/// For each route this holds, per rank, the cost saved by removing the
/// job there (`node_gains`) or the two-job segment starting there
/// (`edge_gains`), together with the raw cost of the edges incident to
/// that job or segment. The candidate tables point at the rank with the
/// highest gain, ties broken by the smallest rank.
///
/// Operators read the cache; the driver rebuilds the rows of the two
/// routes touched by each accepted move.
#[derive(Debug, Clone)]
pub struct GainCache {
    node_gains: Vec<Vec<Gain>>,
    edge_costs_around_node: Vec<Vec<Gain>>,
    node_candidates: Vec<usize>,
    edge_gains: Vec<Vec<Gain>>,
    edge_costs_around_edge: Vec<Vec<Gain>>,
    edge_candidates: Vec<usize>,
}

impl GainCache {
    /// Build the cache for every route.
    pub fn new(input: &Input, state: &RouteState) -> Self {
        let v_count = state.routes().len();
        let mut cache = GainCache {
            node_gains: vec![Vec::new(); v_count],
            edge_costs_around_node: vec![Vec::new(); v_count],
            node_candidates: vec![0; v_count],
            edge_gains: vec![Vec::new(); v_count],
            edge_costs_around_edge: vec![Vec::new(); v_count],
            edge_candidates: vec![0; v_count],
        };
        for v in 0..v_count {
            cache.rebuild(input, state, v);
        }
        cache
    }

    /// Recompute every row for the route at `v`.
    pub fn rebuild(&mut self, input: &Input, state: &RouteState, v: usize) {
        self.set_node_gains(input, state, v);
        self.set_edge_gains(input, state, v);
    }

    /// Cost saved by removing the job at `rank` from route `v`.
    pub fn node_gain(&self, v: usize, rank: usize) -> Gain {
        self.node_gains[v][rank]
    }

    /// Cost of the edges incident to the job at `rank` in route `v`.
    pub fn edge_cost_around_node(&self, v: usize, rank: usize) -> Gain {
        self.edge_costs_around_node[v][rank]
    }

    /// Rank of the job whose removal saves the most in route `v`.
    pub fn node_candidate(&self, v: usize) -> usize {
        self.node_candidates[v]
    }

    /// Cost saved by removing the segment at edge rank `rank` from route `v`.
    pub fn edge_gain(&self, v: usize, rank: usize) -> Gain {
        self.edge_gains[v][rank]
    }

    /// Cost of the edges incident to the segment at edge rank `rank` in
    /// route `v`.
    pub fn edge_cost_around_edge(&self, v: usize, rank: usize) -> Gain {
        self.edge_costs_around_edge[v][rank]
    }

    /// Edge rank of the segment whose removal saves the most in route `v`.
    pub fn edge_candidate(&self, v: usize) -> usize {
        self.edge_candidates[v]
    }

    fn set_node_gains(&mut self, input: &Input, state: &RouteState, v: usize) {
        let route = state.route(v);
        let n = route.len();
        let vehicle = &input.vehicles[v];

        self.node_gains[v].clear();
        self.edge_costs_around_node[v].clear();
        self.node_candidates[v] = 0;

        let mut best_gain = Gain::MIN;

        for rank in 0..n {
            let current = input.jobs[route[rank]].index;
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

            let mut edges_around = 0;
            if let Some(p) = previous {
                edges_around += input.edge_cost(p, current);
            }
            if let Some(q) = next {
                edges_around += input.edge_cost(current, q);
            }

            // A removal that empties the route leaves no edge to re-bridge.
            let new_edge = match (previous, next) {
                (Some(p), Some(q)) if n > 1 => input.edge_cost(p, q),
                _ => 0,
            };

            let gain = edges_around - new_edge;
            self.edge_costs_around_node[v].push(edges_around);
            self.node_gains[v].push(gain);

            if gain > best_gain {
                best_gain = gain;
                self.node_candidates[v] = rank;
            }
        }
    }

    fn set_edge_gains(&mut self, input: &Input, state: &RouteState, v: usize) {
        let route = state.route(v);
        let n = route.len();
        let nb_edges = if n < 2 { 0 } else { n - 1 };
        let vehicle = &input.vehicles[v];

        self.edge_gains[v].clear();
        self.edge_costs_around_edge[v].clear();
        self.edge_candidates[v] = 0;

        let mut best_gain = Gain::MIN;

        for rank in 0..nb_edges {
            let first = input.jobs[route[rank]].index;
            let second = input.jobs[route[rank + 1]].index;
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

            let mut edges_around = 0;
            if let Some(p) = previous {
                edges_around += input.edge_cost(p, first);
            }
            if let Some(q) = next {
                edges_around += input.edge_cost(second, q);
            }

            // Same no-re-bridge rule as node gains for a route the
            // removal would empty.
            let new_edge = match (previous, next) {
                (Some(p), Some(q)) if n > 2 => input.edge_cost(p, q),
                _ => 0,
            };

            let gain = edges_around - new_edge;
            self.edge_costs_around_edge[v].push(edges_around);
            self.edge_gains[v].push(gain);

            if gain > best_gain {
                best_gain = gain;
                self.edge_candidates[v] = rank;
            }
        }
    }
}
