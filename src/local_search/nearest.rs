//! Nearest-rank index between route pairs.

use crate::problem::{Cost, Input};

use super::route_state::RouteState;

/// For each ordered pair of distinct vehicles `(v1, v2)` and each rank
/// `r1` in `v1`'s route, the rank in `v2`'s route of the job nearest
/// *from* (resp. *to*) the job at `r1`. Ties break on the smallest rank;
/// when `v2`'s route is empty the stored rank stays 0 and callers must
/// handle the empty case themselves.
#[derive(Debug, Clone)]
pub struct NearestRankIndex {
    from: Vec<Vec<Vec<usize>>>,
    to: Vec<Vec<Vec<usize>>>,
}

impl NearestRankIndex {
    /// Build the index for every ordered pair of distinct vehicles.
    pub fn new(input: &Input, state: &RouteState) -> Self {
        let v_count = state.routes().len();
        let mut index = NearestRankIndex {
            from: vec![vec![Vec::new(); v_count]; v_count],
            to: vec![vec![Vec::new(); v_count]; v_count],
        };
        for v1 in 0..v_count {
            for v2 in 0..v_count {
                if v1 != v2 {
                    index.rebuild_pair(input, state, v1, v2);
                }
            }
        }
        index
    }

    /// Recompute the rows for the ordered pair `(v1, v2)`.
    pub fn rebuild_pair(&mut self, input: &Input, state: &RouteState, v1: usize, v2: usize) {
        let r1_len = state.len(v1);
        self.from[v1][v2] = vec![0; r1_len];
        self.to[v1][v2] = vec![0; r1_len];

        for r1 in 0..r1_len {
            let index_r1 = input.jobs[state.job_at(v1, r1)].index;

            let mut min_from = Cost::MAX;
            let mut min_to = Cost::MAX;
            let mut best_from_rank = 0;
            let mut best_to_rank = 0;

            for r2 in 0..state.len(v2) {
                let index_r2 = input.jobs[state.job_at(v2, r2)].index;
                if input.edge_cost(index_r1, index_r2) < min_from {
                    min_from = input.edge_cost(index_r1, index_r2);
                    best_from_rank = r2;
                }
                if input.edge_cost(index_r2, index_r1) < min_to {
                    min_to = input.edge_cost(index_r2, index_r1);
                    best_to_rank = r2;
                }
            }

            self.from[v1][v2][r1] = best_from_rank;
            self.to[v1][v2][r1] = best_to_rank;
        }
    }

    /// Rank in `v2` of the job nearest from the job at `r1` in `v1`.
    pub fn from_rank(&self, v1: usize, v2: usize, r1: usize) -> usize {
        self.from[v1][v2][r1]
    }

    /// Rank in `v2` of the job nearest to the job at `r1` in `v1`.
    pub fn to_rank(&self, v1: usize, v2: usize, r1: usize) -> usize {
        self.to[v1][v2][r1]
    }
}
