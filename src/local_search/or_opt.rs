//! Or-opt operator: move a two-job segment between routes.

use log::debug;

use crate::problem::{Gain, Input};

use super::gains::GainCache;
use super::route_state::RouteState;
use super::utils;

/// Moves the contiguous segment starting at `s_rank` in the source route
/// to `t_rank` in the target route, keeping the segment's order.
///
/// Requires a source route of at least two jobs with
/// `s_rank <= len - 2`; `t_rank` ranges over `0..=len` of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrOpt {
    pub source: usize,
    pub s_rank: usize,
    pub target: usize,
    pub t_rank: usize,
}

impl OrOpt {
    /// Create an Or-opt move between two distinct routes.
    pub fn new(source: usize, s_rank: usize, target: usize, t_rank: usize) -> Self {
        debug_assert_ne!(source, target);
        OrOpt {
            source,
            s_rank,
            target,
            t_rank,
        }
    }

    /// Both segment jobs must be eligible for the target vehicle and
    /// their combined demand must fit.
    pub fn is_valid(&self, input: &Input, state: &RouteState) -> bool {
        let first = state.job_at(self.source, self.s_rank);
        let second = state.job_at(self.source, self.s_rank + 1);

        input.vehicle_ok_with_job(self.target, first)
            && input.vehicle_ok_with_job(self.target, second)
            && input.fits(
                self.target,
                &(state.total_amount(input, self.target)
                    + &input.jobs[first].amount
                    + &input.jobs[second].amount),
            )
    }

    /// Segment removal gain in the source route minus the segment
    /// insertion cost in the target route. The segment's internal edge
    /// appears in neither term.
    pub fn gain(&self, input: &Input, state: &RouteState, cache: &GainCache) -> Gain {
        let first = state.job_at(self.source, self.s_rank);
        let second = state.job_at(self.source, self.s_rank + 1);

        cache.edge_gain(self.source, self.s_rank)
            - utils::segment_insertion_cost(input, state, self.target, self.t_rank, first, second)
    }

    /// Mutate both routes.
    pub fn apply(&self, input: &Input, state: &mut RouteState) {
        let segment = state.replace_range(input, self.source, self.s_rank, self.s_rank + 2, &[]);
        state.replace_range(input, self.target, self.t_rank, self.t_rank, &segment);
    }

    /// Routes worth offering to the reinserter afterwards.
    pub fn addition_candidates(&self) -> [usize; 2] {
        [self.source, self.target]
    }

    /// Describe the applied move.
    pub fn log(&self, input: &Input, state: &RouteState) {
        debug!(
            "or-opt: jobs {} and {} (edge rank {} in route {}) to rank {} in route {}",
            input.jobs[state.job_at(self.source, self.s_rank)].id,
            input.jobs[state.job_at(self.source, self.s_rank + 1)].id,
            self.s_rank,
            self.source,
            self.t_rank,
            self.target
        );
    }
}
