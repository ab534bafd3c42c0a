//! CROSS-exchange operator: swap two-job segments between routes.

use log::debug;

use crate::problem::{Gain, Input};

use super::gains::GainCache;
use super::route_state::RouteState;
use super::utils;

/// Swaps the segment at edge rank `s_rank` in the source route with the
/// segment at edge rank `t_rank` in the target route, keeping each
/// segment's internal order.
///
/// Requires both routes to hold at least two jobs. Symmetric in its two
/// routes; the exhaustive regime only enumerates pairs with
/// `target > source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrossExchange {
    pub source: usize,
    pub s_rank: usize,
    pub target: usize,
    pub t_rank: usize,
}

impl CrossExchange {
    /// Create a CROSS-exchange move between two distinct routes.
    pub fn new(source: usize, s_rank: usize, target: usize, t_rank: usize) -> Self {
        debug_assert_ne!(source, target);
        CrossExchange {
            source,
            s_rank,
            target,
            t_rank,
        }
    }

    /// Each segment must be eligible for the other vehicle and both
    /// routes must stay within capacity after trading the segments.
    pub fn is_valid(&self, input: &Input, state: &RouteState) -> bool {
        let s_first = state.job_at(self.source, self.s_rank);
        let s_second = state.job_at(self.source, self.s_rank + 1);
        let t_first = state.job_at(self.target, self.t_rank);
        let t_second = state.job_at(self.target, self.t_rank + 1);

        if !input.vehicle_ok_with_job(self.target, s_first)
            || !input.vehicle_ok_with_job(self.target, s_second)
            || !input.vehicle_ok_with_job(self.source, t_first)
            || !input.vehicle_ok_with_job(self.source, t_second)
        {
            return false;
        }

        let s_load = state.total_amount(input, self.source)
            - &input.jobs[s_first].amount
            - &input.jobs[s_second].amount
            + &input.jobs[t_first].amount
            + &input.jobs[t_second].amount;
        let t_load = state.total_amount(input, self.target)
            - &input.jobs[t_first].amount
            - &input.jobs[t_second].amount
            + &input.jobs[s_first].amount
            + &input.jobs[s_second].amount;

        input.fits(self.source, &s_load) && input.fits(self.target, &t_load)
    }

    /// Edges freed around both segments minus the edges created by
    /// putting each segment in the other's place. Internal segment edges
    /// travel with their segments.
    pub fn gain(&self, input: &Input, state: &RouteState, cache: &GainCache) -> Gain {
        let s_first = state.job_at(self.source, self.s_rank);
        let s_second = state.job_at(self.source, self.s_rank + 1);
        let t_first = state.job_at(self.target, self.t_rank);
        let t_second = state.job_at(self.target, self.t_rank + 1);

        cache.edge_cost_around_edge(self.source, self.s_rank)
            - utils::segment_replacement_cost(
                input, state, self.source, self.s_rank, t_first, t_second,
            )
            + cache.edge_cost_around_edge(self.target, self.t_rank)
            - utils::segment_replacement_cost(
                input, state, self.target, self.t_rank, s_first, s_second,
            )
    }

    /// Mutate both routes.
    pub fn apply(&self, input: &Input, state: &mut RouteState) {
        let s_segment = [
            state.job_at(self.source, self.s_rank),
            state.job_at(self.source, self.s_rank + 1),
        ];
        let t_segment = [
            state.job_at(self.target, self.t_rank),
            state.job_at(self.target, self.t_rank + 1),
        ];
        state.replace_range(input, self.source, self.s_rank, self.s_rank + 2, &t_segment);
        state.replace_range(input, self.target, self.t_rank, self.t_rank + 2, &s_segment);
    }

    /// Routes worth offering to the reinserter afterwards.
    pub fn addition_candidates(&self) -> [usize; 2] {
        [self.source, self.target]
    }

    /// Describe the applied move.
    pub fn log(&self, input: &Input, state: &RouteState) {
        debug!(
            "cross-exchange: edge rank {} in route {} with edge rank {} in route {}",
            self.s_rank, self.source, self.t_rank, self.target
        );
    }
}
