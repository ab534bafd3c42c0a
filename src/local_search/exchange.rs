//! Exchange operator: swap one job between two routes.

use log::debug;

use crate::problem::{Gain, Input};

use super::gains::GainCache;
use super::route_state::RouteState;
use super::utils;

/// Swaps the job at `s_rank` in the source route with the job at
/// `t_rank` in the target route.
///
/// The operator is symmetric in its two routes; the exhaustive regime
/// only enumerates pairs with `target > source`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exchange {
    pub source: usize,
    pub s_rank: usize,
    pub target: usize,
    pub t_rank: usize,
}

impl Exchange {
    /// Create an exchange move between two distinct routes.
    pub fn new(source: usize, s_rank: usize, target: usize, t_rank: usize) -> Self {
        debug_assert_ne!(source, target);
        Exchange {
            source,
            s_rank,
            target,
            t_rank,
        }
    }

    /// Each job must be eligible for the other vehicle, and each route's
    /// load after the swap must fit. Loads come from the demand delta,
    /// not a prefix rebuild.
    pub fn is_valid(&self, input: &Input, state: &RouteState) -> bool {
        let s_job = state.job_at(self.source, self.s_rank);
        let t_job = state.job_at(self.target, self.t_rank);

        if !input.vehicle_ok_with_job(self.target, s_job)
            || !input.vehicle_ok_with_job(self.source, t_job)
        {
            return false;
        }

        let s_load = state.total_amount(input, self.source) - &input.jobs[s_job].amount
            + &input.jobs[t_job].amount;
        let t_load = state.total_amount(input, self.target) - &input.jobs[t_job].amount
            + &input.jobs[s_job].amount;

        input.fits(self.source, &s_load) && input.fits(self.target, &t_load)
    }

    /// Edges freed around both jobs minus the edges created by putting
    /// each job in the other's place.
    pub fn gain(&self, input: &Input, state: &RouteState, cache: &GainCache) -> Gain {
        let s_job = state.job_at(self.source, self.s_rank);
        let t_job = state.job_at(self.target, self.t_rank);

        cache.edge_cost_around_node(self.source, self.s_rank)
            - utils::replacement_cost(input, state, self.source, self.s_rank, t_job)
            + cache.edge_cost_around_node(self.target, self.t_rank)
            - utils::replacement_cost(input, state, self.target, self.t_rank, s_job)
    }

    /// Mutate both routes.
    pub fn apply(&self, input: &Input, state: &mut RouteState) {
        let s_job = state.job_at(self.source, self.s_rank);
        let t_job = state.job_at(self.target, self.t_rank);
        state.replace_range(input, self.source, self.s_rank, self.s_rank + 1, &[t_job]);
        state.replace_range(input, self.target, self.t_rank, self.t_rank + 1, &[s_job]);
    }

    /// Routes worth offering to the reinserter afterwards.
    pub fn addition_candidates(&self) -> [usize; 2] {
        [self.source, self.target]
    }

    /// Describe the applied move.
    pub fn log(&self, input: &Input, state: &RouteState) {
        debug!(
            "exchange: job {} (rank {} in route {}) with job {} (rank {} in route {})",
            input.jobs[state.job_at(self.source, self.s_rank)].id,
            self.s_rank,
            self.source,
            input.jobs[state.job_at(self.target, self.t_rank)].id,
            self.t_rank,
            self.target
        );
    }
}
