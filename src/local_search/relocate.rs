//! Relocate operator: move one job between routes.

use log::debug;

use crate::problem::{Gain, Input};

use super::gains::GainCache;
use super::route_state::RouteState;
use super::utils;

/// Removes the job at `s_rank` in the source route and inserts it at
/// `t_rank` in the target route, `t_rank` ranging over `0..=len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relocate {
    pub source: usize,
    pub s_rank: usize,
    pub target: usize,
    pub t_rank: usize,
}

impl Relocate {
    /// Create a relocate move between two distinct routes.
    pub fn new(source: usize, s_rank: usize, target: usize, t_rank: usize) -> Self {
        debug_assert_ne!(source, target);
        Relocate {
            source,
            s_rank,
            target,
            t_rank,
        }
    }

    /// The moved job must be eligible for the target vehicle and fit
    /// within its remaining capacity.
    pub fn is_valid(&self, input: &Input, state: &RouteState) -> bool {
        let job = state.job_at(self.source, self.s_rank);
        input.vehicle_ok_with_job(self.target, job)
            && input.fits(
                self.target,
                &(state.total_amount(input, self.target) + &input.jobs[job].amount),
            )
    }

    /// Removal gain in the source route minus the insertion cost in the
    /// target route.
    pub fn gain(&self, input: &Input, state: &RouteState, cache: &GainCache) -> Gain {
        let job = state.job_at(self.source, self.s_rank);
        cache.node_gain(self.source, self.s_rank)
            - utils::job_insertion_cost(input, state, self.target, self.t_rank, job)
    }

    /// Mutate both routes.
    pub fn apply(&self, input: &Input, state: &mut RouteState) {
        let job = state.erase(input, self.source, self.s_rank);
        state.insert(input, self.target, self.t_rank, job);
    }

    /// Routes worth offering to the reinserter afterwards.
    pub fn addition_candidates(&self) -> [usize; 2] {
        [self.source, self.target]
    }

    /// Describe the applied move.
    pub fn log(&self, input: &Input, state: &RouteState) {
        debug!(
            "relocate: job {} (rank {} in route {}) to rank {} in route {}",
            input.jobs[state.job_at(self.source, self.s_rank)].id,
            self.s_rank,
            self.source,
            self.t_rank,
            self.target
        );
    }
}
