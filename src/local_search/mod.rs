//! Inter-route local search: operators, caches and the search driver.

pub mod cross_exchange;
pub mod exchange;
pub mod gains;
pub mod nearest;
pub mod operator;
pub mod or_opt;
pub mod relocate;
pub mod route_state;
pub mod utils;

use std::collections::BTreeSet;

use log::debug;

use crate::amount::Amount;
use crate::config::Config;
use crate::error::Error;
use crate::problem::{Gain, Input};
use crate::solution::{route_cost, Solution};
use crate::tsp::TspSolver;

use self::cross_exchange::CrossExchange;
use self::exchange::Exchange;
use self::gains::GainCache;
use self::nearest::NearestRankIndex;
use self::operator::Move;
use self::or_opt::OrOpt;
use self::relocate::Relocate;
use self::route_state::RouteState;

/// Receives the full route set after construction and after every
/// accepted move, with a monotonically increasing step counter.
pub trait SolutionLogger {
    fn log_solution(&mut self, routes: &[Vec<usize>], step: usize);
}

/// Candidate-enumeration policy for a search pass.
///
/// All three share the same sweep loop and differ only in which
/// source/target ranks they try per route pair: the first pins both to
/// cached candidates, the second pins only the source rank, the last
/// tries everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    FixedSourceAndTarget,
    FixedSource,
    Exhaustive,
}

/// The local search engine.
///
/// Owns the route state, gain caches, nearest-rank index and unassigned
/// set for its lifetime; the input and the TSP solver are borrowed and
/// never mutated.
pub struct LocalSearch<'a> {
    input: &'a Input,
    config: Config,
    tsp: &'a dyn TspSolver,
    state: RouteState,
    unassigned: BTreeSet<usize>,
    cache: GainCache,
    nearest: NearestRankIndex,
    amount_lower_bound: Amount,
    double_amount_lower_bound: Amount,
    logger: Option<Box<dyn SolutionLogger + 'a>>,
    step: usize,
    vehicle_count: usize,
}

impl<'a> std::fmt::Debug for LocalSearch<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearch")
            .field("input", &self.input)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("unassigned", &self.unassigned)
            .field("cache", &self.cache)
            .field("nearest", &self.nearest)
            .field("amount_lower_bound", &self.amount_lower_bound)
            .field("double_amount_lower_bound", &self.double_amount_lower_bound)
            .field("step", &self.step)
            .field("vehicle_count", &self.vehicle_count)
            .finish()
    }
}

impl<'a> LocalSearch<'a> {
    /// Validate the initial solution and set up all caches.
    ///
    /// Refuses to start on a solution with the wrong route count, an
    /// unknown or duplicated job, an ineligible job or an overloaded
    /// route; the error names the offending vehicle rank and position.
    pub fn new(
        input: &'a Input,
        solution: &Solution,
        tsp: &'a dyn TspSolver,
        config: Config,
    ) -> Result<Self, Error> {
        let vehicle_count = input.vehicles.len();
        if solution.routes.len() != vehicle_count {
            return Err(Error::RouteCountMismatch {
                expected: vehicle_count,
                found: solution.routes.len(),
            });
        }

        let mut assigned = vec![false; input.jobs.len()];
        for (vehicle_rank, route) in solution.routes.iter().enumerate() {
            let mut load = Amount::zeros(input.amount_size());
            for (rank, &job) in route.iter().enumerate() {
                if job >= input.jobs.len() {
                    return Err(Error::UnknownJob {
                        vehicle_rank,
                        rank,
                        job,
                    });
                }
                if assigned[job] {
                    return Err(Error::DuplicateJob {
                        vehicle_rank,
                        rank,
                        job,
                    });
                }
                assigned[job] = true;
                if !input.vehicle_ok_with_job(vehicle_rank, job) {
                    return Err(Error::IneligibleJob {
                        vehicle_rank,
                        rank,
                        job,
                    });
                }
                load += &input.jobs[job].amount;
            }
            if !input.fits(vehicle_rank, &load) {
                return Err(Error::OverCapacity { vehicle_rank });
            }
        }

        let unassigned = (0..input.jobs.len()).filter(|&j| !assigned[j]).collect();

        let state = RouteState::new(input, solution);
        let cache = GainCache::new(input, &state);
        let nearest = NearestRankIndex::new(input, &state);
        let amount_lower_bound = input.amount_lower_bound().clone();
        let double_amount_lower_bound = &amount_lower_bound + &amount_lower_bound;

        Ok(LocalSearch {
            input,
            config,
            tsp,
            state,
            unassigned,
            cache,
            nearest,
            amount_lower_bound,
            double_amount_lower_bound,
            logger: None,
            step: 0,
            vehicle_count,
        })
    }

    /// Attach a solution logger invoked on every accepted move.
    pub fn with_logger(mut self, logger: Box<dyn SolutionLogger + 'a>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Run the full pipeline: each regime to its fixed point, from the
    /// cheapest candidate policy to the exhaustive one.
    pub fn run(&mut self) -> Result<(), Error> {
        self.log_solution();
        self.run_regime(Regime::FixedSourceAndTarget)?;
        self.run_regime(Regime::FixedSource)?;
        self.run_regime(Regime::Exhaustive)?;
        Ok(())
    }

    /// Run a single regime until no improving move remains.
    pub fn run_regime(&mut self, regime: Regime) -> Result<(), Error> {
        let v_count = self.vehicle_count;

        let mut best_ops: Vec<Vec<Option<Move>>> = vec![vec![None; v_count]; v_count];
        let mut best_gains: Vec<Vec<Gain>> = vec![vec![0; v_count]; v_count];

        // Every ordered pair is a candidate for the first sweep.
        let mut pairs: Vec<(usize, usize)> = Vec::with_capacity(v_count * v_count);
        for source in 0..v_count {
            for target in 0..v_count {
                if source != target {
                    pairs.push((source, target));
                }
            }
        }

        loop {
            for &(source, target) in &pairs {
                self.find_relocate(regime, source, target, &mut best_gains, &mut best_ops);
            }
            for &(source, target) in &pairs {
                self.find_exchange(regime, source, target, &mut best_gains, &mut best_ops);
            }
            for &(source, target) in &pairs {
                self.find_or_opt(regime, source, target, &mut best_gains, &mut best_ops);
            }
            for &(source, target) in &pairs {
                self.find_cross_exchange(regime, source, target, &mut best_gains, &mut best_ops);
            }

            // Best improving pair over the whole table, smallest pair on
            // ties.
            let mut best_gain: Gain = 0;
            let mut best_source = 0;
            let mut best_target = 0;
            for source in 0..v_count {
                for target in 0..v_count {
                    if source != target && best_gains[source][target] > best_gain {
                        best_gain = best_gains[source][target];
                        best_source = source;
                        best_target = target;
                    }
                }
            }

            if best_gain <= 0 {
                break;
            }

            let op = best_ops[best_source][best_target]
                .take()
                .expect("best gain recorded without an operator");

            op.log(self.input, &self.state);
            op.apply(self.input, &mut self.state);

            self.run_tsp(best_source)?;
            self.run_tsp(best_target)?;

            self.state.update_amounts(self.input, best_source);
            self.state.update_amounts(self.input, best_target);

            self.try_job_additions(&op.addition_candidates());

            self.log_solution();

            self.cache.rebuild(self.input, &self.state, best_source);
            self.cache.rebuild(self.input, &self.state, best_target);

            self.debug_assert_feasible(best_source);
            self.debug_assert_feasible(best_target);

            // Only pairs touching a mutated route need re-testing; their
            // recorded gains are stale, everything else carries over.
            pairs.clear();
            best_gains[best_source] = vec![0; v_count];
            best_gains[best_target] = vec![0; v_count];

            pairs.push((best_source, best_target));
            pairs.push((best_target, best_source));
            if regime == Regime::FixedSourceAndTarget {
                self.nearest
                    .rebuild_pair(self.input, &self.state, best_source, best_target);
                self.nearest
                    .rebuild_pair(self.input, &self.state, best_target, best_source);
            }

            for v in 0..v_count {
                if v == best_source || v == best_target {
                    continue;
                }

                pairs.push((best_source, v));
                pairs.push((v, best_source));
                best_gains[v][best_source] = 0;
                pairs.push((best_target, v));
                pairs.push((v, best_target));
                best_gains[v][best_target] = 0;

                if regime == Regime::FixedSourceAndTarget {
                    self.nearest.rebuild_pair(self.input, &self.state, best_source, v);
                    self.nearest.rebuild_pair(self.input, &self.state, v, best_source);
                    self.nearest.rebuild_pair(self.input, &self.state, best_target, v);
                    self.nearest.rebuild_pair(self.input, &self.state, v, best_target);
                }
            }
        }

        Ok(())
    }

    /// The current solution.
    pub fn solution(&self) -> Solution {
        Solution::new(self.state.routes().to_vec())
    }

    /// Jobs currently assigned to no route.
    pub fn unassigned(&self) -> &BTreeSet<usize> {
        &self.unassigned
    }

    fn find_relocate(
        &self,
        regime: Regime,
        source: usize,
        target: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Move>>],
    ) {
        if !self.target_can_take(target, &self.amount_lower_bound) {
            return;
        }
        if self.state.route(source).is_empty() {
            return;
        }

        for s_rank in self.source_node_ranks(regime, source) {
            let t_ranks = match regime {
                Regime::FixedSourceAndTarget => {
                    // Put the chosen job before the nearest "from" job in
                    // the target route, or after the nearest "to" job (at
                    // 0 in an empty route).
                    let mut ranks = Vec::with_capacity(2);
                    push_unique(&mut ranks, self.nearest.from_rank(source, target, s_rank));
                    let after_to = if self.state.route(target).is_empty() {
                        0
                    } else {
                        self.nearest.to_rank(source, target, s_rank) + 1
                    };
                    push_unique(&mut ranks, after_to);
                    ranks
                }
                _ => (0..=self.state.len(target)).collect(),
            };

            for t_rank in t_ranks {
                let op = Move::Relocate(Relocate::new(source, s_rank, target, t_rank));
                self.consider(op, source, target, best_gains, best_ops);
            }
        }
    }

    fn find_exchange(
        &self,
        regime: Regime,
        source: usize,
        target: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Move>>],
    ) {
        // Symmetric operator: the exhaustive regime skips mirrored pairs.
        if regime == Regime::Exhaustive && target <= source {
            return;
        }
        if self.state.route(source).is_empty() || self.state.route(target).is_empty() {
            return;
        }

        for s_rank in self.source_node_ranks(regime, source) {
            let t_len = self.state.len(target);
            let t_ranks = match regime {
                Regime::FixedSourceAndTarget => {
                    let mut ranks = Vec::with_capacity(4);

                    // Swap with the job closest from the previous job in
                    // the source route.
                    if s_rank > 0 {
                        push_unique(
                            &mut ranks,
                            self.nearest.from_rank(source, target, s_rank - 1),
                        );
                    }

                    // Swap with the job closest to the next job in the
                    // source route.
                    if s_rank + 1 < self.state.len(source) {
                        push_unique(&mut ranks, self.nearest.to_rank(source, target, s_rank + 1));
                    }

                    // Swap with the job before the one closest from the
                    // chosen job, and with the job after the one closest
                    // to it, clamped to the route ends.
                    let nearest_from = self.nearest.from_rank(source, target, s_rank);
                    push_unique(&mut ranks, nearest_from.saturating_sub(1));

                    let nearest_to = self.nearest.to_rank(source, target, s_rank);
                    push_unique(
                        &mut ranks,
                        if nearest_to == t_len - 1 {
                            nearest_to
                        } else {
                            nearest_to + 1
                        },
                    );

                    ranks
                }
                _ => (0..t_len).collect(),
            };

            for t_rank in t_ranks {
                let op = Move::Exchange(Exchange::new(source, s_rank, target, t_rank));
                self.consider(op, source, target, best_gains, best_ops);
            }
        }
    }

    fn find_or_opt(
        &self,
        regime: Regime,
        source: usize,
        target: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Move>>],
    ) {
        if !self.target_can_take(target, &self.double_amount_lower_bound) {
            return;
        }
        if self.state.len(source) < 2 {
            return;
        }

        for s_rank in self.source_edge_ranks(regime, source) {
            let t_ranks = match regime {
                Regime::FixedSourceAndTarget => {
                    // Put the chosen segment before the job nearest from
                    // its tail, or after the job nearest to its head (at
                    // 0 in an empty route).
                    let mut ranks = Vec::with_capacity(2);
                    push_unique(
                        &mut ranks,
                        self.nearest.from_rank(source, target, s_rank + 1),
                    );
                    let after_to = if self.state.route(target).is_empty() {
                        0
                    } else {
                        self.nearest.to_rank(source, target, s_rank) + 1
                    };
                    push_unique(&mut ranks, after_to);
                    ranks
                }
                _ => (0..=self.state.len(target)).collect(),
            };

            for t_rank in t_ranks {
                let op = Move::OrOpt(OrOpt::new(source, s_rank, target, t_rank));
                self.consider(op, source, target, best_gains, best_ops);
            }
        }
    }

    fn find_cross_exchange(
        &self,
        regime: Regime,
        source: usize,
        target: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Move>>],
    ) {
        // Symmetric operator: the exhaustive regime skips mirrored pairs.
        if regime == Regime::Exhaustive && target <= source {
            return;
        }
        if self.state.len(source) < 2 || self.state.len(target) < 2 {
            return;
        }

        for s_rank in self.source_edge_ranks(regime, source) {
            let t_len = self.state.len(target);
            let t_ranks = match regime {
                Regime::FixedSourceAndTarget => {
                    let mut ranks = Vec::with_capacity(4);

                    // Swap with the segment starting at the job closest
                    // from the previous job in the source route, clamped
                    // to the last edge.
                    if s_rank > 0 {
                        let nearest_from = self.nearest.from_rank(source, target, s_rank - 1);
                        push_unique(&mut ranks, nearest_from.min(t_len - 2));
                    }

                    // Swap with the segment ending at the job closest to
                    // the next job in the source route, clamped to the
                    // first edge.
                    if s_rank + 2 < self.state.len(source) {
                        let nearest_to = self.nearest.to_rank(source, target, s_rank + 2);
                        push_unique(&mut ranks, nearest_to.saturating_sub(1));
                    }

                    // Swap with the segment ending before the job closest
                    // from the segment's tail, and with the segment
                    // starting after the job closest to its head.
                    let nearest_from = self.nearest.from_rank(source, target, s_rank + 1);
                    push_unique(&mut ranks, nearest_from.saturating_sub(2));

                    let nearest_to = self.nearest.to_rank(source, target, s_rank);
                    push_unique(
                        &mut ranks,
                        if nearest_to < t_len - 2 {
                            nearest_to + 1
                        } else {
                            t_len - 2
                        },
                    );

                    ranks
                }
                _ => (0..t_len - 1).collect(),
            };

            for t_rank in t_ranks {
                let op = Move::CrossExchange(CrossExchange::new(source, s_rank, target, t_rank));
                self.consider(op, source, target, best_gains, best_ops);
            }
        }
    }

    /// Source ranks to try for the single-job operators.
    fn source_node_ranks(&self, regime: Regime, source: usize) -> Vec<usize> {
        match regime {
            Regime::Exhaustive => (0..self.state.len(source)).collect(),
            _ => vec![self.cache.node_candidate(source)],
        }
    }

    /// Source edge ranks to try for the segment operators.
    fn source_edge_ranks(&self, regime: Regime, source: usize) -> Vec<usize> {
        match regime {
            Regime::Exhaustive => (0..self.state.len(source) - 1).collect(),
            _ => vec![self.cache.edge_candidate(source)],
        }
    }

    /// Record `op` when it is valid and beats the pair's current best.
    fn consider(
        &self,
        op: Move,
        source: usize,
        target: usize,
        best_gains: &mut [Vec<Gain>],
        best_ops: &mut [Vec<Option<Move>>],
    ) {
        if !op.is_valid(self.input, &self.state) {
            return;
        }
        let gain = op.gain(self.input, &self.state, &self.cache);
        if gain > best_gains[source][target] {
            best_gains[source][target] = gain;
            best_ops[source][target] = Some(op);
        }
    }

    /// Coarse capacity prescreen: skip targets that cannot fit even
    /// `lower_bound` more demand.
    fn target_can_take(&self, target: usize, lower_bound: &Amount) -> bool {
        let load = self.state.total_amount(self.input, target) + lower_bound;
        self.input.fits(target, &load)
    }

    /// Greedy cheapest insertion of unassigned jobs into `routes`.
    ///
    /// Repeatedly picks the feasible (job, route, rank) triple with the
    /// lowest added cost and inserts it, until nothing fits anymore. Any
    /// feasible insertion is accepted: serving a pending job outranks
    /// its routing cost.
    fn try_job_additions(&mut self, routes: &[usize]) {
        loop {
            let mut best_cost = Gain::MAX;
            let mut best: Option<(usize, usize, usize)> = None;

            for &v in routes {
                let v_amount = self.state.total_amount(self.input, v);

                for &job in &self.unassigned {
                    if !self.input.vehicle_ok_with_job(v, job) {
                        continue;
                    }
                    let load = &v_amount + &self.input.jobs[job].amount;
                    if !self.input.fits(v, &load) {
                        continue;
                    }

                    for rank in 0..=self.state.len(v) {
                        let cost = utils::job_insertion_cost(self.input, &self.state, v, rank, job);
                        if cost < best_cost {
                            best_cost = cost;
                            best = Some((job, v, rank));
                        }
                    }
                }
            }

            match best {
                Some((job, vehicle_rank, rank)) => {
                    debug!(
                        "adding job {} at rank {} in route for vehicle {}",
                        self.input.jobs[job].id, rank, self.input.vehicles[vehicle_rank].id
                    );
                    self.state.insert(self.input, vehicle_rank, rank, job);
                    self.unassigned.remove(&job);
                }
                None => break,
            }
        }
    }

    /// Hand one route to the TSP solver, adopting the result only when
    /// strictly cheaper.
    fn run_tsp(&mut self, vehicle_rank: usize) -> Result<(), Error> {
        if self.state.route(vehicle_rank).is_empty() {
            return Ok(());
        }

        let current = self.state.route(vehicle_rank);
        let before = route_cost(self.input, vehicle_rank, current);
        let reordered = self.tsp.solve(vehicle_rank, current, self.config.tsp_threads);

        if !is_permutation(current, &reordered) {
            return Err(Error::NonPermutation { vehicle_rank });
        }

        let after = route_cost(self.input, vehicle_rank, &reordered);
        if after < before {
            debug!(
                "rearrange gain for vehicle {}: {}",
                self.input.vehicles[vehicle_rank].id,
                before - after
            );
            let len = self.state.len(vehicle_rank);
            self.state
                .replace_range(self.input, vehicle_rank, 0, len, &reordered);
        }

        Ok(())
    }

    fn log_solution(&mut self) {
        if let Some(logger) = self.logger.as_mut() {
            logger.log_solution(self.state.routes(), self.step);
            self.step += 1;
        }
    }

    fn debug_assert_feasible(&self, vehicle_rank: usize) {
        debug_assert!(
            self.input.fits(
                vehicle_rank,
                &self.state.total_amount(self.input, vehicle_rank)
            ),
            "route for vehicle at rank {} exceeds capacity after a move",
            vehicle_rank
        );
    }
}

fn push_unique(ranks: &mut Vec<usize>, rank: usize) {
    if !ranks.contains(&rank) {
        ranks.push(rank);
    }
}

fn is_permutation(before: &[usize], after: &[usize]) -> bool {
    if before.len() != after.len() {
        return false;
    }
    let mut sorted_before = before.to_vec();
    let mut sorted_after = after.to_vec();
    sorted_before.sort_unstable();
    sorted_after.sort_unstable();
    sorted_before == sorted_after
}
