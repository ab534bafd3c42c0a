//! # cvrp-ls
//!
//! An inter-route local search engine for the Capacitated Vehicle
//! Routing Problem (CVRP).
//!
//! Starting from a feasible assignment of jobs to vehicles, the engine
//! repeatedly applies four inter-route move operators (relocate,
//! exchange, Or-opt and CROSS-exchange) to reduce total travel cost
//! while keeping every route within its vehicle's capacity. Whenever a
//! move makes room, pending unassigned jobs are re-inserted by cheapest
//! insertion, and each mutated route is handed to a pluggable per-route
//! TSP solver for re-ordering.
//!
//! Moves are searched in three regimes of increasing effort: candidate
//! ranks pinned on both sides, pinned on the source side only, and
//! exhaustive. [`LocalSearch::run`] chains all three; each is also
//! individually reachable through [`LocalSearch::run_regime`].

pub mod amount;
pub mod config;
pub mod error;
pub mod local_search;
pub mod problem;
pub mod solution;
pub mod tsp;

pub use crate::amount::Amount;
pub use crate::config::Config;
pub use crate::error::Error;
pub use crate::local_search::{LocalSearch, Regime, SolutionLogger};
pub use crate::problem::{Cost, Gain, Input, Job, Matrix, Vehicle};
pub use crate::solution::{route_cost, Solution};
pub use crate::tsp::{NoopTsp, TspSolver};
