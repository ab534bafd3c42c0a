//! Tagged move variant shared by all operator families.

use crate::problem::{Gain, Input};

use super::cross_exchange::CrossExchange;
use super::exchange::Exchange;
use super::gains::GainCache;
use super::or_opt::OrOpt;
use super::relocate::Relocate;
use super::route_state::RouteState;

/// One candidate move of any family.
///
/// The driver stores the best move per ordered route pair by value in
/// this variant; each arm exposes the same surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Relocate(Relocate),
    Exchange(Exchange),
    OrOpt(OrOpt),
    CrossExchange(CrossExchange),
}

impl Move {
    /// Capacity and eligibility preconditions.
    pub fn is_valid(&self, input: &Input, state: &RouteState) -> bool {
        match self {
            Move::Relocate(op) => op.is_valid(input, state),
            Move::Exchange(op) => op.is_valid(input, state),
            Move::OrOpt(op) => op.is_valid(input, state),
            Move::CrossExchange(op) => op.is_valid(input, state),
        }
    }

    /// Cost reduction; positive means improving.
    pub fn gain(&self, input: &Input, state: &RouteState, cache: &GainCache) -> Gain {
        match self {
            Move::Relocate(op) => op.gain(input, state, cache),
            Move::Exchange(op) => op.gain(input, state, cache),
            Move::OrOpt(op) => op.gain(input, state, cache),
            Move::CrossExchange(op) => op.gain(input, state, cache),
        }
    }

    /// Mutate both routes atomically.
    pub fn apply(&self, input: &Input, state: &mut RouteState) {
        match self {
            Move::Relocate(op) => op.apply(input, state),
            Move::Exchange(op) => op.apply(input, state),
            Move::OrOpt(op) => op.apply(input, state),
            Move::CrossExchange(op) => op.apply(input, state),
        }
    }

    /// Routes whose load may have decreased, handed to the reinserter.
    pub fn addition_candidates(&self) -> [usize; 2] {
        match self {
            Move::Relocate(op) => op.addition_candidates(),
            Move::Exchange(op) => op.addition_candidates(),
            Move::OrOpt(op) => op.addition_candidates(),
            Move::CrossExchange(op) => op.addition_candidates(),
        }
    }

    /// Describe the move about to be applied.
    pub fn log(&self, input: &Input, state: &RouteState) {
        match self {
            Move::Relocate(op) => op.log(input, state),
            Move::Exchange(op) => op.log(input, state),
            Move::OrOpt(op) => op.log(input, state),
            Move::CrossExchange(op) => op.log(input, state),
        }
    }
}
