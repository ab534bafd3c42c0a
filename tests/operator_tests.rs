//! Unit tests for the four move operators.

use cvrp_ls::local_search::cross_exchange::CrossExchange;
use cvrp_ls::local_search::exchange::Exchange;
use cvrp_ls::local_search::gains::GainCache;
use cvrp_ls::local_search::or_opt::OrOpt;
use cvrp_ls::local_search::relocate::Relocate;
use cvrp_ls::local_search::route_state::RouteState;
use cvrp_ls::{route_cost, Amount, Cost, Input, Job, Matrix, Solution, Vehicle};

/// Irregular but deterministic costs so that operator gains are nonzero.
fn irregular_matrix(size: usize) -> Matrix {
    let rows = (0..size)
        .map(|i| {
            (0..size)
                .map(|j| {
                    if i == j {
                        0
                    } else {
                        ((i * 7 + j * 3) % 13 + 1) as i64
                    }
                })
                .collect()
        })
        .collect();
    Matrix::from_rows(rows).unwrap()
}

fn unit_jobs(count: usize) -> Vec<Job> {
    (0..count)
        .map(|k| Job::new(k as u64 + 1, k + 1, Amount::new(vec![1])))
        .collect()
}

fn closed_vehicle(id: u64, capacity: i64) -> Vehicle {
    Vehicle::new(id, Some(0), Some(0), Amount::new(vec![capacity]))
}

/// Two closed routes of three jobs each over seven locations.
fn two_route_setup(capacity: i64) -> (Input, RouteState) {
    let input = Input::new(
        unit_jobs(6),
        vec![closed_vehicle(1, capacity), closed_vehicle(2, capacity)],
        irregular_matrix(7),
    )
    .unwrap();
    let state = RouteState::new(&input, &Solution::new(vec![vec![0, 1, 2], vec![3, 4, 5]]));
    (input, state)
}

fn state_cost(input: &Input, state: &RouteState) -> Cost {
    state
        .routes()
        .iter()
        .enumerate()
        .map(|(v, route)| route_cost(input, v, route))
        .sum()
}

#[test]
fn test_relocate_gain_matches_applied_cost() {
    let (input, mut state) = two_route_setup(100);
    let cache = GainCache::new(&input, &state);

    let op = Relocate::new(0, 1, 1, 1);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    assert_eq!(state.route(0), &[0, 2]);
    assert_eq!(state.route(1), &[3, 1, 4, 5]);
}

#[test]
fn test_relocate_into_empty_route() {
    let input = Input::new(
        unit_jobs(2),
        vec![closed_vehicle(1, 100), closed_vehicle(2, 100)],
        irregular_matrix(3),
    )
    .unwrap();
    let mut state = RouteState::new(&input, &Solution::new(vec![vec![0, 1], vec![]]));
    let cache = GainCache::new(&input, &state);

    let op = Relocate::new(0, 0, 1, 0);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    assert_eq!(state.route(1), &[0]);
}

#[test]
fn test_relocate_roundtrip_restores_routes_with_zero_net_gain() {
    let (input, mut state) = two_route_setup(100);
    let mut cache = GainCache::new(&input, &state);

    let original_routes = state.routes().to_vec();

    let forward = Relocate::new(0, 1, 1, 1);
    let forward_gain = forward.gain(&input, &state, &cache);
    forward.apply(&input, &mut state);
    cache.rebuild(&input, &state, 0);
    cache.rebuild(&input, &state, 1);

    let inverse = Relocate::new(1, 1, 0, 1);
    let inverse_gain = inverse.gain(&input, &state, &cache);
    inverse.apply(&input, &mut state);

    assert_eq!(state.routes(), original_routes.as_slice());
    assert_eq!(forward_gain + inverse_gain, 0);
}

#[test]
fn test_relocate_rejected_by_capacity() {
    // Both vehicles are exactly full.
    let (input, state) = two_route_setup(3);
    let op = Relocate::new(0, 1, 1, 1);
    assert!(!op.is_valid(&input, &state));
}

#[test]
fn test_relocate_rejected_by_eligibility() {
    let input = Input::new(
        unit_jobs(6),
        vec![closed_vehicle(1, 100), closed_vehicle(2, 100)],
        irregular_matrix(7),
    )
    .unwrap()
    .with_eligibility(|vehicle, job| !(vehicle.id == 2 && job.id == 2));
    let state = RouteState::new(&input, &Solution::new(vec![vec![0, 1, 2], vec![3, 4, 5]]));

    // Job 2 may not ride on vehicle 2.
    assert!(!Relocate::new(0, 1, 1, 1).is_valid(&input, &state));
    assert!(Relocate::new(0, 0, 1, 1).is_valid(&input, &state));
}

#[test]
fn test_exchange_gain_matches_applied_cost() {
    let (input, mut state) = two_route_setup(100);
    let cache = GainCache::new(&input, &state);

    let op = Exchange::new(0, 1, 1, 2);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    assert_eq!(state.route(0), &[0, 5, 2]);
    assert_eq!(state.route(1), &[3, 4, 1]);
}

#[test]
fn test_exchange_valid_on_full_routes_with_equal_demands() {
    // Capacity checks use the demand delta: swapping equal demands
    // through two full routes stays feasible.
    let (input, state) = two_route_setup(3);
    assert!(Exchange::new(0, 0, 1, 0).is_valid(&input, &state));
}

#[test]
fn test_exchange_rejected_when_swap_overloads() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![2])),
        Job::new(2, 2, Amount::new(vec![1])),
    ];
    let input = Input::new(
        jobs,
        vec![closed_vehicle(1, 2), closed_vehicle(2, 1)],
        irregular_matrix(3),
    )
    .unwrap();
    let state = RouteState::new(&input, &Solution::new(vec![vec![0], vec![1]]));

    // Moving the demand-2 job into the capacity-1 vehicle cannot work.
    assert!(!Exchange::new(0, 0, 1, 0).is_valid(&input, &state));
}

#[test]
fn test_or_opt_gain_matches_applied_cost() {
    let (input, mut state) = two_route_setup(100);
    let cache = GainCache::new(&input, &state);

    let op = OrOpt::new(0, 0, 1, 3);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    // The segment keeps its order at the insertion point.
    assert_eq!(state.route(0), &[2]);
    assert_eq!(state.route(1), &[3, 4, 5, 0, 1]);
}

#[test]
fn test_or_opt_into_empty_route() {
    let input = Input::new(
        unit_jobs(3),
        vec![closed_vehicle(1, 100), closed_vehicle(2, 100)],
        irregular_matrix(4),
    )
    .unwrap();
    let mut state = RouteState::new(&input, &Solution::new(vec![vec![0, 1, 2], vec![]]));
    let cache = GainCache::new(&input, &state);

    let op = OrOpt::new(0, 1, 1, 0);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    assert_eq!(state.route(0), &[0]);
    assert_eq!(state.route(1), &[1, 2]);
}

#[test]
fn test_or_opt_rejected_by_capacity() {
    let (input, state) = two_route_setup(3);
    assert!(!OrOpt::new(0, 0, 1, 0).is_valid(&input, &state));
}

#[test]
fn test_cross_exchange_gain_matches_applied_cost() {
    let (input, mut state) = two_route_setup(100);
    let cache = GainCache::new(&input, &state);

    let op = CrossExchange::new(0, 0, 1, 1);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
    // Both segments keep their internal order.
    assert_eq!(state.route(0), &[4, 5, 2]);
    assert_eq!(state.route(1), &[3, 0, 1]);
}

#[test]
fn test_cross_exchange_valid_on_full_routes_with_equal_demands() {
    let (input, state) = two_route_setup(3);
    assert!(CrossExchange::new(0, 0, 1, 0).is_valid(&input, &state));
}

#[test]
fn test_cross_exchange_rejected_by_eligibility() {
    let input = Input::new(
        unit_jobs(6),
        vec![closed_vehicle(1, 100), closed_vehicle(2, 100)],
        irregular_matrix(7),
    )
    .unwrap()
    .with_eligibility(|vehicle, job| !(vehicle.id == 1 && job.id == 4));
    let state = RouteState::new(&input, &Solution::new(vec![vec![0, 1, 2], vec![3, 4, 5]]));

    // Job 4 sits in the target's first segment and may not ride on
    // vehicle 1; the second segment is unrestricted.
    assert!(!CrossExchange::new(0, 0, 1, 0).is_valid(&input, &state));
    assert!(CrossExchange::new(0, 0, 1, 1).is_valid(&input, &state));
}

#[test]
fn test_swap_operators_are_symmetric_in_their_routes() {
    let (input, state) = two_route_setup(100);
    let cache = GainCache::new(&input, &state);

    let forward = Exchange::new(0, 1, 1, 2);
    let mirrored = Exchange::new(1, 2, 0, 1);
    assert_eq!(
        forward.gain(&input, &state, &cache),
        mirrored.gain(&input, &state, &cache)
    );

    let forward = CrossExchange::new(0, 0, 1, 1);
    let mirrored = CrossExchange::new(1, 1, 0, 0);
    assert_eq!(
        forward.gain(&input, &state, &cache),
        mirrored.gain(&input, &state, &cache)
    );
}

#[test]
fn test_open_tour_relocate_gain_matches_applied_cost() {
    let vehicles = vec![
        Vehicle::new(1, Some(0), None, Amount::new(vec![100])),
        Vehicle::new(2, None, Some(0), Amount::new(vec![100])),
    ];
    let input = Input::new(unit_jobs(4), vehicles, irregular_matrix(5)).unwrap();
    let mut state = RouteState::new(&input, &Solution::new(vec![vec![0, 1], vec![2, 3]]));
    let cache = GainCache::new(&input, &state);

    // Move the open-end route's last job to the head of the open-start
    // route.
    let op = Relocate::new(0, 1, 1, 0);
    assert!(op.is_valid(&input, &state));

    let before = state_cost(&input, &state);
    let gain = op.gain(&input, &state, &cache);
    op.apply(&input, &mut state);
    let after = state_cost(&input, &state);

    assert_eq!(before - after, gain);
}
