//! Unit tests for amounts, problem inputs and route costing.

use cvrp_ls::{route_cost, Amount, Error, Input, Job, Matrix, Solution, Vehicle};

fn small_matrix() -> Matrix {
    // M[i][j] = 10 * i + j off the diagonal.
    let rows = (0..4)
        .map(|i| {
            (0..4)
                .map(|j| if i == j { 0 } else { (10 * i + j) as i64 })
                .collect()
        })
        .collect();
    Matrix::from_rows(rows).unwrap()
}

#[test]
fn test_amount_componentwise_order() {
    let a = Amount::new(vec![1, 2]);
    let b = Amount::new(vec![2, 2]);
    let c = Amount::new(vec![2, 1]);

    assert!(a <= b);
    assert!(a < b);
    assert!(b >= a);

    // Incomparable in both directions.
    assert!(!(a <= c));
    assert!(!(c <= a));

    assert!(a <= a.clone());
}

#[test]
fn test_amount_arithmetic() {
    let mut a = Amount::new(vec![1, 2]);
    let b = Amount::new(vec![3, 4]);

    assert_eq!(&a + &b, Amount::new(vec![4, 6]));
    assert_eq!(&b - &a, Amount::new(vec![2, 2]));

    a += &b;
    assert_eq!(a, Amount::new(vec![4, 6]));
    a -= &b;
    assert_eq!(a, Amount::new(vec![1, 2]));

    assert_eq!(Amount::zeros(3), Amount::new(vec![0, 0, 0]));
    assert_eq!(b.min(&Amount::new(vec![4, 1])), Amount::new(vec![3, 1]));
}

#[test]
fn test_matrix_rejects_ragged_rows() {
    let result = Matrix::from_rows(vec![vec![0, 1], vec![1]]);
    assert_eq!(
        result.unwrap_err(),
        Error::MatrixNotSquare {
            row: 1,
            len: 1,
            size: 2
        }
    );
}

#[test]
fn test_input_rejects_out_of_bounds_locations() {
    let jobs = vec![Job::new(1, 7, Amount::new(vec![1]))];
    let vehicles = vec![Vehicle::new(1, Some(0), Some(0), Amount::new(vec![1]))];
    let result = Input::new(jobs, vehicles, small_matrix());
    assert_eq!(
        result.unwrap_err(),
        Error::LocationOutOfBounds {
            location: 7,
            size: 4
        }
    );

    let jobs = vec![Job::new(1, 1, Amount::new(vec![1]))];
    let vehicles = vec![Vehicle::new(1, Some(9), None, Amount::new(vec![1]))];
    let result = Input::new(jobs, vehicles, small_matrix());
    assert_eq!(
        result.unwrap_err(),
        Error::LocationOutOfBounds {
            location: 9,
            size: 4
        }
    );
}

#[test]
fn test_input_rejects_mismatched_amounts() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1, 1])),
        Job::new(2, 2, Amount::new(vec![1])),
    ];
    let vehicles = vec![Vehicle::new(1, Some(0), Some(0), Amount::new(vec![2, 2]))];
    let result = Input::new(jobs, vehicles, small_matrix());
    assert_eq!(
        result.unwrap_err(),
        Error::AmountSizeMismatch {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_input_amount_lower_bound() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![3, 1])),
        Job::new(2, 2, Amount::new(vec![1, 5])),
        Job::new(3, 3, Amount::new(vec![2, 2])),
    ];
    let vehicles = vec![Vehicle::new(1, Some(0), Some(0), Amount::new(vec![9, 9]))];
    let input = Input::new(jobs, vehicles, small_matrix()).unwrap();

    assert_eq!(*input.amount_lower_bound(), Amount::new(vec![1, 1]));
}

#[test]
fn test_eligibility_table() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1])),
        Job::new(2, 2, Amount::new(vec![1])),
    ];
    let vehicles = vec![
        Vehicle::new(1, Some(0), Some(0), Amount::new(vec![2])),
        Vehicle::new(2, Some(0), Some(0), Amount::new(vec![2])),
    ];
    let input = Input::new(jobs, vehicles, small_matrix())
        .unwrap()
        .with_eligibility(|vehicle, job| !(vehicle.id == 2 && job.id == 2));

    assert!(input.vehicle_ok_with_job(0, 0));
    assert!(input.vehicle_ok_with_job(0, 1));
    assert!(input.vehicle_ok_with_job(1, 0));
    assert!(!input.vehicle_ok_with_job(1, 1));
}

#[test]
fn test_route_cost_closed_tour() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1])),
        Job::new(2, 2, Amount::new(vec![1])),
    ];
    let vehicles = vec![Vehicle::new(1, Some(0), Some(0), Amount::new(vec![2]))];
    let input = Input::new(jobs, vehicles, small_matrix()).unwrap();

    // 0 -> 1 -> 2 -> 0.
    assert_eq!(route_cost(&input, 0, &[0, 1]), 1 + 12 + 20);
    // Empty route: the vehicle stays home.
    assert_eq!(route_cost(&input, 0, &[]), 0);
}

#[test]
fn test_route_cost_open_tours() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1])),
        Job::new(2, 2, Amount::new(vec![1])),
    ];
    let open_end = vec![Vehicle::new(1, Some(0), None, Amount::new(vec![2]))];
    let input = Input::new(jobs.clone(), open_end, small_matrix()).unwrap();
    assert_eq!(route_cost(&input, 0, &[0, 1]), 1 + 12);

    let open_start = vec![Vehicle::new(1, None, Some(0), Amount::new(vec![2]))];
    let input = Input::new(jobs.clone(), open_start, small_matrix()).unwrap();
    assert_eq!(route_cost(&input, 0, &[0, 1]), 12 + 20);

    let open_both = vec![Vehicle::new(1, None, None, Amount::new(vec![2]))];
    let input = Input::new(jobs, open_both, small_matrix()).unwrap();
    assert_eq!(route_cost(&input, 0, &[0, 1]), 12);
}

#[test]
fn test_solution_total_cost() {
    let jobs = vec![
        Job::new(1, 1, Amount::new(vec![1])),
        Job::new(2, 2, Amount::new(vec![1])),
        Job::new(3, 3, Amount::new(vec![1])),
    ];
    let vehicles = vec![
        Vehicle::new(1, Some(0), Some(0), Amount::new(vec![2])),
        Vehicle::new(2, Some(0), Some(0), Amount::new(vec![2])),
    ];
    let input = Input::new(jobs, vehicles, small_matrix()).unwrap();

    let solution = Solution::new(vec![vec![0, 1], vec![2]]);
    assert_eq!(
        solution.total_cost(&input),
        (1 + 12 + 20) + (3 + 30)
    );
}
