//! Errors surfaced by input validation and the search engine.

use std::error;
use std::fmt;

/// Failures the engine recognizes.
///
/// None of these are recoverable: construction errors mean the input or
/// the initial solution is unusable, and `NonPermutation` means the
/// injected TSP solver broke its contract mid-run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cost matrix has a row whose length differs from the row count.
    MatrixNotSquare { row: usize, len: usize, size: usize },
    /// A job or depot references a matrix index outside the matrix.
    LocationOutOfBounds { location: usize, size: usize },
    /// A demand or capacity vector has the wrong number of components.
    AmountSizeMismatch { expected: usize, found: usize },
    /// The initial solution does not have one route per vehicle.
    RouteCountMismatch { expected: usize, found: usize },
    /// A route references a job outside the job list.
    UnknownJob {
        vehicle_rank: usize,
        rank: usize,
        job: usize,
    },
    /// A job appears more than once across the initial routes.
    DuplicateJob {
        vehicle_rank: usize,
        rank: usize,
        job: usize,
    },
    /// A route contains a job its vehicle may not serve.
    IneligibleJob {
        vehicle_rank: usize,
        rank: usize,
        job: usize,
    },
    /// A route's total demand exceeds its vehicle's capacity.
    OverCapacity { vehicle_rank: usize },
    /// The TSP solver returned a route that is not a permutation of its input.
    NonPermutation { vehicle_rank: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MatrixNotSquare { row, len, size } => write!(
                f,
                "cost matrix is not square: row {} has {} entries, expected {}",
                row, len, size
            ),
            Error::LocationOutOfBounds { location, size } => write!(
                f,
                "location index {} is outside the {}x{} cost matrix",
                location, size, size
            ),
            Error::AmountSizeMismatch { expected, found } => write!(
                f,
                "amount has {} components, expected {}",
                found, expected
            ),
            Error::RouteCountMismatch { expected, found } => write!(
                f,
                "solution has {} routes for {} vehicles",
                found, expected
            ),
            Error::UnknownJob {
                vehicle_rank,
                rank,
                job,
            } => write!(
                f,
                "route for vehicle at rank {} references unknown job {} at rank {}",
                vehicle_rank, job, rank
            ),
            Error::DuplicateJob {
                vehicle_rank,
                rank,
                job,
            } => write!(
                f,
                "job {} appears again at rank {} in route for vehicle at rank {}",
                job, rank, vehicle_rank
            ),
            Error::IneligibleJob {
                vehicle_rank,
                rank,
                job,
            } => write!(
                f,
                "vehicle at rank {} may not serve job {} at rank {}",
                vehicle_rank, job, rank
            ),
            Error::OverCapacity { vehicle_rank } => write!(
                f,
                "route for vehicle at rank {} exceeds its capacity",
                vehicle_rank
            ),
            Error::NonPermutation { vehicle_rank } => write!(
                f,
                "TSP solver returned a non-permutation for vehicle at rank {}",
                vehicle_rank
            ),
        }
    }
}

impl error::Error for Error {}
