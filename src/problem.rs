//! Problem definition: jobs, vehicles and the travel cost matrix.

use crate::amount::Amount;
use crate::error::Error;
use serde::{Deserialize, Serialize};

/// A directed travel cost between two matrix locations.
pub type Cost = i64;

/// A signed cost difference; positive values mean an improvement.
pub type Gain = i64;

/// A delivery to perform, tied to a location in the cost matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    /// Index of this job's location in the cost matrix.
    pub index: usize,
    /// Demand, one component per capacity dimension.
    pub amount: Amount,
}

impl Job {
    /// Create a new job.
    pub fn new(id: u64, index: usize, amount: Amount) -> Self {
        Job { id, index, amount }
    }
}

/// A vehicle with optional start and end depots.
///
/// A missing depot makes the route open on that side: the corresponding
/// leg contributes no cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: u64,
    /// Matrix index of the start depot, if any.
    pub start: Option<usize>,
    /// Matrix index of the end depot, if any.
    pub end: Option<usize>,
    pub capacity: Amount,
}

impl Vehicle {
    /// Create a new vehicle.
    pub fn new(id: u64, start: Option<usize>, end: Option<usize>, capacity: Amount) -> Self {
        Vehicle {
            id,
            start,
            end,
            capacity,
        }
    }

    pub fn has_start(&self) -> bool {
        self.start.is_some()
    }

    pub fn has_end(&self) -> bool {
        self.end.is_some()
    }
}

/// A square matrix of directed travel costs, not necessarily symmetric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Matrix {
    size: usize,
    data: Vec<Cost>,
}

impl Matrix {
    /// Build a matrix from its rows, checking that it is square.
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, Error> {
        let size = rows.len();
        let mut data = Vec::with_capacity(size * size);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(Error::MatrixNotSquare {
                    row,
                    len: values.len(),
                    size,
                });
            }
            data.extend(values);
        }

        Ok(Matrix { size, data })
    }

    /// Directed cost from one location to another.
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.data[from * self.size + to]
    }

    /// Number of locations.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// The full problem handed to the engine: jobs, vehicles, travel costs
/// and the vehicle/job eligibility table.
#[derive(Debug, Clone)]
pub struct Input {
    pub jobs: Vec<Job>,
    pub vehicles: Vec<Vehicle>,
    matrix: Matrix,
    /// `compatibility[v][j]` is true when vehicle `v` may serve job `j`.
    compatibility: Vec<Vec<bool>>,
    amount_size: usize,
    amount_lower_bound: Amount,
}

impl Input {
    /// Bundle jobs, vehicles and a cost matrix into a validated input.
    ///
    /// Every vehicle is initially considered compatible with every job;
    /// restrict this with [`Input::with_eligibility`].
    pub fn new(jobs: Vec<Job>, vehicles: Vec<Vehicle>, matrix: Matrix) -> Result<Self, Error> {
        let amount_size = jobs
            .first()
            .map(|j| j.amount.size())
            .or_else(|| vehicles.first().map(|v| v.capacity.size()))
            .unwrap_or(0);

        for job in &jobs {
            if job.index >= matrix.size() {
                return Err(Error::LocationOutOfBounds {
                    location: job.index,
                    size: matrix.size(),
                });
            }
            if job.amount.size() != amount_size {
                return Err(Error::AmountSizeMismatch {
                    expected: amount_size,
                    found: job.amount.size(),
                });
            }
        }

        for vehicle in &vehicles {
            for depot in [vehicle.start, vehicle.end].into_iter().flatten() {
                if depot >= matrix.size() {
                    return Err(Error::LocationOutOfBounds {
                        location: depot,
                        size: matrix.size(),
                    });
                }
            }
            if vehicle.capacity.size() != amount_size {
                return Err(Error::AmountSizeMismatch {
                    expected: amount_size,
                    found: vehicle.capacity.size(),
                });
            }
        }

        // Componentwise lower bound on any single job's demand, used by
        // the engine's capacity prescreens.
        let amount_lower_bound = jobs
            .iter()
            .map(|j| &j.amount)
            .fold(None::<Amount>, |acc, amount| match acc {
                Some(lb) => Some(lb.min(amount)),
                None => Some(amount.clone()),
            })
            .unwrap_or_else(|| Amount::zeros(amount_size));

        let compatibility = vec![vec![true; jobs.len()]; vehicles.len()];

        Ok(Input {
            jobs,
            vehicles,
            matrix,
            compatibility,
            amount_size,
            amount_lower_bound,
        })
    }

    /// Restrict the eligibility table with a predicate.
    pub fn with_eligibility<F>(mut self, ok: F) -> Self
    where
        F: Fn(&Vehicle, &Job) -> bool,
    {
        for (v, vehicle) in self.vehicles.iter().enumerate() {
            for (j, job) in self.jobs.iter().enumerate() {
                self.compatibility[v][j] = ok(vehicle, job);
            }
        }
        self
    }

    /// Whether the vehicle at `vehicle_rank` may serve job `job`.
    pub fn vehicle_ok_with_job(&self, vehicle_rank: usize, job: usize) -> bool {
        self.compatibility[vehicle_rank][job]
    }

    /// Directed travel cost between two matrix locations.
    pub fn edge_cost(&self, from: usize, to: usize) -> Cost {
        self.matrix.get(from, to)
    }

    /// Cost of the leg from a vehicle's start depot to a job, zero when
    /// the route is open at the start.
    pub fn start_cost(&self, vehicle_rank: usize, job: usize) -> Cost {
        match self.vehicles[vehicle_rank].start {
            Some(start) => self.matrix.get(start, self.jobs[job].index),
            None => 0,
        }
    }

    /// Cost of the leg from a job to a vehicle's end depot, zero when the
    /// route is open at the end.
    pub fn end_cost(&self, job: usize, vehicle_rank: usize) -> Cost {
        match self.vehicles[vehicle_rank].end {
            Some(end) => self.matrix.get(self.jobs[job].index, end),
            None => 0,
        }
    }

    /// Whether `load` fits within the capacity of the vehicle at
    /// `vehicle_rank`.
    pub fn fits(&self, vehicle_rank: usize, load: &Amount) -> bool {
        *load <= self.vehicles[vehicle_rank].capacity
    }

    /// Number of capacity dimensions.
    pub fn amount_size(&self) -> usize {
        self.amount_size
    }

    /// Componentwise lower bound on any single job's demand.
    pub fn amount_lower_bound(&self) -> &Amount {
        &self.amount_lower_bound
    }
}
