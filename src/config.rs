//! Configuration for the local search engine.

use serde::{Deserialize, Serialize};

/// Engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Thread hint forwarded to the per-route TSP solver.
    pub tsp_threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config { tsp_threads: 1 }
    }
}

impl Config {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the thread hint forwarded to the TSP solver.
    pub fn with_tsp_threads(mut self, threads: usize) -> Self {
        self.tsp_threads = threads;
        self
    }
}
