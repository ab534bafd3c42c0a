//! Multi-dimensional demand and capacity vectors.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::{Add, AddAssign, Index, Sub, SubAssign};

/// A fixed-arity vector of integer quantities.
///
/// Jobs carry an `Amount` as demand and vehicles carry one as capacity.
/// Arithmetic is componentwise. Comparison is the componentwise partial
/// order, so two amounts may be incomparable; a capacity check reads as
/// `load <= capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount(Vec<i64>);

impl Amount {
    /// Create an amount from its components.
    pub fn new(components: Vec<i64>) -> Self {
        Amount(components)
    }

    /// Create a zero amount with the given number of components.
    pub fn zeros(size: usize) -> Self {
        Amount(vec![0; size])
    }

    /// Number of components.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Access the raw components.
    pub fn components(&self) -> &[i64] {
        &self.0
    }

    /// Componentwise minimum of two amounts.
    pub fn min(&self, other: &Amount) -> Amount {
        debug_assert_eq!(self.size(), other.size());
        Amount(
            self.0
                .iter()
                .zip(&other.0)
                .map(|(a, b)| *a.min(b))
                .collect(),
        )
    }
}

impl Index<usize> for Amount {
    type Output = i64;

    fn index(&self, i: usize) -> &i64 {
        &self.0[i]
    }
}

impl PartialOrd for Amount {
    fn partial_cmp(&self, other: &Amount) -> Option<Ordering> {
        if self.size() != other.size() {
            return None;
        }

        let mut has_less = false;
        let mut has_greater = false;

        for (a, b) in self.0.iter().zip(&other.0) {
            match a.cmp(b) {
                Ordering::Less => has_less = true,
                Ordering::Greater => has_greater = true,
                Ordering::Equal => {}
            }
        }

        match (has_less, has_greater) {
            (false, false) => Some(Ordering::Equal),
            (true, false) => Some(Ordering::Less),
            (false, true) => Some(Ordering::Greater),
            (true, true) => None,
        }
    }
}

impl Add<&Amount> for &Amount {
    type Output = Amount;

    fn add(self, rhs: &Amount) -> Amount {
        let mut out = self.clone();
        out += rhs;
        out
    }
}

impl Add<&Amount> for Amount {
    type Output = Amount;

    fn add(mut self, rhs: &Amount) -> Amount {
        self += rhs;
        self
    }
}

impl Sub<&Amount> for &Amount {
    type Output = Amount;

    fn sub(self, rhs: &Amount) -> Amount {
        let mut out = self.clone();
        out -= rhs;
        out
    }
}

impl Sub<&Amount> for Amount {
    type Output = Amount;

    fn sub(mut self, rhs: &Amount) -> Amount {
        self -= rhs;
        self
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        debug_assert_eq!(self.size(), rhs.size());
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a += b;
        }
    }
}

impl SubAssign<&Amount> for Amount {
    fn sub_assign(&mut self, rhs: &Amount) {
        debug_assert_eq!(self.size(), rhs.size());
        for (a, b) in self.0.iter_mut().zip(&rhs.0) {
            *a -= b;
        }
    }
}
