//! Cross-checks between the symbolic and numeric views.
//!
//! The closed form is only useful if substituting a histogram into it gives
//! the same answer as stepping that histogram directly. For every recorded
//! day `d` the check is:
//!
//! ```text
//! histogram . matrix[:, d] == School::from(histogram).run(d)
//! ```
//!
//! A second check asserts that no coefficient ever decreases: individuals
//! never die, so the number of descendants of any initial individual can
//! only grow.

use shoal_types::{AgeClass, CoefficientMatrix};
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::error::SimulationError;
use crate::expression;
use crate::numeric::{Histogram, School};

/// Outcome of [`verify_against_numeric`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// Every recorded day agreed.
    Consistent {
        /// Number of days compared (columns in the matrix).
        days_checked: usize,
    },
    /// The first day on which the two views disagreed.
    Mismatch(Discrepancy),
}

/// A day on which the formula and the numeric school disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Discrepancy {
    /// The day that failed.
    pub day: usize,
    /// `histogram . matrix[:, day]`.
    pub symbolic: u64,
    /// Population of the numeric school on that day.
    pub numeric: u64,
}

impl core::fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "day {}: formula gives {}, numeric simulation gives {}",
            self.day, self.symbolic, self.numeric
        )
    }
}

/// A coefficient that went down from one day to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonotonicityViolation {
    /// Row of the offending coefficient.
    pub age: AgeClass,
    /// Day on which the smaller value was recorded.
    pub day: usize,
    /// Value on the previous day.
    pub previous: u64,
    /// Value on `day`.
    pub current: u64,
}

/// Compare every column of `matrix` against a numeric run of `histogram`.
///
/// # Errors
///
/// Returns [`SimulationError`] if the histogram does not fit the model or
/// either side overflows.
pub fn verify_against_numeric(
    model: &ModelConfig,
    histogram: &Histogram,
    matrix: &CoefficientMatrix,
) -> Result<VerificationResult, SimulationError> {
    let mut school = School::new(model, histogram)?;

    for (day, column) in matrix.columns().enumerate() {
        if day > 0 {
            school.next_day()?;
        }
        let symbolic = expression::dot(column, histogram.counts())
            .map_err(|source| SimulationError::Arithmetic { day, source })?;
        let numeric = school.count()?;

        if symbolic != numeric {
            let discrepancy = Discrepancy {
                day,
                symbolic,
                numeric,
            };
            warn!(%discrepancy, "closed form disagrees with numeric simulation");
            return Ok(VerificationResult::Mismatch(discrepancy));
        }
    }

    debug!(days_checked = matrix.days(), "closed form matches numeric simulation");
    Ok(VerificationResult::Consistent {
        days_checked: matrix.days(),
    })
}

/// Find the first coefficient that decreases between consecutive days.
pub fn check_monotonic(matrix: &CoefficientMatrix) -> Option<MonotonicityViolation> {
    let mut previous: Option<&[u64]> = None;
    for (day, column) in matrix.columns().enumerate() {
        if let Some(prev) = previous {
            let drop = prev
                .iter()
                .zip(column)
                .enumerate()
                .find(|&(_, (before, now))| now < before);
            if let Some((age, (&before, &now))) = drop {
                return Some(MonotonicityViolation {
                    age: AgeClass(age),
                    day,
                    previous: before,
                    current: now,
                });
            }
        }
        previous = Some(column);
    }
    None
}

/// Compare a derived population against a known answer.
///
/// # Errors
///
/// Returns [`SimulationError::ExpectedMismatch`] if the values differ.
pub fn check_expected(days: usize, obtained: u64, expected: u64) -> Result<(), SimulationError> {
    if obtained == expected {
        Ok(())
    } else {
        Err(SimulationError::ExpectedMismatch {
            days,
            expected,
            obtained,
        })
    }
}
