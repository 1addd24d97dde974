//! Serializable run report.
//!
//! The engine writes one [`SolveReport`] per invocation when an export path
//! is given. It takes the place of plotting: each row of a horizon's
//! coefficient matrix is the series `k_j(day)` that would have been drawn.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::RunId;
use crate::matrix::CoefficientMatrix;

/// Everything derived during one engine invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveReport {
    /// Identifier of this run.
    pub run_id: RunId,
    /// Wall-clock time at which the report was assembled.
    pub generated_at: DateTime<Utc>,
    /// Age class a newborn starts in; it first reproduces after
    /// `childhood + 1` days.
    pub childhood: usize,
    /// Age class an adult resets to; it reproduces every `repr_cycle + 1`
    /// days.
    pub repr_cycle: usize,
    /// The initial histogram the formulas were evaluated against, if any.
    pub histogram: Option<Vec<u64>>,
    /// One entry per solved horizon, in the order they were run.
    pub horizons: Vec<HorizonReport>,
}

/// Closed form and checks for a single day count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonReport {
    /// Number of simulated days.
    pub days: usize,
    /// Printed linear expression, e.g. `2*p0_0 + p0_1`.
    pub expression: String,
    /// Coefficient vector of `expression`, one entry per age class.
    pub coefficients: Vec<u64>,
    /// Population obtained by substituting the histogram into the formula.
    pub population: Option<u64>,
    /// Known answer the population was checked against.
    pub expected: Option<u64>,
    /// Day-by-day coefficient table, when it was generated.
    pub matrix: Option<CoefficientMatrix>,
}
