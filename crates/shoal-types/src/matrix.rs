//! Per-day coefficient table.
//!
//! Entry `[j, d]` is the coefficient of symbol `p0_j` in the total population
//! expression after `d` days, i.e. how many individuals on day `d` descend
//! from a single individual that started in age class `j`. Columns are
//! appended one per simulated day, starting with day 0.

use serde::{Deserialize, Serialize};

use crate::age::AgeClass;

/// Errors raised while filling a [`CoefficientMatrix`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MatrixError {
    /// A column did not have one entry per age class.
    #[error("column for day {day} has {actual} entries, expected {expected}")]
    ColumnLength {
        /// Day index the column was meant for.
        day: usize,
        /// Number of age classes in the matrix.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },
}

/// Coefficient table with one row per age class and one column per day.
///
/// Stored column-major: each pushed column is the full coefficient vector
/// for one day. Deserialization re-checks every column's length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCoefficientMatrix")]
pub struct CoefficientMatrix {
    /// Number of rows (`childhood + 1`).
    age_classes: usize,
    /// One coefficient vector per recorded day.
    columns: Vec<Vec<u64>>,
}

/// Unchecked wire form of [`CoefficientMatrix`].
#[derive(Deserialize)]
struct RawCoefficientMatrix {
    age_classes: usize,
    columns: Vec<Vec<u64>>,
}

impl TryFrom<RawCoefficientMatrix> for CoefficientMatrix {
    type Error = MatrixError;

    fn try_from(raw: RawCoefficientMatrix) -> Result<Self, Self::Error> {
        let mut matrix = Self {
            age_classes: raw.age_classes,
            columns: Vec::with_capacity(raw.columns.len()),
        };
        for column in raw.columns {
            matrix.push_column(column)?;
        }
        Ok(matrix)
    }
}

impl CoefficientMatrix {
    /// Create an empty matrix for `age_classes` rows, reserving room for
    /// `days + 1` columns (day 0 through day `days`).
    pub fn with_capacity(age_classes: usize, days: usize) -> Self {
        Self {
            age_classes,
            columns: Vec::with_capacity(days.saturating_add(1)),
        }
    }

    /// Append the coefficient column for the next day.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::ColumnLength`] if the column does not have
    /// exactly one entry per age class.
    pub fn push_column(&mut self, column: Vec<u64>) -> Result<(), MatrixError> {
        if column.len() != self.age_classes {
            return Err(MatrixError::ColumnLength {
                day: self.columns.len(),
                expected: self.age_classes,
                actual: column.len(),
            });
        }
        self.columns.push(column);
        Ok(())
    }

    /// Number of rows (age classes).
    pub const fn age_classes(&self) -> usize {
        self.age_classes
    }

    /// Number of recorded columns (days, including day 0).
    pub const fn days(&self) -> usize {
        self.columns.len()
    }

    /// Whether no column has been recorded yet.
    pub const fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Coefficient vector for `day`, if recorded.
    pub fn column(&self, day: usize) -> Option<&[u64]> {
        self.columns.get(day).map(Vec::as_slice)
    }

    /// Coefficient vector of the last recorded day.
    pub fn last_column(&self) -> Option<&[u64]> {
        self.columns.last().map(Vec::as_slice)
    }

    /// Single entry `[age, day]`.
    pub fn get(&self, age: AgeClass, day: usize) -> Option<u64> {
        self.column(day)?.get(age.index()).copied()
    }

    /// Iterate over all recorded columns in day order.
    pub fn columns(&self) -> impl Iterator<Item = &[u64]> {
        self.columns.iter().map(Vec::as_slice)
    }

    /// The series `k_j(day)` for one age class across all recorded days.
    ///
    /// Empty if `age` is outside the matrix.
    pub fn row(&self, age: AgeClass) -> Vec<u64> {
        self.columns
            .iter()
            .filter_map(|column| column.get(age.index()).copied())
            .collect()
    }
}
