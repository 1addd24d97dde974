//! Error types for the Shoal engine binary.
//!
//! [`EngineError`] is the top-level error type that wraps all possible
//! failure modes during startup, solving, checking, and export.

use std::path::PathBuf;

/// Top-level error for the engine binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: shoal_core::ConfigError,
    },

    /// Building, running, or checking the model failed.
    #[error("simulation error: {source}")]
    Simulation {
        /// The underlying simulation error.
        #[from]
        source: shoal_core::SimulationError,
    },

    /// The input histogram file could not be read.
    #[error("failed to read input {}: {source}", .path.display())]
    Input {
        /// Path of the input file.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The closed form disagreed with the numeric simulation.
    #[error("verification failed after {days} days: {discrepancy}")]
    Verification {
        /// Horizon being verified.
        days: usize,
        /// The first failing day.
        discrepancy: shoal_core::verify::Discrepancy,
    },

    /// A coefficient decreased from one day to the next.
    #[error("coefficient of {age} dropped from {previous} to {current} on day {day}")]
    NotMonotonic {
        /// Offending age class.
        age: shoal_types::AgeClass,
        /// Day on which the drop was recorded.
        day: usize,
        /// Value on the previous day.
        previous: u64,
        /// Value on `day`.
        current: u64,
    },

    /// The report could not be serialized.
    #[error("failed to serialize report: {source}")]
    Serialize {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },

    /// The report could not be written.
    #[error("failed to write report {}: {source}", .path.display())]
    Report {
        /// Destination path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl From<shoal_core::verify::MonotonicityViolation> for EngineError {
    fn from(violation: shoal_core::verify::MonotonicityViolation) -> Self {
        Self::NotMonotonic {
            age: violation.age,
            day: violation.day,
            previous: violation.previous,
            current: violation.current,
        }
    }
}
