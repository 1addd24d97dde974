//! Shared type definitions for the Shoal population recurrence.
//!
//! This crate holds the plain data that flows between the simulator in
//! `shoal-core` and the `shoal-engine` binary. Nothing in here simulates
//! anything; it only describes age classes, coefficient tables, and the
//! report written at the end of a run.
//!
//! # Modules
//!
//! - [`age`] -- Age-class symbols (`p0_j`)
//! - [`ids`] -- Run identifiers
//! - [`matrix`] -- Per-day coefficient table
//! - [`report`] -- Serializable run report

pub mod age;
pub mod ids;
pub mod matrix;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use age::{AgeClass, SYMBOL_PREFIX};
pub use ids::RunId;
pub use matrix::{CoefficientMatrix, MatrixError};
pub use report::{HorizonReport, SolveReport};
