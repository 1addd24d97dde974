//! Recurrence simulator and closed-form coefficients for the Shoal model.
//!
//! Individuals are bucketed by the number of days left until they next
//! reproduce. Each day every bucket moves down by one; the bucket that hits
//! zero resets to `repr_cycle` and spawns the same number of newborns at
//! `childhood`. Instead of simulating concrete counts, the simulator carries
//! one linear expression per bucket over the initial age-class symbols
//! `p0_0 ..= p0_{childhood}`, so a single run yields a formula that can be
//! evaluated against any initial histogram.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `shoal-config.yaml`.
//! - [`error`] -- [`SimulationError`] and [`ExpressionError`].
//! - [`expression`] -- [`LinearExpr`], its printed form and its parser.
//! - [`simulator`] -- The symbolic population vector and its daily step.
//! - [`solve`] -- Running a horizon and recording per-day coefficients.
//! - [`numeric`] -- Concrete histograms and the brute-force numeric school.
//! - [`verify`] -- Cross-checks between the symbolic and numeric views.
//!
//! # Usage
//!
//! ```
//! use shoal_core::config::ModelConfig;
//! use shoal_core::numeric::Histogram;
//! use shoal_core::solve::{solve, SolveOptions};
//!
//! let model = ModelConfig::default();
//! let histogram = Histogram::parse("3,4,3,1,2", &model).ok();
//! let solution = solve(&model, 80, SolveOptions::default()).ok();
//!
//! let population = match (solution, histogram) {
//!     (Some(solution), Some(histogram)) => solution.expression.evaluate(&histogram).ok(),
//!     _ => None,
//! };
//! assert_eq!(population, Some(5934));
//! ```

pub mod config;
pub mod error;
pub mod expression;
pub mod numeric;
pub mod simulator;
pub mod solve;
pub mod verify;

// Re-export primary types at crate root.
pub use config::{ConfigError, ModelConfig, ShoalConfig};
pub use error::{ExpressionError, SimulationError};
pub use expression::{LinearExpr, extract_coefficients};
pub use numeric::{Histogram, School};
pub use simulator::Simulator;
pub use solve::{Solution, SolveOptions, StepObserver, solve, solve_with};
pub use verify::{VerificationResult, check_expected, check_monotonic, verify_against_numeric};
