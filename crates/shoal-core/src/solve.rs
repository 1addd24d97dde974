//! Running a horizon and recording per-day results.
//!
//! [`solve`] initializes a [`Simulator`], steps it exactly `n_days` times
//! and returns the final population formula. Per-day recording is done by
//! [`StepObserver`] implementations that see the total expression for day 0
//! and after every step. Nothing is printed from inside the loop; callers
//! that want the day-by-day expressions ask for a trace and print it
//! afterwards.

use shoal_types::CoefficientMatrix;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::error::SimulationError;
use crate::expression::LinearExpr;
use crate::simulator::Simulator;

/// What [`solve`] should record besides the final expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveOptions {
    /// Build the coefficient matrix (one column per day, day 0 included).
    pub generate_coefficients: bool,
    /// Keep the total expression of every day for later printing.
    pub record_trace: bool,
}

/// Result of one horizon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Population formula after `n_days`.
    pub expression: LinearExpr,
    /// Coefficient table, when requested.
    pub coefficients: Option<CoefficientMatrix>,
    /// Total expression for day 0 through day `n_days`, when requested.
    pub trace: Option<Vec<LinearExpr>>,
}

/// Receives the total population expression once per simulated day.
pub trait StepObserver {
    /// Called for day 0 and after every step.
    fn on_day(&mut self, day: usize, total: &LinearExpr) -> Result<(), SimulationError>;

    /// Whether the observer needs totals at all. Inactive observers let
    /// the loop skip summing the slots.
    fn is_active(&self) -> bool {
        true
    }
}

/// Observer that records nothing.
pub struct NoOpObserver;

impl StepObserver for NoOpObserver {
    fn on_day(&mut self, _day: usize, _total: &LinearExpr) -> Result<(), SimulationError> {
        Ok(())
    }

    fn is_active(&self) -> bool {
        false
    }
}

/// Fills a [`CoefficientMatrix`] one column per day.
#[derive(Debug)]
pub struct CoefficientRecorder {
    matrix: CoefficientMatrix,
}

impl CoefficientRecorder {
    /// Reserve room for `n_days + 1` columns.
    pub fn new(model: &ModelConfig, n_days: usize) -> Self {
        Self {
            matrix: CoefficientMatrix::with_capacity(model.age_classes(), n_days),
        }
    }

    /// The recorded table.
    pub fn into_matrix(self) -> CoefficientMatrix {
        self.matrix
    }
}

impl StepObserver for CoefficientRecorder {
    fn on_day(&mut self, _day: usize, total: &LinearExpr) -> Result<(), SimulationError> {
        self.matrix.push_column(total.coefficients().to_vec())?;
        Ok(())
    }
}

/// Keeps every day's total expression.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    days: Vec<LinearExpr>,
}

impl TraceRecorder {
    /// The recorded expressions, index `d` is day `d`.
    pub fn into_days(self) -> Vec<LinearExpr> {
        self.days
    }
}

impl StepObserver for TraceRecorder {
    fn on_day(&mut self, _day: usize, total: &LinearExpr) -> Result<(), SimulationError> {
        self.days.push(total.clone());
        Ok(())
    }
}

/// Forwards to whichever recorders [`SolveOptions`] asked for.
struct Recorders {
    coefficients: Option<CoefficientRecorder>,
    trace: Option<TraceRecorder>,
}

impl StepObserver for Recorders {
    fn on_day(&mut self, day: usize, total: &LinearExpr) -> Result<(), SimulationError> {
        if let Some(recorder) = self.coefficients.as_mut() {
            recorder.on_day(day, total)?;
        }
        if let Some(recorder) = self.trace.as_mut() {
            recorder.on_day(day, total)?;
        }
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.coefficients.is_some() || self.trace.is_some()
    }
}

/// Derive the population formula after `n_days` days.
///
/// # Errors
///
/// Returns [`SimulationError::InvalidModel`] for an invalid model and
/// [`SimulationError::Arithmetic`] if a coefficient overflows `u64`.
pub fn solve(
    model: &ModelConfig,
    n_days: usize,
    options: SolveOptions,
) -> Result<Solution, SimulationError> {
    let mut recorders = Recorders {
        coefficients: options
            .generate_coefficients
            .then(|| CoefficientRecorder::new(model, n_days)),
        trace: options.record_trace.then(TraceRecorder::default),
    };

    let expression = solve_with(model, n_days, &mut recorders)?;

    Ok(Solution {
        expression,
        coefficients: recorders.coefficients.map(CoefficientRecorder::into_matrix),
        trace: recorders.trace.map(TraceRecorder::into_days),
    })
}

/// Run `n_days` steps, reporting each day's total to `observer`.
///
/// Returns the total expression after the last step.
///
/// # Errors
///
/// Returns simulator errors and anything the observer returns.
pub fn solve_with(
    model: &ModelConfig,
    n_days: usize,
    observer: &mut dyn StepObserver,
) -> Result<LinearExpr, SimulationError> {
    let mut sim = Simulator::new(model)?;
    let observing = observer.is_active();

    debug!(n_days, observing, "solving horizon");

    if observing {
        observer.on_day(0, &sim.total()?)?;
    }
    for _ in 0..n_days {
        sim.step()?;
        if observing {
            observer.on_day(sim.day(), &sim.total()?)?;
        }
    }

    let expression = sim.total()?;
    info!(
        n_days,
        terms = expression.terms().count(),
        "population formula derived"
    );
    Ok(expression)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shoal_types::AgeClass;

    use super::*;
    use crate::numeric::Histogram;

    fn all() -> SolveOptions {
        SolveOptions {
            generate_coefficients: true,
            record_trace: true,
        }
    }

    #[test]
    fn zero_days_yields_single_identity_column() {
        let model = ModelConfig::default();
        let solution = solve(&model, 0, all()).unwrap();

        let matrix = solution.coefficients.unwrap();
        assert_eq!(matrix.days(), 1);
        assert_eq!(matrix.column(0), Some(&[1_u64; 9][..]));
        assert_eq!(solution.expression.coefficients(), &[1; 9]);
        assert_eq!(solution.trace.map(|t| t.len()), Some(1));
    }

    #[test]
    fn nothing_recorded_unless_asked() {
        let model = ModelConfig::default();
        let solution = solve(&model, 10, SolveOptions::default()).unwrap();
        assert!(solution.coefficients.is_none());
        assert!(solution.trace.is_none());
    }

    #[test]
    fn matrix_has_one_column_per_day() {
        let model = ModelConfig::default();
        let solution = solve(&model, 80, all()).unwrap();
        let matrix = solution.coefficients.unwrap();

        assert_eq!(matrix.days(), 81);
        assert_eq!(matrix.age_classes(), 9);
        for column in matrix.columns() {
            assert_eq!(column.len(), 9);
        }
        assert_eq!(
            matrix.last_column(),
            Some(solution.expression.coefficients())
        );
    }

    #[test]
    fn trace_matches_matrix_columns() {
        let model = ModelConfig::default();
        let solution = solve(&model, 20, all()).unwrap();
        let matrix = solution.coefficients.unwrap();
        let trace = solution.trace.unwrap();

        assert_eq!(trace.len(), matrix.days());
        for (day, expr) in trace.iter().enumerate() {
            assert_eq!(matrix.column(day), Some(expr.coefficients()));
        }
    }

    #[test]
    fn single_fish_timeline() {
        // One individual in age class 0 reproduces on day 1, then every 7
        // days; its first child reproduces on day 10.
        let model = ModelConfig::default();
        let matrix = solve(&model, 11, all()).unwrap().coefficients.unwrap();
        let series = matrix.row(AgeClass(0));
        assert_eq!(series, vec![1, 2, 2, 2, 2, 2, 2, 2, 3, 3, 4, 4]);
    }

    #[test]
    fn sample_closed_form_after_256_days() {
        let model = ModelConfig::default();
        let histogram = Histogram::parse("3,4,3,1,2", &model).unwrap();
        let solution = solve(&model, 256, SolveOptions::default()).unwrap();
        assert_eq!(solution.expression.evaluate(&histogram), Ok(26_984_457_539));
    }

    #[test]
    fn printed_formula_parses_back() {
        let model = ModelConfig::default();
        let solution = solve(&model, 256, SolveOptions::default()).unwrap();
        let text = solution.expression.to_string();
        let parsed = LinearExpr::parse(&text, model.childhood).unwrap();
        assert_eq!(parsed, solution.expression);
    }

    #[test]
    fn overflow_surfaces_as_error() {
        let model = ModelConfig::default();
        let result = solve(&model, 1000, SolveOptions::default());
        assert!(matches!(result, Err(SimulationError::Arithmetic { .. })));
    }

    struct FailingObserver;

    impl StepObserver for FailingObserver {
        fn on_day(&mut self, day: usize, _total: &LinearExpr) -> Result<(), SimulationError> {
            if day == 3 {
                return Err(SimulationError::DayOverflow);
            }
            Ok(())
        }
    }

    #[test]
    fn observer_errors_abort_the_run() {
        let model = ModelConfig::default();
        let result = solve_with(&model, 10, &mut FailingObserver);
        assert!(matches!(result, Err(SimulationError::DayOverflow)));
    }

    #[test]
    fn observer_sees_every_day_in_order() {
        struct Days(Vec<usize>);
        impl StepObserver for Days {
            fn on_day(&mut self, day: usize, _total: &LinearExpr) -> Result<(), SimulationError> {
                self.0.push(day);
                Ok(())
            }
        }

        let model = ModelConfig::default();
        let mut days = Days(Vec::new());
        assert!(solve_with(&model, 5, &mut days).is_ok());
        assert_eq!(days.0, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn no_op_observer_is_inactive() {
        let model = ModelConfig::default();
        let expr = solve_with(&model, 18, &mut NoOpObserver).unwrap();
        let histogram = Histogram::parse("3,4,3,1,2", &model).unwrap();
        assert_eq!(expr.evaluate(&histogram), Ok(26));
    }
}
