//! Solve every configured horizon and check the results.
//!
//! For each horizon the runner derives the closed form, substitutes the
//! input histogram (when one is configured), cross-checks the coefficient
//! table against a numeric run, and compares against the known answer.
//! Any disagreement aborts the run with an [`EngineError`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use shoal_core::verify::VerificationResult;
use shoal_core::{
    Histogram, ShoalConfig, Solution, SolveOptions, check_expected, check_monotonic, solve,
    verify_against_numeric,
};
use shoal_types::{HorizonReport, RunId, SolveReport};
use tracing::{info, warn};

use crate::error::EngineError;

/// Run every horizon in `config`.
///
/// Relative input paths are resolved against `base_dir` (the directory of
/// the configuration file); command-line paths arrive already anchored. Per-day expressions are printed after each
/// horizon completes when `run.print_expressions` is set.
pub fn run(config: &ShoalConfig, base_dir: &Path) -> Result<SolveReport, EngineError> {
    let model = config.model;
    model.validate()?;

    let histogram = match &config.verification.input {
        Some(path) => Some(load_histogram(&resolve(base_dir, path), config)?),
        None => {
            info!("no input configured, deriving formulas only");
            None
        }
    };

    let options = SolveOptions {
        generate_coefficients: config.run.generate_coefficients,
        record_trace: config.run.print_expressions,
    };

    let mut horizons = Vec::with_capacity(config.run.horizons.len());
    for &days in &config.run.horizons {
        let solution = solve(&model, days, options)?;
        print_solution(days, &solution);
        horizons.push(check_horizon(config, days, histogram.as_ref(), solution)?);
    }

    Ok(SolveReport {
        run_id: RunId::new(),
        generated_at: Utc::now(),
        childhood: model.childhood,
        repr_cycle: model.repr_cycle,
        histogram: histogram.map(|h| h.counts().to_vec()),
        horizons,
    })
}

/// Serialize `report` as pretty JSON to `path`.
pub fn write_report(report: &SolveReport, path: &Path) -> Result<(), EngineError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| EngineError::Report {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), run_id = %report.run_id, "report written");
    Ok(())
}

fn load_histogram(path: &Path, config: &ShoalConfig) -> Result<Histogram, EngineError> {
    let text = std::fs::read_to_string(path).map_err(|source| EngineError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    let histogram = Histogram::parse(&text, &config.model)?;
    info!(
        path = %path.display(),
        individuals = histogram.total(),
        "input histogram loaded"
    );
    Ok(histogram)
}

/// Anchor a relative config path at `base_dir`; absolute paths pass through.
pub fn resolve(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_dir.join(path)
    } else {
        path.to_path_buf()
    }
}

fn print_solution(days: usize, solution: &Solution) {
    for line in solution_lines(days, solution) {
        println!("{line}");
    }
}

/// The trace ends on day `days`, so the final formula is only added when no
/// trace was recorded.
fn solution_lines(days: usize, solution: &Solution) -> Vec<String> {
    match &solution.trace {
        Some(trace) => trace
            .iter()
            .enumerate()
            .map(|(day, expr)| format!("p({day:>3}) = {expr}"))
            .collect(),
        None => vec![format!("p({days:>3}) = {}", solution.expression)],
    }
}

fn check_horizon(
    config: &ShoalConfig,
    days: usize,
    histogram: Option<&Histogram>,
    solution: Solution,
) -> Result<HorizonReport, EngineError> {
    if let Some(matrix) = &solution.coefficients {
        if let Some(violation) = check_monotonic(matrix) {
            return Err(violation.into());
        }
        if let Some(histogram) = histogram {
            match verify_against_numeric(&config.model, histogram, matrix)? {
                VerificationResult::Consistent { days_checked } => {
                    info!(days, days_checked, "closed form verified");
                }
                VerificationResult::Mismatch(discrepancy) => {
                    return Err(EngineError::Verification { days, discrepancy });
                }
            }
        }
    }

    let population = match histogram {
        Some(histogram) => Some(
            solution
                .expression
                .evaluate(histogram)
                .map_err(|source| shoal_core::SimulationError::Arithmetic { day: days, source })?,
        ),
        None => None,
    };

    let expected = config.verification.expected.get(&days).copied();
    match (population, expected) {
        (Some(obtained), Some(expected)) => {
            check_expected(days, obtained, expected)?;
            info!(days, population = obtained, "matches expected answer");
        }
        (Some(obtained), None) => info!(days, population = obtained, "population derived"),
        (None, Some(_)) => warn!(days, "expected answer configured but no input to check it"),
        (None, None) => {}
    }
    if let Some(obtained) = population {
        println!("population after {days} days: {obtained}");
    }

    Ok(HorizonReport {
        days,
        expression: solution.expression.to_string(),
        coefficients: solution.expression.into_coefficients(),
        population,
        expected,
        matrix: solution.coefficients,
    })
}
