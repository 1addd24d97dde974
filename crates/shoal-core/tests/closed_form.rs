//! Integration tests for the closed-form population formula.
//!
//! These exercise the public API end to end: derive the formula once, then
//! substitute histograms into it and compare against brute-force numeric
//! runs and the known puzzle answers.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]

use shoal_core::numeric::School;
use shoal_core::verify::VerificationResult;
use shoal_core::{
    Histogram, LinearExpr, ModelConfig, ShoalConfig, SolveOptions, check_expected,
    check_monotonic, extract_coefficients, solve, verify_against_numeric,
};
use shoal_types::AgeClass;

const SAMPLE: &str = "3,4,3,1,2";

fn with_coefficients() -> SolveOptions {
    SolveOptions {
        generate_coefficients: true,
        record_trace: false,
    }
}

#[test]
fn sample_answers_from_one_formula_each() {
    let model = ModelConfig::default();
    let histogram = Histogram::parse(SAMPLE, &model).unwrap();

    for (days, expected) in [(18, 26), (80, 5934), (256, 26_984_457_539)] {
        let solution = solve(&model, days, SolveOptions::default()).unwrap();
        let obtained = solution.expression.evaluate(&histogram).unwrap();
        assert!(check_expected(days, obtained, expected).is_ok());
    }
}

#[test]
fn one_matrix_answers_every_intermediate_day() {
    let model = ModelConfig::default();
    let histogram = Histogram::parse(SAMPLE, &model).unwrap();
    let matrix = solve(&model, 256, with_coefficients())
        .unwrap()
        .coefficients
        .unwrap();

    let day_80 = matrix.column(80).unwrap();
    let population: u64 = day_80
        .iter()
        .zip(histogram.counts())
        .map(|(k, n)| k * n)
        .sum();
    assert_eq!(population, 5934);

    assert_eq!(
        verify_against_numeric(&model, &histogram, &matrix).unwrap(),
        VerificationResult::Consistent { days_checked: 257 }
    );
    assert_eq!(check_monotonic(&matrix), None);
}

#[test]
fn formula_is_reusable_for_arbitrary_histograms() {
    let model = ModelConfig::default();
    let formula = solve(&model, 150, SolveOptions::default())
        .unwrap()
        .expression;

    for input in ["0", "8,8,8", "1,2,3,4,5,6,7,8,0", "6,6,6,6,6,6,6,1"] {
        let histogram = Histogram::parse(input, &model).unwrap();
        let mut school = School::new(&model, &histogram).unwrap();
        assert_eq!(
            formula.evaluate(&histogram).unwrap(),
            school.run(150).unwrap(),
            "input {input}"
        );
    }
}

#[test]
fn day_zero_coefficients_are_identity() {
    let model = ModelConfig::default();
    let solution = solve(&model, 0, with_coefficients()).unwrap();
    let matrix = solution.coefficients.unwrap();

    assert_eq!(matrix.days(), 1);
    assert_eq!(matrix.column(0).unwrap(), &[1; 9]);

    let histogram = Histogram::parse(SAMPLE, &model).unwrap();
    assert_eq!(
        solution.expression.evaluate(&histogram).unwrap(),
        histogram.total().unwrap()
    );
}

#[test]
fn printed_formula_extracts_to_same_coefficients() {
    let model = ModelConfig::default();
    let solution = solve(&model, 256, with_coefficients()).unwrap();
    let printed = solution.expression.to_string();

    let extracted = extract_coefficients(&printed, model.childhood).unwrap();
    assert_eq!(extracted, solution.expression.coefficients());
    assert_eq!(
        Some(extracted.as_slice()),
        solution.coefficients.as_ref().and_then(|m| m.last_column())
    );
}

#[test]
fn newborn_class_lags_behind_oldest_parent_class() {
    // An individual that starts at p0_8 is one day behind one starting at
    // p0_7, so its series is the p0_7 series delayed by one day.
    let model = ModelConfig::default();
    let matrix = solve(&model, 60, with_coefficients())
        .unwrap()
        .coefficients
        .unwrap();
    let seven = matrix.row(AgeClass(7));
    let eight = matrix.row(AgeClass(8));
    assert_eq!(&eight[1..], &seven[..seven.len() - 1]);
}

#[test]
fn model_parameters_are_age_classes_not_periods() {
    // A newborn sits in p0_8 and first spawns after 9 days; an adult reset to
    // p0_6 spawns every 7 days.
    let model = ModelConfig::default();
    let weight = |days: usize, age: usize| {
        solve(&model, days, SolveOptions::default())
            .unwrap()
            .expression
            .coefficient(AgeClass(age))
            .unwrap()
    };

    assert_eq!(weight(model.childhood, model.childhood), 1);
    assert_eq!(weight(model.childhood + 1, model.childhood), 2);

    assert_eq!(weight(model.repr_cycle, model.repr_cycle), 1);
    assert_eq!(weight(model.repr_cycle + 1, model.repr_cycle), 2);
    assert_eq!(weight(2 * model.repr_cycle + 1, model.repr_cycle), 2);
    assert_eq!(weight(2 * model.repr_cycle + 2, model.repr_cycle), 3);
}

#[test]
fn configured_model_drives_the_simulation() {
    let config = ShoalConfig::parse("model:\n  childhood: 2\n  repr_cycle: 1\n").unwrap();
    let solution = solve(&config.model, 4, SolveOptions::default()).unwrap();
    assert_eq!(solution.expression.age_classes(), 3);

    let parsed = LinearExpr::parse(&solution.expression.to_string(), 2).unwrap();
    assert_eq!(parsed, solution.expression);
}
