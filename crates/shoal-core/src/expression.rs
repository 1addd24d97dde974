//! Linear expressions over the initial age-class symbols.
//!
//! A [`LinearExpr`] is a dense coefficient vector with one non-negative
//! entry per symbol `p0_0 ..= p0_{childhood}`. The only operations the
//! simulator ever needs are addition and reading coefficients back out, so
//! no general symbolic algebra is involved.
//!
//! The printed form joins non-zero terms with ` + ` in ascending symbol
//! order. A coefficient of one is printed bare:
//!
//! ```text
//! 3*p0_0 + p0_2 + 12*p0_8
//! ```
//!
//! [`LinearExpr::parse`] reads that form back and rejects anything that is
//! not a sum of integer-weighted symbols.

use std::fmt;

use shoal_types::{AgeClass, SYMBOL_PREFIX};

use crate::error::ExpressionError;
use crate::numeric::Histogram;

/// A non-negative integer combination of age-class symbols.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LinearExpr {
    /// Coefficient of `p0_j` at index `j`.
    coefficients: Vec<u64>,
}

impl LinearExpr {
    /// The empty sum over `age_classes` symbols.
    pub fn zero(age_classes: usize) -> Self {
        Self {
            coefficients: vec![0; age_classes],
        }
    }

    /// The single symbol `age` with coefficient one.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::AgeOutOfRange`] if `age` is not one of the
    /// `age_classes` symbols.
    pub fn symbol(age: AgeClass, age_classes: usize) -> Result<Self, ExpressionError> {
        let mut expr = Self::zero(age_classes);
        let slot = expr
            .coefficients
            .get_mut(age.index())
            .ok_or(ExpressionError::AgeOutOfRange {
                age: age.index(),
                childhood: age_classes.saturating_sub(1),
            })?;
        *slot = 1;
        Ok(expr)
    }

    /// Wrap an existing coefficient vector.
    pub const fn from_coefficients(coefficients: Vec<u64>) -> Self {
        Self { coefficients }
    }

    /// Coefficient vector, one entry per age class.
    pub fn coefficients(&self) -> &[u64] {
        &self.coefficients
    }

    /// Consume the expression, returning its coefficient vector.
    pub fn into_coefficients(self) -> Vec<u64> {
        self.coefficients
    }

    /// Number of symbols this expression ranges over.
    pub fn age_classes(&self) -> usize {
        self.coefficients.len()
    }

    /// Coefficient of a single symbol.
    pub fn coefficient(&self, age: AgeClass) -> Option<u64> {
        self.coefficients.get(age.index()).copied()
    }

    /// Whether every coefficient is zero.
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&c| c == 0)
    }

    /// Non-zero terms in ascending symbol order.
    pub fn terms(&self) -> impl Iterator<Item = (AgeClass, u64)> + '_ {
        self.coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(|(j, &c)| (AgeClass(j), c))
    }

    /// Add `other` into `self`, term by term.
    ///
    /// `self` is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::LengthMismatch`] if the two expressions
    /// range over different symbol sets, or [`ExpressionError::Overflow`] if
    /// any coefficient would exceed `u64::MAX`.
    pub fn checked_add_assign(&mut self, other: &Self) -> Result<(), ExpressionError> {
        if self.coefficients.len() != other.coefficients.len() {
            return Err(ExpressionError::LengthMismatch {
                expected: self.coefficients.len(),
                actual: other.coefficients.len(),
            });
        }
        let summed = self
            .coefficients
            .iter()
            .zip(&other.coefficients)
            .map(|(a, b)| a.checked_add(*b).ok_or(ExpressionError::Overflow))
            .collect::<Result<Vec<u64>, _>>()?;
        self.coefficients = summed;
        Ok(())
    }

    /// Sum a sequence of expressions over `age_classes` symbols.
    ///
    /// # Errors
    ///
    /// Propagates [`LinearExpr::checked_add_assign`] errors.
    pub fn checked_sum<'a, I>(exprs: I, age_classes: usize) -> Result<Self, ExpressionError>
    where
        I: IntoIterator<Item = &'a Self>,
    {
        let mut total = Self::zero(age_classes);
        for expr in exprs {
            total.checked_add_assign(expr)?;
        }
        Ok(total)
    }

    /// Substitute a concrete histogram for the symbols.
    ///
    /// # Errors
    ///
    /// Returns [`ExpressionError::LengthMismatch`] if the histogram covers a
    /// different number of age classes, or [`ExpressionError::Overflow`] if
    /// the result exceeds `u64::MAX`.
    pub fn evaluate(&self, histogram: &Histogram) -> Result<u64, ExpressionError> {
        dot(&self.coefficients, histogram.counts())
    }

    /// Parse the printed form of an expression over `childhood + 1` symbols.
    ///
    /// Accepts `k*p0_j` and bare `p0_j` terms joined by `+`, with arbitrary
    /// whitespace. Repeated symbols are summed. The literal `0` is the empty
    /// sum.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpressionError`] describing the first malformed term.
    pub fn parse(text: &str, childhood: usize) -> Result<Self, ExpressionError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ExpressionError::Empty);
        }

        let mut expr = Self::zero(childhood.saturating_add(1));
        if text == "0" {
            return Ok(expr);
        }

        for (position, raw) in text.split('+').enumerate() {
            let term = raw.trim();
            if term.is_empty() {
                return Err(ExpressionError::EmptyTerm { position });
            }

            let (multiplier, symbol) = match term.split_once('*') {
                Some((k, symbol)) => {
                    let k = k.trim().parse::<u64>().map_err(|_e| {
                        ExpressionError::InvalidCoefficient {
                            term: term.to_owned(),
                        }
                    })?;
                    (k, symbol.trim())
                }
                None => (1, term),
            };

            let age = parse_symbol(symbol).ok_or_else(|| ExpressionError::UnknownSymbol {
                term: term.to_owned(),
            })?;
            let slot = expr
                .coefficients
                .get_mut(age)
                .ok_or(ExpressionError::AgeOutOfRange { age, childhood })?;
            *slot = slot.checked_add(multiplier).ok_or(ExpressionError::Overflow)?;
        }

        Ok(expr)
    }
}

impl fmt::Display for LinearExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (age, coefficient) in self.terms() {
            if !first {
                f.write_str(" + ")?;
            }
            first = false;
            if coefficient == 1 {
                write!(f, "{age}")?;
            } else {
                write!(f, "{coefficient}*{age}")?;
            }
        }
        if first {
            f.write_str("0")?;
        }
        Ok(())
    }
}

/// Read the coefficient vector out of a printed expression.
///
/// Symbols absent from `text` get coefficient zero; the result always has
/// `childhood + 1` entries.
///
/// # Errors
///
/// See [`LinearExpr::parse`].
pub fn extract_coefficients(text: &str, childhood: usize) -> Result<Vec<u64>, ExpressionError> {
    LinearExpr::parse(text, childhood).map(LinearExpr::into_coefficients)
}

/// Checked dot product of a coefficient vector with per-class counts.
pub(crate) fn dot(coefficients: &[u64], counts: &[u64]) -> Result<u64, ExpressionError> {
    if coefficients.len() != counts.len() {
        return Err(ExpressionError::LengthMismatch {
            expected: coefficients.len(),
            actual: counts.len(),
        });
    }
    coefficients
        .iter()
        .zip(counts)
        .try_fold(0_u64, |acc, (k, n)| {
            k.checked_mul(*n).and_then(|term| acc.checked_add(term))
        })
        .ok_or(ExpressionError::Overflow)
}

/// `p0_7` -> `Some(7)`.
fn parse_symbol(symbol: &str) -> Option<usize> {
    let index = symbol.strip_prefix(SYMBOL_PREFIX)?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    index.parse().ok()
}
