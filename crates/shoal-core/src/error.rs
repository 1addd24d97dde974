//! Error types for the `shoal-core` crate.
//!
//! [`ExpressionError`] covers linear expressions: malformed printed forms and
//! coefficient arithmetic. [`SimulationError`] covers everything else that
//! can go wrong while building or running a model.

/// Errors produced while parsing or combining linear expressions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpressionError {
    /// The expression text was empty.
    #[error("expression is empty")]
    Empty,

    /// A `+`-separated term was blank (e.g. `p0_1 + + p0_2`).
    #[error("term {position} is empty")]
    EmptyTerm {
        /// Zero-based position of the blank term.
        position: usize,
    },

    /// A term did not name an age-class symbol.
    #[error("term `{term}` is not an age-class symbol")]
    UnknownSymbol {
        /// The offending term.
        term: String,
    },

    /// A term had a multiplier that is not a non-negative integer.
    #[error("term `{term}` has an invalid coefficient")]
    InvalidCoefficient {
        /// The offending term.
        term: String,
    },

    /// A symbol referred to an age class beyond `childhood`.
    #[error("age class {age} is out of range (childhood is {childhood})")]
    AgeOutOfRange {
        /// The referenced age class.
        age: usize,
        /// The model's largest age class.
        childhood: usize,
    },

    /// Two coefficient vectors of different length were combined.
    #[error("expected {expected} coefficients, got {actual}")]
    LengthMismatch {
        /// Length of the left-hand operand.
        expected: usize,
        /// Length of the right-hand operand.
        actual: usize,
    },

    /// A coefficient exceeded `u64::MAX`.
    #[error("coefficient overflow")]
    Overflow,
}

/// Errors produced while building, running, or checking a model.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// The model parameters are unusable.
    #[error("invalid model: {reason}")]
    InvalidModel {
        /// Explanation of what is wrong with the parameters.
        reason: String,
    },

    /// Coefficient arithmetic failed while advancing to `day`.
    #[error("coefficient arithmetic failed on day {day}: {source}")]
    Arithmetic {
        /// The day being computed.
        day: usize,
        /// The underlying expression error.
        #[source]
        source: ExpressionError,
    },

    /// A concrete population count exceeded `u64::MAX` on `day`.
    #[error("population count overflow on day {day}")]
    CountOverflow {
        /// The day being computed.
        day: usize,
    },

    /// The day counter would exceed `usize::MAX`.
    #[error("day counter overflow")]
    DayOverflow,

    /// An input token was not a non-negative integer age.
    #[error("invalid age `{token}` in input")]
    InvalidAgeToken {
        /// The offending token.
        token: String,
    },

    /// An input age was beyond `childhood`.
    #[error("age {age} in input is out of range (childhood is {childhood})")]
    AgeOutOfRange {
        /// The offending age.
        age: usize,
        /// The model's largest age class.
        childhood: usize,
    },

    /// The input contained no ages.
    #[error("input contains no ages")]
    EmptyInput,

    /// A histogram did not have one count per age class.
    #[error("histogram has {actual} counts, expected {expected}")]
    HistogramLength {
        /// Number of age classes in the model.
        expected: usize,
        /// Number of counts supplied.
        actual: usize,
    },

    /// The coefficient table rejected a column.
    #[error("coefficient table error: {source}")]
    Matrix {
        /// The underlying matrix error.
        #[from]
        source: shoal_types::MatrixError,
    },

    /// A derived population did not match a known answer.
    #[error("population after {days} days is {obtained}, expected {expected}")]
    ExpectedMismatch {
        /// The horizon being checked.
        days: usize,
        /// The known answer.
        expected: u64,
        /// The value the formula produced.
        obtained: u64,
    },
}
