//! Age-class symbols.
//!
//! An age class buckets individuals by the number of days left until they
//! next reproduce. The symbol `p0_j` stands for "one individual that started
//! the run in age class `j`"; the closed-form population formula is linear in
//! these symbols.

use serde::{Deserialize, Serialize};

/// Textual prefix of every age-class symbol (`p0_3` is age class 3).
pub const SYMBOL_PREFIX: &str = "p0_";

/// Index of an initial age class, printed as `p0_{index}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgeClass(pub usize);

impl AgeClass {
    /// Return the zero-based index of this age class.
    pub const fn index(self) -> usize {
        self.0
    }

    /// Iterate over every age class of a model with the given childhood,
    /// i.e. `p0_0` through `p0_{childhood}` inclusive.
    pub fn all(childhood: usize) -> impl Iterator<Item = Self> {
        (0..=childhood).map(Self)
    }
}

impl core::fmt::Display for AgeClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{SYMBOL_PREFIX}{}", self.0)
    }
}

impl From<usize> for AgeClass {
    fn from(index: usize) -> Self {
        Self(index)
    }
}
