//! Concrete histograms and the brute-force numeric school.
//!
//! A [`Histogram`] counts individuals per age class, usually read from the
//! puzzle input (`3,4,3,1,2`). A [`School`] steps such a histogram day by
//! day with the same fan-out rule the symbolic simulator uses, and serves as
//! the reference the closed-form coefficients are checked against.

use crate::config::ModelConfig;
use crate::error::SimulationError;

/// Count of individuals per age class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Histogram {
    counts: Vec<u64>,
}

impl Histogram {
    /// A histogram with no individuals.
    pub fn empty(model: &ModelConfig) -> Self {
        Self {
            counts: vec![0; model.age_classes()],
        }
    }

    /// Build a histogram from explicit per-class counts.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::HistogramLength`] unless there is exactly
    /// one count per age class.
    pub fn from_counts(counts: Vec<u64>, model: &ModelConfig) -> Result<Self, SimulationError> {
        if counts.len() != model.age_classes() {
            return Err(SimulationError::HistogramLength {
                expected: model.age_classes(),
                actual: counts.len(),
            });
        }
        Ok(Self { counts })
    }

    /// Tally a list of individual ages.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::AgeOutOfRange`] if any age exceeds
    /// `childhood`.
    pub fn from_ages(ages: &[usize], model: &ModelConfig) -> Result<Self, SimulationError> {
        let mut histogram = Self::empty(model);
        for &age in ages {
            histogram.add(age, model)?;
        }
        Ok(histogram)
    }

    /// Parse comma- or whitespace-separated ages, e.g. `3,4,3,1,2`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::EmptyInput`] if no ages are present,
    /// [`SimulationError::InvalidAgeToken`] for a token that is not a
    /// non-negative integer, and [`SimulationError::AgeOutOfRange`] for an
    /// age beyond `childhood`.
    pub fn parse(text: &str, model: &ModelConfig) -> Result<Self, SimulationError> {
        let mut histogram = Self::empty(model);
        let mut seen = false;
        for token in text
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let age = token
                .parse::<usize>()
                .map_err(|_e| SimulationError::InvalidAgeToken {
                    token: token.to_owned(),
                })?;
            histogram.add(age, model)?;
            seen = true;
        }
        if !seen {
            return Err(SimulationError::EmptyInput);
        }
        Ok(histogram)
    }

    /// Per-class counts, index `j` is age class `j`.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of individuals, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.counts.iter().try_fold(0_u64, |acc, n| acc.checked_add(*n))
    }

    fn add(&mut self, age: usize, model: &ModelConfig) -> Result<(), SimulationError> {
        let out_of_range = SimulationError::AgeOutOfRange {
            age,
            childhood: model.childhood,
        };
        let slot = self.counts.get_mut(age).ok_or(out_of_range)?;
        *slot = slot
            .checked_add(1)
            .ok_or(SimulationError::CountOverflow { day: 0 })?;
        Ok(())
    }
}

/// A concrete population stepped day by day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct School {
    model: ModelConfig,
    fish: Vec<u64>,
    day: usize,
}

impl School {
    /// Start a school from a histogram at day 0.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidModel`] for an invalid model, or
    /// [`SimulationError::HistogramLength`] if the histogram was built for a
    /// different model.
    pub fn new(model: &ModelConfig, histogram: &Histogram) -> Result<Self, SimulationError> {
        model.validate()?;
        if histogram.counts().len() != model.age_classes() {
            return Err(SimulationError::HistogramLength {
                expected: model.age_classes(),
                actual: histogram.counts().len(),
            });
        }
        Ok(Self {
            model: *model,
            fish: histogram.counts().to_vec(),
            day: 0,
        })
    }

    /// Advance by one day.
    ///
    /// The state is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::CountOverflow`] if a count would exceed
    /// `u64::MAX`, or [`SimulationError::DayOverflow`].
    pub fn next_day(&mut self) -> Result<(), SimulationError> {
        let day = self.day.checked_add(1).ok_or(SimulationError::DayOverflow)?;
        let spawning = self.fish.first().copied().unwrap_or(0);

        // Slot `repr_cycle + 1` shifts down onto `repr_cycle`; past the end
        // that is the newborn slot, which also receives `spawning`.
        let shifted_from = self.model.repr_cycle.saturating_add(1);
        let carried = self.fish.get(shifted_from).copied().unwrap_or(spawning);
        let parents = carried
            .checked_add(spawning)
            .ok_or(SimulationError::CountOverflow { day })?;

        self.fish.rotate_left(1);
        if let Some(slot) = self.fish.get_mut(self.model.repr_cycle) {
            *slot = parents;
        }
        self.day = day;
        Ok(())
    }

    /// Total population today.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::CountOverflow`] if the sum exceeds
    /// `u64::MAX`.
    pub fn count(&self) -> Result<u64, SimulationError> {
        self.fish
            .iter()
            .try_fold(0_u64, |acc, n| acc.checked_add(*n))
            .ok_or(SimulationError::CountOverflow { day: self.day })
    }

    /// Advance `days` days and return the resulting population.
    ///
    /// # Errors
    ///
    /// Propagates [`School::next_day`] and [`School::count`] errors.
    pub fn run(&mut self, days: usize) -> Result<u64, SimulationError> {
        for _ in 0..days {
            self.next_day()?;
        }
        self.count()
    }

    /// Days simulated so far.
    pub const fn day(&self) -> usize {
        self.day
    }

    /// Per-class counts today.
    pub fn fish(&self) -> &[u64] {
        &self.fish
    }
}
