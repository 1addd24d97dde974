//! The symbolic population vector and its daily step.
//!
//! Slot `i` holds the linear expression for "individuals currently `i` days
//! from reproducing". At initialization slot `j` is exactly the symbol
//! `p0_j`. Each [`Simulator::step`] applies the recurrence:
//!
//! ```text
//! spawning      = slot[0]
//! slot[i]       = slot[i + 1]            for i in 0..childhood
//! slot[repr]   += spawning               (parents reset)
//! slot[child]   = spawning               (newborns)
//! ```
//!
//! The spawning expression is read before anything is overwritten and fans
//! out to both destinations. When `repr_cycle == childhood` both
//! contributions land in the same slot and accumulate.

use shoal_types::AgeClass;
use tracing::debug;

use crate::config::ModelConfig;
use crate::error::SimulationError;
use crate::expression::LinearExpr;

/// Symbolic population vector for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simulator {
    model: ModelConfig,
    slots: Vec<LinearExpr>,
    day: usize,
}

impl Simulator {
    /// Create the identity state: slot `j` holds the symbol `p0_j`.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::InvalidModel`] if `repr_cycle > childhood`.
    pub fn new(model: &ModelConfig) -> Result<Self, SimulationError> {
        model.validate()?;
        let age_classes = model.age_classes();
        let slots = AgeClass::all(model.childhood)
            .map(|age| LinearExpr::symbol(age, age_classes))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SimulationError::Arithmetic { day: 0, source })?;

        debug!(
            childhood = model.childhood,
            repr_cycle = model.repr_cycle,
            "symbolic population initialized"
        );

        Ok(Self {
            model: *model,
            slots,
            day: 0,
        })
    }

    /// Advance the population by one day.
    ///
    /// The state is left untouched on error.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Arithmetic`] if a coefficient would exceed
    /// `u64::MAX`, or [`SimulationError::DayOverflow`].
    pub fn step(&mut self) -> Result<(), SimulationError> {
        let day = self.day.checked_add(1).ok_or(SimulationError::DayOverflow)?;
        let spawning = self
            .slots
            .first()
            .cloned()
            .unwrap_or_else(|| LinearExpr::zero(self.model.age_classes()));

        // Slot `repr_cycle + 1` shifts down onto `repr_cycle`; past the end
        // that is the newborn slot, which also holds `spawning`.
        let shifted_from = self.model.repr_cycle.saturating_add(1);
        let mut parents = self.slots.get(shifted_from).unwrap_or(&spawning).clone();
        parents
            .checked_add_assign(&spawning)
            .map_err(|source| SimulationError::Arithmetic { day, source })?;

        // Rotating moves `spawning` from slot 0 into the newborn slot.
        self.slots.rotate_left(1);
        if let Some(slot) = self.slots.get_mut(self.model.repr_cycle) {
            *slot = parents;
        }
        self.day = day;
        Ok(())
    }

    /// Sum of all slots: the population formula for the current day.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Arithmetic`] if a summed coefficient would
    /// exceed `u64::MAX`.
    pub fn total(&self) -> Result<LinearExpr, SimulationError> {
        LinearExpr::checked_sum(&self.slots, self.model.age_classes())
            .map_err(|source| SimulationError::Arithmetic {
                day: self.day,
                source,
            })
    }

    /// Days simulated so far.
    pub const fn day(&self) -> usize {
        self.day
    }

    /// The model this simulator was built for.
    pub const fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// All slots, index `i` is "`i` days from reproducing".
    pub fn slots(&self) -> &[LinearExpr] {
        &self.slots
    }

    /// A single slot.
    pub fn slot(&self, index: usize) -> Option<&LinearExpr> {
        self.slots.get(index)
    }
}
