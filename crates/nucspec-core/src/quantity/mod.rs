//! Time-dependent amount of one isotope.
//!
//! An [`IsotopeQuantity`] stores a reference atom count at a reference date.
//! Every other unit and every other time is derived through exponential decay:
//!
//! ```text
//! atoms(t) = ref_atoms * exp(-lambda * (t - ref_date))
//! ```
//!
//! When `creation_date` is set the reference date is when the material came
//! into existence, and queries before it are rejected.

use crate::common::constants::{N_AV, UCI_TO_BQ};
use crate::common::time::{TimeInput, Timestamp, now, offset_by_seconds, seconds_between};
use crate::domain::{NucError, NucResult, Quantity, QuantityUnit};
use crate::isotope::Isotope;
use crate::spectrum::AcquisitionInterval;
use serde::Serialize;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeQuantity {
    isotope: Arc<Isotope>,
    ref_atoms: f64,
    ref_date: Timestamp,
    creation_date: bool,
}

impl IsotopeQuantity {
    /// Quantity referenced to the current wall-clock time, treated as the
    /// creation date.
    pub fn new(isotope: impl Into<Arc<Isotope>>, quantity: Quantity) -> NucResult<Self> {
        Self::from_parts(isotope, quantity, None, true)
    }

    pub fn with_date(
        isotope: impl Into<Arc<Isotope>>,
        quantity: Quantity,
        date: impl Into<TimeInput>,
        creation_date: bool,
    ) -> NucResult<Self> {
        Self::from_parts(isotope, quantity, Some(date.into()), creation_date)
    }

    pub fn from_parts(
        isotope: impl Into<Arc<Isotope>>,
        quantity: Quantity,
        date: Option<TimeInput>,
        creation_date: bool,
    ) -> NucResult<Self> {
        let isotope = isotope.into();
        let quantity = quantity.validated()?;
        let ref_date = match date {
            Some(input) => input.resolve()?,
            None => now(),
        };
        let ref_atoms = atoms_from(&isotope, quantity)?;

        tracing::trace!(
            isotope = %isotope,
            input = %quantity,
            ref_atoms,
            %ref_date,
            creation_date,
            "constructed isotope quantity"
        );

        Ok(Self {
            isotope,
            ref_atoms,
            ref_date,
            creation_date,
        })
    }

    pub fn isotope(&self) -> &Arc<Isotope> {
        &self.isotope
    }

    pub const fn ref_atoms(&self) -> f64 {
        self.ref_atoms
    }

    pub const fn ref_date(&self) -> Timestamp {
        self.ref_date
    }

    pub const fn creation_date(&self) -> bool {
        self.creation_date
    }

    pub fn half_life(&self) -> Option<f64> {
        self.isotope.half_life()
    }

    pub fn decay_const(&self) -> NucResult<f64> {
        self.isotope.decay_const()
    }

    pub fn quantity_at(&self, date: impl Into<TimeInput>, unit: QuantityUnit) -> NucResult<f64> {
        let date = date.into().resolve()?;
        let atoms = self.atoms_at_timestamp(date)?;
        atoms_to(&self.isotope, atoms, unit)
    }

    pub fn atoms_at(&self, date: impl Into<TimeInput>) -> NucResult<f64> {
        self.quantity_at(date, QuantityUnit::Atoms)
    }

    pub fn g_at(&self, date: impl Into<TimeInput>) -> NucResult<f64> {
        self.quantity_at(date, QuantityUnit::Grams)
    }

    pub fn bq_at(&self, date: impl Into<TimeInput>) -> NucResult<f64> {
        self.quantity_at(date, QuantityUnit::Becquerels)
    }

    pub fn uci_at(&self, date: impl Into<TimeInput>) -> NucResult<f64> {
        self.quantity_at(date, QuantityUnit::Microcuries)
    }

    pub fn quantity_now(&self, unit: QuantityUnit) -> NucResult<f64> {
        self.quantity_at(now(), unit)
    }

    pub fn atoms_now(&self) -> NucResult<f64> {
        self.quantity_now(QuantityUnit::Atoms)
    }

    pub fn g_now(&self) -> NucResult<f64> {
        self.quantity_now(QuantityUnit::Grams)
    }

    pub fn bq_now(&self) -> NucResult<f64> {
        self.quantity_now(QuantityUnit::Becquerels)
    }

    pub fn uci_now(&self) -> NucResult<f64> {
        self.quantity_now(QuantityUnit::Microcuries)
    }

    /// Solve for the time at which the quantity equals `target`.
    ///
    /// `Ok(None)` means "never": stable isotopes, empty references, a zero
    /// target, a solution before the creation date, or a time outside the
    /// representable range.
    pub fn time_when(&self, target: Quantity) -> NucResult<Option<Timestamp>> {
        let target = target.validated()?;
        let decay_const = self.decay_const()?;
        if decay_const == 0.0 {
            return Ok(None);
        }

        let target_atoms = atoms_from(&self.isotope, target)?;
        if self.ref_atoms == 0.0 || target_atoms == 0.0 {
            return Ok(None);
        }

        let elapsed = -(target_atoms / self.ref_atoms).ln() / decay_const;
        if self.creation_date && elapsed < 0.0 {
            tracing::debug!(
                isotope = %self.isotope,
                elapsed,
                "target quantity only reachable before creation date"
            );
            return Ok(None);
        }
        Ok(offset_by_seconds(self.ref_date, elapsed))
    }

    /// Atoms that decayed between `start` and `stop`.
    pub fn decays_from(
        &self,
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
    ) -> NucResult<f64> {
        let (start, stop) = self.ordered_window(start, stop)?;
        Ok(self.atoms_at_timestamp(start)? - self.atoms_at_timestamp(stop)?)
    }

    /// Mean activity over the window; the instantaneous activity for an
    /// empty window.
    pub fn bq_from(
        &self,
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
    ) -> NucResult<f64> {
        let (start, stop) = self.ordered_window(start, stop)?;
        self.require_radioactive()?;
        let duration = seconds_between(start, stop);
        if duration == 0.0 {
            return self.bq_at(start);
        }
        Ok(self.decays_from(start, stop)? / duration)
    }

    pub fn uci_from(
        &self,
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
    ) -> NucResult<f64> {
        Ok(self.bq_from(start, stop)? / UCI_TO_BQ)
    }

    pub fn decays_during(&self, interval: &dyn AcquisitionInterval) -> NucResult<f64> {
        self.decays_from(interval.start_time(), interval.stop_time())
    }

    pub fn bq_during(&self, interval: &dyn AcquisitionInterval) -> NucResult<f64> {
        self.bq_from(interval.start_time(), interval.stop_time())
    }

    pub fn uci_during(&self, interval: &dyn AcquisitionInterval) -> NucResult<f64> {
        self.uci_from(interval.start_time(), interval.stop_time())
    }

    /// Every unit at one timestamp; activities are absent for stable isotopes
    /// and for isotopes without a half-life.
    pub fn snapshot_at(&self, date: impl Into<TimeInput>) -> NucResult<QuantitySnapshot> {
        let timestamp = date.into().resolve()?;
        let atoms = self.atoms_at_timestamp(timestamp)?;
        let radioactive = self
            .decay_const()
            .is_ok_and(|decay_const| decay_const > 0.0);
        Ok(QuantitySnapshot {
            isotope: self.isotope.to_string(),
            timestamp,
            atoms,
            grams: atoms_to(&self.isotope, atoms, QuantityUnit::Grams)?,
            becquerels: radioactive
                .then(|| atoms_to(&self.isotope, atoms, QuantityUnit::Becquerels))
                .transpose()?,
            microcuries: radioactive
                .then(|| atoms_to(&self.isotope, atoms, QuantityUnit::Microcuries))
                .transpose()?,
        })
    }

    fn atoms_at_timestamp(&self, timestamp: Timestamp) -> NucResult<f64> {
        if self.creation_date && timestamp < self.ref_date {
            return Err(NucError::quantity(
                "QUANTITY.BEFORE_CREATION",
                format!(
                    "{} did not exist at {timestamp}; it was created at {}",
                    self.isotope, self.ref_date
                ),
            ));
        }
        if timestamp == self.ref_date {
            return Ok(self.ref_atoms);
        }
        let decay_const = self.decay_const()?;
        if decay_const == 0.0 {
            return Ok(self.ref_atoms);
        }
        let elapsed = seconds_between(self.ref_date, timestamp);
        Ok(self.ref_atoms * (-decay_const * elapsed).exp())
    }

    fn ordered_window(
        &self,
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
    ) -> NucResult<(Timestamp, Timestamp)> {
        let start = start.into().resolve()?;
        let stop = stop.into().resolve()?;
        if stop < start {
            return Err(NucError::value(
                "VALUE.INTERVAL_ORDER",
                format!("stop {stop} precedes start {start}"),
            ));
        }
        Ok((start, stop))
    }

    fn require_radioactive(&self) -> NucResult<()> {
        if self.decay_const()? == 0.0 {
            return Err(stable_activity_error(&self.isotope));
        }
        Ok(())
    }
}

impl Display for IsotopeQuantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {:e} atoms @ {}{}",
            self.isotope,
            self.ref_atoms,
            self.ref_date,
            if self.creation_date { " (created)" } else { "" }
        )
    }
}

/// One quantity expressed in every unit at a single time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitySnapshot {
    pub isotope: String,
    pub timestamp: Timestamp,
    pub atoms: f64,
    pub grams: f64,
    pub becquerels: Option<f64>,
    pub microcuries: Option<f64>,
}

fn stable_activity_error(isotope: &Isotope) -> NucError {
    NucError::quantity(
        "QUANTITY.STABLE_ACTIVITY",
        format!("{isotope} is stable; activity is not defined"),
    )
}

/// Convert any supported unit to atoms for `isotope`.
///
/// Fails when the conversion overflows the range of `f64`.
pub fn atoms_from(isotope: &Isotope, quantity: Quantity) -> NucResult<f64> {
    let atoms = match quantity {
        Quantity::Atoms(atoms) => atoms,
        Quantity::Grams(grams) => grams / isotope.atomic_mass() * N_AV,
        Quantity::Becquerels(bq) => bq / activity_decay_const(isotope)?,
        Quantity::Microcuries(uci) => uci * UCI_TO_BQ / activity_decay_const(isotope)?,
    };
    if !atoms.is_finite() {
        return Err(NucError::value(
            "VALUE.QUANTITY_NOT_FINITE",
            format!("{quantity} of {isotope} is {atoms} atoms"),
        ));
    }
    Ok(atoms)
}

/// Express an atom count of `isotope` in `unit`.
pub fn atoms_to(isotope: &Isotope, atoms: f64, unit: QuantityUnit) -> NucResult<f64> {
    match unit {
        QuantityUnit::Atoms => Ok(atoms),
        QuantityUnit::Grams => Ok(atoms / N_AV * isotope.atomic_mass()),
        QuantityUnit::Becquerels => Ok(atoms * activity_decay_const(isotope)?),
        QuantityUnit::Microcuries => Ok(atoms * activity_decay_const(isotope)? / UCI_TO_BQ),
    }
}

fn activity_decay_const(isotope: &Isotope) -> NucResult<f64> {
    let decay_const = isotope.decay_const()?;
    if decay_const == 0.0 {
        return Err(stable_activity_error(isotope));
    }
    Ok(decay_const)
}
