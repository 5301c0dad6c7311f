//! Neutron activation over an irradiation window.
//!
//! A window with `start == stop` is an instantaneous pulse; otherwise the flux
//! is constant across the window and the product obeys
//! `dN1/dt = phi * sigma * N0(t) - lambda1 * N1` with `N1(start) = 0`.
//! Burn-up of the precursor is neglected.

use crate::common::constants::BARN_TO_CM2;
use crate::common::time::{TimeInput, Timestamp, seconds_between};
use crate::domain::{NucError, NucResult, Quantity};
use crate::isotope::Isotope;
use crate::quantity::IsotopeQuantity;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Below this `|lambda1 - lambda0| * T` the growth factor uses its series.
const SERIES_THRESHOLD: f64 = 1.0e-12;

/// How the neutron exposure was specified.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FluenceSpec {
    /// Time-integrated fluence in n/cm^2.
    Fluence(f64),
    /// Constant flux in n/cm^2/s.
    Flux(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeutronIrradiation {
    start: Timestamp,
    stop: Timestamp,
    duration: f64,
    fluence: f64,
    flux: Option<f64>,
}

impl NeutronIrradiation {
    pub fn new(
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
        spec: FluenceSpec,
    ) -> NucResult<Self> {
        let start = start.into().resolve()?;
        let stop = stop.into().resolve()?;
        if stop < start {
            return Err(NucError::value(
                "VALUE.INTERVAL_ORDER",
                format!("irradiation stop {stop} precedes start {start}"),
            ));
        }
        let duration = seconds_between(start, stop);

        let (fluence, flux) = match spec {
            FluenceSpec::Fluence(fluence) => {
                check_non_negative("VALUE.FLUENCE", "fluence", fluence)?;
                let flux = (duration > 0.0).then(|| fluence / duration);
                (fluence, flux)
            }
            FluenceSpec::Flux(flux) => {
                check_non_negative("VALUE.FLUENCE", "flux", flux)?;
                if duration == 0.0 {
                    return Err(NucError::quantity(
                        "QUANTITY.FLUENCE_SPEC",
                        "a flux needs a finite irradiation duration; give a fluence for a pulse",
                    ));
                }
                (flux * duration, Some(flux))
            }
        };

        Ok(Self {
            start,
            stop,
            duration,
            fluence,
            flux,
        })
    }

    /// Option-based constructor: exactly one of fluence or flux.
    pub fn from_options(
        start: impl Into<TimeInput>,
        stop: impl Into<TimeInput>,
        n_cm2: Option<f64>,
        n_cm2_s: Option<f64>,
    ) -> NucResult<Self> {
        let spec = match (n_cm2, n_cm2_s) {
            (Some(fluence), None) => FluenceSpec::Fluence(fluence),
            (None, Some(flux)) => FluenceSpec::Flux(flux),
            (Some(_), Some(_)) => {
                return Err(NucError::quantity(
                    "QUANTITY.FLUENCE_SPEC",
                    "give either a fluence or a flux, not both",
                ));
            }
            (None, None) => {
                return Err(NucError::quantity(
                    "QUANTITY.FLUENCE_SPEC",
                    "either a fluence or a flux is required",
                ));
            }
        };
        Self::new(start, stop, spec)
    }

    pub const fn start(&self) -> Timestamp {
        self.start
    }

    pub const fn stop(&self) -> Timestamp {
        self.stop
    }

    pub const fn duration_seconds(&self) -> f64 {
        self.duration
    }

    pub const fn fluence(&self) -> f64 {
        self.fluence
    }

    /// `None` for an instantaneous pulse.
    pub const fn flux(&self) -> Option<f64> {
        self.flux
    }

    pub fn is_pulse(&self) -> bool {
        self.duration == 0.0
    }

    /// Product created from `initial` by a capture cross-section of `barns`,
    /// referenced at `stop` as its creation date.
    pub fn activate(
        &self,
        barns: f64,
        initial: &IsotopeQuantity,
        activated: impl Into<Arc<Isotope>>,
    ) -> NucResult<IsotopeQuantity> {
        let activated = activated.into();
        let sigma = cross_section_cm2(barns)?;
        let precursor_atoms = initial.atoms_at(self.start)?;
        let yield_per_atom = self.yield_per_precursor_atom(sigma, initial.isotope(), &activated)?;
        let product_atoms = precursor_atoms * yield_per_atom;

        tracing::debug!(
            precursor = %initial.isotope(),
            product = %activated,
            barns,
            precursor_atoms,
            product_atoms,
            "activated"
        );

        IsotopeQuantity::with_date(activated, Quantity::Atoms(product_atoms), self.stop, true)
    }

    /// Inverse of [`Self::activate`]: the precursor amount at `start` that
    /// yields `activated` at `stop`.
    pub fn precursor_for(
        &self,
        barns: f64,
        activated: &IsotopeQuantity,
        initial: impl Into<Arc<Isotope>>,
    ) -> NucResult<IsotopeQuantity> {
        let initial = initial.into();
        let sigma = cross_section_cm2(barns)?;
        let product_atoms = activated.atoms_at(self.stop)?;
        let yield_per_atom = self.yield_per_precursor_atom(sigma, &initial, activated.isotope())?;
        if !yield_per_atom.is_finite() || yield_per_atom <= 0.0 {
            return Err(NucError::quantity(
                "QUANTITY.ZERO_YIELD",
                format!(
                    "irradiation produces no {} from {initial}; cannot infer the precursor",
                    activated.isotope()
                ),
            ));
        }
        let precursor_atoms = product_atoms / yield_per_atom;

        tracing::debug!(
            precursor = %initial,
            product = %activated.isotope(),
            barns,
            precursor_atoms,
            product_atoms,
            "inferred precursor"
        );

        IsotopeQuantity::with_date(initial, Quantity::Atoms(precursor_atoms), self.start, false)
    }

    /// Product atoms at `stop` per precursor atom present at `start`.
    fn yield_per_precursor_atom(
        &self,
        sigma_cm2: f64,
        precursor: &Isotope,
        product: &Isotope,
    ) -> NucResult<f64> {
        if self.is_pulse() {
            tracing::trace!("instantaneous pulse regime");
            return Ok(self.fluence * sigma_cm2);
        }

        let flux = self.fluence / self.duration;
        let lambda0 = precursor.decay_const()?;
        let lambda1 = product.decay_const()?;
        // (e^-l0T - e^-l1T) / (l1 - l0), factored on the smaller constant.
        let lambda_min = lambda0.min(lambda1);
        let factor = growth_factor((lambda1 - lambda0).abs(), self.duration);
        tracing::trace!(lambda0, lambda1, factor, "constant flux regime");
        Ok(flux * sigma_cm2 * (-lambda_min * self.duration).exp() * factor)
    }
}

impl Display for NeutronIrradiation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.flux {
            Some(flux) => write!(
                f,
                "{} -> {}: {:e} n/cm2 at {:e} n/cm2/s",
                self.start, self.stop, self.fluence, flux
            ),
            None => write!(f, "pulse at {}: {:e} n/cm2", self.start, self.fluence),
        }
    }
}

/// `(1 - exp(-delta * t)) / delta` for `delta >= 0`, continuous through
/// `delta == 0`.
fn growth_factor(delta: f64, duration: f64) -> f64 {
    let x = delta * duration;
    if x.abs() < SERIES_THRESHOLD {
        duration * (1.0 - x / 2.0)
    } else {
        -(-x).exp_m1() / delta
    }
}

fn cross_section_cm2(barns: f64) -> NucResult<f64> {
    check_non_negative("VALUE.CROSS_SECTION", "cross-section", barns)?;
    Ok(barns * BARN_TO_CM2)
}

fn check_non_negative(placeholder: &'static str, what: &str, value: f64) -> NucResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NucError::value(
            placeholder,
            format!("{what} must be finite and non-negative, got {value}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{FluenceSpec, NeutronIrradiation, growth_factor};
    use crate::domain::{NucErrorCategory, Quantity};
    use crate::isotope::Isotope;
    use crate::quantity::IsotopeQuantity;
    use std::sync::Arc;

    const START: &str = "2017-01-01 08:00:00";
    const STOP: &str = "2017-01-01 10:00:00";

    fn isotope(designator: &str, half_life: Option<f64>) -> Arc<Isotope> {
        let iso = Isotope::parse(designator).expect("valid designator");
        Arc::new(match half_life {
            Some(seconds) => iso.with_half_life(seconds).expect("positive"),
            None => iso.stable(),
        })
    }

    fn assert_close(expected: f64, actual: f64, rel_tol: f64) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= rel_tol * expected.abs(),
            "expected={expected:.16e} actual={actual:.16e}"
        );
    }

    #[test]
    fn pulse_multiplies_fluence_cross_section_and_atoms() {
        let na23 = isotope("Na-23", None);
        let na24 = isotope("Na-24", Some(14.997 * 3600.0));
        let initial = IsotopeQuantity::with_date(na23, Quantity::Atoms(1.0e24), START, true)
            .expect("valid");
        let pulse = NeutronIrradiation::new(START, START, FluenceSpec::Fluence(1.0e15))
            .expect("pulse");
        assert!(pulse.is_pulse());
        assert_eq!(pulse.flux(), None);

        let product = pulse.activate(1.0, &initial, na24).expect("activated");
        assert_close(1.0e15, product.ref_atoms(), 1.0e-12);
        assert_eq!(product.ref_date(), pulse.stop());
        assert!(product.creation_date());
    }

    #[test]
    fn finite_stable_to_stable_matches_pulse() {
        let precursor = isotope("Au-197", None);
        let product = isotope("Au-198", None);
        let initial = IsotopeQuantity::with_date(precursor, Quantity::Atoms(1.0e22), START, true)
            .expect("valid");

        let finite = NeutronIrradiation::new(START, STOP, FluenceSpec::Fluence(3.6e15))
            .expect("finite");
        assert_close(3.6e15 / 7200.0, finite.flux().expect("finite window"), 1.0e-15);
        let pulse = NeutronIrradiation::new(STOP, STOP, FluenceSpec::Fluence(3.6e15))
            .expect("pulse");

        let from_finite = finite.activate(98.65, &initial, Arc::clone(&product)).expect("ok");
        let from_pulse = pulse.activate(98.65, &initial, product).expect("ok");
        assert_close(from_pulse.ref_atoms(), from_finite.ref_atoms(), 1.0e-12);
    }

    #[test]
    fn long_irradiation_saturates() {
        let half_life = 60.0;
        let product = isotope("Al-28", Some(half_life));
        let initial = IsotopeQuantity::with_date(
            isotope("Al-27", None),
            Quantity::Atoms(1.0e20),
            START,
            true,
        )
        .expect("valid");
        let flux = 1.0e12;
        let irradiation = NeutronIrradiation::new(START, STOP, FluenceSpec::Flux(flux))
            .expect("flux");
        assert_close(flux * 7200.0, irradiation.fluence(), 1.0e-15);

        let activated = irradiation.activate(0.23, &initial, Arc::clone(&product)).expect("ok");
        let lambda1 = product.decay_const().expect("set");
        let saturation = flux * 0.23e-24 * 1.0e20 / lambda1;
        assert_close(saturation, activated.ref_atoms(), 1.0e-9);
        assert_close(
            flux * 0.23e-24 * 1.0e20,
            activated.bq_at(STOP).expect("at stop"),
            1.0e-9,
        );
    }

    #[test]
    fn decaying_precursor_follows_closed_form() {
        let lambda0 = std::f64::consts::LN_2 / 3600.0;
        let lambda1 = std::f64::consts::LN_2 / 1800.0;
        let initial = IsotopeQuantity::with_date(
            isotope("Mn-56", Some(3600.0)),
            Quantity::Atoms(1.0e18),
            START,
            true,
        )
        .expect("valid");
        let irradiation = NeutronIrradiation::new(START, STOP, FluenceSpec::Flux(1.0e13))
            .expect("flux");
        let activated = irradiation
            .activate(13.3, &initial, isotope("Mn-57", Some(1800.0)))
            .expect("ok");

        let t = 7200.0;
        let expected = 1.0e13 * 13.3e-24 * 1.0e18 * (-lambda0 * t).exp()
            * (1.0 - (-(lambda1 - lambda0) * t).exp())
            / (lambda1 - lambda0);
        assert_close(expected, activated.ref_atoms(), 1.0e-9);
    }

    #[test]
    fn short_lived_precursor_over_long_window_stays_finite() {
        let lambda0 = std::f64::consts::LN_2 / 5.0;
        let initial = IsotopeQuantity::with_date(
            isotope("Na-24", Some(5.0)),
            Quantity::Atoms(1.0e20),
            START,
            true,
        )
        .expect("valid");
        let irradiation = NeutronIrradiation::new(START, STOP, FluenceSpec::Flux(1.0e12))
            .expect("flux");

        let stable_product = isotope("Mg-24", None);
        let activated = irradiation
            .activate(1.0, &initial, Arc::clone(&stable_product))
            .expect("finite product");
        let expected = 1.0e12 * 1.0e-24 * 1.0e20 * (-(-lambda0 * 7200.0).exp_m1()) / lambda0;
        assert_close(expected, activated.ref_atoms(), 1.0e-12);
        assert_close(7.213e8, activated.ref_atoms(), 1.0e-3);

        let long_lived = isotope("Mg-24", Some(1.0e9));
        let lambda1 = long_lived.decay_const().expect("set");
        let activated = irradiation
            .activate(1.0, &initial, long_lived)
            .expect("finite product");
        let expected = 1.0e12 * 1.0e-24 * 1.0e20 * (-lambda1 * 7200.0).exp()
            * (-(-(lambda0 - lambda1) * 7200.0).exp_m1())
            / (lambda0 - lambda1);
        assert_close(expected, activated.ref_atoms(), 1.0e-12);

        let recovered = irradiation
            .precursor_for(1.0, &activated, isotope("Na-24", Some(5.0)))
            .expect("invertible");
        assert_close(1.0e20, recovered.ref_atoms(), 1.0e-12);
    }

    #[test]
    fn growth_factor_is_continuous_at_equal_constants() {
        let t = 7200.0;
        assert_eq!(growth_factor(0.0, t), t);
        assert_close(growth_factor(1.0e-17, t), growth_factor(1.0e-15, t), 1.0e-9);
        assert_close(t, growth_factor(1.0e-20, t), 1.0e-12);
    }

    #[test]
    fn inverse_activation_recovers_precursor() {
        let precursor_iso = isotope("Co-59", None);
        let product_iso = isotope("Co-60", Some(5.2714 * 3.156e7));
        let initial = IsotopeQuantity::with_date(
            Arc::clone(&precursor_iso),
            Quantity::Grams(0.5),
            START,
            true,
        )
        .expect("valid");

        for spec in [FluenceSpec::Fluence(1.0e16), FluenceSpec::Flux(1.0e12)] {
            let irradiation = NeutronIrradiation::new(START, STOP, spec).expect("valid");
            let activated = irradiation
                .activate(37.18, &initial, Arc::clone(&product_iso))
                .expect("ok");
            let recovered = irradiation
                .precursor_for(37.18, &activated, Arc::clone(&precursor_iso))
                .expect("ok");
            assert_eq!(recovered.ref_date(), irradiation.start());
            assert!(!recovered.creation_date());
            assert_close(
                initial.atoms_at(START).expect("start"),
                recovered.atoms_at(START).expect("start"),
                1.0e-12,
            );
            assert_close(0.5, recovered.g_at(START).expect("start"), 1.0e-12);
        }

        let pulse = NeutronIrradiation::new(START, START, FluenceSpec::Fluence(1.0e15))
            .expect("pulse");
        let product = IsotopeQuantity::with_date(
            Arc::clone(&product_iso),
            Quantity::Atoms(1.0e15),
            START,
            true,
        )
        .expect("valid");
        let precursor = pulse.precursor_for(1.0, &product, precursor_iso).expect("ok");
        assert_close(1.0e24, precursor.ref_atoms(), 1.0e-12);
    }

    #[test]
    fn inconsistent_fluence_options_are_quantity_errors() {
        let both = NeutronIrradiation::from_options(START, STOP, Some(1.0), Some(1.0))
            .expect_err("both");
        let neither = NeutronIrradiation::from_options(START, STOP, None, None)
            .expect_err("neither");
        let zero_duration_flux = NeutronIrradiation::from_options(START, START, None, Some(1.0))
            .expect_err("flux without duration");
        for error in [both, neither, zero_duration_flux] {
            assert!(error.is_quantity_error(), "{error}");
            assert_eq!(error.placeholder(), "QUANTITY.FLUENCE_SPEC");
        }

        assert!(NeutronIrradiation::from_options(START, STOP, Some(1.0), None).is_ok());
        assert!(NeutronIrradiation::from_options(START, START, Some(1.0), None).is_ok());
    }

    #[test]
    fn reversed_window_and_negative_inputs_are_value_errors() {
        let error = NeutronIrradiation::new(STOP, START, FluenceSpec::Fluence(1.0))
            .expect_err("reversed");
        assert_eq!(error.category(), NucErrorCategory::ValueError);
        assert!(NeutronIrradiation::new(START, STOP, FluenceSpec::Fluence(-1.0))
            .expect_err("negative fluence")
            .is_value_error());
        assert!(NeutronIrradiation::new(START, STOP, FluenceSpec::Flux(f64::NAN)).is_err());

        let irradiation = NeutronIrradiation::new(START, STOP, FluenceSpec::Fluence(1.0))
            .expect("valid");
        let initial = IsotopeQuantity::with_date(
            isotope("Au-197", None),
            Quantity::Atoms(1.0),
            START,
            true,
        )
        .expect("valid");
        let error = irradiation
            .activate(-1.0, &initial, isotope("Au-198", None))
            .expect_err("negative cross-section");
        assert!(error.is_value_error());
    }

    #[test]
    fn missing_half_life_fails_only_for_finite_windows() {
        let bare_product = Arc::new(Isotope::parse("Na-24").expect("valid"));
        let initial = IsotopeQuantity::with_date(
            isotope("Na-23", None),
            Quantity::Atoms(1.0e24),
            START,
            true,
        )
        .expect("valid");

        let pulse = NeutronIrradiation::new(START, START, FluenceSpec::Fluence(1.0e15))
            .expect("pulse");
        assert!(pulse.activate(1.0, &initial, Arc::clone(&bare_product)).is_ok());

        let finite = NeutronIrradiation::new(START, STOP, FluenceSpec::Fluence(1.0e15))
            .expect("finite");
        let error = finite
            .activate(1.0, &initial, bare_product)
            .expect_err("product half-life needed");
        assert_eq!(error.placeholder(), "QUANTITY.HALF_LIFE_UNSET");
    }

    #[test]
    fn precursor_inference_needs_nonzero_yield() {
        let irradiation = NeutronIrradiation::new(START, STOP, FluenceSpec::Fluence(0.0))
            .expect("zero fluence is allowed");
        let product = IsotopeQuantity::with_date(
            isotope("Na-24", Some(54_000.0)),
            Quantity::Atoms(1.0),
            STOP,
            true,
        )
        .expect("valid");
        let error = irradiation
            .precursor_for(1.0, &product, isotope("Na-23", None))
            .expect_err("zero yield");
        assert!(error.is_quantity_error());
    }
}
