use super::CliError;
use anyhow::Context;
use nucspec_core::domain::{NucError, Quantity, QuantityUnit};
use nucspec_core::isotope::{Isotope, IsotopeArg, NuclideTable};
use nucspec_core::quantity::QuantitySnapshot;
use serde::Serialize;
use std::path::Path;

pub(super) fn load_table(path: Option<&Path>) -> Result<Option<NuclideTable>, CliError> {
    path.map(NuclideTable::from_path)
        .transpose()
        .map_err(CliError::Compute)
}

/// Parse positional isotope arguments and attach any nuclear data available.
pub(super) fn resolve_isotope(
    parts: &[String],
    table: Option<&NuclideTable>,
    half_life_s: Option<f64>,
) -> Result<Isotope, NucError> {
    let args: Vec<IsotopeArg> = parts.iter().map(|part| IsotopeArg::from(part.as_str())).collect();
    let mut isotope = Isotope::from_args(&args)?;
    if let Some(table) = table {
        isotope = table.enrich(&isotope)?;
    }
    if let Some(seconds) = half_life_s {
        isotope = isotope.with_half_life(seconds)?;
    }
    Ok(isotope)
}

pub(super) fn resolve_designator(
    designator: &str,
    table: Option<&NuclideTable>,
    half_life_s: Option<f64>,
) -> Result<Isotope, NucError> {
    resolve_isotope(&[designator.to_string()], table, half_life_s)
}

/// The single amount flag that was given, as a typed quantity.
pub(super) fn pick_quantity(
    atoms: Option<f64>,
    grams: Option<f64>,
    bq: Option<f64>,
    uci: Option<f64>,
) -> Option<Quantity> {
    [
        (QuantityUnit::Atoms, atoms),
        (QuantityUnit::Grams, grams),
        (QuantityUnit::Becquerels, bq),
        (QuantityUnit::Microcuries, uci),
    ]
    .into_iter()
    .find_map(|(unit, value)| value.map(|value| Quantity::new(unit, value)))
}

pub(super) fn emit_report<T: Serialize>(
    json: bool,
    report: &T,
    human: impl FnOnce() -> String,
) -> Result<i32, CliError> {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).context("failed to serialize JSON report")?;
        println!("{rendered}");
    } else {
        print!("{}", human());
    }
    Ok(0)
}

pub(super) fn format_optional(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(value) => format!("{value:.6e} {unit}"),
        None => "n/a".to_string(),
    }
}

pub(super) fn format_half_life(half_life: Option<f64>) -> String {
    match half_life {
        Some(seconds) if seconds.is_infinite() => "stable".to_string(),
        Some(seconds) => format!("{seconds:.6e} s"),
        None => "unknown".to_string(),
    }
}

/// Half-lives as JSON numbers; stable and unknown both serialize to `null`,
/// so reports carry an explicit `stable` flag alongside.
pub(super) fn finite_half_life(half_life: Option<f64>) -> Option<f64> {
    half_life.filter(|seconds| seconds.is_finite())
}

pub(super) fn render_snapshot(label: &str, snapshot: &QuantitySnapshot) -> String {
    format!(
        "{label} ({}):\n  atoms: {:.6e}\n  mass: {:.6e} g\n  activity: {} ({})\n",
        snapshot.timestamp,
        snapshot.atoms,
        snapshot.grams,
        format_optional(snapshot.becquerels, "Bq"),
        format_optional(snapshot.microcuries, "uCi"),
    )
}

#[cfg(test)]
mod tests {
    use super::{format_half_life, pick_quantity, resolve_designator, resolve_isotope};
    use nucspec_core::domain::Quantity;

    #[test]
    fn first_given_amount_flag_wins() {
        assert_eq!(pick_quantity(None, Some(2.0), None, None), Some(Quantity::Grams(2.0)));
        assert_eq!(pick_quantity(None, None, None, Some(1.5)), Some(Quantity::Microcuries(1.5)));
        assert_eq!(pick_quantity(None, None, None, None), None);
    }

    #[test]
    fn positional_parts_and_half_life_override() {
        let parts = ["Tc".to_string(), "99".to_string(), "m".to_string()];
        let isotope = resolve_isotope(&parts, None, Some(21_624.12)).expect("valid parts");
        assert_eq!(isotope.to_string(), "Tc-99m");
        assert_eq!(isotope.half_life(), Some(21_624.12));

        let stable = resolve_designator("Ca-40", None, Some(f64::INFINITY)).expect("stable");
        assert_eq!(format_half_life(stable.half_life()), "stable");
        assert!(resolve_designator("Ca-40", None, Some(-1.0)).is_err());
    }
}
