use super::CliError;
use super::helpers::*;
use chrono::NaiveDateTime;
use nucspec_core::common::time::{TimeInput, now};
use nucspec_core::domain::{NucError, Quantity, QuantityUnit};
use nucspec_core::irradiation::NeutronIrradiation;
use nucspec_core::isotope::Isotope;
use nucspec_core::quantity::{IsotopeQuantity, QuantitySnapshot};
use serde::Serialize;
use std::path::PathBuf;

#[derive(clap::Args)]
pub(super) struct IsotopeArgs {
    /// Designator (`Tc-99m`, `99mTc`) or ELEMENT MASS [ISOMER]
    #[arg(required = true, num_args = 1..=3, value_name = "PART")]
    parts: Vec<String>,

    /// Nuclide data table (JSON)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Emit a JSON report
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
#[command(group(
    clap::ArgGroup::new("amount")
        .required(true)
        .args(["atoms", "grams", "bq", "uci"])
))]
#[command(group(
    clap::ArgGroup::new("target").args(["when_atoms", "when_grams", "when_bq", "when_uci"])
))]
pub(super) struct QuantityArgs {
    /// Isotope designator
    #[arg(long)]
    isotope: String,

    /// Reference amount in atoms
    #[arg(long)]
    atoms: Option<f64>,

    /// Reference amount in grams
    #[arg(long)]
    grams: Option<f64>,

    /// Reference activity in Bq
    #[arg(long)]
    bq: Option<f64>,

    /// Reference activity in uCi
    #[arg(long)]
    uci: Option<f64>,

    /// Reference date; defaults to now
    #[arg(long, value_name = "TIME")]
    date: Option<String>,

    /// Allow queries before the reference date
    #[arg(long)]
    no_creation_date: bool,

    /// Half-life in seconds (`inf` for stable); overrides --data
    #[arg(long, value_name = "SECONDS")]
    half_life_s: Option<f64>,

    /// Nuclide data table (JSON)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Time at which to report the quantity; defaults to now
    #[arg(long, value_name = "TIME")]
    at: Option<String>,

    /// Report decays between --at and this time
    #[arg(long, value_name = "TIME")]
    until: Option<String>,

    /// Solve for the time when this many atoms remain
    #[arg(long)]
    when_atoms: Option<f64>,

    /// Solve for the time when this many grams remain
    #[arg(long)]
    when_grams: Option<f64>,

    /// Solve for the time when the activity is this many Bq
    #[arg(long)]
    when_bq: Option<f64>,

    /// Solve for the time when the activity is this many uCi
    #[arg(long)]
    when_uci: Option<f64>,

    /// Emit a JSON report
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
#[command(group(
    clap::ArgGroup::new("precursor_amount")
        .required(true)
        .args(["precursor_atoms", "precursor_grams"])
))]
pub(super) struct ActivateArgs {
    /// Target isotope that captures neutrons
    #[arg(long)]
    precursor: String,

    /// Precursor atoms at the start of irradiation
    #[arg(long)]
    precursor_atoms: Option<f64>,

    /// Precursor mass in grams at the start of irradiation
    #[arg(long)]
    precursor_grams: Option<f64>,

    /// Precursor half-life in seconds (`inf` for stable)
    #[arg(long, value_name = "SECONDS")]
    precursor_half_life_s: Option<f64>,

    /// Activation product isotope
    #[arg(long)]
    product: String,

    /// Product half-life in seconds (`inf` for stable)
    #[arg(long, value_name = "SECONDS")]
    product_half_life_s: Option<f64>,

    /// Capture cross-section in barns
    #[arg(long)]
    barns: f64,

    /// Irradiation start
    #[arg(long, value_name = "TIME")]
    start: String,

    /// Irradiation stop
    #[arg(long, value_name = "TIME")]
    stop: String,

    /// Neutron fluence in n/cm^2
    #[arg(long)]
    fluence: Option<f64>,

    /// Neutron flux in n/cm^2/s
    #[arg(long)]
    flux: Option<f64>,

    /// Also report the product at this time
    #[arg(long, value_name = "TIME")]
    at: Option<String>,

    /// Nuclide data table (JSON)
    #[arg(long, value_name = "FILE")]
    data: Option<PathBuf>,

    /// Emit a JSON report
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IsotopeReport {
    isotope: String,
    symbol: String,
    element: String,
    atomic_number: usize,
    mass_number: u32,
    neutron_number: u32,
    isomer_level: u8,
    half_life_seconds: Option<f64>,
    decay_constant: Option<f64>,
    stable: Option<bool>,
    atomic_mass: Option<f64>,
}

impl IsotopeReport {
    fn new(isotope: &Isotope) -> Self {
        Self {
            isotope: isotope.to_string(),
            symbol: isotope.symbol().to_string(),
            element: isotope.element_name().to_string(),
            atomic_number: isotope.atomic_number(),
            mass_number: isotope.mass_number(),
            neutron_number: isotope.neutron_number(),
            isomer_level: isotope.isomer().level(),
            half_life_seconds: finite_half_life(isotope.half_life()),
            decay_constant: isotope.decay_const().ok(),
            stable: isotope.is_stable().ok(),
            atomic_mass: isotope.has_atomic_mass().then(|| isotope.atomic_mass()),
        }
    }

    fn render(&self, isotope: &Isotope) -> String {
        format!(
            "{}\n  element: {} (Z={})\n  mass number: {}\n  neutrons: {}\n  isomer level: {}\n  half-life: {}\n  decay constant: {}\n  atomic mass: {}\n",
            self.isotope,
            self.element,
            self.atomic_number,
            self.mass_number,
            self.neutron_number,
            self.isomer_level,
            format_half_life(isotope.half_life()),
            format_optional(self.decay_constant, "1/s"),
            format_optional(self.atomic_mass, "g/mol"),
        )
    }
}

pub(super) fn run_isotope_command(args: IsotopeArgs) -> Result<i32, CliError> {
    let table = load_table(args.data.as_deref())?;
    let isotope = resolve_isotope(&args.parts, table.as_ref(), None)?;
    tracing::debug!(isotope = %isotope, "resolved isotope");

    let report = IsotopeReport::new(&isotope);
    emit_report(args.json, &report, || report.render(&isotope))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WhenReport {
    unit: QuantityUnit,
    value: f64,
    time: Option<NaiveDateTime>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WindowReport {
    start: NaiveDateTime,
    stop: NaiveDateTime,
    decays: f64,
    mean_becquerels: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QuantityReport {
    isotope: String,
    half_life_seconds: Option<f64>,
    reference_date: NaiveDateTime,
    reference_atoms: f64,
    creation_date: bool,
    snapshot: QuantitySnapshot,
    when: Option<WhenReport>,
    window: Option<WindowReport>,
}

impl QuantityReport {
    fn render(&self, half_life: Option<f64>) -> String {
        let mut out = format!(
            "{}\n  half-life: {}\n  reference: {:.6e} atoms at {}{}\n",
            self.isotope,
            format_half_life(half_life),
            self.reference_atoms,
            self.reference_date,
            if self.creation_date { " (creation date)" } else { "" },
        );
        out.push_str(&render_snapshot("at", &self.snapshot));
        if let Some(when) = &self.when {
            let time = when
                .time
                .map_or_else(|| "never".to_string(), |time| time.to_string());
            out.push_str(&format!("  {:.6e} {} reached: {}\n", when.value, when.unit, time));
        }
        if let Some(window) = &self.window {
            out.push_str(&format!(
                "  decays {} -> {}: {:.6e} (mean {})\n",
                window.start,
                window.stop,
                window.decays,
                format_optional(window.mean_becquerels, "Bq"),
            ));
        }
        out
    }
}

pub(super) fn run_quantity_command(args: QuantityArgs) -> Result<i32, CliError> {
    let table = load_table(args.data.as_deref())?;
    let isotope = resolve_designator(&args.isotope, table.as_ref(), args.half_life_s)?;
    let amount = pick_quantity(args.atoms, args.grams, args.bq, args.uci)
        .ok_or_else(|| CliError::Usage("one of --atoms/--grams/--bq/--uci is required".into()))?;

    let quantity = IsotopeQuantity::from_parts(
        isotope.clone(),
        amount,
        args.date.map(TimeInput::from),
        !args.no_creation_date,
    )?;
    let at = match args.at {
        Some(text) => TimeInput::from(text).resolve()?,
        None => now(),
    };
    let snapshot = quantity.snapshot_at(at)?;

    let target = pick_quantity(args.when_atoms, args.when_grams, args.when_bq, args.when_uci);
    let when = target
        .map(|target| -> Result<WhenReport, NucError> {
            Ok(WhenReport {
                unit: target.unit(),
                value: target.value(),
                time: quantity.time_when(target)?,
            })
        })
        .transpose()?;

    let window = args
        .until
        .map(|until| -> Result<WindowReport, NucError> {
            let stop = TimeInput::from(until).resolve()?;
            let mean_becquerels = if isotope.is_stable()? {
                None
            } else {
                Some(quantity.bq_from(at, stop)?)
            };
            Ok(WindowReport {
                start: at,
                stop,
                decays: quantity.decays_from(at, stop)?,
                mean_becquerels,
            })
        })
        .transpose()?;

    let report = QuantityReport {
        isotope: isotope.to_string(),
        half_life_seconds: finite_half_life(isotope.half_life()),
        reference_date: quantity.ref_date(),
        reference_atoms: quantity.ref_atoms(),
        creation_date: quantity.creation_date(),
        snapshot,
        when,
        window,
    };
    emit_report(args.json, &report, || report.render(isotope.half_life()))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivationReport {
    precursor: String,
    product: String,
    barns: f64,
    start: NaiveDateTime,
    stop: NaiveDateTime,
    fluence: f64,
    flux: Option<f64>,
    precursor_atoms: f64,
    at_stop: QuantitySnapshot,
    at_time: Option<QuantitySnapshot>,
}

impl ActivationReport {
    fn render(&self) -> String {
        let mut out = format!(
            "{} -> {} ({} b)\n  irradiation: {} -> {}\n  fluence: {:.6e} n/cm2\n  flux: {}\n  precursor atoms: {:.6e}\n",
            self.precursor,
            self.product,
            self.barns,
            self.start,
            self.stop,
            self.fluence,
            format_optional(self.flux, "n/cm2/s"),
            self.precursor_atoms,
        );
        out.push_str(&render_snapshot("product at stop", &self.at_stop));
        if let Some(snapshot) = &self.at_time {
            out.push_str(&render_snapshot("product", snapshot));
        }
        out
    }
}

pub(super) fn run_activate_command(args: ActivateArgs) -> Result<i32, CliError> {
    let table = load_table(args.data.as_deref())?;
    let precursor =
        resolve_designator(&args.precursor, table.as_ref(), args.precursor_half_life_s)?;
    let product = resolve_designator(&args.product, table.as_ref(), args.product_half_life_s)?;

    let irradiation =
        NeutronIrradiation::from_options(args.start, args.stop, args.fluence, args.flux)?;
    let amount = match (args.precursor_atoms, args.precursor_grams) {
        (Some(atoms), _) => Quantity::Atoms(atoms),
        (None, Some(grams)) => Quantity::Grams(grams),
        (None, None) => {
            return Err(CliError::Usage(
                "one of --precursor-atoms/--precursor-grams is required".into(),
            ));
        }
    };
    let initial = IsotopeQuantity::with_date(precursor, amount, irradiation.start(), true)?;
    tracing::debug!(irradiation = %irradiation, precursor = %initial, "activating");

    let activated = irradiation.activate(args.barns, &initial, product)?;
    let at_time = args
        .at
        .map(|text| activated.snapshot_at(text))
        .transpose()?;

    let report = ActivationReport {
        precursor: initial.isotope().to_string(),
        product: activated.isotope().to_string(),
        barns: args.barns,
        start: irradiation.start(),
        stop: irradiation.stop(),
        fluence: irradiation.fluence(),
        flux: irradiation.flux(),
        precursor_atoms: initial.ref_atoms(),
        at_stop: activated.snapshot_at(irradiation.stop())?,
        at_time,
    };
    emit_report(args.json, &report, || report.render())
}
