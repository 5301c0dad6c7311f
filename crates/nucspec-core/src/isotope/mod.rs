//! Nuclide identity: element, mass number and isomer level, optionally
//! enriched with nuclear data (half-life, atomic mass).
//!
//! A bare identity comes out of the parser. Nuclear data is attached with the
//! `with_*` methods or [`NuclideTable::enrich`], each returning a new value.
//! Equality and hashing only look at (symbol, A, isomer level).

mod data;
mod parser;

pub use data::{HalfLifeField, NuclideData, NuclideRecord, NuclideTable};
pub use parser::IsotopeArg;

use crate::common::constants::{decay_constant_from_half_life, half_life_from_decay_constant};
use crate::common::elements::{element_name, element_symbol, resolve_element};
use crate::domain::{NucError, NucResult};
use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Metastable state index; `0` is the ground state and `1` is the first
/// isomer (`m`, equivalently `m1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct IsomerLevel(u8);

impl IsomerLevel {
    pub const GROUND: IsomerLevel = IsomerLevel(0);
    pub const FIRST: IsomerLevel = IsomerLevel(1);

    pub const fn new(level: u8) -> Self {
        Self(level)
    }

    pub const fn level(self) -> u8 {
        self.0
    }

    pub const fn is_ground(self) -> bool {
        self.0 == 0
    }

    pub fn suffix(self) -> String {
        match self.0 {
            0 => String::new(),
            1 => "m".to_string(),
            level => format!("m{level}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Isotope {
    symbol: &'static str,
    atomic_number: usize,
    mass_number: u32,
    isomer: IsomerLevel,
    atomic_mass: Option<f64>,
    half_life: Option<f64>,
}

impl Isotope {
    /// Build an identity from an element token (symbol, name or atomic
    /// number), a mass number and an isomer level.
    pub fn new(element: &str, mass_number: u32, isomer: IsomerLevel) -> NucResult<Self> {
        let atomic_number = resolve_element(element).ok_or_else(|| {
            NucError::isotope(
                "ISOTOPE.ELEMENT",
                format!("unknown element '{}'", element.trim()),
            )
        })?;
        Self::from_atomic_number(atomic_number, mass_number, isomer)
    }

    pub fn from_atomic_number(
        atomic_number: usize,
        mass_number: u32,
        isomer: IsomerLevel,
    ) -> NucResult<Self> {
        let symbol = element_symbol(atomic_number).ok_or_else(|| {
            NucError::isotope(
                "ISOTOPE.ATOMIC_NUMBER",
                format!("atomic number {atomic_number} is outside 1..=118"),
            )
        })?;
        if mass_number == 0 {
            return Err(NucError::isotope(
                "ISOTOPE.MASS_NUMBER",
                "mass number must be positive",
            ));
        }
        if (mass_number as usize) < atomic_number {
            return Err(NucError::isotope(
                "ISOTOPE.MASS_NUMBER",
                format!("mass number {mass_number} is below Z={atomic_number} for {symbol}"),
            ));
        }

        Ok(Self {
            symbol,
            atomic_number,
            mass_number,
            isomer,
            atomic_mass: None,
            half_life: None,
        })
    }

    /// Parse a single free-form designator such as `Tc-99m`, `99mTc` or
    /// `hafnium178m3`.
    pub fn parse(text: &str) -> NucResult<Self> {
        parser::parse_designator(text)
    }

    /// Normalize one to three loosely typed arguments into an identity.
    pub fn from_args(args: &[IsotopeArg]) -> NucResult<Self> {
        parser::parse_args(args)
    }

    /// Accepts a JSON string designator or an array of up to three arguments.
    pub fn from_json(value: &serde_json::Value) -> NucResult<Self> {
        match value {
            serde_json::Value::String(text) => Self::parse(text),
            serde_json::Value::Array(items) => {
                let args = items
                    .iter()
                    .map(IsotopeArg::from_json)
                    .collect::<NucResult<Vec<_>>>()?;
                Self::from_args(&args)
            }
            other => Err(NucError::type_mismatch(
                "TYPE.ISOTOPE",
                format!("isotope must be a string or an argument array, got {other}"),
            )),
        }
    }

    pub const fn symbol(&self) -> &'static str {
        self.symbol
    }

    pub fn element_name(&self) -> &'static str {
        element_name(self.atomic_number).unwrap_or(self.symbol)
    }

    pub const fn atomic_number(&self) -> usize {
        self.atomic_number
    }

    pub const fn mass_number(&self) -> u32 {
        self.mass_number
    }

    pub const fn neutron_number(&self) -> u32 {
        self.mass_number - self.atomic_number as u32
    }

    pub const fn isomer(&self) -> IsomerLevel {
        self.isomer
    }

    /// Atomic mass in g/mol; the mass number stands in when no data source
    /// supplied a measured value.
    pub fn atomic_mass(&self) -> f64 {
        self.atomic_mass.unwrap_or(f64::from(self.mass_number))
    }

    pub const fn has_atomic_mass(&self) -> bool {
        self.atomic_mass.is_some()
    }

    /// Half-life in seconds, `+inf` for stable nuclides, `None` until attached.
    pub const fn half_life(&self) -> Option<f64> {
        self.half_life
    }

    pub fn decay_const(&self) -> NucResult<f64> {
        self.half_life
            .map(decay_constant_from_half_life)
            .ok_or_else(|| {
                NucError::quantity(
                    "QUANTITY.HALF_LIFE_UNSET",
                    format!("half-life of {self} has not been set"),
                )
            })
    }

    pub fn is_stable(&self) -> NucResult<bool> {
        Ok(self.decay_const()? == 0.0)
    }

    pub fn with_half_life(mut self, half_life_s: f64) -> NucResult<Self> {
        if half_life_s.is_nan() || half_life_s <= 0.0 {
            return Err(NucError::value(
                "VALUE.HALF_LIFE",
                format!("half-life must be positive, got {half_life_s}"),
            ));
        }
        self.half_life = Some(half_life_s);
        Ok(self)
    }

    pub fn with_decay_constant(self, decay_const: f64) -> NucResult<Self> {
        if !decay_const.is_finite() || decay_const < 0.0 {
            return Err(NucError::value(
                "VALUE.DECAY_CONSTANT",
                format!("decay constant must be finite and non-negative, got {decay_const}"),
            ));
        }
        self.with_half_life(half_life_from_decay_constant(decay_const))
    }

    pub fn stable(self) -> Self {
        Self {
            half_life: Some(f64::INFINITY),
            ..self
        }
    }

    pub fn with_atomic_mass(mut self, atomic_mass: f64) -> NucResult<Self> {
        if !atomic_mass.is_finite() || atomic_mass <= 0.0 {
            return Err(NucError::value(
                "VALUE.ATOMIC_MASS",
                format!("atomic mass must be positive, got {atomic_mass}"),
            ));
        }
        self.atomic_mass = Some(atomic_mass);
        Ok(self)
    }

    /// Drop any attached nuclear data.
    pub fn bare(&self) -> Self {
        Self {
            atomic_mass: None,
            half_life: None,
            ..self.clone()
        }
    }
}

impl PartialEq for Isotope {
    fn eq(&self, other: &Self) -> bool {
        self.atomic_number == other.atomic_number
            && self.mass_number == other.mass_number
            && self.isomer == other.isomer
    }
}

impl Eq for Isotope {}

impl Hash for Isotope {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.atomic_number.hash(state);
        self.mass_number.hash(state);
        self.isomer.hash(state);
    }
}

impl Display for Isotope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}-{}{}",
            self.symbol,
            self.mass_number,
            self.isomer.suffix()
        )
    }
}

impl FromStr for Isotope {
    type Err = NucError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
