pub mod errors;

pub use errors::{NucError, NucErrorCategory, NucResult, ParserResult};

use std::fmt::{Display, Formatter};

/// Physical unit an isotope amount can be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityUnit {
    Atoms,
    Grams,
    Becquerels,
    Microcuries,
}

impl QuantityUnit {
    pub const ALL: [QuantityUnit; 4] = [
        QuantityUnit::Atoms,
        QuantityUnit::Grams,
        QuantityUnit::Becquerels,
        QuantityUnit::Microcuries,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Atoms => "atoms",
            Self::Grams => "g",
            Self::Becquerels => "Bq",
            Self::Microcuries => "uCi",
        }
    }

    /// Activity units only make sense for a radioactive isotope.
    pub const fn is_activity(self) -> bool {
        matches!(self, Self::Becquerels | Self::Microcuries)
    }
}

impl Display for QuantityUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

/// An amount of material tagged with the unit it was given in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quantity {
    Atoms(f64),
    Grams(f64),
    Becquerels(f64),
    Microcuries(f64),
}

impl Quantity {
    pub fn new(unit: QuantityUnit, value: f64) -> Self {
        match unit {
            QuantityUnit::Atoms => Self::Atoms(value),
            QuantityUnit::Grams => Self::Grams(value),
            QuantityUnit::Becquerels => Self::Becquerels(value),
            QuantityUnit::Microcuries => Self::Microcuries(value),
        }
    }

    pub const fn unit(self) -> QuantityUnit {
        match self {
            Self::Atoms(_) => QuantityUnit::Atoms,
            Self::Grams(_) => QuantityUnit::Grams,
            Self::Becquerels(_) => QuantityUnit::Becquerels,
            Self::Microcuries(_) => QuantityUnit::Microcuries,
        }
    }

    pub const fn value(self) -> f64 {
        match self {
            Self::Atoms(value)
            | Self::Grams(value)
            | Self::Becquerels(value)
            | Self::Microcuries(value) => value,
        }
    }

    /// Rejects negative and non-finite amounts.
    pub fn validated(self) -> NucResult<Self> {
        let value = self.value();
        if !value.is_finite() {
            return Err(NucError::value(
                "VALUE.QUANTITY_NOT_FINITE",
                format!("{} amount must be finite, got {}", self.unit(), value),
            ));
        }
        if value < 0.0 {
            return Err(NucError::value(
                "VALUE.QUANTITY_NEGATIVE",
                format!("{} amount must be non-negative, got {}", self.unit(), value),
            ));
        }
        Ok(self)
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:e} {}", self.value(), self.unit())
    }
}
