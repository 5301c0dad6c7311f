use super::Isotope;
use crate::domain::{NucError, NucResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NuclideTableDocument {
    nuclides: Vec<NuclideRecord>,
}

/// One row of a nuclide data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NuclideRecord {
    pub isotope: String,
    #[serde(default)]
    pub half_life_seconds: Option<HalfLifeField>,
    #[serde(default)]
    pub atomic_mass: Option<f64>,
}

/// Half-lives are numbers of seconds, or a label for stable nuclides.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HalfLifeField {
    Seconds(f64),
    Label(String),
}

impl HalfLifeField {
    fn seconds(&self, isotope: &str) -> NucResult<f64> {
        match self {
            Self::Seconds(value) => Ok(*value),
            Self::Label(label) => match label.trim().to_ascii_lowercase().as_str() {
                "stable" | "inf" | "infinity" => Ok(f64::INFINITY),
                other => Err(NucError::input(
                    "INPUT.NUCLIDE_TABLE",
                    format!("half-life of {isotope} has unrecognized label '{other}'"),
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NuclideData {
    pub half_life: Option<f64>,
    pub atomic_mass: Option<f64>,
}

/// External nuclear data source keyed by nuclide identity.
#[derive(Debug, Clone, Default)]
pub struct NuclideTable {
    entries: HashMap<Isotope, NuclideData>,
}

impl NuclideTable {
    pub fn from_json_str(text: &str) -> NucResult<Self> {
        let document: NuclideTableDocument = serde_json::from_str(text).map_err(|error| {
            NucError::input(
                "INPUT.NUCLIDE_TABLE",
                format!("failed to parse nuclide table: {error}"),
            )
        })?;
        Self::from_records(document.nuclides)
    }

    pub fn from_path(path: &Path) -> NucResult<Self> {
        let text = fs::read_to_string(path).map_err(|error| {
            NucError::io_system(
                "IO.NUCLIDE_TABLE",
                format!("failed to read '{}': {}", path.display(), error),
            )
        })?;
        let table = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), entries = table.len(), "loaded nuclide table");
        Ok(table)
    }

    pub fn from_records(records: impl IntoIterator<Item = NuclideRecord>) -> NucResult<Self> {
        let mut entries = HashMap::new();
        for record in records {
            let isotope = Isotope::parse(&record.isotope)?;
            let half_life = record
                .half_life_seconds
                .as_ref()
                .map(|field| field.seconds(&record.isotope))
                .transpose()?;

            // Run the values through the same checks enrichment applies.
            let mut checked = isotope.bare();
            if let Some(seconds) = half_life {
                checked = checked.with_half_life(seconds)?;
            }
            if let Some(mass) = record.atomic_mass {
                checked.with_atomic_mass(mass)?;
            }

            let data = NuclideData {
                half_life,
                atomic_mass: record.atomic_mass,
            };
            if entries.insert(isotope.bare(), data).is_some() {
                return Err(NucError::input(
                    "INPUT.NUCLIDE_TABLE",
                    format!("duplicate nuclide entry for {isotope}"),
                ));
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, isotope: &Isotope) -> Option<&NuclideData> {
        self.entries.get(isotope)
    }

    /// Attach tabulated data; isotopes missing from the table pass through.
    pub fn enrich(&self, isotope: &Isotope) -> NucResult<Isotope> {
        let Some(data) = self.get(isotope) else {
            tracing::trace!(isotope = %isotope, "no tabulated nuclear data");
            return Ok(isotope.clone());
        };

        let mut enriched = isotope.clone();
        if let Some(half_life) = data.half_life {
            enriched = enriched.with_half_life(half_life)?;
        }
        if let Some(mass) = data.atomic_mass {
            enriched = enriched.with_atomic_mass(mass)?;
        }
        Ok(enriched)
    }

    /// Parse a designator and enrich it in one step.
    pub fn lookup(&self, designator: &str) -> NucResult<Isotope> {
        self.enrich(&Isotope::parse(designator)?)
    }
}
