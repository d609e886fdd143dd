//! Typed coefficient tables keyed by category label.
//!
//! Key order in each table is the category universe: sampling draws indices
//! into it and the encoder lays out one-hot blocks in the same order.

use std::hash::Hasher;

use indexmap::IndexMap;
use mof_core::errors::{ErrorInfo, MofError};
use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;

use crate::universe::{CATEGORY_UNIVERSE_VERSION, ELECTRODES, LIGANDS, METALS};

/// Physical factors attached to a metal node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetalCoefficients {
    /// Redox activity multiplier on capacity.
    pub redox_factor: f64,
    /// Relative electronic conductivity.
    pub conductivity: f64,
    /// Bulk plasmon energy loss (eV).
    pub plasmon_peak: f64,
    /// d-d transition energy loss (eV).
    pub d_transition: f64,
}

impl MetalCoefficients {
    /// Neutral bundle returned for metals absent from the table.
    pub const DEFAULT: Self = Self::new(1.0, 1.0, 20.0, 6.0);

    /// Creates a coefficient bundle.
    pub const fn new(
        redox_factor: f64,
        conductivity: f64,
        plasmon_peak: f64,
        d_transition: f64,
    ) -> Self {
        Self {
            redox_factor,
            conductivity,
            plasmon_peak,
            d_transition,
        }
    }
}

impl Default for MetalCoefficients {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Substrate factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElectrodeCoefficients {
    /// Capacity multiplier contributed by the substrate.
    pub capacity_boost: f64,
    /// Charge-transfer resistance multiplier.
    pub resistance: f64,
}

impl ElectrodeCoefficients {
    /// Creates a coefficient bundle.
    pub const fn new(capacity_boost: f64, resistance: f64) -> Self {
        Self {
            capacity_boost,
            resistance,
        }
    }
}

/// Linker factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LigandCoefficients {
    /// Capacity multiplier from accessible pore volume.
    pub porosity: f64,
    /// Structural stability factor.
    pub stability: f64,
}

impl LigandCoefficients {
    /// Creates a coefficient bundle.
    pub const fn new(porosity: f64, stability: f64) -> Self {
        Self {
            porosity,
            stability,
        }
    }
}

/// Table selector for [`PropertyTables::lookup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PropertyCategory {
    /// Metal node table.
    Metal,
    /// Linker table.
    Ligand,
    /// Substrate table.
    Electrode,
}

impl PropertyCategory {
    /// Lower-case label used in error codes.
    pub fn label(&self) -> &'static str {
        match self {
            PropertyCategory::Metal => "metal",
            PropertyCategory::Ligand => "ligand",
            PropertyCategory::Electrode => "electrode",
        }
    }
}

/// Coefficients returned by a category lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "kebab-case")]
pub enum PropertyCoefficients {
    /// Metal factors.
    Metal(MetalCoefficients),
    /// Linker factors.
    Ligand(LigandCoefficients),
    /// Substrate factors.
    Electrode(ElectrodeCoefficients),
}

const BUILTIN_METALS: [MetalCoefficients; 15] = [
    MetalCoefficients::new(1.2, 1.15, 22.0, 5.0),
    MetalCoefficients::new(1.1, 1.10, 20.0, 6.0),
    MetalCoefficients::new(1.15, 1.12, 21.0, 5.5),
    MetalCoefficients::new(0.95, 1.05, 19.0, 7.0),
    MetalCoefficients::new(1.05, 1.08, 20.5, 6.5),
    MetalCoefficients::new(1.0, 1.06, 19.5, 6.8),
    MetalCoefficients::new(1.25, 1.20, 23.0, 4.5),
    MetalCoefficients::new(1.18, 1.18, 24.0, 4.8),
    MetalCoefficients::new(1.12, 1.14, 21.5, 5.2),
    MetalCoefficients::new(1.22, 1.17, 23.5, 5.0),
    MetalCoefficients::new(1.08, 1.09, 20.2, 6.2),
    MetalCoefficients::new(1.06, 1.07, 19.8, 6.5),
    MetalCoefficients::new(0.98, 1.04, 18.5, 7.2),
    MetalCoefficients::new(1.13, 1.11, 21.8, 5.8),
    MetalCoefficients::new(1.16, 1.13, 22.5, 5.5),
];

const BUILTIN_LIGANDS: [LigandCoefficients; 6] = [
    LigandCoefficients::new(1.1, 1.0),
    LigandCoefficients::new(1.2, 1.1),
    LigandCoefficients::new(1.15, 1.05),
    LigandCoefficients::new(1.05, 0.95),
    LigandCoefficients::new(1.08, 1.02),
    LigandCoefficients::new(1.12, 1.08),
];

const BUILTIN_ELECTRODES: [ElectrodeCoefficients; 4] = [
    ElectrodeCoefficients::new(1.3, 0.8),
    ElectrodeCoefficients::new(1.0, 1.0),
    ElectrodeCoefficients::new(1.15, 0.9),
    ElectrodeCoefficients::new(1.1, 1.1),
];

/// Additional or overriding table rows, typically loaded from YAML.
///
/// Existing keys keep their position; new keys are appended.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TableExtensions {
    /// Metal rows.
    #[serde(default)]
    pub metals: IndexMap<String, MetalCoefficients>,
    /// Ligand rows.
    #[serde(default)]
    pub ligands: IndexMap<String, LigandCoefficients>,
    /// Electrode rows.
    #[serde(default)]
    pub electrodes: IndexMap<String, ElectrodeCoefficients>,
}

/// Ordered coefficient tables for the three categorical descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTables {
    metals: IndexMap<String, MetalCoefficients>,
    ligands: IndexMap<String, LigandCoefficients>,
    electrodes: IndexMap<String, ElectrodeCoefficients>,
}

impl Default for PropertyTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PropertyTables {
    /// Tables for the built-in universe.
    pub fn builtin() -> Self {
        Self {
            metals: zip_rows(&METALS, &BUILTIN_METALS),
            ligands: zip_rows(&LIGANDS, &BUILTIN_LIGANDS),
            electrodes: zip_rows(&ELECTRODES, &BUILTIN_ELECTRODES),
        }
    }

    /// Built-in tables extended with `extensions`.
    pub fn with_extensions(extensions: &TableExtensions) -> Result<Self, MofError> {
        let mut tables = Self::builtin();
        tables.extend(extensions)?;
        Ok(tables)
    }

    /// Merges rows into the tables after checking every factor is finite and positive.
    pub fn extend(&mut self, extensions: &TableExtensions) -> Result<(), MofError> {
        for (key, row) in &extensions.metals {
            ensure_positive("metal", key, "redox_factor", row.redox_factor)?;
            ensure_positive("metal", key, "conductivity", row.conductivity)?;
            ensure_positive("metal", key, "plasmon_peak", row.plasmon_peak)?;
            ensure_positive("metal", key, "d_transition", row.d_transition)?;
        }
        for (key, row) in &extensions.ligands {
            ensure_positive("ligand", key, "porosity", row.porosity)?;
            ensure_positive("ligand", key, "stability", row.stability)?;
        }
        for (key, row) in &extensions.electrodes {
            ensure_positive("electrode", key, "capacity_boost", row.capacity_boost)?;
            ensure_positive("electrode", key, "resistance", row.resistance)?;
        }
        for (key, row) in &extensions.metals {
            self.metals.insert(key.clone(), *row);
        }
        for (key, row) in &extensions.ligands {
            self.ligands.insert(key.clone(), *row);
        }
        for (key, row) in &extensions.electrodes {
            self.electrodes.insert(key.clone(), *row);
        }
        Ok(())
    }

    /// Generic lookup. Metals never fail; ligands and electrodes raise
    /// [`MofError::UnknownCategory`] for keys outside the table.
    pub fn lookup(
        &self,
        category: PropertyCategory,
        key: &str,
    ) -> Result<PropertyCoefficients, MofError> {
        match category {
            PropertyCategory::Metal => Ok(PropertyCoefficients::Metal(self.lookup_or_default(key))),
            PropertyCategory::Ligand => self.ligand(key).map(PropertyCoefficients::Ligand),
            PropertyCategory::Electrode => self.electrode(key).map(PropertyCoefficients::Electrode),
        }
    }

    /// Metal coefficients, or [`MetalCoefficients::DEFAULT`] for unknown metals.
    pub fn lookup_or_default(&self, metal: &str) -> MetalCoefficients {
        match self.metals.get(metal) {
            Some(row) => *row,
            None => MetalCoefficients::DEFAULT,
        }
    }

    /// Ligand coefficients.
    pub fn ligand(&self, ligand: &str) -> Result<LigandCoefficients, MofError> {
        self.ligands
            .get(ligand)
            .copied()
            .ok_or_else(|| MofError::unknown_category("ligand", ligand))
    }

    /// Electrode coefficients.
    pub fn electrode(&self, electrode: &str) -> Result<ElectrodeCoefficients, MofError> {
        self.electrodes
            .get(electrode)
            .copied()
            .ok_or_else(|| MofError::unknown_category("electrode", electrode))
    }

    /// Whether `metal` has its own table row.
    pub fn is_known_metal(&self, metal: &str) -> bool {
        self.metals.contains_key(metal)
    }

    /// Metal labels in universe order.
    pub fn metals(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.metals.keys().map(String::as_str)
    }

    /// Ligand labels in universe order.
    pub fn ligands(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.ligands.keys().map(String::as_str)
    }

    /// Electrode labels in universe order.
    pub fn electrodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.electrodes.keys().map(String::as_str)
    }

    /// Metal label at a universe index.
    pub fn metal_at(&self, index: usize) -> Option<&str> {
        self.metals.get_index(index).map(|(key, _)| key.as_str())
    }

    /// Electrode label at a universe index.
    pub fn electrode_at(&self, index: usize) -> Option<&str> {
        self.electrodes.get_index(index).map(|(key, _)| key.as_str())
    }

    /// Version tag of the universe described by these tables.
    ///
    /// The built-in key order reports [`CATEGORY_UNIVERSE_VERSION`]; any other
    /// order gets a suffix fingerprinting the labels so encodings from
    /// different universes are never confused.
    pub fn universe_version(&self) -> String {
        let builtin = self.metals().eq(METALS.iter().copied())
            && self.ligands().eq(LIGANDS.iter().copied())
            && self.electrodes().eq(ELECTRODES.iter().copied());
        if builtin {
            return CATEGORY_UNIVERSE_VERSION.to_string();
        }
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        for (tag, labels) in [
            ("metal", self.metals().collect::<Vec<_>>()),
            ("ligand", self.ligands().collect()),
            ("electrode", self.electrodes().collect()),
        ] {
            hasher.write(tag.as_bytes());
            for label in labels {
                hasher.write(label.as_bytes());
                hasher.write_u8(0xff);
            }
        }
        format!("{CATEGORY_UNIVERSE_VERSION}+ext.{:016x}", hasher.finish())
    }
}

fn zip_rows<T: Copy>(keys: &[&str], rows: &[T]) -> IndexMap<String, T> {
    keys.iter()
        .zip(rows.iter())
        .map(|(key, row)| (key.to_string(), *row))
        .collect()
}

fn ensure_positive(category: &str, key: &str, field: &str, value: f64) -> Result<(), MofError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(MofError::InvalidParameter(
        ErrorInfo::new(
            "non-positive-coefficient",
            format!("{category} '{key}' has {field} = {value}"),
        )
        .with_context("category", category)
        .with_context("key", key)
        .with_context("field", field)
        .with_hint("table coefficients must be finite and strictly positive"),
    ))
}
