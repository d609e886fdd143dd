use std::fmt;
use std::str::FromStr;

use mof_core::errors::MofError;
use serde::{Deserialize, Serialize};

use crate::tables::PropertyTables;

/// Electrochemical cell assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Assembly {
    /// Symmetric or hybrid two-electrode device.
    #[serde(rename = "Two-Electrode")]
    TwoElectrode,
    /// Working, counter and reference electrode cell.
    #[serde(rename = "Three-Electrode")]
    ThreeElectrode,
}

impl Assembly {
    /// Label used in serialized samples and CSV rows.
    pub fn label(&self) -> &'static str {
        match self {
            Assembly::TwoElectrode => "Two-Electrode",
            Assembly::ThreeElectrode => "Three-Electrode",
        }
    }

    /// Capacity factor applied by the charge-discharge generator.
    pub fn capacity_factor(&self) -> f64 {
        match self {
            Assembly::TwoElectrode => 1.0,
            Assembly::ThreeElectrode => 1.1,
        }
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Assembly {
    type Err = MofError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "two-electrode" | "two" | "2" => Ok(Assembly::TwoElectrode),
            "three-electrode" | "three" | "3" => Ok(Assembly::ThreeElectrode),
            _ => Err(MofError::unknown_category("assembly", value)),
        }
    }
}

/// Categorical descriptor of one hypothetical electrode material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialParameters {
    /// Metal node; values outside the table fall back to default coefficients.
    pub metal: String,
    /// Oxidation state of the metal, in `1..=3`.
    pub valency: u8,
    /// Organic linker.
    pub ligand: String,
    /// Cell assembly.
    pub assembly: Assembly,
    /// Electrode substrate.
    pub electrode: String,
    /// Whether the material is a framework rather than a plain complex.
    pub is_mof: bool,
}

impl MaterialParameters {
    /// Checks valency and that ligand and electrode exist in `tables`.
    ///
    /// Metals are never rejected.
    pub fn validate(&self, tables: &PropertyTables) -> Result<(), MofError> {
        if !(1..=3).contains(&self.valency) {
            return Err(MofError::invalid_parameter(
                "invalid-valency",
                format!("valency {} outside 1..=3", self.valency),
            )
            .with_context("valency", self.valency.to_string()));
        }
        tables.ligand(&self.ligand)?;
        tables.electrode(&self.electrode)?;
        Ok(())
    }

    /// Multiplier applied to framework materials.
    pub fn mof_factor(&self) -> f64 {
        if self.is_mof {
            1.5
        } else {
            1.0
        }
    }

    /// Nominal capacity in mAh/g before any material multiplier.
    pub fn base_capacity(&self) -> f64 {
        100.0 * f64::from(self.valency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembly_parses_labels_and_shorthands() {
        assert_eq!("Two-Electrode".parse::<Assembly>().unwrap(), Assembly::TwoElectrode);
        assert_eq!("three".parse::<Assembly>().unwrap(), Assembly::ThreeElectrode);
        assert!("four".parse::<Assembly>().is_err());
    }

    #[test]
    fn assembly_serializes_with_hyphenated_label() {
        let json = serde_json::to_string(&Assembly::ThreeElectrode).unwrap();
        assert_eq!(json, "\"Three-Electrode\"");
    }

    #[test]
    fn validate_rejects_zero_valency() {
        let params = MaterialParameters {
            metal: "Cu".into(),
            valency: 0,
            ligand: "BDC".into(),
            assembly: Assembly::TwoElectrode,
            electrode: "Nickel Foam".into(),
            is_mof: true,
        };
        let err = params.validate(&PropertyTables::builtin()).unwrap_err();
        assert_eq!(err.code(), "invalid-valency");
    }
}
