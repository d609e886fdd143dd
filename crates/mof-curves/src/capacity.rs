//! Capacity basis shared by the charge-discharge and rate generators.

use mof_core::errors::MofError;
use mof_props::{MaterialParameters, PropertyTables};
use serde::{Deserialize, Serialize};

/// Resolved multiplicative factors behind a material's nominal capacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapacityBasis {
    /// `100 * valency` in mAh/g.
    pub base_capacity: f64,
    /// Metal redox factor (default bundle for unknown metals).
    pub redox_factor: f64,
    /// Electrode capacity boost.
    pub capacity_boost: f64,
    /// Ligand porosity.
    pub porosity: f64,
    /// 1.5 for frameworks, 1.0 otherwise.
    pub mof_factor: f64,
    /// 1.1 for three-electrode cells, 1.0 otherwise.
    pub assembly_factor: f64,
}

impl CapacityBasis {
    /// Looks up every factor for `params`.
    pub fn resolve(params: &MaterialParameters, tables: &PropertyTables) -> Result<Self, MofError> {
        params.validate(tables)?;
        let metal = tables.lookup_or_default(&params.metal);
        let electrode = tables.electrode(&params.electrode)?;
        let ligand = tables.ligand(&params.ligand)?;
        Ok(Self {
            base_capacity: params.base_capacity(),
            redox_factor: metal.redox_factor,
            capacity_boost: electrode.capacity_boost,
            porosity: ligand.porosity,
            mof_factor: params.mof_factor(),
            assembly_factor: params.assembly.capacity_factor(),
        })
    }

    /// Material multiplier without the assembly factor.
    pub fn material_multiplier(&self) -> f64 {
        self.redox_factor * self.capacity_boost * self.porosity * self.mof_factor
    }

    /// Multiplier used by the charge-discharge generator.
    pub fn gcd_multiplier(&self) -> f64 {
        self.material_multiplier() * self.assembly_factor
    }

    /// Capacity ceiling for the rate-capability curve.
    pub fn max_capacity(&self) -> f64 {
        self.base_capacity * self.material_multiplier()
    }

    /// Discharge time in hours at current density `current`.
    pub fn discharge_time(&self, current: f64) -> f64 {
        self.base_capacity * self.gcd_multiplier() / (current * 60.0)
    }
}
