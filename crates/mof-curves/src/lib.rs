//! Closed-form synthetic curve generators for MOF electrode materials.
//!
//! Every generator takes the material descriptor, the property tables, its
//! own spec and an explicit [`mof_core::RngHandle`]. Specs are checked on
//! entry so degenerate grids fail with [`mof_core::MofError::InvalidParameter`]
//! instead of leaking NaN into the output.

pub mod capacity;
pub mod device;
pub mod eis;
pub mod gcd;
pub mod grid;
pub mod ies;
pub mod noise;
pub mod rate;

use serde::{Deserialize, Serialize};

pub use capacity::CapacityBasis;
pub use device::{simulate_device, DeviceProfile, DeviceSpec, DeviceTrace, ImpedanceTrace};
pub use eis::{generate_eis, EisNyquist, EisSpec, RandlesCircuit};
pub use gcd::{current_key, generate_gcd, GcdCurves, GcdSpec, GcdTrace};
pub use grid::{linspace, logspace};
pub use ies::{generate_ies, GaussianPeak, IesSpec, IesSpectrum};
pub use rate::{generate_rate_capability, RateCapability, RateSpec};

/// Spec bundle for the four per-sample generators.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratorSpecs {
    /// Charge-discharge settings.
    #[serde(default)]
    pub gcd: GcdSpec,
    /// Rate-capability settings.
    #[serde(default)]
    pub rate: RateSpec,
    /// Scattering spectrum settings.
    #[serde(default)]
    pub ies: IesSpec,
    /// Impedance sweep settings.
    #[serde(default)]
    pub eis: EisSpec,
}

impl GeneratorSpecs {
    /// Checks every spec without drawing any randomness.
    pub fn validate(&self) -> Result<(), mof_core::MofError> {
        self.gcd.validate()?;
        self.rate.validate()?;
        self.ies.validate()?;
        self.eis.validate()
    }
}
