use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_props::{MaterialParameters, PropertyTables};
use serde::{Deserialize, Serialize};

use crate::grid::{ensure_grid, linspace};
use crate::noise::{add_gaussian_noise, ensure_finite, ensure_sigma};

fn default_energy_max() -> f64 {
    50.0
}

fn default_points() -> usize {
    500
}

fn default_noise_sigma() -> f64 {
    0.01
}

fn default_background_amplitude() -> f64 {
    0.1
}

fn default_background_decay() -> f64 {
    30.0
}

/// Energy-loss grid and background for the scattering spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IesSpec {
    /// Lower edge of the energy-loss window (eV).
    #[serde(default)]
    pub energy_min: f64,
    /// Upper edge of the energy-loss window (eV).
    #[serde(default = "default_energy_max")]
    pub energy_max: f64,
    /// Number of grid points.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Standard deviation of additive intensity noise.
    #[serde(default = "default_noise_sigma")]
    pub noise_sigma: f64,
    /// Background amplitude at zero loss.
    #[serde(default = "default_background_amplitude")]
    pub background_amplitude: f64,
    /// Background decay length (eV).
    #[serde(default = "default_background_decay")]
    pub background_decay: f64,
}

impl Default for IesSpec {
    fn default() -> Self {
        Self {
            energy_min: 0.0,
            energy_max: default_energy_max(),
            points: default_points(),
            noise_sigma: default_noise_sigma(),
            background_amplitude: default_background_amplitude(),
            background_decay: default_background_decay(),
        }
    }
}

impl IesSpec {
    /// Requires an ascending grid and a positive background decay length.
    pub fn validate(&self) -> Result<(), MofError> {
        ensure_grid("ies-grid", self.energy_min, self.energy_max, self.points)?;
        if !self.background_decay.is_finite() || self.background_decay <= 0.0 {
            return Err(MofError::invalid_parameter(
                "ies-background-decay",
                format!("background decay must be positive, got {}", self.background_decay),
            ));
        }
        if !self.background_amplitude.is_finite() || self.background_amplitude < 0.0 {
            return Err(MofError::invalid_parameter(
                "ies-background-amplitude",
                format!(
                    "background amplitude must be finite and >= 0, got {}",
                    self.background_amplitude
                ),
            ));
        }
        ensure_sigma("ies-noise-sigma", self.noise_sigma)
    }
}

/// Gaussian loss feature `intensity * exp(-((E - center) / width)^2)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GaussianPeak {
    /// Feature name (`bulk_plasmon`, `d_transition`).
    pub label: String,
    /// Peak position (eV).
    pub center: f64,
    /// Peak height.
    pub intensity: f64,
    /// Width parameter (eV).
    pub width: f64,
}

impl GaussianPeak {
    /// Evaluates the peak at `energy`.
    pub fn at(&self, energy: f64) -> f64 {
        let z = (energy - self.center) / self.width;
        self.intensity * (-z * z).exp()
    }
}

/// Energy-loss spectrum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IesSpectrum {
    /// Ascending energy-loss grid (eV).
    pub energy: Vec<f64>,
    /// Intensity, never negative.
    pub intensity: Vec<f64>,
    /// The drawn peaks behind the curve.
    pub peaks: Vec<GaussianPeak>,
}

/// Superposes plasmon and d-transition peaks on a decaying background.
///
/// Draw order: plasmon intensity, plasmon width, d intensity, d width, noise.
pub fn generate_ies(
    params: &MaterialParameters,
    tables: &PropertyTables,
    spec: &IesSpec,
    rng: &mut RngHandle,
) -> Result<IesSpectrum, MofError> {
    spec.validate()?;
    let metal = tables.lookup_or_default(&params.metal);
    let plasmon = GaussianPeak {
        label: "bulk_plasmon".to_string(),
        center: metal.plasmon_peak,
        intensity: rng.perturb(0.8, 0.2),
        width: rng.perturb(2.0, 0.5),
    };
    let d_transition = GaussianPeak {
        label: "d_transition".to_string(),
        center: metal.d_transition,
        intensity: rng.perturb(0.4, 0.1),
        width: rng.perturb(1.5, 0.3),
    };

    let energy = linspace(spec.energy_min, spec.energy_max, spec.points);
    let mut intensity: Vec<f64> = energy
        .iter()
        .map(|&e| {
            let background = spec.background_amplitude * (-e / spec.background_decay).exp();
            plasmon.at(e) + d_transition.at(e) + background
        })
        .collect();
    add_gaussian_noise(&mut intensity, spec.noise_sigma, rng)?;
    ensure_finite("ies.intensity", &intensity)?;
    for value in intensity.iter_mut() {
        *value = value.max(0.0);
    }
    Ok(IesSpectrum {
        energy,
        intensity,
        peaks: vec![plasmon, d_transition],
    })
}
