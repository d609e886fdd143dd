use std::f64::consts::PI;

use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_props::{ElectrodeCoefficients, MaterialParameters, PropertyTables};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::grid::{ensure_grid, logspace};
use crate::noise::{ensure_finite, ensure_sigma, gaussian_noise};

fn default_min_exponent() -> f64 {
    -2.0
}

fn default_max_exponent() -> f64 {
    5.0
}

fn default_points() -> usize {
    100
}

fn default_noise_sigma() -> f64 {
    0.5
}

/// Frequency sweep settings. Frequencies run from `10^min_exponent` to
/// `10^max_exponent` Hz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EisSpec {
    /// Decade of the lowest frequency.
    #[serde(default = "default_min_exponent")]
    pub min_exponent: f64,
    /// Decade of the highest frequency.
    #[serde(default = "default_max_exponent")]
    pub max_exponent: f64,
    /// Number of frequencies.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Standard deviation of noise added to each impedance component (Ω).
    #[serde(default = "default_noise_sigma")]
    pub noise_sigma: f64,
}

impl Default for EisSpec {
    fn default() -> Self {
        Self {
            min_exponent: default_min_exponent(),
            max_exponent: default_max_exponent(),
            points: default_points(),
            noise_sigma: default_noise_sigma(),
        }
    }
}

impl EisSpec {
    /// Requires an ascending sweep with at least two frequencies and a usable noise level.
    pub fn validate(&self) -> Result<(), MofError> {
        ensure_grid("eis-grid", self.min_exponent, self.max_exponent, self.points)?;
        ensure_sigma("eis-noise-sigma", self.noise_sigma)
    }
}

/// Randles-type equivalent circuit: solution resistance in series with the
/// charge-transfer resistance in parallel with a CPE plus Warburg branch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RandlesCircuit {
    /// Solution resistance (Ω).
    pub r_solution: f64,
    /// Charge-transfer resistance (Ω).
    pub r_ct: f64,
    /// Constant-phase element magnitude.
    pub cpe_t: f64,
    /// Constant-phase element exponent.
    pub cpe_p: f64,
    /// Warburg coefficient (Ω·s^-1/2).
    pub warburg: f64,
}

impl RandlesCircuit {
    /// Draws circuit parameters in the order R_s, R_ct, T, P, W.
    pub fn draw(electrode: &ElectrodeCoefficients, rng: &mut RngHandle) -> Self {
        let r_solution = rng.perturb(5.0, 2.0);
        let r_ct = electrode.resistance * rng.perturb(20.0, 10.0);
        let cpe_t = rng.perturb(0.001, 0.0005);
        let cpe_p = rng.perturb(0.85, 0.1);
        let warburg = rng.perturb(10.0, 5.0);
        Self {
            r_solution,
            r_ct,
            cpe_t,
            cpe_p,
            warburg,
        }
    }

    /// Complex impedance at angular frequency `omega`.
    pub fn impedance(&self, omega: f64) -> Complex64 {
        let one = Complex64::new(1.0, 0.0);
        let z_cpe = one / (Complex64::new(0.0, omega).powf(self.cpe_p) * self.cpe_t);
        let z_warburg = Complex64::new(1.0, -1.0) * (self.warburg / omega.sqrt());
        let branch = one / (z_cpe + z_warburg);
        Complex64::new(self.r_solution, 0.0) + one / (one / self.r_ct + branch)
    }
}

/// Nyquist trace with the circuit that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EisNyquist {
    /// Real part of the impedance (Ω).
    pub z_real: Vec<f64>,
    /// Negated imaginary part (Ω), positive above the axis.
    pub z_imag: Vec<f64>,
    /// Ascending sweep frequencies (Hz).
    pub frequency: Vec<f64>,
    /// Drawn circuit parameters.
    pub circuit: RandlesCircuit,
}

/// Evaluates a drawn Randles circuit over a log sweep and adds component noise.
///
/// Noise is drawn for every real component first, then every imaginary one.
pub fn generate_eis(
    params: &MaterialParameters,
    tables: &PropertyTables,
    spec: &EisSpec,
    rng: &mut RngHandle,
) -> Result<EisNyquist, MofError> {
    spec.validate()?;
    let electrode = tables.electrode(&params.electrode)?;
    let circuit = RandlesCircuit::draw(&electrode, rng);
    let frequency = logspace(spec.min_exponent, spec.max_exponent, spec.points);

    let (mut z_real, mut z_imag): (Vec<f64>, Vec<f64>) = frequency
        .iter()
        .map(|f| {
            let z = circuit.impedance(2.0 * PI * f);
            (z.re, -z.im)
        })
        .unzip();
    ensure_finite("eis.z_real", &z_real)?;
    ensure_finite("eis.z_imag", &z_imag)?;

    let real_noise = gaussian_noise(z_real.len(), spec.noise_sigma, rng)?;
    let imag_noise = gaussian_noise(z_imag.len(), spec.noise_sigma, rng)?;
    for (value, noise) in z_real.iter_mut().zip(real_noise) {
        *value += noise;
    }
    for (value, noise) in z_imag.iter_mut().zip(imag_noise) {
        *value += noise;
    }

    Ok(EisNyquist {
        z_real,
        z_imag,
        frequency,
        circuit,
    })
}
