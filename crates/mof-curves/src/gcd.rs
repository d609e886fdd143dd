use std::collections::BTreeMap;

use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_props::{MaterialParameters, PropertyTables};
use serde::{Deserialize, Serialize};

use crate::capacity::CapacityBasis;
use crate::grid::linspace;
use crate::noise::{add_gaussian_noise, ensure_finite, ensure_sigma};

fn default_current_densities() -> Vec<f64> {
    vec![0.5, 1.0, 1.5, 2.0, 2.5]
}

fn default_resolution() -> usize {
    200
}

fn default_noise_sigma() -> f64 {
    0.01
}

/// Settings for the galvanostatic discharge generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcdSpec {
    /// Current densities (A/g), one trace each.
    #[serde(default = "default_current_densities")]
    pub current_densities: Vec<f64>,
    /// Samples per trace.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Standard deviation of additive voltage noise (V).
    #[serde(default = "default_noise_sigma")]
    pub noise_sigma: f64,
}

impl Default for GcdSpec {
    fn default() -> Self {
        Self {
            current_densities: default_current_densities(),
            resolution: default_resolution(),
            noise_sigma: default_noise_sigma(),
        }
    }
}

impl GcdSpec {
    /// Rejects empty or non-positive current sets, degenerate resolutions and bad noise.
    pub fn validate(&self) -> Result<(), MofError> {
        if self.current_densities.is_empty() {
            return Err(MofError::invalid_parameter(
                "gcd-no-currents",
                "at least one current density is required",
            ));
        }
        if let Some(bad) = self
            .current_densities
            .iter()
            .find(|current| !current.is_finite() || **current <= 0.0)
        {
            return Err(MofError::invalid_parameter(
                "gcd-current-density",
                format!("current density must be finite and positive, got {bad}"),
            )
            .with_context("current_density", bad.to_string()));
        }
        let mut keys: Vec<String> = self.current_densities.iter().map(|c| current_key(*c)).collect();
        keys.sort();
        if let Some(pair) = keys.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(MofError::invalid_parameter(
                "gcd-duplicate-current",
                format!("current density listed twice ({})", pair[0]),
            ));
        }
        if self.resolution < 2 {
            return Err(MofError::invalid_parameter(
                "gcd-resolution",
                format!("trace needs at least two samples, got {}", self.resolution),
            ));
        }
        ensure_sigma("gcd-noise-sigma", self.noise_sigma)
    }
}

/// One discharge trace at a fixed current density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GcdTrace {
    /// Current density (A/g).
    pub current_density: f64,
    /// Time grid (h), starting at zero.
    pub time: Vec<f64>,
    /// Cell voltage (V); not clipped.
    pub voltage: Vec<f64>,
}

/// Traces keyed by [`current_key`].
///
/// Keys sort as strings, so `current_10.0` comes before `current_2.0`; the
/// map is not ordered by current density.
pub type GcdCurves = BTreeMap<String, GcdTrace>;

/// Map key for a current density, e.g. `current_0.5`.
pub fn current_key(current: f64) -> String {
    format!("current_{current:?}")
}

/// Generates exponential-decay discharge curves for each configured current density.
///
/// Per current the stream is consumed as: start voltage, end voltage, then
/// one noise draw per time sample.
pub fn generate_gcd(
    params: &MaterialParameters,
    tables: &PropertyTables,
    spec: &GcdSpec,
    rng: &mut RngHandle,
) -> Result<GcdCurves, MofError> {
    spec.validate()?;
    let basis = CapacityBasis::resolve(params, tables)?;
    let mut curves = GcdCurves::new();
    for &current in &spec.current_densities {
        let max_time = basis.discharge_time(current);
        if !max_time.is_finite() || max_time <= 0.0 {
            return Err(MofError::invalid_parameter(
                "gcd-time-span",
                format!("discharge time {max_time} is not a positive finite span"),
            )
            .with_context("current_density", current.to_string())
            .with_context("metal", params.metal.clone()));
        }
        let time = linspace(0.0, max_time, spec.resolution);
        let v_start = rng.perturb(0.9, 0.1);
        let v_end = rng.perturb(0.1, 0.05);
        let tau = max_time / 3.0;
        let mut voltage: Vec<f64> = time
            .iter()
            .map(|t| v_end + (v_start - v_end) * (-t / tau).exp())
            .collect();
        add_gaussian_noise(&mut voltage, spec.noise_sigma, rng)?;
        ensure_finite("gcd.voltage", &voltage)?;
        curves.insert(
            current_key(current),
            GcdTrace {
                current_density: current,
                time,
                voltage,
            },
        );
    }
    Ok(curves)
}
