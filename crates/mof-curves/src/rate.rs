use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_props::{MaterialParameters, PropertyTables};
use serde::{Deserialize, Serialize};

use crate::capacity::CapacityBasis;
use crate::grid::{ensure_grid, linspace};
use crate::noise::{add_gaussian_noise, ensure_finite};

fn default_start() -> f64 {
    0.5
}

fn default_stop() -> f64 {
    5.0
}

fn default_points() -> usize {
    10
}

fn default_exponent() -> f64 {
    0.3
}

fn default_noise_fraction() -> f64 {
    0.02
}

/// Settings for the rate-capability sweep.
///
/// Capacity follows `max_capacity * (start / c)^exponent`, so the first grid
/// point is the anchor at which the curve reaches its ceiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSpec {
    /// Lowest current density (A/g).
    #[serde(default = "default_start")]
    pub start: f64,
    /// Highest current density (A/g).
    #[serde(default = "default_stop")]
    pub stop: f64,
    /// Number of grid points.
    #[serde(default = "default_points")]
    pub points: usize,
    /// Power-law fade exponent.
    #[serde(default = "default_exponent")]
    pub exponent: f64,
    /// Noise standard deviation as a fraction of the ceiling.
    #[serde(default = "default_noise_fraction")]
    pub noise_fraction: f64,
}

impl Default for RateSpec {
    fn default() -> Self {
        Self {
            start: default_start(),
            stop: default_stop(),
            points: default_points(),
            exponent: default_exponent(),
            noise_fraction: default_noise_fraction(),
        }
    }
}

impl RateSpec {
    /// Requires a positive ascending grid and finite, non-negative shape parameters.
    pub fn validate(&self) -> Result<(), MofError> {
        ensure_grid("rate-grid", self.start, self.stop, self.points)?;
        if self.start <= 0.0 {
            return Err(MofError::invalid_parameter(
                "rate-current-density",
                format!("current densities must be positive, grid starts at {}", self.start),
            ));
        }
        if !self.exponent.is_finite() || self.exponent < 0.0 {
            return Err(MofError::invalid_parameter(
                "rate-exponent",
                format!("fade exponent must be finite and >= 0, got {}", self.exponent),
            ));
        }
        if !self.noise_fraction.is_finite() || self.noise_fraction < 0.0 {
            return Err(MofError::invalid_parameter(
                "rate-noise",
                format!("noise fraction must be finite and >= 0, got {}", self.noise_fraction),
            ));
        }
        Ok(())
    }
}

/// Specific capacity against current density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCapability {
    /// Ascending current densities (A/g).
    pub current_density: Vec<f64>,
    /// Specific capacity (mAh/g), clamped to `[0, max_capacity]`.
    pub specific_capacity: Vec<f64>,
    /// Ceiling used for clamping.
    pub max_capacity: f64,
}

/// Generates a power-law capacity fade with clamped Gaussian noise.
pub fn generate_rate_capability(
    params: &MaterialParameters,
    tables: &PropertyTables,
    spec: &RateSpec,
    rng: &mut RngHandle,
) -> Result<RateCapability, MofError> {
    spec.validate()?;
    let max_capacity = CapacityBasis::resolve(params, tables)?.max_capacity();
    if !max_capacity.is_finite() {
        return Err(MofError::invalid_parameter(
            "rate-capacity",
            format!("capacity ceiling {max_capacity} is not finite"),
        )
        .with_context("metal", params.metal.clone()));
    }
    let current_density = linspace(spec.start, spec.stop, spec.points);
    let mut specific_capacity: Vec<f64> = current_density
        .iter()
        .map(|current| max_capacity * (spec.start / current).powf(spec.exponent))
        .collect();
    add_gaussian_noise(
        &mut specific_capacity,
        max_capacity * spec.noise_fraction,
        rng,
    )?;
    for value in specific_capacity.iter_mut() {
        *value = value.clamp(0.0, max_capacity);
    }
    ensure_finite("rate.specific_capacity", &specific_capacity)?;
    Ok(RateCapability {
        current_density,
        specific_capacity,
        max_capacity,
    })
}
