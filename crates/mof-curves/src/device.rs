//! Voltage-window device profile.
//!
//! A second, simpler model of a packaged cell: linear discharge inside a fixed
//! voltage window capped at a maximum time, the derived specific capacity and
//! capacitance per current, and single-arc impedance before and after
//! stability cycling.

use std::f64::consts::PI;

use mof_core::errors::MofError;
use mof_core::rng::RngHandle;
use mof_props::{MaterialParameters, PropertyTables};
use serde::{Deserialize, Serialize};

use crate::grid::{linspace, logspace};
use crate::noise::{add_gaussian_noise, ensure_finite, ensure_sigma};

fn default_current_densities() -> Vec<f64> {
    vec![0.25, 0.5, 0.75, 1.0, 1.25, 1.5, 1.75, 2.0, 2.25]
}

fn default_resolution() -> usize {
    200
}

fn default_voltage_max() -> f64 {
    0.6
}

fn default_time_cap() -> f64 {
    500.0
}

fn default_noise_sigma() -> f64 {
    0.005
}

fn default_eis_points() -> usize {
    50
}

const WARBURG: f64 = 8.0;
const TAU_BEFORE: f64 = 0.01;
const TAU_AFTER: f64 = 0.015;

/// Device-level settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceSpec {
    /// Current densities (A/g).
    #[serde(default = "default_current_densities")]
    pub current_densities: Vec<f64>,
    /// Samples per discharge trace.
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Lower edge of the voltage window (V).
    #[serde(default)]
    pub voltage_min: f64,
    /// Upper edge of the voltage window (V).
    #[serde(default = "default_voltage_max")]
    pub voltage_max: f64,
    /// Longest discharge time reported (s).
    #[serde(default = "default_time_cap")]
    pub time_cap: f64,
    /// Standard deviation of voltage noise (V).
    #[serde(default = "default_noise_sigma")]
    pub noise_sigma: f64,
    /// Frequencies per impedance arc.
    #[serde(default = "default_eis_points")]
    pub eis_points: usize,
}

impl Default for DeviceSpec {
    fn default() -> Self {
        Self {
            current_densities: default_current_densities(),
            resolution: default_resolution(),
            voltage_min: 0.0,
            voltage_max: default_voltage_max(),
            time_cap: default_time_cap(),
            noise_sigma: default_noise_sigma(),
            eis_points: default_eis_points(),
        }
    }
}

impl DeviceSpec {
    /// Rejects inverted voltage windows, non-positive time caps and currents.
    pub fn validate(&self) -> Result<(), MofError> {
        if !self.voltage_min.is_finite()
            || !self.voltage_max.is_finite()
            || self.voltage_max <= self.voltage_min
        {
            return Err(MofError::invalid_parameter(
                "device-voltage-window",
                format!(
                    "voltage window needs max > min, got [{}, {}]",
                    self.voltage_min, self.voltage_max
                ),
            )
            .with_context("voltage_min", self.voltage_min.to_string())
            .with_context("voltage_max", self.voltage_max.to_string()));
        }
        if !self.time_cap.is_finite() || self.time_cap <= 0.0 {
            return Err(MofError::invalid_parameter(
                "device-time-cap",
                format!("time cap must be positive, got {}", self.time_cap),
            ));
        }
        if self.current_densities.is_empty()
            || self
                .current_densities
                .iter()
                .any(|current| !current.is_finite() || *current <= 0.0)
        {
            return Err(MofError::invalid_parameter(
                "device-current-density",
                "current densities must be a non-empty set of positive values",
            ));
        }
        if self.resolution < 2 || self.eis_points < 2 {
            return Err(MofError::invalid_parameter(
                "device-resolution",
                "traces and impedance arcs need at least two samples",
            ));
        }
        ensure_sigma("device-noise-sigma", self.noise_sigma)
    }
}

/// One capped linear discharge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTrace {
    /// Current density (A/g).
    pub current_density: f64,
    /// Time grid (s).
    pub time: Vec<f64>,
    /// Voltage clipped to the window (V).
    pub voltage: Vec<f64>,
}

/// Nyquist arc without noise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpedanceTrace {
    /// Sweep frequencies (Hz).
    pub frequency: Vec<f64>,
    /// Real part (Ω).
    pub z_real: Vec<f64>,
    /// Negated imaginary part (Ω).
    pub z_imag: Vec<f64>,
}

/// Full device profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceProfile {
    /// Discharge traces in current order.
    pub gcd: Vec<DeviceTrace>,
    /// Current densities (A/g).
    pub current_densities: Vec<f64>,
    /// Specific capacity per current (C/g).
    pub specific_capacities: Vec<f64>,
    /// Specific capacitance per current (F/g).
    pub specific_capacitances: Vec<f64>,
    /// Impedance before stability cycling.
    pub eis_before: ImpedanceTrace,
    /// Impedance after stability cycling.
    pub eis_after: ImpedanceTrace,
    /// Solution resistance before cycling (Ω).
    pub r_solution_before: f64,
    /// Solution resistance after cycling (Ω).
    pub r_solution_after: f64,
    /// Charge-transfer resistance before cycling (Ω).
    pub r_ct_before: f64,
    /// Charge-transfer resistance after cycling (Ω).
    pub r_ct_after: f64,
}

/// Simulates a device profile for `params`.
///
/// Stream order: every trace's noise in current order, then the solution resistance.
pub fn simulate_device(
    params: &MaterialParameters,
    tables: &PropertyTables,
    spec: &DeviceSpec,
    rng: &mut RngHandle,
) -> Result<DeviceProfile, MofError> {
    spec.validate()?;
    params.validate(tables)?;
    let metal = tables.lookup_or_default(&params.metal);
    let electrode = tables.electrode(&params.electrode)?;
    let capacity = params.base_capacity() * metal.redox_factor * electrode.capacity_boost
        * params.mof_factor();

    let (v_min, v_max) = (spec.voltage_min, spec.voltage_max);
    let mut gcd = Vec::with_capacity(spec.current_densities.len());
    let mut specific_capacities = Vec::with_capacity(spec.current_densities.len());
    let mut specific_capacitances = Vec::with_capacity(spec.current_densities.len());
    for &current in &spec.current_densities {
        let max_time = (capacity / (current * 60.0)).min(spec.time_cap);
        let time = linspace(0.0, max_time, spec.resolution);
        let mut voltage: Vec<f64> = time
            .iter()
            .map(|t| v_max - (v_max - v_min) * (t / max_time))
            .collect();
        add_gaussian_noise(&mut voltage, spec.noise_sigma, rng)?;
        ensure_finite("device.voltage", &voltage)?;
        for value in voltage.iter_mut() {
            *value = value.clamp(v_min, v_max);
        }

        let q_s = current * max_time * 3600.0 / 1000.0;
        specific_capacities.push(q_s);
        specific_capacitances.push(q_s / (v_max - v_min));
        gcd.push(DeviceTrace {
            current_density: current,
            time,
            voltage,
        });
    }

    let r_solution_before = rng.perturb(1.5, 0.5);
    let r_solution_after = r_solution_before * 0.95;
    let r_ct_before = 5.0 + 3.0 / metal.conductivity;
    let r_ct_after = 2.0 + 1.0 / metal.conductivity;
    let frequency = logspace(-2.0, 5.0, spec.eis_points);
    let eis_before = single_arc(&frequency, r_solution_before, r_ct_before, TAU_BEFORE, WARBURG);
    let eis_after = single_arc(
        &frequency,
        r_solution_after,
        r_ct_after,
        TAU_AFTER,
        WARBURG * 0.8,
    );

    Ok(DeviceProfile {
        gcd,
        current_densities: spec.current_densities.clone(),
        specific_capacities,
        specific_capacitances,
        eis_before,
        eis_after,
        r_solution_before,
        r_solution_after,
        r_ct_before,
        r_ct_after,
    })
}

fn single_arc(frequency: &[f64], r_s: f64, r_ct: f64, tau: f64, warburg: f64) -> ImpedanceTrace {
    let (z_real, z_imag) = frequency
        .iter()
        .map(|f| {
            let omega = 2.0 * PI * f;
            let x = omega * tau;
            let diffusion = warburg / omega.sqrt();
            let denom = 1.0 + x * x;
            (r_s + r_ct / denom + diffusion, r_ct * x / denom + diffusion)
        })
        .unzip();
    ImpedanceTrace {
        frequency: frequency.to_vec(),
        z_real,
        z_imag,
    }
}
