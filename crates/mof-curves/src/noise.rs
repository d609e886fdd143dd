//! Gaussian perturbation and finiteness guards.

use mof_core::errors::{ErrorInfo, MofError};
use mof_core::rng::RngHandle;
use rand_distr::{Distribution, Normal};

/// Adds independent `N(0, sigma)` noise to every value, in order.
pub fn add_gaussian_noise(
    values: &mut [f64],
    sigma: f64,
    rng: &mut RngHandle,
) -> Result<(), MofError> {
    let normal = normal(sigma)?;
    for value in values.iter_mut() {
        *value += normal.sample(rng);
    }
    Ok(())
}

/// Draws `len` independent `N(0, sigma)` values.
pub fn gaussian_noise(len: usize, sigma: f64, rng: &mut RngHandle) -> Result<Vec<f64>, MofError> {
    let normal = normal(sigma)?;
    Ok((0..len).map(|_| normal.sample(rng)).collect())
}

/// Rejects a noise standard deviation that is negative or not finite.
pub fn ensure_sigma(code: &str, sigma: f64) -> Result<(), MofError> {
    if !sigma.is_finite() || sigma < 0.0 {
        return Err(MofError::invalid_parameter(
            code,
            format!("noise standard deviation must be finite and >= 0, got {sigma}"),
        )
        .with_context("noise_sigma", sigma.to_string()));
    }
    Ok(())
}

fn normal(sigma: f64) -> Result<Normal<f64>, MofError> {
    ensure_sigma("invalid-noise-sigma", sigma)?;
    Normal::new(0.0, sigma)
        .map_err(|err| MofError::invalid_parameter("invalid-noise-sigma", err.to_string()))
}

/// Fails with [`MofError::NonFinite`] if any value is NaN or infinite.
pub fn ensure_finite(series: &str, values: &[f64]) -> Result<(), MofError> {
    match values.iter().position(|value| !value.is_finite()) {
        None => Ok(()),
        Some(index) => Err(MofError::NonFinite(
            ErrorInfo::new(
                "non-finite-series",
                format!("{series} contains {} at index {index}", values[index]),
            )
            .with_context("series", series)
            .with_context("index", index.to_string()),
        )),
    }
}
