//! Evenly spaced grids.

use mof_core::errors::MofError;

/// `points` evenly spaced values from `start` to `stop` inclusive.
///
/// The last value is `stop` exactly so sweeps end on their nominal bound.
pub fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (points - 1) as f64;
            let mut values: Vec<f64> = (0..points).map(|i| start + step * i as f64).collect();
            values[points - 1] = stop;
            values
        }
    }
}

/// `points` values spaced evenly in log10 between `10^start_exp` and `10^stop_exp`.
pub fn logspace(start_exp: f64, stop_exp: f64, points: usize) -> Vec<f64> {
    linspace(start_exp, stop_exp, points)
        .into_iter()
        .map(|exp| 10f64.powf(exp))
        .collect()
}

/// Rejects grids that cannot produce a monotonic sweep.
pub(crate) fn ensure_grid(code: &str, start: f64, stop: f64, points: usize) -> Result<(), MofError> {
    if points < 2 {
        return Err(MofError::invalid_parameter(
            code,
            format!("grid needs at least two points, got {points}"),
        ));
    }
    if !start.is_finite() || !stop.is_finite() || stop <= start {
        return Err(MofError::invalid_parameter(
            code,
            format!("grid bounds must be finite with stop > start, got [{start}, {stop}]"),
        )
        .with_context("start", start.to_string())
        .with_context("stop", stop.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_hits_both_ends() {
        let grid = linspace(0.5, 5.0, 10);
        assert_eq!(grid.len(), 10);
        assert_eq!(grid[0], 0.5);
        assert_eq!(grid[9], 5.0);
        assert!((grid[1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn logspace_spans_decades() {
        let grid = logspace(-2.0, 5.0, 100);
        assert_eq!(grid.len(), 100);
        assert!((grid[0] - 0.01).abs() < 1e-15);
        assert!((grid[99] - 1e5).abs() < 1e-6);
        assert!(grid.windows(2).all(|pair| pair[1] > pair[0]));
    }

    #[test]
    fn degenerate_grids_are_rejected() {
        assert!(ensure_grid("g", 0.0, 1.0, 1).is_err());
        assert!(ensure_grid("g", 1.0, 1.0, 10).is_err());
        assert!(ensure_grid("g", 0.0, f64::NAN, 10).is_err());
        assert!(ensure_grid("g", 0.0, 1.0, 2).is_ok());
    }
}
