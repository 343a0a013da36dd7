//! Fixed-step classical Runge–Kutta (RK4) integration.
//!
//! Trajectories come back as plain samples, so a plotting consumer can take
//! `(t, y)` pairs straight from [`Trajectory::points`].

use crate::error::{LinalgError, Result};
use crate::tensor::Shape;

/// Upper bound on the number of steps a single integration may take.
pub const MAX_STEPS: usize = 1 << 24;

/// Sampled solution of an initial value problem.
#[derive(Debug, Clone)]
pub struct Trajectory {
    times: Vec<f64>,
    states: Vec<Vec<f64>>,
}

impl Trajectory {
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn states(&self) -> &[Vec<f64>] {
        &self.states
    }

    /// Number of samples, including the initial state.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn final_state(&self) -> Option<&[f64]> {
        self.states.last().map(Vec::as_slice)
    }

    fn check_component(&self, component: usize) -> Result<()> {
        let width = self.states.first().map(Vec::len).unwrap_or(0);
        if component >= width {
            return Err(LinalgError::IndexOutOfBounds {
                index: component,
                len: width,
            });
        }
        Ok(())
    }

    /// `(t, y[component])` for every sample.
    pub fn points(&self, component: usize) -> Result<Vec<(f64, f64)>> {
        self.check_component(component)?;
        Ok(self
            .times
            .iter()
            .zip(&self.states)
            .map(|(&t, y)| (t, y[component]))
            .collect())
    }

    /// Largest `|exact(t) - y[component]|` over the samples.
    pub fn max_abs_error<F>(&self, component: usize, exact: F) -> Result<f64>
    where
        F: Fn(f64) -> f64,
    {
        Ok(self
            .points(component)?
            .into_iter()
            .map(|(t, y)| (exact(t) - y).abs())
            .fold(0.0, f64::max))
    }
}

fn validate_grid(t0: f64, tf: f64, h: f64) -> Result<usize> {
    if !(h.is_finite() && h > 0.0) {
        return Err(LinalgError::invalid_argument(
            "h",
            format!("step must be finite and positive, got {}", h),
        ));
    }
    if !(t0.is_finite() && tf.is_finite()) {
        return Err(LinalgError::invalid_argument(
            "t0/tf",
            format!("bounds must be finite, got {}..{}", t0, tf),
        ));
    }
    if tf < t0 {
        return Err(LinalgError::invalid_argument(
            "tf",
            format!("end {} precedes start {}", tf, t0),
        ));
    }
    let steps = ((tf - t0) / h).round();
    if !(steps.is_finite() && steps <= MAX_STEPS as f64) {
        return Err(LinalgError::invalid_argument(
            "h",
            format!(
                "step {} over {}..{} needs more than {} steps",
                h, t0, tf, MAX_STEPS
            ),
        ));
    }
    Ok(steps as usize)
}

/// `y + h·k`, checking that `k` kept the state length.
fn axpy(y: &[f64], h: f64, k: &[f64]) -> Result<Vec<f64>> {
    if k.len() != y.len() {
        return Err(LinalgError::dimension_mismatch(
            "rk4",
            Shape::Vector(y.len()),
            Shape::Vector(k.len()),
        ));
    }
    Ok(y.iter().zip(k).map(|(a, b)| a + h * b).collect())
}

/// Integrate `dy/dt = f(t, y)` from `t0` to `tf` with fixed step `h`.
///
/// Samples are taken at `t_i = t0 + i·h` for `i = 0..=n`, with
/// `n = round((tf - t0) / h)`.
///
/// # Errors
///
/// * `InvalidArgument` for a non-positive or non-finite step, non-finite
///   bounds, `tf < t0`, or a grid of more than [`MAX_STEPS`] steps.
/// * `DimensionMismatch` if `f` returns a derivative whose length differs from
///   the state's.
pub fn rk4<F>(f: F, y0: Vec<f64>, t0: f64, tf: f64, h: f64) -> Result<Trajectory>
where
    F: Fn(f64, &[f64]) -> Vec<f64>,
{
    let steps = validate_grid(t0, tf, h)?;
    let samples = steps.checked_add(1).ok_or_else(|| {
        LinalgError::invalid_argument("h", format!("{} steps overflow the sample count", steps))
    })?;
    let mut times = Vec::with_capacity(samples);
    let mut states: Vec<Vec<f64>> = Vec::with_capacity(samples);
    times.push(t0);
    states.push(y0);

    for i in 1..=steps {
        let t = t0 + (i - 1) as f64 * h;
        let y = &states[i - 1];

        let k1 = f(t, y);
        let k2 = f(t + h / 2.0, &axpy(y, h / 2.0, &k1)?);
        let k3 = f(t + h / 2.0, &axpy(y, h / 2.0, &k2)?);
        let k4 = f(t + h, &axpy(y, h, &k3)?);

        let slope = axpy(&axpy(&axpy(&k1, 2.0, &k2)?, 2.0, &k3)?, 1.0, &k4)?;
        let next = axpy(y, h / 6.0, &slope)?;

        times.push(t0 + i as f64 * h);
        states.push(next);
    }

    log::debug!(
        "rk4: {} steps of {} from t={} to t={}",
        steps,
        h,
        t0,
        times.last().copied().unwrap_or(t0)
    );
    Ok(Trajectory { times, states })
}

/// [`rk4`] for a scalar state.
pub fn rk4_scalar<F>(f: F, y0: f64, t0: f64, tf: f64, h: f64) -> Result<Trajectory>
where
    F: Fn(f64, f64) -> f64,
{
    rk4(|t, y: &[f64]| vec![f(t, y[0])], vec![y0], t0, tf, h)
}
