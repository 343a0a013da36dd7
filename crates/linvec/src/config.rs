use std::path::Path;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Numeric tolerances shared by comparisons, factorization and iteration.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides: `{"singular_tolerance": 1e-10}` is a complete config.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct LinalgConfig {
    /// Absolute elementwise tolerance used by `equals_with`. `==` and
    /// `equals` always use [`LinalgConfig::DEFAULT_EQUALITY_TOLERANCE`].
    pub equality_tolerance: f64,
    /// Determinants with a smaller magnitude are reported as exactly `0.0`.
    pub det_zero_threshold: f64,
    /// `U` pivots at or below this fraction of the matrix's largest element
    /// magnitude make it singular for `inv`/`solve`.
    pub singular_tolerance: f64,
    /// Convergence threshold (Frobenius norm of the update) for `polar_unitary`.
    pub polar_tolerance: f64,
    pub polar_max_iterations: usize,
}

impl LinalgConfig {
    pub const DEFAULT_EQUALITY_TOLERANCE: f64 = 1e-6;
    pub const DEFAULT_DET_ZERO_THRESHOLD: f64 = 1e-12;
    pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

    pub fn new(equality_tolerance: f64, singular_tolerance: f64) -> Self {
        Self {
            equality_tolerance,
            singular_tolerance,
            ..Self::default()
        }
    }

    /// Parse a config from JSON, filling unspecified fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LinalgConfig =
            serde_json::from_str(json).context("Failed to parse linalg config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(&path).with_context(|| {
            format!("Failed to open linalg config: {}", path.as_ref().display())
        })?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid linalg config: {}", path.as_ref().display()))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("equality_tolerance", self.equality_tolerance),
            ("det_zero_threshold", self.det_zero_threshold),
            ("singular_tolerance", self.singular_tolerance),
            ("polar_tolerance", self.polar_tolerance),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "'{}' must be a finite non-negative number, got {}",
                name,
                value
            );
        }
        ensure!(
            self.polar_max_iterations > 0,
            "'polar_max_iterations' must be at least 1"
        );
        Ok(())
    }
}

impl Default for LinalgConfig {
    fn default() -> Self {
        Self {
            equality_tolerance: Self::DEFAULT_EQUALITY_TOLERANCE,
            det_zero_threshold: Self::DEFAULT_DET_ZERO_THRESHOLD,
            singular_tolerance: Self::DEFAULT_SINGULAR_TOLERANCE,
            polar_tolerance: 1e-6,
            polar_max_iterations: 100,
        }
    }
}
