//! 3-D rotation helpers and the orthogonal polar factor.

use crate::config::LinalgConfig;
use crate::error::{LinalgError, Result};
use crate::linalg::{det, inv_with, lu::require_square, transpose};
use crate::ops::{add, norm, scale, subtract};
use crate::tensor::{Matrix, Tensor};

fn three_vector(op: &str, t: &Tensor) -> Result<[f64; 3]> {
    match t {
        Tensor::Vector(v) if v.len() == 3 => Ok(v.with_slice(|s| [s[0], s[1], s[2]])),
        _ => Err(LinalgError::shape(format!(
            "{} requires a 3-vector, got shape {}",
            op,
            t.shape()
        ))),
    }
}

/// Counter-clockwise rotation by `theta` radians about `axis`
/// (Euler–Rodrigues). The axis is normalised first and must be non-zero.
pub fn rotation_matrix(axis: &Tensor, theta: f64) -> Result<Tensor> {
    let axis = three_vector("rotation_matrix", axis)?;
    let length = axis.iter().map(|x| x * x).sum::<f64>().sqrt();
    if length == 0.0 || !length.is_finite() {
        return Err(LinalgError::invalid_argument(
            "axis",
            format!("must be a finite non-zero vector, got {:?}", axis),
        ));
    }

    let half = theta / 2.0;
    let a = half.cos();
    let s = -half.sin() / length;
    let (b, c, d) = (axis[0] * s, axis[1] * s, axis[2] * s);
    let (aa, bb, cc, dd) = (a * a, b * b, c * c, d * d);
    let (bc, ad, ac, ab, bd, cd) = (b * c, a * d, a * c, a * b, b * d, c * d);

    let data = vec![
        aa + bb - cc - dd,
        2.0 * (bc + ad),
        2.0 * (bd - ac),
        2.0 * (bc - ad),
        aa + cc - bb - dd,
        2.0 * (cd + ab),
        2.0 * (bd + ac),
        2.0 * (cd - ab),
        aa + dd - bb - cc,
    ];
    Ok(Tensor::Matrix(Matrix::from_row_major(3, 3, data)))
}

/// Cross-product matrix `[ω]×`, so that `skew_symmetric(ω) @ v == ω × v`.
pub fn skew_symmetric(omega: &Tensor) -> Result<Tensor> {
    let w = three_vector("skew_symmetric", omega)?;
    let data = vec![
        0.0, -w[2], w[1], //
        w[2], 0.0, -w[0], //
        -w[1], w[0], 0.0,
    ];
    Ok(Tensor::Matrix(Matrix::from_row_major(3, 3, data)))
}

/// Orthogonal factor `U` of the polar decomposition `A = U P`.
///
/// Newton iteration `U ← ½ (U + (U⁻¹)ᵀ)` starting from `U = A`, stopping once
/// the Frobenius norm of the update drops below `config.polar_tolerance`.
///
/// # Errors
///
/// * `Shape` unless `a` is square.
/// * `SingularMatrix` if an iterate cannot be inverted.
/// * `NotConverged` after `config.polar_max_iterations` updates.
pub fn polar_unitary(a: &Tensor, config: &LinalgConfig) -> Result<Tensor> {
    require_square("polar_unitary", a)?;
    let mut u = a.copy();
    for iteration in 1..=config.polar_max_iterations {
        let inverse_t = transpose(&inv_with(&u, config)?);
        let next = scale(&add(&u, &inverse_t)?, 0.5);
        let delta = norm(&subtract(&next, &u)?);
        u = next;
        if delta < config.polar_tolerance {
            log::debug!(
                "polar_unitary converged after {} iterations (delta {:e})",
                iteration,
                delta
            );
            return Ok(u);
        }
    }
    log::warn!(
        "polar_unitary did not converge within {} iterations",
        config.polar_max_iterations
    );
    Err(LinalgError::NotConverged {
        iterations: config.polar_max_iterations,
    })
}

/// True when `m` reverses orientation (negative determinant).
pub fn orientation_flipped(m: &Tensor) -> Result<bool> {
    Ok(det(m)? < 0.0)
}
