//! Dense symmetric solves backed by `nalgebra`.
//!
//! Tensors cross into `nalgebra` as row-major slices and come back as plain
//! `Vec<f64>`, so every backend shares one factorization path:
//!
//! * Cholesky first, the natural factorization for `K + lambda*I`.
//! * LU with partial pivoting when Cholesky fails or its pivots collapse.
//! * A pivot-ratio test on either factor rejects numerically singular systems
//!   instead of returning garbage coefficients.

use crate::error::{KrrError, KrrResult};
use nalgebra::{DMatrix, DVector};

/// Smallest acceptable ratio between the smallest and largest pivot.
fn pivot_floor(n: usize) -> f64 {
    16.0 * n.max(1) as f64 * f64::EPSILON
}

/// `min / max` over absolute pivot values; `0.0` when the largest is zero.
fn pivot_ratio(pivots: impl Iterator<Item = f64>) -> f64 {
    let (lo, hi) = pivots.fold((f64::INFINITY, 0.0_f64), |(lo, hi), p| {
        let p = p.abs();
        (lo.min(p), hi.max(p))
    });
    if hi == 0.0 || !hi.is_finite() {
        0.0
    } else {
        lo / hi
    }
}

/// Solves `A x = b` for a symmetric `A` given in row-major order.
///
/// Returns [`KrrError::SingularSystem`] when neither factorization yields a
/// trustworthy finite solution.
pub fn solve_symmetric(a: &[f64], n: usize, b: &[f64]) -> KrrResult<Vec<f64>> {
    if a.len() != n * n {
        return Err(KrrError::shape(
            format!("{} matrix entries", n * n),
            format!("{}", a.len()),
        ));
    }
    if b.len() != n {
        return Err(KrrError::shape(
            format!("right-hand side of length {}", n),
            format!("length {}", b.len()),
        ));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let matrix = DMatrix::from_row_slice(n, n, a);
    let rhs = DVector::from_column_slice(b);
    let floor = pivot_floor(n);

    if let Some(chol) = matrix.clone().cholesky() {
        // Cholesky pivots are L_ii^2.
        let ratio = pivot_ratio(chol.l().diagonal().iter().map(|l| l * l));
        if ratio > floor {
            let x = chol.solve(&rhs);
            if x.iter().all(|v| v.is_finite()) {
                return Ok(x.as_slice().to_vec());
            }
        }
        log::warn!(
            "Cholesky pivots degenerate (ratio {:e}), retrying with LU",
            ratio
        );
    } else {
        log::warn!("Cholesky factorization failed, matrix is not positive definite; retrying with LU");
    }

    let lu = matrix.lu();
    let ratio = pivot_ratio(lu.u().diagonal().iter().copied());
    if ratio <= floor {
        return Err(KrrError::SingularSystem(format!(
            "pivot ratio {:e} below {:e} for a {}x{} system",
            ratio, floor, n, n
        )));
    }
    let x = lu
        .solve(&rhs)
        .ok_or_else(|| KrrError::SingularSystem("LU factor has a zero pivot".to_string()))?;
    if !x.iter().all(|v| v.is_finite()) {
        return Err(KrrError::SingularSystem(
            "LU solve produced non-finite values".to_string(),
        ));
    }
    log::debug!("solved {}x{} system with LU fallback", n, n);
    Ok(x.as_slice().to_vec())
}
