use crate::backend::{Backend, Tensor1D, Tensor2D};
use crate::error::{KrrError, KrrResult};
use crate::linalg;

/// Solves `a * x = b` for a symmetric (ideally positive-definite) `a`.
///
/// The factorization itself runs in [`linalg::solve_symmetric`]; this wrapper
/// validates shapes and finiteness and converts between backend tensors.
///
/// # Errors
/// - [`KrrError::ShapeMismatch`] if `a` is not square or `b` has the wrong length.
/// - [`KrrError::NonFinite`] if either operand holds NaN or infinity.
/// - [`KrrError::SingularSystem`] if `a` is numerically singular.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use kernelridge_rs::solver::solve_symmetric;
///
/// let a = Tensor2D::<CpuBackend>::new(vec![2.0, 0.0, 0.0, 4.0], 2, 2).unwrap();
/// let b = Tensor1D::new(vec![2.0, 2.0]);
/// let x = solve_symmetric(&a, &b).unwrap().to_vec();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 0.5).abs() < 1e-12);
/// ```
pub fn solve_symmetric<B: Backend>(a: &Tensor2D<B>, b: &Tensor1D<B>) -> KrrResult<Tensor1D<B>> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(KrrError::shape(
            "square system matrix",
            format!("({}, {})", rows, cols),
        ));
    }
    if b.len() != rows {
        return Err(KrrError::shape(
            format!("right-hand side of length {}", rows),
            format!("length {}", b.len()),
        ));
    }
    if !a.is_finite() || !b.is_finite() {
        return Err(KrrError::NonFinite("linear system operands".to_string()));
    }

    let x = linalg::solve_symmetric(&a.to_vec(), rows, &b.to_vec())?;
    Ok(Tensor1D::new(x))
}
