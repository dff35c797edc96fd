//! Conjugate gradients for symmetric positive-definite systems.
//!
//! Starting from `r0 = b - A x0`, `p0 = r0`, each iteration performs
//!
//! ```text
//! Ap     = A p
//! alpha  = (r·r) / (p·Ap)
//! x      = x + alpha p
//! r_new  = r - alpha Ap
//! stop if ||r_new|| < threshold
//! beta   = (r_new·r_new) / (r·r)
//! p      = r_new + beta p
//! ```
//!
//! In exact arithmetic CG terminates within `n` iterations. Rounding destroys
//! the orthogonality of the residuals, so the loop is always bounded and ends
//! with [`KrrError::MaxIterationsExceeded`] when the bound is hit.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::error::{KrrError, KrrResult};

/// Default cap is this many times the system dimension.
const DEFAULT_ITERATION_FACTOR: usize = 10;

/// Relative tolerance of the symmetry check on the system matrix.
const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Snapshot handed to the progress callback after every iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CgProgress {
    /// 1-based iteration index.
    pub iteration: usize,
    /// `||r||` after the iteration's update.
    pub residual_norm: f64,
}

/// Converged conjugate-gradient run.
#[derive(Debug, Clone)]
pub struct CgSolution<B: Backend> {
    pub x: Tensor1D<B>,
    /// Iterations performed; `0` when the initial guess already met the threshold.
    pub iterations: usize,
    /// Final recursively updated residual norm.
    pub residual_norm: f64,
    /// Residual norm after each iteration.
    pub residual_history: Vec<f64>,
}

impl<B: Backend> CgSolution<B> {
    /// Number of iterations whose residual norm exceeded the previous one.
    ///
    /// CG minimizes the A-norm of the error, not the residual, so occasional
    /// increases are normal; a count that keeps growing signals trouble.
    pub fn residual_increases(&self) -> usize {
        self.residual_history
            .windows(2)
            .filter(|w| w[1] > w[0])
            .count()
    }
}

/// Conjugate-gradient solver configuration.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
/// use kernelridge_rs::solver::ConjugateGradient;
///
/// let a = Tensor2D::<CpuBackend>::new(vec![4.0, 1.0, 1.0, 3.0], 2, 2).unwrap();
/// let b = Tensor1D::new(vec![1.0, 2.0]);
///
/// let cg = ConjugateGradient::new(1e-10).unwrap();
/// let solution = cg.solve(&a, &b, &Tensor1D::zeros(2)).unwrap();
/// assert!(solution.iterations <= 2);
/// assert!((solution.x.to_vec()[0] - 1.0 / 11.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConjugateGradient {
    threshold: f64,
    max_iterations: Option<usize>,
}

impl Default for ConjugateGradient {
    fn default() -> Self {
        Self {
            threshold: 1e-6,
            max_iterations: None,
        }
    }
}

impl ConjugateGradient {
    /// Stops once `||r|| < threshold`; the threshold must be positive and finite.
    pub fn new(threshold: f64) -> KrrResult<Self> {
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(KrrError::InvalidParameter(format!(
                "residual threshold must be positive and finite, got {}",
                threshold
            )));
        }
        Ok(Self {
            threshold,
            max_iterations: None,
        })
    }

    /// Overrides the default iteration cap of `10 * n`.
    pub fn max_iterations(mut self, max_iterations: usize) -> KrrResult<Self> {
        if max_iterations == 0 {
            return Err(KrrError::InvalidParameter(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        self.max_iterations = Some(max_iterations);
        Ok(self)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Iteration cap applied to a system of dimension `n`.
    pub fn iteration_limit(&self, n: usize) -> usize {
        self.max_iterations
            .unwrap_or(DEFAULT_ITERATION_FACTOR * n.max(1))
    }

    /// Solves `a * x = b` starting from `x0`.
    pub fn solve<B: Backend>(
        &self,
        a: &Tensor2D<B>,
        b: &Tensor1D<B>,
        x0: &Tensor1D<B>,
    ) -> KrrResult<CgSolution<B>> {
        self.solve_with_progress(a, b, x0, |_| {})
    }

    /// Like [`solve`](Self::solve), reporting the residual norm after each iteration.
    ///
    /// # Errors
    /// - [`KrrError::ShapeMismatch`] if `a` is not square or `b`/`x0` have the wrong length.
    /// - [`KrrError::NonFinite`] for NaN or infinite inputs, or a residual that overflows.
    /// - [`KrrError::InvalidParameter`] if `a` is not symmetric.
    /// - [`KrrError::DegenerateDirection`] if `p·Ap <= 0` (A is not positive definite).
    /// - [`KrrError::MaxIterationsExceeded`] if the threshold is not reached in time.
    pub fn solve_with_progress<B, F>(
        &self,
        a: &Tensor2D<B>,
        b: &Tensor1D<B>,
        x0: &Tensor1D<B>,
        mut on_progress: F,
    ) -> KrrResult<CgSolution<B>>
    where
        B: Backend,
        F: FnMut(&CgProgress),
    {
        let n = validate_system(a, b, x0)?;
        let limit = self.iteration_limit(n);

        let mut x = x0.clone();
        let mut r = b.sub(&a.dot(&x)?)?;
        let mut p = r.clone();
        let mut rs = r.dot(&r)?.to_f64();
        let mut residual_norm = rs.sqrt();
        let mut residual_history = Vec::new();

        if residual_norm < self.threshold {
            log::debug!("cg: initial residual {:e} already below threshold", residual_norm);
            return Ok(CgSolution {
                x,
                iterations: 0,
                residual_norm,
                residual_history,
            });
        }

        for iteration in 1..=limit {
            let ap = a.dot(&p)?;
            let curvature = p.dot(&ap)?.to_f64();
            if !(curvature.is_finite() && curvature > 0.0) {
                return Err(KrrError::DegenerateDirection {
                    iteration,
                    curvature,
                });
            }

            let step = Scalar::new(rs / curvature);
            x = x.add(&p.scale(&step))?;
            let r_new = r.sub(&ap.scale(&step))?;
            let rs_new = r_new.dot(&r_new)?.to_f64();
            residual_norm = rs_new.sqrt();

            if !residual_norm.is_finite() {
                return Err(KrrError::NonFinite(format!(
                    "cg residual at iteration {}",
                    iteration
                )));
            }

            residual_history.push(residual_norm);
            log::debug!("cg: iteration {} residual {:e}", iteration, residual_norm);
            on_progress(&CgProgress {
                iteration,
                residual_norm,
            });

            if residual_norm < self.threshold {
                return Ok(CgSolution {
                    x,
                    iterations: iteration,
                    residual_norm,
                    residual_history,
                });
            }

            let beta = Scalar::new(rs_new / rs);
            p = r_new.add(&p.scale(&beta))?;
            r = r_new;
            rs = rs_new;
        }

        Err(KrrError::MaxIterationsExceeded {
            iterations: limit,
            residual: residual_norm,
            threshold: self.threshold,
        })
    }
}

/// Returns the system dimension after checking shapes, finiteness and symmetry.
fn validate_system<B: Backend>(
    a: &Tensor2D<B>,
    b: &Tensor1D<B>,
    x0: &Tensor1D<B>,
) -> KrrResult<usize> {
    let (rows, cols) = a.shape();
    if rows != cols {
        return Err(KrrError::shape(
            "square system matrix",
            format!("({}, {})", rows, cols),
        ));
    }
    for (name, v) in [("right-hand side", b), ("initial guess", x0)] {
        if v.len() != rows {
            return Err(KrrError::shape(
                format!("{} of length {}", name, rows),
                format!("length {}", v.len()),
            ));
        }
    }
    if !a.is_finite() || !b.is_finite() || !x0.is_finite() {
        return Err(KrrError::NonFinite("conjugate-gradient operands".to_string()));
    }
    if !a.is_symmetric(SYMMETRY_TOLERANCE) {
        return Err(KrrError::InvalidParameter(
            "conjugate gradients require a symmetric matrix".to_string(),
        ));
    }
    Ok(rows)
}
