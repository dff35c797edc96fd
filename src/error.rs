//! Error types for kernel construction, linear solves and model fitting.

use thiserror::Error;

/// Errors raised by the numerical core.
///
/// Every variant is final for the call that produced it: no partially
/// computed coefficients or iterates are ever returned alongside an error.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KrrError {
    /// Hyperparameter or argument outside its valid domain
    /// (non-positive kernel width, negative regularization, ...).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Operands have incompatible dimensions.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// The regularized kernel matrix is numerically singular.
    #[error("Singular system: {0}")]
    SingularSystem(String),

    /// Conjugate gradients met a search direction with zero (or negative) curvature.
    #[error("Degenerate search direction at iteration {iteration}: p·Ap = {curvature:e}")]
    DegenerateDirection { iteration: usize, curvature: f64 },

    /// Conjugate gradients hit its iteration bound before reaching the threshold.
    #[error(
        "Conjugate gradients did not converge after {iterations} iterations \
         (residual {residual:e}, threshold {threshold:e})"
    )]
    MaxIterationsExceeded {
        iterations: usize,
        residual: f64,
        threshold: f64,
    },

    /// Empty data provided where non-empty was required.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// NaN or infinite values where finite ones are required.
    #[error("Non-finite values: {0}")]
    NonFinite(String),
}

/// Result type for the numerical core.
pub type KrrResult<T> = Result<T, KrrError>;

impl KrrError {
    pub(crate) fn shape(expected: impl Into<String>, got: impl Into<String>) -> Self {
        KrrError::ShapeMismatch {
            expected: expected.into(),
            got: got.into(),
        }
    }
}
