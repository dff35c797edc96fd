//! # Backend Abstraction
//!
//! This module provides a trait-based abstraction over the dense linear algebra
//! needed by kernel methods, so kernel construction and both solvers run
//! unchanged on different tensor libraries.
//!
//! ## Design Philosophy
//!
//! - **Minimal trait surface**: only the operations used to build Gaussian kernels,
//!   regularized systems and conjugate-gradient iterates are exposed.
//! - **Zero-cost generics**: backend selection happens at compile time via type
//!   parameters.
//! - **Checked wrappers, unchecked backends**: raw `Backend` functions assume
//!   compatible shapes; the typed wrappers [`Tensor1D`] and [`Tensor2D`] validate
//!   shapes first and report [`KrrError::ShapeMismatch`](crate::KrrError::ShapeMismatch).
//! - **Feature-gated implementations**: backends are enabled via Cargo features
//!   (`cpu`, `ndarray`).
//!
//! ## Available Backends
//!
//! | Backend          | Feature   | Use Case                          |
//! |------------------|-----------|-----------------------------------|
//! | `CpuBackend`     | `cpu`     | Default, pure-Rust implementation |
//! | `NdarrayBackend` | `ndarray` | Interop with `ndarray` ecosystem  |
//!
//! ## Example
//!
//! ```rust
//! use kernelridge_rs::backend::{CpuBackend, Tensor1D, Tensor2D};
//!
//! let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0]);
//! let a: Tensor2D<CpuBackend> = Tensor2D::new(vec![2.0, 0.0, 0.0, 3.0], 2, 2).unwrap();
//!
//! let y = a.dot(&x).unwrap();
//! assert_eq!(y.to_vec(), vec![2.0, 6.0]);
//! ```

#[cfg(feature = "cpu")]
pub mod cpu;
#[cfg(feature = "cpu")]
/// Pure-Rust CPU backend implementation with zero external dependencies.
pub use cpu::{CpuBackend, CpuTensor2D};

#[cfg(feature = "ndarray")]
mod ndarray_backend;
#[cfg(feature = "ndarray")]
/// Backend backed by the `ndarray` crate for ecosystem interoperability.
pub use ndarray_backend::{NdarrayBackend, NdarrayTensor2D};

/// Scalar value representation and arithmetic operations.
pub mod scalar;
/// One-dimensional tensor abstraction.
pub mod tensor1d;
/// Two-dimensional tensor abstraction.
pub mod tensor2d;

pub use scalar::{Scalar, ScalarOps};
pub use tensor1d::Tensor1D;
pub use tensor2d::Tensor2D;

/// Abstraction over dense tensor storage and the operations kernel methods need.
///
/// Implementations provide concrete vector and matrix types. All matrices are
/// interpreted row-major: each row is one sample.
///
/// # Shape contract
///
/// Binary operations require operands of matching shape and may panic
/// otherwise. Use the [`Tensor1D`] / [`Tensor2D`] wrappers for checked access.
pub trait Backend: Clone + Copy + Send + Sync + 'static {
    /// Scalar type supporting arithmetic operations.
    type Scalar: ScalarOps;

    /// One-dimensional tensor type.
    type Tensor1D: Clone + Send + Sync;

    /// Two-dimensional tensor type.
    type Tensor2D: Clone + Send + Sync;

    // --- Constructors ---

    /// Creates a 1D tensor filled with zeros of given length.
    fn zeros_1d(len: usize) -> Self::Tensor1D;

    /// Creates a 2D tensor filled with zeros of given dimensions.
    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D;

    /// Creates the `n × n` identity matrix.
    fn identity_2d(n: usize) -> Self::Tensor2D;

    /// Constructs a 1D tensor from owned data.
    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D;

    /// Constructs a 2D tensor from row-major ordered data.
    ///
    /// # Panics
    /// If `data.len() != rows * cols`.
    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D;

    // --- Data access ---

    /// Copies a 1D tensor into a `Vec<f64>`.
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64>;

    /// Copies a 2D tensor into a row-major `Vec<f64>`.
    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64>;

    /// Returns the number of elements in a 1D tensor.
    fn len_1d(t: &Self::Tensor1D) -> usize;

    /// Returns the shape of a 2D tensor as (rows, cols).
    fn shape(t: &Self::Tensor2D) -> (usize, usize);

    // --- Element-wise operations (1D) ---

    /// Element-wise addition of two 1D tensors.
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise subtraction of two 1D tensors.
    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise multiplication of two 1D tensors.
    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Element-wise division of two 1D tensors.
    ///
    /// Follows IEEE 754 semantics for zero divisors; callers that need finite
    /// results must exclude zeros beforehand.
    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D;

    /// Multiplies each element of tensor by a scalar.
    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D;

    /// Element-wise sine.
    fn sin_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    /// Indicator of exact zeros: `1.0` where the element is `0.0`, else `0.0`.
    fn zero_mask_1d(t: &Self::Tensor1D) -> Self::Tensor1D;

    // --- Element-wise operations (2D) ---

    /// Element-wise addition of two 2D tensors.
    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise subtraction of two 2D tensors.
    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise multiplication of two 2D tensors.
    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Element-wise division of two 2D tensors.
    fn div_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Multiplies each element of 2D tensor by a scalar.
    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    /// Adds a scalar to each element of 2D tensor.
    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D;

    /// Element-wise exponential function for 2D tensors.
    fn exp_2d(t: &Self::Tensor2D) -> Self::Tensor2D;

    /// Replaces every element below `floor` with `floor`.
    fn clamp_min_2d(t: &Self::Tensor2D, floor: &Self::Scalar) -> Self::Tensor2D;

    // --- Reduction operations ---

    /// Computes the sum of all elements in a 1D tensor.
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Computes the arithmetic mean of all elements in a 1D tensor.
    fn mean_all_1d(t: &Self::Tensor1D) -> Self::Scalar;

    /// Squared Euclidean norm of every row: `out[i] = Σ_k t[i, k]^2`.
    fn row_sq_norms_2d(t: &Self::Tensor2D) -> Self::Tensor1D;

    // --- Linear algebra ---

    /// Matrix-vector multiplication `A * x` for `A` (m × n), `x` (n,).
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D;

    /// Matrix-matrix multiplication `A * B` for `A` (m × k), `B` (k × n).
    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D;

    /// Returns the transpose of a 2D tensor.
    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D;

    /// Broadcast sum of a column and a row vector: `out[i, j] = col[i] + row[j]`.
    fn outer_sum(col: &Self::Tensor1D, row: &Self::Tensor1D) -> Self::Tensor2D;
}
