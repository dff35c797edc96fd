//! Linear solvers for the regularized kernel system `(K + lambda*I) alpha = y`.
//!
//! - [`direct`]: one-shot factorization (Cholesky with LU fallback).
//! - [`cg`]: conjugate gradients with a bounded iteration count.

pub mod cg;
pub mod direct;

pub use cg::{CgProgress, CgSolution, ConjugateGradient};
pub use direct::solve_symmetric;
