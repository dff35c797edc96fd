//! # kernelridge-rs
//!
//! Kernel ridge regression with a Gaussian kernel, solved either directly
//! (Cholesky with an LU fallback) or iteratively by conjugate gradients.
//!
//! ```text
//! dataset → GaussianKernel → { direct | conjugate gradients } → alpha → predictions
//! ```
//!
//! All numerics are generic over a [`Backend`]: the pure-Rust
//! [`CpuBackend`] is enabled by default, an `ndarray` backend sits behind the
//! `ndarray` feature.
//!
//! ## Quick start
//!
//! ```rust
//! use kernelridge_rs::prelude::*;
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut rng = StdRng::seed_from_u64(0);
//! let data = sinc_dataset::<CpuBackend, _>(200, 0.1, &mut rng).unwrap();
//!
//! let fitted = KernelRidgeRegressor::builder()
//!     .width(1.0)
//!     .lambda(0.1)
//!     .build()
//!     .unwrap()
//!     .fit(&data)
//!     .unwrap();
//!
//! let train_mse = fitted.evaluate(&data, 64).unwrap();
//! assert!(train_mse < 0.05);
//! ```

pub mod backend;
pub mod dataset;
pub mod error;
pub mod kernel;
pub mod linalg;
pub mod loss;
pub mod model;
pub mod solver;

pub use backend::{Backend, Scalar, ScalarOps, Tensor1D, Tensor2D};
#[cfg(feature = "cpu")]
pub use backend::CpuBackend;
#[cfg(feature = "ndarray")]
pub use backend::NdarrayBackend;
pub use error::{KrrError, KrrResult};
pub use kernel::{gaussian_kernel, pairwise_squared_distances, regularize, GaussianKernel};
pub use loss::mse;
pub use model::{predict, train};
pub use solver::{solve_symmetric, CgProgress, CgSolution, ConjugateGradient};

/// Common imports for fitting and evaluating models.
pub mod prelude {
    pub use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
    #[cfg(feature = "cpu")]
    pub use crate::backend::CpuBackend;
    pub use crate::dataset::{safe_sinc, sinc_dataset, Dataset, InMemoryDataset};
    pub use crate::error::{KrrError, KrrResult};
    pub use crate::kernel::GaussianKernel;
    pub use crate::loss::{mse, Loss, MSELoss};
    #[cfg(feature = "cpu")]
    pub use crate::model::KernelRidgeRegressor;
    pub use crate::model::{
        FitReport, Fitted, InferenceModel, KernelRidge, KernelRidgeRegression, Solver, Unfitted,
    };
    pub use crate::solver::{CgProgress, CgSolution, ConjugateGradient};
}
