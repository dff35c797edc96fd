pub mod krr;
pub mod state;

pub use krr::{
    predict, train, FitReport, KernelRidge, KernelRidgeBuilder, KernelRidgeConfig,
    KernelRidgeParams, KernelRidgeRegression, Solver,
};
#[cfg(feature = "cpu")]
pub use krr::KernelRidgeRegressor;
pub use state::{Fitted, Unfitted};

use crate::backend::Backend;
use crate::error::KrrResult;

/// Prediction interface of a fitted model.
///
/// Both methods validate their input against the fitted feature dimension
/// and report [`KrrError::ShapeMismatch`](crate::KrrError::ShapeMismatch)
/// instead of panicking.
pub trait InferenceModel<B: Backend> {
    type InputSingle;
    type OutputSingle;
    type InputBatch;
    type OutputBatch;

    fn predict(&self, input: &Self::InputSingle) -> KrrResult<Self::OutputSingle>;
    fn predict_batch(&self, input: &Self::InputBatch) -> KrrResult<Self::OutputBatch>;
}
