/// A marker type indicating that a model has **no coefficients yet**.
///
/// Used as the state parameter of [`KernelRidge`](crate::model::KernelRidge):
/// - `fit` is only available on `KernelRidge<B, Unfitted>`.
/// - Prediction (`InferenceModel`) is **not available** until fitting returns
///   a `KernelRidge<B, Fitted>`.
///
/// This rules out predicting with an untrained model at compile time.
#[derive(Debug, Clone, Copy)]
pub struct Unfitted;

/// A marker type indicating that a model has been **fitted**.
///
/// A `Fitted` kernel ridge model owns its training inputs and dual
/// coefficients and implements [`InferenceModel`](crate::model::InferenceModel).
#[derive(Debug, Clone, Copy)]
pub struct Fitted;
