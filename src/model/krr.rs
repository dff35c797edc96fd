//! Kernel ridge regression with a Gaussian kernel.
//!
//! Fitting solves `(K + lambda*I) alpha = y` for the dual coefficients, where
//! `K` is the Gaussian kernel of the training inputs. A new input `x` is then
//! predicted as `Σ_i alpha_i * k(x, x_i)`.

use crate::backend::{Backend, Scalar, Tensor1D, Tensor2D};
use crate::dataset::Dataset;
use crate::error::{KrrError, KrrResult};
use crate::kernel::{check_lambda, gaussian_kernel, regularize, GaussianKernel};
use crate::loss::mse;
use crate::model::{Fitted, InferenceModel, Unfitted};
use crate::solver::{solve_symmetric, ConjugateGradient};
use std::marker::PhantomData;

/// How the regularized kernel system is solved.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Solver {
    /// Cholesky factorization with an LU fallback.
    #[default]
    Direct,
    /// Conjugate gradients from `alpha = 0`.
    ConjugateGradient(ConjugateGradient),
}

/// Validated hyperparameters of a kernel ridge model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KernelRidgeConfig {
    pub kernel: GaussianKernel,
    pub lambda: f64,
    pub solver: Solver,
}

/// Diagnostics of a completed fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    pub solver: Solver,
    /// Conjugate-gradient iterations; `0` for the direct solver.
    pub iterations: usize,
    /// True residual `||(K + lambda*I) alpha - y||` of the returned coefficients.
    pub residual_norm: f64,
}

/// Training inputs and the dual coefficients fitted to them.
#[derive(Debug, Clone)]
pub struct KernelRidgeParams<B: Backend> {
    pub x_train: Tensor2D<B>,
    pub alpha: Tensor1D<B>,
}

/// Kernel ridge regression model in typestate `S` ([`Unfitted`] or [`Fitted`]).
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor2D};
/// use kernelridge_rs::dataset::InMemoryDataset;
/// use kernelridge_rs::model::{InferenceModel, KernelRidgeRegression};
///
/// let xs: Vec<f64> = (0..20).map(|i| i as f64 * 0.2).collect();
/// let ys: Vec<f64> = xs.iter().map(|x| x.sin()).collect();
/// let dataset = InMemoryDataset::from_columns(xs, ys).unwrap();
///
/// let model = KernelRidgeRegression::<CpuBackend>::builder()
///     .width(1.0)
///     .lambda(1e-6)
///     .build()
///     .unwrap();
/// let fitted = model.fit(&dataset).unwrap();
///
/// let pred = fitted.predict_batch(&Tensor2D::from_column(vec![1.0])).unwrap();
/// assert!((pred.to_vec()[0] - 1.0f64.sin()).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct KernelRidge<B: Backend, S> {
    config: KernelRidgeConfig,
    params: KernelRidgeParams<B>,
    report: FitReport,
    _state: PhantomData<S>,
}

pub type KernelRidgeRegression<B> = KernelRidge<B, Unfitted>;

#[cfg(feature = "cpu")]
pub type KernelRidgeRegressor = KernelRidgeRegression<crate::backend::CpuBackend>;

/// Fluent configuration for [`KernelRidge`]; defaults are width `1.0`,
/// lambda `1.0` and the direct solver.
#[derive(Debug, Clone, Copy)]
pub struct KernelRidgeBuilder<B: Backend> {
    width: f64,
    lambda: f64,
    solver: Solver,
    _backend: PhantomData<B>,
}

impl<B: Backend> Default for KernelRidgeBuilder<B> {
    fn default() -> Self {
        Self {
            width: 1.0,
            lambda: 1.0,
            solver: Solver::Direct,
            _backend: PhantomData,
        }
    }
}

impl<B: Backend> KernelRidgeBuilder<B> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn lambda(mut self, lambda: f64) -> Self {
        self.lambda = lambda;
        self
    }

    pub fn solver(mut self, solver: Solver) -> Self {
        self.solver = solver;
        self
    }

    /// Validates the hyperparameters.
    pub fn build(self) -> KrrResult<KernelRidge<B, Unfitted>> {
        let kernel = GaussianKernel::new(self.width)?;
        check_lambda(self.lambda)?;
        Ok(KernelRidge {
            config: KernelRidgeConfig {
                kernel,
                lambda: self.lambda,
                solver: self.solver,
            },
            params: KernelRidgeParams {
                x_train: Tensor2D::zeros(0, 0),
                alpha: Tensor1D::zeros(0),
            },
            report: FitReport {
                solver: self.solver,
                iterations: 0,
                residual_norm: 0.0,
            },
            _state: PhantomData,
        })
    }
}

impl<B: Backend, S> KernelRidge<B, S> {
    pub fn config(&self) -> &KernelRidgeConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.config.kernel.width()
    }

    pub fn lambda(&self) -> f64 {
        self.config.lambda
    }
}

impl<B: Backend> KernelRidge<B, Unfitted> {
    pub fn builder() -> KernelRidgeBuilder<B> {
        KernelRidgeBuilder::new()
    }

    /// Direct-solver model with the given width and regularization.
    pub fn new(width: f64, lambda: f64) -> KrrResult<Self> {
        Self::builder().width(width).lambda(lambda).build()
    }

    /// Fits on every sample of `dataset`.
    pub fn fit<D: Dataset>(self, dataset: &D) -> KrrResult<KernelRidge<B, Fitted>> {
        let n = dataset
            .len()
            .ok_or_else(|| KrrError::EmptyData("dataset length unknown".into()))?;
        if n == 0 {
            return Err(KrrError::EmptyData("dataset has no samples".into()));
        }
        let (x, y) = dataset.get_batch::<B>(0..n)?;
        self.fit_tensors(x, y)
    }

    /// Fits on samples `x` (one per row) with targets `y`.
    pub fn fit_tensors(self, x: Tensor2D<B>, y: Tensor1D<B>) -> KrrResult<KernelRidge<B, Fitted>> {
        validate_training_data(&x, &y)?;

        let a = self.config.kernel.regularized_matrix(&x, self.config.lambda)?;
        let (alpha, iterations) = match self.config.solver {
            Solver::Direct => (solve_symmetric(&a, &y)?, 0),
            Solver::ConjugateGradient(cg) => {
                let solution = cg.solve(&a, &y, &Tensor1D::zeros(y.len()))?;
                (solution.x, solution.iterations)
            }
        };
        if !alpha.is_finite() {
            return Err(KrrError::NonFinite("dual coefficients".into()));
        }

        let residual_norm = a.dot(&alpha)?.sub(&y)?.norm().to_f64();
        let report = FitReport {
            solver: self.config.solver,
            iterations,
            residual_norm,
        };
        log::info!(
            "fitted kernel ridge on {} samples (width {}, lambda {}, {:?}): residual {:e}",
            x.rows(),
            self.width(),
            self.lambda(),
            self.config.solver,
            residual_norm
        );

        Ok(KernelRidge {
            config: self.config,
            params: KernelRidgeParams { x_train: x, alpha },
            report,
            _state: PhantomData,
        })
    }
}

impl<B: Backend> KernelRidge<B, Fitted> {
    pub fn params(&self) -> &KernelRidgeParams<B> {
        &self.params
    }

    pub fn alpha(&self) -> &Tensor1D<B> {
        &self.params.alpha
    }

    pub fn report(&self) -> &FitReport {
        &self.report
    }

    /// Mean squared error over `dataset`, streamed in batches of `batch_size`.
    pub fn evaluate<D: Dataset>(&self, dataset: &D, batch_size: usize) -> KrrResult<f64> {
        let mut squared_error = 0.0;
        let mut count = 0usize;
        for batch in dataset.batches::<B>(batch_size) {
            let (x, y) = batch?;
            let pred = self.predict_batch(&x)?;
            squared_error += mse(&pred, &y)? * y.len() as f64;
            count += y.len();
        }
        if count == 0 {
            return Err(KrrError::EmptyData("evaluation dataset has no samples".into()));
        }
        Ok(squared_error / count as f64)
    }
}

impl<B: Backend> InferenceModel<B> for KernelRidge<B, Fitted> {
    type InputSingle = Tensor1D<B>;
    type OutputSingle = Scalar<B>;
    type InputBatch = Tensor2D<B>;
    type OutputBatch = Tensor1D<B>;

    /// Predicts one sample given as a feature vector.
    fn predict(&self, input: &Self::InputSingle) -> KrrResult<Self::OutputSingle> {
        let row = Tensor2D::new(input.to_vec(), 1, input.len())?;
        let pred = self.predict_batch(&row)?;
        Ok(pred.sum())
    }

    fn predict_batch(&self, input: &Self::InputBatch) -> KrrResult<Self::OutputBatch> {
        let k = self.config.kernel.matrix(input, &self.params.x_train)?;
        k.dot(&self.params.alpha)
    }
}

fn validate_training_data<B: Backend>(x: &Tensor2D<B>, y: &Tensor1D<B>) -> KrrResult<()> {
    if x.rows() != y.len() {
        return Err(KrrError::shape(
            format!("{} targets", x.rows()),
            format!("{} targets", y.len()),
        ));
    }
    if x.rows() == 0 {
        return Err(KrrError::EmptyData("no training samples".into()));
    }
    if !x.is_finite() || !y.is_finite() {
        return Err(KrrError::NonFinite("training data".into()));
    }
    Ok(())
}

/// Dual coefficients `alpha = (K(x, x) + lambda*I)^-1 y` by direct solve.
///
/// # Errors
/// [`KrrError::InvalidParameter`] for `width <= 0` or `lambda < 0`,
/// [`KrrError::ShapeMismatch`] if `x.rows != y.len`, and
/// [`KrrError::SingularSystem`] if the regularized kernel is singular
/// (possible when `lambda == 0`).
pub fn train<B: Backend>(
    x: &Tensor2D<B>,
    y: &Tensor1D<B>,
    width: f64,
    lambda: f64,
) -> KrrResult<Tensor1D<B>> {
    validate_training_data(x, y)?;
    let k = gaussian_kernel(width, x, x)?;
    let a = regularize(&k, lambda)?;
    solve_symmetric(&a, y)
}

/// Predictions `K(x_new, x_train) * alpha`.
pub fn predict<B: Backend>(
    x_new: &Tensor2D<B>,
    x_train: &Tensor2D<B>,
    width: f64,
    alpha: &Tensor1D<B>,
) -> KrrResult<Tensor1D<B>> {
    if x_train.rows() != alpha.len() {
        return Err(KrrError::shape(
            format!("{} coefficients", x_train.rows()),
            format!("{} coefficients", alpha.len()),
        ));
    }
    gaussian_kernel(width, x_new, x_train)?.dot(alpha)
}
