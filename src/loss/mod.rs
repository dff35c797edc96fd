use crate::backend::{Backend, Scalar, Tensor1D};
use crate::error::{KrrError, KrrResult};

/// A regression metric comparing predictions with targets.
///
/// Implementors compute a scalar summary of the prediction error. Inputs of
/// different length are a [`KrrError::ShapeMismatch`], never a truncated
/// comparison.
pub trait Loss<B: Backend> {
    /// Computes the scalar loss value.
    fn loss(&self, prediction: &Tensor1D<B>, target: &Tensor1D<B>) -> KrrResult<Scalar<B>>;
}

/// Mean Squared Error: `L = (1/n) * Σ(pred_i - target_i)^2`
#[derive(Debug, Clone, Copy, Default)]
pub struct MSELoss;

impl<B: Backend> Loss<B> for MSELoss {
    fn loss(&self, pred: &Tensor1D<B>, target: &Tensor1D<B>) -> KrrResult<Scalar<B>> {
        let diff = pred.sub(target)?;
        if diff.is_empty() {
            return Err(KrrError::EmptyData("mean squared error of empty vectors".into()));
        }
        let n = Scalar::<B>::new(diff.len() as f64);
        Ok(diff.dot(&diff)? / n)
    }
}

/// `mean((prediction - target)^2)` as a plain `f64`.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor1D};
/// use kernelridge_rs::loss::mse;
///
/// let pred = Tensor1D::<CpuBackend>::new(vec![3.0, 5.0]);
/// let target = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);
/// assert_eq!(mse(&pred, &target).unwrap(), 6.5);
/// ```
pub fn mse<B: Backend>(prediction: &Tensor1D<B>, target: &Tensor1D<B>) -> KrrResult<f64> {
    Ok(MSELoss.loss(prediction, target)?.to_f64())
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_mse_loss() {
        let pred = Tensor1D::<CpuBackend>::new(vec![3.0, 5.0]);
        let target = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);

        let loss_val = MSELoss.loss(&pred, &target).unwrap();
        // ((3-1)^2 + (5-2)^2) / 2 = (4 + 9) / 2 = 6.5
        assert!((loss_val.to_f64() - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_mse_perfect_prediction() {
        let y = Tensor1D::<CpuBackend>::new(vec![0.25, -1.0, 3.5]);
        assert_eq!(mse(&y, &y).unwrap(), 0.0);
    }

    #[test]
    fn test_mse_length_mismatch() {
        let pred = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
        let target = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);
        assert!(matches!(mse(&pred, &target), Err(KrrError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_mse_empty() {
        let empty = Tensor1D::<CpuBackend>::zeros(0);
        assert!(matches!(mse(&empty, &empty), Err(KrrError::EmptyData(_))));
    }

    #[test]
    fn test_mse_empty_against_nonempty_is_mismatch_in_both_orders() {
        let empty = Tensor1D::<CpuBackend>::zeros(0);
        let y = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0]);
        assert!(matches!(mse(&empty, &y), Err(KrrError::ShapeMismatch { .. })));
        assert!(matches!(mse(&y, &empty), Err(KrrError::ShapeMismatch { .. })));
    }
}
