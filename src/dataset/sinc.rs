//! Synthetic one-dimensional regression data drawn from the sinc function.

use crate::backend::{Backend, Tensor1D};
use crate::dataset::InMemoryDataset;
use crate::error::{KrrError, KrrResult};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Lower and upper bound of the sampled inputs.
pub const SINC_DOMAIN: (f64, f64) = (-4.0, 4.0);

/// Element-wise `sin(x) / x` with `safe_sinc(0) == 1`.
///
/// Computed as `sin(x) / (x + z) + z` where `z` is `1` exactly at zeros, so no
/// division by zero ever happens.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor1D};
/// use kernelridge_rs::dataset::safe_sinc;
///
/// let x = Tensor1D::<CpuBackend>::new(vec![0.0, std::f64::consts::PI]);
/// let y = safe_sinc(&x).unwrap().to_vec();
/// assert_eq!(y[0], 1.0);
/// assert!(y[1].abs() < 1e-15);
/// ```
pub fn safe_sinc<B: Backend>(x: &Tensor1D<B>) -> KrrResult<Tensor1D<B>> {
    let is_zero = x.zero_mask();
    let denominator = x.add(&is_zero)?;
    x.sin().div(&denominator)?.add(&is_zero)
}

/// Draws `n` samples `x ~ U[-4, 4)`, `y = safe_sinc(x) + noise * N(0, 1)`.
///
/// Targets are evaluated on backend `B`; with the same seed every backend sees
/// the same inputs and noise draws.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::CpuBackend;
/// use kernelridge_rs::dataset::{sinc_dataset, Dataset};
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let data = sinc_dataset::<CpuBackend, _>(25, 0.1, &mut rng).unwrap();
/// assert_eq!(data.len(), Some(25));
/// ```
pub fn sinc_dataset<B: Backend, R: Rng + ?Sized>(
    n: usize,
    noise: f64,
    rng: &mut R,
) -> KrrResult<InMemoryDataset> {
    if n == 0 {
        return Err(KrrError::EmptyData("sinc dataset needs at least one sample".into()));
    }
    if !(noise.is_finite() && noise >= 0.0) {
        return Err(KrrError::InvalidParameter(format!(
            "noise level must be non-negative and finite, got {}",
            noise
        )));
    }
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| KrrError::InvalidParameter(e.to_string()))?;

    let (lo, hi) = SINC_DOMAIN;
    let x: Vec<f64> = (0..n).map(|_| rng.random_range(lo..hi)).collect();
    let noise_terms: Vec<f64> = (0..n).map(|_| noise * normal.sample(&mut *rng)).collect();

    let y = safe_sinc(&Tensor1D::<B>::new(x.clone()))?.add(&Tensor1D::new(noise_terms))?;

    InMemoryDataset::from_columns(x, y.to_vec())
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;
    use crate::dataset::Dataset;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_safe_sinc_matches_sin_over_x() {
        let xs = vec![-3.5, -1e-3, 0.0, 1e-8, 0.5, 2.0];
        let y = safe_sinc(&Tensor1D::<CpuBackend>::new(xs.clone())).unwrap().to_vec();
        for (x, v) in xs.iter().zip(y.iter()) {
            if *x == 0.0 {
                assert_eq!(*v, 1.0);
            } else {
                assert!((v - x.sin() / x).abs() < 1e-15);
            }
        }
        assert!(y.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_sinc_dataset_shape_and_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let ds = sinc_dataset::<CpuBackend, _>(50, 0.1, &mut rng).unwrap();
        assert_eq!(ds.len(), Some(50));
        assert_eq!(ds.n_features(), 1);

        let (x, _) = ds.to_tensors::<CpuBackend>().unwrap();
        assert!(x.to_vec().iter().all(|&v| (-4.0..4.0).contains(&v)));
    }

    #[test]
    fn test_sinc_dataset_noise_free() {
        let mut rng = StdRng::seed_from_u64(1);
        let ds = sinc_dataset::<CpuBackend, _>(20, 0.0, &mut rng).unwrap();
        let (x, y) = ds.to_tensors::<CpuBackend>().unwrap();
        let expected = safe_sinc(&Tensor1D::<CpuBackend>::new(x.to_vec())).unwrap();
        assert_eq!(y.to_vec(), expected.to_vec());
    }

    #[test]
    fn test_sinc_dataset_is_reproducible() {
        let a = sinc_dataset::<CpuBackend, _>(10, 0.1, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = sinc_dataset::<CpuBackend, _>(10, 0.1, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_sinc_dataset_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            sinc_dataset::<CpuBackend, _>(0, 0.1, &mut rng),
            Err(KrrError::EmptyData(_))
        ));
        assert!(matches!(
            sinc_dataset::<CpuBackend, _>(5, -0.1, &mut rng),
            Err(KrrError::InvalidParameter(_))
        ));
    }
}
