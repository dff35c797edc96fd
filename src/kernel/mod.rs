//! Gaussian kernel construction.
//!
//! The kernel between two sample sets `X` (n × d) and `Z` (m × d) is
//!
//! ```text
//! K[i][j] = exp(-||X_i - Z_j||^2 / w)
//! ```
//!
//! Squared distances are expanded as `||x||^2 + ||z||^2 - 2 x·z`, which needs
//! one matrix product instead of `n * m` explicit differences. Cancellation in
//! that expansion can leave tiny negative values, so distances are clamped at
//! zero before exponentiation. The diagonal of a self-distance matrix is
//! forced to exactly zero, keeping `K(X, X)` at a unit diagonal on every backend.

use crate::backend::{Backend, Scalar, Tensor2D};
use crate::error::{KrrError, KrrResult};

/// Squared Euclidean distances between the rows of `x` and the rows of `z`.
///
/// Entry `(i, j)` is `||x_i - z_j||^2`, never negative.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor2D};
/// use kernelridge_rs::kernel::pairwise_squared_distances;
///
/// let x = Tensor2D::<CpuBackend>::from_column(vec![0.0, 1.0, 3.0]);
/// let d = pairwise_squared_distances(&x, &x).unwrap();
/// assert_eq!(d.to_vec(), vec![0.0, 1.0, 9.0, 1.0, 0.0, 4.0, 9.0, 4.0, 0.0]);
/// ```
pub fn pairwise_squared_distances<B: Backend>(
    x: &Tensor2D<B>,
    z: &Tensor2D<B>,
) -> KrrResult<Tensor2D<B>> {
    if x.cols() != z.cols() {
        return Err(KrrError::shape(
            format!("samples with {} features", x.cols()),
            format!("samples with {} features", z.cols()),
        ));
    }

    let x_norms = x.row_squared_norms();
    let z_norms = z.row_squared_norms();
    let cross = x.matmul(&z.transpose())?;

    let norms = Tensor2D::outer_sum(&x_norms, &z_norms);
    let distances = norms
        .sub(&cross.scale(&Scalar::new(2.0)))?
        .clamp_min(&Scalar::new(0.0));

    // Backends may reduce the norms and the cross term in different orders,
    // leaving roundoff on the diagonal of a self-distance matrix.
    if same_samples(x, z) {
        let off_diagonal = Tensor2D::identity(x.rows())
            .scale(&Scalar::new(-1.0))
            .add_scalar(&Scalar::new(1.0));
        return distances.mul(&off_diagonal);
    }
    Ok(distances)
}

fn same_samples<B: Backend>(x: &Tensor2D<B>, z: &Tensor2D<B>) -> bool {
    std::ptr::eq(x, z) || (x.shape() == z.shape() && x.to_vec() == z.to_vec())
}

fn check_width(width: f64) -> KrrResult<()> {
    if !(width.is_finite() && width > 0.0) {
        return Err(KrrError::InvalidParameter(format!(
            "kernel width must be positive and finite, got {}",
            width
        )));
    }
    Ok(())
}

pub(crate) fn check_lambda(lambda: f64) -> KrrResult<()> {
    if !(lambda.is_finite() && lambda >= 0.0) {
        return Err(KrrError::InvalidParameter(format!(
            "regularization must be non-negative and finite, got {}",
            lambda
        )));
    }
    Ok(())
}

/// Gaussian (RBF) kernel with bandwidth `w`.
///
/// Larger widths produce flatter kernels; as `w → 0` the kernel of distinct
/// points tends to the identity, with off-diagonal entries underflowing to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianKernel {
    width: f64,
}

impl GaussianKernel {
    /// Fails with [`KrrError::InvalidParameter`] unless `width` is positive and finite.
    pub fn new(width: f64) -> KrrResult<Self> {
        check_width(width)?;
        Ok(Self { width })
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Kernel matrix `K[i][j] = exp(-||x_i - z_j||^2 / w)` of shape `(x.rows, z.rows)`.
    pub fn matrix<B: Backend>(&self, x: &Tensor2D<B>, z: &Tensor2D<B>) -> KrrResult<Tensor2D<B>> {
        let distances = pairwise_squared_distances(x, z)?;
        Ok(distances.scale(&Scalar::new(-1.0 / self.width)).exp())
    }

    /// Regularized training system `K(x, x) + lambda * I`.
    pub fn regularized_matrix<B: Backend>(
        &self,
        x: &Tensor2D<B>,
        lambda: f64,
    ) -> KrrResult<Tensor2D<B>> {
        check_lambda(lambda)?;
        regularize(&self.matrix(x, x)?, lambda)
    }
}

/// Convenience form of [`GaussianKernel::matrix`].
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Tensor2D};
/// use kernelridge_rs::kernel::gaussian_kernel;
///
/// let x = Tensor2D::<CpuBackend>::from_column(vec![-1.0, 0.0, 2.5]);
/// let k = gaussian_kernel(1.0, &x, &x).unwrap();
/// assert_eq!(k.shape(), (3, 3));
/// assert_eq!(k.to_vec()[0], 1.0);
///
/// assert!(gaussian_kernel(0.0, &x, &x).is_err());
/// ```
pub fn gaussian_kernel<B: Backend>(
    width: f64,
    x: &Tensor2D<B>,
    z: &Tensor2D<B>,
) -> KrrResult<Tensor2D<B>> {
    GaussianKernel::new(width)?.matrix(x, z)
}

/// Adds `lambda` to the diagonal of a square matrix: `K + lambda * I`.
pub fn regularize<B: Backend>(k: &Tensor2D<B>, lambda: f64) -> KrrResult<Tensor2D<B>> {
    check_lambda(lambda)?;
    if !k.is_square() {
        let (rows, cols) = k.shape();
        return Err(KrrError::shape(
            "square kernel matrix",
            format!("({}, {})", rows, cols),
        ));
    }
    let ridge = Tensor2D::identity(k.rows()).scale(&Scalar::new(lambda));
    k.add(&ridge)
}


#[cfg(test)]
#[cfg(feature = "ndarray")]
mod ndarray_tests {
    use super::*;
    use crate::backend::NdarrayBackend;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_samples(rows: usize, cols: usize, seed: u64) -> Tensor2D<NdarrayBackend> {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..rows * cols).map(|_| rng.random_range(-4.0..4.0)).collect();
        Tensor2D::new(data, rows, cols).unwrap()
    }

    #[test]
    fn test_self_distances_have_exact_zero_diagonal() {
        let x = random_samples(64, 4, 11);
        let d = pairwise_squared_distances(&x, &x).unwrap().to_vec();
        for i in 0..64 {
            assert_eq!(d[i * 64 + i], 0.0);
        }
        assert!(d.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_narrow_kernel_keeps_unit_diagonal() {
        let x = random_samples(64, 4, 12);
        let copy = Tensor2D::<NdarrayBackend>::new(x.to_vec(), 64, 4).unwrap();
        let k = gaussian_kernel(0.001, &x, &copy).unwrap().to_vec();
        for i in 0..64 {
            assert_eq!(k[i * 64 + i], 1.0);
        }
        assert!(k.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }
}
