use super::scalar::Scalar;
use super::tensor1d::Tensor1D;
use crate::backend::Backend;
use crate::error::{KrrError, KrrResult};
use std::marker::PhantomData;

/// Backend-typed 2D tensor with row-major semantics (one sample per row).
///
/// Constructors validate the data length against the requested shape, and
/// every binary operation checks operand shapes, reporting
/// [`KrrError::ShapeMismatch`] rather than indexing out of bounds.
#[derive(Clone)]
pub struct Tensor2D<B: Backend> {
    pub(crate) data: B::Tensor2D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor2D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (rows, cols) = self.shape();
        f.debug_struct("Tensor2D")
            .field("rows", &rows)
            .field("cols", &cols)
            .field("data", &self.to_vec())
            .finish()
    }
}

fn shape_str((rows, cols): (usize, usize)) -> String {
    format!("({}, {})", rows, cols)
}

impl<B: Backend> Tensor2D<B> {
    pub(crate) fn from_raw(data: B::Tensor2D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Example
    /// ```
    /// use kernelridge_rs::backend::{CpuBackend, Tensor2D};
    ///
    /// let m = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3).unwrap();
    /// assert_eq!(m.shape(), (2, 3));
    ///
    /// assert!(Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0], 2, 2).is_err());
    /// ```
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> KrrResult<Self> {
        if data.len() != rows * cols {
            return Err(KrrError::shape(
                format!("{} values for shape ({}, {})", rows * cols, rows, cols),
                format!("{} values", data.len()),
            ));
        }
        Ok(Self::from_raw(B::from_vec_2d(data, rows, cols)))
    }

    /// Creates an `n × 1` matrix from one-dimensional samples.
    pub fn from_column(values: Vec<f64>) -> Self {
        let n = values.len();
        Self::from_raw(B::from_vec_2d(values, n, 1))
    }

    /// Creates a matrix from a slice of equally long rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> KrrResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if let Some(bad) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(KrrError::shape(
                format!("rows of length {}", n_cols),
                format!("row of length {}", bad.len()),
            ));
        }
        let data = rows.iter().flat_map(|r| r.iter()).copied().collect();
        Ok(Self::from_raw(B::from_vec_2d(data, n_rows, n_cols)))
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::from_raw(B::zeros_2d(rows, cols))
    }

    /// The `n × n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_raw(B::identity_2d(n))
    }

    pub fn shape(&self) -> (usize, usize) {
        B::shape(&self.data)
    }

    pub fn rows(&self) -> usize {
        self.shape().0
    }

    pub fn cols(&self) -> usize {
        self.shape().1
    }

    pub fn is_square(&self) -> bool {
        let (rows, cols) = self.shape();
        rows == cols
    }

    /// Row-major copy of the elements.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_2d(&self.data)
    }

    /// `true` when no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.to_vec().iter().all(|v| v.is_finite())
    }

    /// Checks `|a_ij - a_ji| <= tol * max|a|` for a square matrix.
    pub fn is_symmetric(&self, tol: f64) -> bool {
        let (rows, cols) = self.shape();
        if rows != cols {
            return false;
        }
        let values = self.to_vec();
        let scale = values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let limit = tol * scale;
        (0..rows).all(|i| (i + 1..cols).all(|j| (values[i * cols + j] - values[j * cols + i]).abs() <= limit))
    }

    fn check_same_shape(&self, other: &Self) -> KrrResult<()> {
        if self.shape() != other.shape() {
            return Err(KrrError::shape(shape_str(self.shape()), shape_str(other.shape())));
        }
        Ok(())
    }

    /// Element-wise addition.
    pub fn add(&self, other: &Self) -> KrrResult<Self> {
        self.check_same_shape(other)?;
        Ok(Self::from_raw(B::add_2d(&self.data, &other.data)))
    }

    /// Element-wise subtraction.
    pub fn sub(&self, other: &Self) -> KrrResult<Self> {
        self.check_same_shape(other)?;
        Ok(Self::from_raw(B::sub_2d(&self.data, &other.data)))
    }

    /// Element-wise (Hadamard) product.
    pub fn mul(&self, other: &Self) -> KrrResult<Self> {
        self.check_same_shape(other)?;
        Ok(Self::from_raw(B::mul_2d(&self.data, &other.data)))
    }

    /// Element-wise division.
    pub fn div(&self, other: &Self) -> KrrResult<Self> {
        self.check_same_shape(other)?;
        Ok(Self::from_raw(B::div_2d(&self.data, &other.data)))
    }

    pub fn scale(&self, a: &Scalar<B>) -> Self {
        Self::from_raw(B::mul_scalar_2d(&self.data, &a.data))
    }

    pub fn add_scalar(&self, a: &Scalar<B>) -> Self {
        Self::from_raw(B::add_scalar_2d(&self.data, &a.data))
    }

    pub fn exp(&self) -> Self {
        Self::from_raw(B::exp_2d(&self.data))
    }

    /// Replaces every element below `floor` with `floor`.
    pub fn clamp_min(&self, floor: &Scalar<B>) -> Self {
        Self::from_raw(B::clamp_min_2d(&self.data, &floor.data))
    }

    /// Squared Euclidean norm of every row.
    pub fn row_squared_norms(&self) -> Tensor1D<B> {
        Tensor1D::from_raw(B::row_sq_norms_2d(&self.data))
    }

    pub fn transpose(&self) -> Self {
        Self::from_raw(B::transpose(&self.data))
    }

    /// Matrix-vector product `self * x`.
    pub fn dot(&self, x: &Tensor1D<B>) -> KrrResult<Tensor1D<B>> {
        if self.cols() != x.len() {
            return Err(KrrError::shape(
                format!("vector of length {}", self.cols()),
                format!("vector of length {}", x.len()),
            ));
        }
        Ok(Tensor1D::from_raw(B::matvec(&self.data, &x.data)))
    }

    /// Matrix-matrix product `self * other`.
    ///
    /// # Example
    /// ```
    /// use kernelridge_rs::backend::{CpuBackend, Tensor2D};
    ///
    /// let a = Tensor2D::<CpuBackend>::new(vec![1.0, 2.0, 3.0, 4.0], 2, 2).unwrap();
    /// let i = Tensor2D::<CpuBackend>::identity(2);
    /// assert_eq!(a.matmul(&i).unwrap().to_vec(), a.to_vec());
    /// ```
    pub fn matmul(&self, other: &Self) -> KrrResult<Self> {
        if self.cols() != other.rows() {
            return Err(KrrError::shape(
                format!("({}, _) right operand", self.cols()),
                shape_str(other.shape()),
            ));
        }
        Ok(Self::from_raw(B::matmul(&self.data, &other.data)))
    }

    /// Broadcast sum `out[i, j] = col[i] + row[j]`.
    pub fn outer_sum(col: &Tensor1D<B>, row: &Tensor1D<B>) -> Self {
        Self::from_raw(B::outer_sum(&col.data, &row.data))
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    fn mat(data: Vec<f64>, rows: usize, cols: usize) -> Tensor2D<CpuBackend> {
        Tensor2D::new(data, rows, cols).unwrap()
    }

    #[test]
    fn test_tensor2d_matvec_ops() {
        // A = [[1.0, 2.0],
        //      [3.0, 4.0]]
        let a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let x = Tensor1D::<CpuBackend>::new(vec![1.0, 0.0]);

        assert_eq!(a.dot(&x).unwrap().to_vec(), vec![1.0, 3.0]);
        assert_eq!(a.transpose().dot(&x).unwrap().to_vec(), vec![1.0, 2.0]);
    }

    #[test]
    fn test_tensor2d_matvec_mismatch() {
        let a = mat(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        let x = Tensor1D::<CpuBackend>::new(vec![1.0, 0.0]);
        assert!(matches!(a.dot(&x), Err(KrrError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_tensor2d_matmul() {
        // [[1, 2, 3]]^T [[1, 2, 3]] -> 3x3 outer product
        let row = mat(vec![1.0, 2.0, 3.0], 1, 3);
        let outer = row.transpose().matmul(&row).unwrap();
        assert_eq!(outer.shape(), (3, 3));
        assert_eq!(outer.to_vec(), vec![1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 3.0, 6.0, 9.0]);

        assert!(matches!(row.matmul(&row), Err(KrrError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_tensor2d_elementwise() {
        let a = mat(vec![2.0, 4.0, 6.0, 8.0], 2, 2);
        let b = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);

        assert_eq!(a.add(&b).unwrap().to_vec(), vec![3.0, 6.0, 9.0, 12.0]);
        assert_eq!(a.sub(&b).unwrap().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(a.mul(&b).unwrap().to_vec(), vec![2.0, 8.0, 18.0, 32.0]);
        assert_eq!(a.div(&b).unwrap().to_vec(), vec![2.0, 2.0, 2.0, 2.0]);

        let c = mat(vec![1.0, 2.0], 1, 2);
        assert!(matches!(a.add(&c), Err(KrrError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_tensor2d_scalar_broadcast() {
        let a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        assert_eq!(a.scale(&Scalar::new(2.0)).to_vec(), vec![2.0, 4.0, 6.0, 8.0]);
        assert_eq!(a.add_scalar(&Scalar::new(-1.0)).to_vec(), vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_tensor2d_identity_and_symmetry() {
        let i = Tensor2D::<CpuBackend>::identity(3);
        assert_eq!(i.to_vec(), vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        assert!(i.is_symmetric(0.0));

        let skew = mat(vec![1.0, 2.0, 0.0, 1.0], 2, 2);
        assert!(!skew.is_symmetric(1e-10));
        assert!(!mat(vec![1.0, 2.0], 1, 2).is_symmetric(1e-10));
    }

    #[test]
    fn test_tensor2d_row_norms_and_outer_sum() {
        let a = mat(vec![1.0, 2.0, 3.0, 4.0], 2, 2);
        let norms = a.row_squared_norms();
        assert_eq!(norms.to_vec(), vec![5.0, 25.0]);

        let row = Tensor1D::<CpuBackend>::new(vec![10.0, 20.0, 30.0]);
        let sum = Tensor2D::outer_sum(&norms, &row);
        assert_eq!(sum.shape(), (2, 3));
        assert_eq!(sum.to_vec(), vec![15.0, 25.0, 35.0, 35.0, 45.0, 55.0]);
    }

    #[test]
    fn test_tensor2d_clamp_and_exp() {
        let a = mat(vec![-1e-17, 0.0, 1.0, -3.0], 2, 2);
        let clamped = a.clamp_min(&Scalar::new(0.0));
        assert_eq!(clamped.to_vec(), vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(clamped.exp().to_vec()[0], 1.0);
    }

    #[test]
    fn test_tensor2d_from_rows() {
        let t = Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(t.shape(), (2, 2));
        assert!(Tensor2D::<CpuBackend>::from_rows(&[vec![1.0, 2.0], vec![3.0]]).is_err());

        let col = Tensor2D::<CpuBackend>::from_column(vec![1.0, 2.0, 3.0]);
        assert_eq!(col.shape(), (3, 1));

        let t2 = Tensor2D::<CpuBackend>::zeros(0, 5);
        assert_eq!(t2.shape(), (0, 5));
    }
}
