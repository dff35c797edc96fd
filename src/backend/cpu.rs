use super::Backend;

/// Pure-Rust CPU backend.
///
/// Vectors are `Vec<f64>`; matrices are row-major [`CpuTensor2D`]. All loops
/// accumulate in index order, so `row_sq_norms_2d(X)[i]` and the diagonal of
/// `matmul(X, Xᵀ)` are bitwise identical.
#[derive(Clone, Debug, Copy)]
pub struct CpuBackend;

/// Row-major matrix storage: `(data, rows, cols)`.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTensor2D(pub Vec<f64>, pub usize, pub usize);

impl CpuTensor2D {
    pub fn new(data: Vec<f64>, rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "Inconsistent shape");
        Self(data, rows, cols)
    }

    #[inline]
    fn row(&self, i: usize) -> &[f64] {
        &self.0[i * self.2..(i + 1) * self.2]
    }

    fn map(&self, f: impl Fn(f64) -> f64) -> Self {
        Self(self.0.iter().map(|&x| f(x)).collect(), self.1, self.2)
    }

    fn zip_map(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        assert_eq!((self.1, self.2), (other.1, other.2), "Shape mismatch");
        Self(
            self.0.iter().zip(other.0.iter()).map(|(&a, &b)| f(a, b)).collect(),
            self.1,
            self.2,
        )
    }
}

impl From<&[Vec<f64>]> for CpuTensor2D {
    fn from(x: &[Vec<f64>]) -> Self {
        if x.is_empty() {
            return CpuTensor2D::new(Vec::new(), 0, 0);
        }
        let rows = x.len();
        let cols = x[0].len();
        assert!(x.iter().all(|row| row.len() == cols), "All rows must have same length");
        let data: Vec<f64> = x.iter().flat_map(|row| row.iter()).copied().collect();
        CpuTensor2D::new(data, rows, cols)
    }
}

#[inline]
fn dot_slices(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn zip_1d(a: &[f64], b: &[f64], f: impl Fn(f64, f64) -> f64) -> Vec<f64> {
    assert_eq!(a.len(), b.len(), "Length mismatch");
    a.iter().zip(b.iter()).map(|(&x, &y)| f(x, y)).collect()
}

impl Backend for CpuBackend {
    type Scalar = f64;
    type Tensor1D = Vec<f64>;
    type Tensor2D = CpuTensor2D;

    // --- Constructors ---
    fn zeros_1d(len: usize) -> Self::Tensor1D {
        vec![0.; len]
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(vec![0.; rows * cols], rows, cols)
    }

    fn identity_2d(n: usize) -> Self::Tensor2D {
        let mut data = vec![0.; n * n];
        for i in 0..n {
            data[i * n + i] = 1.;
        }
        CpuTensor2D::new(data, n, n)
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        data
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        CpuTensor2D::new(data, rows, cols)
    }

    // --- Access ---
    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.clone()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64> {
        t.0.clone()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        (t.1, t.2)
    }

    // --- Element-wise ops (1D) ---
    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        zip_1d(a, b, |x, y| x + y)
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        zip_1d(a, b, |x, y| x - y)
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        zip_1d(a, b, |x, y| x * y)
    }

    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        zip_1d(a, b, |x, y| x / y)
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.iter().map(|x| x * s).collect()
    }

    fn sin_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|x| x.sin()).collect()
    }

    fn zero_mask_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.iter().map(|&x| if x == 0.0 { 1.0 } else { 0.0 }).collect()
    }

    // --- Element-wise ops (2D) ---
    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_map(b, |x, y| x + y)
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_map(b, |x, y| x - y)
    }

    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_map(b, |x, y| x * y)
    }

    fn div_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        a.zip_map(b, |x, y| x / y)
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        t.map(|x| x * s)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        t.map(|x| x + s)
    }

    fn exp_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        t.map(f64::exp)
    }

    fn clamp_min_2d(t: &Self::Tensor2D, floor: &Self::Scalar) -> Self::Tensor2D {
        t.map(|x| if x < *floor { *floor } else { x })
    }

    // --- Reductions ---
    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().sum::<f64>()
    }

    fn mean_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.iter().sum::<f64>() / t.len() as f64
    }

    fn row_sq_norms_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        (0..t.1).map(|i| dot_slices(t.row(i), t.row(i))).collect()
    }

    // --- Linear algebra ---
    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        assert_eq!(a.2, x.len(), "Matrix columns must match vector length");
        (0..a.1).map(|i| dot_slices(a.row(i), x)).collect()
    }

    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        assert_eq!(a.2, b.1, "Inner dimensions must agree");
        // Multiply against the transpose so both operands are walked row-wise.
        let bt = Self::transpose(b);
        let mut data = Vec::with_capacity(a.1 * b.2);
        for i in 0..a.1 {
            let ai = a.row(i);
            for j in 0..b.2 {
                data.push(dot_slices(ai, bt.row(j)));
            }
        }
        CpuTensor2D::new(data, a.1, b.2)
    }

    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D {
        let (rows, cols) = (t.1, t.2);
        let mut data = vec![0.; rows * cols];
        for i in 0..rows {
            for j in 0..cols {
                data[j * rows + i] = t.0[i * cols + j];
            }
        }
        CpuTensor2D::new(data, cols, rows)
    }

    fn outer_sum(col: &Self::Tensor1D, row: &Self::Tensor1D) -> Self::Tensor2D {
        let data = col
            .iter()
            .flat_map(|&c| row.iter().map(move |&r| c + r))
            .collect();
        CpuTensor2D::new(data, col.len(), row.len())
    }
}
