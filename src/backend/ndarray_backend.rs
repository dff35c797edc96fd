use super::Backend;
use ndarray::{Array1, Array2, Axis};

#[derive(Clone, Debug, Copy)]
pub struct NdarrayBackend;

#[derive(Debug, Clone, PartialEq)]
pub struct NdarrayTensor2D(pub Array2<f64>);

fn array2_from_row_major(data: &[f64], rows: usize, cols: usize) -> Array2<f64> {
    assert_eq!(data.len(), rows * cols, "Inconsistent shape");
    Array2::from_shape_fn((rows, cols), |(i, j)| data[i * cols + j])
}

impl From<&[Vec<f64>]> for NdarrayTensor2D {
    fn from(x: &[Vec<f64>]) -> Self {
        let rows = x.len();
        if rows == 0 {
            return NdarrayTensor2D(Array2::zeros((0, 0)));
        }
        let cols = x[0].len();
        assert!(x.iter().all(|r| r.len() == cols), "All rows must have same length");
        NdarrayTensor2D(Array2::from_shape_fn((rows, cols), |(i, j)| x[i][j]))
    }
}

impl Backend for NdarrayBackend {
    type Scalar = f64;
    type Tensor1D = Array1<f64>;
    type Tensor2D = NdarrayTensor2D;

    fn zeros_1d(len: usize) -> Self::Tensor1D {
        Array1::zeros(len)
    }

    fn zeros_2d(rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::zeros((rows, cols)))
    }

    fn identity_2d(n: usize) -> Self::Tensor2D {
        NdarrayTensor2D(Array2::eye(n))
    }

    fn from_vec_1d(data: Vec<f64>) -> Self::Tensor1D {
        Array1::from_vec(data)
    }

    fn from_vec_2d(data: Vec<f64>, rows: usize, cols: usize) -> Self::Tensor2D {
        NdarrayTensor2D(array2_from_row_major(&data, rows, cols))
    }

    fn to_vec_1d(t: &Self::Tensor1D) -> Vec<f64> {
        t.to_vec()
    }

    fn to_vec_2d(t: &Self::Tensor2D) -> Vec<f64> {
        // Logical (row-major) order regardless of the underlying memory layout.
        t.0.iter().copied().collect()
    }

    fn len_1d(t: &Self::Tensor1D) -> usize {
        t.len()
    }

    fn shape(t: &Self::Tensor2D) -> (usize, usize) {
        t.0.dim()
    }

    // --- Element-wise binary ops (1D) ---

    fn add_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a + b
    }

    fn sub_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a - b
    }

    fn mul_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a * b
    }

    fn div_1d(a: &Self::Tensor1D, b: &Self::Tensor1D) -> Self::Tensor1D {
        a / b
    }

    fn mul_scalar_1d(t: &Self::Tensor1D, s: &Self::Scalar) -> Self::Tensor1D {
        t.mapv(|x| x * *s)
    }

    fn sin_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(f64::sin)
    }

    fn zero_mask_1d(t: &Self::Tensor1D) -> Self::Tensor1D {
        t.mapv(|x| if x == 0.0 { 1.0 } else { 0.0 })
    }

    // --- 2D scalar and binary ops ---

    fn add_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(&a.0 + &b.0)
    }

    fn sub_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(&a.0 - &b.0)
    }

    fn mul_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(&a.0 * &b.0)
    }

    fn div_2d(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(&a.0 / &b.0)
    }

    fn mul_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(&t.0 * *s)
    }

    fn add_scalar_2d(t: &Self::Tensor2D, s: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.mapv(|x| x + *s))
    }

    fn exp_2d(t: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.mapv(f64::exp))
    }

    fn clamp_min_2d(t: &Self::Tensor2D, floor: &Self::Scalar) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.mapv(|x| if x < *floor { *floor } else { x }))
    }

    // --- Reductions ---

    fn sum_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.sum()
    }

    fn mean_all_1d(t: &Self::Tensor1D) -> Self::Scalar {
        t.mean().unwrap_or(f64::NAN)
    }

    fn row_sq_norms_2d(t: &Self::Tensor2D) -> Self::Tensor1D {
        t.0.map_axis(Axis(1), |row| row.dot(&row))
    }

    // --- Linear algebra ---

    fn matvec(a: &Self::Tensor2D, x: &Self::Tensor1D) -> Self::Tensor1D {
        a.0.dot(x)
    }

    fn matmul(a: &Self::Tensor2D, b: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(a.0.dot(&b.0))
    }

    fn transpose(t: &Self::Tensor2D) -> Self::Tensor2D {
        NdarrayTensor2D(t.0.t().to_owned())
    }

    fn outer_sum(col: &Self::Tensor1D, row: &Self::Tensor1D) -> Self::Tensor2D {
        let col = col.view().insert_axis(Axis(1));
        let row = row.view().insert_axis(Axis(0));
        NdarrayTensor2D(&col + &row)
    }
}

#[cfg(test)]
#[cfg(feature = "ndarray")]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_vec_2d_row_major() {
        let t = NdarrayBackend::from_vec_2d(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], 2, 3);
        assert_eq!(t.0, array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]);
        assert_eq!(NdarrayBackend::to_vec_2d(&NdarrayBackend::transpose(&t)), vec![1.0, 4.0, 2.0, 5.0, 3.0, 6.0]);
    }

    #[test]
    fn test_outer_sum_broadcast() {
        let col = array![1.0, 2.0];
        let row = array![10.0, 20.0, 30.0];
        let sum = NdarrayBackend::outer_sum(&col, &row);
        assert_eq!(sum.0, array![[11.0, 21.0, 31.0], [12.0, 22.0, 32.0]]);
    }

    #[test]
    fn test_row_norms_and_matvec() {
        let a = NdarrayTensor2D(array![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(NdarrayBackend::row_sq_norms_2d(&a), array![5.0, 25.0]);
        assert_eq!(NdarrayBackend::matvec(&a, &array![1.0, 1.0]), array![3.0, 7.0]);
    }

    #[test]
    fn test_zero_mask_and_clamp() {
        let t = array![0.0, -2.0, 3.0];
        assert_eq!(NdarrayBackend::zero_mask_1d(&t), array![1.0, 0.0, 0.0]);

        let m = NdarrayTensor2D(array![[-1.0, 0.5]]);
        assert_eq!(NdarrayBackend::clamp_min_2d(&m, &0.0).0, array![[0.0, 0.5]]);
    }
}
