use super::scalar::Scalar;
use crate::backend::Backend;
use crate::error::{KrrError, KrrResult};
use std::marker::PhantomData;

/// Backend-typed 1D tensor: labels, dual coefficients, iterates and residuals.
///
/// Wraps a backend's native vector (`B::Tensor1D`) together with phantom
/// information about its backend. Binary operations check lengths and return
/// [`KrrError::ShapeMismatch`] instead of panicking.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Scalar, Tensor1D};
///
/// let x: Tensor1D<CpuBackend> = Tensor1D::new(vec![1.0, 2.0, 3.0]);
/// assert_eq!(x.len(), 3);
///
/// let y = x.scale(&Scalar::new(2.0));
/// assert_eq!(y.to_vec(), vec![2.0, 4.0, 6.0]);
/// ```
#[derive(Clone)]
pub struct Tensor1D<B: Backend> {
    pub(crate) data: B::Tensor1D,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> std::fmt::Debug for Tensor1D<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Tensor1D").field(&self.to_vec()).finish()
    }
}

impl<B: Backend> Tensor1D<B> {
    pub(crate) fn from_raw(data: B::Tensor1D) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Creates a new 1D tensor from owned values.
    pub fn new(data: Vec<f64>) -> Self {
        Self::from_raw(B::from_vec_1d(data))
    }

    /// Creates a 1D tensor filled with zeros of specified length.
    ///
    /// # Example
    /// ```
    /// use kernelridge_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let zeros: Tensor1D<CpuBackend> = Tensor1D::zeros(4);
    /// assert_eq!(zeros.to_vec(), vec![0.0; 4]);
    /// ```
    pub fn zeros(len: usize) -> Self {
        Self::from_raw(B::zeros_1d(len))
    }

    /// Returns the number of elements in the tensor.
    pub fn len(&self) -> usize {
        B::len_1d(&self.data)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Converts the tensor to a standard `Vec<f64>`.
    pub fn to_vec(&self) -> Vec<f64> {
        B::to_vec_1d(&self.data)
    }

    /// `true` when no element is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.to_vec().iter().all(|v| v.is_finite())
    }

    fn check_len(&self, other: &Self) -> KrrResult<()> {
        if self.len() != other.len() {
            return Err(KrrError::shape(
                format!("vector of length {}", self.len()),
                format!("vector of length {}", other.len()),
            ));
        }
        Ok(())
    }

    /// Element-wise addition: `self + other`.
    pub fn add(&self, other: &Self) -> KrrResult<Self> {
        self.check_len(other)?;
        Ok(Self::from_raw(B::add_1d(&self.data, &other.data)))
    }

    /// Element-wise subtraction: `self - other`.
    ///
    /// # Example
    /// ```
    /// use kernelridge_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![5.0, 7.0, 9.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![2.0, 3.0, 4.0]);
    /// assert_eq!(a.sub(&b).unwrap().to_vec(), vec![3.0, 4.0, 5.0]);
    ///
    /// let short = Tensor1D::<CpuBackend>::new(vec![1.0]);
    /// assert!(a.sub(&short).is_err());
    /// ```
    pub fn sub(&self, other: &Self) -> KrrResult<Self> {
        self.check_len(other)?;
        Ok(Self::from_raw(B::sub_1d(&self.data, &other.data)))
    }

    /// Element-wise multiplication: `self * other`.
    pub fn mul(&self, other: &Self) -> KrrResult<Self> {
        self.check_len(other)?;
        Ok(Self::from_raw(B::mul_1d(&self.data, &other.data)))
    }

    /// Element-wise division: `self / other`.
    ///
    /// Zero divisors follow IEEE 754; exclude them beforehand when finite
    /// results are required.
    pub fn div(&self, other: &Self) -> KrrResult<Self> {
        self.check_len(other)?;
        Ok(Self::from_raw(B::div_1d(&self.data, &other.data)))
    }

    /// Multiplies every element by a scalar.
    pub fn scale(&self, s: &Scalar<B>) -> Self {
        Self::from_raw(B::mul_scalar_1d(&self.data, &s.data))
    }

    /// Element-wise sine.
    pub fn sin(&self) -> Self {
        Self::from_raw(B::sin_1d(&self.data))
    }

    /// `1.0` where the element is exactly zero, `0.0` elsewhere.
    pub fn zero_mask(&self) -> Self {
        Self::from_raw(B::zero_mask_1d(&self.data))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Scalar<B> {
        Scalar::from_raw(B::sum_all_1d(&self.data))
    }

    /// Arithmetic mean of all elements.
    ///
    /// Fails with [`KrrError::EmptyData`] on an empty tensor.
    pub fn mean(&self) -> KrrResult<Scalar<B>> {
        if self.is_empty() {
            return Err(KrrError::EmptyData("mean of an empty vector".into()));
        }
        Ok(Scalar::from_raw(B::mean_all_1d(&self.data)))
    }

    /// Inner product `Σᵢ selfᵢ * otherᵢ`.
    ///
    /// # Example
    /// ```
    /// use kernelridge_rs::backend::{CpuBackend, Tensor1D};
    ///
    /// let a = Tensor1D::<CpuBackend>::new(vec![1.0, 2.0, 3.0]);
    /// let b = Tensor1D::<CpuBackend>::new(vec![4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b).unwrap().to_f64(), 32.0);
    /// ```
    pub fn dot(&self, other: &Self) -> KrrResult<Scalar<B>> {
        self.check_len(other)?;
        let prod = B::mul_1d(&self.data, &other.data);
        Ok(Scalar::from_raw(B::sum_all_1d(&prod)))
    }

    /// Euclidean norm `sqrt(self · self)`.
    pub fn norm(&self) -> Scalar<B> {
        let prod = B::mul_1d(&self.data, &self.data);
        Scalar::from_raw(B::sum_all_1d(&prod)).sqrt()
    }
}
