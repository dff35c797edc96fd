use crate::backend::Backend;
use std::marker::PhantomData;

/// Trait for scalar operations required by numerical backends.
///
/// Defines the arithmetic and conversions used by kernel construction and
/// the solvers. Implemented for `f64`, the precision every backend works in.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::ScalarOps;
///
/// let x = 4.0f64;
/// assert_eq!(ScalarOps::sqrt(x), 2.0);
/// assert_eq!(<f64 as ScalarOps>::zero(), 0.0);
/// assert_eq!(<f64 as ScalarOps>::one(), 1.0);
/// ```
pub trait ScalarOps:
    Clone
    + Copy
    + Send
    + Sync
    + PartialOrd
    + std::fmt::Debug
    + std::ops::Add<Output = Self>
    + std::ops::Mul<Output = Self>
    + std::ops::Sub<Output = Self>
    + std::ops::Div<Output = Self>
{
    /// Computes the square root of the scalar.
    fn sqrt(self) -> Self;

    /// Returns the absolute value of the scalar.
    fn abs(self) -> Self;

    /// Returns the additive identity (zero) for this scalar type.
    fn zero() -> Self;

    /// Returns the multiplicative identity (one) for this scalar type.
    fn one() -> Self;

    /// Converts an `f64` value to this scalar type.
    fn from_f64(v: f64) -> Self;

    /// Converts this scalar to an `f64` value.
    fn to_f64(self) -> f64;

    /// `true` unless the value is NaN or infinite.
    fn is_finite(self) -> bool;
}

/// `f64` implementation of `ScalarOps`.
///
/// Follows IEEE 754 semantics; NaN and infinities are detected by the callers
/// that must not propagate them.
impl ScalarOps for f64 {
    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn zero() -> Self {
        0.0
    }

    fn one() -> Self {
        1.0
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn to_f64(self) -> f64 {
        self
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Backend-typed scalar wrapper.
///
/// Carries phantom type information about its originating backend, so scalars
/// produced by one backend cannot be fed into tensors of another.
///
/// # Example
/// ```
/// use kernelridge_rs::backend::{CpuBackend, Scalar};
///
/// let s: Scalar<CpuBackend> = Scalar::new(2.0);
/// let squared = s * s;
/// assert_eq!(squared.to_f64(), 4.0);
/// ```
#[derive(Clone, Debug, Copy)]
pub struct Scalar<B: Backend> {
    pub(crate) data: B::Scalar,
    pub(crate) backend: PhantomData<B>,
}

impl<B: Backend> Scalar<B> {
    /// Creates a backend scalar from an `f64` value.
    pub fn new(value: f64) -> Self {
        Self {
            data: B::Scalar::from_f64(value),
            backend: PhantomData,
        }
    }

    pub(crate) fn from_raw(data: B::Scalar) -> Self {
        Self {
            data,
            backend: PhantomData,
        }
    }

    /// Converts to a host `f64`.
    pub fn to_f64(&self) -> f64 {
        self.data.to_f64()
    }

    pub fn sqrt(&self) -> Self {
        Self::from_raw(self.data.sqrt())
    }

    pub fn abs(&self) -> Self {
        Self::from_raw(self.data.abs())
    }

    pub fn is_finite(&self) -> bool {
        self.data.is_finite()
    }
}

impl<B: Backend> std::ops::Add for Scalar<B> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::from_raw(self.data + rhs.data)
    }
}

impl<B: Backend> std::ops::Sub for Scalar<B> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::from_raw(self.data - rhs.data)
    }
}

impl<B: Backend> std::ops::Mul for Scalar<B> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_raw(self.data * rhs.data)
    }
}

impl<B: Backend> std::ops::Div for Scalar<B> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::from_raw(self.data / rhs.data)
    }
}

impl<B: Backend> std::ops::Neg for Scalar<B> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_raw(B::Scalar::zero() - self.data)
    }
}

#[cfg(test)]
#[cfg(feature = "cpu")]
mod tests {
    use super::*;
    use crate::backend::CpuBackend;

    #[test]
    fn test_scalar_arithmetic() {
        let a = Scalar::<CpuBackend>::new(6.0);
        let b = Scalar::<CpuBackend>::new(2.0);

        assert_eq!((a + b).to_f64(), 8.0);
        assert_eq!((a - b).to_f64(), 4.0);
        assert_eq!((a * b).to_f64(), 12.0);
        assert_eq!((a / b).to_f64(), 3.0);
        assert_eq!((-a).to_f64(), -6.0);
    }

    #[test]
    fn test_scalar_sqrt_abs() {
        let a = Scalar::<CpuBackend>::new(-9.0);
        assert_eq!(a.abs().to_f64(), 9.0);
        assert_eq!(a.abs().sqrt().to_f64(), 3.0);
    }

    #[test]
    fn test_scalar_is_finite() {
        let zero = Scalar::<CpuBackend>::new(0.0);
        assert!(zero.is_finite());
        assert!(!(Scalar::<CpuBackend>::new(1.0) / zero).is_finite());
    }
}
