use kernelridge_rs::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A seeded `(K + lambda I) alpha = y` system built from noisy sinc samples.
#[derive(Debug, Clone)]
pub struct KernelSystem {
    pub x: Tensor2D<CpuBackend>,
    pub y: Tensor1D<CpuBackend>,
    pub a: Tensor2D<CpuBackend>,
    pub width: f64,
    pub lambda: f64,
}

impl KernelSystem {
    /// Sample `n` points with label noise 0.1 and assemble the regularized kernel matrix.
    pub fn generate(n: usize, width: f64, lambda: f64, seed: u64) -> KrrResult<Self> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (x, y) = sinc_dataset::<CpuBackend, _>(n, 0.1, &mut rng)?.to_tensors::<CpuBackend>()?;
        let a = GaussianKernel::new(width)?.regularized_matrix(&x, lambda)?;
        Ok(Self {
            x,
            y,
            a,
            width,
            lambda,
        })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `||A x - y||` for a candidate solution.
    pub fn residual(&self, alpha: &Tensor1D<CpuBackend>) -> KrrResult<f64> {
        Ok(self.a.dot(alpha)?.sub(&self.y)?.norm().to_f64())
    }
}
