#![cfg(feature = "cpu")]
//! End-to-end tests for kernel construction and the direct solve.
//!
//! ## Test Organization
//!
//! 1. **Kernel Properties** - Range, unit diagonal, symmetry of distances
//! 2. **Direct Solve** - Round trip through the regularized system
//! 3. **Degenerate Systems** - Duplicate samples without regularization
//! 4. **Model Quality** - Fitting noisy sinc data

use approx::{assert_abs_diff_eq, assert_relative_eq};
use kernelridge_rs::prelude::*;
use kernelridge_rs::{gaussian_kernel, pairwise_squared_distances, predict, regularize, train};
use rand::rngs::StdRng;
use rand::SeedableRng;

type T1 = Tensor1D<CpuBackend>;
type T2 = Tensor2D<CpuBackend>;

fn sinc_tensors(n: usize, noise: f64, seed: u64) -> (T2, T1) {
    let mut rng = StdRng::seed_from_u64(seed);
    sinc_dataset::<CpuBackend, _>(n, noise, &mut rng)
        .expect("dataset")
        .to_tensors()
        .expect("tensors")
}

// ============================================================================
// Kernel Properties
// ============================================================================

/// Kernel values lie in (0, 1] with an exact unit diagonal for X == Z.
#[test]
fn test_kernel_unit_diagonal_and_range() {
    let (x, _) = sinc_tensors(100, 0.1, 1);
    let k = gaussian_kernel(1.0, &x, &x).unwrap().to_vec();
    for i in 0..100 {
        assert_eq!(k[i * 100 + i], 1.0);
    }
    assert!(k.iter().all(|&v| v > 0.0 && v <= 1.0));
}

/// distances(X, Z)[i][j] == distances(Z, X)[j][i], with a zero self-distance diagonal.
#[test]
fn test_distance_symmetry_across_sets() {
    let (x, _) = sinc_tensors(40, 0.0, 2);
    let (z, _) = sinc_tensors(25, 0.0, 3);

    let dxz = pairwise_squared_distances(&x, &z).unwrap().to_vec();
    let dzx = pairwise_squared_distances(&z, &x).unwrap().to_vec();
    for i in 0..40 {
        for j in 0..25 {
            assert_eq!(dxz[i * 25 + j], dzx[j * 40 + i]);
        }
    }

    let dxx = pairwise_squared_distances(&x, &x).unwrap().to_vec();
    assert!((0..40).all(|i| dxx[i * 40 + i] == 0.0));
}

/// safe_sinc is exactly 1 at the origin and sin(x)/x elsewhere.
#[test]
fn test_safe_sinc_values() {
    let xs = vec![0.0, -2.5, 1e-12, 3.0];
    let y = safe_sinc(&T1::new(xs.clone())).unwrap().to_vec();
    assert_eq!(y[0], 1.0);
    for (x, v) in xs.iter().zip(y.iter()).skip(1) {
        assert_relative_eq!(*v, x.sin() / x, max_relative = 1e-14);
    }
}

// ============================================================================
// Direct Solve
// ============================================================================

/// ||(K + lambda I) alpha - y|| is tiny for well-conditioned systems.
#[test]
fn test_direct_round_trip() {
    let (x, y) = sinc_tensors(200, 0.1, 4);
    for &lambda in &[1e-6, 1e-3, 1.0] {
        let alpha = train(&x, &y, 1.0, lambda).unwrap();
        let a = regularize(&gaussian_kernel(1.0, &x, &x).unwrap(), lambda).unwrap();
        let residual = a.dot(&alpha).unwrap().sub(&y).unwrap().norm().to_f64();
        assert!(residual < 1e-5, "lambda {}: residual {}", lambda, residual);
    }
}

/// The free functions and the model produce identical coefficients and predictions.
#[test]
fn test_free_functions_match_model() {
    let mut rng = StdRng::seed_from_u64(5);
    let data = sinc_dataset::<CpuBackend, _>(60, 0.1, &mut rng).unwrap();
    let (x, y) = data.to_tensors::<CpuBackend>().unwrap();

    let alpha = train(&x, &y, 0.7, 0.01).unwrap();
    let fitted = KernelRidgeRegressor::new(0.7, 0.01).unwrap().fit(&data).unwrap();
    assert_eq!(alpha.to_vec(), fitted.alpha().to_vec());

    let x_new = T2::from_column(vec![-3.3, 0.1, 2.9]);
    let a = predict(&x_new, &x, 0.7, &alpha).unwrap();
    let b = fitted.predict_batch(&x_new).unwrap();
    assert_eq!(a.to_vec(), b.to_vec());
}

// ============================================================================
// Degenerate Systems
// ============================================================================

/// lambda = 0 with duplicated samples must be reported as singular.
#[test]
fn test_duplicate_rows_without_ridge_are_singular() {
    let (x, y) = sinc_tensors(30, 0.1, 6);
    let mut xs = x.to_vec();
    let mut ys = y.to_vec();
    let dup_x: Vec<f64> = xs[..5].to_vec();
    let dup_y: Vec<f64> = ys[..5].iter().map(|v| v + 0.5).collect();
    xs.extend(dup_x);
    ys.extend(dup_y);
    let x = T2::from_column(xs);
    let y = T1::new(ys);

    assert!(matches!(train(&x, &y, 1.0, 0.0), Err(KrrError::SingularSystem(_))));

    // A positive ridge restores a well-posed system.
    let alpha = train(&x, &y, 1.0, 1e-2).unwrap();
    assert!(alpha.is_finite());
}

/// Invalid hyperparameters fail before any work is done.
#[test]
fn test_invalid_hyperparameters() {
    let (x, y) = sinc_tensors(10, 0.1, 7);
    assert!(matches!(train(&x, &y, 0.0, 1.0), Err(KrrError::InvalidParameter(_))));
    assert!(matches!(train(&x, &y, -1.0, 1.0), Err(KrrError::InvalidParameter(_))));
    assert!(matches!(train(&x, &y, 1.0, -1e-9), Err(KrrError::InvalidParameter(_))));
    assert!(matches!(train(&x, &y, 1.0, f64::NAN), Err(KrrError::InvalidParameter(_))));
}

// ============================================================================
// Model Quality
// ============================================================================

/// Training error on noisy sinc data sits near the noise variance.
#[test]
fn test_training_mse_near_noise_level() {
    let mut rng = StdRng::seed_from_u64(8);
    let data = sinc_dataset::<CpuBackend, _>(1000, 0.1, &mut rng).unwrap();
    let fitted = KernelRidgeRegressor::new(1.0, 1.0).unwrap().fit(&data).unwrap();

    let train_mse = fitted.evaluate(&data, 128).unwrap();
    assert!(train_mse > 0.005 && train_mse < 0.015, "train mse {}", train_mse);

    let clean = sinc_dataset::<CpuBackend, _>(500, 0.0, &mut rng).unwrap();
    let test_mse = fitted.evaluate(&clean, 128).unwrap();
    assert!(test_mse < 2e-3, "test mse {}", test_mse);
}

/// mse agrees with a hand-computed mean of squared differences.
#[test]
fn test_mse_matches_manual_computation() {
    let pred = T1::new(vec![0.5, 1.5, -1.0, 2.0]);
    let target = T1::new(vec![0.0, 2.0, -1.0, 1.0]);
    let manual = (0.25 + 0.25 + 0.0 + 1.0) / 4.0;
    assert_abs_diff_eq!(mse(&pred, &target).unwrap(), manual, epsilon = 1e-15);
    assert!(matches!(
        mse(&pred, &T1::new(vec![1.0])),
        Err(KrrError::ShapeMismatch { .. })
    ));
}
