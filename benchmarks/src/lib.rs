//! Benchmark utilities for kernelridge-rs.
//!
//! - Seeded generation of regularized Gaussian kernel systems
//! - Timing helpers with warmup and summary statistics

pub mod problem;
pub mod utils;

pub use problem::KernelSystem;
pub use utils::{benchmark_with_warmup, time_fn, BenchmarkStats};
