//! Solves the regularized kernel system of a sinc dataset by conjugate
//! gradients, printing the residual after every iteration.
//!
//! ```text
//! cg
//! cg --samples 200 --lambda 1e-4 --threshold 1e-8
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use kernelridge_rs::prelude::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Parser, Debug)]
#[command(name = "cg")]
#[command(about = "Conjugate gradients on a Gaussian kernel ridge system", long_about = None)]
struct Cli {
    /// Number of samples (system dimension)
    #[arg(short = 'n', long, default_value_t = 100)]
    samples: usize,

    /// Gaussian kernel width w
    #[arg(short, long, default_value_t = 1.0)]
    width: f64,

    /// Ridge regularization lambda
    #[arg(short, long, default_value_t = 1e-6)]
    lambda: f64,

    /// Residual-norm threshold; defaults to lambda
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Iteration cap; defaults to ten times the number of samples
    #[arg(short, long)]
    max_iterations: Option<usize>,

    /// Standard deviation of the Gaussian label noise
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// Random seed; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let data = sinc_dataset::<CpuBackend, _>(cli.samples, cli.noise, &mut rng)
        .context("generating data")?;
    let (x, y) = data.to_tensors::<CpuBackend>()?;

    let a = GaussianKernel::new(cli.width)?
        .regularized_matrix(&x, cli.lambda)
        .context("building the regularized kernel matrix")?;

    let mut cg = ConjugateGradient::new(cli.threshold.unwrap_or(cli.lambda))?;
    if let Some(k) = cli.max_iterations {
        cg = cg.max_iterations(k)?;
    }
    info!(
        "solving {}x{} system, threshold {:e}, at most {} iterations",
        cli.samples,
        cli.samples,
        cg.threshold(),
        cg.iteration_limit(cli.samples)
    );

    let x0 = Tensor1D::zeros(y.len());
    let solution = cg
        .solve_with_progress(&a, &y, &x0, |p| {
            println!("Residual error = {:.6}", p.residual_norm);
        })
        .context("conjugate gradients")?;

    let true_residual = a.dot(&solution.x)?.sub(&y)?.norm().to_f64();
    println!(
        "Converged after {} iterations (true residual {:e})",
        solution.iterations, true_residual
    );
    if solution.residual_increases() > 0 {
        info!(
            "residual increased in {} of {} iterations",
            solution.residual_increases(),
            solution.iterations
        );
    }

    Ok(())
}
