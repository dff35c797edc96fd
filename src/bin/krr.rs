//! Fits kernel ridge regression on noisy sinc samples and reports the error.
//!
//! ```text
//! krr 1.0 0.1
//! krr 0.5 1e-3 --solver cg --threshold 1e-8 --seed 7
//! ```

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueEnum};
use kernelridge_rs::prelude::*;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SolverArg {
    /// Cholesky factorization with LU fallback
    Direct,
    /// Conjugate gradients
    Cg,
}

#[derive(Parser, Debug)]
#[command(name = "krr")]
#[command(about = "Kernel ridge regression on synthetic sinc data", long_about = None)]
struct Cli {
    /// Gaussian kernel width w
    #[arg(allow_negative_numbers = true)]
    width: Option<f64>,

    /// Ridge regularization lambda
    #[arg(allow_negative_numbers = true)]
    lambda: Option<f64>,

    /// Number of training samples
    #[arg(short = 'n', long, default_value_t = 1000)]
    samples: usize,

    /// Number of held-out test samples
    #[arg(long, default_value_t = 1000)]
    test_samples: usize,

    /// Standard deviation of the Gaussian label noise
    #[arg(long, default_value_t = 0.1)]
    noise: f64,

    /// Random seed; drawn from the OS when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Linear solver for the regularized kernel system
    #[arg(long, value_enum, default_value_t = SolverArg::Direct)]
    solver: SolverArg,

    /// Residual threshold for conjugate gradients
    #[arg(long, default_value_t = 1e-6)]
    threshold: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (Some(width), Some(lambda)) = (cli.width, cli.lambda) else {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let solver = match cli.solver {
        SolverArg::Direct => Solver::Direct,
        SolverArg::Cg => Solver::ConjugateGradient(ConjugateGradient::new(cli.threshold)?),
    };

    let train_set = sinc_dataset::<CpuBackend, _>(cli.samples, cli.noise, &mut rng)
        .context("generating training data")?;
    info!("generated {} training samples", cli.samples);

    let model = KernelRidgeRegressor::builder()
        .width(width)
        .lambda(lambda)
        .solver(solver)
        .build()
        .context("invalid hyperparameters")?;
    let fitted = model.fit(&train_set).context("fitting kernel ridge regression")?;

    let train_mse = fitted.evaluate(&train_set, 256)?;
    println!("Mean squared error = {:.5}", train_mse);

    if fitted.report().iterations > 0 {
        println!("Conjugate gradient iterations = {}", fitted.report().iterations);
    }

    if cli.test_samples > 0 {
        let test_set = sinc_dataset::<CpuBackend, _>(cli.test_samples, cli.noise, &mut rng)
            .context("generating test data")?;
        let test_mse = fitted.evaluate(&test_set, 256)?;
        println!("Test mean squared error = {:.5}", test_mse);
    }

    Ok(())
}
