//! Compare the direct solve against conjugate gradients on kernel systems of
//! growing size and shrinking regularization.

use anyhow::{Context, Result};
use benchmarks::{benchmark_with_warmup, KernelSystem};
use clap::Parser;
use kernelridge_rs::prelude::*;
use kernelridge_rs::solve_symmetric;

#[derive(Parser, Debug)]
#[command(name = "solver_comparison")]
#[command(about = "Direct vs conjugate-gradient timings on Gaussian kernel systems", long_about = None)]
struct Cli {
    /// System sizes to benchmark
    #[arg(short = 'n', long, value_delimiter = ',', default_values_t = vec![100, 200, 400])]
    sizes: Vec<usize>,

    /// Regularization strengths to benchmark
    #[arg(short, long, value_delimiter = ',', default_values_t = vec![1.0, 1e-3, 1e-6])]
    lambdas: Vec<f64>,

    /// Gaussian kernel width
    #[arg(short, long, default_value_t = 1.0)]
    width: f64,

    /// Conjugate-gradient residual threshold
    #[arg(short, long, default_value_t = 1e-6)]
    threshold: f64,

    /// Measured runs per configuration
    #[arg(short, long, default_value_t = 5)]
    runs: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cg = ConjugateGradient::new(cli.threshold)?;

    println!(
        "{:>6} {:>10} {:>12} {:>12} {:>8} {:>12} {:>12}",
        "n", "lambda", "direct ms", "cg ms", "cg iters", "direct res", "cg res"
    );

    for &n in &cli.sizes {
        for &lambda in &cli.lambdas {
            let system = KernelSystem::generate(n, cli.width, lambda, n as u64)
                .with_context(|| format!("building system n={} lambda={:e}", n, lambda))?;
            let x0 = Tensor1D::zeros(n);

            let (direct, direct_stats) =
                benchmark_with_warmup(1, cli.runs, || solve_symmetric(&system.a, &system.y));
            let (iterative, cg_stats) =
                benchmark_with_warmup(1, cli.runs, || cg.solve(&system.a, &system.y, &x0));

            let direct_res = match direct.last() {
                Some(Ok(alpha)) => format!("{:.3e}", system.residual(alpha)?),
                Some(Err(e)) => short_error(e),
                None => "-".to_string(),
            };
            let (iters, cg_res) = match iterative.last() {
                Some(Ok(solution)) => (
                    solution.iterations.to_string(),
                    format!("{:.3e}", system.residual(&solution.x)?),
                ),
                Some(Err(e)) => ("-".to_string(), short_error(e)),
                None => ("-".to_string(), "-".to_string()),
            };

            println!(
                "{:>6} {:>10.1e} {:>12.3} {:>12.3} {:>8} {:>12} {:>12}",
                n, lambda, direct_stats.mean_ms, cg_stats.mean_ms, iters, direct_res, cg_res
            );
        }
    }

    Ok(())
}

fn short_error(e: &KrrError) -> String {
    match e {
        KrrError::SingularSystem(_) => "singular".to_string(),
        KrrError::DegenerateDirection { .. } => "degenerate".to_string(),
        KrrError::MaxIterationsExceeded { .. } => "no conv.".to_string(),
        other => format!("{}", other),
    }
}
