use std::time::{Duration, Instant};

/// Run a function once and measure its wall-clock time.
pub fn time_fn<F, R>(f: F) -> (R, Duration)
where
    F: FnOnce() -> R,
{
    let start = Instant::now();
    let result = f();
    (result, start.elapsed())
}

/// Run `f` `warmup` times unmeasured, then `iterations` times measured.
///
/// # Returns
///
/// The measured results in call order and their timing statistics.
pub fn benchmark_with_warmup<F, R>(warmup: usize, iterations: usize, mut f: F) -> (Vec<R>, BenchmarkStats)
where
    F: FnMut() -> R,
{
    for _ in 0..warmup {
        let _ = f();
    }

    let mut results = Vec::with_capacity(iterations);
    let mut times = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let (result, elapsed) = time_fn(&mut f);
        results.push(result);
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    (results, BenchmarkStats::from_times(times))
}

/// Timing summary in milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkStats {
    pub runs: usize,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
    pub median_ms: f64,
}

impl BenchmarkStats {
    /// Summarize a list of times in milliseconds. An empty list yields all zeros.
    pub fn from_times(mut times: Vec<f64>) -> Self {
        let n = times.len();
        if n == 0 {
            return Self {
                runs: 0,
                mean_ms: 0.0,
                std_dev_ms: 0.0,
                min_ms: 0.0,
                max_ms: 0.0,
                median_ms: 0.0,
            };
        }
        times.sort_by(f64::total_cmp);

        let mean = times.iter().sum::<f64>() / n as f64;
        let variance = times.iter().map(|&t| (t - mean).powi(2)).sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (times[n / 2 - 1] + times[n / 2]) / 2.0
        } else {
            times[n / 2]
        };

        Self {
            runs: n,
            mean_ms: mean,
            std_dev_ms: variance.sqrt(),
            min_ms: times[0],
            max_ms: times[n - 1],
            median_ms: median,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_fn_returns_result() {
        let (value, elapsed) = time_fn(|| (0..1000u64).sum::<u64>());
        assert_eq!(value, 499_500);
        assert!(elapsed >= Duration::ZERO);
    }

    #[test]
    fn test_benchmark_with_warmup() {
        let mut calls = 0;
        let (results, stats) = benchmark_with_warmup(3, 5, || {
            calls += 1;
            calls
        });
        assert_eq!(results, vec![4, 5, 6, 7, 8]);
        assert_eq!(stats.runs, 5);
        assert!(stats.max_ms >= stats.min_ms);
    }

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_times(vec![5.0, 1.0, 4.0, 2.0, 3.0]);
        assert!((stats.mean_ms - 3.0).abs() < 1e-12);
        assert!((stats.median_ms - 3.0).abs() < 1e-12);
        assert_eq!(stats.min_ms, 1.0);
        assert_eq!(stats.max_ms, 5.0);
        assert!((stats.std_dev_ms - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_benchmark_stats_empty() {
        assert_eq!(BenchmarkStats::from_times(Vec::new()).runs, 0);
    }
}
