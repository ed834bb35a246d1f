use crate::binary_tree::Tree;
use rand::Rng;
use std::fmt;
use std::time::{Duration, Instant};

pub const DEFAULT_SIZES: [usize; 4] = [100, 1_000, 10_000, 100_000];
pub const DEFAULT_DOMAIN_FACTOR: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub sizes: Vec<usize>,
    /// Keys for a batch of `n` are drawn from `0..n * domain_factor`.
    pub domain_factor: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchTiming {
    pub size: usize,
    pub inserted: usize,
    pub elapsed: Duration,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            sizes: DEFAULT_SIZES.to_vec(),
            domain_factor: DEFAULT_DOMAIN_FACTOR,
        }
    }
}

/// Runs one batch per configured size against the same tree, with tracing
/// switched off for the duration of the run.
pub fn run_benchmark<R: Rng + ?Sized>(
    tree: &mut Tree<i64>,
    config: &BenchConfig,
    rng: &mut R,
) -> Vec<BatchTiming> {
    let verbose = tree.is_verbose();
    tree.set_verbose(false);

    let mut timings = Vec::with_capacity(config.sizes.len());
    for &size in &config.sizes {
        timings.push(run_batch(tree, size, config.domain_factor, rng));
    }

    tree.set_verbose(verbose);
    timings
}

fn run_batch<R: Rng + ?Sized>(
    tree: &mut Tree<i64>,
    size: usize,
    domain_factor: usize,
    rng: &mut R,
) -> BatchTiming {
    let upper = i64::try_from(size.saturating_mul(domain_factor))
        .unwrap_or(i64::MAX)
        .max(1);
    let mut inserted = 0;

    let start = Instant::now();
    for _ in 0..size {
        if tree.add(rng.random_range(0..upper)) {
            inserted += 1;
        }
    }
    let elapsed = Instant::now().saturating_duration_since(start);

    log::debug!(
        "batch of {size}: {inserted} new keys, tree now {} keys deep {}",
        tree.len(),
        tree.height()
    );
    BatchTiming {
        size,
        inserted,
        elapsed,
    }
}

impl fmt::Display for BatchTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added {} elements in {:.3} ms",
            self.size,
            self.elapsed.as_secs_f64() * 1000.0
        )
    }
}
