//! Throughput harness: timed put/get phases against either cache variant

use std::sync::Arc;
use std::thread;
use std::time::Instant;

use anyhow::{anyhow, ensure, Result};
use clap::ValueEnum;
use lrucache::{BlockingLruCache, LruCache};
use serde::Serialize;
use tracing::{debug, info};

/// Which cache implementation to drive
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Non-blocking `LruCache`
    Plain,
    /// `BlockingLruCache`
    Blocking,
    /// Run both, plain first
    Both,
}

/// Benchmark settings
#[derive(clap::Args, Debug, Clone)]
pub struct BenchArgs {
    /// Cache capacity (number of items); keys cycle through 0..capacity
    #[arg(short, long, default_value_t = 10_000)]
    pub capacity: usize,

    /// Operations per timed phase
    #[arg(short, long, default_value_t = 1_000_000)]
    pub ops: u64,

    /// Untimed puts and gets run before measuring
    #[arg(short, long, default_value_t = 100_000)]
    pub warmup: u64,

    /// Threads for the mixed workload
    #[arg(short, long, default_value_t = 2)]
    pub threads: usize,

    /// Cache variant to benchmark
    #[arg(long, value_enum, default_value_t = Variant::Both)]
    pub variant: Variant,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of one timed phase
#[derive(Debug, Serialize)]
pub struct PhaseReport {
    pub phase: &'static str,
    pub ops: u64,
    pub elapsed_secs: f64,
    pub ops_per_sec: f64,
}

/// All phases for one cache variant
#[derive(Debug, Serialize)]
pub struct VariantReport {
    pub variant: &'static str,
    pub capacity: usize,
    pub threads: usize,
    pub hit_ratio: f64,
    pub phases: Vec<PhaseReport>,
}

/// Operations the harness needs from a cache
trait BenchCache: Send + Sync {
    fn put(&self, key: u64, value: u64);
    fn get(&self, key: u64) -> Option<u64>;
    fn hit_ratio(&self) -> f64;
}

impl BenchCache for LruCache<u64, u64> {
    fn put(&self, key: u64, value: u64) {
        LruCache::put(self, key, value);
    }

    fn get(&self, key: u64) -> Option<u64> {
        LruCache::get(self, &key)
    }

    fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }
}

impl BenchCache for BlockingLruCache<u64, u64> {
    fn put(&self, key: u64, value: u64) {
        BlockingLruCache::put(self, key, value);
    }

    // Keys are pre-filled, so this never parks
    fn get(&self, key: u64) -> Option<u64> {
        Some(BlockingLruCache::get(self, &key))
    }

    fn hit_ratio(&self) -> f64 {
        self.stats().hit_ratio()
    }
}

/// Run the configured benchmark and return one report per variant
pub fn run(args: &BenchArgs) -> Result<Vec<VariantReport>> {
    ensure!(args.ops > 0, "ops must be greater than 0");
    ensure!(args.threads > 0, "threads must be greater than 0");

    let mut reports = Vec::new();

    if matches!(args.variant, Variant::Plain | Variant::Both) {
        let cache = Arc::new(LruCache::<u64, u64>::new(args.capacity)?);
        reports.push(run_variant("plain", cache, args)?);
    }

    if matches!(args.variant, Variant::Blocking | Variant::Both) {
        let cache = Arc::new(BlockingLruCache::<u64, u64>::new(args.capacity)?);
        reports.push(run_variant("blocking", cache, args)?);
    }

    Ok(reports)
}

fn run_variant<C: BenchCache + 'static>(
    name: &'static str,
    cache: Arc<C>,
    args: &BenchArgs,
) -> Result<VariantReport> {
    let capacity = args.capacity as u64;
    info!("Benchmarking {} cache (capacity {})", name, capacity);

    // Every key the phases touch is resident from here on
    for key in 0..capacity {
        cache.put(key, key);
    }

    for i in 0..args.warmup {
        cache.put(i % capacity, i);
    }
    for i in 0..args.warmup {
        std::hint::black_box(cache.get(i % capacity));
    }
    debug!("Warm-up done ({} puts, {} gets)", args.warmup, args.warmup);

    let mut phases = Vec::with_capacity(3);

    let start = Instant::now();
    for i in 0..args.ops {
        cache.put(i % capacity, i);
    }
    phases.push(phase_report("single_thread_put", args.ops, start));

    let start = Instant::now();
    for i in 0..args.ops {
        std::hint::black_box(cache.get(i % capacity));
    }
    phases.push(phase_report("single_thread_get", args.ops, start));

    let per_thread = args.ops / args.threads as u64;
    let start = Instant::now();
    let handles: Vec<_> = (0..args.threads)
        .map(|_| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..per_thread {
                    if i % 2 == 0 {
                        cache.put(i % capacity, i);
                    } else {
                        std::hint::black_box(cache.get(i % capacity));
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow!("benchmark worker panicked"))?;
    }
    phases.push(phase_report(
        "multi_thread_mixed",
        per_thread * args.threads as u64,
        start,
    ));

    Ok(VariantReport {
        variant: name,
        capacity: args.capacity,
        threads: args.threads,
        hit_ratio: cache.hit_ratio(),
        phases,
    })
}

fn phase_report(phase: &'static str, ops: u64, start: Instant) -> PhaseReport {
    let elapsed_secs = start.elapsed().as_secs_f64();
    let ops_per_sec = if elapsed_secs > 0.0 {
        ops as f64 / elapsed_secs
    } else {
        0.0
    };

    info!("{}: {} ops in {:.3}s", phase, ops, elapsed_secs);

    PhaseReport {
        phase,
        ops,
        elapsed_secs,
        ops_per_sec,
    }
}

/// Human-readable rendering of the reports
pub fn render(reports: &[VariantReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!(
            "{} cache (capacity {}, {} threads, hit ratio {:.2})\n",
            report.variant, report.capacity, report.threads, report.hit_ratio
        ));
        for phase in &report.phases {
            out.push_str(&format!(
                "  {:<20} {:>12} ops  {:>8.3}s  {:>14.2} ops/sec\n",
                phase.phase, phase.ops, phase.elapsed_secs, phase.ops_per_sec
            ));
        }
    }
    out
}
