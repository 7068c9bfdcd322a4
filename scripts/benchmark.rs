// scripts/benchmark.rs
use mc_pricer::analytics::bs_analytic;
use mc_pricer::math_utils::{BenchmarkResult, Timer};
use mc_pricer::mc::{price, price_parallel, OptionType, PricingRequest};
use mc_pricer::rng::NormalRng;
use mc_pricer::{ModelParams, PricerResult};
use std::env;

#[derive(Debug)]
struct SystemInfo {
    os: String,
    cpu_cores: usize,
    rayon_threads: usize,
}

impl SystemInfo {
    fn gather() -> Self {
        Self {
            os: env::consts::OS.to_string(),
            cpu_cores: num_cpus::get(),
            rayon_threads: rayon::current_num_threads(),
        }
    }
}

fn thread_counts(max_threads: usize) -> Vec<usize> {
    let mut counts = Vec::new();
    let mut n = 1;
    while n < max_threads {
        counts.push(n);
        n *= 2;
    }
    counts.push(max_threads.max(1));
    counts
}

fn print_row(label: &str, bench: &BenchmarkResult, price: f64, std_error: f64, baseline: f64) {
    println!(
        "{:<12} {:>8} {:>12.4} {:>14.0} {:>10.1} {:>8.2}x   {:.6} ± {:.6}",
        label,
        bench.num_threads,
        bench.time_seconds * 1000.0,
        bench.paths_per_second,
        bench.nanoseconds_per_path,
        baseline / bench.time_seconds,
        price,
        std_error
    );
}

fn run() -> PricerResult<()> {
    let args: Vec<String> = env::args().collect();
    let n_paths: usize = args.get(1).and_then(|a| a.parse().ok()).unwrap_or(2_000_000);
    let system = SystemInfo::gather();
    let max_threads: usize = args
        .get(2)
        .and_then(|a| a.parse().ok())
        .unwrap_or(system.cpu_cores);

    println!("Monte Carlo European Option Benchmark");
    println!("=====================================");
    println!("Timestamp:      {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("OS:             {}", system.os);
    println!("CPU cores:      {}", system.cpu_cores);
    println!("Rayon threads:  {}", system.rayon_threads);
    println!("Paths:          {}", n_paths);

    let params = ModelParams::default();
    let analytic = bs_analytic::analytical_price(&params, OptionType::Call);
    println!("Black-Scholes:  {:.6}\n", analytic);

    let request = PricingRequest {
        params,
        n_paths,
        ..Default::default()
    };

    println!(
        "{:<12} {:>8} {:>12} {:>14} {:>10} {:>9}   {}",
        "Mode", "Threads", "Time (ms)", "Paths/s", "ns/path", "Speedup", "Price"
    );

    let mut rng = NormalRng::new(0);
    let timer = Timer::new();
    let single = price(&mut rng, &request)?;
    let baseline = BenchmarkResult::new(n_paths, 1, timer.elapsed_seconds());
    tracing::debug!(elapsed_ms = timer.elapsed_ms(), "single-threaded run finished");
    print_row("single", &baseline, single.price, single.std_error, baseline.time_seconds);

    for threads in thread_counts(max_threads) {
        let timer = Timer::new();
        let result = price_parallel(&PricingRequest {
            n_threads: threads,
            ..request.clone()
        })?;
        let bench = BenchmarkResult::new(n_paths, threads, timer.elapsed_seconds());
        print_row("parallel", &bench, result.price, result.std_error, baseline.time_seconds);
    }

    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run() {
        tracing::error!(error = %e, "benchmark failed");
        std::process::exit(1);
    }
}
