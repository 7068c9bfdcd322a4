// src/math_utils.rs
use statrs::function::erf;
use std::f64::consts::{PI, SQRT_2};

pub fn norm_cdf(x: f64) -> f64 {
    0.5 * (1.0 + erf::erf(x / SQRT_2))
}

pub fn norm_pdf(x: f64) -> f64 {
    (1.0 / (2.0 * PI).sqrt()) * (-0.5 * x * x).exp()
}

pub struct Timer {
    start_time: std::time::Instant,
}

impl Timer {
    pub fn new() -> Timer {
        Timer {
            start_time: std::time::Instant::now(),
        }
    }

    pub fn start(&mut self) {
        self.start_time = std::time::Instant::now();
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_seconds() * 1000.0
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

/// Throughput figures for one timed pricing run
#[derive(Debug, Clone, Default)]
pub struct BenchmarkResult {
    pub time_seconds: f64,
    pub paths_per_second: f64,
    pub nanoseconds_per_path: f64,
    pub num_paths: usize,
    pub num_threads: usize,
}

impl BenchmarkResult {
    pub fn new(num_paths: usize, num_threads: usize, time_seconds: f64) -> Self {
        let mut result = Self {
            time_seconds,
            num_paths,
            num_threads,
            ..Default::default()
        };
        result.compute_metrics();
        result
    }

    /// Derived rates stay at zero for an empty or untimed run
    pub fn compute_metrics(&mut self) {
        if self.time_seconds > 0.0 && self.num_paths > 0 {
            self.paths_per_second = self.num_paths as f64 / self.time_seconds;
            self.nanoseconds_per_path = self.time_seconds * 1e9 / self.num_paths as f64;
        }
    }
}
