// src/mc/mc_engine.rs
use crate::analytics::bs_analytic;
use crate::error::{PricerError, PricerResult};
use crate::mc::kernel::SamplingKernel;
use crate::mc::payoffs::{OptionType, Payoff};
use crate::mc::summary::PartialSummary;
use crate::mc::worker::{plan_tasks, resolve_worker_count, run_worker};
use crate::models::ModelParams;
use crate::rng::NormalRng;
use rayon::prelude::*;
use std::f64;

/// Negative variances above this are floating-point cancellation and are
/// clamped silently; anything lower is clamped with a warning.
const VARIANCE_CANCELLATION_TOLERANCE: f64 = 1e-14;

const DEFAULT_CONFIDENCE: f64 = 0.95;

/// One estimation request. Never mutated by the engine.
#[derive(Debug, Clone)]
pub struct PricingRequest {
    pub params: ModelParams,
    pub option_type: OptionType,
    pub n_paths: usize,
    pub confidence_level: f64,
    pub use_antithetic: bool,
    pub use_control_variate: bool,
    pub control_payoff: Option<Payoff>,
    /// Known expectation of the discounted control payoff
    pub control_analytical: f64,
    /// Worker count for parallel runs, 0 = auto-detect
    pub n_threads: usize,
}

impl Default for PricingRequest {
    fn default() -> Self {
        PricingRequest {
            params: ModelParams::default(),
            option_type: OptionType::Call,
            n_paths: 100_000,
            confidence_level: DEFAULT_CONFIDENCE,
            use_antithetic: true,
            use_control_variate: false,
            control_payoff: None,
            control_analytical: 0.0,
            n_threads: 0,
        }
    }
}

impl PricingRequest {
    pub fn payoff(&self) -> Payoff {
        Payoff::new(self.option_type, self.params.k)
    }

    /// Control variate needs both the flag and a control payoff
    pub fn control_applied(&self) -> bool {
        self.use_control_variate && self.control_payoff.is_some()
    }

    /// Copy of this request priced under `params`.
    ///
    /// The control reference is recomputed for the new parameters so bumped
    /// runs stay unbiased.
    pub fn with_params(&self, params: ModelParams) -> Self {
        let control_analytical = match self.control_payoff {
            Some(control) => bs_analytic::analytical_price_for(&control, &params),
            None => self.control_analytical,
        };
        PricingRequest {
            params,
            control_analytical,
            ..self.clone()
        }
    }

    fn kernel(&self) -> SamplingKernel {
        let control = if self.control_applied() {
            self.control_payoff
        } else {
            None
        };
        SamplingKernel::new(&self.params, self.payoff(), control, self.use_antithetic)
    }
}

/// Monte Carlo estimate with confidence interval and control diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct PricingResult {
    pub price: f64,
    pub std_error: f64,
    /// Raw path count requested
    pub samples: usize,
    /// Independent estimates behind `price` (⌈samples/2⌉ with antithetic pairing)
    pub effective_samples: usize,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub confidence_level: f64,
    pub control_payoff_mc: f64,
    pub control_payoff_analytical: f64,
    pub control_variate_used: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnginePhase {
    Idle,
    Running,
    Reducing,
    Done,
}

/// Tracks one estimation call through `Idle → Running → Reducing → Done`
#[derive(Debug)]
struct EngineRun {
    phase: EnginePhase,
}

impl EngineRun {
    fn new() -> Self {
        EngineRun {
            phase: EnginePhase::Idle,
        }
    }

    fn advance(&mut self, next: EnginePhase) {
        let valid = matches!(
            (self.phase, next),
            (EnginePhase::Idle, EnginePhase::Running)
                | (EnginePhase::Running, EnginePhase::Reducing)
                | (EnginePhase::Reducing, EnginePhase::Done)
        );
        debug_assert!(valid, "invalid engine transition {:?} -> {:?}", self.phase, next);
        tracing::trace!(from = ?self.phase, to = ?next, "engine phase");
        self.phase = next;
    }
}

/// z-value for a two-sided interval, and the confidence level actually used.
///
/// 0.90, 0.95 and 0.99 have exact table entries. Other levels inside (0,1)
/// are kept as requested but use 1.96. Levels outside (0,1) are coerced to
/// 0.95.
pub fn z_value(confidence_level: f64) -> (f64, f64) {
    if !(confidence_level > 0.0 && confidence_level < 1.0) {
        tracing::warn!(
            requested = confidence_level,
            "confidence level outside (0, 1), using 0.95"
        );
        return (DEFAULT_CONFIDENCE, 1.96);
    }
    const TABLE: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];
    let z = TABLE
        .iter()
        .find(|(level, _)| (confidence_level - level).abs() < 1e-9)
        .map_or(1.96, |&(_, z)| z);
    (confidence_level, z)
}

/// Turn merged partial sums into a priced result
pub fn finalize(summary: &PartialSummary, request: &PricingRequest) -> PricingResult {
    let (confidence_level, z) = z_value(request.confidence_level);
    let control_used = request.control_applied();
    let n = summary.count;

    let mut result = PricingResult {
        price: 0.0,
        std_error: f64::INFINITY,
        samples: request.n_paths,
        effective_samples: n,
        ci_lower: f64::NEG_INFINITY,
        ci_upper: f64::INFINITY,
        confidence_level,
        control_payoff_mc: 0.0,
        control_payoff_analytical: if control_used { request.control_analytical } else { 0.0 },
        control_variate_used: control_used,
    };

    if n == 0 {
        return result;
    }

    let nf = n as f64;
    let mean = summary.sum / nf;

    // With β fixed at 1 the estimator is mean(Y - X) + E[X], so its
    // variance is the sample variance of Y - X.
    let (price, second_moment_sum, centre) = if control_used {
        let control_mean = summary.control_sum / nf;
        result.control_payoff_mc = control_mean;
        (
            mean + (request.control_analytical - control_mean),
            summary.diff_sum_sq,
            summary.diff_sum / nf,
        )
    } else {
        (mean, summary.sum_sq, mean)
    };
    result.price = price;

    if n > 1 {
        let mut variance = (second_moment_sum - nf * centre * centre) / (nf - 1.0);
        if variance < 0.0 {
            if variance < -VARIANCE_CANCELLATION_TOLERANCE {
                tracing::warn!(variance, "negative sample variance clamped to zero");
            }
            variance = 0.0;
        }
        result.std_error = (variance / nf).sqrt();
    }

    let half_width = z * result.std_error;
    result.ci_lower = price - half_width;
    result.ci_upper = price + half_width;
    result
}

/// Single-threaded estimate drawing from the caller's generator
///
/// # Errors
///
/// Only structurally invalid model inputs (non-positive spot or strike,
/// non-finite values) are rejected. Zero paths, zero volatility and expired
/// options return well-defined results.
pub fn price(rng: &mut NormalRng, request: &PricingRequest) -> PricerResult<PricingResult> {
    request.params.validate()?;
    let mut run = EngineRun::new();
    let kernel = request.kernel();

    run.advance(EnginePhase::Running);
    let summary = kernel.run(request.n_paths, rng);

    run.advance(EnginePhase::Reducing);
    let result = finalize(&summary, request);

    run.advance(EnginePhase::Done);
    tracing::debug!(
        paths = request.n_paths,
        price = result.price,
        std_error = result.std_error,
        "single-threaded estimate"
    );
    Ok(result)
}

/// Parallel estimate over independently seeded workers
///
/// Blocks until every worker has returned. A panicking worker aborts the
/// whole call.
///
/// # Errors
///
/// As [`price`], plus [`PricerError::ThreadPool`] if the worker pool cannot
/// be started.
pub fn price_parallel(request: &PricingRequest) -> PricerResult<PricingResult> {
    request.params.validate()?;
    let mut run = EngineRun::new();
    let kernel = request.kernel();
    let workers = resolve_worker_count(request.n_threads);
    let tasks = plan_tasks(request.n_paths, workers, request.use_antithetic);

    tracing::debug!(workers, paths = request.n_paths, "starting parallel estimate");

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| PricerError::ThreadPool {
            threads: workers,
            reason: e.to_string(),
        })?;

    run.advance(EnginePhase::Running);
    let partials: Vec<PartialSummary> = pool.install(|| {
        tasks
            .par_iter()
            .map(|&task| run_worker(&kernel, task))
            .collect()
    });

    run.advance(EnginePhase::Reducing);
    let summary: PartialSummary = partials.into_iter().sum();
    let result = finalize(&summary, request);

    run.advance(EnginePhase::Done);
    tracing::debug!(
        workers,
        price = result.price,
        std_error = result.std_error,
        "parallel estimate"
    );
    Ok(result)
}
