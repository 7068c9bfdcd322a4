// src/mc/worker.rs
//! Work partitioning for the parallel engine
//!
//! Each worker owns its generator, its buffers and its [`PartialSummary`].
//! The only thing workers share is a `&SamplingKernel`, which is read-only.

use crate::mc::kernel::SamplingKernel;
use crate::mc::summary::PartialSummary;
use crate::rng::{entropy_seed, NormalRng};

/// Worker count used when hardware detection reports zero cores
pub const FALLBACK_WORKERS: usize = 4;

/// Explicit count, else detected cores, else [`FALLBACK_WORKERS`]
pub fn resolve_worker_count(requested: usize) -> usize {
    if requested > 0 {
        return requested;
    }
    match num_cpus::get() {
        0 => FALLBACK_WORKERS,
        detected => detected,
    }
}

/// Split `n_paths` over `workers`: everyone gets `n / w`, the first `n % w`
/// get one more. Every path is assigned exactly once.
pub fn split_paths(n_paths: usize, workers: usize) -> Vec<usize> {
    let workers = workers.max(1);
    let base = n_paths / workers;
    let extra = n_paths % workers;
    (0..workers)
        .map(|i| if i < extra { base + 1 } else { base })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerTask {
    pub id: usize,
    pub n_paths: usize,
    pub seed: u64,
}

/// Path counts per worker for one run.
///
/// With antithetic pairing the split is done in whole pairs and an odd
/// leftover path goes to the first worker, so the merged run still has
/// exactly ⌈n/2⌉ independent estimates.
pub fn split_for_run(n_paths: usize, workers: usize, use_antithetic: bool) -> Vec<usize> {
    if !use_antithetic {
        return split_paths(n_paths, workers);
    }
    let mut split: Vec<usize> = split_paths(n_paths / 2, workers)
        .into_iter()
        .map(|pairs| 2 * pairs)
        .collect();
    split[0] += n_paths % 2;
    split
}

/// One task per worker, each with an independent entropy-derived seed
pub fn plan_tasks(n_paths: usize, workers: usize, use_antithetic: bool) -> Vec<WorkerTask> {
    split_for_run(n_paths, workers, use_antithetic)
        .into_iter()
        .enumerate()
        .map(|(id, n_paths)| WorkerTask {
            id,
            n_paths,
            seed: entropy_seed(),
        })
        .collect()
}

/// Run one task on a private generator. A zero path count yields an empty summary.
pub fn run_worker(kernel: &SamplingKernel, task: WorkerTask) -> PartialSummary {
    let mut rng = NormalRng::new(task.seed);
    let summary = kernel.run_batched(task.n_paths, &mut rng);
    tracing::trace!(
        worker = task.id,
        paths = task.n_paths,
        estimates = summary.count,
        "worker finished"
    );
    summary
}
