// src/mc/summary.rs
//! Partial sums produced by one worker (or by the single-threaded loop)
//!
//! A summary holds only running sums, never per-path data, so merging the
//! results of many workers is field-wise addition done once after the join.

use ndarray::ArrayView1;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// One independent estimate: a discounted payoff (or the average of an
/// antithetic pair) and the matching discounted control payoff.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Sample {
    pub value: f64,
    pub control: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PartialSummary {
    /// Σ Y
    pub sum: f64,
    /// Σ Y²
    pub sum_sq: f64,
    /// Σ X, zero when no control payoff is simulated
    pub control_sum: f64,
    /// Σ (Y - X)
    pub diff_sum: f64,
    /// Σ (Y - X)²
    pub diff_sum_sq: f64,
    /// Number of independent estimates (pairs count once)
    pub count: usize,
}

impl PartialSummary {
    #[inline]
    pub fn record(&mut self, sample: Sample) {
        let diff = sample.value - sample.control;
        self.sum += sample.value;
        self.sum_sq += sample.value * sample.value;
        self.control_sum += sample.control;
        self.diff_sum += diff;
        self.diff_sum_sq += diff * diff;
        self.count += 1;
    }

    /// Record a batch of estimates; `controls`, when given, has the same length
    pub fn record_batch(&mut self, values: ArrayView1<f64>, controls: Option<ArrayView1<f64>>) {
        self.sum += values.sum();
        self.sum_sq += values.dot(&values);
        match controls {
            Some(controls) => {
                let diffs = &values - &controls;
                self.control_sum += controls.sum();
                self.diff_sum += diffs.sum();
                self.diff_sum_sq += diffs.dot(&diffs);
            }
            None => {
                self.diff_sum += values.sum();
                self.diff_sum_sq += values.dot(&values);
            }
        }
        self.count += values.len();
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl AddAssign for PartialSummary {
    fn add_assign(&mut self, other: Self) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.control_sum += other.control_sum;
        self.diff_sum += other.diff_sum;
        self.diff_sum_sq += other.diff_sum_sq;
        self.count += other.count;
    }
}

impl Add for PartialSummary {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for PartialSummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(PartialSummary::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_record_tracks_all_sums() {
        let mut summary = PartialSummary::default();
        summary.record(Sample { value: 3.0, control: 1.0 });
        summary.record(Sample { value: 5.0, control: 4.0 });

        assert_eq!(summary.count, 2);
        assert_eq!(summary.sum, 8.0);
        assert_eq!(summary.sum_sq, 34.0);
        assert_eq!(summary.control_sum, 5.0);
        assert_eq!(summary.diff_sum, 3.0);
        assert_eq!(summary.diff_sum_sq, 5.0);
    }

    #[test]
    fn test_batch_matches_individual_records() {
        let values = array![1.5, 0.0, 2.25, 7.0];
        let controls = array![1.0, 0.5, 2.0, 6.0];

        let mut one_by_one = PartialSummary::default();
        for (&value, &control) in values.iter().zip(controls.iter()) {
            one_by_one.record(Sample { value, control });
        }

        let mut batched = PartialSummary::default();
        batched.record_batch(values.view(), Some(controls.view()));

        assert_eq!(batched.count, one_by_one.count);
        assert_abs_diff_eq!(batched.sum, one_by_one.sum, epsilon = 1e-12);
        assert_abs_diff_eq!(batched.sum_sq, one_by_one.sum_sq, epsilon = 1e-12);
        assert_abs_diff_eq!(batched.control_sum, one_by_one.control_sum, epsilon = 1e-12);
        assert_abs_diff_eq!(batched.diff_sum_sq, one_by_one.diff_sum_sq, epsilon = 1e-12);
    }

    #[test]
    fn test_batch_without_control() {
        let values = array![2.0, 4.0];
        let mut summary = PartialSummary::default();
        summary.record_batch(values.view(), None);

        assert_eq!(summary.control_sum, 0.0);
        assert_eq!(summary.diff_sum, summary.sum);
        assert_eq!(summary.diff_sum_sq, summary.sum_sq);
    }

    #[test]
    fn test_merge_is_fieldwise_addition() {
        let a = PartialSummary { sum: 1.0, sum_sq: 2.0, control_sum: 3.0, diff_sum: 4.0, diff_sum_sq: 5.0, count: 6 };
        let b = PartialSummary { sum: 10.0, sum_sq: 20.0, control_sum: 30.0, diff_sum: 40.0, diff_sum_sq: 50.0, count: 60 };

        let merged: PartialSummary = vec![a, b, PartialSummary::default()].into_iter().sum();
        assert_eq!(
            merged,
            PartialSummary { sum: 11.0, sum_sq: 22.0, control_sum: 33.0, diff_sum: 44.0, diff_sum_sq: 55.0, count: 66 }
        );
        assert!(PartialSummary::default().is_empty());
    }
}
