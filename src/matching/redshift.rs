use serde::{Deserialize, Serialize};

use crate::matching::candidate::Candidate;

/// Default lower bound of the redshift acceptance window
pub const DEFAULT_Z_LOW: f64 = 0.0;

/// Default upper bound of the redshift acceptance window
pub const DEFAULT_Z_HIGH: f64 = 10.0;

/// Safely convert usize to f64 for averaging
#[inline]
fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}

/// Redshift evaluation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedshiftOptions {
    /// Compute per-candidate and aggregate redshifts
    pub compute: bool,
    /// Inclusive lower bound on a candidate's mean redshift
    pub z_low: f64,
    /// Inclusive upper bound on a candidate's mean redshift
    pub z_high: f64,
}

impl Default for RedshiftOptions {
    fn default() -> Self {
        Self {
            compute: false,
            z_low: DEFAULT_Z_LOW,
            z_high: DEFAULT_Z_HIGH,
        }
    }
}

impl RedshiftOptions {
    /// Redshift mode on, default window
    pub fn enabled() -> Self {
        Self {
            compute: true,
            ..Self::default()
        }
    }

    /// Redshift mode on with a custom window
    pub fn window(z_low: f64, z_high: f64) -> Self {
        Self {
            compute: true,
            z_low,
            z_high,
        }
    }

    /// Whether `z` falls inside the inclusive window
    pub fn contains(&self, z: f64) -> bool {
        self.z_low <= z && z <= self.z_high
    }
}

/// Redshift of a single observed line identified as a rest-frame line
#[inline]
#[must_use]
pub fn line_redshift(observed: f64, rest: f64) -> f64 {
    observed / rest - 1.0
}

/// Redshifts implied by one candidate identification
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RedshiftEstimate {
    /// From the first line of the pair
    pub z_first: f64,
    /// From the second line of the pair
    pub z_second: f64,
    /// Mean of the two
    pub z_mean: f64,
}

impl RedshiftEstimate {
    pub fn from_candidate(candidate: &Candidate) -> Self {
        let z_first = line_redshift(
            candidate.observed_wavelengths.0,
            candidate.calibration_wavelengths.0,
        );
        let z_second = line_redshift(
            candidate.observed_wavelengths.1,
            candidate.calibration_wavelengths.1,
        );

        Self {
            z_first,
            z_second,
            z_mean: (z_first + z_second) / 2.0,
        }
    }
}

/// Outcome of evaluating one candidate against the redshift window
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RedshiftEvaluation {
    /// Position of the candidate in the matcher's output
    pub candidate: usize,
    pub estimate: RedshiftEstimate,
    pub accepted: bool,
}

/// Estimate and window-test every candidate, preserving candidate order.
pub fn evaluate_candidates(
    candidates: &[Candidate],
    options: &RedshiftOptions,
) -> Vec<RedshiftEvaluation> {
    candidates
        .iter()
        .enumerate()
        .map(|(i, candidate)| {
            let estimate = RedshiftEstimate::from_candidate(candidate);
            RedshiftEvaluation {
                candidate: i,
                estimate,
                accepted: options.contains(estimate.z_mean),
            }
        })
        .collect()
}

/// Mean and population standard deviation of the individual line redshifts
/// of all accepted candidates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateRedshift {
    pub mean: f64,
    pub std_dev: f64,
    /// Number of accepted candidates
    pub candidates: usize,
    /// Number of individual line redshifts pooled (two per candidate)
    pub samples: usize,
}

impl AggregateRedshift {
    /// Pool the two per-line redshifts of each accepted evaluation.
    ///
    /// Returns `None` when nothing was accepted, since the mean of an empty
    /// pool is undefined.
    pub fn from_evaluations(evaluations: &[RedshiftEvaluation]) -> Option<Self> {
        let values: Vec<f64> = evaluations
            .iter()
            .filter(|e| e.accepted)
            .flat_map(|e| [e.estimate.z_first, e.estimate.z_second])
            .collect();

        let (mean, std_dev) = mean_and_std_dev(&values)?;

        Some(Self {
            mean,
            std_dev,
            candidates: values.len() / 2,
            samples: values.len(),
        })
    }
}

/// Redshift result of a matching run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RedshiftOutcome {
    /// Redshift mode was off
    NotComputed,
    /// Redshift mode was on but no candidate fell inside the window
    NoValidCandidates { z_low: f64, z_high: f64 },
    /// Aggregate over the accepted candidates
    Estimated(AggregateRedshift),
}

impl RedshiftOutcome {
    /// Aggregate mean redshift, if one was computed
    pub fn mean(&self) -> Option<f64> {
        match self {
            Self::Estimated(aggregate) => Some(aggregate.mean),
            _ => None,
        }
    }
}

/// Mean and population standard deviation, `None` for an empty slice
#[must_use]
pub fn mean_and_std_dev(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }

    let n = count_to_f64(values.len());
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some((mean, variance.sqrt()))
}
