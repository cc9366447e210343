//! Human-readable report lines.
//!
//! These sentences are a compatibility surface: users parse them, so the
//! templates and decimal precisions must stay stable.

use crate::matching::candidate::Candidate;
use crate::matching::redshift::{AggregateRedshift, RedshiftEstimate, RedshiftOutcome};

/// One accepted ratio match. Ratios use 6 decimals.
pub fn format_match(candidate: &Candidate) -> String {
    format!(
        "Lines {} & {}: ratio {:.6} matches {}: ratio {:.6}",
        candidate.observed.0,
        candidate.observed.1,
        candidate.observed_ratio,
        candidate.calibration_label(),
        candidate.calibration_ratio,
    )
}

/// One candidate accepted by the redshift window. Redshift uses 4 decimals,
/// wavelengths 2.
pub fn format_redshift(candidate: &Candidate, estimate: &RedshiftEstimate) -> String {
    format!(
        "z = {:.4} for {:.2} & {:.2} as {} & {}",
        estimate.z_mean,
        candidate.observed_wavelengths.0,
        candidate.observed_wavelengths.1,
        candidate.names.0,
        candidate.names.1,
    )
}

/// Final aggregate line
pub fn format_aggregate(aggregate: &AggregateRedshift) -> String {
    format!(
        "Mean redshift: z = {:.4} ± {:.4} ({} candidates)",
        aggregate.mean, aggregate.std_dev, aggregate.candidates
    )
}

/// Summary line for a redshift outcome; `None` when redshift mode was off
pub fn format_outcome(outcome: &RedshiftOutcome) -> Option<String> {
    match outcome {
        RedshiftOutcome::NotComputed => None,
        RedshiftOutcome::NoValidCandidates { z_low, z_high } => Some(format!(
            "No valid redshift candidates in [{z_low}, {z_high}]"
        )),
        RedshiftOutcome::Estimated(aggregate) => Some(format_aggregate(aggregate)),
    }
}
