//! Line-ratio matching engine and redshift estimation.
//!
//! This module provides the core matching functionality:
//!
//! - [`RatioMatcher`]: Main entry point, runs the full pipeline
//! - [`Candidate`]: An observed pair identified with a calibration pair
//! - [`RedshiftOutcome`]: Aggregate redshift, or why there is none
//!
//! ## Matching Algorithm
//!
//! The pipeline is a single deterministic pass:
//!
//! 1. **Enumerate**: All n(n-1)/2 ratios of each sequence, in input order
//! 2. **Match**: Every calibration ratio (outer) against every observed ratio
//!    (inner); a match is `|obs - cal| / cal <= tolerance`
//! 3. **Evaluate**: Per-line redshifts `obs / rest - 1` and their mean,
//!    filtered by an inclusive window (default `[0, 10]`)
//! 4. **Aggregate**: Mean and population standard deviation of the individual
//!    line redshifts of every accepted candidate
//!
//! Ambiguous identifications are surfaced, never resolved: one observed pair may
//! match several calibration pairs.
//!
//! ## Example
//!
//! ```rust
//! use line_ratio::matching::{match_lines, RedshiftOptions};
//!
//! let names = ["O II", "Hβ", "O III-1", "O III-2", "Hα"];
//! let rest = [3726.03, 4861.33, 4958.92, 5006.84, 6563.0];
//! let observed = [5419.57, 7067.71, 7209.96, 7279.55, 9538.86];
//!
//! let (redshift, records) =
//!     match_lines(&names, &rest, &observed, 0.003, &RedshiftOptions::enabled()).unwrap();
//!
//! assert_eq!(records.len(), 10);
//! assert!((redshift.mean().unwrap() - 0.4539).abs() < 1e-3);
//! ```

pub mod candidate;
pub mod engine;
pub mod redshift;
pub mod report;

pub use candidate::{Candidate, CandidateRecord};
pub use engine::{
    match_lines, match_lines_reporting, DuplicateNamePolicy, MatchError, MatchOutcome,
    MatchingConfig, RatioMatcher,
};
pub use redshift::{AggregateRedshift, RedshiftEstimate, RedshiftOptions, RedshiftOutcome};
