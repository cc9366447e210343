//! # line-ratio
//!
//! A library for identifying emission lines in observed astronomical spectra.
//!
//! A redshift stretches every wavelength in a spectrum by the same factor, so
//! the ratio between two lines is the same in the observed spectrum as in the
//! rest frame. Matching observed ratios against the ratios of a catalog of
//! rest-frame lines identifies line pairs without knowing the redshift first.
//!
//! `line-ratio` enumerates every pairwise ratio on both sides, reports every
//! observed pair whose ratio agrees with a catalog pair within a relative
//! tolerance, and optionally derives a redshift from each identification.
//!
//! ## Features
//!
//! - **Exhaustive matching**: Every catalog pair against every observed pair
//! - **Ambiguity surfaced**: One observed pair may match several catalog pairs
//! - **Redshift estimation**: Per-match redshift, window filtering, and an aggregate with spread
//! - **Embedded catalogs**: Air and vacuum rest-frame line lists
//!
//! ## Example
//!
//! ```rust
//! use line_ratio::{LineCatalog, MatchingConfig, ObservedLine, RatioMatcher, RedshiftOptions};
//!
//! let catalog = LineCatalog::load_embedded().unwrap();
//! let air = catalog.get("air").unwrap();
//!
//! let observed = ObservedLine::from_wavelengths(&[5419.57, 7067.71, 7209.96, 7279.55, 9538.86]);
//!
//! let config = MatchingConfig::with_tolerance(0.001).redshift(RedshiftOptions::enabled());
//! let outcome = RatioMatcher::new(config).run(&air.lines, &observed).unwrap();
//!
//! for line in outcome.report_lines() {
//!     println!("{line}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`catalog`]: Calibration line lists, embedded and custom
//! - [`core`]: Core data types for lines and ratio pairs
//! - [`matching`]: Ratio matcher, redshift evaluation, and report lines
//! - [`parsing`]: Parsers for observed and calibration line tables
//! - [`cli`]: Command-line interface implementation

pub mod catalog;
pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::catalog::store::{LineCatalog, LineList};
pub use crate::core::line::{CalibrationLine, ObservedLine};
pub use crate::core::ratio::RatioPair;
pub use crate::core::types::*;
pub use crate::matching::{
    match_lines, match_lines_reporting, MatchError, MatchOutcome, MatchingConfig, RatioMatcher,
    RedshiftOptions, RedshiftOutcome,
};
