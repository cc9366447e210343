//! Core data types for line-ratio matching.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`CalibrationLine`]: A rest-frame reference line with a name and wavelength
//! - [`ObservedLine`]: A measured wavelength with its 1-based position in the input
//! - [`LineId`]: Stable identity of a calibration line (its catalog position)
//! - [`RatioPair`]: The wavelength ratio of two lines, `later / earlier`
//!
//! ## Ratio Invariance
//!
//! A redshift stretches every wavelength by the same factor `1 + z`, so the
//! ratio of two observed wavelengths equals the ratio of their rest-frame
//! wavelengths:
//!
//! | Line | Rest (Å) | Observed at z = 0.4539 (Å) |
//! |------|----------|----------------------------|
//! | O II | 3726.03  | 5419.57                    |
//! | Hβ   | 4861.33  | 7067.71                    |
//! | ratio| 1.304694 | 1.304109                   |
//!
//! Calibration lines are identified by position rather than by name, since
//! catalogs legitimately repeat names for doublets (e.g. `N II`, `S II`).

pub mod line;
pub mod ratio;
pub mod types;
