use serde::Serialize;

use crate::core::types::LineId;

/// An observed line pair whose wavelength ratio agrees with a calibration
/// pair's ratio within tolerance.
///
/// A single observed pair may appear in several candidates (and vice versa);
/// repeated identifications are the signal an analyst uses to judge how
/// trustworthy a candidate set is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    /// 1-based observed line indices, `first < second`
    pub observed: (usize, usize),

    /// Catalog positions of the calibration lines
    pub calibration: (LineId, LineId),

    /// Calibration line names, in the same order as `calibration`
    pub names: (String, String),

    /// Observed wavelengths of the two lines
    pub observed_wavelengths: (f64, f64),

    /// Rest-frame wavelengths of the two calibration lines
    pub calibration_wavelengths: (f64, f64),

    pub observed_ratio: f64,
    pub calibration_ratio: f64,

    /// `|observed_ratio - calibration_ratio| / calibration_ratio`
    pub relative_error: f64,
}

impl Candidate {
    /// Human-readable calibration pair label, e.g. "O II / Hβ"
    pub fn calibration_label(&self) -> String {
        format!("{} / {}", self.names.0, self.names.1)
    }

    /// The output record for this candidate
    pub fn to_record(&self) -> CandidateRecord {
        CandidateRecord {
            observed_wavelengths: self.observed_wavelengths,
            calibration_wavelengths: self.calibration_wavelengths,
            names: self.names.clone(),
        }
    }
}

/// Accepted candidate as returned to callers: the observed wavelength pair,
/// the calibration wavelength pair, and the calibration name pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateRecord {
    pub observed_wavelengths: (f64, f64),
    pub calibration_wavelengths: (f64, f64),
    pub names: (String, String),
}
