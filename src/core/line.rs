use serde::{Deserialize, Serialize};

use crate::core::types::LineId;

/// Anything with a wavelength and a label identifying it inside its sequence.
///
/// Ratio enumeration is written against this trait so the calibration side
/// (labelled by [`LineId`]) and the observed side (labelled by 1-based input
/// position) share one implementation.
pub trait SpectralLine {
    type Label: Copy;

    /// Label carried by ratio pairs built from this line
    fn label(&self) -> Self::Label;

    /// Wavelength in the same unit as the other lines of the sequence
    fn wavelength(&self) -> f64;
}

/// A rest-frame reference line from a calibration catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationLine {
    /// Line name, e.g. "Hβ" or "O III-2". Not necessarily unique.
    pub name: String,

    /// Rest-frame wavelength (Ångström in the embedded catalog)
    pub wavelength: f64,

    /// Position in the catalog, assigned when the catalog is assembled
    #[serde(skip)]
    pub id: LineId,
}

impl CalibrationLine {
    pub fn new(id: LineId, name: impl Into<String>, wavelength: f64) -> Self {
        Self {
            name: name.into(),
            wavelength,
            id,
        }
    }

    /// Build an ordered catalog from parallel name and wavelength slices.
    ///
    /// Lengths are checked by the caller; extra entries on either side are ignored.
    pub fn from_parallel(names: &[impl AsRef<str>], wavelengths: &[f64]) -> Vec<Self> {
        names
            .iter()
            .zip(wavelengths)
            .enumerate()
            .map(|(i, (name, &wavelength))| Self::new(LineId::new(i), name.as_ref(), wavelength))
            .collect()
    }
}

impl SpectralLine for CalibrationLine {
    type Label = LineId;

    fn label(&self) -> LineId {
        self.id
    }

    fn wavelength(&self) -> f64 {
        self.wavelength
    }
}

/// A measured line in an observed spectrum
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedLine {
    /// 1-based position in the input order
    pub index: usize,

    /// Observed wavelength
    pub wavelength: f64,
}

impl ObservedLine {
    pub fn new(index: usize, wavelength: f64) -> Self {
        Self { index, wavelength }
    }

    /// Number a flat list of wavelengths from 1 in input order
    pub fn from_wavelengths(wavelengths: &[f64]) -> Vec<Self> {
        wavelengths
            .iter()
            .enumerate()
            .map(|(i, &w)| Self::new(i + 1, w))
            .collect()
    }
}

impl SpectralLine for ObservedLine {
    type Label = usize;

    fn label(&self) -> usize {
        self.index
    }

    fn wavelength(&self) -> f64 {
        self.wavelength
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parallel_assigns_positions() {
        let lines =
            CalibrationLine::from_parallel(&["N II", "Hα", "N II"], &[6548.05, 6562.8, 6583.45]);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].id, LineId::new(0));
        assert_eq!(lines[2].id, LineId::new(2));
        assert_eq!(lines[2].name, "N II");
        assert!((lines[2].wavelength - 6583.45).abs() < 1e-9);
    }

    #[test]
    fn test_observed_indices_are_one_based() {
        let lines = ObservedLine::from_wavelengths(&[5419.57, 7067.71]);
        assert_eq!(lines[0].index, 1);
        assert_eq!(lines[1].index, 2);
        assert_eq!(lines[1].label(), 2);
    }

    #[test]
    fn test_calibration_line_json_skips_id() {
        let line = CalibrationLine::new(LineId::new(4), "Hβ", 4861.33);
        let json = serde_json::to_string(&line).unwrap();
        assert!(!json.contains("id"));

        let parsed: CalibrationLine = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "Hβ");
        assert_eq!(parsed.id, LineId::new(0));
    }
}
