use serde::{Deserialize, Serialize};

use crate::core::line::SpectralLine;

/// Wavelength ratio of two lines of the same sequence.
///
/// `first` always precedes `second` in input order, and
/// `ratio = wavelength(second) / wavelength(first)` regardless of which
/// wavelength is larger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPair<L> {
    pub first: L,
    pub second: L,
    pub ratio: f64,
}

/// Number of unordered pairs in a sequence of `n` lines: n(n-1)/2
#[must_use]
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// Enumerate every unordered pair `(i, j)`, `i < j`, of `lines`.
///
/// Iteration is `i` ascending, then `j` ascending within `i`. This order
/// determines report ordering downstream and must not change.
pub fn enumerate_ratios<T: SpectralLine>(lines: &[T]) -> Vec<RatioPair<T::Label>> {
    let mut pairs = Vec::with_capacity(pair_count(lines.len()));

    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i + 1..] {
            pairs.push(RatioPair {
                first: a.label(),
                second: b.label(),
                ratio: b.wavelength() / a.wavelength(),
            });
        }
    }

    pairs
}

/// Relative deviation of an observed ratio from a calibration ratio:
/// `|observed - calibration| / calibration`
#[inline]
#[must_use]
pub fn relative_error(observed: f64, calibration: f64) -> f64 {
    (observed - calibration).abs() / calibration
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::line::{CalibrationLine, ObservedLine};
    use crate::core::types::LineId;

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(5), 10);
        assert_eq!(pair_count(17), 136);
    }

    #[test]
    fn test_enumerate_count_matches_formula() {
        for n in 2_u32..12 {
            let wavelengths: Vec<f64> = (1..=n).map(|i| 1000.0 + f64::from(i) * 37.0).collect();
            let lines = ObservedLine::from_wavelengths(&wavelengths);
            let n = usize::try_from(n).unwrap();
            assert_eq!(enumerate_ratios(&lines).len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn test_enumerate_order_and_labels() {
        let lines = ObservedLine::from_wavelengths(&[100.0, 300.0, 200.0]);
        let pairs = enumerate_ratios(&lines);

        let labels: Vec<(usize, usize)> = pairs.iter().map(|p| (p.first, p.second)).collect();
        assert_eq!(labels, vec![(1, 2), (1, 3), (2, 3)]);

        // Input order decides the denominator, not magnitude
        assert!((pairs[0].ratio - 3.0).abs() < 1e-12);
        assert!((pairs[1].ratio - 2.0).abs() < 1e-12);
        assert!((pairs[2].ratio - 200.0 / 300.0).abs() < 1e-12);
    }

    #[test]
    fn test_enumerate_calibration_carries_line_ids() {
        let lines = CalibrationLine::from_parallel(&["S II", "S II"], &[6716.44, 6730.82]);
        let pairs = enumerate_ratios(&lines);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].first, LineId::new(0));
        assert_eq!(pairs[0].second, LineId::new(1));
    }

    #[test]
    fn test_ratios_are_redshift_invariant() {
        let rest = [3726.03, 4861.33, 4958.92, 5006.84, 6563.0];
        let calibration = CalibrationLine::from_parallel(&["a", "b", "c", "d", "e"], &rest);

        for k in [1.0, 1.4539, 2.7, 7.0] {
            let shifted: Vec<f64> = rest.iter().map(|w| w * k).collect();
            let observed = ObservedLine::from_wavelengths(&shifted);

            let cal_pairs = enumerate_ratios(&calibration);
            let obs_pairs = enumerate_ratios(&observed);
            for (c, o) in cal_pairs.iter().zip(&obs_pairs) {
                assert!(relative_error(o.ratio, c.ratio) < 1e-12);
            }
        }
    }

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.01, 1.0) - 0.01).abs() < 1e-12);
        assert!((relative_error(0.99, 1.0) - 0.01).abs() < 1e-12);
        assert!(relative_error(2.0, 2.0).abs() < f64::EPSILON);
    }
}
