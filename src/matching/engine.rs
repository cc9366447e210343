use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::core::line::{CalibrationLine, ObservedLine};
use crate::core::ratio::{enumerate_ratios, relative_error, RatioPair};
use crate::core::types::LineId;
use crate::matching::candidate::{Candidate, CandidateRecord};
use crate::matching::redshift::{
    evaluate_candidates, AggregateRedshift, RedshiftEvaluation, RedshiftOptions, RedshiftOutcome,
};
use crate::matching::report;
use crate::utils::validation::{
    validate_parallel, validate_redshift_window, validate_tolerance, validate_wavelengths, Side,
    ValidationError,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MatchError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    #[error("Calibration name '{name}' appears at positions {first} and {second}; lookup by name is ambiguous")]
    AmbiguousCalibrationName {
        name: String,
        first: usize,
        second: usize,
    },

    #[error("No candidate has a mean redshift inside [{z_low}, {z_high}]")]
    EmptyAggregate { z_low: f64, z_high: f64 },
}

/// Default relative tolerance for exploratory passes (0.3%)
pub const DEFAULT_TOLERANCE: f64 = 0.003;

/// How to treat calibration catalogs that repeat a line name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateNamePolicy {
    /// Each entry is its own line, identified by catalog position
    #[default]
    DistinctLines,
    /// Refuse catalogs with repeated names
    Reject,
}

/// Configuration for the ratio matcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Maximum relative ratio error for a match (0.001 = 0.1%)
    pub tolerance: f64,
    /// Redshift evaluation settings
    pub redshift: RedshiftOptions,
    /// Handling of repeated calibration names
    pub duplicate_names: DuplicateNamePolicy,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            redshift: RedshiftOptions::default(),
            duplicate_names: DuplicateNamePolicy::default(),
        }
    }
}

impl MatchingConfig {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn redshift(mut self, options: RedshiftOptions) -> Self {
        self.redshift = options;
        self
    }

    #[must_use]
    pub fn duplicate_names(mut self, policy: DuplicateNamePolicy) -> Self {
        self.duplicate_names = policy;
        self
    }
}

/// Everything a matching run produced
#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// Every ratio match within tolerance, calibration-pair-major order
    pub candidates: Vec<Candidate>,

    /// Redshift evaluation per candidate; empty when redshift mode is off
    pub evaluations: Vec<RedshiftEvaluation>,

    /// Accepted candidates: all of them when redshift mode is off,
    /// otherwise those inside the redshift window
    pub records: Vec<CandidateRecord>,

    pub redshift: RedshiftOutcome,
}

impl MatchOutcome {
    /// Candidates accepted by the redshift window, paired with their estimate
    pub fn accepted(&self) -> impl Iterator<Item = (&Candidate, &RedshiftEvaluation)> {
        self.evaluations
            .iter()
            .filter(|e| e.accepted)
            .map(|e| (&self.candidates[e.candidate], e))
    }

    /// The aggregate redshift.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::EmptyAggregate` if redshift mode was on and no
    /// candidate fell inside the window. Returns `Ok(None)` if redshift mode was off.
    pub fn aggregate(&self) -> Result<Option<AggregateRedshift>, MatchError> {
        match self.redshift {
            RedshiftOutcome::NotComputed => Ok(None),
            RedshiftOutcome::NoValidCandidates { z_low, z_high } => {
                Err(MatchError::EmptyAggregate { z_low, z_high })
            }
            RedshiftOutcome::Estimated(aggregate) => Ok(Some(aggregate)),
        }
    }

    /// Report lines in emission order: every ratio match, then every
    /// candidate accepted by the redshift window, then the summary.
    pub fn report_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self.candidates.iter().map(report::format_match).collect();

        lines.extend(
            self.accepted()
                .map(|(candidate, e)| report::format_redshift(candidate, &e.estimate)),
        );

        if let Some(summary) = report::format_outcome(&self.redshift) {
            lines.push(summary);
        }

        lines
    }
}

/// Matches observed line pairs to calibration line pairs by wavelength ratio
#[derive(Debug, Clone, Default)]
pub struct RatioMatcher {
    config: MatchingConfig,
}

impl RatioMatcher {
    pub fn new(config: MatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Run the full pipeline: enumerate, match, evaluate, aggregate.
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` for invalid lines or settings, or
    /// `MatchError::AmbiguousCalibrationName` under `DuplicateNamePolicy::Reject`.
    /// Both are raised before any matching happens.
    pub fn run(
        &self,
        calibration: &[CalibrationLine],
        observed: &[ObservedLine],
    ) -> Result<MatchOutcome, MatchError> {
        self.validate(calibration, observed)?;

        let calibration_pairs = enumerate_ratios(calibration);
        let observed_pairs = enumerate_ratios(observed);
        debug!(
            "Comparing {} calibration ratios against {} observed ratios",
            calibration_pairs.len(),
            observed_pairs.len()
        );

        let candidates = find_candidates(
            calibration,
            observed,
            &calibration_pairs,
            &observed_pairs,
            self.config.tolerance,
        );
        debug!(
            "{} ratio matches within tolerance {}",
            candidates.len(),
            self.config.tolerance
        );

        let options = &self.config.redshift;
        if !options.compute {
            let records = candidates.iter().map(Candidate::to_record).collect();
            return Ok(MatchOutcome {
                candidates,
                evaluations: Vec::new(),
                records,
                redshift: RedshiftOutcome::NotComputed,
            });
        }

        let evaluations = evaluate_candidates(&candidates, options);
        let records = evaluations
            .iter()
            .filter(|e| e.accepted)
            .map(|e| candidates[e.candidate].to_record())
            .collect::<Vec<_>>();
        debug!(
            "{} of {} candidates inside redshift window [{}, {}]",
            records.len(),
            candidates.len(),
            options.z_low,
            options.z_high
        );

        let redshift = match AggregateRedshift::from_evaluations(&evaluations) {
            Some(aggregate) => RedshiftOutcome::Estimated(aggregate),
            None => RedshiftOutcome::NoValidCandidates {
                z_low: options.z_low,
                z_high: options.z_high,
            },
        };

        Ok(MatchOutcome {
            candidates,
            evaluations,
            records,
            redshift,
        })
    }

    fn validate(
        &self,
        calibration: &[CalibrationLine],
        observed: &[ObservedLine],
    ) -> Result<(), MatchError> {
        validate_tolerance(self.config.tolerance)?;
        if self.config.redshift.compute {
            validate_redshift_window(self.config.redshift.z_low, self.config.redshift.z_high)?;
        }

        validate_wavelengths(Side::Calibration, calibration.iter().map(|l| l.wavelength))?;
        validate_wavelengths(Side::Observed, observed.iter().map(|l| l.wavelength))?;

        // Pairs resolve wavelengths by label, so labels must be positional
        for (i, line) in calibration.iter().enumerate() {
            if line.id != LineId::new(i) {
                return Err(ValidationError::NonSequentialLabel {
                    side: Side::Calibration,
                    position: i + 1,
                }
                .into());
            }
        }
        for (i, line) in observed.iter().enumerate() {
            if line.index != i + 1 {
                return Err(ValidationError::NonSequentialLabel {
                    side: Side::Observed,
                    position: i + 1,
                }
                .into());
            }
        }

        if let Some((name, first, second)) = first_duplicate_name(calibration) {
            match self.config.duplicate_names {
                DuplicateNamePolicy::Reject => {
                    return Err(MatchError::AmbiguousCalibrationName {
                        name: name.to_string(),
                        first,
                        second,
                    });
                }
                DuplicateNamePolicy::DistinctLines => {
                    debug!(
                        "Calibration name '{name}' repeats at positions {first} and {second}; treating entries as distinct lines"
                    );
                }
            }
        }

        Ok(())
    }
}

/// First repeated name with the 1-based positions of its first two occurrences
fn first_duplicate_name(calibration: &[CalibrationLine]) -> Option<(&str, usize, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (i, line) in calibration.iter().enumerate() {
        if let Some(&first) = seen.get(line.name.as_str()) {
            return Some((line.name.as_str(), first + 1, i + 1));
        }
        seen.insert(line.name.as_str(), i);
    }
    None
}

/// Cross-compare calibration ratios (outer) against observed ratios (inner).
///
/// Labels were validated as positional, so they index straight into the line slices.
fn find_candidates(
    calibration: &[CalibrationLine],
    observed: &[ObservedLine],
    calibration_pairs: &[RatioPair<LineId>],
    observed_pairs: &[RatioPair<usize>],
    tolerance: f64,
) -> Vec<Candidate> {
    calibration_pairs
        .iter()
        .flat_map(|cal| {
            observed_pairs.iter().filter_map(move |obs| {
                // NaN from an overflowing ratio fails this comparison
                let error = relative_error(obs.ratio, cal.ratio);
                let within_tolerance = error <= tolerance;
                if !within_tolerance {
                    return None;
                }

                let cal_a = &calibration[cal.first.index()];
                let cal_b = &calibration[cal.second.index()];
                let obs_a = &observed[obs.first - 1];
                let obs_b = &observed[obs.second - 1];

                Some(Candidate {
                    observed: (obs.first, obs.second),
                    calibration: (cal.first, cal.second),
                    names: (cal_a.name.clone(), cal_b.name.clone()),
                    observed_wavelengths: (obs_a.wavelength, obs_b.wavelength),
                    calibration_wavelengths: (cal_a.wavelength, cal_b.wavelength),
                    observed_ratio: obs.ratio,
                    calibration_ratio: cal.ratio,
                    relative_error: error,
                })
            })
        })
        .collect()
}

/// Match observed wavelengths against a named calibration list.
///
/// Returns the redshift outcome (`NotComputed` when `redshift.compute` is off)
/// and the accepted candidate records in iteration order. An empty redshift
/// window is reported as `RedshiftOutcome::NoValidCandidates`, not as an error.
///
/// Every report line (see [`MatchOutcome::report_lines`]) is emitted in order
/// at `INFO` level. Use [`match_lines_reporting`] to receive them directly.
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if the names and wavelengths differ in
/// length, or any other input is invalid.
pub fn match_lines(
    calibration_names: &[impl AsRef<str>],
    calibration_wavelengths: &[f64],
    observed_wavelengths: &[f64],
    tolerance: f64,
    redshift: &RedshiftOptions,
) -> Result<(RedshiftOutcome, Vec<CandidateRecord>), MatchError> {
    match_lines_reporting(
        calibration_names,
        calibration_wavelengths,
        observed_wavelengths,
        tolerance,
        redshift,
        |line| info!("{line}"),
    )
}

/// Same as [`match_lines`], but hands each report line to `report` in
/// emission order instead of logging it.
///
/// Invalid input fails before `report` is called.
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if the names and wavelengths differ in
/// length, or any other input is invalid.
pub fn match_lines_reporting(
    calibration_names: &[impl AsRef<str>],
    calibration_wavelengths: &[f64],
    observed_wavelengths: &[f64],
    tolerance: f64,
    redshift: &RedshiftOptions,
    mut report: impl FnMut(&str),
) -> Result<(RedshiftOutcome, Vec<CandidateRecord>), MatchError> {
    validate_parallel(calibration_names.len(), calibration_wavelengths.len())?;

    let calibration = CalibrationLine::from_parallel(calibration_names, calibration_wavelengths);
    let observed = ObservedLine::from_wavelengths(observed_wavelengths);

    let config = MatchingConfig::with_tolerance(tolerance).redshift(*redshift);
    let outcome = RatioMatcher::new(config).run(&calibration, &observed)?;

    for line in outcome.report_lines() {
        report(&line);
    }

    Ok((outcome.redshift, outcome.records))
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAMES: [&str; 5] = ["O II", "Hβ", "O III-1", "O III-2", "Hα"];
    const REST: [f64; 5] = [3726.03, 4861.33, 4958.92, 5006.84, 6563.0];
    const OBSERVED: [f64; 5] = [5419.57, 7067.71, 7209.96, 7279.55, 9538.86];

    fn make_lines() -> (Vec<CalibrationLine>, Vec<ObservedLine>) {
        (
            CalibrationLine::from_parallel(&NAMES, &REST),
            ObservedLine::from_wavelengths(&OBSERVED),
        )
    }

    fn candidate_keys(outcome: &MatchOutcome) -> Vec<((usize, usize), (LineId, LineId))> {
        outcome
            .candidates
            .iter()
            .map(|c| (c.observed, c.calibration))
            .collect()
    }

    #[test]
    fn test_end_to_end_five_lines() {
        let (calibration, observed) = make_lines();
        let config = MatchingConfig::with_tolerance(0.003).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();

        // Every calibration pair finds its observed counterpart, nothing rejected
        assert_eq!(outcome.candidates.len(), 10);
        assert_eq!(outcome.records.len(), 10);
        assert!(outcome.evaluations.iter().all(|e| e.accepted));
        for c in &outcome.candidates {
            assert_eq!(c.observed.0 - 1, c.calibration.0.index());
            assert_eq!(c.observed.1 - 1, c.calibration.1.index());
        }

        let aggregate = outcome.aggregate().unwrap().unwrap();
        assert!((aggregate.mean - 0.4539).abs() < 1e-3);
        assert!((aggregate.std_dev - 0.0003).abs() < 1e-4);
        assert_eq!(aggregate.samples, 20);
    }

    #[test]
    fn test_iteration_order_is_calibration_major() {
        let (calibration, observed) = make_lines();
        let outcome = RatioMatcher::new(MatchingConfig::with_tolerance(0.003))
            .run(&calibration, &observed)
            .unwrap();

        let keys: Vec<(usize, usize)> = outcome
            .candidates
            .iter()
            .map(|c| (c.calibration.0.index(), c.calibration.1.index()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
        assert_eq!(keys[0], (0, 1));
        assert_eq!(keys[9], (3, 4));
    }

    #[test]
    fn test_redshift_off_returns_all_candidates() {
        let (calibration, observed) = make_lines();
        let outcome = RatioMatcher::new(MatchingConfig::with_tolerance(0.003))
            .run(&calibration, &observed)
            .unwrap();

        assert_eq!(outcome.redshift, RedshiftOutcome::NotComputed);
        assert!(outcome.evaluations.is_empty());
        assert_eq!(outcome.records.len(), outcome.candidates.len());
        assert_eq!(outcome.aggregate().unwrap(), None);
    }

    #[test]
    fn test_tolerance_monotonicity() {
        let (calibration, observed) = make_lines();
        let mut previous: Vec<((usize, usize), (LineId, LineId))> = Vec::new();

        for tolerance in [1e-5, 5e-5, 1e-4, 4e-4, 1e-3, 3e-3, 1e-2, 5e-2] {
            let outcome = RatioMatcher::new(MatchingConfig::with_tolerance(tolerance))
                .run(&calibration, &observed)
                .unwrap();
            let current = candidate_keys(&outcome);
            assert!(previous.iter().all(|k| current.contains(k)));
            assert!(outcome.candidates.iter().all(|c| c.relative_error <= tolerance));
            previous = current;
        }
    }

    #[test]
    fn test_no_deduplication() {
        // Observed pair 1-2 has ratio 2.0, matching both 100/200 and 300/600
        let calibration =
            CalibrationLine::from_parallel(&["a", "b", "c", "d"], &[100.0, 200.0, 300.0, 600.0]);
        let observed = ObservedLine::from_wavelengths(&[1000.0, 2000.0]);

        let outcome = RatioMatcher::new(MatchingConfig::with_tolerance(1e-6))
            .run(&calibration, &observed)
            .unwrap();

        let names: Vec<(&str, &str)> = outcome
            .candidates
            .iter()
            .map(|c| (c.names.0.as_str(), c.names.1.as_str()))
            .collect();
        assert_eq!(names, vec![("a", "b"), ("c", "d")]);
        assert!(outcome.candidates.iter().all(|c| c.observed == (1, 2)));
    }

    #[test]
    fn test_window_filters_records_and_aggregate() {
        let calibration = CalibrationLine::from_parallel(
            &["O II", "Ca K", "Ca H", "Hβ"],
            &[3726.03, 3933.66, 3968.47, 4861.33],
        );
        let observed = ObservedLine::from_wavelengths(&[5419.57, 7067.71, 7209.96, 7279.55]);

        let config =
            MatchingConfig::with_tolerance(0.001).redshift(RedshiftOptions::window(0.05, 0.5));
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();

        let calcium = outcome
            .candidates
            .iter()
            .position(|c| {
                c.names == ("Ca K".to_string(), "Ca H".to_string()) && c.observed == (3, 4)
            })
            .expect("Ca K / Ca H should match lines 3 & 4");
        assert!(!outcome.evaluations[calcium].accepted);
        assert!((outcome.evaluations[calcium].estimate.z_mean - 0.8336).abs() < 1e-3);

        assert!(outcome
            .records
            .iter()
            .all(|r| r.names != ("Ca K".to_string(), "Ca H".to_string())));
        let aggregate = outcome.aggregate().unwrap().unwrap();
        assert!(aggregate.mean < 0.5);
        assert_eq!(aggregate.candidates, outcome.records.len());
    }

    #[test]
    fn test_empty_aggregate_is_reported() {
        let (calibration, _) = make_lines();
        let observed = ObservedLine::from_wavelengths(&[1000.0, 1001.0]);

        let config = MatchingConfig::with_tolerance(1e-6).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();

        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.redshift,
            RedshiftOutcome::NoValidCandidates { .. }
        ));
        assert!(matches!(
            outcome.aggregate(),
            Err(MatchError::EmptyAggregate { .. })
        ));
        assert_eq!(
            outcome.report_lines(),
            vec!["No valid redshift candidates in [0, 10]".to_string()]
        );
    }

    #[test]
    fn test_invalid_input_rejected_before_matching() {
        let (calibration, observed) = make_lines();

        let zero_tolerance = RatioMatcher::new(MatchingConfig::with_tolerance(0.0));
        assert!(matches!(
            zero_tolerance.run(&calibration, &observed),
            Err(MatchError::InvalidInput(ValidationError::InvalidTolerance(_)))
        ));

        let matcher = RatioMatcher::default();
        assert!(matches!(
            matcher.run(&calibration[..1], &observed),
            Err(MatchError::InvalidInput(ValidationError::TooFewLines { .. }))
        ));

        let bad = ObservedLine::from_wavelengths(&[5419.57, f64::NAN]);
        assert!(matches!(
            matcher.run(&calibration, &bad),
            Err(MatchError::InvalidInput(ValidationError::InvalidWavelength { position: 2, .. }))
        ));

        let shuffled = vec![ObservedLine::new(2, 5419.57), ObservedLine::new(1, 7067.71)];
        assert!(matches!(
            matcher.run(&calibration, &shuffled),
            Err(MatchError::InvalidInput(ValidationError::NonSequentialLabel { .. }))
        ));

        let inverted = MatchingConfig::default().redshift(RedshiftOptions::window(1.0, 0.0));
        assert!(RatioMatcher::new(inverted).run(&calibration, &observed).is_err());
    }

    #[test]
    fn test_duplicate_names() {
        let calibration = CalibrationLine::from_parallel(
            &["N II", "Hα", "N II"],
            &[6548.05, 6562.80, 6583.45],
        );
        let observed: Vec<ObservedLine> =
            ObservedLine::from_wavelengths(&[6548.05 * 1.2, 6562.80 * 1.2, 6583.45 * 1.2]);

        let strict = MatchingConfig::default().duplicate_names(DuplicateNamePolicy::Reject);
        assert_eq!(
            RatioMatcher::new(strict).run(&calibration, &observed).unwrap_err(),
            MatchError::AmbiguousCalibrationName {
                name: "N II".to_string(),
                first: 1,
                second: 3
            }
        );

        // Distinct lines resolve each N II entry to its own wavelength
        let config = MatchingConfig::with_tolerance(1e-9).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();
        let pair = outcome
            .candidates
            .iter()
            .find(|c| c.calibration == (LineId::new(1), LineId::new(2)))
            .unwrap();
        assert!((pair.calibration_wavelengths.1 - 6583.45).abs() < 1e-9);

        let aggregate = outcome.aggregate().unwrap().unwrap();
        assert!((aggregate.mean - 0.2).abs() < 1e-9);
        assert!(aggregate.std_dev < 1e-9);
    }

    #[test]
    fn test_report_lines_order() {
        let (calibration, observed) = make_lines();
        let config = MatchingConfig::with_tolerance(0.003).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();

        let lines = outcome.report_lines();
        assert_eq!(lines.len(), 21);
        assert_eq!(
            lines[0],
            "Lines 1 & 2: ratio 1.304109 matches O II / Hβ: ratio 1.304694"
        );
        assert!(lines[10].starts_with("z = 0.4542 for 5419.57 & 7067.71 as O II & Hβ"));
        assert!(lines[20].starts_with("Mean redshift: z = 0.4539 ± 0.0003"));
    }

    #[test]
    fn test_match_lines() {
        let (redshift, records) =
            match_lines(&NAMES, &REST, &OBSERVED, 0.003, &RedshiftOptions::enabled()).unwrap();
        assert_eq!(records.len(), 10);
        assert!((redshift.mean().unwrap() - 0.4539).abs() < 1e-3);

        let (redshift, records) =
            match_lines(&NAMES, &REST, &OBSERVED, 0.003, &RedshiftOptions::default()).unwrap();
        assert_eq!(redshift, RedshiftOutcome::NotComputed);
        assert_eq!(records.len(), 10);

        assert!(matches!(
            match_lines(&NAMES[..4], &REST, &OBSERVED, 0.003, &RedshiftOptions::default()),
            Err(MatchError::InvalidInput(ValidationError::LengthMismatch { .. }))
        ));
    }

    #[test]
    fn test_overflowing_ratio_never_matches() {
        // 1e200 / 1e-200 overflows to inf, so the relative error is NaN
        let calibration = CalibrationLine::from_parallel(&["a", "b"], &[1e-200, 1e200]);
        let observed = ObservedLine::from_wavelengths(&[5419.57, 7067.71]);

        let config = MatchingConfig::with_tolerance(0.001).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();

        assert!(outcome.candidates.is_empty());
        assert!(outcome.records.is_empty());
        assert!(matches!(
            outcome.redshift,
            RedshiftOutcome::NoValidCandidates { .. }
        ));
    }

    #[test]
    fn test_match_lines_reporting_emits_report_lines() {
        let mut reported = Vec::new();
        let (redshift, records) = match_lines_reporting(
            &NAMES,
            &REST,
            &OBSERVED,
            0.003,
            &RedshiftOptions::enabled(),
            |line| reported.push(line.to_string()),
        )
        .unwrap();

        assert_eq!(records.len(), 10);
        assert!(matches!(redshift, RedshiftOutcome::Estimated(_)));
        assert_eq!(reported.len(), 21);
        assert_eq!(
            reported[0],
            "Lines 1 & 2: ratio 1.304109 matches O II / Hβ: ratio 1.304694"
        );
        assert_eq!(reported[10], "z = 0.4542 for 5419.57 & 7067.71 as O II & Hβ");
        assert_eq!(
            reported[20],
            "Mean redshift: z = 0.4539 ± 0.0003 (10 candidates)"
        );

        let (calibration, observed) = make_lines();
        let config = MatchingConfig::with_tolerance(0.003).redshift(RedshiftOptions::enabled());
        let outcome = RatioMatcher::new(config).run(&calibration, &observed).unwrap();
        assert_eq!(reported, outcome.report_lines());
    }

    #[test]
    fn test_match_lines_reporting_silent_on_invalid_input() {
        let mut reported = Vec::new();
        let result = match_lines_reporting(
            &NAMES,
            &REST,
            &OBSERVED,
            0.0,
            &RedshiftOptions::enabled(),
            |line| reported.push(line.to_string()),
        );

        assert!(matches!(
            result,
            Err(MatchError::InvalidInput(ValidationError::InvalidTolerance(_)))
        ));
        assert!(reported.is_empty());
    }

    #[test]
    fn test_match_lines_logs_report_lines_at_info() {
        use std::sync::{Arc, Mutex};

        #[derive(Clone, Default)]
        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl std::io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_level(false)
            .with_target(false)
            .without_time()
            .finish();

        let names = ["O II", "Hβ"];
        let rest = [3726.03, 4861.33];
        let observed = [5419.57, 7067.71];
        let options = RedshiftOptions::enabled();

        let (_, records) = tracing::subscriber::with_default(subscriber, || {
            match_lines(&names, &rest, &observed, 0.001, &options)
        })
        .unwrap();
        assert_eq!(records.len(), 1);

        let mut expected = Vec::new();
        match_lines_reporting(&names, &rest, &observed, 0.001, &options, |line| {
            expected.push(line.to_string());
        })
        .unwrap();
        assert_eq!(expected.len(), 3);

        let bytes = captured.0.lock().unwrap().clone();
        let logged = String::from_utf8(bytes).unwrap();
        let logged: Vec<&str> = logged.lines().map(str::trim).collect();
        assert_eq!(logged, expected);
    }
}
