//! Centralized validation and helper functions.
//!
//! Every check here runs before any ratio is enumerated, so invalid input
//! aborts a run before it produces a single report line.

/// Maximum number of lines allowed on either side of a match (DOS protection).
///
/// The cross comparison costs `C(n_cal, 2) * C(n_obs, 2)` ratio tests, so this
/// caps the comparison count at roughly 2.5e11. It does not cap the candidate
/// list: every comparison within tolerance is kept, so degenerate inputs such
/// as many identical wavelengths can still produce that many candidates.
pub const MAX_LINES: usize = 1_000;

/// Minimum number of lines needed to form a single ratio pair
pub const MIN_LINES: usize = 2;

/// Which input sequence a validation failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Calibration,
    Observed,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calibration => write!(f, "calibration"),
            Self::Observed => write!(f, "observed"),
        }
    }
}

/// Input validation error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{side} list has {count} line(s), at least {MIN_LINES} are required")]
    TooFewLines { side: Side, count: usize },

    #[error("{side} list has {count} lines, exceeding the maximum of {MAX_LINES}")]
    TooManyLines { side: Side, count: usize },

    #[error("{names} calibration names but {wavelengths} calibration wavelengths")]
    LengthMismatch { names: usize, wavelengths: usize },

    #[error("{side} line {position} has invalid wavelength {value}: must be positive and finite")]
    InvalidWavelength {
        side: Side,
        position: usize,
        value: f64,
    },

    #[error("{side} line {position} is labelled out of input order")]
    NonSequentialLabel { side: Side, position: usize },

    #[error("Tolerance {0} is invalid: must be positive and finite")]
    InvalidTolerance(f64),

    #[error("Redshift window [{low}, {high}] is invalid: bounds must be finite and low <= high")]
    InvalidRedshiftWindow { low: f64, high: f64 },
}

/// Check if adding another line would exceed the maximum allowed.
///
/// Call this with the current count BEFORE adding a new line.
/// Returns an error message if adding would exceed the limit, None if safe to add.
#[must_use]
pub fn check_line_limit(count: usize) -> Option<String> {
    if count >= MAX_LINES {
        Some(format!(
            "Too many lines: adding another would exceed maximum of {MAX_LINES}"
        ))
    } else {
        None
    }
}

/// A wavelength usable as a ratio operand: strictly positive and finite
#[must_use]
pub fn is_valid_wavelength(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

/// Validate the size and contents of one wavelength sequence.
///
/// Positions in errors are 1-based for user friendliness.
///
/// # Errors
///
/// Returns `ValidationError::TooFewLines`, `ValidationError::TooManyLines`,
/// or `ValidationError::InvalidWavelength` for the first offending entry.
pub fn validate_wavelengths(
    side: Side,
    wavelengths: impl ExactSizeIterator<Item = f64>,
) -> Result<(), ValidationError> {
    let count = wavelengths.len();
    if count < MIN_LINES {
        return Err(ValidationError::TooFewLines { side, count });
    }
    if count > MAX_LINES {
        return Err(ValidationError::TooManyLines { side, count });
    }

    for (i, value) in wavelengths.enumerate() {
        if !is_valid_wavelength(value) {
            return Err(ValidationError::InvalidWavelength {
                side,
                position: i + 1,
                value,
            });
        }
    }

    Ok(())
}

/// Validate that names and wavelengths pair up positionally.
///
/// # Errors
///
/// Returns `ValidationError::LengthMismatch` if the lengths differ.
pub fn validate_parallel(names: usize, wavelengths: usize) -> Result<(), ValidationError> {
    if names == wavelengths {
        Ok(())
    } else {
        Err(ValidationError::LengthMismatch { names, wavelengths })
    }
}

/// Validate a relative matching tolerance.
///
/// # Errors
///
/// Returns `ValidationError::InvalidTolerance` unless `tolerance` is positive and finite.
pub fn validate_tolerance(tolerance: f64) -> Result<(), ValidationError> {
    if tolerance.is_finite() && tolerance > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidTolerance(tolerance))
    }
}

/// Validate an inclusive redshift acceptance window.
///
/// # Errors
///
/// Returns `ValidationError::InvalidRedshiftWindow` if a bound is not finite or
/// `low > high`.
pub fn validate_redshift_window(low: f64, high: f64) -> Result<(), ValidationError> {
    if low.is_finite() && high.is_finite() && low <= high {
        Ok(())
    } else {
        Err(ValidationError::InvalidRedshiftWindow { low, high })
    }
}
