//! Parsers for line lists supplied as text files.
//!
//! This module provides parsers for:
//!
//! - **Observed lines**: one wavelength per row (first column of a TSV/CSV, or plain text)
//! - **Calibration lines**: `name<delim>wavelength` rows forming a single line list
//!
//! ## Example
//!
//! ```rust
//! use line_ratio::parsing::observed::parse_observed_text;
//!
//! let text = "wavelength\n5419.57\n7067.71\n# blended\n7209.96\n";
//! let observed = parse_observed_text(text, '\t').unwrap();
//! assert_eq!(observed.len(), 3);
//! assert_eq!(observed[2].index, 3);
//! ```
//!
//! Blank lines and lines starting with `#` are skipped everywhere, and line
//! numbers in errors are 1-based.

use thiserror::Error;

pub mod calibration;
pub mod observed;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid line list format: {0}")]
    InvalidFormat(String),

    #[error("{0}")]
    TooManyLines(String),
}

/// Split a data row into trimmed fields. Whitespace-delimited input is
/// accepted for tab-delimited parsing, since hand-written lists rarely use tabs.
pub(crate) fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    if delimiter == '\t' && !line.contains('\t') {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter).map(str::trim).collect()
    }
}

/// Parse a wavelength field, reporting the 1-based line number on failure
pub(crate) fn parse_wavelength(field: &str, line_num: usize) -> Result<f64, ParseError> {
    let value: f64 = field.trim().parse().map_err(|_| {
        ParseError::InvalidFormat(format!("Invalid wavelength on line {line_num}: '{field}'"))
    })?;

    if !crate::utils::validation::is_valid_wavelength(value) {
        return Err(ParseError::InvalidFormat(format!(
            "Wavelength on line {line_num} must be positive and finite: '{field}'"
        )));
    }

    Ok(value)
}
