use std::path::Path;

use crate::core::line::ObservedLine;
use crate::parsing::{parse_wavelength, split_fields, ParseError};
use crate::utils::validation::check_line_limit;

/// Header names recognised in the first column of the first data row
const HEADER_NAMES: [&str; 4] = ["wavelength", "lambda", "wave", "observed"];

/// Parse an observed line file: one wavelength per row in the first column
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_observed_file(path: &Path, delimiter: char) -> Result<Vec<ObservedLine>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_observed_text(&content, delimiter)
}

/// Parse observed wavelengths from text, numbering them from 1 in row order.
///
/// Extra columns (fluxes, widths) are ignored.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a wavelength is not a positive
/// number or no lines are found, or `ParseError::TooManyLines` if the limit
/// is exceeded.
pub fn parse_observed_text(text: &str, delimiter: char) -> Result<Vec<ObservedLine>, ParseError> {
    let mut lines = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = split_fields(line, delimiter);
        let first = fields.first().copied().unwrap_or_default();

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            if HEADER_NAMES.contains(&first.to_lowercase().as_str()) {
                continue;
            }
        }

        let wavelength = parse_wavelength(first, i + 1)?;

        if let Some(message) = check_line_limit(lines.len()) {
            return Err(ParseError::TooManyLines(message));
        }

        lines.push(ObservedLine::new(lines.len() + 1, wavelength));
    }

    if lines.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No observed lines found".to_string(),
        ));
    }

    Ok(lines)
}
