use std::path::Path;

use crate::catalog::store::LineList;
use crate::core::line::CalibrationLine;
use crate::core::types::{LineId, Medium};
use crate::parsing::{parse_wavelength, ParseError};
use crate::utils::validation::check_line_limit;

/// Parse a calibration table file into a single line list named after the file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_calibration_file(path: &Path, delimiter: char) -> Result<LineList, ParseError> {
    let content = std::fs::read_to_string(path)?;
    let lines = parse_calibration_text(&content, delimiter)?;

    let id = path
        .file_stem()
        .map_or_else(|| "custom".to_string(), |s| s.to_string_lossy().to_string());
    let display_name = path.display().to_string();

    Ok(LineList::new(id, display_name, Medium::Unspecified, lines))
}

/// Parse calibration text with columns: name, wavelength
///
/// Names may contain spaces ("O III-1"). Without the delimiter on a row, the
/// last whitespace-separated token is taken as the wavelength.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if a row lacks a name or wavelength, or
/// no lines are found, or `ParseError::TooManyLines` if the limit is exceeded.
pub fn parse_calibration_text(
    text: &str,
    delimiter: char,
) -> Result<Vec<CalibrationLine>, ParseError> {
    let mut lines = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line_num = i + 1;
        let Some((name, value)) = split_name_value(line, delimiter) else {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} needs a name and a wavelength"
            )));
        };

        // Check if first non-empty/non-comment line is a header
        if first_data_line {
            first_data_line = false;
            if name.eq_ignore_ascii_case("name") || name.eq_ignore_ascii_case("line") {
                continue;
            }
        }

        let wavelength = parse_wavelength(value, line_num)?;

        if let Some(message) = check_line_limit(lines.len()) {
            return Err(ParseError::TooManyLines(message));
        }

        lines.push(CalibrationLine::new(LineId::new(lines.len()), name, wavelength));
    }

    if lines.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No calibration lines found".to_string(),
        ));
    }

    Ok(lines)
}

fn split_name_value(line: &str, delimiter: char) -> Option<(&str, &str)> {
    let (name, value) = if line.contains(delimiter) {
        let mut fields = line.split(delimiter);
        (fields.next()?, fields.next()?)
    } else {
        line.rsplit_once(char::is_whitespace)?
    };

    let (name, value) = (name.trim(), value.trim());
    if name.is_empty() || value.is_empty() {
        None
    } else {
        Some((name, value))
    }
}
