// Helpers shared by the tabular readers.

/// Finds a column in a header row by label, ignoring case and surrounding
/// whitespace. The index starts at 0.
pub fn find_column(header: &[String], label: &str) -> Option<usize> {
    header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(label))
}

/// Trims a textual cell, mapping blanks to `None`.
pub fn non_blank_cell(value: Option<&str>) -> Option<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

/// Parses a numeric cell that may have been formatted as text.
pub fn parse_numeric_cell(value: Option<&str>) -> Option<f64> {
    non_blank_cell(value).and_then(|s| s.parse::<f64>().ok())
}

/// Parses an integer position cell. Whole numbers formatted as floats by
/// the spreadsheet program ("3.0") are accepted; anything else that is not
/// a plain integer is returned as an error carrying the offending text.
pub fn parse_position_cell(value: Option<&str>) -> Result<Option<i64>, String> {
    match non_blank_cell(value) {
        None => Ok(None),
        Some(s) => match s.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 => Ok(Some(f as i64)),
            _ => Err(s),
        },
    }
}
