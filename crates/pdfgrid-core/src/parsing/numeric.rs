use crate::error::PdfGridError;
use regex::Regex;
use std::sync::LazyLock;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+\.?\d*").expect("number pattern is valid"));

/// All numeric substrings of a span's trimmed text, left to right.
///
/// Handles text like:
/// - "23.5" -> ["23.5"]
/// - "Temp: 23.5C" -> ["23.5"]
/// - "-4 to 12." -> ["-4", "12."]
/// - "1,250" -> ["1", "250"] (no thousands separators)
pub fn numeric_substrings(text: &str) -> impl Iterator<Item = &str> {
    NUMBER_PATTERN.find_iter(text.trim()).map(|m| m.as_str())
}

/// Parse a matched substring as a float.
///
/// A trailing decimal point ("12.") is accepted. Digit runs of any length
/// parse; precision beyond an f64 is rounded, never rejected.
pub fn parse_number(s: &str) -> Result<f64, PdfGridError> {
    let digits = s.strip_suffix('.').unwrap_or(s);
    digits
        .parse::<f64>()
        .map_err(|e| PdfGridError::ParseError(format!("invalid number '{s}': {e}")))
}
