pub mod numeric;

use crate::error::PdfGridError;
use crate::extraction::DocumentSource;
use crate::model::{DataPoint, DocPoint, DocRect, ExtractedValue, Provenance, SourceImageId, TextSpan};
use numeric::{numeric_substrings, parse_number};

/// A numeric value found in a text span.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericMatch {
    /// The substring as it appeared in the span.
    pub text: String,
    pub value: f64,
    pub bbox: DocRect,
}

/// First number found in spans, in the order given.
///
/// Candidates that match the pattern but do not parse are passed over.
pub fn first_match(spans: &[TextSpan]) -> Option<NumericMatch> {
    spans.iter().find_map(|span| {
        numeric_substrings(&span.text).find_map(|candidate| match parse_number(candidate) {
            Ok(value) => Some(NumericMatch {
                text: candidate.to_string(),
                value,
                bbox: span.bbox,
            }),
            Err(e) => {
                log::debug!("skipping candidate in '{}': {}", span.text, e);
                None
            }
        })
    })
}

/// Every number in every span, each positioned at its span's center.
pub fn scan_spans(spans: &[TextSpan], image: SourceImageId) -> Vec<DataPoint> {
    let mut points = Vec::new();

    for span in spans {
        let center = span.bbox.center();
        for candidate in numeric_substrings(&span.text) {
            match parse_number(candidate) {
                Ok(value) => points.push(DataPoint {
                    x: center.x,
                    y: center.y,
                    value: ExtractedValue::Number(value),
                    provenance: Provenance::Auto,
                    image,
                }),
                Err(e) => log::debug!("skipping candidate in '{}': {}", span.text, e),
            }
        }
    }

    points
}

/// Look up the number nearest a clicked point on a page.
///
/// Searches the square of half-side `radius` around `point`.
pub fn point_query(
    source: &dyn DocumentSource,
    page_index: usize,
    point: DocPoint,
    radius: f64,
) -> Result<Option<NumericMatch>, PdfGridError> {
    let region = DocRect::around(point, radius);
    let spans = source.text_spans(page_index, &region)?;
    Ok(first_match(&spans))
}

/// Scan a page region for numbers, producing auto-extracted points.
pub fn region_scan(
    source: &dyn DocumentSource,
    page_index: usize,
    region: &DocRect,
    image: SourceImageId,
) -> Result<Vec<DataPoint>, PdfGridError> {
    let spans = source.text_spans(page_index, region)?;
    Ok(scan_spans(&spans, image))
}

/// Join spans sharing a layout line into one string per line.
pub fn raw_text_lines(spans: &[TextSpan]) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current_line: Option<usize> = None;

    for span in spans {
        if current_line == Some(span.line) {
            if let Some(last) = lines.last_mut() {
                last.push_str(&span.text);
            }
        } else {
            lines.push(span.text.clone());
            current_line = Some(span.line);
        }
    }

    lines
}
