pub mod config;
pub mod images;
pub mod overlay;
pub mod pick;
pub mod scan;

use pdfgrid_core::config::{load_config, ExtractorConfig};
use pdfgrid_core::error::PdfGridError;
use pdfgrid_core::extraction::pdftohtml::PdftohtmlExtractor;
use pdfgrid_core::session::ExtractionSession;
use std::path::Path;

/// Open a session on a PDF, or on a layout file when the input ends in `.json`.
pub fn open_session(
    input: &Path,
    config_path: Option<&Path>,
) -> Result<ExtractionSession, PdfGridError> {
    let config = match config_path {
        Some(path) => load_config(path)?,
        None => ExtractorConfig::default(),
    };

    let is_layout = input
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_layout {
        return pdfgrid_core::open_layout(input, config);
    }

    let pdf_bytes = std::fs::read(input)?;
    pdfgrid_core::open_pdf(&pdf_bytes, &PdftohtmlExtractor::new(), config)
}

/// Convert a 1-based image number from the command line to a session index.
pub fn image_index(session: &ExtractionSession, number: usize) -> Result<usize, PdfGridError> {
    let count = session.images().len();
    match number.checked_sub(1) {
        Some(index) if index < count => Ok(index),
        _ => Err(PdfGridError::ImageIndex {
            index: number,
            count,
        }),
    }
}

pub fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x = a.trim().parse::<f64>().map_err(|e| format!("'{a}': {e}"))?;
    let y = b.trim().parse::<f64>().map_err(|e| format!("'{b}': {e}"))?;
    Ok((x, y))
}

pub fn parse_offset(s: &str) -> Result<(i32, i32), String> {
    let (a, b) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY but got '{s}'"))?;
    let dx = a.trim().parse::<i32>().map_err(|e| format!("'{a}': {e}"))?;
    let dy = b.trim().parse::<i32>().map_err(|e| format!("'{b}': {e}"))?;
    Ok((dx, dy))
}

pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (a, b) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH but got '{s}'"))?;
    let w = a.trim().parse::<u32>().map_err(|e| format!("'{a}': {e}"))?;
    let h = b.trim().parse::<u32>().map_err(|e| format!("'{b}': {e}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got '{s}'"));
    }
    Ok((w, h))
}
