pub mod config;
pub mod coords;
pub mod error;
pub mod export;
pub mod extraction;
pub mod model;
pub mod overlay;
pub mod parsing;
pub mod session;
pub mod store;

use config::ExtractorConfig;
use error::PdfGridError;
use extraction::layout::load_layout;
use extraction::pdftohtml::PdftohtmlExtractor;
use session::ExtractionSession;
use std::path::Path;

/// Main API entry point: open a PDF for coordinate picking and value extraction.
///
/// The PDF is read through pdftohtml. Embedded images that cannot be decoded
/// are skipped; the session starts with the first remaining image displayed.
pub fn open_pdf(
    pdf_bytes: &[u8],
    extractor: &PdftohtmlExtractor,
    config: ExtractorConfig,
) -> Result<ExtractionSession, PdfGridError> {
    let document = extractor.extract(pdf_bytes)?;
    ExtractionSession::open(Box::new(document), config)
}

/// Open a session from a layout JSON file instead of a PDF.
pub fn open_layout(path: &Path, config: ExtractorConfig) -> Result<ExtractionSession, PdfGridError> {
    let document = load_layout(path)?;
    ExtractionSession::open(Box::new(document), config)
}
