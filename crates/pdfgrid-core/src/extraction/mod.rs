pub mod layout;
pub mod pdftohtml;

use crate::error::PdfGridError;
use crate::model::{DocRect, TextSpan};

/// Raw bytes of an image embedded in a page, with its placement.
#[derive(Debug, Clone)]
pub struct EmbeddedImage {
    pub page_index: usize,
    pub image_index: usize,
    pub bytes: Vec<u8>,
    pub rect: DocRect,
}

/// Text spans of a single page, in layout order.
#[derive(Debug, Clone, Default)]
pub struct PageText {
    pub page_index: usize,
    pub spans: Vec<TextSpan>,
}

/// Trait for document backends that supply embedded rasters and positioned text.
pub trait DocumentSource: Send + Sync {
    /// Every embedded image, ordered by page and then by position on the page.
    fn embedded_images(&self) -> Result<Vec<EmbeddedImage>, PdfGridError>;

    /// Spans of `page_index` whose bounding box intersects `clip`, in layout order.
    fn text_spans(&self, page_index: usize, clip: &DocRect) -> Result<Vec<TextSpan>, PdfGridError>;

    fn page_count(&self) -> usize;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}

/// A document fully read into memory.
///
/// Both bundled backends produce one of these, so the session never holds
/// files or processes open after loading.
#[derive(Debug, Clone, Default)]
pub struct ParsedDocument {
    pub backend: String,
    pub images: Vec<EmbeddedImage>,
    pub pages: Vec<PageText>,
}

impl DocumentSource for ParsedDocument {
    fn embedded_images(&self) -> Result<Vec<EmbeddedImage>, PdfGridError> {
        Ok(self.images.clone())
    }

    fn text_spans(&self, page_index: usize, clip: &DocRect) -> Result<Vec<TextSpan>, PdfGridError> {
        let page = self
            .pages
            .iter()
            .find(|p| p.page_index == page_index)
            .ok_or_else(|| {
                PdfGridError::SourceUnavailable(format!("page {} has no text layer", page_index + 1))
            })?;
        Ok(clip_spans(&page.spans, clip))
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn backend_name(&self) -> &str {
        &self.backend
    }
}

/// Spans intersecting `clip`, in their layout order.
pub fn clip_spans(spans: &[TextSpan], clip: &DocRect) -> Vec<TextSpan> {
    spans
        .iter()
        .filter(|s| s.bbox.intersects(clip))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> TextSpan {
        TextSpan {
            text: text.to_string(),
            bbox: DocRect::new(x0, y0, x1, y1),
            line: 0,
        }
    }

    #[test]
    fn test_clip_keeps_order_and_drops_outside() {
        let spans = vec![
            span("b", 50.0, 50.0, 60.0, 60.0),
            span("outside", 500.0, 500.0, 510.0, 510.0),
            span("a", 0.0, 0.0, 10.0, 10.0),
        ];
        let clipped = clip_spans(&spans, &DocRect::new(0.0, 0.0, 100.0, 100.0));
        let texts: Vec<&str> = clipped.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_missing_page_is_source_unavailable() {
        let doc = ParsedDocument::default();
        let err = doc
            .text_spans(3, &DocRect::new(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, PdfGridError::SourceUnavailable(_)));
    }
}
