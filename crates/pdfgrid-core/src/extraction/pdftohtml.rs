use crate::error::PdfGridError;
use crate::extraction::{EmbeddedImage, PageText, ParsedDocument};
use crate::model::{DocRect, TextSpan};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Document backend using pdftohtml (from poppler-utils).
///
/// Runs `pdftohtml -xml -zoom 1` so every position in the output is in PDF
/// points, and extracts embedded images as PNG files next to the XML.
pub struct PdftohtmlExtractor;

impl PdftohtmlExtractor {
    pub fn new() -> Self {
        PdftohtmlExtractor
    }

    /// Read every page, image and text run of a PDF into memory.
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<ParsedDocument, PdfGridError> {
        let workdir =
            tempfile::tempdir().map_err(|e| PdfGridError::SourceUnavailable(e.to_string()))?;
        let input = workdir.path().join("input.pdf");
        std::fs::write(&input, pdf_bytes)
            .map_err(|e| PdfGridError::SourceUnavailable(e.to_string()))?;
        let out_base = workdir.path().join("doc");

        let output = Command::new("pdftohtml")
            .arg("-xml")
            .arg("-q")
            .arg("-zoom")
            .arg("1")
            .arg("-fmt")
            .arg("png")
            .arg(&input)
            .arg(&out_base)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    PdfGridError::PdftohtmlNotFound
                } else {
                    PdfGridError::SourceUnavailable(format!("pdftohtml failed: {}", e))
                }
            })?;

        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            let stderr = String::from_utf8_lossy(&output.stderr).to_string();
            return Err(PdfGridError::PdftohtmlFailed { code, stderr });
        }

        let xml = std::fs::read_to_string(out_base.with_extension("xml")).map_err(|e| {
            PdfGridError::SourceUnavailable(format!("pdftohtml produced no XML: {}", e))
        })?;
        let pages = parse_pdf2xml(&xml)?;
        log::debug!("pdftohtml: {} page(s)", pages.len());

        Ok(build_document(pages, workdir.path()))
    }
}

impl Default for PdftohtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Position attributes as written by pdftohtml: top-left origin, y down.
#[derive(Debug, Clone, Copy, PartialEq)]
struct XmlBox {
    top: f64,
    left: f64,
    width: f64,
    height: f64,
}

impl XmlBox {
    fn to_doc_rect(self, page_height: f64) -> DocRect {
        DocRect::new(
            self.left,
            page_height - (self.top + self.height),
            self.left + self.width,
            page_height - self.top,
        )
    }
}

#[derive(Debug, Clone)]
struct XmlImage {
    pos: XmlBox,
    src: String,
}

#[derive(Debug, Clone)]
struct XmlText {
    pos: XmlBox,
    text: String,
}

#[derive(Debug, Clone)]
struct XmlPage {
    number: usize,
    height: f64,
    images: Vec<XmlImage>,
    texts: Vec<XmlText>,
}

fn parse_pdf2xml(xml: &str) -> Result<Vec<XmlPage>, PdfGridError> {
    let mut reader = Reader::from_str(xml);
    let mut pages = Vec::new();
    let mut current_page: Option<XmlPage> = None;
    let mut current_text: Option<XmlText> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            PdfGridError::SourceUnavailable(format!(
                "malformed pdftohtml XML at byte {}: {}",
                reader.buffer_position(),
                e
            ))
        })?;

        match event {
            Event::Start(tag) => match tag.name().as_ref() {
                b"page" => current_page = Some(parse_page_tag(&tag)?),
                b"text" => {
                    current_text = Some(XmlText {
                        pos: parse_box(&tag)?,
                        text: String::new(),
                    })
                }
                b"image" => push_image(current_page.as_mut(), &tag)?,
                _ => {}
            },
            Event::Empty(tag) => {
                if tag.name().as_ref() == b"image" {
                    push_image(current_page.as_mut(), &tag)?;
                }
            }
            Event::Text(t) => {
                if let Some(text) = current_text.as_mut() {
                    let chunk = t.unescape().map_err(xml_error)?;
                    text.text.push_str(&chunk);
                }
            }
            Event::End(tag) => match tag.name().as_ref() {
                b"text" => {
                    if let (Some(page), Some(text)) = (current_page.as_mut(), current_text.take()) {
                        if !text.text.trim().is_empty() {
                            page.texts.push(text);
                        }
                    }
                }
                b"page" => {
                    if let Some(page) = current_page.take() {
                        pages.push(page);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(pages)
}

fn parse_page_tag(tag: &BytesStart) -> Result<XmlPage, PdfGridError> {
    let number = attr(tag, "number")?
        .parse::<usize>()
        .map_err(|e| PdfGridError::SourceUnavailable(format!("bad page number: {}", e)))?;
    Ok(XmlPage {
        number,
        height: attr_f64(tag, "height")?,
        images: Vec::new(),
        texts: Vec::new(),
    })
}

fn push_image(page: Option<&mut XmlPage>, tag: &BytesStart) -> Result<(), PdfGridError> {
    if let Some(page) = page {
        page.images.push(XmlImage {
            pos: parse_box(tag)?,
            src: attr(tag, "src")?,
        });
    }
    Ok(())
}

fn parse_box(tag: &BytesStart) -> Result<XmlBox, PdfGridError> {
    Ok(XmlBox {
        top: attr_f64(tag, "top")?,
        left: attr_f64(tag, "left")?,
        width: attr_f64(tag, "width")?,
        height: attr_f64(tag, "height")?,
    })
}

fn attr(tag: &BytesStart, name: &str) -> Result<String, PdfGridError> {
    let value = tag
        .try_get_attribute(name)
        .map_err(|e| PdfGridError::SourceUnavailable(e.to_string()))?
        .ok_or_else(|| {
            PdfGridError::SourceUnavailable(format!(
                "<{}> without '{}' attribute",
                String::from_utf8_lossy(tag.name().as_ref()),
                name
            ))
        })?;
    Ok(value.unescape_value().map_err(xml_error)?.into_owned())
}

fn attr_f64(tag: &BytesStart, name: &str) -> Result<f64, PdfGridError> {
    let raw = attr(tag, name)?;
    raw.trim().parse::<f64>().map_err(|e| {
        PdfGridError::SourceUnavailable(format!("bad '{}' value '{}': {}", name, raw, e))
    })
}

fn xml_error(e: quick_xml::Error) -> PdfGridError {
    PdfGridError::SourceUnavailable(format!("malformed pdftohtml XML: {}", e))
}

fn build_document(pages: Vec<XmlPage>, out_dir: &Path) -> ParsedDocument {
    let mut images = Vec::new();
    let mut page_texts = Vec::new();

    for page in pages {
        let page_index = page.number.saturating_sub(1);

        for (image_index, img) in page.images.iter().enumerate() {
            let path = resolve_src(out_dir, &img.src);
            match std::fs::read(&path) {
                Ok(bytes) => images.push(EmbeddedImage {
                    page_index,
                    image_index,
                    bytes,
                    rect: img.pos.to_doc_rect(page.height),
                }),
                Err(e) => log::warn!(
                    "skipping image {} on page {}: {} ({})",
                    image_index + 1,
                    page.number,
                    path.display(),
                    e
                ),
            }
        }

        page_texts.push(PageText {
            page_index,
            spans: text_spans(&page.texts, page.height),
        });
    }

    ParsedDocument {
        backend: "pdftohtml".into(),
        images,
        pages: page_texts,
    }
}

/// Convert text runs to spans, numbering lines by runs of equal `top`.
fn text_spans(texts: &[XmlText], page_height: f64) -> Vec<TextSpan> {
    let mut spans = Vec::with_capacity(texts.len());
    let mut line = 0;
    let mut last_top: Option<f64> = None;

    for t in texts {
        if let Some(top) = last_top {
            if top != t.pos.top {
                line += 1;
            }
        }
        last_top = Some(t.pos.top);
        spans.push(TextSpan {
            text: t.text.clone(),
            bbox: t.pos.to_doc_rect(page_height),
            line,
        });
    }

    spans
}

fn resolve_src(out_dir: &Path, src: &str) -> PathBuf {
    let src_path = Path::new(src);
    if src_path.is_absolute() && src_path.exists() {
        return src_path.to_path_buf();
    }
    let joined = out_dir.join(src_path);
    if joined.exists() {
        return joined;
    }
    match src_path.file_name() {
        Some(name) => out_dir.join(name),
        None => joined,
    }
}
