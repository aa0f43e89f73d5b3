//! Pre-extracted page layouts stored as JSON.
//!
//! A layout file lists pages with their text spans and the image files placed
//! on them, so a document can be processed without poppler installed:
//!
//! ```json
//! {
//!   "pages": [
//!     {
//!       "spans": [{ "text": "23.5", "bbox": { "x0": 80, "y0": 630, "x1": 140, "y1": 642 } }],
//!       "images": [{ "path": "figure1.png", "rect": { "x0": 72, "y0": 492, "x1": 372, "y1": 692 } }]
//!     }
//!   ]
//! }
//! ```
//!
//! Image paths are resolved relative to the layout file.

use crate::error::PdfGridError;
use crate::extraction::{EmbeddedImage, PageText, ParsedDocument};
use crate::model::{DocRect, TextSpan};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutFile {
    pub pages: Vec<LayoutPage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutPage {
    #[serde(default)]
    pub spans: Vec<TextSpan>,
    #[serde(default)]
    pub images: Vec<LayoutImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LayoutImage {
    pub path: PathBuf,
    pub rect: DocRect,
}

/// Load a layout JSON file and read the images it references.
pub fn load_layout(path: &Path) -> Result<ParsedDocument, PdfGridError> {
    let content = std::fs::read_to_string(path).map_err(|e| PdfGridError::LayoutLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let layout: LayoutFile =
        serde_json::from_str(&content).map_err(|e| PdfGridError::LayoutLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    read_layout(layout, base_dir)
}

/// Build a document from a parsed layout, reading image files under `base_dir`.
pub fn read_layout(layout: LayoutFile, base_dir: &Path) -> Result<ParsedDocument, PdfGridError> {
    let mut images = Vec::new();
    let mut pages = Vec::with_capacity(layout.pages.len());

    for (page_index, page) in layout.pages.into_iter().enumerate() {
        for (image_index, img) in page.images.iter().enumerate() {
            let image_path = base_dir.join(&img.path);
            let bytes = std::fs::read(&image_path).map_err(|e| PdfGridError::LayoutLoad {
                path: image_path.clone(),
                reason: e.to_string(),
            })?;
            images.push(EmbeddedImage {
                page_index,
                image_index,
                bytes,
                rect: img.rect,
            });
        }
        pages.push(PageText {
            page_index,
            spans: page.spans,
        });
    }

    Ok(ParsedDocument {
        backend: "layout".into(),
        images,
        pages,
    })
}
