use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PdfGridError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("document source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to parse number: {0}")]
    ParseError(String),

    #[error("pdftohtml not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftohtmlNotFound,

    #[error("pdftohtml failed with exit code {code}: {stderr}")]
    PdftohtmlFailed { code: i32, stderr: String },

    #[error("failed to load config from {path}: {reason}")]
    ConfigLoad { path: PathBuf, reason: String },

    #[error("failed to load layout from {path}: {reason}")]
    LayoutLoad { path: PathBuf, reason: String },

    #[error("image index {index} out of range ({count} image(s) in document)")]
    ImageIndex { index: usize, count: usize },

    #[error("no image is currently displayed")]
    NoImageSelected,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
