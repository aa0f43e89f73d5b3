use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle in document space.
///
/// Document space is bottom-up: `y0` is the bottom edge and `y1` the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocRect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl DocRect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        DocRect { x0, y0, x1, y1 }
    }

    /// Square of half-side `radius` centered on `center`.
    pub fn around(center: DocPoint, radius: f64) -> Self {
        DocRect {
            x0: center.x - radius,
            y0: center.y - radius,
            x1: center.x + radius,
            y1: center.y + radius,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn center(&self) -> DocPoint {
        DocPoint {
            x: (self.x0 + self.x1) / 2.0,
            y: (self.y0 + self.y1) / 2.0,
        }
    }

    /// True when the rectangles overlap or touch.
    pub fn intersects(&self, other: &DocRect) -> bool {
        self.x0 <= other.x1 && other.x0 <= self.x1 && self.y0 <= other.y1 && other.y0 <= self.y1
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 && self.height() > 0.0)
    }
}

impl fmt::Display for DocRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) to ({:.1}, {:.1})",
            self.x0, self.y0, self.x1, self.y1
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocPoint {
    pub x: f64,
    pub y: f64,
}

/// Point in the pixel grid of one raster, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Point in on-screen display coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPoint {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Size { width, height }
    }
}

/// Identifies an embedded raster by its page and its position on that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceImageId {
    pub page_index: usize,
    pub image_index: usize,
}

impl fmt::Display for SourceImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Page {} - Image {}",
            self.page_index + 1,
            self.image_index + 1
        )
    }
}

/// A decoded raster together with its placement on the page.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub id: SourceImageId,
    pub rect: DocRect,
    pub pixels: RgbaImage,
}

impl SourceImage {
    pub fn dimensions(&self) -> Size {
        Size::new(self.pixels.width(), self.pixels.height())
    }
}

/// A run of text and its document-space bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub text: String,
    pub bbox: DocRect,
    /// Index of the layout line this span belongs to on its page.
    #[serde(default)]
    pub line: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Manual,
    Auto,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provenance::Manual => write!(f, "Manual click"),
            Provenance::Auto => write!(f, "Auto-extracted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ExtractedValue {
    Number(f64),
    NoData,
}

impl ExtractedValue {
    pub fn number(&self) -> Option<f64> {
        match self {
            ExtractedValue::Number(v) => Some(*v),
            ExtractedValue::NoData => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, ExtractedValue::Number(_))
    }
}

impl fmt::Display for ExtractedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractedValue::Number(v) => write!(f, "{v}"),
            ExtractedValue::NoData => write!(f, "No data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub value: ExtractedValue,
    pub provenance: Provenance,
    pub image: SourceImageId,
}

impl DataPoint {
    pub fn position(&self) -> DocPoint {
        DocPoint {
            x: self.x,
            y: self.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_intersects_touching_edges() {
        let a = DocRect::new(0.0, 0.0, 10.0, 10.0);
        let b = DocRect::new(10.0, 5.0, 20.0, 15.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&DocRect::new(10.5, 0.0, 20.0, 10.0)));
    }

    #[test]
    fn test_rect_degenerate() {
        assert!(DocRect::new(5.0, 0.0, 5.0, 10.0).is_degenerate());
        assert!(DocRect::new(0.0, 3.0, 10.0, 3.0).is_degenerate());
        assert!(!DocRect::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn test_around_is_centered() {
        let r = DocRect::around(DocPoint { x: 50.0, y: 60.0 }, 20.0);
        assert_eq!(r, DocRect::new(30.0, 40.0, 70.0, 80.0));
        assert_eq!(r.center(), DocPoint { x: 50.0, y: 60.0 });
    }

    #[test]
    fn test_value_display() {
        assert_eq!(ExtractedValue::Number(23.5).to_string(), "23.5");
        assert_eq!(ExtractedValue::NoData.to_string(), "No data");
    }

    #[test]
    fn test_image_id_label_is_one_based() {
        let id = SourceImageId {
            page_index: 0,
            image_index: 2,
        };
        assert_eq!(id.to_string(), "Page 1 - Image 3");
    }
}
