use crate::model::{DataPoint, ExtractedValue, Provenance, SourceImageId};
use serde::{Deserialize, Serialize};

/// One row of the exported data table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub doc_x: f64,
    pub doc_y: f64,
    pub value: ExtractedValue,
    pub provenance: Provenance,
}

impl From<&DataPoint> for ExportRow {
    fn from(point: &DataPoint) -> Self {
        ExportRow {
            doc_x: point.x,
            doc_y: point.y,
            value: point.value,
            provenance: point.provenance,
        }
    }
}

/// Extracted points in insertion order.
///
/// Insertion order is the display and export order. Points are never edited
/// or removed individually; the whole store is cleared when a new document
/// is loaded.
#[derive(Debug, Clone, Default)]
pub struct DataPointStore {
    points: Vec<DataPoint>,
}

impl DataPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: DataPoint) {
        self.points.push(point);
    }

    pub fn extend(&mut self, points: impl IntoIterator<Item = DataPoint>) {
        self.points.extend(points);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DataPoint> {
        self.points.iter()
    }

    /// Points belonging to one image, in insertion order.
    pub fn for_image(&self, image: SourceImageId) -> Vec<&DataPoint> {
        self.points.iter().filter(|p| p.image == image).collect()
    }

    pub fn rows(&self) -> Vec<ExportRow> {
        self.points.iter().map(ExportRow::from).collect()
    }

    pub(crate) fn clear(&mut self) {
        self.points.clear();
    }
}
