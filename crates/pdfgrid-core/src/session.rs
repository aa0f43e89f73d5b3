use crate::config::{validate_config, validate_grid_interval, ExtractorConfig};
use crate::coords::view::ViewState;
use crate::coords::{draw_origin, image_pixel_to_document, widget_to_document};
use crate::error::PdfGridError;
use crate::export;
use crate::extraction::DocumentSource;
use crate::model::{
    DataPoint, DocPoint, ExtractedValue, PixelPoint, Provenance, Size, SourceImage, SourceImageId,
    WidgetPoint,
};
use crate::overlay::render_overlay;
use crate::parsing::{point_query, raw_text_lines, region_scan};
use crate::store::{DataPointStore, ExportRow};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::io::Write;
use std::path::{Path, PathBuf};

/// State of one loaded document: its images, the displayed image and its
/// view, and every point extracted so far.
pub struct ExtractionSession {
    document: Box<dyn DocumentSource>,
    images: Vec<SourceImage>,
    config: ExtractorConfig,
    store: DataPointStore,
    current: Option<usize>,
    view: ViewState,
}

impl ExtractionSession {
    /// Open a session on a document, displaying its first image.
    pub fn open(
        document: Box<dyn DocumentSource>,
        config: ExtractorConfig,
    ) -> Result<Self, PdfGridError> {
        validate_config(&config)?;
        let view = ViewState::new(config.zoom)?;
        let images = decode_images(document.as_ref())?;
        log::info!(
            "loaded {} image(s) from {} backend",
            images.len(),
            document.backend_name()
        );
        let current = if images.is_empty() { None } else { Some(0) };

        Ok(ExtractionSession {
            document,
            images,
            view,
            config,
            store: DataPointStore::new(),
            current,
        })
    }

    /// Replace the document, discarding all points and view state.
    ///
    /// If the new document cannot be read the session is left unchanged.
    pub fn load(&mut self, document: Box<dyn DocumentSource>) -> Result<(), PdfGridError> {
        let images = decode_images(document.as_ref())?;
        self.document = document;
        self.images = images;
        self.store.clear();
        self.view.reset();
        self.current = if self.images.is_empty() { None } else { Some(0) };
        Ok(())
    }

    pub fn images(&self) -> &[SourceImage] {
        &self.images
    }

    pub fn image(&self, index: usize) -> Result<&SourceImage, PdfGridError> {
        self.images.get(index).ok_or(PdfGridError::ImageIndex {
            index,
            count: self.images.len(),
        })
    }

    /// Labels like "Page 1 - Image 2", one per image.
    pub fn image_labels(&self) -> Vec<String> {
        self.images.iter().map(|img| img.id.to_string()).collect()
    }

    pub fn image_summary(&self, index: usize) -> Result<String, PdfGridError> {
        let img = self.image(index)?;
        Ok(format!(
            "Page {}, Image {} - PDF Coords: {}",
            img.id.page_index + 1,
            img.id.image_index + 1,
            img.rect
        ))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_image(&self) -> Result<&SourceImage, PdfGridError> {
        let index = self.current.ok_or(PdfGridError::NoImageSelected)?;
        self.image(index)
    }

    /// Display another image. The view returns to 100% with no pan.
    pub fn select_image(&mut self, index: usize) -> Result<&SourceImage, PdfGridError> {
        self.image(index)?;
        if self.current != Some(index) {
            self.view.reset();
        }
        self.current = Some(index);
        self.image(index)
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn zoom_wheel(&mut self, delta: i32) -> f64 {
        self.view.zoom_wheel(delta)
    }

    pub fn set_zoom_percent(&mut self, percent: u32) -> f64 {
        self.view.set_zoom_percent(percent)
    }

    pub fn set_scale(&mut self, scale: f64) -> Result<f64, PdfGridError> {
        self.view.set_scale(scale)
    }

    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        self.view.pan_by(dx, dy);
    }

    pub fn set_grid_enabled(&mut self, enabled: bool) {
        self.config.grid.enabled = enabled;
    }

    pub fn set_grid_interval(&mut self, interval: f64) -> Result<(), PdfGridError> {
        validate_grid_interval(interval)?;
        self.config.grid.interval = interval;
        Ok(())
    }

    /// Handle a click on the displayed image, recording the number nearest to it.
    ///
    /// The returned point carries `NoData` when no number is within the search radius.
    pub fn on_pointer_click(
        &mut self,
        point: WidgetPoint,
        widget: Size,
    ) -> Result<DataPoint, PdfGridError> {
        let img = self.current_image()?;
        let doc = widget_to_document(point, &self.view, widget, &img.rect, img.dimensions())?;
        self.pick_document_point(doc)
    }

    /// Record the number nearest to a pixel of the displayed image.
    pub fn pick_pixel(&mut self, pixel: PixelPoint) -> Result<DataPoint, PdfGridError> {
        let img = self.current_image()?;
        let doc = image_pixel_to_document(pixel, &img.rect, img.dimensions())?;
        self.pick_document_point(doc)
    }

    /// Record the number nearest to a document-space point on the displayed image's page.
    pub fn pick_document_point(&mut self, doc: DocPoint) -> Result<DataPoint, PdfGridError> {
        let id = self.current_image()?.id;
        let found = point_query(
            self.document.as_ref(),
            id.page_index,
            doc,
            self.config.search_radius,
        )?;

        let value = match found {
            Some(m) => {
                log::debug!("click at ({:.1}, {:.1}) matched '{}'", doc.x, doc.y, m.text);
                ExtractedValue::Number(m.value)
            }
            None => ExtractedValue::NoData,
        };

        let point = DataPoint {
            x: doc.x,
            y: doc.y,
            value,
            provenance: Provenance::Manual,
            image: id,
        };
        self.store.push(point.clone());
        Ok(point)
    }

    /// Scan the text covering an image and record every number found.
    pub fn on_auto_extract(&mut self, index: usize) -> Result<Vec<DataPoint>, PdfGridError> {
        let img = self.image(index)?;
        let (id, rect) = (img.id, img.rect);
        let points = region_scan(self.document.as_ref(), id.page_index, &rect, id)?;
        log::info!("auto-extracted {} value(s) from {}", points.len(), id);
        self.store.extend(points.iter().cloned());
        Ok(points)
    }

    /// Text lines lying over an image.
    pub fn raw_text(&self, index: usize) -> Result<Vec<String>, PdfGridError> {
        let img = self.image(index)?;
        let spans = self.document.text_spans(img.id.page_index, &img.rect)?;
        Ok(raw_text_lines(&spans))
    }

    /// The image with its grid and the markers of its own points.
    pub fn render_overlay(&self, index: usize) -> Result<RgbaImage, PdfGridError> {
        let img = self.image(index)?;
        let points = self.store.for_image(img.id);
        render_overlay(
            &img.pixels,
            &img.rect,
            &self.config.grid,
            &self.config.markers,
            &points,
        )
    }

    /// What the widget shows: the overlay scaled and placed at the draw origin.
    pub fn render_view(&self, widget: Size) -> Result<RgbaImage, PdfGridError> {
        let index = self.current.ok_or(PdfGridError::NoImageSelected)?;
        let overlay = self.render_overlay(index)?;
        let dims = Size::new(overlay.width(), overlay.height());
        let rendered = self.view.rendered_size(dims);

        let scaled = if rendered == dims {
            overlay
        } else {
            imageops::resize(
                &overlay,
                rendered.width.max(1),
                rendered.height.max(1),
                FilterType::Triangle,
            )
        };

        let mut canvas = RgbaImage::from_pixel(widget.width, widget.height, Rgba([255; 4]));
        let (x, y) = draw_origin(&self.view, rendered, widget);
        imageops::overlay(&mut canvas, &scaled, x, y);
        Ok(canvas)
    }

    pub fn store(&self) -> &DataPointStore {
        &self.store
    }

    pub fn points_for(&self, id: SourceImageId) -> Vec<&DataPoint> {
        self.store.for_image(id)
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.store.rows()
    }

    pub fn write_csv<W: Write>(&self, writer: &mut W) -> Result<(), PdfGridError> {
        export::write_csv(writer, &self.export_rows())
    }

    pub fn export_csv(&self, path: &Path) -> Result<(), PdfGridError> {
        export::write_csv_file(path, &self.export_rows())
    }

    /// Save the overlay of an image as PNG or TIFF, returning the path written.
    pub fn save_overlay(&self, index: usize, path: &Path) -> Result<PathBuf, PdfGridError> {
        let overlay = self.render_overlay(index)?;
        export::save_image(&overlay, path)
    }
}

/// Decode every embedded image, skipping the ones that are not valid rasters.
fn decode_images(document: &dyn DocumentSource) -> Result<Vec<SourceImage>, PdfGridError> {
    let mut images = Vec::new();

    for embedded in document.embedded_images()? {
        let id = SourceImageId {
            page_index: embedded.page_index,
            image_index: embedded.image_index,
        };
        match image::load_from_memory(&embedded.bytes) {
            Ok(decoded) => images.push(SourceImage {
                id,
                rect: embedded.rect,
                pixels: decoded.to_rgba8(),
            }),
            Err(e) => log::warn!("skipping {}: {}", id, e),
        }
    }

    Ok(images)
}
