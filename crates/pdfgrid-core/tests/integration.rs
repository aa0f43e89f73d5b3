//! Integration tests for the extraction session end to end.
//!
//! Uses a MockDocument that serves in-memory rasters and text spans without
//! invoking pdftohtml, so these tests run without poppler-utils.

use image::{Rgba, RgbaImage};
use pdfgrid_core::config::ExtractorConfig;
use pdfgrid_core::error::PdfGridError;
use pdfgrid_core::export::encode_png;
use pdfgrid_core::extraction::{clip_spans, DocumentSource, EmbeddedImage};
use pdfgrid_core::model::{DocRect, ExtractedValue, Provenance, Size, TextSpan, WidgetPoint};
use pdfgrid_core::session::ExtractionSession;

const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

struct MockDocument {
    images: Vec<EmbeddedImage>,
    pages: Vec<Vec<TextSpan>>,
}

impl DocumentSource for MockDocument {
    fn embedded_images(&self) -> Result<Vec<EmbeddedImage>, PdfGridError> {
        Ok(self.images.clone())
    }

    fn text_spans(&self, page_index: usize, clip: &DocRect) -> Result<Vec<TextSpan>, PdfGridError> {
        let spans = self
            .pages
            .get(page_index)
            .ok_or_else(|| PdfGridError::SourceUnavailable(format!("no page {page_index}")))?;
        Ok(clip_spans(spans, clip))
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn backend_name(&self) -> &str {
        "mock"
    }
}

fn span(text: &str, x0: f64, y0: f64, x1: f64, y1: f64, line: usize) -> TextSpan {
    TextSpan {
        text: text.to_string(),
        bbox: DocRect::new(x0, y0, x1, y1),
        line,
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    encode_png(&RgbaImage::from_pixel(width, height, BLUE)).unwrap()
}

/// Two pages. Page 1 holds a 200x150 px chart placed at (100,400)-(300,550),
/// so one pixel is one point. Page 2 holds a 100x100 px chart at the page
/// origin, followed by an image whose bytes are not a valid raster.
fn chart_document() -> MockDocument {
    MockDocument {
        images: vec![
            EmbeddedImage {
                page_index: 0,
                image_index: 0,
                bytes: png(200, 150),
                rect: DocRect::new(100.0, 400.0, 300.0, 550.0),
            },
            EmbeddedImage {
                page_index: 1,
                image_index: 0,
                bytes: png(100, 100),
                rect: DocRect::new(0.0, 0.0, 100.0, 100.0),
            },
            EmbeddedImage {
                page_index: 1,
                image_index: 1,
                bytes: b"not an image".to_vec(),
                rect: DocRect::new(0.0, 200.0, 50.0, 250.0),
            },
        ],
        pages: vec![
            vec![
                span("12.5", 140.0, 500.0, 160.0, 510.0, 0),
                span("Temp: -3", 200.0, 450.0, 230.0, 460.0, 1),
                span("label", 120.0, 420.0, 140.0, 430.0, 2),
                span("99", 400.0, 100.0, 420.0, 110.0, 3),
            ],
            vec![span("7 8", 40.0, 40.0, 60.0, 60.0, 0)],
        ],
    }
}

fn open_session() -> ExtractionSession {
    ExtractionSession::open(Box::new(chart_document()), ExtractorConfig::default()).unwrap()
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------
#[test]
fn undecodable_images_are_skipped() {
    let session = open_session();
    assert_eq!(session.images().len(), 2);
    assert_eq!(
        session.image_labels(),
        vec!["Page 1 - Image 1", "Page 2 - Image 1"]
    );
    assert_eq!(session.current_index(), Some(0));
    assert_eq!(
        session.image_summary(0).unwrap(),
        "Page 1, Image 1 - PDF Coords: (100.0, 400.0) to (300.0, 550.0)"
    );
}

#[test]
fn document_without_images_rejects_clicks() {
    let doc = MockDocument {
        images: vec![],
        pages: vec![vec![]],
    };
    let mut session = ExtractionSession::open(Box::new(doc), ExtractorConfig::default()).unwrap();
    assert_eq!(session.current_index(), None);
    let err = session
        .on_pointer_click(WidgetPoint { x: 1, y: 1 }, Size::new(10, 10))
        .unwrap_err();
    assert!(matches!(err, PdfGridError::NoImageSelected));
}

#[test]
fn loading_new_document_clears_points() {
    let mut session = open_session();
    session.on_auto_extract(0).unwrap();
    session.set_zoom_percent(250);
    assert!(!session.store().is_empty());

    session.load(Box::new(chart_document())).unwrap();
    assert!(session.store().is_empty());
    assert_eq!(session.view().scale(), 1.0);
}

// ---------------------------------------------------------------------------
// Manual picking
// ---------------------------------------------------------------------------
#[test]
fn click_records_nearest_number() {
    let mut session = open_session();
    // widget equals the image, so widget (50,45) is pixel (50,45) -> doc (150,505)
    let point = session
        .on_pointer_click(WidgetPoint { x: 50, y: 45 }, Size::new(200, 150))
        .unwrap();
    assert_eq!(point.x, 150.0);
    assert_eq!(point.y, 505.0);
    assert_eq!(point.value, ExtractedValue::Number(12.5));
    assert_eq!(point.provenance, Provenance::Manual);
    assert_eq!(session.store().len(), 1);
}

#[test]
fn click_far_from_text_records_no_data() {
    let mut session = open_session();
    let point = session
        .on_pointer_click(WidgetPoint { x: 190, y: 140 }, Size::new(200, 150))
        .unwrap();
    assert_eq!(point.value, ExtractedValue::NoData);
    assert_eq!(session.export_rows()[0].value, ExtractedValue::NoData);
}

#[test]
fn click_accounts_for_zoom_and_centering() {
    let mut session = open_session();
    session.set_zoom_percent(200);
    // rendered 400x300 inside a 600x400 widget: origin at (100,50)
    let point = session
        .on_pointer_click(WidgetPoint { x: 200, y: 140 }, Size::new(600, 400))
        .unwrap();
    assert_eq!((point.x, point.y), (150.0, 505.0));
    assert_eq!(point.value.number(), Some(12.5));
}

#[test]
fn click_accounts_for_pan() {
    let mut session = open_session();
    session.pan_by(30, -20);
    let point = session
        .on_pointer_click(WidgetPoint { x: 80, y: 25 }, Size::new(200, 150))
        .unwrap();
    assert_eq!((point.x, point.y), (150.0, 505.0));
}

// ---------------------------------------------------------------------------
// Auto-extraction and export
// ---------------------------------------------------------------------------
#[test]
fn auto_extract_scans_only_the_image_region() {
    let mut session = open_session();
    let points = session.on_auto_extract(0).unwrap();
    let values: Vec<_> = points.iter().map(|p| p.value).collect();
    assert_eq!(
        values,
        vec![
            ExtractedValue::Number(12.5),
            ExtractedValue::Number(-3.0),
        ]
    );
    assert_eq!((points[1].x, points[1].y), (215.0, 455.0));
    assert!(points.iter().all(|p| p.provenance == Provenance::Auto));
}

#[test]
fn auto_extract_every_number_in_span() {
    let mut session = open_session();
    let points = session.on_auto_extract(1).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].position(), points[1].position());
}

#[test]
fn export_order_independent_of_displayed_image() {
    let mut session = open_session();
    session
        .on_pointer_click(WidgetPoint { x: 50, y: 45 }, Size::new(200, 150))
        .unwrap();
    session.select_image(1).unwrap();
    session.on_auto_extract(1).unwrap();
    session.select_image(0).unwrap();
    session.on_auto_extract(0).unwrap();

    let rows = session.export_rows();
    let sources: Vec<_> = rows.iter().map(|r| r.provenance).collect();
    assert_eq!(
        sources,
        vec![
            Provenance::Manual,
            Provenance::Auto,
            Provenance::Auto,
            Provenance::Auto,
            Provenance::Auto,
        ]
    );
    assert_eq!(rows[1].value, ExtractedValue::Number(7.0));

    let mut csv = Vec::new();
    session.write_csv(&mut csv).unwrap();
    let text = String::from_utf8(csv).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("PDF_X,PDF_Y,Value,Source"));
    assert_eq!(lines.next(), Some("150.0,505.0,12.5,Manual click"));
    assert_eq!(lines.count(), 4);
}

#[test]
fn raw_text_lists_lines_over_image() {
    let session = open_session();
    assert_eq!(
        session.raw_text(0).unwrap(),
        vec!["12.5", "Temp: -3", "label"]
    );
}

// ---------------------------------------------------------------------------
// View and grid controls
// ---------------------------------------------------------------------------
#[test]
fn zoom_stays_within_bounds() {
    let mut session = open_session();
    for _ in 0..50 {
        session.zoom_wheel(120);
    }
    assert_eq!(session.view().scale(), 5.0);
    for _ in 0..50 {
        session.zoom_wheel(-120);
    }
    assert_eq!(session.view().scale(), 0.1);
    assert_eq!(session.set_zoom_percent(1000), 5.0);
}

#[test]
fn selecting_image_resets_view() {
    let mut session = open_session();
    session.set_zoom_percent(300);
    session.pan_by(10, 10);
    session.select_image(1).unwrap();
    assert_eq!(session.view().scale(), 1.0);
    assert_eq!(session.view().pan(), (0, 0));

    let err = session.select_image(5).unwrap_err();
    assert!(matches!(err, PdfGridError::ImageIndex { index: 5, count: 2 }));
}

#[test]
fn grid_interval_must_be_positive() {
    let mut session = open_session();
    assert!(matches!(
        session.set_grid_interval(0.0),
        Err(PdfGridError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        session.set_grid_interval(-10.0),
        Err(PdfGridError::InvalidConfiguration(_))
    ));
    session.set_grid_interval(25.0).unwrap();
    assert_eq!(session.config().grid.interval, 25.0);
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------
#[test]
fn overlay_keeps_image_dimensions() {
    let mut session = open_session();
    session.on_auto_extract(0).unwrap();
    let overlay = session.render_overlay(0).unwrap();
    assert_eq!(overlay.dimensions(), (200, 150));
    assert_ne!(overlay, session.images()[0].pixels);

    session.set_grid_enabled(false);
    assert_eq!(session.render_overlay(0).unwrap(), session.images()[0].pixels);
}

#[test]
fn view_centers_image_on_white_canvas() {
    let session = open_session();
    let view = session.render_view(Size::new(400, 300)).unwrap();
    assert_eq!(view.dimensions(), (400, 300));
    assert_eq!(*view.get_pixel(0, 0), WHITE);
    // image pixel (25,25) lands at (125,100) with the origin at (100,75)
    assert_eq!(*view.get_pixel(125, 100), BLUE);
}

#[test]
fn save_overlay_writes_tiff() {
    let session = open_session();
    let dir = tempfile::tempdir().unwrap();
    let written = session
        .save_overlay(1, &dir.path().join("chart.tif"))
        .unwrap();
    let reloaded = image::open(&written).unwrap();
    assert_eq!((reloaded.width(), reloaded.height()), (100, 100));
}
