use pdfgrid_core::error::PdfGridError;
use pdfgrid_core::session::ExtractionSession;
use pdfgrid_core::store::ExportRow;

pub fn print_images(session: &ExtractionSession) -> Result<(), PdfGridError> {
    let images: Vec<serde_json::Value> = session
        .images()
        .iter()
        .enumerate()
        .map(|(i, img)| {
            serde_json::json!({
                "number": i + 1,
                "label": img.id.to_string(),
                "source": img.id,
                "rect": img.rect,
                "width": img.pixels.width(),
                "height": img.pixels.height(),
            })
        })
        .collect();
    let json = serde_json::to_string_pretty(&images)?;
    println!("{json}");
    Ok(())
}

pub fn print_points(rows: &[ExportRow]) -> Result<(), PdfGridError> {
    let json = serde_json::to_string_pretty(rows)?;
    println!("{json}");
    Ok(())
}
