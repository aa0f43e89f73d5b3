use pdfgrid_core::error::PdfGridError;
use pdfgrid_core::model::{DocPoint, PixelPoint, Size, WidgetPoint};
use std::path::Path;

use crate::output;

/// How `--at` coordinates are interpreted.
pub struct ViewArgs {
    pub space: String,
    pub widget: Option<(u32, u32)>,
    pub zoom: u32,
    pub pan: Option<(i32, i32)>,
}

pub fn run(
    input_file: &Path,
    config: Option<&Path>,
    image: usize,
    at: &[(f64, f64)],
    view: ViewArgs,
    output_format: &str,
) -> Result<(), PdfGridError> {
    let mut session = super::open_session(input_file, config)?;
    let index = super::image_index(&session, image)?;
    session.select_image(index)?;

    match view.space.as_str() {
        "doc" => {
            for &(x, y) in at {
                session.pick_document_point(DocPoint { x, y })?;
            }
        }
        "pixel" => {
            for &(x, y) in at {
                session.pick_pixel(PixelPoint { x, y })?;
            }
        }
        "widget" => {
            let dims = session.image(index)?.dimensions();
            let widget = view
                .widget
                .map(|(w, h)| Size::new(w, h))
                .unwrap_or(dims);
            session.set_zoom_percent(view.zoom);
            if let Some((dx, dy)) = view.pan {
                session.pan_by(dx, dy);
            }
            for &(x, y) in at {
                let point = WidgetPoint {
                    x: x.round() as i32,
                    y: y.round() as i32,
                };
                session.on_pointer_click(point, widget)?;
            }
        }
        other => {
            return Err(PdfGridError::InvalidConfiguration(format!(
                "unknown coordinate space '{other}' (expected doc, pixel or widget)"
            )));
        }
    }

    let rows = session.export_rows();
    match output_format {
        "json" => output::json::print_points(&rows)?,
        "csv" => session.write_csv(&mut std::io::stdout().lock())?,
        _ => output::table::print_points(&rows),
    }

    Ok(())
}
