use pdfgrid_core::error::PdfGridError;
use pdfgrid_core::export::save_image;
use pdfgrid_core::model::{DocPoint, Size};
use std::path::{Path, PathBuf};

pub struct OverlayArgs {
    pub input_file: PathBuf,
    pub image: usize,
    pub out: PathBuf,
    pub interval: Option<f64>,
    pub no_grid: bool,
    pub auto: bool,
    pub at: Vec<(f64, f64)>,
    pub view: Option<(u32, u32)>,
    pub zoom: u32,
    pub pan: Option<(i32, i32)>,
}

pub fn run(args: OverlayArgs, config: Option<&Path>) -> Result<(), PdfGridError> {
    let mut session = super::open_session(&args.input_file, config)?;
    let index = super::image_index(&session, args.image)?;
    session.select_image(index)?;

    if let Some(interval) = args.interval {
        session.set_grid_interval(interval)?;
    }
    session.set_grid_enabled(!args.no_grid);

    if args.auto {
        session.on_auto_extract(index)?;
    }
    for &(x, y) in &args.at {
        session.pick_document_point(DocPoint { x, y })?;
    }

    let written = match args.view {
        Some((w, h)) => {
            session.set_zoom_percent(args.zoom);
            if let Some((dx, dy)) = args.pan {
                session.pan_by(dx, dy);
            }
            let view = session.render_view(Size::new(w, h))?;
            save_image(&view, &args.out)?
        }
        None => session.save_overlay(index, &args.out)?,
    };

    eprintln!(
        "{} with {} marker(s) saved to {}",
        session.image(index)?.id,
        session.store().len(),
        written.display()
    );
    Ok(())
}
