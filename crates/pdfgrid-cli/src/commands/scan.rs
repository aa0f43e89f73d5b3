use pdfgrid_core::error::PdfGridError;
use std::path::{Path, PathBuf};

use crate::output;

pub fn run(
    input_file: &Path,
    config: Option<&Path>,
    image: Option<usize>,
    output_format: &str,
    out: Option<PathBuf>,
    raw: bool,
) -> Result<(), PdfGridError> {
    let mut session = super::open_session(input_file, config)?;

    let indices: Vec<usize> = match image {
        Some(number) => vec![super::image_index(&session, number)?],
        None => (0..session.images().len()).collect(),
    };

    for &index in &indices {
        if raw {
            let label = session.image(index)?.id.to_string();
            output::table::print_raw_text(&label, &session.raw_text(index)?);
        }
        session.on_auto_extract(index)?;
    }

    let rows = session.export_rows();
    match output_format {
        "json" => output::json::print_points(&rows)?,
        "csv" => session.write_csv(&mut std::io::stdout().lock())?,
        _ => output::table::print_points(&rows),
    }

    if let Some(path) = out {
        session.export_csv(&path)?;
        eprintln!("{} value(s) written to {}", rows.len(), path.display());
    }

    Ok(())
}
