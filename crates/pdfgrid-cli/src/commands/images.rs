use pdfgrid_core::error::PdfGridError;
use std::path::Path;

use crate::output;

pub fn run(
    input_file: &Path,
    config: Option<&Path>,
    output_format: &str,
) -> Result<(), PdfGridError> {
    let session = super::open_session(input_file, config)?;

    match output_format {
        "json" => output::json::print_images(&session)?,
        _ => output::table::print_images(&session),
    }

    Ok(())
}
