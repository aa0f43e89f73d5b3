use crate::error::PdfGridError;
use crate::store::ExportRow;
use image::{ImageFormat, RgbaImage};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

pub const CSV_HEADER: &str = "PDF_X,PDF_Y,Value,Source";

/// Write rows as CSV: coordinates to one decimal place, values as extracted.
pub fn write_csv<W: Write>(writer: &mut W, rows: &[ExportRow]) -> Result<(), PdfGridError> {
    writeln!(writer, "{CSV_HEADER}")?;
    for row in rows {
        writeln!(
            writer,
            "{:.1},{:.1},{},{}",
            row.doc_x, row.doc_y, row.value, row.provenance
        )?;
    }
    Ok(())
}

pub fn write_csv_file(path: &Path, rows: &[ExportRow]) -> Result<(), PdfGridError> {
    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_csv(&mut file, rows)?;
    file.flush()?;
    Ok(())
}

/// Pick the output format from the file extension.
///
/// `.tif`/`.tiff` give TIFF and `.png` gives PNG. Any other or missing
/// extension gets `.png` appended.
pub fn image_target(path: &Path) -> (PathBuf, ImageFormat) {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("tif") | Some("tiff") => (path.to_path_buf(), ImageFormat::Tiff),
        Some("png") => (path.to_path_buf(), ImageFormat::Png),
        _ => {
            let mut with_ext = path.as_os_str().to_owned();
            with_ext.push(".png");
            (PathBuf::from(with_ext), ImageFormat::Png)
        }
    }
}

/// Save an image, returning the path actually written.
pub fn save_image(image: &RgbaImage, path: &Path) -> Result<PathBuf, PdfGridError> {
    let (target, format) = image_target(path);
    image.save_with_format(&target, format)?;
    log::info!("saved {:?} image to {}", format, target.display());
    Ok(target)
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, PdfGridError> {
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ExtractedValue, Provenance};
    use image::Rgba;

    #[test]
    fn test_csv_format() {
        let rows = vec![
            ExportRow {
                doc_x: 120.04,
                doc_y: 88.06,
                value: ExtractedValue::Number(23.5),
                provenance: Provenance::Manual,
            },
            ExportRow {
                doc_x: 5.0,
                doc_y: -1.26,
                value: ExtractedValue::NoData,
                provenance: Provenance::Auto,
            },
        ];
        let mut out = Vec::new();
        write_csv(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "PDF_X,PDF_Y,Value,Source\n120.0,88.1,23.5,Manual click\n5.0,-1.3,No data,Auto-extracted\n"
        );
    }

    #[test]
    fn test_image_target_by_extension() {
        assert_eq!(
            image_target(Path::new("out.TIFF")),
            (PathBuf::from("out.TIFF"), ImageFormat::Tiff)
        );
        assert_eq!(
            image_target(Path::new("out.png")),
            (PathBuf::from("out.png"), ImageFormat::Png)
        );
        assert_eq!(
            image_target(Path::new("figure")),
            (PathBuf::from("figure.png"), ImageFormat::Png)
        );
        assert_eq!(
            image_target(Path::new("figure.v2")),
            (PathBuf::from("figure.v2.png"), ImageFormat::Png)
        );
    }

    #[test]
    fn test_save_and_reload_png() {
        let dir = tempfile::tempdir().unwrap();
        let img = RgbaImage::from_pixel(3, 2, Rgba([1, 2, 3, 255]));
        let written = save_image(&img, &dir.path().join("grid")).unwrap();
        assert_eq!(written, dir.path().join("grid.png"));
        let reloaded = image::open(&written).unwrap().to_rgba8();
        assert_eq!(reloaded, img);
    }

    #[test]
    fn test_encode_png_signature() {
        let img = RgbaImage::new(1, 1);
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }
}
