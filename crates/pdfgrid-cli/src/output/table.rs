use pdfgrid_core::session::ExtractionSession;
use pdfgrid_core::store::ExportRow;

pub fn print_images(session: &ExtractionSession) {
    if session.images().is_empty() {
        println!("No decodable images found.");
        return;
    }

    println!("  {:<3}  {:<18}  {:>11}  PDF coords", "#", "Image", "Pixels");
    for (i, img) in session.images().iter().enumerate() {
        let pixels = format!("{}x{}", img.pixels.width(), img.pixels.height());
        println!(
            "  {:<3}  {:<18}  {:>11}  {}",
            i + 1,
            img.id.to_string(),
            pixels,
            img.rect
        );
    }
}

pub fn print_points(rows: &[ExportRow]) {
    if rows.is_empty() {
        println!("No values extracted.");
        return;
    }

    println!(
        "  {:>10}  {:>10}  {:<14}  Source",
        "PDF X", "PDF Y", "Value"
    );
    for row in rows {
        println!(
            "  {:>10.1}  {:>10.1}  {:<14}  {}",
            row.doc_x,
            row.doc_y,
            row.value.to_string(),
            row.provenance
        );
    }
}

pub fn print_raw_text(label: &str, lines: &[String]) {
    println!("--- Raw text: {label} ---");
    if lines.is_empty() {
        println!("  (no text over this image)");
    }
    for line in lines {
        println!("  {line}");
    }
    println!();
}
