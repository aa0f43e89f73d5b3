use pdfgrid_core::config::{load_config, ExtractorConfig};
use pdfgrid_core::error::PdfGridError;
use std::path::Path;

pub fn show() -> Result<(), PdfGridError> {
    let json = serde_json::to_string_pretty(&ExtractorConfig::default())?;
    println!("{json}");
    Ok(())
}

pub fn validate(path: &Path) -> Result<(), PdfGridError> {
    let config = load_config(path)?;
    let (min, max) = config.zoom.slider_range();
    println!("Valid settings file: {}", path.display());
    println!(
        "  grid: {} every {} units",
        if config.grid.enabled { "on" } else { "off" },
        config.grid.interval
    );
    println!("  search radius: {} units", config.search_radius);
    println!("  zoom: {min}% to {max}%");
    Ok(())
}
