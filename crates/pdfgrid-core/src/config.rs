use crate::error::PdfGridError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by the overlay renderer, the numeric extractor and the view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtractorConfig {
    pub grid: GridOptions,
    pub markers: MarkerOptions,
    /// Half-side of the square searched around a clicked point, in document units.
    pub search_radius: f64,
    pub zoom: ZoomConfig,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            grid: GridOptions::default(),
            markers: MarkerOptions::default(),
            search_radius: 20.0,
            zoom: ZoomConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridOptions {
    pub enabled: bool,
    /// Spacing between grid lines in document units.
    pub interval: f64,
    pub line_color: [u8; 4],
    /// Size multiplier for label glyphs (1 = 3x5 pixels per glyph).
    pub label_scale: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: 50.0,
            line_color: [255, 0, 0, 180],
            label_scale: 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerOptions {
    pub color: [u8; 4],
    pub radius: u32,
}

impl Default for MarkerOptions {
    fn default() -> Self {
        Self {
            color: [0, 255, 0, 255],
            radius: 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    pub min: f64,
    pub max: f64,
    pub wheel_in: f64,
    pub wheel_out: f64,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 0.1,
            max: 5.0,
            wheel_in: 1.2,
            wheel_out: 0.8,
        }
    }
}

impl ZoomConfig {
    /// Slider range in percent, derived from the scale bounds so both controls agree.
    pub fn slider_range(&self) -> (u32, u32) {
        (
            (self.min * 100.0).round() as u32,
            (self.max * 100.0).round() as u32,
        )
    }
}

/// Largest accepted label glyph multiplier.
pub const MAX_LABEL_SCALE: u32 = 16;

/// Largest accepted marker radius in pixels.
pub const MAX_MARKER_RADIUS: u32 = 1024;

/// Load a config from a JSON file.
pub fn load_config(path: &Path) -> Result<ExtractorConfig, PdfGridError> {
    let content = std::fs::read_to_string(path).map_err(|e| PdfGridError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: ExtractorConfig =
        serde_json::from_str(&content).map_err(|e| PdfGridError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    Ok(config)
}

/// Parse a config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<ExtractorConfig, PdfGridError> {
    let config: ExtractorConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

/// Check a grid interval on its own, for callers that change it at runtime.
pub fn validate_grid_interval(interval: f64) -> Result<(), PdfGridError> {
    if !interval.is_finite() || interval <= 0.0 {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "grid interval must be a positive number, got {interval}"
        )));
    }
    Ok(())
}

/// Validate that a config is well-formed.
pub fn validate_config(config: &ExtractorConfig) -> Result<(), PdfGridError> {
    validate_grid_interval(config.grid.interval)?;

    if config.grid.label_scale == 0 || config.grid.label_scale > MAX_LABEL_SCALE {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "grid label_scale must be between 1 and {MAX_LABEL_SCALE}, got {}",
            config.grid.label_scale
        )));
    }

    if config.markers.radius > MAX_MARKER_RADIUS {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "marker radius must be at most {MAX_MARKER_RADIUS}, got {}",
            config.markers.radius
        )));
    }

    if !config.search_radius.is_finite() || config.search_radius < 0.0 {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "search_radius must be a non-negative number, got {}",
            config.search_radius
        )));
    }

    validate_zoom(&config.zoom)
}

/// Check zoom bounds and wheel factors.
///
/// The bounds must be finite with `0 < min <= max`, so clamping to them can
/// never panic or yield a zero scale.
pub fn validate_zoom(zoom: &ZoomConfig) -> Result<(), PdfGridError> {
    if !zoom.min.is_finite() || zoom.min <= 0.0 {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "zoom min must be positive, got {}",
            zoom.min
        )));
    }
    if !zoom.max.is_finite() || zoom.max < zoom.min {
        return Err(PdfGridError::InvalidConfiguration(format!(
            "zoom max ({}) must not be below zoom min ({})",
            zoom.max, zoom.min
        )));
    }
    for (name, factor) in [("wheel_in", zoom.wheel_in), ("wheel_out", zoom.wheel_out)] {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(PdfGridError::InvalidConfiguration(format!(
                "zoom {name} factor must be positive, got {factor}"
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ExtractorConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.grid.interval, 50.0);
        assert_eq!(config.search_radius, 20.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = parse_config_str(r#"{ "grid": { "interval": 25 } }"#).unwrap();
        assert_eq!(config.grid.interval, 25.0);
        assert!(config.grid.enabled);
        assert_eq!(config.zoom.max, 5.0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let err = parse_config_str(r#"{ "grid": { "interval": 0 } }"#).unwrap_err();
        assert!(matches!(err, PdfGridError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_negative_interval_rejected() {
        assert!(matches!(
            validate_grid_interval(-10.0),
            Err(PdfGridError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_inverted_zoom_bounds_rejected() {
        let err = parse_config_str(r#"{ "zoom": { "min": 2.0, "max": 1.0 } }"#).unwrap_err();
        assert!(matches!(err, PdfGridError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_label_scale_and_radius_bounded() {
        let err = parse_config_str(r#"{ "grid": { "label_scale": 1000 } }"#).unwrap_err();
        assert!(matches!(err, PdfGridError::InvalidConfiguration(_)));
        let err = parse_config_str(r#"{ "markers": { "radius": 4000000000 } }"#).unwrap_err();
        assert!(matches!(err, PdfGridError::InvalidConfiguration(_)));

        let config = parse_config_str(r#"{ "grid": { "label_scale": 16 }, "markers": { "radius": 1024 } }"#)
            .unwrap();
        assert_eq!(config.grid.label_scale, MAX_LABEL_SCALE);
    }

    #[test]
    fn test_zoom_bounds_validated() {
        let inverted = ZoomConfig {
            min: 2.0,
            max: 1.0,
            ..Default::default()
        };
        assert!(validate_zoom(&inverted).is_err());
        let zero_min = ZoomConfig {
            min: 0.0,
            ..Default::default()
        };
        assert!(validate_zoom(&zero_min).is_err());
        let nan_max = ZoomConfig {
            max: f64::NAN,
            ..Default::default()
        };
        assert!(validate_zoom(&nan_max).is_err());
        assert!(validate_zoom(&ZoomConfig::default()).is_ok());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse_config_str(r#"{ "gird": {} }"#).is_err());
    }

    #[test]
    fn test_slider_range_matches_bounds() {
        assert_eq!(ZoomConfig::default().slider_range(), (10, 500));
    }
}
