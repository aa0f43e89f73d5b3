use crate::config::{validate_zoom, ZoomConfig};
use crate::error::PdfGridError;
use crate::model::Size;

/// Zoom and pan of the displayed image.
///
/// The scale factor is private so every write goes through the clamp; it can
/// never be zero or leave the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    scale: f64,
    pan: (i32, i32),
    zoom: ZoomConfig,
}

impl ViewState {
    /// A view at 100% (clamped to the bounds) with no pan.
    ///
    /// Fails when the zoom bounds are not finite with `0 < min <= max`.
    pub fn new(zoom: ZoomConfig) -> Result<Self, PdfGridError> {
        validate_zoom(&zoom)?;
        Ok(ViewState {
            scale: 1.0_f64.clamp(zoom.min, zoom.max),
            pan: (0, 0),
            zoom,
        })
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn pan(&self) -> (i32, i32) {
        self.pan
    }

    /// Apply a requested scale factor, clamped to the configured bounds.
    ///
    /// Returns the scale actually applied.
    pub fn set_scale(&mut self, requested: f64) -> Result<f64, PdfGridError> {
        if !requested.is_finite() {
            return Err(PdfGridError::InvalidConfiguration(format!(
                "scale factor must be finite, got {requested}"
            )));
        }
        let clamped = requested.clamp(self.zoom.min, self.zoom.max);
        if clamped != requested {
            log::debug!("scale {requested} clamped to {clamped}");
        }
        self.scale = clamped;
        Ok(clamped)
    }

    /// One wheel notch: positive delta zooms in, anything else zooms out.
    pub fn zoom_wheel(&mut self, delta: i32) -> f64 {
        let factor = if delta > 0 {
            self.zoom.wheel_in
        } else {
            self.zoom.wheel_out
        };
        self.scale = (self.scale * factor).clamp(self.zoom.min, self.zoom.max);
        self.scale
    }

    /// Slider position in percent (100 = actual size).
    pub fn set_zoom_percent(&mut self, percent: u32) -> f64 {
        self.scale = (f64::from(percent) / 100.0).clamp(self.zoom.min, self.zoom.max);
        self.scale
    }

    pub fn zoom_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }

    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        self.pan = (self.pan.0.saturating_add(dx), self.pan.1.saturating_add(dy));
    }

    pub fn reset(&mut self) {
        self.scale = 1.0_f64.clamp(self.zoom.min, self.zoom.max);
        self.pan = (0, 0);
    }

    /// On-screen size of an image with the given pixel dimensions at the current scale.
    pub fn rendered_size(&self, dims: Size) -> Size {
        Size::new(
            (f64::from(dims.width) * self.scale).round() as u32,
            (f64::from(dims.height) * self.scale).round() as u32,
        )
    }
}

impl Default for ViewState {
    fn default() -> Self {
        let zoom = ZoomConfig::default();
        ViewState {
            scale: 1.0_f64.clamp(zoom.min, zoom.max),
            pan: (0, 0),
            zoom,
        }
    }
}
