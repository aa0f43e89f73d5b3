//! Conversions between widget, image-pixel and document coordinates.
//!
//! Widget space is what the user clicks on: the scaled image is centered in
//! the widget and shifted by the pan offset. Image pixel space has its origin
//! at the top-left of the raster. Document space is the page's own system,
//! origin bottom-left, so the vertical axis flips between the last two.

pub mod view;

use crate::error::PdfGridError;
use crate::model::{DocPoint, DocRect, PixelPoint, Size, WidgetPoint};
use view::ViewState;

/// Top-left corner of the scaled image inside the widget.
pub fn draw_origin(view: &ViewState, rendered: Size, widget: Size) -> (i64, i64) {
    let (pan_x, pan_y) = view.pan();
    let x = (i64::from(widget.width) - i64::from(rendered.width)).div_euclid(2) + i64::from(pan_x);
    let y =
        (i64::from(widget.height) - i64::from(rendered.height)).div_euclid(2) + i64::from(pan_y);
    (x, y)
}

/// Map a point on the widget to the unscaled image pixel under it.
pub fn widget_to_image_pixel(
    point: WidgetPoint,
    view: &ViewState,
    rendered: Size,
    widget: Size,
) -> PixelPoint {
    let (origin_x, origin_y) = draw_origin(view, rendered, widget);
    let scale = view.scale();
    PixelPoint {
        x: (i64::from(point.x) - origin_x) as f64 / scale,
        y: (i64::from(point.y) - origin_y) as f64 / scale,
    }
}

pub fn image_pixel_to_document(
    pixel: PixelPoint,
    rect: &DocRect,
    dims: Size,
) -> Result<DocPoint, PdfGridError> {
    if dims.width == 0 || dims.height == 0 {
        return Err(PdfGridError::InvalidGeometry(format!(
            "image has degenerate pixel dimensions {}x{}",
            dims.width, dims.height
        )));
    }

    let scale_x = rect.width() / f64::from(dims.width);
    let scale_y = rect.height() / f64::from(dims.height);

    Ok(DocPoint {
        x: rect.x0 + pixel.x * scale_x,
        y: rect.y1 - pixel.y * scale_y,
    })
}

/// Inverse of [`image_pixel_to_document`].
pub fn document_to_image_pixel(
    point: DocPoint,
    rect: &DocRect,
    dims: Size,
) -> Result<PixelPoint, PdfGridError> {
    if rect.is_degenerate() {
        return Err(PdfGridError::InvalidGeometry(format!(
            "document rectangle {rect} has zero area"
        )));
    }

    let scale_x = f64::from(dims.width) / rect.width();
    let scale_y = f64::from(dims.height) / rect.height();

    Ok(PixelPoint {
        x: (point.x - rect.x0) * scale_x,
        y: (rect.y1 - point.y) * scale_y,
    })
}

/// Resolve a widget click straight to document coordinates.
pub fn widget_to_document(
    point: WidgetPoint,
    view: &ViewState,
    widget: Size,
    rect: &DocRect,
    dims: Size,
) -> Result<DocPoint, PdfGridError> {
    let rendered = view.rendered_size(dims);
    let pixel = widget_to_image_pixel(point, view, rendered, widget);
    image_pixel_to_document(pixel, rect, dims)
}
