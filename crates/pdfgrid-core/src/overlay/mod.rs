//! Grid and marker overlay drawn over an embedded image.
//!
//! Vertical lines sit at whole multiples of the configured interval from the
//! rectangle's left edge, horizontal lines at multiples down from its top
//! edge. Each line is labelled with the document coordinate of its own pixel.
//! Extracted points are drawn as small circles with their value beside them.

mod glyphs;

use crate::config::{validate_grid_interval, GridOptions, MarkerOptions};
use crate::coords::document_to_image_pixel;
use crate::error::PdfGridError;
use crate::model::{DataPoint, DocRect, Size};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_circle_mut, draw_line_segment_mut, Blend};

/// A grid line: its pixel column or row, and the label drawn beside it.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLine {
    pub pixel: i64,
    pub label: String,
}

/// Pixel offset and document value of each step `start + k * interval` up to
/// and including `end`, along an axis `pixels` wide.
///
/// Steps landing on a pixel already taken are dropped, so an axis never holds
/// more than `pixels + 1` lines however fine the interval.
fn axis_steps(
    start: f64,
    end: f64,
    interval: f64,
    pixels: u32,
) -> Result<Vec<(i64, f64)>, PdfGridError> {
    validate_grid_interval(interval)?;
    if end <= start {
        return Ok(Vec::new());
    }

    let scale = f64::from(pixels) / (end - start);
    let last = ((end - start) / interval + 1e-9).floor();
    let px_step = interval * scale;
    let mut steps = Vec::new();

    if px_step >= 1.0 {
        let mut previous = None;
        for k in 0..=(last as u64) {
            let value = start + k as f64 * interval;
            let pixel = ((value - start) * scale) as i64;
            if pixel > i64::from(pixels) || previous == Some(pixel) {
                continue;
            }
            previous = Some(pixel);
            steps.push((pixel, value));
        }
    } else {
        // more steps than pixels: walk the pixels and take the first step in each
        let last_pixel = ((last * px_step) as i64).min(i64::from(pixels));
        for pixel in 0..=last_pixel {
            let k = (pixel as f64 / px_step).ceil().min(last);
            steps.push((pixel, start + k * interval));
        }
    }

    Ok(steps)
}

/// Vertical grid lines of `rect` drawn over an image `width` pixels wide.
///
/// Each label is the document x of its line, rounded to a whole unit.
pub fn vertical_grid_lines(
    rect: &DocRect,
    width: u32,
    interval: f64,
) -> Result<Vec<GridLine>, PdfGridError> {
    Ok(axis_steps(rect.x0, rect.x1, interval, width)?
        .into_iter()
        .map(|(pixel, x)| GridLine {
            pixel,
            label: format!("{x:.0}"),
        })
        .collect())
}

/// Horizontal grid lines of `rect` drawn over an image `height` pixels tall.
///
/// Rows count down from the top edge, so a line `d` units below the top is
/// labelled with the document y `y1 - d`. Labels grow as the row shrinks.
pub fn horizontal_grid_lines(
    rect: &DocRect,
    height: u32,
    interval: f64,
) -> Result<Vec<GridLine>, PdfGridError> {
    Ok(axis_steps(rect.y0, rect.y1, interval, height)?
        .into_iter()
        .map(|(pixel, y)| GridLine {
            pixel,
            label: format!("{:.0}", rect.y1 - (y - rect.y0)),
        })
        .collect())
}

/// Render the grid and point markers over a copy of `base`.
///
/// The result always has the same dimensions as `base`. With the grid
/// disabled it is a plain copy. A rectangle with zero width or height has no
/// usable mapping, so nothing is drawn on it.
pub fn render_overlay(
    base: &RgbaImage,
    rect: &DocRect,
    grid: &GridOptions,
    markers: &MarkerOptions,
    points: &[&DataPoint],
) -> Result<RgbaImage, PdfGridError> {
    validate_grid_interval(grid.interval)?;

    if !grid.enabled {
        return Ok(base.clone());
    }
    if rect.is_degenerate() {
        log::warn!("document rectangle {rect} has zero area; drawing no grid");
        return Ok(base.clone());
    }

    let (width, height) = base.dimensions();
    let line_color = Rgba(grid.line_color);
    let mut canvas = Blend(base.clone());

    for line in vertical_grid_lines(rect, width, grid.interval)? {
        let column = line.pixel as f32;
        draw_line_segment_mut(&mut canvas, (column, 0.0), (column, height as f32), line_color);
        glyphs::draw_text(
            &mut canvas,
            line.pixel + 2,
            12,
            &line.label,
            grid.label_scale,
            line_color,
        );
    }

    for line in horizontal_grid_lines(rect, height, grid.interval)? {
        let row = line.pixel as f32;
        draw_line_segment_mut(&mut canvas, (0.0, row), (width as f32, row), line_color);
        glyphs::draw_text(
            &mut canvas,
            2,
            line.pixel - 2,
            &line.label,
            grid.label_scale,
            line_color,
        );
    }

    let marker_color = Rgba(markers.color);
    let radius = i32::try_from(markers.radius).unwrap_or(i32::MAX);
    let dims = Size::new(width, height);
    for point in points {
        let pixel = document_to_image_pixel(point.position(), rect, dims)?;
        let (px, py) = (pixel.x as i32, pixel.y as i32);
        draw_hollow_circle_mut(&mut canvas, (px, py), radius, marker_color);
        if point.value.is_present() {
            glyphs::draw_text(
                &mut canvas,
                i64::from(px) + 5,
                i64::from(py) - 5,
                &point.value.to_string(),
                grid.label_scale,
                marker_color,
            );
        }
    }

    Ok(canvas.0)
}
