//! Preview overlay: the photo with a translucent ellipse on every filled cell.
//!
//! Cell footprints are mapped from grid to preview coordinates with
//! fractional ratios (`preview_width / grid_size`), so markers tile the
//! whole preview even when the sizes do not divide evenly.

use tiny_skia::{Color, ColorU8, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::error::PipelineError;
use crate::grid::NonogramGrid;
use crate::raster::{RasterImage, Rgb};

/// Thresholds below this mark the photo as predominantly dark.
pub const DARK_THRESHOLD: i32 = 128;

/// Marker opacity over dark photos.
pub const DARK_MARKER_OPACITY: f32 = 0.2;

/// Marker opacity over light photos.
pub const LIGHT_MARKER_OPACITY: f32 = 0.6;

/// Opacity for filled-cell markers, chosen from the binarization threshold.
#[inline]
pub fn marker_opacity(threshold: i32) -> f32 {
    if threshold < DARK_THRESHOLD {
        DARK_MARKER_OPACITY
    } else {
        LIGHT_MARKER_OPACITY
    }
}

/// Draw a filled ellipse in `highlight` over each filled cell's footprint
/// on `base`, alpha-composited so the photo stays visible.
pub fn render_preview(
    grid: &NonogramGrid,
    base: &RasterImage,
    threshold: i32,
    highlight: Rgb,
) -> Result<RasterImage, PipelineError> {
    let (width, height) = base.dimensions();
    let mut pixmap = to_pixmap(base)?;

    let opacity = marker_opacity(threshold);
    let mut paint = Paint::default();
    paint.set_color(Color::from_rgba8(
        highlight.r,
        highlight.g,
        highlight.b,
        (opacity * 255.0).round() as u8,
    ));
    paint.anti_alias = true;

    let size = grid.size();
    if size > 0 {
        let cell_width = width as f32 / size as f32;
        let cell_height = height as f32 / size as f32;

        for x in 0..size {
            for y in 0..size {
                if !grid.get(x, y) {
                    continue;
                }
                let Some(oval) = Rect::from_xywh(
                    x as f32 * cell_width,
                    y as f32 * cell_height,
                    cell_width,
                    cell_height,
                )
                .and_then(PathBuilder::from_oval) else {
                    continue;
                };
                pixmap.fill_path(&oval, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
    }

    tracing::debug!(
        width,
        height,
        grid_size = size,
        markers = grid.filled_count(),
        opacity,
        "Rendered preview overlay"
    );

    Ok(from_pixmap(&pixmap))
}

fn to_pixmap(image: &RasterImage) -> Result<Pixmap, PipelineError> {
    let mut pixmap =
        Pixmap::new(image.width(), image.height()).ok_or(PipelineError::PixmapAllocation)?;
    for (dst, src) in pixmap
        .pixels_mut()
        .iter_mut()
        .zip(image.as_raw().chunks_exact(4))
    {
        *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
    }
    Ok(pixmap)
}

fn from_pixmap(pixmap: &Pixmap) -> RasterImage {
    let data = pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();
    RasterImage::from_rgba(pixmap.width(), pixmap.height(), data)
        .unwrap_or_else(|| RasterImage::filled(pixmap.width(), pixmap.height(), [0, 0, 0, 0]))
}
