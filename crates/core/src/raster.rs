//! Grayscale raster helpers shared by the image stages.
//!
//! "Ink" is any pixel darker than the configured blank level; everything
//! else is blank paper.

use image::{GrayImage, Luma, imageops};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as DrawRect;

use crate::geometry::PixelRect;

pub const WHITE: Luma<u8> = Luma([255]);

/// A white canvas.
pub fn blank_canvas(width: u32, height: u32) -> GrayImage {
    GrayImage::from_pixel(width.max(1), height.max(1), WHITE)
}

/// The whole image as a rectangle.
pub fn full_rect(image: &GrayImage) -> PixelRect {
    PixelRect::new(0, 0, image.width() as i64, image.height() as i64)
}

/// Tight bounding box of the ink inside `region`, in image coordinates.
pub fn ink_bounds(image: &GrayImage, region: PixelRect, blank_level: u8) -> Option<PixelRect> {
    let (x, y, w, h) = region.clamp_to(image.width(), image.height())?;
    let stride = image.width() as usize;
    let raw = image.as_raw();

    let (mut x0, mut top, mut x1, mut bottom) = (u32::MAX, u32::MAX, 0, 0);
    for row in y..y + h {
        let start = row as usize * stride + x as usize;
        let pixels = &raw[start..start + w as usize];
        let Some(first) = pixels.iter().position(|&p| p < blank_level) else {
            continue;
        };
        let last = pixels
            .iter()
            .rposition(|&p| p < blank_level)
            .unwrap_or(first);
        x0 = x0.min(x + first as u32);
        x1 = x1.max(x + last as u32 + 1);
        top = top.min(row);
        bottom = row + 1;
    }

    if top == u32::MAX {
        return None;
    }
    Some(PixelRect::new(
        x0 as i64,
        top as i64,
        x1 as i64,
        bottom as i64,
    ))
}

/// True when row `y` holds at least one ink pixel.
pub fn row_has_ink(image: &GrayImage, y: u32, blank_level: u8) -> bool {
    if y >= image.height() {
        return false;
    }
    let stride = image.width() as usize;
    let start = y as usize * stride;
    image.as_raw()[start..start + stride]
        .iter()
        .any(|&p| p < blank_level)
}

/// Paint `rect` opaque white. Off-image parts are ignored.
pub fn fill_blank(image: &mut GrayImage, rect: PixelRect) {
    if let Some((x, y, w, h)) = rect.clamp_to(image.width(), image.height()) {
        draw_filled_rect_mut(image, DrawRect::at(x as i32, y as i32).of_size(w, h), WHITE);
    }
}

/// Copy out the on-image part of `rect`.
pub fn crop(image: &GrayImage, rect: PixelRect) -> Option<GrayImage> {
    let (x, y, w, h) = rect.clamp_to(image.width(), image.height())?;
    Some(imageops::crop_imm(image, x, y, w, h).to_image())
}

/// Crop `region` and tighten it to its ink.
///
/// Returns the fragment together with its position in `image`.
pub fn crop_ink(
    image: &GrayImage,
    region: PixelRect,
    blank_level: u8,
) -> Option<(GrayImage, PixelRect)> {
    let bounds = ink_bounds(image, region, blank_level)?;
    crop(image, bounds).map(|fragment| (fragment, bounds))
}

/// Paste `fragment` with its top-left corner at `(x, y)`, clipping at the
/// canvas edges.
pub fn paste(canvas: &mut GrayImage, fragment: &GrayImage, x: i64, y: i64) {
    imageops::replace(canvas, fragment, x, y);
}
