//! Document-space and raster-space rectangles, and the scaler between them.
//!
//! Document coordinates are PDF points with a top-left origin. Raster
//! coordinates are signed pixels so that regions derived from anchors
//! (e.g. "two lines above the marker") may start off-page; they are clamped
//! only when painted or cropped.

use crate::error::{Result, SplitError};

/// Rectangle in document units: `(x0, top)` is the top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub top: f64,
    pub x1: f64,
    pub bottom: f64,
}

impl Rect {
    pub const fn new(x0: f64, top: f64, x1: f64, bottom: f64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            x0: self.x0.min(other.x0),
            top: self.top.min(other.top),
            x1: self.x1.max(other.x1),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1
    }

    pub fn overlaps_vertically(&self, other: &Rect) -> bool {
        self.top < other.bottom && other.top < self.bottom
    }
}

/// Rectangle in raster pixels, half-open: `[x0, x1) x [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x0: i64,
    pub top: i64,
    pub x1: i64,
    pub bottom: i64,
}

impl PixelRect {
    pub const fn new(x0: i64, top: i64, x1: i64, bottom: i64) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    pub fn width(&self) -> i64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }

    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.bottom <= self.top
    }

    pub fn translate(&self, dx: i64, dy: i64) -> PixelRect {
        PixelRect::new(self.x0 + dx, self.top + dy, self.x1 + dx, self.bottom + dy)
    }

    /// Intersect with an image of the given size.
    ///
    /// Returns `(x, y, width, height)` of the visible part, or `None` when
    /// nothing of the rectangle lies on the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x0.clamp(0, width as i64);
        let x1 = self.x1.clamp(0, width as i64);
        let top = self.top.clamp(0, height as i64);
        let bottom = self.bottom.clamp(0, height as i64);
        if x1 <= x0 || bottom <= top {
            return None;
        }
        Some((
            x0 as u32,
            top as u32,
            (x1 - x0) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Converts document units to pixels for a fixed raster width.
///
/// The scale factor is `target_width / page_width`; every coordinate is
/// multiplied and rounded to the nearest pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scaler {
    factor: f64,
    page_width: f64,
    page_height: f64,
    target_width: u32,
}

impl Scaler {
    pub fn new(page_width: f64, page_height: f64, target_width: u32) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(page_width) || !valid(page_height) || target_width == 0 {
            return Err(SplitError::InvalidGeometry {
                width: page_width,
                height: page_height,
            });
        }
        Ok(Self {
            factor: target_width as f64 / page_width,
            page_width,
            page_height,
            target_width,
        })
    }

    pub fn factor(&self) -> f64 {
        self.factor
    }

    pub fn page_width(&self) -> f64 {
        self.page_width
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    /// Scale a single document-space length or coordinate.
    pub fn scale(&self, value: f64) -> i64 {
        (value * self.factor).round() as i64
    }

    pub fn scale_rect(&self, rect: Rect) -> PixelRect {
        PixelRect::new(
            self.scale(rect.x0),
            self.scale(rect.top),
            self.scale(rect.x1),
            self.scale(rect.bottom),
        )
    }

    /// Pixel size of a rendered page.
    pub fn raster_size(&self) -> (u32, u32) {
        let height = self.scale(self.page_height).max(1) as u32;
        (self.target_width, height)
    }

    /// Full-width pixel band between two document-space y coordinates.
    pub fn band(&self, top: f64, bottom: f64) -> PixelRect {
        self.scale_rect(Rect::new(0.0, top, self.page_width, bottom))
    }
}
