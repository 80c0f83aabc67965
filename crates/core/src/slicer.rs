//! Gap slicing.
//!
//! A page is walked top to bottom in bands of `band_height_lines`. Each
//! inked run found grows the current keep region; a blank run taller than
//! `split_gap_lines` between two inked runs closes it. Regions shorter than
//! `noise_height_lines` are dropped.

use image::GrayImage;
use tracing::debug;

use crate::geometry::PixelRect;
use crate::params::SplitParams;
use crate::raster::{crop, ink_bounds, row_has_ink};
use crate::render::PageImage;

/// A full-width horizontal strip of a page holding ink.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub page_index: usize,
    /// Top edge within the page raster.
    pub top: u32,
    pub image: GrayImage,
}

impl Slice {
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Band, noise and split-gap heights in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliceMetrics {
    pub band: u32,
    pub noise: f64,
    pub gap: f64,
}

impl SliceMetrics {
    pub fn new(line_px: i64, params: &SplitParams) -> Self {
        let line = line_px as f64;
        Self {
            band: ((params.band_height_lines * line).round() as u32).max(1),
            noise: params.noise_height_lines * line,
            gap: params.split_gap_lines * line,
        }
    }
}

struct SliceCollector<'a> {
    page: &'a PageImage,
    noise: f64,
    slices: Vec<Slice>,
}

impl SliceCollector<'_> {
    fn flush(&mut self, top: u32, bottom: u32) {
        if ((bottom - top) as f64) < self.noise {
            return;
        }
        let width = self.page.image.width() as i64;
        let rect = PixelRect::new(0, top as i64, width, bottom as i64);
        if let Some(image) = crop(&self.page.image, rect) {
            self.slices.push(Slice {
                page_index: self.page.page_index,
                top,
                image,
            });
        }
    }
}

/// Cut one page into slices, top to bottom.
pub fn slice_page(page: &PageImage, metrics: SliceMetrics, blank_level: u8) -> Vec<Slice> {
    let image = &page.image;
    let (width, height) = image.dimensions();
    let mut collector = SliceCollector {
        page,
        noise: metrics.noise,
        slices: Vec::new(),
    };

    let mut y = 0u32;
    let mut keep: Option<(u32, u32)> = None;

    while y < height {
        let band_bottom = y.saturating_add(metrics.band).min(height);
        let band = PixelRect::new(0, y as i64, width as i64, band_bottom as i64);
        let Some(ink) = ink_bounds(image, band, blank_level) else {
            y = band_bottom;
            continue;
        };

        // follow the inked run, which may continue past the band
        let top = ink.top as u32;
        let mut bottom = top;
        while row_has_ink(image, bottom, blank_level) {
            bottom += 1;
        }

        keep = match keep {
            Some((start, end)) if f64::from(top - end) <= metrics.gap => Some((start, bottom)),
            Some((start, end)) => {
                collector.flush(start, end);
                Some((top, bottom))
            }
            None => Some((top, bottom)),
        };
        y = bottom;
    }
    if let Some((start, end)) = keep {
        collector.flush(start, end);
    }

    collector.slices
}

/// Slice every page, keeping page order.
pub fn slice_pages(pages: &[PageImage], line_px: i64, params: &SplitParams) -> Vec<Slice> {
    let metrics = SliceMetrics::new(line_px, params);
    let mut slices = Vec::new();
    for page in pages {
        let found = slice_page(page, metrics, params.blank_level);
        debug!(page = page.page_index, slices = found.len(), "sliced page");
        slices.extend(found);
    }
    slices
}
