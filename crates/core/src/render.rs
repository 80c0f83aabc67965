//! Page rasterization and redaction.

use image::GrayImage;
use rayon::prelude::*;
use tracing::debug;

use crate::error::Result;
use crate::geometry::Scaler;
use crate::raster::fill_blank;
use crate::redaction::RedactionMap;
use crate::source::DocumentSource;

/// A rendered, redacted page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageImage {
    /// Document page index.
    pub page_index: usize,
    pub image: GrayImage,
}

/// Render every page of the map at the scaler's raster size and paint its
/// redaction rectangles white, in list order.
///
/// The result follows map order, so a marker's `position` indexes it.
pub fn rasterize<D: DocumentSource>(
    doc: &D,
    map: &RedactionMap,
    scaler: &Scaler,
) -> Result<Vec<PageImage>> {
    let (width, height) = scaler.raster_size();

    let mut pages = Vec::with_capacity(map.len());
    for page_index in map.page_indices() {
        let image = doc.render_page(page_index, width, height)?;
        pages.push(PageImage { page_index, image });
    }

    pages.par_iter_mut().for_each(|page| {
        if let Some(rects) = map.get(page.page_index) {
            for rect in rects {
                fill_blank(&mut page.image, *rect);
            }
        }
    });

    debug!(pages = pages.len(), width, height, "rasterized pages");
    Ok(pages)
}
