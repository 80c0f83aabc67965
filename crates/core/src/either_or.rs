//! Either/or compositing.
//!
//! In an either/or pair the question number sits left of the EITHER label
//! only. It is lifted from a fresh render of the first marker's page and
//! pasted next to both labels, so each branch later opens a question of
//! its own.

use image::GrayImage;
use tracing::{debug, warn};

use crate::error::Result;
use crate::geometry::{PixelRect, Scaler};
use crate::params::SplitParams;
use crate::raster::{crop_ink, fill_blank, paste};
use crate::redaction::EitherOrMarker;
use crate::render::PageImage;
use crate::source::DocumentSource;

/// Region left of a marker searched for the shared fragment.
pub fn fragment_region(marker: &EitherOrMarker, context_px: i64) -> PixelRect {
    PixelRect::new(
        0,
        marker.rect.top - context_px,
        marker.rect.x0,
        marker.rect.bottom + context_px,
    )
}

/// Distance below a marker's top at which the fragment is pasted, rounded
/// down to whole pixels.
pub fn paste_offset(line_px: i64, offset_lines: f64) -> i64 {
    (offset_lines * line_px as f64).floor() as i64
}

/// Copy the shared fragment onto both branch pages.
///
/// Returns the fragment, or `None` when nothing was found left of the
/// first marker.
pub fn composite_either_or<D: DocumentSource>(
    doc: &D,
    pages: &mut [PageImage],
    pair: (EitherOrMarker, EitherOrMarker),
    scaler: &Scaler,
    line_px: i64,
    params: &SplitParams,
) -> Result<Option<GrayImage>> {
    let (first, second) = pair;
    let (width, height) = scaler.raster_size();
    let fresh = doc.render_page(first.page_index, width, height)?;

    let context = (params.either_or_context_lines * line_px as f64).round() as i64;
    let region = fragment_region(&first, context);
    let Some((fragment, bounds)) = crop_ink(&fresh, region, params.blank_level) else {
        warn!(page = first.page_index, "either/or fragment is empty");
        return Ok(None);
    };

    let offset = paste_offset(line_px, params.either_or_offset_lines);
    if let Some(page) = pages.get_mut(first.position) {
        fill_blank(&mut page.image, bounds);
        paste(&mut page.image, &fragment, bounds.x0, first.rect.top + offset);
    }
    if let Some(page) = pages.get_mut(second.position) {
        paste(&mut page.image, &fragment, bounds.x0, second.rect.top + offset);
    }

    debug!(
        first = first.page_index,
        second = second.page_index,
        width = fragment.width(),
        height = fragment.height(),
        "composited either/or fragment"
    );
    Ok(Some(fragment))
}
