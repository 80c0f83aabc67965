//! Question stitching.
//!
//! A slice whose leading column holds a single-line glyph opens a new
//! question; any other slice continues the open one and is stacked below
//! it after a one-line gap.

use image::GrayImage;
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::geometry::PixelRect;
use crate::params::SplitParams;
use crate::raster::{blank_canvas, ink_bounds, paste};
use crate::slicer::Slice;

/// One complete question (or one branch of an either/or pair).
#[derive(Clone, Debug, PartialEq)]
pub struct StitchedQuestion {
    pub image: GrayImage,
    /// Document page of the opening slice.
    pub first_page: usize,
    /// Number of slices stacked into the image.
    pub slices: usize,
}

/// The question currently being assembled.
struct QuestionBuilder {
    image: GrayImage,
    first_page: usize,
    slices: usize,
}

impl QuestionBuilder {
    fn open(slice: Slice) -> Self {
        Self {
            first_page: slice.page_index,
            image: slice.image,
            slices: 1,
        }
    }

    fn append(&mut self, slice: &Slice, gap: u32) {
        let top = self.image.height() + gap;
        let width = self.image.width().max(slice.image.width());
        let mut canvas = blank_canvas(width, top + slice.height());
        paste(&mut canvas, &self.image, 0, 0);
        paste(&mut canvas, &slice.image, 0, top as i64);
        self.image = canvas;
        self.slices += 1;
    }

    fn finish(self) -> StitchedQuestion {
        StitchedQuestion {
            image: self.image,
            first_page: self.first_page,
            slices: self.slices,
        }
    }
}

/// Decides whether a slice opens a question.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumberColumn {
    /// Right edge of the question-number column in pixels.
    pub right: i64,
    pub min_height: f64,
    pub max_height: f64,
    pub blank_level: u8,
}

impl NumberColumn {
    pub fn new(right: i64, line_px: i64, params: &SplitParams) -> Self {
        let line = line_px as f64;
        Self {
            right,
            min_height: params.number_min_lines * line,
            max_height: params.number_max_lines * line,
            blank_level: params.blank_level,
        }
    }

    pub fn opens_question(&self, image: &GrayImage) -> bool {
        let column = PixelRect::new(0, 0, self.right, image.height() as i64);
        ink_bounds(image, column, self.blank_level).is_some_and(|glyph| {
            let height = glyph.height() as f64;
            height >= self.min_height && height <= self.max_height
        })
    }
}

/// Merge slices into questions.
///
/// Fails with [`SplitError::NoLeadingQuestion`] when the first slice is a
/// continuation.
pub fn stitch(
    slices: Vec<Slice>,
    column: &NumberColumn,
    line_px: i64,
    params: &SplitParams,
) -> Result<Vec<StitchedQuestion>> {
    let gap = (params.stitch_gap_lines * line_px as f64).round().max(0.0) as u32;
    let mut finished = Vec::new();
    let mut open: Option<QuestionBuilder> = None;

    for slice in slices {
        if column.opens_question(&slice.image) {
            if let Some(done) = open.take() {
                finished.push(done.finish());
            }
            open = Some(QuestionBuilder::open(slice));
        } else {
            match open.as_mut() {
                Some(builder) => builder.append(&slice, gap),
                None => return Err(SplitError::NoLeadingQuestion),
            }
        }
    }
    if let Some(done) = open {
        finished.push(done.finish());
    }

    debug!(questions = finished.len(), "stitched questions");
    Ok(finished)
}
