//! Question-number stripping and ID strip composition.
//!
//! The number glyph of each stitched question is cut out of the question
//! image and placed, right-aligned, into a strip together with the paper
//! identifier and, for either/or branches, the branch label.

use image::GrayImage;
use tracing::{debug, warn};

use crate::geometry::PixelRect;
use crate::params::SplitParams;
use crate::raster::{
    blank_canvas, crop, crop_ink, fill_blank, full_rect, ink_bounds, paste, row_has_ink,
};
use crate::stitcher::StitchedQuestion;

/// Pixel layout for stripping and strip composition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdLayout {
    /// Top-left region searched for the number glyph.
    pub number_region: PixelRect,
    pub strip_width: u32,
    pub strip_height: u32,
    pub gap: i64,
    pub blank_level: u8,
}

impl IdLayout {
    pub fn new(column_right: i64, line_px: i64, strip_width: u32, params: &SplitParams) -> Self {
        let line = line_px as f64;
        let lines = |n: f64| (n * line).round() as i64;
        Self {
            number_region: PixelRect::new(
                0,
                0,
                column_right + lines(params.number_crop_extra_lines),
                lines(params.number_crop_height_lines),
            ),
            strip_width,
            strip_height: lines(params.id_strip_height_lines).max(1) as u32,
            gap: lines(params.id_strip_gap_lines),
            blank_level: params.blank_level,
        }
    }
}

/// Questions with their numbers removed, and the matching ID strips.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Identified {
    pub questions: Vec<GrayImage>,
    pub id_strips: Vec<GrayImage>,
    /// Where the number glyph was in each question image.
    pub number_regions: Vec<Option<PixelRect>>,
}

/// Lay fragments out right to left, each vertically centred.
pub fn compose_strip(layout: &IdLayout, fragments: &[&GrayImage]) -> GrayImage {
    let mut strip = blank_canvas(layout.strip_width, layout.strip_height);
    let mut right = layout.strip_width as i64 - layout.gap;
    for fragment in fragments {
        let x = right - fragment.width() as i64;
        let y = (layout.strip_height as i64 - fragment.height() as i64) / 2;
        paste(&mut strip, fragment, x, y);
        right = x - layout.gap;
    }
    strip
}

/// Split a question canvas into its first text line and the body below it.
///
/// The first line runs from the first inked row down to the next blank row.
/// The body is tightened to its ink; when nothing lies below the first line
/// the canvas is kept with that line blanked.
pub fn split_first_line(image: &GrayImage, blank_level: u8) -> (Option<GrayImage>, GrayImage) {
    let Some(ink) = ink_bounds(image, full_rect(image), blank_level) else {
        return (None, image.clone());
    };

    let width = image.width() as i64;
    let mut line_bottom = ink.top as u32;
    while row_has_ink(image, line_bottom, blank_level) {
        line_bottom += 1;
    }

    let line_rect = PixelRect::new(0, ink.top, width, line_bottom as i64);
    let label = crop_ink(image, line_rect, blank_level).map(|(fragment, _)| fragment);

    let below = PixelRect::new(0, line_bottom as i64, width, image.height() as i64);
    let body = match crop_ink(image, below, blank_level) {
        Some((body, _)) => body,
        None => {
            let mut rest = image.clone();
            fill_blank(&mut rest, line_rect);
            rest
        }
    };
    (label, body)
}

/// Strip question numbers and compose one ID strip per question.
///
/// With `either_or`, the last two questions are the branches of a pair:
/// their first line (the branch label) moves into the strip as well.
pub fn identify(
    questions: Vec<StitchedQuestion>,
    paper_id: Option<&GrayImage>,
    either_or: bool,
    layout: &IdLayout,
) -> Identified {
    let count = questions.len();
    let branches_from = if either_or && count >= 2 { count - 2 } else { count };
    let mut out = Identified::default();

    for (index, question) in questions.into_iter().enumerate() {
        let page = question.first_page;
        let mut image = question.image;

        let number = ink_bounds(&image, layout.number_region, layout.blank_level);
        let number_fragment = number.and_then(|rect| crop(&image, rect));
        match number {
            Some(rect) => fill_blank(&mut image, rect),
            None => warn!(question = index + 1, page, "no question number glyph found"),
        }

        let mut tag = None;
        if index >= branches_from {
            let (label, body) = split_first_line(&image, layout.blank_level);
            tag = label;
            image = body;
        }

        let fragments: Vec<&GrayImage> = [number_fragment.as_ref(), paper_id, tag.as_ref()]
            .into_iter()
            .flatten()
            .collect();
        out.id_strips.push(compose_strip(layout, &fragments));
        out.questions.push(image);
        out.number_regions.push(number);
    }

    debug!(questions = out.questions.len(), either_or, "composed id strips");
    out
}
