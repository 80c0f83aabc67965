//! Redaction map building.
//!
//! Walks the pages from the start page on and decides, per page, which
//! raster rectangles get painted white: running headers, the examiner's
//! column, answer-line leaders, section banners, answer labels, answer
//! regions opened by an off-margin either/or label, additional pages and
//! the permission footer. Left-margin either/or labels are recorded as
//! markers instead.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::anchors::AnchorSet;
use crate::geometry::{PixelRect, Rect, Scaler};
use crate::params::SplitParams;
use crate::source::{PageText, TextWord};

pub const BLANK_PAGE_MARKER: &str = "BLANK PAGE";
pub const ADDITIONAL_PAGE_MARKER: &str = "Additional page";
pub const PERMISSION_MARKER: &str = "Permission to reproduce items";
pub const SECTION_MARKER: &str = "Section";
pub const ANSWER_MARKER: &str = "Answer";
pub const EITHER_MARKER: &str = "EITHER";
pub const OR_MARKER: &str = "OR";

/// A left-margin either/or label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EitherOrMarker {
    /// Label rectangle in raster pixels.
    pub rect: PixelRect,
    /// Document page the label sits on.
    pub page_index: usize,
    /// Position of that page among the kept pages.
    pub position: usize,
}

/// Redaction rectangles per kept page, in page order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedactionMap {
    pages: BTreeMap<usize, Vec<PixelRect>>,
}

impl RedactionMap {
    pub fn insert(&mut self, page_index: usize, rects: Vec<PixelRect>) {
        self.pages.insert(page_index, rects);
    }

    /// Number of kept pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn get(&self, page_index: usize) -> Option<&[PixelRect]> {
        self.pages.get(&page_index).map(Vec::as_slice)
    }

    pub fn page_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }
}

/// State carried from one page to the next while the map is built.
#[derive(Debug, Default)]
pub struct PageScanState {
    /// The page being scanned is a blank page and is left out.
    pub blank_skip: bool,
    /// A previous page ended the paper; nothing further is kept.
    pub termination_flag: bool,
    pub either_or_markers: Vec<EitherOrMarker>,
}

/// Output of the redaction map builder.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RedactionPlan {
    pub map: RedactionMap,
    pub markers: Vec<EitherOrMarker>,
}

impl RedactionPlan {
    /// The either/or pair, when at least two markers were found.
    ///
    /// Only the first two markers are honoured.
    pub fn either_or_pair(&self) -> Option<(EitherOrMarker, EitherOrMarker)> {
        match self.markers.as_slice() {
            [first, second, ..] => Some((*first, *second)),
            _ => None,
        }
    }
}

/// Geometry shared by every page scan.
struct PageFrame<'a> {
    scaler: &'a Scaler,
    params: &'a SplitParams,
    line: f64,
    width: f64,
    height: f64,
    leader: String,
}

impl PageFrame<'_> {
    fn is_leader(&self, word: &TextWord) -> bool {
        word.text.contains(&self.leader)
            && word.rect.width() > self.width * self.params.leader_min_width_fraction
            && !word.text.contains('[')
    }

    /// A section banner is right-justified or centred: its left margin is
    /// large compared to its right margin.
    fn is_section_banner(&self, word: &TextWord) -> bool {
        if !word.text.contains(SECTION_MARKER) {
            return false;
        }
        let right_margin = self.width - word.rect.x1;
        right_margin <= 0.0 || word.rect.x0 / right_margin > self.params.section_margin_ratio
    }

    fn to_bottom(&self, top: f64) -> PixelRect {
        self.scaler.band(top, self.height)
    }
}

fn scan_words(
    frame: &PageFrame<'_>,
    page: &PageText,
    page_index: usize,
    position: usize,
    state: &mut PageScanState,
    rects: &mut Vec<PixelRect>,
) {
    let params = frame.params;
    for word in &page.words {
        if frame.is_leader(word) {
            rects.push(frame.scaler.scale_rect(word.rect));
        }
        if frame.is_section_banner(word) {
            rects.push(frame.scaler.band(
                word.rect.top,
                word.rect.bottom + params.section_band_lines * frame.line,
            ));
        }
        if word.text.contains(EITHER_MARKER) || word.text.contains(OR_MARKER) {
            if word.rect.x0 < frame.width * params.either_or_column_fraction {
                state.either_or_markers.push(EitherOrMarker {
                    rect: frame.scaler.scale_rect(word.rect),
                    page_index,
                    position,
                });
            } else {
                rects.push(frame.to_bottom(word.rect.top - params.either_or_tail_lines * frame.line));
                state.termination_flag = true;
            }
        }
        if word.text.contains(ANSWER_MARKER) && word.opens_line() {
            rects.push(frame.scaler.scale_rect(Rect::new(
                word.rect.x0,
                word.rect.top,
                frame.width,
                word.rect.bottom,
            )));
        }
    }
}

/// Build the redaction map and collect either/or markers.
///
/// Page geometry is taken from `scaler`, i.e. from the start page.
pub fn build_redaction_plan(
    pages: &[PageText],
    anchors: &AnchorSet,
    scaler: &Scaler,
    params: &SplitParams,
) -> RedactionPlan {
    let line = anchors.line_height();
    let frame = PageFrame {
        scaler,
        params,
        line,
        width: scaler.page_width(),
        height: scaler.page_height(),
        leader: ".".repeat(params.leader_min_dots),
    };

    let page_number = &anchors.page_number.rect;
    let paper_id = &anchors.paper_id.rect;
    let mut running = vec![
        scaler.band(page_number.top, page_number.bottom),
        scaler.band(
            paper_id.bottom - params.paper_id_margin_lines * line,
            paper_id.bottom + params.paper_id_margin_lines * line,
        ),
    ];
    if let Some(examiner) = &anchors.examiner_use {
        running.push(scaler.scale_rect(Rect::new(
            examiner.rect.x0 - params.examiner_margin_lines * line,
            0.0,
            frame.width,
            frame.height,
        )));
    }

    let last_page = pages.len().saturating_sub(1);
    let mut state = PageScanState::default();
    let mut map = RedactionMap::default();

    for (page_index, page) in pages.iter().enumerate().skip(anchors.start_page) {
        state.blank_skip = page.has_block_containing(BLANK_PAGE_MARKER);
        if state.blank_skip {
            debug!(page = page_index, "skipping blank page");
            continue;
        }
        if state.termination_flag {
            debug!(page = page_index, "paper ended, dropping remaining pages");
            break;
        }

        let position = map.len();
        let mut rects = running.clone();
        scan_words(&frame, page, page_index, position, &mut state, &mut rects);

        for block in &page.blocks {
            if block.text.contains(ADDITIONAL_PAGE_MARKER) {
                rects.push(frame.to_bottom(block.rect.top));
                state.termination_flag = true;
            }
            if page_index == last_page && block.text.contains(PERMISSION_MARKER) {
                rects.push(frame.to_bottom(
                    block.rect.top - params.permission_margin_lines * line,
                ));
            }
        }

        debug!(page = page_index, rects = rects.len(), "redaction rectangles");
        map.insert(page_index, rects);
    }

    let markers = state.either_or_markers;
    if !markers.is_empty() && markers.len() != 2 {
        warn!(
            count = markers.len(),
            "expected zero or two either/or markers, honouring the first two"
        );
    }

    RedactionPlan { map, markers }
}
