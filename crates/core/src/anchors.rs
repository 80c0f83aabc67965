//! Layout anchor location.
//!
//! The first page is a cover and is never scanned. From the second page on,
//! only the leading words of each page are inspected (the page-number word
//! itself is skipped) until the question-1 label and the paper identifier
//! have both been seen.

use regex::Regex;
use tracing::debug;

use crate::error::{Result, SplitError};
use crate::params::SplitParams;
use crate::source::{PageText, TextWord};

const EXAMINER_LABEL: &str = "Examiner";
const QUESTION_ONE: &str = "1";

/// Text elements every later stage measures from.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchorSet {
    /// Page holding the question-1 label; extraction starts here.
    pub start_page: usize,
    /// First word of the start page.
    pub page_number: TextWord,
    pub paper_id: TextWord,
    pub question_1: TextWord,
    pub examiner_use: Option<TextWord>,
}

impl AnchorSet {
    /// Height of one text line in document units.
    pub fn line_height(&self) -> f64 {
        self.question_1.rect.height()
    }
}

/// Matcher for the paper identifier, anchored at the start of a word.
pub fn paper_id_matcher(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{pattern})"))?)
}

fn is_question_one(word: &TextWord, page: &PageText, params: &SplitParams) -> bool {
    word.opens_line()
        && word.text == QUESTION_ONE
        && word.rect.x1 < page.width * params.question_column_fraction
}

/// Find the anchor set of a paper.
///
/// Scanning stops after the first page scan that leaves both the
/// question-1 label and the paper identifier recorded. The examiner's-use
/// label is optional.
pub fn locate_anchors(pages: &[PageText], params: &SplitParams) -> Result<AnchorSet> {
    let matcher = paper_id_matcher(&params.paper_id_pattern)?;

    let mut paper_id: Option<TextWord> = None;
    let mut question_1: Option<(usize, TextWord, TextWord)> = None;
    let mut examiner_use: Option<TextWord> = None;

    for (index, page) in pages.iter().enumerate().skip(1) {
        for word in page.words.iter().take(params.anchor_scan_words).skip(1) {
            if paper_id.is_none() && matcher.is_match(&word.text) {
                paper_id = Some(word.clone());
            }
            if question_1.is_none()
                && is_question_one(word, page, params)
                && let Some(first) = page.words.first()
            {
                question_1 = Some((index, word.clone(), first.clone()));
            }
            if examiner_use.is_none() && word.text.contains(EXAMINER_LABEL) {
                examiner_use = Some(word.clone());
            }
        }
        if question_1.is_some() && paper_id.is_some() {
            break;
        }
    }

    let (start_page, question_1, page_number, paper_id) = match (question_1, paper_id) {
        (Some((start_page, question_1, page_number)), Some(paper_id)) => {
            (start_page, question_1, page_number, paper_id)
        }
        (question_1, paper_id) => {
            return Err(SplitError::AnchorNotFound {
                question_1: question_1.is_some(),
                paper_id: paper_id.is_some(),
            });
        }
    };

    let line = question_1.rect.height();
    if !line.is_finite() || line <= 0.0 {
        return Err(SplitError::InvalidGeometry {
            width: question_1.rect.width(),
            height: line,
        });
    }

    debug!(
        start_page,
        paper_id = %paper_id.text,
        line_height = line,
        examiner = examiner_use.is_some(),
        "located layout anchors"
    );

    Ok(AnchorSet {
        start_page,
        page_number,
        paper_id,
        question_1,
        examiner_use,
    })
}
