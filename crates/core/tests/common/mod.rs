//! Synthetic question papers.
//!
//! Pages are 200 x 300 units rendered at 400 px wide, so one unit is two
//! pixels and the 10-unit question line is 20 px.

#![allow(dead_code)]

use qpsplit_core::{MemoryDocument, PageText, Rect, SplitParams, TextWord};

pub const PAGE_WIDTH: f64 = 200.0;
pub const PAGE_HEIGHT: f64 = 300.0;
pub const PAPER_ID: &str = "0580/12/M/J/23";

pub fn params() -> SplitParams {
    SplitParams {
        target_width: 400,
        ..SplitParams::default()
    }
}

pub fn word(
    text: &str,
    rect: (f64, f64, f64, f64),
    block: usize,
    line: usize,
    word: usize,
) -> TextWord {
    TextWord::new(Rect::new(rect.0, rect.1, rect.2, rect.3), text, block, line, word)
}

pub fn cover() -> PageText {
    PageText::new(PAGE_WIDTH, PAGE_HEIGHT)
        .with_word(word("Cambridge", (50.0, 50.0, 150.0, 70.0), 0, 0, 0))
        .with_block(Rect::new(50.0, 50.0, 150.0, 70.0), "Cambridge")
}

pub fn blank_page() -> PageText {
    PageText::new(PAGE_WIDTH, PAGE_HEIGHT)
        .with_block(Rect::new(70.0, 140.0, 130.0, 150.0), "BLANK PAGE")
}

/// Page header: page number word and the paper identifier.
pub fn header(page_number: &str) -> PageText {
    PageText::new(PAGE_WIDTH, PAGE_HEIGHT)
        .with_word(word(page_number, (95.0, 5.0, 105.0, 15.0), 0, 0, 0))
        .with_word(word(PAPER_ID, (10.0, 20.0, 60.0, 30.0), 1, 0, 0))
}

/// Start page with two questions separated by a wide gap.
pub fn two_question_page() -> PageText {
    header("2")
        .with_word(word("1", (10.0, 60.0, 15.0, 70.0), 2, 0, 0))
        .with_word(word("Solve", (30.0, 60.0, 60.0, 70.0), 2, 0, 1))
        .with_word(word("this", (30.0, 75.0, 50.0, 85.0), 2, 1, 0))
        .with_word(word("2", (10.0, 150.0, 15.0, 160.0), 3, 0, 0))
        .with_word(word("Explain", (30.0, 150.0, 70.0, 160.0), 3, 0, 1))
}

/// Cover, a start page with questions 1 and 2, and a blank page.
pub fn plain_paper() -> MemoryDocument {
    MemoryDocument::from_pages(vec![cover(), two_question_page(), blank_page()])
}

/// Question 2 offered as an EITHER branch on the start page and an OR
/// branch on the following page.
pub fn either_or_paper() -> MemoryDocument {
    let start = header("2")
        .with_word(word("1", (10.0, 60.0, 15.0, 70.0), 2, 0, 0))
        .with_word(word("Solve", (30.0, 60.0, 60.0, 70.0), 2, 0, 1))
        .with_word(word("2", (10.0, 150.0, 15.0, 160.0), 3, 0, 0))
        .with_word(word("EITHER", (30.0, 150.0, 60.0, 160.0), 3, 0, 1))
        .with_word(word("Prove", (30.0, 175.0, 60.0, 185.0), 3, 1, 0));
    let branch = header("3")
        .with_word(word("OR", (30.0, 60.0, 45.0, 70.0), 2, 0, 0))
        .with_word(word("Show", (30.0, 85.0, 60.0, 95.0), 2, 1, 0));
    MemoryDocument::from_pages(vec![cover(), start, branch])
}
