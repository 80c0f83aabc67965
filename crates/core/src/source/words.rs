//! Character to word, line and block grouping.
//!
//! Characters arrive in content-stream order with top-left-origin boxes.
//! Words break on whitespace or on a positional jump; lines collect words
//! that overlap vertically; blocks collect lines separated by less than
//! `line_margin` line heights.

use crate::geometry::Rect;

use super::{PageText, TextBlock, TextWord};

/// Tolerances controlling how characters are grouped.
#[derive(Debug, Clone, PartialEq)]
pub struct WordGrouping {
    /// Characters further apart than this horizontally start a new word.
    pub x_tolerance: f64,

    /// Characters whose tops differ by more than this start a new word.
    pub y_tolerance: f64,

    /// Lines closer than this (relative to the line height) share a block.
    pub line_margin: f64,
}

impl Default for WordGrouping {
    fn default() -> Self {
        Self {
            x_tolerance: 3.0,
            y_tolerance: 3.0,
            line_margin: 0.5,
        }
    }
}

/// A single positioned character.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextChar {
    pub ch: char,
    pub rect: Rect,
}

impl TextChar {
    pub fn new(ch: char, rect: Rect) -> Self {
        Self { ch, rect }
    }
}

fn char_begins_new_word(prev: &Rect, curr: &Rect, settings: &WordGrouping) -> bool {
    (curr.x0 < prev.x0)
        || (curr.x0 > prev.x1 + settings.x_tolerance)
        || ((curr.top - prev.top).abs() > settings.y_tolerance)
}

/// Group characters into words.
pub fn group_chars(chars: &[TextChar], settings: &WordGrouping) -> Vec<(Rect, String)> {
    let mut words = Vec::new();
    let mut current: Option<(Rect, String, Rect)> = None;

    for c in chars {
        if c.ch.is_whitespace() || c.ch.is_control() {
            if let Some((rect, text, _)) = current.take() {
                words.push((rect, text));
            }
            continue;
        }
        let breaks = current
            .as_ref()
            .is_some_and(|(_, _, last)| char_begins_new_word(last, &c.rect, settings));
        if breaks && let Some((rect, text, _)) = current.take() {
            words.push((rect, text));
        }
        if let Some((rect, text, last)) = current.as_mut() {
            *rect = rect.union(&c.rect);
            text.push(c.ch);
            *last = c.rect;
        } else {
            current = Some((c.rect, c.ch.to_string(), c.rect));
        }
    }
    if let Some((rect, text, _)) = current {
        words.push((rect, text));
    }
    words
}

struct Line {
    rect: Rect,
    words: Vec<(Rect, String)>,
}

fn starts_new_line(line: &Line, word: &Rect, settings: &WordGrouping) -> bool {
    let last = match line.words.last() {
        Some((rect, _)) => rect,
        None => return false,
    };
    let mid = (word.top + word.bottom) / 2.0;
    let within = mid >= line.rect.top && mid <= line.rect.bottom;
    !within || word.x0 + settings.x_tolerance < last.x0
}

/// Group words (in reading order) into lines and blocks and assign the
/// `(block, line, word)` index triple.
pub fn group_words(
    width: f64,
    height: f64,
    words: Vec<(Rect, String)>,
    settings: &WordGrouping,
) -> PageText {
    let mut lines: Vec<Line> = Vec::new();
    for (rect, text) in words {
        match lines.last_mut() {
            Some(line) if !starts_new_line(line, &rect, settings) => {
                line.rect = line.rect.union(&rect);
                line.words.push((rect, text));
            }
            _ => lines.push(Line {
                rect,
                words: vec![(rect, text)],
            }),
        }
    }

    let mut page = PageText::new(width, height);
    let mut block_rect: Option<Rect> = None;
    let mut block_lines: Vec<String> = Vec::new();
    let mut line_no = 0;

    for line in lines {
        let joins_block = block_rect.is_some_and(|b| {
            let gap = line.rect.top - b.bottom;
            gap >= -settings.y_tolerance
                && gap <= settings.line_margin * line.rect.height()
                && b.overlaps_horizontally(&line.rect)
        });
        if !joins_block {
            if let Some(rect) = block_rect.take() {
                let index = page.blocks.len();
                page.blocks
                    .push(TextBlock::new(rect, block_lines.join("\n"), index));
                block_lines.clear();
            }
            line_no = 0;
        }
        let block = page.blocks.len();
        block_rect = Some(block_rect.map_or(line.rect, |b| b.union(&line.rect)));

        let mut texts = Vec::with_capacity(line.words.len());
        for (word_no, (rect, text)) in line.words.into_iter().enumerate() {
            texts.push(text.clone());
            page.words
                .push(TextWord::new(rect, text, block, line_no, word_no));
        }
        block_lines.push(texts.join(" "));
        line_no += 1;
    }
    if let Some(rect) = block_rect {
        let index = page.blocks.len();
        page.blocks
            .push(TextBlock::new(rect, block_lines.join("\n"), index));
    }
    page
}
