//! Document abstraction: positioned text per page plus page rendering.
//!
//! The pipeline never touches a PDF library directly. It reads text
//! geometry through [`DocumentSource::page_text`] and pixels through
//! [`DocumentSource::render_page`].

mod memory;
mod pdfium;
mod words;

pub use memory::MemoryDocument;
pub use pdfium::{PdfiumDocument, bind_pdfium};
pub use words::{TextChar, WordGrouping, group_chars, group_words};

use image::GrayImage;

use crate::error::Result;
use crate::geometry::Rect;

/// A word with its position and its `(block, line, word)` index triple.
#[derive(Clone, Debug, PartialEq)]
pub struct TextWord {
    pub rect: Rect,
    pub text: String,
    pub block: usize,
    pub line: usize,
    pub word: usize,
}

impl TextWord {
    pub fn new(
        rect: Rect,
        text: impl Into<String>,
        block: usize,
        line: usize,
        word: usize,
    ) -> Self {
        Self {
            rect,
            text: text.into(),
            block,
            line,
            word,
        }
    }

    /// True when the word is the first one on its text line.
    pub fn opens_line(&self) -> bool {
        self.word == 0
    }
}

/// A paragraph-like group of lines.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub rect: Rect,
    pub text: String,
    pub index: usize,
}

impl TextBlock {
    pub fn new(rect: Rect, text: impl Into<String>, index: usize) -> Self {
        Self {
            rect,
            text: text.into(),
            index,
        }
    }
}

/// Text geometry of one page, in document units with a top-left origin.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PageText {
    pub width: f64,
    pub height: f64,
    pub words: Vec<TextWord>,
    pub blocks: Vec<TextBlock>,
}

impl PageText {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            words: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn with_word(mut self, word: TextWord) -> Self {
        self.words.push(word);
        self
    }

    pub fn with_block(mut self, rect: Rect, text: impl Into<String>) -> Self {
        let index = self.blocks.len();
        self.blocks.push(TextBlock::new(rect, text, index));
        self
    }

    pub fn has_block_containing(&self, needle: &str) -> bool {
        self.blocks.iter().any(|b| b.text.contains(needle))
    }
}

/// A paginated document the pipeline can read and render.
pub trait DocumentSource {
    fn page_count(&self) -> usize;

    /// Words and blocks of page `index`.
    fn page_text(&self, index: usize) -> Result<PageText>;

    /// Render page `index` to an 8-bit grayscale image of exactly
    /// `width` x `height` pixels.
    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<GrayImage>;
}

impl<D: DocumentSource + ?Sized> DocumentSource for &D {
    fn page_count(&self) -> usize {
        (**self).page_count()
    }

    fn page_text(&self, index: usize) -> Result<PageText> {
        (**self).page_text(index)
    }

    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<GrayImage> {
        (**self).render_page(index, width, height)
    }
}
