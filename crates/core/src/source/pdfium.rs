//! PDF documents read and rendered through PDFium.

use std::path::Path;

use image::GrayImage;
use pdfium_render::prelude::*;

use crate::error::{Result, SplitError};
use crate::geometry::Rect;

use super::words::{TextChar, WordGrouping, group_chars, group_words};
use super::{DocumentSource, PageText};

fn document_error(context: &str, err: impl std::fmt::Display) -> SplitError {
    SplitError::Document(format!("{context}: {err}"))
}

/// Bind the PDFium shared library, looking next to the binary first and
/// then in the system library path.
pub fn bind_pdfium() -> Result<Pdfium> {
    let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
        .or_else(|_| Pdfium::bind_to_system_library())
        .map_err(|e| document_error("could not bind PDFium", e))?;
    Ok(Pdfium::new(bindings))
}

/// A PDF file opened with PDFium.
pub struct PdfiumDocument<'a> {
    document: PdfDocument<'a>,
    grouping: WordGrouping,
}

impl<'a> PdfiumDocument<'a> {
    pub fn open(pdfium: &'a Pdfium, path: &Path) -> Result<Self> {
        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| document_error(&format!("failed to load {}", path.display()), e))?;
        Ok(Self {
            document,
            grouping: WordGrouping::default(),
        })
    }

    fn page(&self, index: usize) -> Result<PdfPage<'a>> {
        let page_index = index
            .try_into()
            .map_err(|_| SplitError::Document(format!("page {index} out of range")))?;
        self.document
            .pages()
            .get(page_index)
            .map_err(|e| document_error(&format!("page {index}"), e))
    }
}

impl DocumentSource for PdfiumDocument<'_> {
    fn page_count(&self) -> usize {
        self.document.pages().len() as usize
    }

    fn page_text(&self, index: usize) -> Result<PageText> {
        let page = self.page(index)?;
        let width = page.width().value as f64;
        let height = page.height().value as f64;
        let text = page
            .text()
            .map_err(|e| document_error(&format!("text of page {index}"), e))?;

        // PDFium boxes have a bottom-left origin.
        let mut chars = Vec::new();
        for ch in text.chars().iter() {
            let Some(c) = ch.unicode_char() else {
                continue;
            };
            let Ok(bounds) = ch.loose_bounds() else {
                continue;
            };
            chars.push(TextChar::new(
                c,
                Rect::new(
                    bounds.left().value as f64,
                    height - bounds.top().value as f64,
                    bounds.right().value as f64,
                    height - bounds.bottom().value as f64,
                ),
            ));
        }

        let words = group_chars(&chars, &self.grouping);
        Ok(group_words(width, height, words, &self.grouping))
    }

    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<GrayImage> {
        let page = self.page(index)?;
        let config = PdfRenderConfig::new()
            .set_target_width(width as i32)
            .set_target_height(height as i32)
            .render_form_data(true)
            .render_annotations(true);
        let bitmap = page
            .render_with_config(&config)
            .map_err(|e| document_error(&format!("render page {index}"), e))?;
        Ok(bitmap.as_image().to_luma8())
    }
}
