//! In-memory documents.
//!
//! Useful when text geometry comes from elsewhere, and for synthetic
//! papers. Rendering paints every word box solid black on a white page.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as DrawRect;

use crate::error::{Result, SplitError};
use crate::geometry::Scaler;

use super::{DocumentSource, PageText};

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    pages: Vec<PageText>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pages(pages: Vec<PageText>) -> Self {
        Self { pages }
    }

    pub fn push_page(&mut self, page: PageText) {
        self.pages.push(page);
    }

    pub fn pages(&self) -> &[PageText] {
        &self.pages
    }

    fn page(&self, index: usize) -> Result<&PageText> {
        self.pages
            .get(index)
            .ok_or_else(|| SplitError::Document(format!("page {index} out of range")))
    }
}

impl DocumentSource for MemoryDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_text(&self, index: usize) -> Result<PageText> {
        self.page(index).cloned()
    }

    fn render_page(&self, index: usize, width: u32, height: u32) -> Result<GrayImage> {
        let page = self.page(index)?;
        let scaler = Scaler::new(page.width, page.height, width)?;
        let mut image = GrayImage::from_pixel(width, height, Luma([255]));
        for word in &page.words {
            let Some((x, y, w, h)) = scaler.scale_rect(word.rect).clamp_to(width, height) else {
                continue;
            };
            draw_filled_rect_mut(
                &mut image,
                DrawRect::at(x as i32, y as i32).of_size(w, h),
                Luma([0]),
            );
        }
        Ok(image)
    }
}
