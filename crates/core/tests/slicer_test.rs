//! Gap slicing of redacted pages.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as DrawRect;
use qpsplit_core::SplitParams;
use qpsplit_core::render::PageImage;
use qpsplit_core::slicer::{SliceMetrics, slice_page, slice_pages};

// line height of 20 px: 30 px bands, 10 px noise floor, 20 px split gap
const LINE_PX: i64 = 20;

fn page_with_bands(bands: &[(u32, u32)]) -> PageImage {
    let mut image = GrayImage::from_pixel(200, 400, Luma([255]));
    for &(top, bottom) in bands {
        draw_filled_rect_mut(
            &mut image,
            DrawRect::at(20, top as i32).of_size(100, bottom - top),
            Luma([0]),
        );
    }
    PageImage {
        page_index: 3,
        image,
    }
}

fn spans(page: &PageImage) -> Vec<(u32, u32)> {
    let metrics = SliceMetrics::new(LINE_PX, &SplitParams::default());
    slice_page(page, metrics, 255)
        .iter()
        .map(|s| (s.top, s.top + s.height()))
        .collect()
}

#[test]
fn test_metrics_follow_line_height() {
    let metrics = SliceMetrics::new(LINE_PX, &SplitParams::default());
    assert_eq!(metrics.band, 30);
    assert_eq!(metrics.noise, 10.0);
    assert_eq!(metrics.gap, 20.0);
}

#[test]
fn test_wide_gap_splits_bands() {
    let page = page_with_bands(&[(50, 70), (110, 130)]);
    assert_eq!(spans(&page), [(50, 70), (110, 130)]);
}

#[test]
fn test_gap_just_over_one_line_splits_bands() {
    // 25 px gap, shorter than a scan band
    let page = page_with_bands(&[(50, 70), (95, 115)]);
    assert_eq!(spans(&page), [(50, 70), (95, 115)]);
}

#[test]
fn test_gap_of_one_line_does_not_split() {
    let page = page_with_bands(&[(50, 70), (90, 110)]);
    assert_eq!(spans(&page), [(50, 110)]);
}

#[test]
fn test_gap_inside_a_band_splits() {
    let page = page_with_bands(&[(50, 52), (75, 95)]);
    assert_eq!(spans(&page), [(75, 95)]);
    let page = page_with_bands(&[(40, 60), (60, 62), (85, 105)]);
    assert_eq!(spans(&page), [(40, 62), (85, 105)]);
}

#[test]
fn test_narrow_gap_does_not_split() {
    let page = page_with_bands(&[(50, 70), (78, 98)]);
    assert_eq!(spans(&page), [(50, 98)]);
}

#[test]
fn test_tall_block_stays_whole() {
    let page = page_with_bands(&[(40, 140)]);
    assert_eq!(spans(&page), [(40, 140)]);
}

#[test]
fn test_noise_is_discarded() {
    let page = page_with_bands(&[(50, 54), (150, 170)]);
    assert_eq!(spans(&page), [(150, 170)]);
}

#[test]
fn test_ink_touching_page_bottom_is_flushed() {
    let page = page_with_bands(&[(370, 400)]);
    assert_eq!(spans(&page), [(370, 400)]);
}

#[test]
fn test_slices_are_full_width_and_keep_page() {
    let page = page_with_bands(&[(50, 70)]);
    let metrics = SliceMetrics::new(LINE_PX, &SplitParams::default());
    let slices = slice_page(&page, metrics, 255);

    assert_eq!(slices.len(), 1);
    assert_eq!(slices[0].page_index, 3);
    assert_eq!(slices[0].image.dimensions(), (200, 20));
}

#[test]
fn test_pages_are_sliced_in_order() {
    let mut first = page_with_bands(&[(50, 70)]);
    first.page_index = 1;
    let mut second = page_with_bands(&[(10, 30), (200, 220)]);
    second.page_index = 2;

    let slices = slice_pages(&[first, second], LINE_PX, &SplitParams::default());
    let order: Vec<(usize, u32)> = slices.iter().map(|s| (s.page_index, s.top)).collect();
    assert_eq!(order, [(1, 50), (2, 10), (2, 200)]);
}
