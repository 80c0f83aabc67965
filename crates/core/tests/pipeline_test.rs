//! End-to-end splitting of synthetic papers.

mod common;

use std::fs;
use std::path::{Path, PathBuf};

use common::{cover, header, params, plain_paper, two_question_page, word};
use qpsplit_core::raster::{full_rect, ink_bounds};
use qpsplit_core::{
    MemoryDocument, PixelRect, SourceLocation, SplitConfig, SplitError, export_output, run,
    split_document,
};

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_plain_paper_exports_two_questions() {
    let output = split_document(&plain_paper(), &params()).unwrap();
    assert!(!output.either_or);
    assert_eq!(output.questions.len(), 2);
    assert_eq!(output.id_strips.len(), 2);

    let tmp = tempfile::tempdir().unwrap();
    let report = export_output(&output, tmp.path(), "0580_s23_qp_12", false).unwrap();
    assert_eq!(report.questions.len(), 2);
    assert!(report.pages.is_empty());

    let expected = ["0580_s23_qp_12_1.png", "0580_s23_qp_12_2.png"];
    assert_eq!(file_names(&tmp.path().join("questions")), expected);
    assert_eq!(file_names(&tmp.path().join("question_ids")), expected);
    assert!(!tmp.path().join("pages").exists());
}

#[test]
fn test_question_numbers_are_stripped() {
    let output = split_document(&plain_paper(), &params()).unwrap();

    assert_eq!(
        output.number_regions,
        [
            Some(PixelRect::new(20, 0, 30, 20)),
            Some(PixelRect::new(20, 0, 30, 20)),
        ]
    );
    for question in &output.questions {
        assert_eq!(ink_bounds(question, PixelRect::new(0, 0, 50, 30), 255), None);
    }

    // question 1 spans its two text lines
    let first = &output.questions[0];
    assert_eq!(first.dimensions(), (400, 50));
    assert_eq!(
        ink_bounds(first, full_rect(first), 255),
        Some(PixelRect::new(60, 0, 120, 50))
    );
}

#[test]
fn test_id_strip_holds_number_and_paper_id() {
    let output = split_document(&plain_paper(), &params()).unwrap();
    let strip = &output.id_strips[0];

    assert_eq!(strip.dimensions(), (400, 40));
    // number glyph right-aligned, paper id half a line to its left
    assert_eq!(
        ink_bounds(strip, PixelRect::new(375, 0, 400, 40), 255),
        Some(PixelRect::new(380, 10, 390, 30))
    );
    assert_eq!(
        ink_bounds(strip, PixelRect::new(0, 0, 375, 40), 255),
        Some(PixelRect::new(270, 10, 370, 30))
    );
}

#[test]
fn test_paper_id_can_be_left_out() {
    let mut params = params();
    params.include_paper_id = false;
    let output = split_document(&plain_paper(), &params).unwrap();
    let strip = &output.id_strips[1];
    assert_eq!(
        ink_bounds(strip, full_rect(strip), 255),
        Some(PixelRect::new(380, 10, 390, 30))
    );
}

#[test]
fn test_redacted_pages_are_kept_for_preview() {
    let output = split_document(&plain_paper(), &params()).unwrap();
    assert_eq!(output.pages.len(), 1);
    assert_eq!(output.pages[0].page_index, 1);

    // header bands are painted white
    let page = &output.pages[0].image;
    assert_eq!(ink_bounds(page, PixelRect::new(0, 0, 400, 80), 255), None);

    let tmp = tempfile::tempdir().unwrap();
    let report = export_output(&output, tmp.path(), "qp", true).unwrap();
    assert_eq!(report.pages, [tmp.path().join("pages").join("qp_p1.png")]);
    assert!(report.pages[0].is_file());
}

#[test]
fn test_export_is_idempotent() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    for dir in [first.path(), second.path()] {
        let output = split_document(&plain_paper(), &params()).unwrap();
        export_output(&output, dir, "qp", false).unwrap();
    }

    for sub in ["questions", "question_ids"] {
        let names = file_names(&first.path().join(sub));
        assert_eq!(names, file_names(&second.path().join(sub)));
        for name in names {
            let a = fs::read(first.path().join(sub).join(&name)).unwrap();
            let b = fs::read(second.path().join(sub).join(&name)).unwrap();
            assert_eq!(a, b, "{sub}/{name} differs");
        }
    }
}

#[test]
fn test_extra_either_or_marker_keeps_one_pair() {
    let start = header("2")
        .with_word(word("1", (10.0, 60.0, 15.0, 70.0), 2, 0, 0))
        .with_word(word("Solve", (30.0, 60.0, 60.0, 70.0), 2, 0, 1))
        .with_word(word("2", (10.0, 150.0, 15.0, 160.0), 3, 0, 0))
        .with_word(word("EITHER", (30.0, 150.0, 60.0, 160.0), 3, 0, 1))
        .with_word(word("Prove", (30.0, 175.0, 60.0, 185.0), 3, 1, 0));
    let branch = header("3")
        .with_word(word("OR", (30.0, 60.0, 45.0, 70.0), 2, 0, 0))
        .with_word(word("Show", (30.0, 85.0, 60.0, 95.0), 2, 1, 0));
    let extra = header("4")
        .with_word(word("OR", (30.0, 60.0, 45.0, 70.0), 2, 0, 0))
        .with_word(word("Draw", (30.0, 85.0, 60.0, 95.0), 2, 1, 0));
    let doc = MemoryDocument::from_pages(vec![cover(), start, branch, extra]);

    let output = split_document(&doc, &params()).unwrap();
    assert!(output.either_or);
    assert_eq!(output.questions.len(), 3);

    let tmp = tempfile::tempdir().unwrap();
    export_output(&output, tmp.path(), "qp", false).unwrap();
    let expected = ["qp_1.png", "qp_2E.png", "qp_2O.png"];
    assert_eq!(file_names(&tmp.path().join("questions")), expected);
    assert_eq!(file_names(&tmp.path().join("question_ids")), expected);
}

#[test]
fn test_missing_anchors_reject_the_paper() {
    let doc = MemoryDocument::from_pages(vec![cover(), cover()]);
    let err = split_document(&doc, &params()).unwrap_err();
    assert!(matches!(err, SplitError::AnchorNotFound { .. }));
}

#[test]
fn test_text_before_question_one_is_rejected() {
    let start = header("2")
        .with_word(word("Attempt", (30.0, 45.0, 80.0, 55.0), 2, 0, 0))
        .with_word(word("1", (10.0, 100.0, 15.0, 110.0), 3, 0, 0))
        .with_word(word("Solve", (30.0, 100.0, 60.0, 110.0), 3, 0, 1));
    let doc = MemoryDocument::from_pages(vec![cover(), start]);
    let err = split_document(&doc, &params()).unwrap_err();
    assert!(matches!(err, SplitError::NoLeadingQuestion));
}

#[test]
fn test_zero_height_page_is_invalid() {
    let mut start = two_question_page();
    start.height = 0.0;
    let doc = MemoryDocument::from_pages(vec![cover(), start]);
    let err = split_document(&doc, &params()).unwrap_err();
    assert!(matches!(err, SplitError::InvalidGeometry { .. }));
}

#[test]
fn test_remote_source_is_unsupported() {
    let config = SplitConfig::new(SourceLocation::Remote(
        "https://example.org/papers/0580_s23_qp_12.pdf".to_string(),
    ));
    let err = run(&config).unwrap_err();
    assert!(matches!(err, SplitError::RemoteUnsupported(_)));
    assert_eq!(config.source.base_name(), "0580_s23_qp_12");
    assert_eq!(config.output_dir, PathBuf::from("exports"));
}
