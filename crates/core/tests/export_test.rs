//! File naming and writing of exported questions.

use std::fs;

use image::{GrayImage, Luma};
use qpsplit_core::{SplitError, export, list_questions, question_filenames};

fn images(count: usize) -> Vec<GrayImage> {
    (0..count)
        .map(|i| GrayImage::from_pixel(10 + i as u32, 5, Luma([0])))
        .collect()
}

#[test]
fn test_either_or_names_share_a_number() {
    insta::assert_snapshot!(question_filenames("4037_w12_qp_12", 4, true).join("\n"), @r"
    4037_w12_qp_12_1.png
    4037_w12_qp_12_2.png
    4037_w12_qp_12_3E.png
    4037_w12_qp_12_3O.png
    ");
}

#[test]
fn test_plain_names_without_pair() {
    let names = question_filenames("4037_w12_qp_12", 3, false);
    assert!(names.iter().all(|n| !n.contains('E') && !n.contains('O')));
    insta::assert_snapshot!(names.join("\n"), @r"
    4037_w12_qp_12_1.png
    4037_w12_qp_12_2.png
    4037_w12_qp_12_3.png
    ");
}

#[test]
fn test_pair_of_two_items() {
    assert_eq!(question_filenames("qp", 2, true), ["qp_1E.png", "qp_1O.png"]);
    assert!(question_filenames("qp", 0, true).is_empty());
}

#[test]
fn test_export_writes_parallel_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let questions = images(3);
    let strips = images(3);
    let report = export(tmp.path(), "qp", &questions, &strips, true).unwrap();

    assert_eq!(
        report.questions,
        [
            tmp.path().join("questions/qp_1.png"),
            tmp.path().join("questions/qp_2E.png"),
            tmp.path().join("questions/qp_2O.png"),
        ]
    );
    assert_eq!(report.id_strips[2], tmp.path().join("question_ids/qp_2O.png"));

    let decoded = image::open(&report.questions[1]).unwrap().to_luma8();
    assert_eq!(decoded, questions[1]);
}

#[test]
fn test_list_questions_is_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(list_questions(tmp.path()).unwrap().is_empty());

    export(tmp.path(), "qp", &images(3), &images(3), false).unwrap();
    let listed: Vec<String> = list_questions(tmp.path())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(listed, ["qp_1.png", "qp_2.png", "qp_3.png"]);
}

#[test]
fn test_unwritable_destination_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let blocked = tmp.path().join("blocked");
    fs::write(&blocked, b"not a directory").unwrap();

    let err = export(&blocked, "qp", &images(1), &images(1), false).unwrap_err();
    assert!(matches!(err, SplitError::ExportIo { .. }));
}
