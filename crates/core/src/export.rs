//! Writing questions and ID strips to disk.
//!
//! Layout below the output directory:
//!
//! ```text
//! questions/{base}_{n}.png
//! question_ids/{base}_{n}.png
//! pages/{base}_p{page}.png      (optional redacted page dump)
//! ```
//!
//! When an either/or pair was honoured the last two names become
//! `{base}_{n}E.png` and `{base}_{n}O.png`, sharing one question number.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::{GrayImage, ImageFormat};
use rayon::prelude::*;
use tracing::{debug, info};

use crate::error::{Result, SplitError};
use crate::render::PageImage;

pub const QUESTIONS_DIR: &str = "questions";
pub const QUESTION_IDS_DIR: &str = "question_ids";
pub const PAGES_DIR: &str = "pages";

/// File names for `count` exported items.
pub fn question_filenames(base: &str, count: usize, either_or: bool) -> Vec<String> {
    let paired = either_or && count >= 2;
    (1..=count)
        .map(|i| {
            if paired && i == count - 1 {
                format!("{base}_{i}E.png")
            } else if paired && i == count {
                format!("{base}_{}O.png", i - 1)
            } else {
                format!("{base}_{i}.png")
            }
        })
        .collect()
}

/// Paths written by [`export`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportReport {
    pub questions: Vec<PathBuf>,
    pub id_strips: Vec<PathBuf>,
    pub pages: Vec<PathBuf>,
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| SplitError::export_io(path, e))
}

fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn write_png(path: &Path, image: &GrayImage) -> Result<()> {
    let bytes = encode_png(image)?;
    fs::write(path, bytes).map_err(|e| SplitError::export_io(path, e))
}

/// Write every `(path, image)` job in parallel.
///
/// On failure the files this call already wrote are removed again.
fn write_all(jobs: &[(PathBuf, &GrayImage)]) -> Result<()> {
    let results: Vec<Result<()>> = jobs
        .par_iter()
        .map(|(path, image)| write_png(path, image))
        .collect();

    if results.iter().all(|r| r.is_ok()) {
        return Ok(());
    }
    for ((path, _), result) in jobs.iter().zip(&results) {
        if result.is_ok() {
            let _ = fs::remove_file(path);
        }
    }
    results.into_iter().find_map(|r| r.err()).map_or(Ok(()), Err)
}

/// Write questions and ID strips under `output_dir`.
///
/// `questions` and `id_strips` must have the same length; names are shared
/// between the two directories.
pub fn export(
    output_dir: &Path,
    base: &str,
    questions: &[GrayImage],
    id_strips: &[GrayImage],
    either_or: bool,
) -> Result<ExportReport> {
    let questions_dir = output_dir.join(QUESTIONS_DIR);
    let ids_dir = output_dir.join(QUESTION_IDS_DIR);
    create_dir(&questions_dir)?;
    create_dir(&ids_dir)?;

    let names = question_filenames(base, questions.len(), either_or);
    let mut report = ExportReport::default();
    let mut jobs = Vec::with_capacity(names.len() * 2);
    for ((name, question), strip) in names.iter().zip(questions).zip(id_strips) {
        let question_path = questions_dir.join(name);
        let strip_path = ids_dir.join(name);
        report.questions.push(question_path.clone());
        report.id_strips.push(strip_path.clone());
        jobs.push((question_path, question));
        jobs.push((strip_path, strip));
    }
    write_all(&jobs)?;

    info!(
        questions = report.questions.len(),
        dir = %output_dir.display(),
        "exported questions"
    );
    Ok(report)
}

/// Dump redacted page rasters to `output_dir/pages`.
pub fn export_pages(output_dir: &Path, base: &str, pages: &[PageImage]) -> Result<Vec<PathBuf>> {
    let dir = output_dir.join(PAGES_DIR);
    create_dir(&dir)?;

    let jobs: Vec<(PathBuf, &GrayImage)> = pages
        .iter()
        .map(|page| (dir.join(format!("{base}_p{}.png", page.page_index)), &page.image))
        .collect();
    write_all(&jobs)?;

    debug!(pages = jobs.len(), "exported page rasters");
    Ok(jobs.into_iter().map(|(path, _)| path).collect())
}

/// Files under `output_dir/questions`, sorted by name.
///
/// A missing directory lists as empty.
pub fn list_questions(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let dir = output_dir.join(QUESTIONS_DIR);
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(&dir).map_err(|e| SplitError::export_io(&dir, e))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| SplitError::export_io(&dir, e))?;
        let path = entry.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
