//! Splitting parameters and run configuration.
//!
//! Every heuristic threshold of the pipeline lives in [`SplitParams`].
//! Thresholds expressed in "lines" are multiples of the one-line height,
//! measured from the question-1 anchor of the processed paper.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Result, SplitError};

/// Parameters for question extraction.
///
/// Tuned for one institutional template: header with page number and
/// paper identifier, question numbers in a single left column, optional
/// "Examiner's Use" margin.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SplitParams {
    /// Raster width in pixels every page is rendered at. 2480 px is an A4
    /// page at 300 dpi.
    pub target_width: u32,

    /// Number of leading words per page inspected for layout anchors.
    pub anchor_scan_words: usize,

    /// Regular expression matched against the start of a word to recognise
    /// the paper identifier.
    pub paper_id_pattern: String,

    /// The question-1 label must end within this fraction of the page width.
    pub question_column_fraction: f64,

    /// Either/or labels starting within this fraction of the page width are
    /// alternative-question markers; elsewhere they open an answer region.
    pub either_or_column_fraction: f64,

    /// Half-height of the band blanked around the paper identifier line.
    pub paper_id_margin_lines: f64,

    /// The examiner's-use column is blanked from this far left of its label.
    pub examiner_margin_lines: f64,

    /// Minimum run of periods for an answer-line leader.
    pub leader_min_dots: usize,

    /// Answer-line leaders are wider than this fraction of the page width.
    pub leader_min_width_fraction: f64,

    /// A "Section" word is a banner when its left margin exceeds this
    /// multiple of its right margin.
    pub section_margin_ratio: f64,

    /// Height blanked below a section banner.
    pub section_band_lines: f64,

    /// An either/or answer region is blanked from this far above its label.
    pub either_or_tail_lines: f64,

    /// Vertical reach above and below an either/or marker when lifting the
    /// shared question fragment.
    pub either_or_context_lines: f64,

    /// Offset below a marker's top at which the shared fragment is pasted.
    pub either_or_offset_lines: f64,

    /// The permission footer is blanked from this far above its block.
    pub permission_margin_lines: f64,

    /// Height of the scan band used by the gap slicer.
    pub band_height_lines: f64,

    /// Kept regions shorter than this are discarded as noise.
    pub noise_height_lines: f64,

    /// A blank run taller than this closes the current kept region.
    pub split_gap_lines: f64,

    /// Lower bound of a question-number glyph height.
    pub number_min_lines: f64,

    /// Upper bound of a question-number glyph height.
    pub number_max_lines: f64,

    /// Blank gap inserted between stitched continuation slices.
    pub stitch_gap_lines: f64,

    /// Extra width right of the question column searched for the number.
    pub number_crop_extra_lines: f64,

    /// Height of the top-left region searched for the number.
    pub number_crop_height_lines: f64,

    /// Height of a composed ID strip.
    pub id_strip_height_lines: f64,

    /// Gap between fragments (and the right edge) of an ID strip.
    pub id_strip_gap_lines: f64,

    /// Pixels at or above this gray level count as blank.
    pub blank_level: u8,

    /// Put the paper identifier fragment into ID strips.
    pub include_paper_id: bool,
}

impl Default for SplitParams {
    fn default() -> Self {
        Self {
            target_width: 2480,
            anchor_scan_words: 25,
            paper_id_pattern: r"\d{4}/\d{2}/[A-Z]/[A-Z]/\d{2}".to_string(),
            question_column_fraction: 1.0 / 8.0,
            either_or_column_fraction: 1.0 / 4.0,
            paper_id_margin_lines: 1.0,
            examiner_margin_lines: 0.5,
            leader_min_dots: 6,
            leader_min_width_fraction: 0.5,
            section_margin_ratio: 0.9,
            section_band_lines: 2.0,
            either_or_tail_lines: 2.0,
            either_or_context_lines: 2.0,
            either_or_offset_lines: 0.2,
            permission_margin_lines: 1.0,
            band_height_lines: 1.5,
            noise_height_lines: 0.5,
            split_gap_lines: 1.0,
            number_min_lines: 1.0 / 3.0,
            number_max_lines: 1.0,
            stitch_gap_lines: 1.0,
            number_crop_extra_lines: 1.0,
            number_crop_height_lines: 1.5,
            id_strip_height_lines: 2.0,
            id_strip_gap_lines: 0.5,
            blank_level: 255,
            include_paper_id: true,
        }
    }
}

impl SplitParams {
    /// Load parameters from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .map_err(|e| SplitError::Document(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(data: &str) -> Result<Self> {
        serde_json::from_str(data).map_err(|e| SplitError::Document(format!("parameters: {e}")))
    }
}

/// Where the question paper comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Local(PathBuf),
    /// Fetching papers by URL is not implemented.
    Remote(String),
}

impl SourceLocation {
    /// Base name for exported files: the file stem of a local path.
    pub fn base_name(&self) -> String {
        match self {
            SourceLocation::Local(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "paper".to_string()),
            SourceLocation::Remote(url) => url
                .rsplit('/')
                .next()
                .and_then(|name| name.split('.').next())
                .filter(|s| !s.is_empty())
                .unwrap_or("paper")
                .to_string(),
        }
    }
}

/// Everything one pipeline run needs.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    pub source: SourceLocation,
    /// Root of the export tree; questions land in `questions/` and ID strips
    /// in `question_ids/` below it.
    pub output_dir: PathBuf,
    /// Also write the redacted page rasters to `pages/`.
    pub keep_pages: bool,
    pub params: SplitParams,
}

impl SplitConfig {
    pub fn new(source: SourceLocation) -> Self {
        Self {
            source,
            output_dir: PathBuf::from("exports"),
            keep_pages: false,
            params: SplitParams::default(),
        }
    }
}
