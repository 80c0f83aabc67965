//! The splitting pipeline: anchors, redaction, rasterization, either/or
//! compositing, slicing, stitching and identification, then export.

use std::path::Path;

use image::GrayImage;
use tracing::{debug, info};

use crate::anchors::{AnchorSet, locate_anchors};
use crate::either_or::composite_either_or;
use crate::error::{Result, SplitError};
use crate::export::{ExportReport, export, export_pages};
use crate::geometry::{PixelRect, Scaler};
use crate::ident::{IdLayout, identify};
use crate::params::{SourceLocation, SplitConfig, SplitParams};
use crate::raster::crop_ink;
use crate::redaction::build_redaction_plan;
use crate::render::{PageImage, rasterize};
use crate::slicer::slice_pages;
use crate::source::{DocumentSource, PageText, PdfiumDocument, bind_pdfium};
use crate::stitcher::{NumberColumn, stitch};

/// Everything one split produces, in memory.
#[derive(Clone, Debug)]
pub struct SplitOutput {
    /// Base name for exported files, when known.
    pub base: Option<String>,
    pub questions: Vec<GrayImage>,
    pub id_strips: Vec<GrayImage>,
    /// Pixel rectangle within each question canvas that held its number.
    pub number_regions: Vec<Option<PixelRect>>,
    /// An either/or pair was honoured.
    pub either_or: bool,
    pub anchors: AnchorSet,
    /// Redacted page rasters after either/or compositing.
    pub pages: Vec<PageImage>,
}

/// Read the text of every page.
pub fn read_pages<D: DocumentSource>(doc: &D) -> Result<Vec<PageText>> {
    (0..doc.page_count()).map(|i| doc.page_text(i)).collect()
}

fn paper_id_fragment<D: DocumentSource>(
    doc: &D,
    anchors: &AnchorSet,
    scaler: &Scaler,
    params: &SplitParams,
) -> Result<Option<GrayImage>> {
    if !params.include_paper_id {
        return Ok(None);
    }
    let (width, height) = scaler.raster_size();
    let page = doc.render_page(anchors.start_page, width, height)?;
    let region = scaler.scale_rect(anchors.paper_id.rect);
    Ok(crop_ink(&page, region, params.blank_level).map(|(fragment, _)| fragment))
}

/// Split a document into question images and ID strips.
pub fn split_document<D: DocumentSource>(doc: &D, params: &SplitParams) -> Result<SplitOutput> {
    let texts = read_pages(doc)?;
    let anchors = locate_anchors(&texts, params)?;

    let start = &texts[anchors.start_page];
    let scaler = Scaler::new(start.width, start.height, params.target_width)?;
    let line_px = scaler.scale(anchors.line_height()).max(1);
    debug!(factor = scaler.factor(), line_px, "raster geometry");

    let plan = build_redaction_plan(&texts, &anchors, &scaler, params);
    let mut pages = rasterize(doc, &plan.map, &scaler)?;

    let pair = plan.either_or_pair();
    if let Some(pair) = pair {
        composite_either_or(doc, &mut pages, pair, &scaler, line_px, params)?;
    }

    let slices = slice_pages(&pages, line_px, params);
    let column = NumberColumn::new(scaler.scale(anchors.question_1.rect.x1), line_px, params);
    let stitched = stitch(slices, &column, line_px, params)?;

    let paper_id = paper_id_fragment(doc, &anchors, &scaler, params)?;
    let (strip_width, _) = scaler.raster_size();
    let layout = IdLayout::new(column.right, line_px, strip_width, params);
    let identified = identify(stitched, paper_id.as_ref(), pair.is_some(), &layout);

    info!(
        pages = pages.len(),
        questions = identified.questions.len(),
        either_or = pair.is_some(),
        "split paper"
    );

    Ok(SplitOutput {
        base: None,
        questions: identified.questions,
        id_strips: identified.id_strips,
        number_regions: identified.number_regions,
        either_or: pair.is_some(),
        anchors,
        pages,
    })
}

/// Write a split to `output_dir`, optionally with the page rasters.
pub fn export_output(
    output: &SplitOutput,
    output_dir: &Path,
    base: &str,
    keep_pages: bool,
) -> Result<ExportReport> {
    let mut report = export(
        output_dir,
        base,
        &output.questions,
        &output.id_strips,
        output.either_or,
    )?;
    if keep_pages {
        report.pages = export_pages(output_dir, base, &output.pages)?;
    }
    Ok(report)
}

/// Run the whole pipeline for a configured source.
pub fn run(config: &SplitConfig) -> Result<ExportReport> {
    let path = match &config.source {
        SourceLocation::Local(path) => path,
        SourceLocation::Remote(url) => return Err(SplitError::RemoteUnsupported(url.clone())),
    };
    let base = config.source.base_name();

    let pdfium = bind_pdfium()?;
    let doc = PdfiumDocument::open(&pdfium, path)?;
    let mut output = split_document(&doc, &config.params)?;
    output.base = Some(base.clone());

    export_output(&output, &config.output_dir, &base, config.keep_pages)
}
