//! qpsplit - split typeset exam question papers into per-question images.
//!
//! A paper is read through a [`DocumentSource`], its headers and answer
//! space are redacted, the remaining ink is cut at whitespace gaps and
//! re-assembled into one image per question, and every question gets an
//! ID strip carrying its number and the paper identifier.

pub mod anchors;
pub mod either_or;
pub mod error;
pub mod export;
pub mod geometry;
pub mod ident;
pub mod params;
pub mod pipeline;
pub mod raster;
pub mod redaction;
pub mod render;
pub mod slicer;
pub mod source;
pub mod stitcher;

pub use anchors::{AnchorSet, locate_anchors};
pub use error::{Result, SplitError};
pub use export::{ExportReport, export, list_questions, question_filenames};
pub use geometry::{PixelRect, Rect, Scaler};
pub use params::{SourceLocation, SplitConfig, SplitParams};
pub use pipeline::{SplitOutput, export_output, run, split_document};
pub use redaction::{EitherOrMarker, RedactionMap, RedactionPlan, build_redaction_plan};
pub use source::{DocumentSource, MemoryDocument, PageText, PdfiumDocument, TextBlock, TextWord};
