//! Splitting a PDF into one single-page PDF per page.
//!
//! Outputs are written next to the source as `{stem}_Page_{n}.pdf` with `n`
//! 1-based. Nothing in here is fatal to the caller: a document that fails to
//! load, a page that fails to extract and a page that fails to write are all
//! logged and degrade the result instead of erroring.

use anyhow::{Context, Result};
use clap::ValueEnum;
use lopdf::Document;
use serde::Serialize;
use tempfile::NamedTempFile;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::PdfDocument;

/// Which documents get split at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PagePolicy {
    /// Split every page, even when the document has only one.
    #[value(name = "always")]
    AlwaysSplit,
    /// Leave documents with one page (or none) alone and hand back the source.
    #[default]
    SkipSingle,
}

/// What to return when the source cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LoadFailurePolicy {
    /// Return the source path unchanged.
    #[default]
    #[value(name = "source")]
    ReturnSource,
    /// Return no paths.
    #[value(name = "empty")]
    ReturnEmpty,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitOptions {
    pub page_policy: PagePolicy,
    pub on_load_failure: LoadFailurePolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("Failed to load PDF {}: {reason}", .path.display())]
    DocumentLoad { path: PathBuf, reason: String },

    #[error("Failed to extract page {page}: {reason}")]
    PageExtraction { page: u32, reason: String },

    #[error("Failed to write page {page} to {}: {reason}", .path.display())]
    Write {
        page: u32,
        path: PathBuf,
        reason: String,
    },
}

/// Outcome of one split call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitReport {
    /// Paths handed back to the caller, in page order.
    pub outputs: Vec<PathBuf>,
    /// Pages serialized by this call.
    pub written: Vec<u32>,
    /// Pages whose output file already existed and was kept as is.
    pub reused: Vec<u32>,
    /// Pages that failed to extract or write.
    pub skipped: Vec<u32>,
    /// Set when the source was returned (or nothing was) without splitting.
    pub passthrough: bool,
}

/// The minimal surface the splitter needs from a PDF library.
pub trait PageSource {
    fn page_count(&self) -> u32;

    /// A new document containing only `page` (1-indexed).
    fn extract_page(&self, page: u32) -> Result<Document>;

    fn write(&self, doc: &mut Document, path: &Path) -> Result<()> {
        PdfDocument::save(doc, path)
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        PdfDocument::page_count(self)
    }

    fn extract_page(&self, page: u32) -> Result<Document> {
        PdfDocument::extract_page(self, page)
    }
}

/// Output location for `page` (1-indexed) of `source`.
pub fn output_path(source: &Path, page: u32) -> PathBuf {
    let mut file_name = source
        .file_stem()
        .unwrap_or(OsStr::new("page"))
        .to_os_string();
    file_name.push(format!("_Page_{}.pdf", page));
    match source.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// Every path a full split of a `page_count`-page document would produce.
pub fn planned_outputs(source: &Path, page_count: u32) -> Vec<PathBuf> {
    (1..=page_count).map(|page| output_path(source, page)).collect()
}

pub fn split_pages<P: AsRef<Path>>(source: P, options: &SplitOptions) -> Vec<PathBuf> {
    split_pages_with_report(source, options).outputs
}

pub fn split_pages_with_report<P: AsRef<Path>>(source: P, options: &SplitOptions) -> SplitReport {
    let source = source.as_ref();
    match PdfDocument::open(source) {
        Ok(doc) => split_document(&doc, source, options),
        Err(e) => {
            let err = SplitError::DocumentLoad {
                path: source.to_path_buf(),
                reason: format!("{:#}", e),
            };
            log::warn!("{}", err);
            let outputs = match options.on_load_failure {
                LoadFailurePolicy::ReturnSource => vec![source.to_path_buf()],
                LoadFailurePolicy::ReturnEmpty => Vec::new(),
            };
            SplitReport {
                outputs,
                passthrough: true,
                ..Default::default()
            }
        }
    }
}

/// Split an already opened document whose file lives at `source`.
pub fn split_document<S: PageSource>(doc: &S, source: &Path, options: &SplitOptions) -> SplitReport {
    let total_pages = doc.page_count();

    if options.page_policy == PagePolicy::SkipSingle && total_pages <= 1 {
        log::debug!(
            "{} has {} page(s), returning it unsplit",
            source.display(),
            total_pages
        );
        return SplitReport {
            outputs: vec![source.to_path_buf()],
            passthrough: true,
            ..Default::default()
        };
    }

    let mut report = SplitReport::default();

    for page in 1..=total_pages {
        let output = output_path(source, page);

        let mut new_doc = match doc.extract_page(page) {
            Ok(d) => d,
            Err(e) => {
                let err = SplitError::PageExtraction {
                    page,
                    reason: format!("{:#}", e),
                };
                log::warn!("{}", err);
                report.skipped.push(page);
                continue;
            }
        };

        // A directory or other non-file at the path is not a usable output.
        if output.is_file() {
            log::debug!("Reusing existing {}", output.display());
            report.reused.push(page);
            report.outputs.push(output);
            continue;
        }

        match write_page(doc, &mut new_doc, &output) {
            Ok(()) => {
                log::debug!("Wrote page {} to {}", page, output.display());
                report.written.push(page);
                report.outputs.push(output);
            }
            Err(e) => {
                let err = SplitError::Write {
                    page,
                    path: output,
                    reason: format!("{:#}", e),
                };
                log::warn!("{}", err);
                report.skipped.push(page);
            }
        }
    }

    log::info!(
        "Split {} ({} pages): {} written, {} reused, {} skipped",
        source.display(),
        total_pages,
        report.written.len(),
        report.reused.len(),
        report.skipped.len()
    );

    report
}

/// Serialize `new_doc` to a temporary file beside `output` and move it into
/// place only once the write has fully succeeded. A failed write never leaves
/// a partial file at `output` for a later call to pick up as already produced.
fn write_page<S: PageSource>(doc: &S, new_doc: &mut Document, output: &Path) -> Result<()> {
    let dir = output
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let staged = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    doc.write(new_doc, staged.path())?;

    staged
        .persist_noclobber(output)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to move page into {}", output.display()))?;
    Ok(())
}
