use std::path::Path;

use mupdf::{Document, Page, TextPageFlags};

use charprobe_core::{BackendError, PageIter, PdfBackend, PdfDocument, PdfPage};

/// MuPDF-based implementation of [`PdfBackend`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) from the aggregation logic in `charprobe-core`.
///
/// Page text is read from mupdf's structured text, block by block and line
/// by line. By default every line is followed by `\n`.
pub struct MupdfBackend {
    line_breaks: bool,
}

impl Default for MupdfBackend {
    fn default() -> Self {
        Self { line_breaks: true }
    }
}

impl MupdfBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `\n` after each extracted line. Pass `false` to count glyph
    /// text only.
    pub fn with_line_breaks(mut self, enabled: bool) -> Self {
        self.line_breaks = enabled;
        self
    }
}

impl PdfBackend for MupdfBackend {
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        let path_str = path
            .to_str()
            .ok_or_else(|| BackendError::OpenError("invalid path encoding".into()))?;

        // mupdf's own error for a directory varies by platform
        if !std::fs::metadata(path)?.is_file() {
            return Err(BackendError::OpenError(format!(
                "{} is not a regular file",
                path.display()
            )));
        }

        let document =
            Document::open(path_str).map_err(|e| BackendError::OpenError(e.to_string()))?;
        tracing::trace!(path = path_str, "opened document");

        Ok(Box::new(MupdfDocument {
            document,
            line_breaks: self.line_breaks,
        }))
    }
}

struct MupdfDocument {
    document: Document,
    line_breaks: bool,
}

impl PdfDocument for MupdfDocument {
    fn pages(&self) -> Result<PageIter<'_>, BackendError> {
        let line_breaks = self.line_breaks;
        let pages = self
            .document
            .pages()
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        Ok(Box::new(pages.map(move |page_result| {
            page_result
                .map(|page| Box::new(MupdfPage { page, line_breaks }) as Box<dyn PdfPage + '_>)
                .map_err(|e| BackendError::ExtractionError(e.to_string()))
        })))
    }
}

struct MupdfPage {
    page: Page,
    line_breaks: bool,
}

impl PdfPage for MupdfPage {
    fn extract_text(&self) -> Result<String, BackendError> {
        let text_page = self
            .page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| BackendError::ExtractionError(e.to_string()))?;

        let mut page_text = String::new();
        for block in text_page.blocks() {
            for line in block.lines() {
                page_text.extend(line.chars().map(|c| c.char().unwrap_or('\u{FFFD}')));
                if self.line_breaks {
                    page_text.push('\n');
                }
            }
        }

        Ok(page_text)
    }
}
