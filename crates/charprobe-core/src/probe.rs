use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::backend::{BackendError, PdfBackend};

/// Outcome of a single probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// Text was aggregated; carries the character count.
    Success(usize),
    /// The path does not exist on disk.
    FileNotFound,
    /// The document could not be read; carries the underlying message.
    ReadFailure(String),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error(transparent)]
    Read(#[from] BackendError),
}

/// Page text concatenated in page order, plus per-page bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedText {
    pub text: String,
    /// Pages visited, including ones that failed.
    pub page_count: usize,
    pub pages_with_text: usize,
    pub pages_failed: usize,
}

impl AggregatedText {
    /// Length in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Summary of a successful probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProbeReport {
    pub char_count: usize,
    pub page_count: usize,
    pub pages_with_text: usize,
    pub pages_failed: usize,
}

impl From<&AggregatedText> for ProbeReport {
    fn from(aggregated: &AggregatedText) -> Self {
        Self {
            char_count: aggregated.char_count(),
            page_count: aggregated.page_count,
            pages_with_text: aggregated.pages_with_text,
            pages_failed: aggregated.pages_failed,
        }
    }
}

/// Concatenate per-page extraction results in order.
///
/// A page whose extraction failed contributes nothing and does not stop the
/// loop. Empty pages contribute nothing either; no separator is ever
/// inserted between pages.
pub fn aggregate_pages<I>(pages: I) -> AggregatedText
where
    I: IntoIterator<Item = Result<String, BackendError>>,
{
    let mut aggregated = AggregatedText::default();

    for (index, page) in pages.into_iter().enumerate() {
        aggregated.page_count += 1;

        let text = match page {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(page = index + 1, error = %err, "skipping page: extraction failed");
                aggregated.pages_failed += 1;
                continue;
            }
        };

        if text.is_empty() {
            tracing::trace!(page = index + 1, "page has no text");
            continue;
        }

        aggregated.pages_with_text += 1;
        aggregated.text.push_str(&text);
    }

    aggregated
}

/// Counts the extractable characters of a PDF through a [`PdfBackend`].
pub struct TextLengthProbe<B> {
    backend: B,
}

impl<B: PdfBackend> TextLengthProbe<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Open `path`, walk its pages and return the aggregated text.
    ///
    /// Document-level failures abort with [`ProbeError::Read`]; page-level
    /// failures are absorbed by [`aggregate_pages`].
    pub fn extract(&self, path: &Path) -> Result<AggregatedText, ProbeError> {
        if !path.exists() {
            return Err(ProbeError::FileNotFound(path.to_path_buf()));
        }

        let document = self.backend.open(path)?;
        let pages = document.pages()?;
        let aggregated = aggregate_pages(pages.map(|page| page.and_then(|p| p.extract_text())));

        tracing::debug!(
            path = %path.display(),
            pages = aggregated.page_count,
            with_text = aggregated.pages_with_text,
            failed = aggregated.pages_failed,
            "aggregated page text"
        );

        Ok(aggregated)
    }

    /// Typed form of [`run`](Self::run).
    pub fn aggregate(&self, path: &Path) -> Result<ProbeReport, ProbeError> {
        self.extract(path).map(|aggregated| ProbeReport::from(&aggregated))
    }

    pub fn run(&self, path: &Path) -> ProbeResult {
        match self.aggregate(path) {
            Ok(report) => ProbeResult::Success(report.char_count),
            Err(ProbeError::FileNotFound(_)) => ProbeResult::FileNotFound,
            Err(ProbeError::Read(err)) => ProbeResult::ReadFailure(err.to_string()),
        }
    }
}
