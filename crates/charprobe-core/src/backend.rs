use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text: {0}")]
    ExtractionError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lazy, forward-only sequence of pages borrowed from an open document.
///
/// A page that cannot be loaded is yielded as an `Err` so callers can skip
/// it without abandoning the rest of the document.
pub type PageIter<'a> = Box<dyn Iterator<Item = Result<Box<dyn PdfPage + 'a>, BackendError>> + 'a>;

/// Trait for PDF reader backends.
///
/// Implementors own the parsing step; aggregation and error isolation live in
/// [`crate::probe::TextLengthProbe`].
pub trait PdfBackend: Send + Sync {
    /// Open a document over the file at `path`.
    ///
    /// The returned handle is released when dropped.
    fn open(&self, path: &Path) -> Result<Box<dyn PdfDocument>, BackendError>;
}

/// An open PDF document.
pub trait PdfDocument {
    /// Iterate the document's pages in order.
    fn pages(&self) -> Result<PageIter<'_>, BackendError>;
}

/// A single page of an open document.
pub trait PdfPage {
    /// Extract the page's plain text. May be empty for image-only pages.
    fn extract_text(&self) -> Result<String, BackendError>;
}
