//! Mock PDF backend for testing.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::backend::{BackendError, PageIter, PdfBackend, PdfDocument, PdfPage};

/// A configurable page for [`MockBackend`].
#[derive(Clone, Debug)]
pub enum MockPage {
    /// Extraction yields this text.
    Text(String),
    /// Extraction fails with this message.
    Broken(String),
    /// The page itself fails to load.
    Unloadable(String),
}

impl MockPage {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }

    pub fn broken(msg: &str) -> Self {
        Self::Broken(msg.to_string())
    }
}

#[derive(Clone, Debug)]
enum MockOutcome {
    Pages(Vec<MockPage>),
    OpenFails(String),
    PagesFail(String),
}

/// A hand-rolled mock implementing [`PdfBackend`] for tests.
///
/// Counts calls to `open()` and tracks how many document handles are still
/// alive, so tests can assert the handle is dropped on every path.
pub struct MockBackend {
    outcome: MockOutcome,
    open_count: AtomicUsize,
    live_handles: Arc<AtomicUsize>,
}

impl MockBackend {
    /// A document made of `pages`.
    pub fn with_pages(pages: Vec<MockPage>) -> Self {
        Self::from_outcome(MockOutcome::Pages(pages))
    }

    /// A document that cannot be opened.
    pub fn failing_open(msg: &str) -> Self {
        Self::from_outcome(MockOutcome::OpenFails(msg.to_string()))
    }

    /// A document that opens but whose page tree cannot be read.
    pub fn failing_pages(msg: &str) -> Self {
        Self::from_outcome(MockOutcome::PagesFail(msg.to_string()))
    }

    fn from_outcome(outcome: MockOutcome) -> Self {
        Self {
            outcome,
            open_count: AtomicUsize::new(0),
            live_handles: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many times `open()` has been called.
    pub fn open_count(&self) -> usize {
        self.open_count.load(Ordering::SeqCst)
    }

    /// Document handles opened and not yet dropped.
    pub fn live_handles(&self) -> usize {
        self.live_handles.load(Ordering::SeqCst)
    }
}

impl PdfBackend for MockBackend {
    fn open(&self, _path: &Path) -> Result<Box<dyn PdfDocument>, BackendError> {
        self.open_count.fetch_add(1, Ordering::SeqCst);

        let (pages, pages_error) = match &self.outcome {
            MockOutcome::OpenFails(msg) => return Err(BackendError::OpenError(msg.clone())),
            MockOutcome::PagesFail(msg) => (Vec::new(), Some(msg.clone())),
            MockOutcome::Pages(pages) => (pages.clone(), None),
        };

        self.live_handles.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockDocument {
            pages,
            pages_error,
            live_handles: Arc::clone(&self.live_handles),
        }))
    }
}

struct MockDocument {
    pages: Vec<MockPage>,
    pages_error: Option<String>,
    live_handles: Arc<AtomicUsize>,
}

impl PdfDocument for MockDocument {
    fn pages(&self) -> Result<PageIter<'_>, BackendError> {
        if let Some(msg) = &self.pages_error {
            return Err(BackendError::ExtractionError(msg.clone()));
        }

        Ok(Box::new(self.pages.iter().map(|page| match page {
            MockPage::Unloadable(msg) => Err(BackendError::ExtractionError(msg.clone())),
            _ => Ok(Box::new(MockPageHandle(page)) as Box<dyn PdfPage + '_>),
        })))
    }
}

impl Drop for MockDocument {
    fn drop(&mut self) {
        self.live_handles.fetch_sub(1, Ordering::SeqCst);
    }
}

struct MockPageHandle<'a>(&'a MockPage);

impl PdfPage for MockPageHandle<'_> {
    fn extract_text(&self) -> Result<String, BackendError> {
        match self.0 {
            MockPage::Text(text) => Ok(text.clone()),
            MockPage::Broken(msg) | MockPage::Unloadable(msg) => {
                Err(BackendError::ExtractionError(msg.clone()))
            }
        }
    }
}
