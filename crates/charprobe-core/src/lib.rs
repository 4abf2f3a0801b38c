pub mod backend;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod probe;

pub use backend::{BackendError, PageIter, PdfBackend, PdfDocument, PdfPage};
pub use probe::{
    AggregatedText, ProbeError, ProbeReport, ProbeResult, TextLengthProbe, aggregate_pages,
};
