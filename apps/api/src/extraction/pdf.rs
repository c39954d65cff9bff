//! PDF → plain text. The only place the PDF library is touched.

use std::panic::{self, AssertUnwindSafe};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{0}")]
    Pdf(String),

    #[error("PDF library panicked while reading the document")]
    Panicked,
}

/// Converts an uploaded document into text. Blocking; call from
/// `spawn_blocking` when on the async runtime.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed extractor. Pages are concatenated in document order.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        // pdf-extract panics on some malformed fonts instead of returning Err.
        panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(bytes)))
            .map_err(|_| ExtractError::Panicked)?
            .map_err(|e| ExtractError::Pdf(e.to_string()))
    }
}
