pub mod lopdf_backend;

use crate::error::KarneError;

/// A loaded PDF that can be read one page at a time.
///
/// Page indices are 0-based throughout.
pub trait PdfDocument {
    /// Number of pages in the source document.
    fn page_count(&self) -> usize;

    /// Extract the text of a single page.
    ///
    /// Failures are reported as [`KarneError::Extraction`] and are not fatal
    /// to a matching pass.
    fn extract_text(&self, page_index: usize) -> Result<String, KarneError>;

    /// Produce the serialized bytes of a standalone document containing only
    /// the given page.
    fn extract_single_page(&self, page_index: usize) -> Result<Vec<u8>, KarneError>;
}

/// Trait for PDF loading backends.
pub trait PdfBackend: Send + Sync {
    /// Parse PDF bytes. Malformed input fails with [`KarneError::Load`].
    fn load(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, KarneError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
