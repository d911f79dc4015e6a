use crate::error::KarneError;
use crate::extraction::{PdfBackend, PdfDocument};
use log::{Level, LevelFilter};
use lopdf::Document;

/// PDF backend built on `lopdf`.
///
/// Single pages are cut out by cloning the document, deleting every other
/// page and pruning the objects that are no longer referenced.
pub struct LopdfBackend {
    diagnostics: LevelFilter,
}

impl LopdfBackend {
    pub fn new() -> Self {
        LopdfBackend {
            diagnostics: LevelFilter::Warn,
        }
    }

    /// Set the most verbose level at which this backend reports per-page
    /// diagnostics (pages without a text layer, failed extractions).
    pub fn with_diagnostics(mut self, level: LevelFilter) -> Self {
        self.diagnostics = level;
        self
    }
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfBackend for LopdfBackend {
    fn load(&self, pdf_bytes: &[u8]) -> Result<Box<dyn PdfDocument>, KarneError> {
        let doc = Document::load_mem(pdf_bytes).map_err(|e| KarneError::Load(e.to_string()))?;

        // get_pages() is keyed by 1-based page number, already sorted
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        Ok(Box::new(LopdfDocument {
            doc,
            page_numbers,
            diagnostics: self.diagnostics,
        }))
    }

    fn backend_name(&self) -> &str {
        "lopdf"
    }
}

struct LopdfDocument {
    doc: Document,
    page_numbers: Vec<u32>,
    diagnostics: LevelFilter,
}

impl LopdfDocument {
    fn page_number(&self, page_index: usize) -> Result<u32, KarneError> {
        self.page_numbers
            .get(page_index)
            .copied()
            .ok_or_else(|| KarneError::Extraction {
                page: page_index + 1,
                reason: format!(
                    "page does not exist (document has {} pages)",
                    self.page_numbers.len()
                ),
            })
    }

    fn diagnose(&self, level: Level, message: &str) {
        if level <= self.diagnostics {
            log::log!(level, "{message}");
        }
    }
}

impl PdfDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.page_numbers.len()
    }

    fn extract_text(&self, page_index: usize) -> Result<String, KarneError> {
        let page_number = self.page_number(page_index)?;
        let text = self.doc.extract_text(&[page_number]).map_err(|e| {
            self.diagnose(
                Level::Warn,
                &format!("text extraction failed on page {page_number}: {e}"),
            );
            KarneError::Extraction {
                page: page_number as usize,
                reason: e.to_string(),
            }
        })?;

        if text.trim().is_empty() {
            self.diagnose(
                Level::Info,
                &format!("page {page_number} has no text layer (scanned image?)"),
            );
        }

        Ok(text)
    }

    fn extract_single_page(&self, page_index: usize) -> Result<Vec<u8>, KarneError> {
        let page_number = self.page_number(page_index)?;
        let mut single = self.doc.clone();

        // One call: every number is resolved against the same page tree
        let to_delete: Vec<u32> = self
            .page_numbers
            .iter()
            .copied()
            .filter(|&n| n != page_number)
            .collect();
        single.delete_pages(&to_delete);

        single.prune_objects();
        single.compress();

        let mut buffer = Vec::new();
        single
            .save_to(&mut buffer)
            .map_err(|e| KarneError::Extraction {
                page: page_number as usize,
                reason: format!("save failed: {e}"),
            })?;

        Ok(buffer)
    }
}
