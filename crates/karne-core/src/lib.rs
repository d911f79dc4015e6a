pub mod archive;
pub mod error;
pub mod extraction;
pub mod matching;
pub mod model;
pub mod roster;
pub mod session;

use error::KarneError;
use extraction::PdfBackend;
use log::info;
use matching::{build_patterns, match_pages, MatchOptions, ParseOutcome};
use model::Roster;

/// Main API entry point: split a multi-page PDF into one report per student.
///
/// Builds the pattern table for `roster`, loads the document and runs a
/// single matching pass over its pages. Fails without a partial result if
/// the roster has no matchable students or the PDF cannot be loaded.
pub fn split_pdf(
    pdf_bytes: &[u8],
    backend: &dyn PdfBackend,
    roster: &Roster,
    options: &MatchOptions,
) -> Result<ParseOutcome, KarneError> {
    let table = build_patterns(roster);
    if table.is_empty() {
        return Err(KarneError::NoQualifyingStudents);
    }

    let document = backend.load(pdf_bytes)?;
    info!(
        "loaded {} pages with {}, matching {} of {} students",
        document.page_count(),
        backend.backend_name(),
        table.len(),
        roster.len()
    );

    Ok(match_pages(document.as_ref(), &table, options))
}
