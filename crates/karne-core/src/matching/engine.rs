use crate::error::KarneError;
use crate::extraction::PdfDocument;
use crate::matching::normalize::{byte_offset, fold_case};
use crate::matching::outcome::{OutcomeBuilder, PageMatchResult, ParseOutcome};
use crate::matching::pattern::{PatternSet, PatternTable, TokenOrder};
use log::{debug, info, warn};

/// Characters of context kept on each side of a match.
pub const CONTEXT_CHAR_LIMIT: usize = 10;

/// A match with at most this many characters before and after it is treated
/// as covering the whole page text.
pub const EXACT_MATCH_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchOptions {
    pub context_chars: usize,
    pub exact_match_limit: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        MatchOptions {
            context_chars: CONTEXT_CHAR_LIMIT,
            exact_match_limit: EXACT_MATCH_LIMIT,
        }
    }
}

/// The winning pattern for a page's text.
#[derive(Debug, Clone)]
pub struct TextMatch<'t> {
    pub pattern_set: &'t PatternSet,
    pub order: TokenOrder,
    pub excerpt: String,
}

/// Find the first roster entry whose pattern occurs in `page_text`.
///
/// Entries are tried in roster order, forward pattern before reverse. The
/// first hit wins and later entries are not evaluated, even if they would
/// also match this page.
pub fn match_page_text<'t>(
    page_text: &str,
    table: &'t PatternTable,
    options: &MatchOptions,
) -> Option<TextMatch<'t>> {
    let folded = fold_case(page_text);

    for set in table.iter() {
        for pattern in set.patterns() {
            if let Some(range) = pattern.find(&folded) {
                // Folding keeps one char per char, so char positions in the
                // folded text address the same characters in the original.
                let start = folded[..range.start].chars().count();
                let len = folded[range.clone()].chars().count();
                let excerpt = build_excerpt(page_text, start, start + len, options);

                return Some(TextMatch {
                    pattern_set: set,
                    order: pattern.order(),
                    excerpt,
                });
            }
        }
    }

    None
}

/// Evidence snippet for a match spanning chars `start..end` of `text`.
fn build_excerpt(text: &str, start: usize, end: usize, options: &MatchOptions) -> String {
    let total = text.chars().count();
    let pre = start;
    let post = total - end;

    let (from, to) = if pre <= options.exact_match_limit && post <= options.exact_match_limit {
        (start, end)
    } else {
        (
            start.saturating_sub(options.context_chars),
            (end + options.context_chars).min(total),
        )
    };

    text[byte_offset(text, from)..byte_offset(text, to)]
        .trim()
        .to_string()
}

/// Extract and match a single page.
pub fn match_page(
    document: &dyn PdfDocument,
    page_index: usize,
    table: &PatternTable,
    options: &MatchOptions,
) -> Result<PageMatchResult, KarneError> {
    let text = document.extract_text(page_index)?;

    let result = match match_page_text(&text, table, options) {
        Some(m) => {
            debug!(
                "page {}: matched '{}' ({:?})",
                page_index + 1,
                m.pattern_set.entry.full_name,
                m.order
            );
            PageMatchResult {
                page_index,
                matched_entry: Some(m.pattern_set.entry.clone()),
                excerpt: Some(m.excerpt),
            }
        }
        None => {
            debug!("page {}: no match", page_index + 1);
            PageMatchResult {
                page_index,
                matched_entry: None,
                excerpt: None,
            }
        }
    };

    Ok(result)
}

/// Run a full matching pass over `document`, in ascending page order.
///
/// Pages whose text or single-page bytes cannot be extracted are logged and
/// skipped; they produce no report and leave the occurrence counts alone.
pub fn match_pages(
    document: &dyn PdfDocument,
    table: &PatternTable,
    options: &MatchOptions,
) -> ParseOutcome {
    let total_pages = document.page_count();
    let mut builder = OutcomeBuilder::new(table, total_pages);
    let mut skipped = 0;

    for page_index in 0..total_pages {
        let result = match match_page(document, page_index, table, options) {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping page {}: {e}", page_index + 1);
                skipped += 1;
                continue;
            }
        };

        let (Some(entry), Some(excerpt)) = (result.matched_entry, result.excerpt) else {
            continue;
        };

        let page_content = match document.extract_single_page(page_index) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("skipping page {}: {e}", page_index + 1);
                skipped += 1;
                continue;
            }
        };

        builder.record(page_index, &entry, excerpt, page_content);
    }

    let outcome = builder.finish();
    info!(
        "matched {} of {} pages, {} students missing, {} pages skipped",
        outcome.found_count(),
        total_pages,
        outcome.missing_count(),
        skipped
    );
    outcome
}
