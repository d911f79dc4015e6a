use karne_core::archive;
use karne_core::error::KarneError;
use karne_core::extraction::lopdf_backend::LopdfBackend;
use karne_core::matching::MatchOptions;
use karne_core::model::NamingMode;
use karne_core::roster::RosterStore;
use karne_core::session::{ResultStore, SessionId};
use log::{info, warn, LevelFilter};
use std::path::{Path, PathBuf};

use crate::output;

/// Where and how the split pages are written.
pub struct SplitOutput {
    pub out_dir: Option<PathBuf>,
    pub zip: Option<PathBuf>,
    pub naming: String,
    pub drop_pages: Vec<usize>,
}

pub fn run(
    data: &Path,
    class: &str,
    pdf_file: PathBuf,
    split_output: SplitOutput,
    output_format: &str,
    pdf_log_level: LevelFilter,
) -> Result<(), KarneError> {
    let naming = NamingMode::from_str_loose(&split_output.naming).ok_or_else(|| {
        KarneError::InvalidInput(format!(
            "unknown naming '{}' (expected number or name)",
            split_output.naming
        ))
    })?;

    let store = RosterStore::open(data)?;
    let roster = store.roster(class)?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let backend = LopdfBackend::new().with_diagnostics(pdf_log_level);
    let outcome = karne_core::split_pdf(&pdf_bytes, &backend, &roster, &MatchOptions::default())?;

    let results = ResultStore::new();
    let session = SessionId::new();
    results.replace(session, outcome);

    for page in &split_output.drop_pages {
        let ids: Vec<_> = results
            .get(session)?
            .reports
            .iter()
            .filter(|r| r.page_number == *page)
            .map(|r| r.id)
            .collect();
        if ids.is_empty() {
            warn!("--drop-page {page}: no report for that page");
        }
        for id in ids {
            results.delete_report(session, id)?;
            info!("dropped report for page {page}");
        }
    }

    let outcome = results.get(session)?;
    results.evict(session);

    if let Some(path) = &split_output.zip {
        let bytes = archive::write_zip(&outcome.reports, naming)?;
        std::fs::write(path, bytes)?;
        eprintln!(
            "Wrote {} report(s) to {}",
            outcome.reports.len(),
            path.display()
        );
    }

    if let Some(dir) = &split_output.out_dir {
        let written = archive::write_directory(&outcome.reports, naming, dir)?;
        eprintln!("Wrote {} file(s) to {}", written.len(), dir.display());
    }

    match output_format {
        "json" => output::json::print_outcome(&outcome)?,
        _ => output::table::print_outcome(class, &outcome, naming),
    }

    Ok(())
}
