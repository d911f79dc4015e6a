use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use log::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::KarneError;
use crate::matching::outcome::Report;
use crate::model::NamingMode;

/// Output file names for `reports`, unique within one archive.
///
/// A name seen before gets `_{k}` inserted before the extension, `k`
/// counting from 2. Path separators are replaced so every name stays a
/// single path component.
pub fn archive_names(reports: &[Report], mode: NamingMode) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();

    reports
        .iter()
        .map(|report| {
            let base = sanitize(match mode {
                NamingMode::RosterNumber => &report.file_name_by_roster_number,
                NamingMode::StudentName => &report.file_name_by_student_name,
            });

            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;
            if *count == 1 {
                return base;
            }
            match base.strip_suffix(".pdf") {
                Some(stem) => format!("{stem}_{count}.pdf"),
                None => format!("{base}_{count}"),
            }
        })
        .collect()
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            _ => c,
        })
        .collect()
}

/// Pack every report's page into one deflate-compressed ZIP archive.
pub fn write_zip(reports: &[Report], mode: NamingMode) -> Result<Vec<u8>, KarneError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (report, name) in reports.iter().zip(archive_names(reports, mode)) {
        zip.start_file(name.as_str(), options)
            .map_err(|e| KarneError::Archive(format!("{name}: {e}")))?;
        zip.write_all(&report.page_content)?;
    }

    let cursor = zip
        .finish()
        .map_err(|e| KarneError::Archive(e.to_string()))?;

    info!("packed {} pages into zip ({mode} naming)", reports.len());
    Ok(cursor.into_inner())
}

/// Write every report's page as its own file under `dir`.
pub fn write_directory(
    reports: &[Report],
    mode: NamingMode,
    dir: &Path,
) -> Result<Vec<PathBuf>, KarneError> {
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(reports.len());
    for (report, name) in reports.iter().zip(archive_names(reports, mode)) {
        let path = dir.join(name);
        std::fs::write(&path, &report.page_content)?;
        written.push(path);
    }

    info!("wrote {} pages to {}", written.len(), dir.display());
    Ok(written)
}
