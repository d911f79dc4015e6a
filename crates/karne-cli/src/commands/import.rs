use karne_core::error::KarneError;
use karne_core::roster::import::import_students;
use karne_core::roster::RosterStore;
use std::path::Path;

pub fn run(data: &Path, class: &str, file: &Path) -> Result<(), KarneError> {
    let bytes = std::fs::read(file)?;
    let imported = import_students(&bytes)?;

    let mut store = RosterStore::open(data)?;
    let count = store.merge_students(class, imported.students)?;

    eprintln!(
        "Imported {count} student(s) from {} into class '{class}'",
        file.display()
    );
    if imported.skipped_rows > 0 {
        eprintln!(
            "  {} row(s) skipped (missing name or roster number)",
            imported.skipped_rows
        );
    }
    Ok(())
}
