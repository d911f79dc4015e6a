use karne_core::error::KarneError;
use karne_core::roster::RosterStore;
use std::path::Path;

pub fn list(data: &Path) -> Result<(), KarneError> {
    let store = RosterStore::open(data)?;
    let classes = store.classes();

    if classes.is_empty() {
        println!("No classes in {}", store.path().display());
        return Ok(());
    }

    let width = classes.iter().map(|c| c.chars().count()).max().unwrap_or(5);
    for class in classes {
        let count = store.students(class)?.len();
        println!("  {:<width$}  {} student(s)", class, count, width = width);
    }
    Ok(())
}

pub fn add(data: &Path, name: &str) -> Result<(), KarneError> {
    let mut store = RosterStore::open(data)?;
    store.add_class(name)?;
    eprintln!("Created class '{}'", name.trim());
    Ok(())
}

pub fn remove(data: &Path, name: &str) -> Result<(), KarneError> {
    let mut store = RosterStore::open(data)?;
    store.remove_class(name)?;
    eprintln!("Removed class '{name}'");
    Ok(())
}
