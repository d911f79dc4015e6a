use karne_core::error::KarneError;
use karne_core::matching::ParseOutcome;
use karne_core::roster::schema::StudentRecord;

pub fn print_outcome(outcome: &ParseOutcome) -> Result<(), KarneError> {
    let json = serde_json::to_string_pretty(outcome)?;
    println!("{json}");
    Ok(())
}

pub fn print_students(students: &[StudentRecord]) -> Result<(), KarneError> {
    let json = serde_json::to_string_pretty(students)?;
    println!("{json}");
    Ok(())
}
