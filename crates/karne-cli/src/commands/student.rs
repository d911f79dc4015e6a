use karne_core::error::KarneError;
use karne_core::roster::schema::{Guardian, StudentRecord};
use karne_core::roster::RosterStore;
use std::path::Path;

use crate::output;
use crate::StudentArgs;

pub fn list(data: &Path, class: &str, output_format: &str) -> Result<(), KarneError> {
    let store = RosterStore::open(data)?;
    let students = store.students(class)?;

    match output_format {
        "json" => output::json::print_students(students)?,
        _ => output::table::print_students(class, students),
    }
    Ok(())
}

pub fn add(data: &Path, class: &str, args: StudentArgs) -> Result<(), KarneError> {
    let mut store = RosterStore::open(data)?;
    let record = to_record(args);
    let name = record.name.clone();
    store.save_student(class, record)?;
    eprintln!("Saved '{name}' in class '{class}'");
    Ok(())
}

pub fn update(
    data: &Path,
    class: &str,
    old_name: &str,
    args: StudentArgs,
) -> Result<(), KarneError> {
    let mut store = RosterStore::open(data)?;
    let record = to_record(args);
    let name = record.name.clone();
    store.update_student(class, old_name, record)?;
    if name == old_name {
        eprintln!("Updated '{name}' in class '{class}'");
    } else {
        eprintln!("Updated '{old_name}' -> '{name}' in class '{class}'");
    }
    Ok(())
}

pub fn remove(data: &Path, class: &str, name: &str) -> Result<(), KarneError> {
    let mut store = RosterStore::open(data)?;
    store.remove_student(class, name)?;
    eprintln!("Removed '{name}' from class '{class}'");
    Ok(())
}

fn to_record(args: StudentArgs) -> StudentRecord {
    StudentRecord {
        name: args.name.trim().to_string(),
        roster_number: args.roster_number.trim().to_string(),
        mother: guardian(args.mother_name, args.mother_email, args.mother_phone),
        father: guardian(args.father_name, args.father_email, args.father_phone),
    }
}

fn guardian(
    name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
) -> Option<Guardian> {
    let g = Guardian {
        name: name.unwrap_or_default(),
        email: email.unwrap_or_default(),
        phone: phone.unwrap_or_default(),
    };
    (!g.is_empty()).then_some(g)
}
