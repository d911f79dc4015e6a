pub mod import;
pub mod schema;

use crate::error::KarneError;
use crate::model::Roster;
use log::{debug, info};
use schema::{RosterData, StudentRecord};
use std::path::{Path, PathBuf};

/// JSON-file backed store of classes and their students.
///
/// Every mutation is written through to disk immediately.
#[derive(Debug)]
pub struct RosterStore {
    path: PathBuf,
    data: RosterData,
}

impl RosterStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, KarneError> {
        let path = path.into();
        let data = load_data(&path)?;
        debug!(
            "opened roster store {} ({} classes)",
            path.display(),
            data.classes.len()
        );
        Ok(RosterStore { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Class names, sorted.
    pub fn classes(&self) -> Vec<&str> {
        self.data.classes.keys().map(|k| k.as_str()).collect()
    }

    pub fn students(&self, class: &str) -> Result<&[StudentRecord], KarneError> {
        self.data
            .classes
            .get(class)
            .map(|s| s.as_slice())
            .ok_or_else(|| KarneError::ClassNotFound {
                class: class.to_string(),
            })
    }

    pub fn add_class(&mut self, class: &str) -> Result<(), KarneError> {
        let class = class.trim();
        if class.is_empty() {
            return Err(KarneError::InvalidInput("class name is required".into()));
        }
        if self.data.classes.contains_key(class) {
            return Err(KarneError::ClassExists {
                class: class.to_string(),
            });
        }
        self.data.classes.insert(class.to_string(), Vec::new());
        self.save()
    }

    pub fn remove_class(&mut self, class: &str) -> Result<(), KarneError> {
        if self.data.classes.remove(class).is_none() {
            return Err(KarneError::ClassNotFound {
                class: class.to_string(),
            });
        }
        self.save()
    }

    /// Insert or replace a student (keyed by name). Creates the class if it
    /// does not exist yet.
    pub fn save_student(&mut self, class: &str, record: StudentRecord) -> Result<(), KarneError> {
        validate_student(&record)?;
        let students = self.data.classes.entry(class.to_string()).or_default();
        upsert(students, record);
        self.save()
    }

    /// Replace the student stored as `old_name`. A rename keeps the student's
    /// position in the class.
    pub fn update_student(
        &mut self,
        class: &str,
        old_name: &str,
        record: StudentRecord,
    ) -> Result<(), KarneError> {
        validate_student(&record)?;
        let students = self
            .data
            .classes
            .get_mut(class)
            .ok_or_else(|| KarneError::ClassNotFound {
                class: class.to_string(),
            })?;
        let idx = students
            .iter()
            .position(|s| s.name == old_name)
            .ok_or_else(|| KarneError::StudentNotFound {
                class: class.to_string(),
                student: old_name.to_string(),
            })?;

        let new_name = record.name.clone();
        students[idx] = record;

        // Renaming onto another existing student replaces that one
        let mut i = 0;
        students.retain(|s| {
            let keep = i == idx || s.name != new_name;
            i += 1;
            keep
        });

        self.save()
    }

    pub fn remove_student(&mut self, class: &str, name: &str) -> Result<(), KarneError> {
        let students = self
            .data
            .classes
            .get_mut(class)
            .ok_or_else(|| KarneError::ClassNotFound {
                class: class.to_string(),
            })?;
        let before = students.len();
        students.retain(|s| s.name != name);
        if students.len() == before {
            return Err(KarneError::StudentNotFound {
                class: class.to_string(),
                student: name.to_string(),
            });
        }
        self.save()
    }

    /// Merge imported students into a class (upsert by name). Returns the
    /// number of students written.
    pub fn merge_students(
        &mut self,
        class: &str,
        records: Vec<StudentRecord>,
    ) -> Result<usize, KarneError> {
        let students = self.data.classes.entry(class.to_string()).or_default();
        let count = records.len();
        for record in records {
            upsert(students, record);
        }
        self.save()?;
        info!("merged {count} students into class '{class}'");
        Ok(count)
    }

    /// The class as an ordered name -> roster number mapping, ready for
    /// pattern building.
    pub fn roster(&self, class: &str) -> Result<Roster, KarneError> {
        Ok(self
            .students(class)?
            .iter()
            .map(|s| (s.name.clone(), s.roster_number.clone()))
            .collect())
    }

    fn save(&self) -> Result<(), KarneError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

fn load_data(path: &Path) -> Result<RosterData, KarneError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(RosterData::default()),
        Err(e) => {
            return Err(KarneError::StoreLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    };
    parse_data(&content, path)
}

/// Parse store contents. An empty file is an empty store.
pub fn parse_data(json: &str, source: &Path) -> Result<RosterData, KarneError> {
    if json.trim().is_empty() {
        return Ok(RosterData::default());
    }
    serde_json::from_str(json).map_err(|e| KarneError::StoreLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })
}

fn validate_student(record: &StudentRecord) -> Result<(), KarneError> {
    if record.name.trim().is_empty() {
        return Err(KarneError::InvalidInput("student name is required".into()));
    }
    Ok(())
}

fn upsert(students: &mut Vec<StudentRecord>, record: StudentRecord) {
    match students.iter_mut().find(|s| s.name == record.name) {
        Some(existing) => *existing = record,
        None => students.push(record),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(name: &str, number: &str) -> StudentRecord {
        StudentRecord {
            name: name.into(),
            roster_number: number.into(),
            ..Default::default()
        }
    }

    fn temp_store() -> (tempfile::TempDir, RosterStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = RosterStore::open(dir.path().join("data").join("students.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn missing_file_opens_empty() {
        let (_dir, store) = temp_store();
        assert!(store.classes().is_empty());
    }

    #[test]
    fn changes_persist_across_reopen() {
        let (_dir, mut store) = temp_store();
        store.add_class("9-A").unwrap();
        store.save_student("9-A", student("Zeynep Kaya", "3")).unwrap();
        store.save_student("9-A", student("Ali Veli", "1")).unwrap();

        let reopened = RosterStore::open(store.path().to_path_buf()).unwrap();
        let names: Vec<&str> = reopened
            .students("9-A")
            .unwrap()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Zeynep Kaya", "Ali Veli"]);
    }

    #[test]
    fn add_existing_class_fails() {
        let (_dir, mut store) = temp_store();
        store.add_class("9-A").unwrap();
        assert!(matches!(
            store.add_class("9-A"),
            Err(KarneError::ClassExists { .. })
        ));
        assert!(matches!(
            store.add_class("  "),
            Err(KarneError::InvalidInput(_))
        ));
    }

    #[test]
    fn save_student_upserts_by_name() {
        let (_dir, mut store) = temp_store();
        store.save_student("9-A", student("Ali Veli", "1")).unwrap();
        store.save_student("9-A", student("Ali Veli", "7")).unwrap();
        let students = store.students("9-A").unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].roster_number, "7");
    }

    #[test]
    fn rename_keeps_position() {
        let (_dir, mut store) = temp_store();
        store.save_student("9-A", student("Ali Veli", "1")).unwrap();
        store.save_student("9-A", student("Can Öz", "2")).unwrap();
        store
            .update_student("9-A", "Ali Veli", student("Ali Rıza Veli", "1"))
            .unwrap();

        let names: Vec<&str> = store
            .students("9-A")
            .unwrap()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ali Rıza Veli", "Can Öz"]);
    }

    #[test]
    fn rename_onto_existing_student_replaces_it() {
        let (_dir, mut store) = temp_store();
        store.save_student("9-A", student("Ali Veli", "1")).unwrap();
        store.save_student("9-A", student("Can Öz", "2")).unwrap();
        store
            .update_student("9-A", "Can Öz", student("Ali Veli", "9"))
            .unwrap();

        let students = store.students("9-A").unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].roster_number, "9");
    }

    #[test]
    fn remove_unknown_student_fails() {
        let (_dir, mut store) = temp_store();
        store.add_class("9-A").unwrap();
        assert!(matches!(
            store.remove_student("9-A", "Nobody Here"),
            Err(KarneError::StudentNotFound { .. })
        ));
        assert!(matches!(
            store.remove_student("9-B", "Nobody Here"),
            Err(KarneError::ClassNotFound { .. })
        ));
    }

    #[test]
    fn roster_view_preserves_order() {
        let (_dir, mut store) = temp_store();
        store.save_student("9-A", student("Zeynep Kaya", "3")).unwrap();
        store.save_student("9-A", student("Deniz", "4")).unwrap();
        let roster = store.roster("9-A").unwrap();
        let numbers: Vec<&str> = roster.iter().map(|r| r.roster_number.as_str()).collect();
        assert_eq!(numbers, vec!["3", "4"]);
    }

    #[test]
    fn corrupt_file_is_store_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            RosterStore::open(path),
            Err(KarneError::StoreLoad { .. })
        ));
    }
}
