use serde::{Deserialize, Serialize};
use std::fmt;

/// One student as the matcher sees them: the full name used as the roster key
/// and the roster number used for file naming.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub full_name: String,
    pub roster_number: String,
}

/// Ordered mapping of full name -> roster number.
///
/// Iteration order is insertion order; the matcher's tie-break depends on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    records: Vec<RosterRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a student. An existing entry with the same full name is
    /// replaced in place, keeping its position.
    pub fn insert(&mut self, full_name: impl Into<String>, roster_number: impl Into<String>) {
        let record = RosterRecord {
            full_name: full_name.into(),
            roster_number: roster_number.into(),
        };
        match self
            .records
            .iter_mut()
            .find(|r| r.full_name == record.full_name)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RosterRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<N, R> FromIterator<(N, R)> for Roster
where
    N: Into<String>,
    R: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        let mut roster = Roster::new();
        for (name, number) in iter {
            roster.insert(name, number);
        }
        roster
    }
}

/// Which of the two generated file names to use when writing pages out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingMode {
    #[default]
    RosterNumber,
    StudentName,
}

impl NamingMode {
    pub fn from_str_loose(s: &str) -> Option<NamingMode> {
        let lower = s.trim().to_lowercase();
        match lower.as_str() {
            "number" | "roster" | "roster_number" | "schoolno" | "no" => {
                Some(NamingMode::RosterNumber)
            }
            "name" | "student" | "student_name" => Some(NamingMode::StudentName),
            _ => None,
        }
    }
}

impl fmt::Display for NamingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingMode::RosterNumber => write!(f, "number"),
            NamingMode::StudentName => write!(f, "name"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_keeps_insertion_order() {
        let roster: Roster = [("Zeynep Kaya", "3"), ("Ali Veli", "1"), ("Can Öz", "2")]
            .into_iter()
            .collect();
        let names: Vec<&str> = roster.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, vec!["Zeynep Kaya", "Ali Veli", "Can Öz"]);
    }

    #[test]
    fn roster_insert_replaces_in_place() {
        let mut roster = Roster::new();
        roster.insert("Ali Veli", "1");
        roster.insert("Can Öz", "2");
        roster.insert("Ali Veli", "9");
        assert_eq!(roster.len(), 2);
        let first = roster.iter().next().unwrap();
        assert_eq!(first.full_name, "Ali Veli");
        assert_eq!(first.roster_number, "9");
    }

    #[test]
    fn naming_mode_from_str_loose() {
        assert_eq!(
            NamingMode::from_str_loose("number"),
            Some(NamingMode::RosterNumber)
        );
        assert_eq!(
            NamingMode::from_str_loose("schoolNo"),
            Some(NamingMode::RosterNumber)
        );
        assert_eq!(
            NamingMode::from_str_loose(" Name "),
            Some(NamingMode::StudentName)
        );
        assert_eq!(NamingMode::from_str_loose("page"), None);
    }
}
