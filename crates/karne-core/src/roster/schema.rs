use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact details for a parent or guardian.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guardian {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl Guardian {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }
}

/// A student as persisted in the roster store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    /// Full name; the student's key within a class.
    pub name: String,
    /// School roster number, used to name the split files.
    #[serde(default)]
    pub roster_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mother: Option<Guardian>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father: Option<Guardian>,
}

/// On-disk layout: class name -> students in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RosterData {
    pub classes: BTreeMap<String, Vec<StudentRecord>>,
}
