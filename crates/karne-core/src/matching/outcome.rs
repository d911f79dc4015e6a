use crate::matching::pattern::{PatternTable, RosterEntry};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Matching result for a single page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMatchResult {
    /// 0-based page index.
    pub page_index: usize,
    /// The student whose pattern matched first, if any.
    pub matched_entry: Option<RosterEntry>,
    /// Text shown to a reviewer as evidence of the match.
    pub excerpt: Option<String>,
}

/// One matched page, cut out as its own document.
///
/// Serializes as a summary only; the page bytes are never written out.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub id: Uuid,
    pub student_name: String,
    pub excerpt: String,
    /// `"{roster_number}.pdf"`, or `"{roster_number}_{n}.pdf"` for the n-th repeat.
    pub file_name_by_roster_number: String,
    /// `"{student_name}.pdf"`, or `"{student_name}_{n}.pdf"` for the n-th repeat.
    pub file_name_by_student_name: String,
    /// Serialized single-page PDF. Not part of the JSON summary.
    #[serde(skip)]
    pub page_content: Vec<u8>,
    /// 1-based page number in the source document.
    pub page_number: usize,
}

/// Result of one full matching pass over a document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    /// Reports in page order.
    pub reports: Vec<Report>,
    /// Qualifying students not found on any page, in roster order.
    pub missing_students: Vec<String>,
    /// True if any roster number produced more than one report.
    pub has_duplicates: bool,
    /// Page count of the source document.
    pub total_pages: usize,
}

impl ParseOutcome {
    pub fn found_count(&self) -> usize {
        self.reports.len()
    }

    pub fn missing_count(&self) -> usize {
        self.missing_students.len()
    }

    pub fn report(&self, id: Uuid) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }
}

/// File names for the `occurrence`-th (1-based) report of a roster number.
pub fn file_names(roster_number: &str, student_name: &str, occurrence: usize) -> (String, String) {
    if occurrence > 1 {
        let suffix = occurrence - 1;
        (
            format!("{roster_number}_{suffix}.pdf"),
            format!("{student_name}_{suffix}.pdf"),
        )
    } else {
        (format!("{roster_number}.pdf"), format!("{student_name}.pdf"))
    }
}

/// Accumulates reports during a pass: occurrence counts per roster number
/// and the set of students found so far.
pub(crate) struct OutcomeBuilder<'t> {
    table: &'t PatternTable,
    total_pages: usize,
    reports: Vec<Report>,
    occurrences: HashMap<String, usize>,
    found: HashSet<String>,
    has_duplicates: bool,
}

impl<'t> OutcomeBuilder<'t> {
    pub(crate) fn new(table: &'t PatternTable, total_pages: usize) -> Self {
        OutcomeBuilder {
            table,
            total_pages,
            reports: Vec::new(),
            occurrences: HashMap::new(),
            found: HashSet::new(),
            has_duplicates: false,
        }
    }

    pub(crate) fn record(
        &mut self,
        page_index: usize,
        entry: &RosterEntry,
        excerpt: String,
        page_content: Vec<u8>,
    ) {
        let count = self
            .occurrences
            .entry(entry.roster_number.clone())
            .or_insert(0);
        *count += 1;
        let occurrence = *count;

        if occurrence > 1 {
            if !self.has_duplicates {
                warn!(
                    "roster number {} matched more than once (page {})",
                    entry.roster_number,
                    page_index + 1
                );
            }
            self.has_duplicates = true;
        }

        let (by_number, by_name) = file_names(&entry.roster_number, &entry.full_name, occurrence);

        self.reports.push(Report {
            id: Uuid::new_v4(),
            student_name: entry.full_name.clone(),
            excerpt,
            file_name_by_roster_number: by_number,
            file_name_by_student_name: by_name,
            page_content,
            page_number: page_index + 1,
        });
        self.found.insert(entry.full_name.clone());
    }

    pub(crate) fn finish(self) -> ParseOutcome {
        let missing_students = self
            .table
            .full_names()
            .filter(|name| !self.found.contains(*name))
            .map(|name| name.to_string())
            .collect();

        ParseOutcome {
            reports: self.reports,
            missing_students,
            has_duplicates: self.has_duplicates,
            total_pages: self.total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::pattern::build_patterns;
    use crate::model::Roster;

    #[test]
    fn first_occurrence_has_plain_names() {
        let (by_number, by_name) = file_names("5", "Ali Veli", 1);
        assert_eq!(by_number, "5.pdf");
        assert_eq!(by_name, "Ali Veli.pdf");
    }

    #[test]
    fn repeats_get_zero_based_suffix() {
        assert_eq!(file_names("5", "Ali Veli", 2).0, "5_1.pdf");
        assert_eq!(file_names("5", "Ali Veli", 3).1, "Ali Veli_2.pdf");
    }

    #[test]
    fn builder_tracks_duplicates_and_missing() {
        let roster: Roster = [("Ali Veli", "5"), ("Can Öz", "6")].into_iter().collect();
        let table = build_patterns(&roster);
        let ali = table.get("Ali Veli").unwrap().entry.clone();

        let mut builder = OutcomeBuilder::new(&table, 4);
        builder.record(0, &ali, "Ali Veli".into(), vec![1]);
        builder.record(2, &ali, "Ali Veli".into(), vec![2]);
        let outcome = builder.finish();

        assert_eq!(outcome.total_pages, 4);
        assert!(outcome.has_duplicates);
        assert_eq!(outcome.missing_students, vec!["Can Öz"]);
        assert_eq!(outcome.reports[0].file_name_by_roster_number, "5.pdf");
        assert_eq!(outcome.reports[1].file_name_by_roster_number, "5_1.pdf");
        assert_eq!(outcome.reports[1].page_number, 3);
        assert_ne!(outcome.reports[0].id, outcome.reports[1].id);
    }

    #[test]
    fn summary_json_omits_page_bytes() {
        let outcome = ParseOutcome {
            reports: vec![Report {
                id: Uuid::new_v4(),
                student_name: "Ali Veli".into(),
                excerpt: "Ali Veli".into(),
                file_name_by_roster_number: "5.pdf".into(),
                file_name_by_student_name: "Ali Veli.pdf".into(),
                page_content: vec![0x25, 0x50, 0x44, 0x46],
                page_number: 1,
            }],
            missing_students: vec![],
            has_duplicates: false,
            total_pages: 1,
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert!(json["reports"][0].get("page_content").is_none());
        assert_eq!(json["reports"][0]["page_number"], 1);

        let mut keys: Vec<&str> = json["reports"][0]
            .as_object()
            .unwrap()
            .keys()
            .map(|k| k.as_str())
            .collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "excerpt",
                "file_name_by_roster_number",
                "file_name_by_student_name",
                "id",
                "page_number",
                "student_name",
            ]
        );
    }
}
