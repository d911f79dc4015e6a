use crate::error::KarneError;
use crate::matching::outcome::{ParseOutcome, Report};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Opaque key for one caller's parse results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse results held per session.
///
/// A session's outcome is only ever written whole, after a pass has
/// finished, so an abandoned pass cannot leave a half-built result behind.
#[derive(Debug, Default)]
pub struct ResultStore {
    sessions: Mutex<HashMap<SessionId, ParseOutcome>>,
}

impl ResultStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, ParseOutcome>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Store `outcome` for `session`, returning whatever it replaced.
    pub fn replace(&self, session: SessionId, outcome: ParseOutcome) -> Option<ParseOutcome> {
        debug!(
            "session {session}: storing {} reports",
            outcome.reports.len()
        );
        self.lock().insert(session, outcome)
    }

    /// Snapshot of a session's outcome.
    pub fn get(&self, session: SessionId) -> Result<ParseOutcome, KarneError> {
        self.lock()
            .get(&session)
            .cloned()
            .ok_or_else(|| KarneError::SessionNotFound(session.to_string()))
    }

    pub fn report(&self, session: SessionId, report_id: Uuid) -> Result<Report, KarneError> {
        let sessions = self.lock();
        let outcome = sessions
            .get(&session)
            .ok_or_else(|| KarneError::SessionNotFound(session.to_string()))?;
        outcome
            .report(report_id)
            .cloned()
            .ok_or_else(|| KarneError::ReportNotFound(report_id.to_string()))
    }

    /// Remove one report. Totals such as `total_pages` are left unchanged.
    pub fn delete_report(&self, session: SessionId, report_id: Uuid) -> Result<(), KarneError> {
        let mut sessions = self.lock();
        let outcome = sessions
            .get_mut(&session)
            .ok_or_else(|| KarneError::SessionNotFound(session.to_string()))?;
        let before = outcome.reports.len();
        outcome.reports.retain(|r| r.id != report_id);
        if outcome.reports.len() == before {
            return Err(KarneError::ReportNotFound(report_id.to_string()));
        }
        Ok(())
    }

    /// Drop a session entirely. Returns false if it did not exist.
    pub fn evict(&self, session: SessionId) -> bool {
        self.lock().remove(&session).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(name: &str, page: usize) -> Report {
        Report {
            id: Uuid::new_v4(),
            student_name: name.into(),
            excerpt: name.into(),
            file_name_by_roster_number: format!("{page}.pdf"),
            file_name_by_student_name: format!("{name}.pdf"),
            page_content: vec![page as u8],
            page_number: page,
        }
    }

    fn outcome(reports: Vec<Report>) -> ParseOutcome {
        ParseOutcome {
            reports,
            missing_students: vec![],
            has_duplicates: false,
            total_pages: 5,
        }
    }

    #[test]
    fn new_parse_replaces_previous() {
        let store = ResultStore::new();
        let session = SessionId::new();
        store.replace(session, outcome(vec![report("Ali Veli", 1)]));
        let previous = store.replace(session, outcome(vec![]));
        assert_eq!(previous.unwrap().reports.len(), 1);
        assert!(store.get(session).unwrap().reports.is_empty());
    }

    #[test]
    fn sessions_are_isolated() {
        let store = ResultStore::new();
        let a = SessionId::new();
        let b = SessionId::new();
        let r = report("Ali Veli", 1);
        let id = r.id;
        store.replace(a, outcome(vec![r]));
        store.replace(b, outcome(vec![]));

        assert!(store.report(a, id).is_ok());
        assert!(matches!(
            store.report(b, id),
            Err(KarneError::ReportNotFound(_))
        ));
    }

    #[test]
    fn delete_report_keeps_totals() {
        let store = ResultStore::new();
        let session = SessionId::new();
        let first = report("Ali Veli", 1);
        let id = first.id;
        store.replace(session, outcome(vec![first, report("Can Öz", 2)]));

        store.delete_report(session, id).unwrap();
        let current = store.get(session).unwrap();
        assert_eq!(current.reports.len(), 1);
        assert_eq!(current.reports[0].student_name, "Can Öz");
        assert_eq!(current.total_pages, 5);

        assert!(matches!(
            store.delete_report(session, id),
            Err(KarneError::ReportNotFound(_))
        ));
    }

    #[test]
    fn evict_removes_session() {
        let store = ResultStore::new();
        let session = SessionId::new();
        store.replace(session, outcome(vec![]));
        assert!(store.evict(session));
        assert!(!store.evict(session));
        assert!(matches!(
            store.get(session),
            Err(KarneError::SessionNotFound(_))
        ));
        assert!(store.is_empty());
    }
}
