use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum KarneError {
    #[error("failed to load PDF: {0}")]
    Load(String),

    #[error("failed to extract page {page}: {reason}")]
    Extraction { page: usize, reason: String },

    #[error("no valid students found in roster. Students need a roster number and at least 2 name parts.")]
    NoQualifyingStudents,

    #[error("class '{class}' not found")]
    ClassNotFound { class: String },

    #[error("class '{class}' already exists")]
    ClassExists { class: String },

    #[error("student '{student}' not found in class '{class}'")]
    StudentNotFound { class: String, student: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load roster store from {path}: {reason}")]
    StoreLoad { path: PathBuf, reason: String },

    #[error("failed to import students: {0}")]
    Import(String),

    #[error("no parse results available for session {0}")]
    SessionNotFound(String),

    #[error("report '{0}' not found")]
    ReportNotFound(String),

    #[error("failed to write archive: {0}")]
    Archive(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
