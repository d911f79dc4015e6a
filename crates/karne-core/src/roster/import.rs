use std::io::Cursor;

use calamine::{Data, Range, Reader};
use log::debug;

use crate::error::KarneError;
use crate::roster::schema::{Guardian, StudentRecord};

pub const COL_NAME: &str = "Ad Soyad";
pub const COL_ROSTER_NUMBER: &str = "Okul No";
pub const COL_MOTHER_NAME: &str = "Anne Adı Soyadı";
pub const COL_MOTHER_EMAIL: &str = "Anne E-posta";
pub const COL_MOTHER_PHONE: &str = "Anne Telefon";
pub const COL_FATHER_NAME: &str = "Baba Adı Soyadı";
pub const COL_FATHER_EMAIL: &str = "Baba E-posta";
pub const COL_FATHER_PHONE: &str = "Baba Telefon";

/// Result of reading a student spreadsheet.
#[derive(Debug, Clone, Default)]
pub struct ImportedStudents {
    pub students: Vec<StudentRecord>,
    /// Data rows dropped for lacking a name or roster number.
    pub skipped_rows: usize,
}

/// Read students from the first worksheet of an xlsx/xls/ods workbook.
///
/// The first row holds column headers; each following row is one student.
pub fn import_students(bytes: &[u8]) -> Result<ImportedStudents, KarneError> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = calamine::open_workbook_auto_from_rs(cursor)
        .map_err(|e| KarneError::Import(format!("failed to open workbook: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| KarneError::Import("workbook has no sheets".into()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| KarneError::Import(format!("sheet '{sheet_name}' unreadable: {e}")))?;

    students_from_range(&range)
}

/// Map a worksheet range (header row first) to student records.
pub fn students_from_range(range: &Range<Data>) -> Result<ImportedStudents, KarneError> {
    let mut rows = range.rows();

    let header: Vec<String> = match rows.next() {
        Some(cells) => cells
            .iter()
            .map(|c| cell_as_string(c).unwrap_or_default())
            .collect(),
        None => return Err(KarneError::Import("sheet is empty".into())),
    };

    let column = |name: &str| header.iter().position(|h| h == name);
    let name_col = column(COL_NAME)
        .ok_or_else(|| KarneError::Import(format!("missing '{COL_NAME}' column")))?;
    let number_col = column(COL_ROSTER_NUMBER)
        .ok_or_else(|| KarneError::Import(format!("missing '{COL_ROSTER_NUMBER}' column")))?;
    let mother_cols = [
        column(COL_MOTHER_NAME),
        column(COL_MOTHER_EMAIL),
        column(COL_MOTHER_PHONE),
    ];
    let father_cols = [
        column(COL_FATHER_NAME),
        column(COL_FATHER_EMAIL),
        column(COL_FATHER_PHONE),
    ];

    let mut imported = ImportedStudents::default();

    for (i, cells) in rows.enumerate() {
        let get = |col: Option<usize>| {
            col.and_then(|c| cells.get(c))
                .and_then(cell_as_string)
                .unwrap_or_default()
        };

        let name = get(Some(name_col));
        let roster_number = get(Some(number_col));

        if name.is_empty() && roster_number.is_empty() {
            continue; // blank row
        }
        if name.is_empty() || roster_number.is_empty() {
            debug!("row {}: missing name or roster number, skipped", i + 2);
            imported.skipped_rows += 1;
            continue;
        }

        let guardian = |cols: &[Option<usize>; 3]| {
            let g = Guardian {
                name: get(cols[0]),
                email: get(cols[1]),
                phone: get(cols[2]),
            };
            (!g.is_empty()).then_some(g)
        };

        imported.students.push(StudentRecord {
            name,
            roster_number,
            mother: guardian(&mother_cols),
            father: guardian(&father_cols),
        });
    }

    Ok(imported)
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        // 101.0 -> "101"
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", *f as i64)),
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}
