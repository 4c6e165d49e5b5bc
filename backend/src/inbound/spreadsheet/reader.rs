//! `.xlsx` import using `calamine`.

use std::io::Cursor;

use calamine::{Data, Reader, Xlsx, XlsxError};

use super::SpreadsheetError;
use crate::domain::ContactDetails;

const COLUMNS: usize = 4;

/// Contacts decoded from an uploaded workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportedSheet {
    /// Decoded rows, in sheet order, capped at the import limit.
    pub contacts: Vec<ContactDetails>,
    /// Data rows ignored because they had fewer than four cells.
    pub skipped_rows: usize,
}

/// Decode up to `limit` contacts from the first worksheet of an `.xlsx`.
///
/// Row one is the header. Data rows are mapped positionally; rows with
/// fewer than four cells (after trailing blanks) are skipped and extra
/// columns ignored. Values are trimmed and the phone loses spaces, hyphens
/// and parentheses.
///
/// # Errors
/// [`SpreadsheetError::Unreadable`] for bytes that are not a workbook,
/// [`SpreadsheetError::NoWorksheet`] for an empty workbook and
/// [`SpreadsheetError::NoDataRows`] when only a header (or nothing) exists.
pub fn read_contacts(bytes: &[u8], limit: usize) -> Result<ImportedSheet, SpreadsheetError> {
    let mut workbook =
        Xlsx::new(Cursor::new(bytes)).map_err(|err: XlsxError| SpreadsheetError::Unreadable {
            message: err.to_string(),
        })?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(SpreadsheetError::NoWorksheet)?
        .map_err(|err: XlsxError| SpreadsheetError::Unreadable {
            message: err.to_string(),
        })?;

    // Ranges start at the first used cell; pad so columns stay positional.
    let (first_row, first_col) = range
        .start()
        .map_or((0, 0), |(row, col)| (row as usize, col as usize));
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|cells| {
            let mut row = vec![String::new(); first_col];
            row.extend(cells.iter().map(render_cell));
            trim_trailing_blanks(&mut row);
            row
        })
        .collect();

    // The header is the sheet's first row, even when it is blank.
    let total_rows = rows.len() + first_row;
    if total_rows < 2 {
        return Err(SpreadsheetError::NoDataRows);
    }
    let skip = usize::from(first_row == 0);

    let mut sheet = ImportedSheet::default();
    for row in rows.into_iter().skip(skip) {
        if sheet.contacts.len() >= limit {
            break;
        }
        match row_to_details(&row) {
            Some(details) => sheet.contacts.push(details),
            None => sheet.skipped_rows += 1,
        }
    }
    Ok(sheet)
}

fn render_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}

fn trim_trailing_blanks(row: &mut Vec<String>) {
    while row.last().is_some_and(|cell| cell.trim().is_empty()) {
        row.pop();
    }
}

fn row_to_details(row: &[String]) -> Option<ContactDetails> {
    let [client_key, name, email, phone] = row.get(..COLUMNS)? else {
        return None;
    };
    Some(ContactDetails::new(
        client_key.trim(),
        name.trim(),
        email.trim(),
        normalise_phone(phone),
    ))
}

fn normalise_phone(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}
