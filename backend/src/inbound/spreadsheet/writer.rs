//! `.xlsx` export using `rust_xlsxwriter`.

use rust_xlsxwriter::{Format, Workbook, XlsxError};

use super::SpreadsheetError;
use crate::domain::{Contact, ContactField};

/// Worksheet name used for exports.
pub const EXPORT_SHEET_NAME: &str = "Sheet1";

/// Header labels of the import template, padding included, in column order.
pub const EXPORT_HEADERS: [&str; 4] = [
    "Clave cliente",
    "   Nombre Contacto ",
    "Correo ",
    "Teléfono Contacto  ",
];

const COLUMN_WIDTHS: [f64; 4] = [15.0, 35.0, 40.0, 18.0];

/// Render `contacts` as an `.xlsx` workbook held in memory.
///
/// # Errors
/// Returns [`SpreadsheetError::Write`] when the workbook cannot be encoded.
pub fn write_contacts(contacts: &[Contact]) -> Result<Vec<u8>, SpreadsheetError> {
    build_workbook(contacts).map_err(|err| SpreadsheetError::Write {
        message: err.to_string(),
    })
}

fn build_workbook(contacts: &[Contact]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(EXPORT_SHEET_NAME)?;

    for ((col, header), width) in (0_u16..).zip(EXPORT_HEADERS).zip(COLUMN_WIDTHS) {
        worksheet.write_string_with_format(0, col, header, &header_format)?;
        worksheet.set_column_width(col, width)?;
    }

    for (row, contact) in (1_u32..).zip(contacts) {
        for (col, field) in (0_u16..).zip(ContactField::ALL) {
            worksheet.write_string(row, col, contact.details().field(field))?;
        }
    }

    workbook.save_to_buffer()
}
