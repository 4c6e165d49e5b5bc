//! Spreadsheet codec for bulk contact import and export.
//!
//! Both directions use a fixed four-column layout: client key, name, email,
//! phone. The first row is always a header. The codec works on in-memory
//! byte buffers and never touches the store.

mod reader;
mod writer;

pub use reader::{ImportedSheet, read_contacts};
pub use writer::{EXPORT_HEADERS, EXPORT_SHEET_NAME, write_contacts};

use thiserror::Error;

/// MIME type of `.xlsx` workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Errors raised while decoding or encoding a workbook.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpreadsheetError {
    /// The bytes are not a readable `.xlsx` workbook.
    #[error("could not open the workbook: {message}")]
    Unreadable {
        /// Underlying parser message.
        message: String,
    },
    /// The workbook has no worksheets.
    #[error("the workbook contains no worksheets")]
    NoWorksheet,
    /// The first worksheet has no rows after the header.
    #[error("the worksheet must contain at least one row besides the header")]
    NoDataRows,
    /// Encoding the export failed.
    #[error("could not generate the workbook: {message}")]
    Write {
        /// Underlying writer message.
        message: String,
    },
}

#[cfg(test)]
mod tests;
