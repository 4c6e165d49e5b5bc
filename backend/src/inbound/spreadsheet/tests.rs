//! Workbook-level coverage for the spreadsheet codec.

use calamine::{Reader, Xlsx};
use rstest::rstest;
use rust_xlsxwriter::Workbook;

use super::*;
use crate::domain::{Contact, ContactDetails, ContactId};
use crate::test_support::fixture_timestamp;

fn workbook_with_rows(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (row, cells) in (0_u32..).zip(rows) {
        for (col, value) in (0_u16..).zip(cells.iter()) {
            worksheet.write_string(row, col, *value).expect("write cell");
        }
    }
    workbook.save_to_buffer().expect("encode workbook")
}

fn stored(id: u64, details: ContactDetails) -> Contact {
    let id = ContactId::new(id).expect("non-zero id");
    Contact::new(id, details, fixture_timestamp(), fixture_timestamp())
}

#[rstest]
fn import_maps_columns_and_skips_short_rows() {
    let bytes = workbook_with_rows(&[
        &["key", "name", "email", "phone"],
        &["100", " Ana Pérez ", "ana@gmail.com", "(961) 123-4567"],
        &["101", "Beto"],
        &["102", "Carla", "carla@yahoo.com", "962 555 0000", "ignored"],
    ]);

    let sheet = read_contacts(&bytes, 50).expect("decodes");

    assert_eq!(
        sheet.contacts,
        vec![
            ContactDetails::new("100", "Ana Pérez", "ana@gmail.com", "9611234567"),
            ContactDetails::new("102", "Carla", "carla@yahoo.com", "9625550000"),
        ]
    );
    assert_eq!(sheet.skipped_rows, 1);
}

#[rstest]
fn import_stops_at_the_row_limit() {
    let data: Vec<[String; 4]> = (0..5)
        .map(|n| {
            [
                n.to_string(),
                format!("Name {n}"),
                "x@gmail.com".to_owned(),
                "9611234567".to_owned(),
            ]
        })
        .collect();
    let mut rows: Vec<Vec<&str>> = vec![vec!["h1", "h2", "h3", "h4"]];
    rows.extend(data.iter().map(|row| row.iter().map(String::as_str).collect()));
    let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
    let bytes = workbook_with_rows(&rows);

    let sheet = read_contacts(&bytes, 3).expect("decodes");

    let keys: Vec<_> = sheet.contacts.iter().map(|c| c.client_key.as_str()).collect();
    assert_eq!(keys, vec!["0", "1", "2"]);
}

#[rstest]
#[case(&[&["key", "name", "email", "phone"][..]])]
#[case(&[])]
fn header_only_workbooks_are_rejected(#[case] rows: &[&[&str]]) {
    let bytes = workbook_with_rows(rows);
    assert_eq!(read_contacts(&bytes, 50), Err(SpreadsheetError::NoDataRows));
}

#[rstest]
fn non_workbook_bytes_are_unreadable() {
    let result = read_contacts(b"client_key,name\n1,Ana\n", 50);
    assert!(matches!(result, Err(SpreadsheetError::Unreadable { .. })));
}

#[rstest]
fn export_writes_headers_and_rows_to_sheet1() {
    let contacts = vec![
        stored(1, ContactDetails::new("100", "Ana Pérez", "ana@gmail.com", "9611234567")),
        stored(2, ContactDetails::new("101", "Beto", "beto@live.com", "9941234567")),
    ];

    let bytes = write_contacts(&contacts).expect("encodes");

    let mut workbook = Xlsx::new(std::io::Cursor::new(bytes.as_slice())).expect("opens");
    assert_eq!(workbook.sheet_names(), vec![EXPORT_SHEET_NAME.to_owned()]);
    let range = workbook
        .worksheet_range(EXPORT_SHEET_NAME)
        .expect("sheet exists");
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();
    assert_eq!(
        rows[0],
        vec!["Clave cliente", "   Nombre Contacto ", "Correo ", "Teléfono Contacto  "]
    );
    assert_eq!(rows[1], vec!["100", "Ana Pérez", "ana@gmail.com", "9611234567"]);
    assert_eq!(rows.len(), 3);

    let reimported = read_contacts(&bytes, 50).expect("decodes");
    let originals: Vec<_> = contacts.iter().map(|c| c.details().clone()).collect();
    assert_eq!(reimported.contacts, originals);
}
