//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::{App, web};
use rust_xlsxwriter::Workbook;

use crate::domain::{Contact, ContactDetails, ContactService, NewContact};
use crate::inbound::http::configure_contacts;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryContactRepository;

/// Multipart boundary used by [`multipart_body`].
pub const BOUNDARY: &str = "contacts-test-boundary";

/// HTTP state backed by a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let service = Arc::new(ContactService::new(Arc::new(
        InMemoryContactRepository::new(),
    )));
    HttpState::new(service.clone(), service)
}

/// Application exposing the contact routes under `/api/v1`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .service(web::scope("/api/v1").configure(configure_contacts))
}

/// Store `rows` through the command port, in order.
pub async fn seed(state: &HttpState, rows: &[[&str; 4]]) -> Vec<Contact> {
    let batch = rows
        .iter()
        .map(|[client_key, name, email, phone]| {
            NewContact::from(ContactDetails::new(*client_key, *name, *email, *phone))
        })
        .collect();
    state
        .contacts_command
        .save_batch(batch)
        .await
        .expect("seed contacts")
}

/// An `.xlsx` workbook with a header row followed by `rows`.
pub fn workbook_bytes(rows: &[&[&str]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = ["Clave cliente", "Nombre Contacto", "Correo", "Teléfono Contacto"];
    for (col, title) in header.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *title)
            .expect("write header");
    }
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            sheet
                .write_string(row as u32 + 1, col as u16, *cell)
                .expect("write cell");
        }
    }
    workbook.save_to_buffer().expect("serialise workbook")
}

/// A `multipart/form-data` body carrying `bytes` under `field`.
///
/// Returns the `Content-Type` header value and the encoded body.
pub fn multipart_body(field: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{field}\"; filename=\"contacts.xlsx\"\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}
