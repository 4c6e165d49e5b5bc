//! Shared helper utilities for backend integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, so
//! the app assembly and request builders they share live here.

use std::sync::Arc;

use actix_web::http::header;
use actix_web::test::TestRequest;
use actix_web::{App, web};
use rust_xlsxwriter::Workbook;

use contacts_backend::Trace;
use contacts_backend::domain::ContactService;
use contacts_backend::inbound::http::configure_contacts;
use contacts_backend::inbound::http::health::{HealthState, live, ready};
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::outbound::memory::InMemoryContactRepository;

const BOUNDARY: &str = "integration-boundary";

/// Full application over a fresh in-memory store.
pub fn contacts_app(
    max_import_rows: usize,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let service = Arc::new(ContactService::new(Arc::new(
        InMemoryContactRepository::new(),
    )));
    let state = HttpState::new(service.clone(), service).with_max_import_rows(max_import_rows);
    let health = HealthState::new();
    health.mark_ready();

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(health))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_contacts))
        .service(ready)
        .service(live)
}

/// An `.xlsx` workbook with the export header row followed by `rows`.
pub fn workbook(rows: &[[&str; 4]]) -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let header = ["Clave cliente", "Nombre Contacto", "Correo", "Teléfono Contacto"];
    for (col, title) in header.into_iter().enumerate() {
        sheet
            .write_string(0, col as u16, title)
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

/// `POST /api/v1/contacts/upload` carrying `bytes` as the `file` part.
pub fn upload_request(bytes: &[u8]) -> TestRequest {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"contacts.xlsx\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri("/api/v1/contacts/upload")
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}
