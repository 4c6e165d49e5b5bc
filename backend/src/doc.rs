//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every contact endpoint plus the health probes
//! - **Schemas**: the contact DTOs and the wrappers from
//!   [`crate::inbound::http::schemas`] that describe domain and pagination
//!   types without coupling them to utoipa
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::contacts::{
    ContactDto, ContactPayload, ContactValidationDto, ValidationErrorDto,
};
use crate::inbound::http::schemas::{
    ContactPageSchema, ContactValidationPageSchema, ErrorCodeSchema, ErrorSchema,
    PageInfoSchema, PageLinksSchema, UploadFormSchema,
};
use crate::inbound::http::spreadsheets::UploadResponse;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts backend API",
        description = "Import, validate, search, edit and export contact lists.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::spreadsheets::upload_contacts,
        crate::inbound::http::spreadsheets::download_contacts,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::search_contacts,
        crate::inbound::http::contacts::validate_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ContactDto,
        ContactPayload,
        ContactValidationDto,
        ValidationErrorDto,
        ContactPageSchema,
        ContactValidationPageSchema,
        PageInfoSchema,
        PageLinksSchema,
        UploadResponse,
        UploadFormSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "contacts", description = "Contact import, query, edit and export"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
