//! OpenAPI schema definitions for domain and pagination types.
//!
//! Domain types and the pagination envelope remain framework-agnostic by
//! not deriving `ToSchema`. The wrappers here mirror their wire shape and
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

use crate::inbound::http::contacts::{ContactDto, ContactValidationDto};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The contact does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "contact 7 not found")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "67e55044-10b1-426f-9247-bb680e5fe0c8")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending field.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`pagination::PageInfo`].
#[derive(ToSchema)]
#[schema(as = pagination::PageInfo)]
#[serde(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageInfoSchema {
    #[schema(example = 1)]
    page: u32,
    #[schema(example = 50)]
    page_size: u32,
    #[schema(example = 120)]
    total_items: u64,
    #[schema(example = 3)]
    total_pages: u64,
}

/// OpenAPI schema for [`pagination::PageLinks`].
#[derive(ToSchema)]
#[schema(as = pagination::PageLinks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageLinksSchema {
    #[serde(rename = "self")]
    current: String,
    next: Option<String>,
    prev: Option<String>,
}

/// A page of contacts.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactPageSchema {
    data: Vec<ContactDto>,
    pagination: PageInfoSchema,
    links: PageLinksSchema,
}

/// A page of contacts with their rule violations.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ContactValidationPageSchema {
    data: Vec<ContactValidationDto>,
    pagination: PageInfoSchema,
    links: PageLinksSchema,
}

/// Multipart body of `POST /api/v1/contacts/upload`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UploadFormSchema {
    /// `.xlsx` workbook; the first worksheet is imported.
    #[schema(value_type = String, format = Binary, content_media_type = "application/octet-stream")]
    file: Vec<u8>,
}
