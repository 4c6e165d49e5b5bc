//! Spreadsheet import and export endpoints.
//!
//! ```text
//! POST /api/v1/contacts/upload   multipart/form-data; file=<contacts.xlsx>
//! GET  /api/v1/contacts/download
//! ```

use actix_multipart::{Multipart, MultipartError};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, get, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::domain::{Error, NewContact};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, UploadFormSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error};
use crate::inbound::spreadsheet::{
    SpreadsheetError, XLSX_CONTENT_TYPE, read_contacts, write_contacts,
};

const FILE_FIELD: &str = "file";
const EXPORT_FILE_NAME: &str = "contactos_corregidos.xlsx";
/// Largest accepted upload, in bytes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Response body of a successful import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = "Workbook imported")]
    pub message: String,
    /// Number of contacts stored.
    #[schema(example = 42)]
    pub count: usize,
}

fn upload_error(message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": FILE_FIELD }))
}

fn multipart_error(err: MultipartError) -> Error {
    warn!(error = %err, "rejected multipart upload");
    upload_error(format!("malformed upload: {err}"))
}

fn spreadsheet_error(err: SpreadsheetError) -> Error {
    match err {
        SpreadsheetError::Write { message } => {
            Error::internal(format!("export failed: {message}"))
        }
        other => {
            warn!(error = %other, "rejected workbook");
            upload_error(other.to_string())
        }
    }
}

fn blocking_error(err: actix_web::error::BlockingError) -> Error {
    Error::internal(format!("spreadsheet worker failed: {err}"))
}

/// Collect the bytes of the `file` part, ignoring any other parts.
async fn read_file_part(payload: &mut Multipart) -> Result<Vec<u8>, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
            if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
                warn!(limit = MAX_UPLOAD_BYTES, "upload exceeds size limit");
                return Err(upload_error(format!(
                    "file exceeds the {MAX_UPLOAD_BYTES} byte limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }
        return Ok(bytes);
    }
    Err(missing_field_error(FieldName::new(FILE_FIELD)))
}

/// Import contacts from the first worksheet of an uploaded `.xlsx`.
///
/// The header row is skipped, short rows are ignored and at most the
/// configured number of contacts is stored, in sheet order.
#[utoipa::path(
    post,
    path = "/api/v1/contacts/upload",
    request_body(content = UploadFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Workbook imported", body = UploadResponse),
        (status = 400, description = "Missing or unreadable workbook", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "uploadContacts"
)]
#[post("/contacts/upload")]
pub async fn upload_contacts(
    state: web::Data<HttpState>,
    mut payload: Multipart,
) -> ApiResult<web::Json<UploadResponse>> {
    let bytes = read_file_part(&mut payload).await?;
    let limit = state.max_import_rows;
    let sheet = web::block(move || read_contacts(&bytes, limit))
        .await
        .map_err(blocking_error)?
        .map_err(spreadsheet_error)?;

    let skipped = sheet.skipped_rows;
    let batch = sheet.contacts.into_iter().map(NewContact::from).collect();
    let saved = state.contacts_command.save_batch(batch).await?;
    info!(count = saved.len(), skipped, limit, "imported contacts");

    Ok(web::Json(UploadResponse {
        message: "Workbook imported".to_owned(),
        count: saved.len(),
    }))
}

/// Export every stored contact as an `.xlsx` attachment.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/download",
    responses(
        (status = 200, description = "Workbook attachment (`contactos_corregidos.xlsx`)"),
        (status = 400, description = "No contacts to export", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "downloadContacts"
)]
#[get("/contacts/download")]
pub async fn download_contacts(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let contacts = state.contacts.list_contacts().await?;
    if contacts.is_empty() {
        return Err(Error::invalid_request("there are no contacts to download"));
    }

    let count = contacts.len();
    let bytes = web::block(move || write_contacts(&contacts))
        .await
        .map_err(blocking_error)?
        .map_err(spreadsheet_error)?;
    info!(count, bytes = bytes.len(), "exported contacts");

    Ok(HttpResponse::Ok()
        .content_type(XLSX_CONTENT_TYPE)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(EXPORT_FILE_NAME.to_owned())],
        })
        .body(bytes))
}

#[cfg(test)]
#[path = "spreadsheets_tests.rs"]
mod tests;
