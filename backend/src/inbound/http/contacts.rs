//! Contact API handlers.
//!
//! ```text
//! GET /api/v1/contacts?page=1&pageSize=50
//! GET /api/v1/contacts/search?field=name&value=an
//! GET /api/v1/contacts/validate
//! GET /api/v1/contacts/{id}
//! PUT /api/v1/contacts/{id} {"clientKey":"1","name":"Ana","email":"ana@gmail.com","phone":"9611234567"}
//! ```

use actix_web::{HttpRequest, get, put, web};
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Contact, ContactDetails, ContactWithValidation, Error, ValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ContactPageSchema, ContactValidationPageSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, page_request, parse_contact_id, require_non_blank,
};

/// Contact as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDto {
    /// Store-assigned identifier.
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "100234")]
    pub client_key: String,
    #[schema(example = "Ana Pérez")]
    pub name: String,
    #[schema(example = "ana@gmail.com")]
    pub email: String,
    #[schema(example = "9611234567")]
    pub phone: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactDto {
    fn from(contact: Contact) -> Self {
        let id = contact.id().get();
        let created_at = contact.created_at();
        let updated_at = contact.updated_at();
        let ContactDetails {
            client_key,
            name,
            email,
            phone,
        } = contact.details().clone();
        Self {
            id,
            client_key,
            name,
            email,
            phone,
            created_at,
            updated_at,
        }
    }
}

/// Request body for `PUT /api/v1/contacts/{id}`: every field is replaced.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    pub client_key: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl From<ContactPayload> for ContactDetails {
    fn from(value: ContactPayload) -> Self {
        Self::new(value.client_key, value.name, value.email, value.phone)
    }
}

/// One rule violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorDto {
    /// Field name: `client_key`, `name`, `email` or `phone`.
    #[schema(example = "phone")]
    pub field: String,
    /// Offending raw value.
    pub value: String,
    pub message: String,
    /// Violation kind, e.g. `INVALID_AREA_CODE`.
    #[serde(rename = "type")]
    #[schema(example = "INVALID_AREA_CODE")]
    pub kind: String,
}

impl From<ValidationError> for ValidationErrorDto {
    fn from(value: ValidationError) -> Self {
        Self {
            field: value.field.as_str().to_owned(),
            value: value.value,
            message: value.message,
            kind: value.kind.as_str().to_owned(),
        }
    }
}

/// A contact paired with its rule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactValidationDto {
    pub contact: ContactDto,
    pub errors: Vec<ValidationErrorDto>,
    pub is_valid: bool,
}

impl From<ContactWithValidation> for ContactValidationDto {
    fn from(value: ContactWithValidation) -> Self {
        let is_valid = value.is_valid();
        let (contact, errors) = value.into_parts();
        Self {
            contact: contact.into(),
            errors: errors.into_iter().map(Into::into).collect(),
            is_valid,
        }
    }
}

/// Page selection shared by list endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number (default 1).
    pub page: Option<u32>,
    /// Items per page, 1 to 100 (default 50).
    pub page_size: Option<u32>,
}

impl PageQuery {
    fn to_request(&self) -> Result<PageRequest, Error> {
        page_request(self.page, self.page_size)
    }
}

/// Search criteria for `GET /api/v1/contacts/search`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Field to search: `client_key`, `name`, `email` or `phone`.
    pub field: Option<String>,
    /// Case-insensitive substring to look for.
    pub value: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

fn respond_with_page<T, U>(
    req: &HttpRequest,
    request: PageRequest,
    items: Vec<T>,
) -> web::Json<Page<U>>
where
    U: From<T>,
{
    let page = request.paginate(items).map(U::from);
    web::Json(page.with_links(&req.full_url()))
}

/// List stored contacts.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use contacts_backend::inbound::http::contacts::list_contacts;
///
/// let app = App::new().service(list_contacts);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/contacts",
    params(PageQuery),
    responses(
        (status = 200, description = "Contacts", body = ContactPageSchema),
        (status = 400, description = "Invalid page parameters", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "listContacts"
)]
#[get("/contacts")]
pub async fn list_contacts(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<ContactDto>>> {
    let request = query.to_request()?;
    let contacts = state.contacts.list_contacts().await?;
    Ok(respond_with_page(&req, request, contacts))
}

/// Search contacts by one field.
///
/// Unknown field names produce an empty page rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching contacts", body = ContactPageSchema),
        (status = 400, description = "Missing field or value", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "searchContacts"
)]
#[get("/contacts/search")]
pub async fn search_contacts(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<SearchQuery>,
) -> ApiResult<web::Json<Page<ContactDto>>> {
    let SearchQuery {
        field,
        value,
        page,
        page_size,
    } = query.into_inner();
    let field = require_non_blank(field, FieldName::new("field"))?;
    let value = require_non_blank(value, FieldName::new("value"))?;
    let request = page_request(page, page_size)?;

    let contacts = state.contacts.search_contacts(&field, &value).await?;
    Ok(respond_with_page(&req, request, contacts))
}

/// Validate every stored contact.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/validate",
    params(PageQuery),
    responses(
        (status = 200, description = "Contacts with their violations", body = ContactValidationPageSchema),
        (status = 400, description = "Invalid page parameters", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "validateContacts"
)]
#[get("/contacts/validate")]
pub async fn validate_contacts(
    state: web::Data<HttpState>,
    req: HttpRequest,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<ContactValidationDto>>> {
    let request = query.to_request()?;
    let results = state.contacts.validate_contacts().await?;
    Ok(respond_with_page(&req, request, results))
}

/// Fetch one contact.
#[utoipa::path(
    get,
    path = "/api/v1/contacts/{id}",
    params(("id" = u64, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact", body = ContactDto),
        (status = 400, description = "Invalid identifier", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ContactDto>> {
    let id = parse_contact_id(&path)?;
    let contact = state.contacts.get_contact(id).await?;
    Ok(web::Json(contact.into()))
}

/// Replace every field of a contact.
#[utoipa::path(
    put,
    path = "/api/v1/contacts/{id}",
    params(("id" = u64, Path, description = "Contact identifier")),
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Updated contact", body = ContactDto),
        (status = 400, description = "Invalid identifier or body", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ContactPayload>,
) -> ApiResult<web::Json<ContactDto>> {
    let id = parse_contact_id(&path)?;
    let contact = state
        .contacts_command
        .update_contact(id, payload.into_inner().into())
        .await?;
    Ok(web::Json(contact.into()))
}

#[cfg(test)]
#[path = "contacts_tests.rs"]
mod tests;
