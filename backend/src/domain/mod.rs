//! Domain primitives, rules, ports and services.
//!
//! Purpose: define the contact model and the use cases the HTTP adapter
//! drives, without any knowledge of Actix, spreadsheets or storage.
//!
//! Public surface:
//! - Contact, ContactDetails, ContactId, ContactField, NewContact: the
//!   record model.
//! - ContactValidator, ValidationError, ValidationErrorKind,
//!   ContactWithValidation: field rules and their findings.
//! - ContactService: implements the `ContactQuery` and `ContactCommand`
//!   driving ports over a `ContactRepository`.
//! - Error (alias to `error::Error`): transport-agnostic failure payload.
//! - TraceId: per-request correlation identifier.

pub mod contact;
pub mod contact_service;
pub mod contact_validation;
pub mod error;
pub mod ports;
pub mod trace_id;

pub use self::contact::{
    Contact, ContactDetails, ContactField, ContactId, ContactIdError, NewContact,
};
pub use self::contact_service::ContactService;
pub use self::contact_validation::{
    ContactValidator, ContactWithValidation, ValidationError, ValidationErrorKind,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use contacts_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such contact"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
