//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every malformed request, whether caught by a handler or by an Actix
//! extractor, is reported as an `invalid_request` [`Error`] whose details
//! name the offending field and a stable sub-code.

use actix_web::web;
use pagination::{PageRequest, PageRequestError};
use serde_json::json;
use tracing::debug;

use crate::domain::{ContactId, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidContactId,
    OutOfRange,
    InvalidBody,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidContactId => "invalid_contact_id",
            ErrorCode::OutOfRange => "out_of_range",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

/// Builder for validation errors with field context.
struct ValidationError {
    field: String,
    message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    fn with_code(self, code: ErrorCode) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "code": code.as_str(),
        }))
    }

    fn with_value(self, code: ErrorCode, value: impl Into<String>) -> Error {
        Error::invalid_request(self.message).with_details(json!({
            "field": self.field,
            "value": value.into(),
            "code": code.as_str(),
        }))
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    ValidationError::new(field, format!("missing required field: {field}"))
        .with_code(ErrorCode::MissingField)
}

/// Require a non-blank query or form value.
pub(crate) fn require_non_blank(value: Option<String>, field: FieldName) -> Result<String, Error> {
    value
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| missing_field_error(field))
}

pub(crate) fn parse_contact_id(value: &str) -> Result<ContactId, Error> {
    const FIELD: &str = "id";
    value.parse::<ContactId>().map_err(|_| {
        ValidationError::new(FIELD, "id must be a positive integer")
            .with_value(ErrorCode::InvalidContactId, value)
    })
}

pub(crate) fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, Error> {
    PageRequest::from_query(page, page_size).map_err(|err| {
        let value = match err {
            PageRequestError::PageOutOfRange { value }
            | PageRequestError::PageSizeOutOfRange { value, .. } => value,
        };
        ValidationError::new(err.parameter(), err.to_string())
            .with_value(ErrorCode::OutOfRange, value.to_string())
    })
}

fn extractor_error(code: ErrorCode, field: &str, reason: &dyn std::fmt::Display) -> Error {
    debug!(code = code.as_str(), %reason, "request extraction failed");
    ValidationError::new(field, format!("malformed request: {reason}")).with_code(code)
}

/// JSON body extractor configuration reporting failures as [`Error`].
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        extractor_error(ErrorCode::InvalidBody, "body", &err).into()
    })
}

/// Query string extractor configuration reporting failures as [`Error`].
#[must_use]
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        extractor_error(ErrorCode::InvalidQuery, "query", &err).into()
    })
}

/// Path extractor configuration reporting failures as [`Error`].
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        extractor_error(ErrorCode::InvalidPath, "path", &err).into()
    })
}
