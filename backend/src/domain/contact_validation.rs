//! Field-level business rules for contacts.
//!
//! Each field is checked independently and every field is always checked, so
//! one bad field never hides problems in another. Within a field the rules
//! run in order and stop at the first failure: an empty email is reported as
//! `REQUIRED` only, never additionally as `INVALID_FORMAT`.
//!
//! | Field | Rules, in order |
//! |---|---|
//! | client key | required, digits only, fits in an `i64` |
//! | name | required, letters / whitespace / `'` / `.` only |
//! | email | required, address format, whitelisted domain |
//! | phone | required, no letters, ten digits, whitelisted area code |

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Contact, ContactDetails, ContactField};

/// Email domains accepted by default.
pub const DEFAULT_EMAIL_DOMAINS: [&str; 7] = [
    "gmail.com",
    "yahoo.com",
    "hotmail.com",
    "outlook.com",
    "live.com",
    "icloud.com",
    "protonmail.com",
];

/// Phone area codes (Chiapas region) accepted by default.
pub const DEFAULT_AREA_CODES: [&str; 9] = [
    "961", "962", "963", "964", "965", "966", "967", "968", "994",
];

/// Number of digits in a normalised phone number.
pub const PHONE_DIGITS: usize = 10;

const AREA_CODE_DIGITS: usize = 3;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Machine-readable category of a rule violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    /// The field is empty.
    Required,
    /// The value does not have the expected shape.
    InvalidFormat,
    /// The value contains a disallowed character.
    InvalidCharacter,
    /// The value has the wrong number of digits.
    InvalidLength,
    /// The email domain is not whitelisted.
    InvalidDomain,
    /// The phone area code is not whitelisted.
    InvalidAreaCode,
}

impl ValidationErrorKind {
    /// Wire tag, e.g. `INVALID_AREA_CODE`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "REQUIRED",
            Self::InvalidFormat => "INVALID_FORMAT",
            Self::InvalidCharacter => "INVALID_CHARACTER",
            Self::InvalidLength => "INVALID_LENGTH",
            Self::InvalidDomain => "INVALID_DOMAIN",
            Self::InvalidAreaCode => "INVALID_AREA_CODE",
        }
    }
}

/// One rule violation on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Offending field.
    pub field: ContactField,
    /// Raw value that failed.
    pub value: String,
    /// Human-readable explanation.
    pub message: String,
    /// Violation category.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    fn new(
        field: ContactField,
        value: &str,
        kind: ValidationErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.to_owned(),
            message: message.into(),
            kind,
        }
    }
}

/// A contact snapshot paired with the violations found on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactWithValidation {
    contact: Contact,
    errors: Vec<ValidationError>,
}

impl ContactWithValidation {
    /// Pair a contact with its violations.
    #[must_use]
    pub const fn new(contact: Contact, errors: Vec<ValidationError>) -> Self {
        Self { contact, errors }
    }

    /// The validated contact.
    #[must_use]
    pub const fn contact(&self) -> &Contact {
        &self.contact
    }

    /// Violations in field order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `true` when no rule failed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Split into the contact and its violations.
    #[must_use]
    pub fn into_parts(self) -> (Contact, Vec<ValidationError>) {
        (self.contact, self.errors)
    }
}

/// Applies the contact rules against configurable whitelists.
///
/// # Examples
/// ```
/// use contacts_backend::domain::{ContactDetails, ContactValidator, ValidationErrorKind};
///
/// let validator = ContactValidator::default();
/// let errors = validator.validate(&ContactDetails::new(
///     "123",
///     "Ana Pérez",
///     "ana@unknown.org",
///     "9611234567",
/// ));
/// assert_eq!(errors.len(), 1);
/// assert_eq!(errors[0].kind, ValidationErrorKind::InvalidDomain);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactValidator {
    email_domains: Vec<String>,
    area_codes: Vec<String>,
}

impl Default for ContactValidator {
    fn default() -> Self {
        Self::new(DEFAULT_EMAIL_DOMAINS, DEFAULT_AREA_CODES)
    }
}

impl ContactValidator {
    /// Build a validator from explicit whitelists. Domains are compared
    /// case-insensitively.
    pub fn new<D, A>(
        email_domains: impl IntoIterator<Item = D>,
        area_codes: impl IntoIterator<Item = A>,
    ) -> Self
    where
        D: AsRef<str>,
        A: Into<String>,
    {
        Self {
            email_domains: email_domains
                .into_iter()
                .map(|domain| domain.as_ref().to_lowercase())
                .collect(),
            area_codes: area_codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Every violation across the four fields, in field order.
    #[must_use]
    pub fn validate(&self, details: &ContactDetails) -> Vec<ValidationError> {
        [
            check_client_key(&details.client_key),
            check_name(&details.name),
            self.check_email(&details.email),
            self.check_phone(&details.phone),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Validate a stored contact and pair it with the result.
    #[must_use]
    pub fn validate_contact(&self, contact: Contact) -> ContactWithValidation {
        let errors = self.validate(contact.details());
        ContactWithValidation::new(contact, errors)
    }

    fn check_email(&self, email: &str) -> Option<ValidationError> {
        let field = ContactField::Email;
        if email.is_empty() {
            return Some(ValidationError::new(
                field,
                email,
                ValidationErrorKind::Required,
                "email must not be empty",
            ));
        }

        let domain = email_regex()
            .is_match(email)
            .then(|| email.split_once('@'))
            .flatten()
            .map(|(_, domain)| domain.to_lowercase());
        let Some(domain) = domain else {
            return Some(ValidationError::new(
                field,
                email,
                ValidationErrorKind::InvalidFormat,
                "email address is not well formed",
            ));
        };

        if self.email_domains.contains(&domain) {
            return None;
        }
        Some(ValidationError::new(
            field,
            email,
            ValidationErrorKind::InvalidDomain,
            format!(
                "email domain is not recognised (use one of: {})",
                self.email_domains.join(", ")
            ),
        ))
    }

    fn check_phone(&self, phone: &str) -> Option<ValidationError> {
        let field = ContactField::Phone;
        if phone.is_empty() {
            return Some(ValidationError::new(
                field,
                phone,
                ValidationErrorKind::Required,
                "phone must not be empty",
            ));
        }
        if phone.chars().any(char::is_alphabetic) {
            return Some(ValidationError::new(
                field,
                phone,
                ValidationErrorKind::InvalidCharacter,
                "phone must not contain letters",
            ));
        }

        let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
        if digits.len() != PHONE_DIGITS {
            return Some(ValidationError::new(
                field,
                phone,
                ValidationErrorKind::InvalidLength,
                format!("phone must have exactly {PHONE_DIGITS} digits"),
            ));
        }

        let area_code = digits.get(..AREA_CODE_DIGITS).unwrap_or_default();
        if self.area_codes.iter().any(|code| code == area_code) {
            return None;
        }
        Some(ValidationError::new(
            field,
            phone,
            ValidationErrorKind::InvalidAreaCode,
            format!(
                "area code must be one of: {}",
                self.area_codes.join(", ")
            ),
        ))
    }
}

fn check_client_key(client_key: &str) -> Option<ValidationError> {
    let field = ContactField::ClientKey;
    if client_key.is_empty() {
        return Some(ValidationError::new(
            field,
            client_key,
            ValidationErrorKind::Required,
            "client key must not be empty",
        ));
    }
    // Digits only, and small enough to be a 64-bit integer.
    if client_key.chars().all(|c| c.is_ascii_digit()) && client_key.parse::<i64>().is_ok() {
        return None;
    }
    Some(ValidationError::new(
        field,
        client_key,
        ValidationErrorKind::InvalidFormat,
        "client key must be a whole number made of digits only",
    ))
}

fn check_name(name: &str) -> Option<ValidationError> {
    let field = ContactField::Name;
    if name.is_empty() {
        return Some(ValidationError::new(
            field,
            name,
            ValidationErrorKind::Required,
            "name must not be empty",
        ));
    }
    let allowed = |c: char| c.is_alphabetic() || c.is_whitespace() || c == '\'' || c == '.';
    if name.chars().all(allowed) {
        return None;
    }
    Some(ValidationError::new(
        field,
        name,
        ValidationErrorKind::InvalidCharacter,
        "name may only contain letters, spaces, apostrophes and periods",
    ))
}

#[cfg(test)]
#[path = "contact_validation_tests.rs"]
mod tests;
