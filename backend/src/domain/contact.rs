//! Contact records and their identifiers.
//!
//! A contact carries four user-supplied fields plus store-managed metadata
//! (identifier and timestamps). Field *content* is deliberately unconstrained
//! here: imported spreadsheets routinely contain bad data, and the rules in
//! [`crate::domain::contact_validation`] report problems as data rather than
//! rejecting records.

use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors raised when parsing a [`ContactId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactIdError {
    /// Identifiers start at one; zero means "not yet persisted".
    #[error("contact id must be a positive integer")]
    Zero,
    /// Input was not an unsigned decimal integer.
    #[error("contact id must be a positive integer")]
    NotANumber,
}

/// Store-assigned contact identifier.
///
/// Always positive. An unpersisted contact is represented by the absence of
/// an identifier (`Option<ContactId>`), never by a sentinel value.
///
/// # Examples
/// ```
/// use contacts_backend::domain::ContactId;
///
/// let id: ContactId = "42".parse().expect("valid id");
/// assert_eq!(id.get(), 42);
/// assert!("0".parse::<ContactId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ContactId(NonZeroU64);

impl ContactId {
    /// The first identifier handed out by a fresh store.
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Validate a raw identifier.
    ///
    /// # Errors
    /// Returns [`ContactIdError::Zero`] for `0`.
    pub fn new(raw: u64) -> Result<Self, ContactIdError> {
        NonZeroU64::new(raw).map(Self).ok_or(ContactIdError::Zero)
    }

    /// The raw numeric identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }

    /// The identifier immediately after this one, if it fits in `u64`.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl TryFrom<u64> for ContactId {
    type Error = ContactIdError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ContactId> for u64 {
    fn from(value: ContactId) -> Self {
        value.get()
    }
}

impl FromStr for ContactId {
    type Err = ContactIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.parse::<u64>().map_err(|_| ContactIdError::NotANumber)?;
        Self::new(raw)
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// The user-editable fields of a contact.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    /// Numeric key used to cross-reference the contact in external systems.
    pub client_key: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: String,
}

impl ContactDetails {
    /// Build details from the four raw field values.
    pub fn new(
        client_key: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            client_key: client_key.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
        }
    }

    /// Borrow the value of a single field.
    #[must_use]
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::ClientKey => &self.client_key,
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Phone => &self.phone,
        }
    }
}

/// Names one of the four contact fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    /// [`ContactDetails::client_key`].
    ClientKey,
    /// [`ContactDetails::name`].
    Name,
    /// [`ContactDetails::email`].
    Email,
    /// [`ContactDetails::phone`].
    Phone,
}

impl ContactField {
    /// Every field, in validation order.
    pub const ALL: [Self; 4] = [Self::ClientKey, Self::Name, Self::Email, Self::Phone];

    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ClientKey => "client_key",
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    /// Resolve a wire name. Unknown names yield `None`.
    ///
    /// # Examples
    /// ```
    /// use contacts_backend::domain::ContactField;
    ///
    /// assert_eq!(ContactField::parse("email"), Some(ContactField::Email));
    /// assert_eq!(ContactField::parse("address"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input to an insert: details plus an optional pre-assigned identifier.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewContact {
    /// Identifier to store under; `None` lets the store assign one.
    pub id: Option<ContactId>,
    /// Field values.
    pub details: ContactDetails,
}

impl From<ContactDetails> for NewContact {
    fn from(details: ContactDetails) -> Self {
        Self { id: None, details }
    }
}

/// A stored contact.
///
/// ## Invariants
/// - `updated_at >= created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    id: ContactId,
    #[serde(flatten)]
    details: ContactDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Contact {
    /// Assemble a stored record. `updated_at` is raised to `created_at` when
    /// it would otherwise precede it.
    #[must_use]
    pub fn new(
        id: ContactId,
        details: ContactDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            details,
            created_at,
            updated_at: updated_at.max(created_at),
        }
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> ContactId {
        self.id
    }

    /// Field values.
    #[must_use]
    pub const fn details(&self) -> &ContactDetails {
        &self.details
    }

    /// Creation time.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Time of the last write.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace every field, keeping the identifier and creation time.
    pub fn replace_details(&mut self, details: ContactDetails, now: DateTime<Utc>) {
        self.details = details;
        self.updated_at = now.max(self.created_at);
    }
}
