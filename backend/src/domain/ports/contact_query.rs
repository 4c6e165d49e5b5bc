//! Driving port for read-only contact use cases.

use async_trait::async_trait;

use crate::domain::{Contact, ContactId, ContactWithValidation, Error};

/// Read-side contact use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactQuery: Send + Sync {
    /// Every stored contact.
    async fn list_contacts(&self) -> Result<Vec<Contact>, Error>;

    /// One contact by identifier.
    async fn get_contact(&self, id: ContactId) -> Result<Contact, Error>;

    /// Case-insensitive substring search on the field named `field`.
    ///
    /// Unknown field names match nothing.
    async fn search_contacts(&self, field: &str, value: &str) -> Result<Vec<Contact>, Error>;

    /// Every stored contact paired with its rule violations.
    async fn validate_contacts(&self) -> Result<Vec<ContactWithValidation>, Error>;
}
