//! Driving port for contact writes.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDetails, ContactId, Error, NewContact};

/// Write-side contact use cases consumed by inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactCommand: Send + Sync {
    /// Replace every field of an existing contact.
    async fn update_contact(&self, id: ContactId, details: ContactDetails)
    -> Result<Contact, Error>;

    /// Persist an imported batch, returning the stored records.
    async fn save_batch(&self, contacts: Vec<NewContact>) -> Result<Vec<Contact>, Error>;
}
