//! Driven port for contact persistence.
//!
//! The in-memory adapter in `outbound::memory` is the only implementation
//! today. The `Connection` and `Query` variants exist so a persistent store
//! can slot in behind the same trait without the service changing.

use async_trait::async_trait;

use crate::domain::{Contact, ContactDetails, ContactField, ContactId, NewContact};

use super::define_port_error;

define_port_error! {
    /// Errors raised by contact repositories.
    pub enum ContactRepositoryError {
        /// No record is stored under the identifier.
        NotFound { id: ContactId } => "contact {id} not found",
        /// The backing store could not be reached.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Storage contract for contacts.
///
/// Writers are exclusive and readers are shared: a read never observes a
/// half-applied insert, batch, update or delete.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store one contact and return the stored record.
    ///
    /// Without an identifier the next unused one is assigned. With one, any
    /// record under it is overwritten and its creation time kept.
    async fn insert(&self, contact: NewContact) -> Result<Contact, ContactRepositoryError>;

    /// Store every contact in order as one atomic write.
    async fn insert_batch(
        &self,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// Every stored contact, ordered by identifier.
    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError>;

    /// The contact stored under `id`.
    async fn find_by_id(&self, id: ContactId) -> Result<Contact, ContactRepositoryError>;

    /// Replace the four fields of an existing contact.
    async fn update(
        &self,
        id: ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactRepositoryError>;

    /// Remove the contact stored under `id`.
    async fn delete(&self, id: ContactId) -> Result<(), ContactRepositoryError>;

    /// Contacts whose `field` contains `value`, ignoring case.
    async fn search(
        &self,
        field: ContactField,
        value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError>;
}
