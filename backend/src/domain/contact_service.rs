//! Contact use cases.
//!
//! The service is the only caller of the repository and the validator. It
//! does no locking of its own; consistency comes from the repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{
    ContactCommand, ContactQuery, ContactRepository, ContactRepositoryError,
};
use crate::domain::{
    Contact, ContactDetails, ContactField, ContactId, ContactValidator, ContactWithValidation,
    Error, NewContact,
};

/// Contact service implementing the driving ports.
#[derive(Clone)]
pub struct ContactService<R> {
    repository: Arc<R>,
    validator: ContactValidator,
}

impl<R> ContactService<R> {
    /// Create a service using the default validation whitelists.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_validator(repository, ContactValidator::default())
    }

    /// Create a service with a custom validator.
    pub fn with_validator(repository: Arc<R>, validator: ContactValidator) -> Self {
        Self {
            repository,
            validator,
        }
    }
}

fn map_repository_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::NotFound { id } => Error::not_found(format!("contact {id} not found"))
            .with_details(serde_json::json!({ "id": id.get() })),
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> ContactQuery for ContactService<R>
where
    R: ContactRepository,
{
    async fn list_contacts(&self) -> Result<Vec<Contact>, Error> {
        self.repository
            .find_all()
            .await
            .map_err(map_repository_error)
    }

    async fn get_contact(&self, id: ContactId) -> Result<Contact, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }

    async fn search_contacts(&self, field: &str, value: &str) -> Result<Vec<Contact>, Error> {
        let Some(field) = ContactField::parse(field) else {
            return Ok(Vec::new());
        };
        self.repository
            .search(field, value)
            .await
            .map_err(map_repository_error)
    }

    async fn validate_contacts(&self) -> Result<Vec<ContactWithValidation>, Error> {
        let contacts = self.list_contacts().await?;
        Ok(contacts
            .into_iter()
            .map(|contact| self.validator.validate_contact(contact))
            .collect())
    }
}

#[async_trait]
impl<R> ContactCommand for ContactService<R>
where
    R: ContactRepository,
{
    async fn update_contact(
        &self,
        id: ContactId,
        details: ContactDetails,
    ) -> Result<Contact, Error> {
        self.repository
            .update(id, details)
            .await
            .map_err(map_repository_error)
    }

    async fn save_batch(&self, contacts: Vec<NewContact>) -> Result<Vec<Contact>, Error> {
        self.repository
            .insert_batch(contacts)
            .await
            .map_err(map_repository_error)
    }
}

#[cfg(test)]
#[path = "contact_service_tests.rs"]
mod tests;
