//! In-process contact store.
//!
//! All records live in one ordered map guarded by a single Tokio
//! [`RwLock`]. Writers (`insert`, `insert_batch`, `update`, `delete`) hold
//! the write guard for their whole duration; readers share the read guard.
//! Nothing survives a restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tokio::sync::RwLock;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDetails, ContactField, ContactId, NewContact};

/// Records plus the identifier counter, mutated together under one lock.
#[derive(Debug)]
struct ContactTable {
    records: BTreeMap<ContactId, Contact>,
    /// Next identifier to hand out. `None` once `u64::MAX` has been used.
    next_id: Option<ContactId>,
}

impl Default for ContactTable {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: Some(ContactId::FIRST),
        }
    }
}

impl ContactTable {
    fn insert(
        &mut self,
        contact: NewContact,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Contact, ContactRepositoryError> {
        let (id, next_id) = allocate(self.next_id, contact.id)?;
        self.next_id = next_id;
        Ok(self.store(id, contact.details, now))
    }

    /// Allocate every identifier before storing anything, so a batch that
    /// runs out of identifiers leaves the table untouched.
    fn insert_batch(
        &mut self,
        contacts: Vec<NewContact>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut next_id = self.next_id;
        let mut ids = Vec::with_capacity(contacts.len());
        for contact in &contacts {
            let (id, next) = allocate(next_id, contact.id)?;
            next_id = next;
            ids.push(id);
        }

        self.next_id = next_id;
        Ok(ids
            .into_iter()
            .zip(contacts)
            .map(|(id, contact)| self.store(id, contact.details, now))
            .collect())
    }

    fn store(
        &mut self,
        id: ContactId,
        details: ContactDetails,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Contact {
        let created_at = self
            .records
            .get(&id)
            .map_or(now, Contact::created_at);
        let stored = Contact::new(id, details, created_at, now);
        self.records.insert(id, stored.clone());
        stored
    }
}

/// Resolve the identifier for one record and the counter that follows it.
fn allocate(
    next_id: Option<ContactId>,
    supplied: Option<ContactId>,
) -> Result<(ContactId, Option<ContactId>), ContactRepositoryError> {
    let id = match supplied {
        Some(id) => id,
        None => next_id
            .ok_or_else(|| ContactRepositoryError::query("contact identifiers exhausted"))?,
    };
    // Supplied identifiers still advance the counter so later
    // assignments never collide with them.
    let next_id = if next_id.is_some_and(|next| next <= id) {
        id.next()
    } else {
        next_id
    };
    Ok((id, next_id))
}

/// Contact repository backed by process memory.
///
/// Construct one per process (or per test) and share it behind an `Arc`.
///
/// # Examples
/// ```
/// use contacts_backend::domain::ports::ContactRepository;
/// use contacts_backend::domain::{ContactDetails, NewContact};
/// use contacts_backend::outbound::memory::InMemoryContactRepository;
///
/// # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
/// let repo = InMemoryContactRepository::new();
/// let stored = repo
///     .insert(NewContact::from(ContactDetails::new("1", "Ana", "ana@gmail.com", "9611234567")))
///     .await
///     .expect("insert");
/// assert_eq!(stored.id().get(), 1);
/// # });
/// ```
pub struct InMemoryContactRepository {
    table: RwLock<ContactTable>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryContactRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryContactRepository {
    /// Create an empty store using the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(DefaultClock))
    }

    /// Create an empty store reading time from `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            table: RwLock::new(ContactTable::default()),
            clock,
        }
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn insert(&self, contact: NewContact) -> Result<Contact, ContactRepositoryError> {
        let mut table = self.table.write().await;
        table.insert(contact, self.clock.utc())
    }

    async fn insert_batch(
        &self,
        contacts: Vec<NewContact>,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let mut table = self.table.write().await;
        table.insert_batch(contacts, self.clock.utc())
    }

    async fn find_all(&self) -> Result<Vec<Contact>, ContactRepositoryError> {
        let table = self.table.read().await;
        Ok(table.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Contact, ContactRepositoryError> {
        let table = self.table.read().await;
        table
            .records
            .get(&id)
            .cloned()
            .ok_or_else(|| ContactRepositoryError::not_found(id))
    }

    async fn update(
        &self,
        id: ContactId,
        details: ContactDetails,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut table = self.table.write().await;
        let now = self.clock.utc();
        let record = table
            .records
            .get_mut(&id)
            .ok_or_else(|| ContactRepositoryError::not_found(id))?;
        record.replace_details(details, now);
        Ok(record.clone())
    }

    async fn delete(&self, id: ContactId) -> Result<(), ContactRepositoryError> {
        let mut table = self.table.write().await;
        table
            .records
            .remove(&id)
            .map(drop)
            .ok_or_else(|| ContactRepositoryError::not_found(id))
    }

    async fn search(
        &self,
        field: ContactField,
        value: &str,
    ) -> Result<Vec<Contact>, ContactRepositoryError> {
        let needle = value.to_lowercase();
        let table = self.table.read().await;
        Ok(table
            .records
            .values()
            .filter(|contact| {
                contact
                    .details()
                    .field(field)
                    .to_lowercase()
                    .contains(&needle)
            })
            .cloned()
            .collect())
    }
}
