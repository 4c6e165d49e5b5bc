//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactCommand, ContactQuery};

/// Default cap on contacts accepted from one uploaded workbook.
pub const DEFAULT_MAX_IMPORT_ROWS: usize = 50;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub contacts: Arc<dyn ContactQuery>,
    pub contacts_command: Arc<dyn ContactCommand>,
    pub max_import_rows: usize,
}

impl HttpState {
    /// Construct state from the two contact ports with the default import cap.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use contacts_backend::domain::ContactService;
    /// use contacts_backend::inbound::http::state::HttpState;
    /// use contacts_backend::outbound::memory::InMemoryContactRepository;
    ///
    /// let service = Arc::new(ContactService::new(Arc::new(InMemoryContactRepository::new())));
    /// let state = HttpState::new(service.clone(), service);
    /// assert_eq!(state.max_import_rows, 50);
    /// ```
    pub fn new(contacts: Arc<dyn ContactQuery>, contacts_command: Arc<dyn ContactCommand>) -> Self {
        Self {
            contacts,
            contacts_command,
            max_import_rows: DEFAULT_MAX_IMPORT_ROWS,
        }
    }

    /// Override the import cap.
    #[must_use]
    pub fn with_max_import_rows(mut self, max_import_rows: usize) -> Self {
        self.max_import_rows = max_import_rows;
        self
    }
}
