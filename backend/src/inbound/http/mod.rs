//! HTTP inbound adapter exposing REST endpoints.
//!
//! ```text
//! POST /api/v1/contacts/upload
//! GET  /api/v1/contacts
//! GET  /api/v1/contacts/search?field=name&value=an
//! GET  /api/v1/contacts/validate
//! GET  /api/v1/contacts/download
//! GET  /api/v1/contacts/{id}
//! PUT  /api/v1/contacts/{id}
//! GET  /health/ready
//! GET  /health/live
//! ```

pub mod contacts;
pub mod error;
pub mod health;
pub mod schemas;
pub mod spreadsheets;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every contact endpoint on `cfg`.
///
/// Fixed paths are registered ahead of `/contacts/{id}` so they are never
/// captured as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use contacts_backend::inbound::http::configure_contacts;
///
/// let app = App::new().service(web::scope("/api/v1").configure(configure_contacts));
/// ```
pub fn configure_contacts(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .app_data(validation::query_config())
        .app_data(validation::path_config())
        .service(spreadsheets::upload_contacts)
        .service(spreadsheets::download_contacts)
        .service(contacts::list_contacts)
        .service(contacts::search_contacts)
        .service(contacts::validate_contacts)
        .service(contacts::get_contact)
        .service(contacts::update_contact);
}
