//! Contacts backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the contact model,
//! field rules, ports and the service; `inbound` exposes HTTP handlers and
//! the spreadsheet codec; `outbound` implements the storage port.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
