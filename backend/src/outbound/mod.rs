//! Outbound adapters implementing domain ports.
//!
//! - **memory**: process-local contact store guarded by an async `RwLock`
//!
//! Adapters are thin translators between domain types and their storage
//! representation. They contain no business logic.

pub mod memory;
