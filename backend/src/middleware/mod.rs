//! Request middleware.
//!
//! Purpose: define middleware for request lifecycle concerns such as
//! correlation identifiers and access logging.

pub mod trace;

pub use trace::Trace;
