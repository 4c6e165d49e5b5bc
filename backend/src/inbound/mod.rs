//! Inbound adapters that translate external requests into domain service
//! calls while keeping framework details at the edge.
//!
//! HTTP handlers live under [`http`]; the spreadsheet import/export codec
//! they use lives under [`spreadsheet`].

pub mod http;
pub mod spreadsheet;
