//! Factura Invoice Management Service Library
//!
//! This library provides the core functionality for the Factura invoicing system:
//! invoice totals, payment application, status classification, and the HTTP API
//! around them.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::clients;
pub use modules::invoices;
pub use modules::payments;
pub use modules::reports;
