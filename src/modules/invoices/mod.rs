// Invoices module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Invoice, InvoiceItem, InvoiceStatus};
pub use repositories::InvoiceRepository;
pub use services::InvoiceService;
