// Feature modules, one directory per domain

pub mod clients;
pub mod exports;
pub mod invoices;
pub mod payments;
pub mod reports;
pub mod settings;
