// Exports module

pub mod controllers;
pub mod services;

pub use services::CsvExporter;
