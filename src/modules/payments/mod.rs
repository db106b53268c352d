// Payments module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Payment, RecordPaymentRequest};
pub use repositories::PaymentRepository;
pub use services::PaymentService;
