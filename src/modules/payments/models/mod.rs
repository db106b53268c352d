mod payment;

pub use payment::{Payment, RecordPaymentRequest};
