// Payment records are append-only: once recorded they are never updated
// or deleted, so the payment history stays a faithful audit trail of how
// an invoice's paid amount was reached.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A payment recorded against an invoice
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Payment {
    /// Unique payment ID (UUID)
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Invoice this payment applies to
    #[serde(skip_deserializing)]
    pub invoice_id: String,

    /// Amount paid; validated against the invoice balance at recording
    /// time
    pub amount: Decimal,

    pub payment_date: NaiveDate,

    pub notes: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Request body for recording a payment
#[derive(Debug, Clone, Deserialize)]
pub struct RecordPaymentRequest {
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub notes: Option<String>,
}
