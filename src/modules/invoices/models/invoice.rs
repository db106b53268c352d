// An invoice references one client and carries an ordered set of line
// items. Monetary fields (subtotal, tax_amount, discount_amount, total,
// paid_amount, balance) are denormalized: computed by the totals
// calculator on create/edit and by payment application on payment
// recording, never on read.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::line_item::InvoiceItem;
use crate::core::Currency;

/// Invoice payment status
///
/// `Overdue` exists for display and aggregation only; the payment flow
/// writes `Unpaid`, `Partial` and `Paid`. Overdue classification happens
/// at read time from the due date (see the reports status classifier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)")]
pub enum InvoiceStatus {
    /// No payment recorded yet
    Unpaid,

    /// Paid in part, balance remaining
    Partial,

    /// Paid in full
    Paid,

    /// Unpaid and past its due date (derived, never persisted)
    Overdue,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Unpaid
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvoiceStatus::Unpaid => write!(f, "Unpaid"),
            InvoiceStatus::Partial => write!(f, "Partial"),
            InvoiceStatus::Paid => write!(f, "Paid"),
            InvoiceStatus::Overdue => write!(f, "Overdue"),
        }
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Unpaid" => Ok(InvoiceStatus::Unpaid),
            "Partial" => Ok(InvoiceStatus::Partial),
            "Paid" => Ok(InvoiceStatus::Paid),
            "Overdue" => Ok(InvoiceStatus::Overdue),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// Discount shape shared by line items and the invoice level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage of the discounted base
    Percentage,
    /// Fixed amount in the invoice currency
    Fixed,
}

impl std::fmt::Display for DiscountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiscountType::Percentage => write!(f, "percentage"),
            DiscountType::Fixed => write!(f, "fixed"),
        }
    }
}

impl std::str::FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "percentage" => Ok(DiscountType::Percentage),
            "fixed" => Ok(DiscountType::Fixed),
            _ => Err(format!("Invalid discount type: {}", s)),
        }
    }
}

/// Client fields joined onto invoice reads for list and export views
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSummary {
    pub name: String,
    pub email: String,
    pub company_name: Option<String>,
}

/// Represents an invoice
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    /// Unique invoice ID (UUID)
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Owning account
    #[serde(skip_deserializing)]
    pub account_id: String,

    /// Billed client
    pub client_id: String,

    /// Sequential number, unique per account (e.g. INV-0042)
    #[serde(skip_deserializing)]
    pub invoice_number: String,

    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,

    #[sqlx(try_from = "String")]
    pub currency: Currency,

    /// Tax rate in percent
    pub tax_rate: Decimal,

    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,

    /// Informational deposit percentage of subtotal; not subtracted
    /// from the total
    pub deposit_percentage: Option<Decimal>,

    /// Sum of line item amounts
    #[serde(skip_deserializing)]
    pub subtotal: Decimal,

    #[serde(skip_deserializing)]
    pub tax_amount: Decimal,

    #[serde(skip_deserializing)]
    pub discount_amount: Decimal,

    #[serde(skip_deserializing)]
    pub deposit_amount: Option<Decimal>,

    /// subtotal + tax_amount - discount_amount
    #[serde(skip_deserializing)]
    pub total: Decimal,

    /// Sum of recorded payments
    #[serde(skip_deserializing)]
    pub paid_amount: Decimal,

    /// total - paid_amount
    #[serde(skip_deserializing)]
    pub balance: Decimal,

    #[serde(skip_deserializing)]
    pub status: InvoiceStatus,

    pub notes: Option<String>,

    #[serde(skip_deserializing)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(skip_deserializing)]
    pub updated_at: Option<DateTime<Utc>>,

    /// Line items (stored in invoice_items, joined on detail reads)
    #[sqlx(skip)]
    #[serde(default)]
    pub line_items: Vec<InvoiceItem>,

    /// Client summary (joined on list and export reads)
    #[sqlx(skip)]
    #[serde(skip_deserializing)]
    pub client: Option<ClientSummary>,
}

/// Request body for creating or replacing an invoice
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub currency: Currency,
    pub tax_rate: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub deposit_percentage: Option<Decimal>,
    pub notes: Option<String>,
    pub items: Vec<CreateInvoiceItemRequest>,
}

/// Request body for a single line item
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceItemRequest {
    pub title: String,
    pub description: Option<String>,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_status_round_trip() {
        for status in [
            InvoiceStatus::Unpaid,
            InvoiceStatus::Partial,
            InvoiceStatus::Paid,
            InvoiceStatus::Overdue,
        ] {
            assert_eq!(InvoiceStatus::from_str(&status.to_string()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_default_is_unpaid() {
        assert_eq!(InvoiceStatus::default(), InvoiceStatus::Unpaid);
    }

    #[test]
    fn test_discount_type_parsing() {
        assert_eq!(
            DiscountType::from_str("percentage").unwrap(),
            DiscountType::Percentage
        );
        assert_eq!(DiscountType::from_str("fixed").unwrap(), DiscountType::Fixed);
        assert!(DiscountType::from_str("half-off").is_err());
    }
}
