// A line item is one billable row on an invoice. Items have no stable
// identity across edits: every invoice edit replaces the full item set
// and assigns fresh ids.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::invoice::DiscountType;
use crate::core::{AppError, Result};
use crate::modules::invoices::services::totals::{line_amount, Discount};

/// Represents a single line item on an invoice
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceItem {
    /// Unique identifier, reissued on every invoice edit
    #[serde(skip_deserializing)]
    pub id: Option<String>,

    /// Foreign key to the invoice
    #[serde(skip_deserializing)]
    pub invoice_id: Option<String>,

    /// Short label for the billed work or product
    pub title: String,

    pub description: Option<String>,

    /// Quantity, must be positive (fractional quantities allowed)
    pub quantity: Decimal,

    /// Price per unit, must be non-negative
    pub unit_price: Decimal,

    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,

    /// quantity * unit_price - line discount, not clamped at zero
    #[serde(skip_deserializing)]
    pub amount: Decimal,
}

impl InvoiceItem {
    /// Create a new line item with validation and a computed amount
    pub fn new(
        title: String,
        description: Option<String>,
        quantity: Decimal,
        unit_price: Decimal,
        discount_type: Option<DiscountType>,
        discount_value: Option<Decimal>,
    ) -> Result<Self> {
        Self::validate_title(&title)?;
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(unit_price)?;

        let discount = Discount::from_parts(discount_type, discount_value);
        let amount = line_amount(quantity, unit_price, discount.as_ref());

        Ok(Self {
            id: None,
            invoice_id: None,
            title,
            description,
            quantity,
            unit_price,
            discount_type,
            discount_value,
            amount,
        })
    }

    fn validate_title(title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(AppError::validation("Line item title cannot be empty"));
        }

        if title.len() > 255 {
            return Err(AppError::validation(
                "Line item title cannot exceed 255 characters",
            ));
        }

        Ok(())
    }

    fn validate_quantity(quantity: Decimal) -> Result<()> {
        if quantity <= Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Quantity must be positive, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        Ok(())
    }
}
