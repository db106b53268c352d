use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::Currency;

/// Account-level preferences, stored and replaced as a whole object.
///
/// Missing fields on update fall back to their defaults rather than
/// preserving the previous value; clients send the full object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub default_currency: Currency,

    /// Default tax rate in percent for new invoices
    #[serde(default)]
    pub default_tax_rate: Decimal,

    /// Days between issue date and due date for new invoices
    #[serde(default = "default_payment_terms")]
    pub payment_terms_days: u32,

    #[serde(default = "default_true")]
    pub notify_on_payment: bool,

    #[serde(default = "default_true")]
    pub notify_on_overdue: bool,
}

fn default_payment_terms() -> u32 {
    30
}

fn default_true() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_currency: Currency::default(),
            default_tax_rate: Decimal::ZERO,
            payment_terms_days: default_payment_terms(),
            notify_on_payment: true,
            notify_on_overdue: true,
        }
    }
}

impl Preferences {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_tax_rate < Decimal::ZERO {
            return Err("Default tax rate cannot be negative".to_string());
        }
        if self.payment_terms_days == 0 || self.payment_terms_days > 365 {
            return Err("Payment terms must be between 1 and 365 days".to_string());
        }
        Ok(())
    }
}
