use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::modules::invoices::models::InvoiceStatus;

/// Aggregate dashboard statistics for one account
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    /// Sum of paid amounts across all invoices
    pub total_revenue: Decimal,
    /// Sum of open balances across all invoices
    pub outstanding_amount: Decimal,
    pub total_invoices: u64,
    pub paid_invoices: u64,
    /// Unpaid plus partially paid invoices
    pub unpaid_invoices: u64,
    /// Unpaid invoices past their due date (computed at read time)
    pub overdue_invoices: u64,
    pub total_clients: u64,
}

/// Revenue received, grouped by calendar month of invoice creation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueByMonth {
    /// Month label, e.g. "Mar 2026"
    pub month: String,
    pub revenue: Decimal,
}

/// The invoice columns the dashboard aggregator reads
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceAggregate {
    pub status: InvoiceStatus,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub balance: Decimal,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}
