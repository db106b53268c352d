use sqlx::{MySqlPool, Row};

use crate::core::{AppError, Result};
use crate::modules::reports::models::InvoiceAggregate;

/// Repository for dashboard aggregation queries
pub struct ReportRepository {
    pool: MySqlPool,
}

impl ReportRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Fetch the aggregate columns of every invoice for an account,
    /// oldest first so month grouping preserves chronological order
    pub async fn fetch_invoice_aggregates(&self, account_id: &str) -> Result<Vec<InvoiceAggregate>> {
        let rows = sqlx::query_as::<_, InvoiceAggregate>(
            r#"
            SELECT status, total, paid_amount, balance, due_date, created_at
            FROM invoices
            WHERE account_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(account_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(rows)
    }

    pub async fn count_clients(&self, account_id: &str) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM clients WHERE account_id = ?")
            .bind(account_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let count: i64 = row.try_get("count").map_err(AppError::Database)?;

        Ok(count as u64)
    }
}
