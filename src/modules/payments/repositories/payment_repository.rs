use sqlx::{MySql, MySqlPool, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::payments::models::Payment;

/// Repository for payment database operations.
///
/// Payments are insert-only; the single write path runs inside the
/// payment recording transaction owned by the service.
pub struct PaymentRepository {
    pool: MySqlPool,
}

impl PaymentRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a payment row inside an open transaction
    pub async fn create_with_tx(
        tx: &mut Transaction<'_, MySql>,
        payment: &Payment,
    ) -> Result<Payment> {
        let id = Uuid::new_v4().to_string();

        sqlx::query(
            r#"
            INSERT INTO payments (id, invoice_id, amount, payment_date, notes, created_at)
            VALUES (?, ?, ?, ?, ?, NOW())
            "#,
        )
        .bind(&id)
        .bind(&payment.invoice_id)
        .bind(payment.amount)
        .bind(payment.payment_date)
        .bind(&payment.notes)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        let mut created = payment.clone();
        created.id = Some(id);

        Ok(created)
    }

    /// List payments for an invoice, most recent payment date first
    pub async fn list_by_invoice(&self, invoice_id: &str) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT id, invoice_id, amount, payment_date, notes, created_at
            FROM payments
            WHERE invoice_id = ?
            ORDER BY payment_date DESC, created_at DESC
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(payments)
    }
}
