// MySQL persistence for invoices and their line items.
//
// Writes that touch more than one row (invoice + items, invoice +
// payments) always run inside a transaction. Line items are replaced
// wholesale on every update: delete all, insert all, fresh ids.

use sqlx::{FromRow, MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{ClientSummary, Invoice, InvoiceItem, InvoiceStatus};

const INVOICE_COLUMNS: &str = r#"
    id, account_id, client_id, invoice_number, issue_date, due_date,
    currency, tax_rate, discount_type, discount_value, deposit_percentage,
    subtotal, tax_amount, discount_amount, deposit_amount, total,
    paid_amount, balance, status, notes, created_at, updated_at
"#;

const ITEM_COLUMNS: &str = r#"
    id, invoice_id, title, description, quantity, unit_price,
    discount_type, discount_value, amount
"#;

/// Repository for invoice database operations
pub struct InvoiceRepository {
    pool: MySqlPool,
}

impl InvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }

    /// Create an invoice with its line items in a transaction.
    ///
    /// The invoice number is generated inside the same transaction so
    /// two concurrent creations for one account cannot collide.
    pub async fn create(&self, invoice: &Invoice) -> Result<Invoice> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let id = Uuid::new_v4().to_string();
        let invoice_number = Self::next_invoice_number(&mut tx, &invoice.account_id).await?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, account_id, client_id, invoice_number, issue_date, due_date,
                currency, tax_rate, discount_type, discount_value, deposit_percentage,
                subtotal, tax_amount, discount_amount, deposit_amount, total,
                paid_amount, balance, status, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NOW(), NOW())
            "#,
        )
        .bind(&id)
        .bind(&invoice.account_id)
        .bind(&invoice.client_id)
        .bind(&invoice_number)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.currency)
        .bind(invoice.tax_rate)
        .bind(invoice.discount_type)
        .bind(invoice.discount_value)
        .bind(invoice.deposit_percentage)
        .bind(invoice.subtotal)
        .bind(invoice.tax_amount)
        .bind(invoice.discount_amount)
        .bind(invoice.deposit_amount)
        .bind(invoice.total)
        .bind(invoice.paid_amount)
        .bind(invoice.balance)
        .bind(invoice.status)
        .bind(&invoice.notes)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Invoice number '{}' already exists",
                        invoice_number
                    ));
                }
            }
            AppError::Database(e)
        })?;

        let line_items = Self::insert_items(&mut tx, &id, &invoice.line_items).await?;

        tx.commit().await.map_err(AppError::Database)?;

        let mut created = invoice.clone();
        created.id = Some(id);
        created.invoice_number = invoice_number;
        created.line_items = line_items;

        Ok(created)
    }

    /// Find an invoice by id, including its line items and client summary
    pub async fn find_by_id(&self, id: &str, account_id: &str) -> Result<Option<Invoice>> {
        let row = sqlx::query(
            r#"
            SELECT i.*, c.name AS client_name, c.email AS client_email,
                   c.company_name AS client_company
            FROM invoices i
            JOIN clients c ON c.id = i.client_id
            WHERE i.id = ? AND i.account_id = ?
            "#,
        )
        .bind(id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let mut invoice = Self::invoice_from_row(&row)?;
        invoice.line_items = self.find_items(id).await?;

        Ok(Some(invoice))
    }

    /// List invoices for an account, newest first, with client summaries
    /// but without line items
    pub async fn list(
        &self,
        account_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Invoice>> {
        let (limit, offset) = page_bounds(limit, offset);

        let rows = sqlx::query(
            r#"
            SELECT i.*, c.name AS client_name, c.email AS client_email,
                   c.company_name AS client_company
            FROM invoices i
            JOIN clients c ON c.id = i.client_id
            WHERE i.account_id = ?
            ORDER BY i.created_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(account_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        rows.iter().map(Self::invoice_from_row).collect()
    }

    /// Replace an invoice and its full line item set in a transaction
    pub async fn update(&self, invoice: &Invoice) -> Result<Invoice> {
        let id = invoice
            .id
            .clone()
            .ok_or_else(|| AppError::internal("Cannot update invoice without id"))?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                client_id = ?, issue_date = ?, due_date = ?, currency = ?,
                tax_rate = ?, discount_type = ?, discount_value = ?,
                deposit_percentage = ?, subtotal = ?, tax_amount = ?,
                discount_amount = ?, deposit_amount = ?, total = ?,
                paid_amount = ?, balance = ?, status = ?, notes = ?,
                updated_at = NOW()
            WHERE id = ? AND account_id = ?
            "#,
        )
        .bind(&invoice.client_id)
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(invoice.currency)
        .bind(invoice.tax_rate)
        .bind(invoice.discount_type)
        .bind(invoice.discount_value)
        .bind(invoice.deposit_percentage)
        .bind(invoice.subtotal)
        .bind(invoice.tax_amount)
        .bind(invoice.discount_amount)
        .bind(invoice.deposit_amount)
        .bind(invoice.total)
        .bind(invoice.paid_amount)
        .bind(invoice.balance)
        .bind(invoice.status)
        .bind(&invoice.notes)
        .bind(&id)
        .bind(&invoice.account_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                id
            )));
        }

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(&id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        let line_items = Self::insert_items(&mut tx, &id, &invoice.line_items).await?;

        tx.commit().await.map_err(AppError::Database)?;

        let mut updated = invoice.clone();
        updated.line_items = line_items;

        Ok(updated)
    }

    /// Delete an invoice with its line items and payment history.
    ///
    /// Children go first so the parent delete cannot trip the foreign
    /// keys; the whole removal commits or rolls back as one.
    pub async fn delete(&self, id: &str, account_id: &str) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // Child rows are scoped through the parent so a foreign id
        // can't delete another account's data
        sqlx::query(
            r#"
            DELETE FROM invoice_items
            WHERE invoice_id = ?
              AND invoice_id IN (SELECT id FROM invoices WHERE id = ? AND account_id = ?)
            "#,
        )
        .bind(id)
        .bind(id)
        .bind(account_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        sqlx::query(
            r#"
            DELETE FROM payments
            WHERE invoice_id = ?
              AND invoice_id IN (SELECT id FROM invoices WHERE id = ? AND account_id = ?)
            "#,
        )
        .bind(id)
        .bind(id)
        .bind(account_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::Database)?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ? AND account_id = ?")
            .bind(id)
            .bind(account_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Invoice with id '{}' not found",
                id
            )));
        }

        tx.commit().await.map_err(AppError::Database)?;

        Ok(())
    }

    /// Fetch an invoice inside a transaction with a row lock, without
    /// line items. Used by payment recording to serialize concurrent
    /// payments against the same invoice.
    pub async fn find_by_id_for_update(
        tx: &mut Transaction<'_, MySql>,
        id: &str,
        account_id: &str,
    ) -> Result<Option<Invoice>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM invoices WHERE id = ? AND account_id = ? FOR UPDATE",
            INVOICE_COLUMNS
        ))
        .bind(id)
        .bind(account_id)
        .fetch_optional(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        row.as_ref().map(Self::invoice_from_row).transpose()
    }

    /// Write the payment-derived fields inside an open transaction
    pub async fn apply_payment_with_tx(
        tx: &mut Transaction<'_, MySql>,
        id: &str,
        paid_amount: rust_decimal::Decimal,
        balance: rust_decimal::Decimal,
        status: InvoiceStatus,
    ) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE invoices
            SET paid_amount = ?, balance = ?, status = ?, updated_at = NOW()
            WHERE id = ?
            "#,
        )
        .bind(paid_amount)
        .bind(balance)
        .bind(status)
        .bind(id)
        .execute(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        Ok(())
    }

    async fn find_items(&self, invoice_id: &str) -> Result<Vec<InvoiceItem>> {
        let items = sqlx::query_as::<_, InvoiceItem>(&format!(
            "SELECT {} FROM invoice_items WHERE invoice_id = ? ORDER BY position",
            ITEM_COLUMNS
        ))
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(items)
    }

    /// Insert line items with fresh ids, preserving caller order
    async fn insert_items(
        tx: &mut Transaction<'_, MySql>,
        invoice_id: &str,
        items: &[InvoiceItem],
    ) -> Result<Vec<InvoiceItem>> {
        let mut inserted = Vec::with_capacity(items.len());

        for (position, item) in items.iter().enumerate() {
            let item_id = Uuid::new_v4().to_string();

            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, position, title, description, quantity,
                    unit_price, discount_type, discount_value, amount
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&item_id)
            .bind(invoice_id)
            .bind(position as i32)
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.discount_type)
            .bind(item.discount_value)
            .bind(item.amount)
            .execute(&mut **tx)
            .await
            .map_err(AppError::Database)?;

            let mut saved = item.clone();
            saved.id = Some(item_id);
            saved.invoice_id = Some(invoice_id.to_string());
            inserted.push(saved);
        }

        Ok(inserted)
    }

    /// Next sequential invoice number for an account.
    ///
    /// Reads the current maximum under the transaction's lock so the
    /// sequence survives deletions without reissuing numbers.
    async fn next_invoice_number(
        tx: &mut Transaction<'_, MySql>,
        account_id: &str,
    ) -> Result<String> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(MAX(CAST(SUBSTRING(invoice_number, 5) AS UNSIGNED)), 0) AS seq
            FROM invoices
            WHERE account_id = ?
            FOR UPDATE
            "#,
        )
        .bind(account_id)
        .fetch_one(&mut **tx)
        .await
        .map_err(AppError::Database)?;

        let seq: u64 = row.try_get("seq").map_err(AppError::Database)?;

        Ok(format!("INV-{:04}", seq + 1))
    }

    fn invoice_from_row(row: &sqlx::mysql::MySqlRow) -> Result<Invoice> {
        let mut invoice = Invoice::from_row(row).map_err(AppError::Database)?;

        // Client columns are only present on joined reads
        if let Ok(name) = row.try_get::<String, _>("client_name") {
            invoice.client = Some(ClientSummary {
                name,
                email: row.try_get("client_email").map_err(AppError::Database)?,
                company_name: row.try_get("client_company").map_err(AppError::Database)?,
            });
        }

        Ok(invoice)
    }
}

/// Clamp pagination inputs before they reach the LIMIT/OFFSET binds.
/// Negative query-string values become 0 instead of a database error.
fn page_bounds(limit: Option<i64>, offset: Option<i64>) -> (i64, i64) {
    let limit = limit.unwrap_or(50).clamp(0, 500);
    let offset = offset.unwrap_or(0).max(0);

    (limit, offset)
}
