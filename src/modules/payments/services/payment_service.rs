use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::payments::models::{Payment, RecordPaymentRequest};
use crate::modules::payments::repositories::PaymentRepository;
use crate::modules::payments::services::payment_application::apply_payment;

/// Service for recording and listing payments.
///
/// Recording a payment appends the payment row and updates the
/// invoice's paid_amount/balance/status as one transaction, with a row
/// lock on the invoice. Two concurrent payments against the same
/// invoice therefore serialize instead of overwriting each other's
/// aggregate update.
pub struct PaymentService {
    pool: MySqlPool,
    payment_repo: Arc<PaymentRepository>,
    invoice_repo: Arc<InvoiceRepository>,
}

impl PaymentService {
    pub fn new(
        pool: MySqlPool,
        payment_repo: Arc<PaymentRepository>,
        invoice_repo: Arc<InvoiceRepository>,
    ) -> Self {
        Self {
            pool,
            payment_repo,
            invoice_repo,
        }
    }

    /// Record a payment against an invoice.
    ///
    /// Validation failures (non-positive amount, amount over the current
    /// balance) reject the request before anything is written.
    pub async fn record_payment(
        &self,
        invoice_id: &str,
        request: RecordPaymentRequest,
        account_id: &str,
    ) -> Result<Payment> {
        if request.amount <= Decimal::ZERO {
            return Err(AppError::validation(
                "Payment amount must be greater than 0",
            ));
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let invoice = InvoiceRepository::find_by_id_for_update(&mut tx, invoice_id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))?;

        // Checked under the lock: the balance a concurrent payment saw
        // may already be stale by the time we get here
        if request.amount > invoice.balance {
            return Err(AppError::validation("Payment amount cannot exceed balance"));
        }

        let payment = Payment {
            id: None,
            invoice_id: invoice_id.to_string(),
            amount: request.amount,
            payment_date: request.payment_date,
            notes: request.notes,
            created_at: None,
        };

        let saved = PaymentRepository::create_with_tx(&mut tx, &payment).await?;

        let outcome = apply_payment(invoice.total, invoice.paid_amount, request.amount);

        InvoiceRepository::apply_payment_with_tx(
            &mut tx,
            invoice_id,
            outcome.paid_amount,
            outcome.balance,
            outcome.status,
        )
        .await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            invoice_id = %invoice_id,
            amount = %request.amount,
            new_balance = %outcome.balance,
            new_status = %outcome.status,
            "Payment recorded"
        );

        Ok(saved)
    }

    /// List payments for an invoice owned by the account
    pub async fn list_payments(&self, invoice_id: &str, account_id: &str) -> Result<Vec<Payment>> {
        // Ownership check before exposing payment history
        self.invoice_repo
            .find_by_id(invoice_id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))?;

        self.payment_repo.list_by_invoice(invoice_id).await
    }
}
