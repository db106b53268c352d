use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::invoices::models::{
    CreateInvoiceItemRequest, CreateInvoiceRequest, Invoice, InvoiceItem,
};
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::invoices::services::totals::{self, Discount, InvoiceRates, InvoiceTotals};
use crate::modules::payments::services::payment_application::{rebalance, status_for_paid_amount};

/// Service for invoice business logic
pub struct InvoiceService {
    invoice_repo: Arc<InvoiceRepository>,
    client_repo: Arc<ClientRepository>,
}

impl InvoiceService {
    pub fn new(invoice_repo: Arc<InvoiceRepository>, client_repo: Arc<ClientRepository>) -> Self {
        Self {
            invoice_repo,
            client_repo,
        }
    }

    /// Create a new invoice with line items and computed totals.
    ///
    /// The invoice number is assigned by the repository inside the
    /// creation transaction.
    pub async fn create_invoice(
        &self,
        request: CreateInvoiceRequest,
        account_id: &str,
    ) -> Result<Invoice> {
        self.client_repo
            .find_by_id(&request.client_id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let line_items = Self::build_line_items(&request.items)?;
        let computed = Self::totals_for(&request, &line_items);

        let invoice = Invoice {
            id: None,
            account_id: account_id.to_string(),
            client_id: request.client_id,
            invoice_number: String::new(), // assigned by the repository
            issue_date: request.issue_date,
            due_date: request.due_date,
            currency: request.currency,
            tax_rate: request.tax_rate,
            discount_type: request.discount_type,
            discount_value: request.discount_value,
            deposit_percentage: request.deposit_percentage,
            subtotal: computed.subtotal,
            tax_amount: computed.tax_amount,
            discount_amount: computed.discount_amount,
            deposit_amount: computed.deposit_amount,
            total: computed.total,
            paid_amount: Decimal::ZERO,
            balance: computed.total,
            status: status_for_paid_amount(Decimal::ZERO, computed.total),
            notes: request.notes,
            created_at: None,
            updated_at: None,
            line_items,
            client: None,
        };

        let created = self.invoice_repo.create(&invoice).await?;

        tracing::info!(
            invoice_id = ?created.id,
            invoice_number = %created.invoice_number,
            total = %created.total,
            "Invoice created"
        );

        Ok(created)
    }

    /// Get an invoice with its client and line items
    pub async fn get_invoice(&self, id: &str, account_id: &str) -> Result<Invoice> {
        self.invoice_repo
            .find_by_id(id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Invoice not found"))
    }

    /// List invoices for an account, newest first
    pub async fn list_invoices(
        &self,
        account_id: &str,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<Invoice>> {
        self.invoice_repo.list(account_id, limit, offset).await
    }

    /// Replace an invoice: the full item set is swapped out and totals
    /// recomputed. Recorded payments survive the edit, so the balance is
    /// restored to total - paid_amount and the status re-derived, even
    /// when the new total drops below what was already paid.
    pub async fn update_invoice(
        &self,
        id: &str,
        request: CreateInvoiceRequest,
        account_id: &str,
    ) -> Result<Invoice> {
        let existing = self.get_invoice(id, account_id).await?;

        self.client_repo
            .find_by_id(&request.client_id, account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))?;

        let line_items = Self::build_line_items(&request.items)?;
        let computed = Self::totals_for(&request, &line_items);
        let rebalanced = rebalance(computed.total, existing.paid_amount);

        let invoice = Invoice {
            id: existing.id,
            account_id: existing.account_id,
            client_id: request.client_id,
            invoice_number: existing.invoice_number,
            issue_date: request.issue_date,
            due_date: request.due_date,
            currency: request.currency,
            tax_rate: request.tax_rate,
            discount_type: request.discount_type,
            discount_value: request.discount_value,
            deposit_percentage: request.deposit_percentage,
            subtotal: computed.subtotal,
            tax_amount: computed.tax_amount,
            discount_amount: computed.discount_amount,
            deposit_amount: computed.deposit_amount,
            total: computed.total,
            paid_amount: rebalanced.paid_amount,
            balance: rebalanced.balance,
            status: rebalanced.status,
            notes: request.notes,
            created_at: existing.created_at,
            updated_at: existing.updated_at,
            line_items,
            client: None,
        };

        self.invoice_repo.update(&invoice).await
    }

    /// Delete an invoice along with its line items and payment history
    pub async fn delete_invoice(&self, id: &str, account_id: &str) -> Result<()> {
        self.invoice_repo.delete(id, account_id).await?;

        tracing::info!(invoice_id = %id, "Invoice deleted");

        Ok(())
    }

    fn build_line_items(items: &[CreateInvoiceItemRequest]) -> Result<Vec<InvoiceItem>> {
        items
            .iter()
            .map(|item| {
                InvoiceItem::new(
                    item.title.clone(),
                    item.description.clone(),
                    item.quantity,
                    item.unit_price,
                    item.discount_type,
                    item.discount_value,
                )
            })
            .collect()
    }

    fn totals_for(request: &CreateInvoiceRequest, line_items: &[InvoiceItem]) -> InvoiceTotals {
        let rates = InvoiceRates {
            tax_rate: request.tax_rate,
            discount: Discount::from_parts(request.discount_type, request.discount_value),
            deposit_percentage: request.deposit_percentage,
        };

        totals::compute_totals(line_items.iter().map(|item| item.amount), &rates)
    }
}
