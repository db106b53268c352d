use chrono::{NaiveDate, Utc};
use std::sync::Arc;

use crate::core::Result;
use crate::modules::clients::models::Client;
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::invoices::models::Invoice;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::reports::services::status_classifier;

const INVOICE_HEADERS: [&str; 9] = [
    "Invoice Number",
    "Client",
    "Issue Date",
    "Due Date",
    "Currency",
    "Total",
    "Paid",
    "Balance",
    "Status",
];

const CLIENT_HEADERS: [&str; 6] = ["Name", "Email", "Company", "Phone", "City", "Country"];

const EXPORT_MAX_ROWS: i64 = 500;

/// Builds CSV exports of invoices and clients.
///
/// Fields are quoted only when they contain a comma; embedded quotes
/// pass through unchanged. Statuses reflect the effective value at
/// export time, so unpaid invoices past their due date show Overdue.
pub struct CsvExporter {
    invoice_repo: Arc<InvoiceRepository>,
    client_repo: Arc<ClientRepository>,
}

impl CsvExporter {
    pub fn new(invoice_repo: Arc<InvoiceRepository>, client_repo: Arc<ClientRepository>) -> Self {
        Self {
            invoice_repo,
            client_repo,
        }
    }

    pub async fn invoices_csv(&self, account_id: &str) -> Result<String> {
        let invoices = self
            .invoice_repo
            .list(account_id, Some(EXPORT_MAX_ROWS), None)
            .await?;
        let today = Utc::now().date_naive();

        tracing::info!(account_id = %account_id, rows = invoices.len(), "Exporting invoices to CSV");

        let rows = invoices.iter().map(|invoice| invoice_row(invoice, today));
        Ok(to_csv(&INVOICE_HEADERS, rows))
    }

    pub async fn clients_csv(&self, account_id: &str) -> Result<String> {
        let clients = self.client_repo.list(account_id).await?;

        tracing::info!(account_id = %account_id, rows = clients.len(), "Exporting clients to CSV");

        let rows = clients.iter().map(client_row);
        Ok(to_csv(&CLIENT_HEADERS, rows))
    }
}

fn invoice_row(invoice: &Invoice, today: NaiveDate) -> Vec<String> {
    let client_name = invoice
        .client
        .as_ref()
        .map(|c| c.name.clone())
        .unwrap_or_default();
    let status = status_classifier::display_status(invoice.status, invoice.due_date, today);
    let currency = invoice.currency;

    vec![
        invoice.invoice_number.clone(),
        client_name,
        invoice.issue_date.to_string(),
        invoice.due_date.to_string(),
        currency.to_string(),
        currency.round(invoice.total).to_string(),
        currency.round(invoice.paid_amount).to_string(),
        currency.round(invoice.balance).to_string(),
        status.to_string(),
    ]
}

fn client_row(client: &Client) -> Vec<String> {
    vec![
        client.name.clone(),
        client.email.clone(),
        client.company_name.clone().unwrap_or_default(),
        client.phone.clone().unwrap_or_default(),
        client.city.clone().unwrap_or_default(),
        client.country.clone().unwrap_or_default(),
    ]
}

/// Render a header row plus data rows as CSV text.
///
/// A field is wrapped in double quotes only when it contains a comma;
/// any embedded quotes are left as-is.
pub fn to_csv<I>(headers: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut out = String::new();
    out.push_str(&headers.join(","));
    out.push('\n');

    for row in rows {
        let line: Vec<String> = row.into_iter().map(escape_field).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}

fn escape_field(field: String) -> String {
    if field.contains(',') {
        format!("\"{field}\"")
    } else {
        field
    }
}
