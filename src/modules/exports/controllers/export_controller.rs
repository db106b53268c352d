use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::exports::services::csv_exporter::CsvExporter;

/// Download invoices as CSV
/// GET /exports/invoices
pub async fn export_invoices(
    exporter: web::Data<Arc<CsvExporter>>,
    account_id: AccountId,
) -> Result<HttpResponse, AppError> {
    let csv = exporter.invoices_csv(&account_id.0).await?;

    Ok(csv_response("invoices.csv", csv))
}

/// Download clients as CSV
/// GET /exports/clients
pub async fn export_clients(
    exporter: web::Data<Arc<CsvExporter>>,
    account_id: AccountId,
) -> Result<HttpResponse, AppError> {
    let csv = exporter.clients_csv(&account_id.0).await?;

    Ok(csv_response("clients.csv", csv))
}

fn csv_response(filename: &str, body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            format!("attachment; filename=\"{filename}\""),
        ))
        .body(body)
}

/// Configure export routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/exports")
            .route("/invoices", web::get().to(export_invoices))
            .route("/clients", web::get().to(export_clients)),
    );
}
