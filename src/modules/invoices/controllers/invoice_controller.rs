use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::invoices::models::CreateInvoiceRequest;
use crate::modules::invoices::services::invoice_service::InvoiceService;

/// Query parameters for listing invoices
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Create a new invoice
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    account_id: AccountId,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .create_invoice(request.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// Get invoice by ID with client and line items
/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    account_id: AccountId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(&path.into_inner(), &account_id.0).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// List invoices for the account
/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    account_id: AccountId,
    query: web::Query<ListInvoicesQuery>,
) -> Result<HttpResponse, AppError> {
    let invoices = service
        .list_invoices(&account_id.0, query.limit, query.offset)
        .await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Replace an invoice and its line items
/// PUT /invoices/{id}
pub async fn update_invoice(
    service: web::Data<Arc<InvoiceService>>,
    account_id: AccountId,
    path: web::Path<String>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .update_invoice(&path.into_inner(), request.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// Delete an invoice
/// DELETE /invoices/{id}
pub async fn delete_invoice(
    service: web::Data<Arc<InvoiceService>>,
    account_id: AccountId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service
        .delete_invoice(&path.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::put().to(update_invoice))
            .route("/{id}", web::delete().to(delete_invoice))
            .route(
                "/{invoice_id}/payments",
                web::post().to(crate::modules::payments::controllers::record_payment),
            )
            .route(
                "/{invoice_id}/payments",
                web::get().to(crate::modules::payments::controllers::list_payments),
            ),
    );
}
