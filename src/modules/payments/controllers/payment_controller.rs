use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::payments::models::RecordPaymentRequest;
use crate::modules::payments::services::payment_service::PaymentService;

/// Record a payment against an invoice
/// POST /invoices/{invoice_id}/payments
pub async fn record_payment(
    service: web::Data<Arc<PaymentService>>,
    account_id: AccountId,
    path: web::Path<String>,
    request: web::Json<RecordPaymentRequest>,
) -> Result<HttpResponse, AppError> {
    let payment = service
        .record_payment(&path.into_inner(), request.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Created().json(payment))
}

/// List payments for an invoice, newest first
/// GET /invoices/{invoice_id}/payments
pub async fn list_payments(
    service: web::Data<Arc<PaymentService>>,
    account_id: AccountId,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let payments = service
        .list_payments(&path.into_inner(), &account_id.0)
        .await?;

    Ok(HttpResponse::Ok().json(payments))
}
