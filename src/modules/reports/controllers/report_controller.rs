use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::error::AppError;
use crate::middleware::auth::AccountId;
use crate::modules::reports::services::report_service::ReportService;

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    #[serde(default = "default_months")]
    pub months: usize,
}

fn default_months() -> usize {
    6
}

#[derive(Debug, Deserialize)]
pub struct RecentInvoicesQuery {
    #[serde(default = "default_recent_limit")]
    pub limit: i64,
}

fn default_recent_limit() -> i64 {
    5
}

/// Dashboard statistics for the account
/// GET /reports/dashboard
pub async fn dashboard(
    service: web::Data<Arc<ReportService>>,
    account_id: AccountId,
) -> Result<HttpResponse, AppError> {
    let stats = service.dashboard_stats(&account_id.0).await?;

    Ok(HttpResponse::Ok().json(stats))
}

/// Revenue grouped by month
/// GET /reports/revenue?months=
pub async fn revenue(
    service: web::Data<Arc<ReportService>>,
    account_id: AccountId,
    query: web::Query<RevenueQuery>,
) -> Result<HttpResponse, AppError> {
    let revenue = service.revenue_by_month(&account_id.0, query.months).await?;

    Ok(HttpResponse::Ok().json(revenue))
}

/// Most recently created invoices
/// GET /reports/recent-invoices?limit=
pub async fn recent_invoices(
    service: web::Data<Arc<ReportService>>,
    account_id: AccountId,
    query: web::Query<RecentInvoicesQuery>,
) -> Result<HttpResponse, AppError> {
    let invoices = service.recent_invoices(&account_id.0, query.limit).await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .route("/dashboard", web::get().to(dashboard))
            .route("/revenue", web::get().to(revenue))
            .route("/recent-invoices", web::get().to(recent_invoices)),
    );
}
